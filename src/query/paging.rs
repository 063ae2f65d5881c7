//! LIMIT / OFFSET builder.
//!
//! No default row cap is applied: a request that wants an offset must say
//! how many rows it wants, otherwise the emitted SQL would be invalid.

use crate::errors::GridError;

/// Render the paging suffix (with a leading space) or an empty string
/// when no paging was requested. Both values were strict-parsed from
/// digit strings by the decoder.
pub(crate) fn paging_clause(
    start: Option<u64>,
    length: Option<u64>,
) -> Result<String, GridError> {
    match (start, length) {
        (None, None) => Ok(String::new()),
        (None, Some(length)) => Ok(format!(" LIMIT {length}")),
        (Some(_), None) => Err(GridError::MissingLengthForStart),
        (Some(start), Some(length)) => Ok(format!(" LIMIT {length} OFFSET {start}")),
    }
}
