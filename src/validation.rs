//! Read-only guards for caller-supplied SQL and table names.
//!
//! This is the seam for the external validator the grid core delegates
//! to: the base query must already be a read-only SELECT before it
//! reaches the compiler. The checks here are deliberately shallow; the
//! inner SQL grammar itself is the executor's problem.

/// Accept only a single SELECT (or WITH ... SELECT) statement.
///
/// # Errors
///
/// Returns a client-facing reason string when the statement could write
/// or chain further statements.
pub fn validate_select(sql: &str) -> Result<(), String> {
    if sql.contains(';') {
        return Err("Statement must not contain ';'".to_owned());
    }
    let keyword = sql
        .trim_start()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    if keyword == "select" || keyword == "with" {
        Ok(())
    } else {
        Err("Statement must begin with SELECT".to_owned())
    }
}

/// Table names routed through the named-table endpoint are interpolated
/// into SQL, so only plain identifiers are allowed.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 100
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
