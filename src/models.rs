use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Per-column attributes decoded from `columns[<i>][...]` parameters.
///
/// Absent flags default to "not permitted": a column the client never
/// described cannot be ordered or searched on.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Field or expression this column projects (`columns[<i>][data]`).
    pub data: Option<String>,
    /// Whether ORDER BY may reference this column.
    pub orderable: bool,
    /// Whether this column participates in filtering.
    pub searchable: bool,
    /// Per-column search term (`columns[<i>][search][value]`).
    pub search: Option<String>,
}

/// Sort direction for an ordering rule.
///
/// DataTables clients send `asc`/`desc`; anything else falls back to
/// ascending, matching the client's own behavior.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One ordering rule decoded from `order[<i>][...]` parameters.
///
/// The sequence index (the map key in [`GridRequest::orderings`]) defines
/// tie-break precedence: lower index sorts first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderingRule {
    /// Index of the [`ColumnSpec`] this rule sorts by.
    pub column: Option<usize>,
    pub dir: SortDirection,
}

/// A fully decoded grid request: reserved scalars plus the per-index
/// column and ordering tables. Constructed fresh per request and never
/// mutated after decoding.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GridRequest {
    /// Client-side draw counter, echoed verbatim into the response.
    pub draw: i64,
    /// Row offset; only valid together with `length`.
    pub start: Option<u64>,
    /// Row cap for the returned page.
    pub length: Option<u64>,
    /// Global search term (`search[value]`), applied across all
    /// searchable columns.
    pub global_search: Option<String>,
    pub columns: BTreeMap<usize, ColumnSpec>,
    pub orderings: BTreeMap<usize, OrderingRule>,
}

/// The DataTables response contract. Field names follow the wire protocol;
/// `data` rows keep the result set's natural column order and native
/// scalar types.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct GridResponse {
    /// Echo of the request's draw counter.
    pub draw: i64,
    /// Row count of the base query, independent of filtering and paging.
    #[serde(rename = "recordsTotal")]
    pub records_total: i64,
    /// Row count of the filtered query, independent of paging.
    #[serde(rename = "recordsFiltered")]
    pub records_filtered: i64,
    /// The requested page of rows.
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Value>,
    /// Present only on a validation failure; never set on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GridResponse {
    /// A successful page of rows with its companion counts.
    #[must_use]
    pub fn page(draw: i64, records_total: i64, records_filtered: i64, data: Vec<Value>) -> Self {
        Self {
            draw,
            records_total,
            records_filtered,
            data,
            error: None,
        }
    }

    /// The zero-count body returned for a request that failed validation.
    /// `draw` is still echoed so the client can match up the response.
    #[must_use]
    pub fn rejected(draw: i64, error: impl Into<String>) -> Self {
        Self {
            draw,
            records_total: 0,
            records_filtered: 0,
            data: Vec::new(),
            error: Some(error.into()),
        }
    }
}
