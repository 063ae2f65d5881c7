//! LIKE-clause builders for the global and per-column search terms.

use crate::models::ColumnSpec;
use std::collections::BTreeMap;

/// Double single quotes so a term cannot terminate the string literal it
/// is embedded in. LIKE wildcards (`%`, `_`) pass through untouched: the
/// grid protocol treats search input as a plain substring and clients
/// rely on that.
fn escape_term(term: &str) -> String {
    term.replace('\'', "''")
}

fn like_predicate(data: &str, term: &str) -> String {
    format!("{data} LIKE '%{}%'", escape_term(term))
}

/// Searchable columns that actually project something. A searchable
/// column with no `data` expression has nothing to match against and
/// contributes no predicate.
fn searchable<'a>(
    columns: &'a BTreeMap<usize, ColumnSpec>,
) -> impl Iterator<Item = (&'a str, &'a ColumnSpec)> {
    columns.values().filter_map(|column| {
        column
            .data
            .as_deref()
            .filter(|data| column.searchable && !data.is_empty())
            .map(|data| (data, column))
    })
}

/// OR of one LIKE predicate per searchable column, parenthesized.
/// `None` when no searchable column exists.
pub(crate) fn global_clause(
    columns: &BTreeMap<usize, ColumnSpec>,
    term: &str,
) -> Option<String> {
    let predicates: Vec<String> = searchable(columns)
        .map(|(data, _)| like_predicate(data, term))
        .collect();
    if predicates.is_empty() {
        None
    } else {
        Some(format!("({})", predicates.join(" OR ")))
    }
}

/// AND of one LIKE predicate per searchable column carrying its own
/// non-empty search term.
pub(crate) fn per_column_clause(columns: &BTreeMap<usize, ColumnSpec>) -> Option<String> {
    let predicates: Vec<String> = searchable(columns)
        .filter_map(|(data, column)| {
            column
                .search
                .as_deref()
                .filter(|term| !term.is_empty())
                .map(|term| like_predicate(data, term))
        })
        .collect();
    if predicates.is_empty() {
        None
    } else {
        Some(predicates.join(" AND "))
    }
}
