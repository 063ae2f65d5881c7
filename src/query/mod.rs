//! Clause Compiler: derives the filtered and wrapped SQL statements from
//! a decoded [`GridRequest`] and the caller's base query.
//!
//! The emitted text is deterministic: columns and ordering rules are
//! walked in ascending index order, and the clause sequence is fixed as
//! WHERE, ORDER BY, LIMIT, OFFSET. Search terms are quote-escaped and
//! the paging values arrive strict-parsed from the decoder, so nothing
//! interpolated here originates from unvalidated request text.

mod paging;
mod search;
mod sort;

use crate::errors::GridError;
use crate::models::GridRequest;

/// The two derived statements. `filtered_sql` reflects filtering only and
/// backs the `recordsFiltered` count; `wrapped_sql` adds ordering and
/// paging and produces the returned page of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub filtered_sql: String,
    pub wrapped_sql: String,
}

/// Alias the base query as a subquery so derived clauses can reference
/// its projection.
fn wrap_base(base_sql: &str) -> String {
    format!("select * from ({base_sql}) as og")
}

/// Compile the request into its filtered and wrapped statements.
///
/// # Errors
///
/// [`GridError::InvalidOrderColumn`] when an ordering rule targets a
/// column that is absent or not orderable, and
/// [`GridError::MissingLengthForStart`] when an offset is requested
/// without a row cap. Ordering is validated before paging, so a request
/// broken in both ways reports the ordering problem.
pub fn compile(base_sql: &str, request: &GridRequest) -> Result<CompiledQuery, GridError> {
    let mut sql = wrap_base(base_sql);

    let mut clauses = Vec::new();
    // An empty global term means no filter; a bare `LIKE '%%'` would
    // still drop NULL-valued rows from the filtered count.
    if let Some(term) = request
        .global_search
        .as_deref()
        .filter(|term| !term.is_empty())
    {
        if let Some(clause) = search::global_clause(&request.columns, term) {
            clauses.push(clause);
        }
    }
    if let Some(clause) = search::per_column_clause(&request.columns) {
        clauses.push(clause);
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    let filtered_sql = sql.clone();

    if let Some(order) = sort::order_clause(&request.columns, &request.orderings)? {
        sql.push_str(" ORDER BY ");
        sql.push_str(&order);
    }
    sql.push_str(&paging::paging_clause(request.start, request.length)?);

    Ok(CompiledQuery {
        filtered_sql,
        wrapped_sql: sql,
    })
}
