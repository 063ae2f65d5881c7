//! Query Orchestrator: decode, compile, execute, shape.
//!
//! Validation failures short-circuit into the grid's structured error
//! body with the draw counter still echoed. Executor failures are not
//! caught here at all; they propagate to the HTTP layer's generic
//! server-error handling.

use crate::executor::QueryExecutor;
use crate::models::GridResponse;
use crate::{params, query};
use sea_orm::DbErr;
use std::collections::HashMap;

/// Outcome of a grid request that made it to (or through) execution.
/// `Rejected` carries the zero-count error body the HTTP layer returns
/// with a client-error status.
#[derive(Debug, PartialEq)]
pub enum GridOutcome {
    Page(GridResponse),
    Rejected(GridResponse),
}

/// Run one grid request end to end against `executor`.
///
/// Three statements are issued on success: the wrapped query for the page
/// of rows, and one COUNT over the base and filtered queries each, so the
/// reported counts are independent of paging.
///
/// # Errors
///
/// Only executor-level failures ([`DbErr`]) are returned; request
/// validation problems become [`GridOutcome::Rejected`].
pub async fn fetch_grid<E>(
    executor: &E,
    base_sql: &str,
    request_params: &HashMap<String, String>,
) -> Result<GridOutcome, DbErr>
where
    E: QueryExecutor + ?Sized,
{
    let draw = params::draw_param(request_params);

    let compiled = match params::decode(request_params)
        .and_then(|request| query::compile(base_sql, &request))
    {
        Ok(compiled) => compiled,
        Err(err) => {
            tracing::debug!(error = %err, "rejected grid request");
            return Ok(GridOutcome::Rejected(GridResponse::rejected(
                draw,
                err.to_string(),
            )));
        }
    };

    let data = executor.fetch_rows(&compiled.wrapped_sql).await?;
    let records_total = executor
        .fetch_count(&format!(
            "select count(*) as total from ({base_sql}) as og"
        ))
        .await?;
    let records_filtered = executor
        .fetch_count(&format!(
            "select count(*) as filtered from ({}) as og",
            compiled.filtered_sql
        ))
        .await?;

    Ok(GridOutcome::Page(GridResponse::page(
        draw,
        records_total,
        records_filtered,
        data,
    )))
}
