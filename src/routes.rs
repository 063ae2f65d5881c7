//! HTTP glue: two GET endpoints, one for an explicit base query and one
//! for a named table, both funnelling into the orchestrator.

use crate::errors::{ErrorResponse, ServerError};
use crate::operations::{GridOutcome, fetch_grid};
use crate::validation::{is_valid_identifier, validate_select};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

/// Build the grid router over a database connection.
///
/// - `GET /grid?sql=...` runs an arbitrary read-only SELECT.
/// - `GET /grid/{table}` runs `select * from "<table>"`.
pub fn router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/grid", get(grid_query))
        .route("/grid/{table}", get(grid_table))
        .with_state(db)
}

async fn grid_query(
    State(db): State<DatabaseConnection>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ServerError> {
    let Some(base_sql) = params.get("sql") else {
        return Ok(bad_request("Missing required parameter 'sql'"));
    };
    if let Err(reason) = validate_select(base_sql) {
        return Ok(bad_request(&reason));
    }
    Ok(respond(fetch_grid(&db, base_sql, &params).await?))
}

async fn grid_table(
    State(db): State<DatabaseConnection>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ServerError> {
    if !is_valid_identifier(&table) {
        return Ok(bad_request("Invalid table name"));
    }
    let base_sql = format!("select * from \"{table}\"");
    Ok(respond(fetch_grid(&db, &base_sql, &params).await?))
}

fn respond(outcome: GridOutcome) -> Response {
    match outcome {
        GridOutcome::Page(body) => (StatusCode::OK, Json(body)).into_response(),
        GridOutcome::Rejected(body) => (StatusCode::BAD_REQUEST, Json(body)).into_response(),
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_owned(),
        }),
    )
        .into_response()
}
