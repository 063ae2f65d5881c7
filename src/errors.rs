//! Error taxonomy for grid requests.
//!
//! Validation failures (`GridError`) are surfaced to clients inside the
//! grid's own JSON shape with a 400 status. Executor failures are never
//! translated: they are logged with full detail and surfaced as a
//! sanitized generic 500, so database internals never leak to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// A request the compiler or decoder refused. All variants map to a
/// client error; the orchestrator wraps them into a zero-count
/// [`crate::GridResponse`] with the message in its `error` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A `column[...]`/`order[...]` parameter that does not parse to an
    /// index plus one or two known segments, or a reserved integer
    /// parameter that is not a plain digit string.
    MalformedParameter { name: String },

    /// An ordering rule references a column that is absent or was not
    /// declared orderable.
    InvalidOrderColumn { column: usize },

    /// `start` was supplied without any row cap in effect.
    MissingLengthForStart,
}

impl GridError {
    pub(crate) fn malformed(name: impl Into<String>) -> Self {
        Self::MalformedParameter { name: name.into() }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedParameter { name } => {
                write!(f, "Malformed request parameter '{name}'")
            }
            Self::InvalidOrderColumn { column } => write!(
                f,
                "Column {column} that you are trying to order on has not been specified as orderable"
            ),
            Self::MissingLengthForStart => write!(
                f,
                "Can't use the start param without setting the length parameter"
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// Plain error body used outside the grid contract (base-SQL rejection,
/// sanitized server errors).
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Executor-level failure. Details are logged server-side; clients only
/// ever see the generic message.
#[derive(Debug)]
pub struct ServerError(pub DbErr);

impl From<DbErr> for ServerError {
    fn from(err: DbErr) -> Self {
        Self(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "query execution failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "A database error occurred".to_owned(),
            }),
        )
            .into_response()
    }
}
