pub mod errors;
pub mod executor;
pub mod models;
pub mod operations;
pub mod params;
pub mod query;
pub mod routes;
pub mod validation;

pub use errors::GridError;
pub use executor::QueryExecutor;
pub use models::{ColumnSpec, GridRequest, GridResponse, OrderingRule, SortDirection};
pub use operations::{GridOutcome, fetch_grid};
pub use query::{CompiledQuery, compile};
pub use routes::router;
