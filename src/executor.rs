//! The inner query executor seam.
//!
//! The orchestrator only ever sees this trait; the production
//! implementation hands statements to a sea-orm connection and reads rows
//! back as JSON objects so field order and scalar types survive untouched.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, FromQueryResult, JsonValue, Statement};

/// Executes arbitrary SQL text on behalf of the orchestrator.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run a row-producing statement, one JSON object per row.
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<JsonValue>, DbErr>;

    /// Run a single-value count statement.
    async fn fetch_count(&self, sql: &str) -> Result<i64, DbErr>;
}

#[async_trait]
impl QueryExecutor for DatabaseConnection {
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<JsonValue>, DbErr> {
        let statement = Statement::from_string(self.get_database_backend(), sql.to_owned());
        JsonValue::find_by_statement(statement).all(self).await
    }

    async fn fetch_count(&self, sql: &str) -> Result<i64, DbErr> {
        let statement = Statement::from_string(self.get_database_backend(), sql.to_owned());
        let row = self
            .query_one(statement)
            .await?
            .ok_or_else(|| DbErr::Custom("count query returned no rows".to_owned()))?;
        row.try_get_by::<i64, _>(0)
    }
}
