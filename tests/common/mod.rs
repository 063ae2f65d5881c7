use axum::Router;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

/// In-memory SQLite seeded with a small table of dogs.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory sqlite");

    for sql in [
        "CREATE TABLE dogs (id INTEGER PRIMARY KEY, name TEXT NOT NULL, age INTEGER NOT NULL, weight REAL NOT NULL)",
        "INSERT INTO dogs (id, name, age, weight) VALUES (1, 'Cleo', 5, 48.4)",
        "INSERT INTO dogs (id, name, age, weight) VALUES (2, 'Pancakes', 4, 33.2)",
    ] {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            sql.to_owned(),
        ))
        .await
        .expect("Failed to seed test database");
    }

    db
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    sqlgrid::router(db)
}

/// Percent-encode the bracketed DataTables parameter names so the URI
/// parser accepts them.
pub fn query_string(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                url_escape::encode_component(name),
                url_escape::encode_component(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
