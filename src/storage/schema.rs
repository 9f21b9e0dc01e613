//! Database schema definitions
//!
//! The target table name is configurable per deployment variant, so the
//! schema is rendered rather than a static constant. Callers must pass a
//! validated identifier; `SqliteStore::open` enforces this.

/// Renders the schema SQL for the given product table
pub fn schema_sql(table: &str) -> String {
    format!(
        r#"
-- Harvested product rows; link is the durable identity
CREATE TABLE IF NOT EXISTS {table} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    specs TEXT NOT NULL,
    new_price REAL NOT NULL,
    old_price REAL NOT NULL,
    link TEXT NOT NULL UNIQUE,
    brand TEXT NOT NULL,
    category TEXT NOT NULL,
    datetime TEXT NOT NULL,
    stock INTEGER,
    store TEXT
);

CREATE INDEX IF NOT EXISTS idx_{table}_category ON {table}(category);
"#,
        table = table
    )
}

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `table` - Target table for product rows
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection, table: &str) -> Result<(), rusqlite::Error> {
    conn.execute_batch(&schema_sql(table))?;
    Ok(())
}
