//! SQLite product store implementation

use crate::model::Product;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ProductStore, StorageError, StorageResult};
use crate::SiftError;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend for product rows
pub struct SqliteStore {
    conn: Connection,
    table: String,
}

impl SqliteStore {
    /// Opens (or creates) a product database
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    /// * `table` - Target table for product rows; must be a plain identifier
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(SiftError)` - Failed to open or the table name was rejected
    pub fn open(path: &Path, table: &str) -> Result<Self, SiftError> {
        check_table_name(table)?;

        let conn = Connection::open(path).map_err(StorageError::Sqlite)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )
        .map_err(StorageError::Sqlite)?;

        initialize_schema(&conn, table).map_err(StorageError::Sqlite)?;

        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    /// Creates an in-memory store (for testing)
    #[cfg(test)]
    pub fn new_in_memory(table: &str) -> Result<Self, SiftError> {
        check_table_name(table)?;
        let conn = Connection::open_in_memory().map_err(StorageError::Sqlite)?;
        initialize_schema(&conn, table).map_err(StorageError::Sqlite)?;
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }
}

/// Rejects table names that are not plain identifiers.
///
/// The table name is interpolated into SQL text; parameter binding cannot
/// cover identifiers.
fn check_table_name(table: &str) -> Result<(), StorageError> {
    let valid = !table.is_empty()
        && !table.chars().next().is_some_and(|c| c.is_ascii_digit())
        && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidTable(table.to_string()))
    }
}

impl ProductStore for SqliteStore {
    fn insert_products(&mut self, products: &[Product]) -> StorageResult<usize> {
        // One transaction for the whole batch: a mid-batch fault rolls the
        // store back to its pre-run contents when `tx` drops uncommitted.
        let tx = self.conn.transaction()?;
        let mut inserted = 0usize;

        {
            let sql = format!(
                "INSERT INTO {} (name, specs, new_price, old_price, link, brand, category, datetime, stock, store)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(link) DO NOTHING",
                self.table
            );
            let mut stmt = tx.prepare(&sql)?;

            for product in products {
                inserted += stmt.execute(params![
                    product.name,
                    product.specs,
                    product.new_price,
                    product.old_price,
                    product.link,
                    product.brand,
                    product.category,
                    product.timestamp.to_rfc3339(),
                    product.stock,
                    product.store,
                ])?;
            }
        }

        tx.commit()?;
        Ok(inserted)
    }

    fn count_rows(&self) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_rows_for_category(&self, category: &str) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE category = ?1", self.table),
            params![category],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn link_exists(&self, link: &str) -> StorageResult<bool> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE link = ?1", self.table),
            params![link],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn category_breakdown(&self) -> StorageResult<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT category, COUNT(*) FROM {} GROUP BY category ORDER BY category",
            self.table
        ))?;

        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get::<_, i64>(1)? as u64)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn test_product(link: &str, price: f64) -> Product {
        Product {
            name: "Phone X".to_string(),
            specs: "128GB".to_string(),
            new_price: price,
            old_price: price,
            brand: "Acme".to_string(),
            link: link.to_string(),
            category: "smartphones".to_string(),
            timestamp: FixedOffset::east_opt(3 * 3600)
                .unwrap()
                .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
                .unwrap(),
            stock: None,
            store: None,
        }
    }

    #[test]
    fn test_open_in_memory() {
        assert!(SqliteStore::new_in_memory("products").is_ok());
    }

    #[test]
    fn test_invalid_table_name_rejected() {
        let result = SqliteStore::new_in_memory("products; DROP TABLE x");
        assert!(result.is_err());
    }

    #[test]
    fn test_insert_returns_inserted_count() {
        let mut store = SqliteStore::new_in_memory("products").unwrap();
        let products = vec![
            test_product("https://example.com/a.html", 100.0),
            test_product("https://example.com/b.html", 200.0),
        ];

        let inserted = store.insert_products(&products).unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(store.count_rows().unwrap(), 2);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut store = SqliteStore::new_in_memory("products").unwrap();
        let products = vec![
            test_product("https://example.com/a.html", 100.0),
            test_product("https://example.com/b.html", 200.0),
        ];

        assert_eq!(store.insert_products(&products).unwrap(), 2);
        // Second run with the exact same set inserts nothing.
        assert_eq!(store.insert_products(&products).unwrap(), 0);
        assert_eq!(store.count_rows().unwrap(), 2);
    }

    #[test]
    fn test_conflicting_link_is_skipped_not_updated() {
        let mut store = SqliteStore::new_in_memory("products").unwrap();

        store
            .insert_products(&[test_product("https://example.com/a.html", 100.0)])
            .unwrap();
        store
            .insert_products(&[test_product("https://example.com/a.html", 50.0)])
            .unwrap();

        let price: f64 = store
            .conn
            .query_row(
                "SELECT new_price FROM products WHERE link = 'https://example.com/a.html'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(price, 100.0);
        assert_eq!(store.count_rows().unwrap(), 1);
    }

    #[test]
    fn test_partial_overlap_inserts_only_new_links() {
        let mut store = SqliteStore::new_in_memory("products").unwrap();

        store
            .insert_products(&[test_product("https://example.com/a.html", 100.0)])
            .unwrap();

        let inserted = store
            .insert_products(&[
                test_product("https://example.com/a.html", 100.0),
                test_product("https://example.com/c.html", 300.0),
            ])
            .unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(store.count_rows().unwrap(), 2);
    }

    #[test]
    fn test_link_exists() {
        let mut store = SqliteStore::new_in_memory("products").unwrap();
        store
            .insert_products(&[test_product("https://example.com/a.html", 100.0)])
            .unwrap();

        assert!(store.link_exists("https://example.com/a.html").unwrap());
        assert!(!store.link_exists("https://example.com/b.html").unwrap());
    }

    #[test]
    fn test_variant_fields_persisted() {
        let mut store = SqliteStore::new_in_memory("products").unwrap();
        let mut product = test_product("https://example.com/a.html", 100.0);
        product.stock = Some(true);
        product.store = Some("jarir".to_string());

        store.insert_products(&[product]).unwrap();

        let (stock, shop): (bool, String) = store
            .conn
            .query_row("SELECT stock, store FROM products", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert!(stock);
        assert_eq!(shop, "jarir");
    }

    #[test]
    fn test_category_breakdown() {
        let mut store = SqliteStore::new_in_memory("products").unwrap();
        let mut tablet = test_product("https://example.com/t.html", 400.0);
        tablet.category = "tablet".to_string();

        store
            .insert_products(&[
                test_product("https://example.com/a.html", 100.0),
                test_product("https://example.com/b.html", 200.0),
                tablet,
            ])
            .unwrap();

        let breakdown = store.category_breakdown().unwrap();
        assert_eq!(
            breakdown,
            vec![
                ("smartphones".to_string(), 2),
                ("tablet".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_count_rows_for_category() {
        let mut store = SqliteStore::new_in_memory("products").unwrap();
        store
            .insert_products(&[test_product("https://example.com/a.html", 100.0)])
            .unwrap();

        assert_eq!(store.count_rows_for_category("smartphones").unwrap(), 1);
        assert_eq!(store.count_rows_for_category("laptops").unwrap(), 0);
    }
}
