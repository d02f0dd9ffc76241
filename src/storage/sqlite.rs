use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::models::ProductRecord;
use crate::storage::Storage;

pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).context("Failed to open SQLite database")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS flower (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                Product TEXT,
                Brand TEXT,
                Potency REAL,
                Weight REAL,
                Price REAL,
                StrainType TEXT,
                Location TEXT
            )",
            [],
        )?;

        info!("Database migration completed");
        Ok(())
    }

    async fn truncate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute("DELETE FROM flower", [])?;

        info!("Flower table truncated");
        Ok(())
    }

    async fn insert_batch(&self, records: &[ProductRecord]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        for record in records {
            tx.execute(
                "INSERT INTO flower (Product, Brand, Potency, Weight, Price, StrainType, Location)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.name,
                    record.brand,
                    record.potency,
                    record.weight,
                    record.price,
                    record.strain_type,
                    record.location,
                ],
            )?;
        }

        tx.commit()?;
        info!("Inserted {} products into the database", records.len());
        Ok(records.len())
    }
}
