use anyhow::Result;
use async_trait::async_trait;

use crate::models::ProductRecord;

mod sqlite;
pub use sqlite::SqliteStorage;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Create the schema if it does not exist yet.
    async fn migrate(&self) -> Result<()>;
    /// Remove every row; the load policy is truncate-then-reload per run.
    async fn truncate(&self) -> Result<()>;
    /// Insert one site's records in a single transaction. Returns the number
    /// of rows written.
    async fn insert_batch(&self, records: &[ProductRecord]) -> Result<usize>;
}
