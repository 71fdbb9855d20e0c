use crate::domain::{Entry, EntryFields};
use async_trait::async_trait;

pub mod error;
pub mod sqlite;

pub use error::StoreError;

// an EntryRepository is shared by every request task through an Arc in the router state
// sqlx::Pool is thread safe, so implementations only need to hold a pool handle
#[async_trait]
pub trait EntryRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Entry>, StoreError>;

    // write operations
    async fn create(&self, fields: &EntryFields) -> Result<Entry, StoreError>;
    // Ok(None) means no row had this id
    async fn update_by_id(
        &self,
        entry_id: i64,
        fields: &EntryFields,
    ) -> Result<Option<Entry>, StoreError>;
    // Ok(false) means no row had this id
    async fn delete_by_id(&self, entry_id: i64) -> Result<bool, StoreError>;
}
