use crate::database::{EntryRepository, StoreError};
use crate::domain::{Entry, EntryFields};
use crate::features::entries::model::DbEntry;
use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository for SqliteRepository {
    async fn list_all(&self) -> Result<Vec<Entry>, StoreError> {
        let db_entries = sqlx::query_as::<_, DbEntry>(
            "SELECT entry_id, title, photo_url, notes FROM entries ORDER BY entry_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::query("list entries"))?;

        Ok(db_entries.into_iter().map(Entry::from).collect())
    }

    async fn create(&self, fields: &EntryFields) -> Result<Entry, StoreError> {
        // the store assigns entry_id, RETURNING hands the full row back in one round trip
        let db_entry = sqlx::query_as::<_, DbEntry>(
            r#"
            INSERT INTO entries (title, photo_url, notes)
            VALUES (?, ?, ?)
            RETURNING entry_id, title, photo_url, notes
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.photo_url)
        .bind(&fields.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::query("insert entry"))?;

        Ok(db_entry.into())
    }

    async fn update_by_id(
        &self,
        entry_id: i64,
        fields: &EntryFields,
    ) -> Result<Option<Entry>, StoreError> {
        // zero matched rows comes back as None rather than an error
        let db_entry_opt = sqlx::query_as::<_, DbEntry>(
            r#"
            UPDATE entries
            SET title = ?, photo_url = ?, notes = ?
            WHERE entry_id = ?
            RETURNING entry_id, title, photo_url, notes
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.photo_url)
        .bind(&fields.notes)
        .bind(entry_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::query("update entry"))?;

        Ok(db_entry_opt.map(Entry::from))
    }

    async fn delete_by_id(&self, entry_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM entries WHERE entry_id = ?")
            .bind(entry_id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::query("delete entry"))?;

        Ok(result.rows_affected() > 0)
    }
}
