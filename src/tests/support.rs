use crate::AppState;
use crate::database::sqlite::SqliteRepository;
use crate::database::{EntryRepository, StoreError};
use crate::db::init_db_connection;
use crate::domain::{Entry, EntryFields};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

// a fresh in-memory database with the entries table migrated in
pub async fn memory_repository() -> SqliteRepository {
    let pool = init_db_connection("sqlite::memory:", 1)
        .await
        .expect("Failed to create in-memory database");
    SqliteRepository::new(pool)
}

pub async fn sqlite_state() -> AppState {
    AppState {
        entries: Arc::new(memory_repository().await),
    }
}

pub fn fields(title: &str, photo_url: &str, notes: &str) -> EntryFields {
    EntryFields {
        title: title.to_string(),
        photo_url: photo_url.to_string(),
        notes: notes.to_string(),
    }
}

// fire one request at the router and hand back the status plus parsed JSON body
// (Value::Null when the body is empty)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

// --- Manual Mock: EntryRepository ---
// keeps entries in a BTreeMap and counts every call so tests can prove
// that rejected requests never reached the store
#[derive(Clone, Default)]
pub struct MockRepository {
    pub entries: Arc<Mutex<BTreeMap<i64, Entry>>>,
    pub next_id: Arc<AtomicUsize>,
    pub calls: Arc<AtomicUsize>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntryRepository for MockRepository {
    async fn list_all(&self) -> Result<Vec<Entry>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, fields: &EntryFields) -> Result<Entry, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let entry_id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let entry = Entry {
            entry_id,
            title: fields.title.clone(),
            photo_url: fields.photo_url.clone(),
            notes: fields.notes.clone(),
        };
        self.entries.lock().unwrap().insert(entry_id, entry.clone());
        Ok(entry)
    }

    async fn update_by_id(
        &self,
        entry_id: i64,
        fields: &EntryFields,
    ) -> Result<Option<Entry>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.lock().unwrap();
        Ok(entries.get_mut(&entry_id).map(|entry| {
            entry.title = fields.title.clone();
            entry.photo_url = fields.photo_url.clone();
            entry.notes = fields.notes.clone();
            entry.clone()
        }))
    }

    async fn delete_by_id(&self, entry_id: i64) -> Result<bool, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.lock().unwrap().remove(&entry_id).is_some())
    }
}

pub const STORE_SECRET: &str = "no such table: entries_secret_detail";

// --- Manual Mock: a store that is always down ---
pub struct FailingRepository;

fn store_down(operation: &'static str) -> StoreError {
    StoreError::query(operation)(sqlx::Error::Protocol(STORE_SECRET.to_string()))
}

#[async_trait]
impl EntryRepository for FailingRepository {
    async fn list_all(&self) -> Result<Vec<Entry>, StoreError> {
        Err(store_down("list entries"))
    }

    async fn create(&self, _fields: &EntryFields) -> Result<Entry, StoreError> {
        Err(store_down("insert entry"))
    }

    async fn update_by_id(
        &self,
        _entry_id: i64,
        _fields: &EntryFields,
    ) -> Result<Option<Entry>, StoreError> {
        Err(store_down("update entry"))
    }

    async fn delete_by_id(&self, _entry_id: i64) -> Result<bool, StoreError> {
        Err(store_down("delete entry"))
    }
}

// --- Manual Mock: a store that never answers in time ---
pub struct StalledRepository {
    pub delay: Duration,
}

#[async_trait]
impl EntryRepository for StalledRepository {
    async fn list_all(&self) -> Result<Vec<Entry>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn create(&self, _fields: &EntryFields) -> Result<Entry, StoreError> {
        tokio::time::sleep(self.delay).await;
        Err(store_down("insert entry"))
    }

    async fn update_by_id(
        &self,
        _entry_id: i64,
        _fields: &EntryFields,
    ) -> Result<Option<Entry>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }

    async fn delete_by_id(&self, _entry_id: i64) -> Result<bool, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(false)
    }
}
