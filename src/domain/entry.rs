use derive_more::derive::Display;

/// A persisted journal entry. `entry_id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("#{} {}", entry_id, title)]
pub struct Entry {
    pub entry_id: i64,
    pub title: String,
    pub photo_url: String,
    pub notes: String,
}

/// The user-editable content of an entry. Only built from a validated payload,
/// so all three fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub title: String,
    pub photo_url: String,
    pub notes: String,
}
