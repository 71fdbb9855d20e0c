use crate::domain::{Entry, EntryFields};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub struct DbEntry {
    pub entry_id: i64,
    pub title: String,
    pub photo_url: String,
    pub notes: String,
}

impl From<DbEntry> for Entry {
    fn from(db_entry: DbEntry) -> Self {
        Entry {
            entry_id: db_entry.entry_id,
            title: db_entry.title,
            photo_url: db_entry.photo_url,
            notes: db_entry.notes,
        }
    }
}

/// Wire shape of an entry, as the client form reads it.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JsonEntry {
    pub entry_id: i64,
    pub title: String,
    pub photo_url: String,
    pub notes: String,
}

impl From<Entry> for JsonEntry {
    fn from(entry: Entry) -> Self {
        JsonEntry {
            entry_id: entry.entry_id,
            title: entry.title,
            photo_url: entry.photo_url,
            notes: entry.notes,
        }
    }
}

/// Body of POST and PUT requests. Every field is optional here so that a
/// missing field reaches validation instead of failing deserialization.
/// Unknown keys (the client echoes `entryId` on PUT) are ignored.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EntryPayload {
    pub title: Option<String>,
    pub photo_url: Option<String>,
    pub notes: Option<String>,
}

impl EntryPayload {
    /// Reads the payload out of a request body. Only a JSON object is
    /// accepted; serde would otherwise fill the fields of a struct from an
    /// array by position.
    pub fn from_json(body: Value) -> Result<Self, serde_json::Error> {
        if !body.is_object() {
            return Err(serde_json::Error::custom("expected a JSON object"));
        }
        serde_json::from_value(body)
    }

    /// Either the three content fields, or the wire names of every field that
    /// is absent, null or empty.
    pub fn validate(self) -> Result<EntryFields, Vec<&'static str>> {
        let mut missing = Vec::new();

        let title = required(self.title, "title", &mut missing);
        let photo_url = required(self.photo_url, "photoUrl", &mut missing);
        let notes = required(self.notes, "notes", &mut missing);

        match (title, photo_url, notes) {
            (Some(title), Some(photo_url), Some(notes)) => Ok(EntryFields {
                title,
                photo_url,
                notes,
            }),
            _ => Err(missing),
        }
    }
}

fn required(
    value: Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            missing.push(name);
            None
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}
