//! Core data types for the memories journal
//!
//! - `MemoryEntry`: a stored journal record
//! - `NewMemory`: the form input a record is created from

use serde::{Deserialize, Serialize};

/// A single journal record
///
/// The serialized shape (`id`, `title`, `date`, `content`) matches what the
/// browser journal wrote to local storage, so existing dumps load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryEntry {
    /// Creation time in Unix milliseconds; unique within a journal
    pub id: i64,
    pub title: String,
    /// Calendar date as entered, normally `YYYY-MM-DD`
    pub date: String,
    pub content: String,
}

/// Input for creating an entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMemory {
    pub title: String,
    pub date: String,
    pub content: String,
}

impl NewMemory {
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            content: content.into(),
        }
    }

    /// Name of the first blank field, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("title", &self.title),
            ("date", &self.date),
            ("content", &self.content),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }

    pub(crate) fn into_entry(self, id: i64) -> MemoryEntry {
        MemoryEntry {
            id,
            title: self.title,
            date: self.date,
            content: self.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_json_shape() {
        let entry = MemoryEntry {
            id: 1700000000000,
            title: "Beach".to_string(),
            date: "2024-03-05".to_string(),
            content: "Sunset swim".to_string(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 1700000000000i64);
        assert_eq!(json["title"], "Beach");
        assert_eq!(json["date"], "2024-03-05");
        assert_eq!(json["content"], "Sunset swim");
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(NewMemory::new("a", "2024-01-01", "c").missing_field(), None);
        assert_eq!(
            NewMemory::new("  ", "2024-01-01", "c").missing_field(),
            Some("title")
        );
        assert_eq!(NewMemory::new("a", "", "").missing_field(), Some("date"));
        assert_eq!(
            NewMemory::new("a", "2024-01-01", "\n").missing_field(),
            Some("content")
        );
    }
}
