use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned note identifier. Immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A note as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub last_updated_at: DateTime<Utc>,
}

/// Creation payload; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub last_updated_at: DateTime<Utc>,
}

impl NewNote {
    /// The note every creation starts from.
    pub fn blank() -> Self {
        Self {
            title: "Nouvelle note".to_string(),
            content: String::new(),
            last_updated_at: Utc::now(),
        }
    }
}

/// Replacement fields for an existing note, stamped at submit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFields {
    pub title: String,
    pub content: String,
    pub last_updated_at: DateTime<Utc>,
}

impl NoteFields {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            last_updated_at: Utc::now(),
        }
    }

    pub fn apply_to(&self, note: &mut Note) {
        note.title = self.title.clone();
        note.content = self.content.clone();
        note.last_updated_at = self.last_updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_backend_note() {
        let json = r#"{"id":3,"title":"Courses","content":"lait","lastUpdatedAt":"2024-01-15T10:00:00.000Z"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id, NoteId(3));
        assert_eq!(note.title, "Courses");
        assert_eq!(note.content, "lait");
        assert_eq!(note.last_updated_at.to_rfc3339(), "2024-01-15T10:00:00+00:00");
    }

    #[test]
    fn serializes_camel_case_keys() {
        let value = serde_json::to_value(NewNote::blank()).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("lastUpdatedAt"));
        assert!(!object.contains_key("last_updated_at"));
    }

    #[test]
    fn note_id_is_a_bare_number_on_the_wire() {
        let json = serde_json::to_string(&NoteId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn blank_note_defaults() {
        let note = NewNote::blank();
        assert_eq!(note.title, "Nouvelle note");
        assert!(note.content.is_empty());
    }

    #[test]
    fn apply_replaces_every_field() {
        let json = r#"{"id":1,"title":"A","content":"x","lastUpdatedAt":"2024-01-15T10:00:00Z"}"#;
        let mut note: Note = serde_json::from_str(json).unwrap();
        let fields = NoteFields::new("B", "y");
        fields.apply_to(&mut note);
        assert_eq!(note.title, "B");
        assert_eq!(note.content, "y");
        assert_eq!(note.last_updated_at, fields.last_updated_at);
        assert_eq!(note.id, NoteId(1));
    }
}
