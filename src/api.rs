use reqwest::Client;
use thiserror::Error;

use crate::core::note::{NewNote, Note, NoteFields, NoteId};

/// Failure of a single REST call. Cloneable so completions can travel
/// inside messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Body(String),
}

/// REST client for the notes backend.
#[derive(Debug, Clone)]
pub struct NotesApi {
    base_url: String,
    http: Client,
}

impl NotesApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: NoteId) -> String {
        format!("{}/notes/{}", self.base_url, id)
    }

    /// GET the whole collection.
    pub async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let resp = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("GET /notes failed: {}", e)))?;

        resp.json()
            .await
            .map_err(|e| ApiError::Body(e.to_string()))
    }

    /// POST a new note, returning the stored note with its server-assigned id.
    pub async fn create_note(&self, note: &NewNote) -> Result<Note, ApiError> {
        let resp = self
            .http
            .post(self.collection_url())
            .json(note)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("POST /notes failed: {}", e)))?;

        resp.json()
            .await
            .map_err(|e| ApiError::Body(e.to_string()))
    }

    /// PUT replacement fields for a note. The response body is not
    /// inspected; the caller applies the submitted fields locally.
    pub async fn update_note(&self, id: NoteId, fields: &NoteFields) -> Result<(), ApiError> {
        self.http
            .put(self.note_url(id))
            .json(fields)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("PUT /notes/{} failed: {}", id, e)))?;

        Ok(())
    }

    /// DELETE a note. The status code is not checked; any response counts
    /// as success.
    pub async fn delete_note(&self, id: NoteId) -> Result<(), ApiError> {
        self.http
            .delete(self.note_url(id))
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("DELETE /notes/{} failed: {}", id, e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let api = NotesApi::new("http://localhost:4000/").unwrap();
        assert_eq!(api.collection_url(), "http://localhost:4000/notes");
    }

    #[test]
    fn note_url_includes_the_id() {
        let api = NotesApi::new("http://localhost:4000").unwrap();
        assert_eq!(api.note_url(NoteId(7)), "http://localhost:4000/notes/7");
    }
}
