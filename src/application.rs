use std::time::Duration;

use thiserror::Error;

use crate::api::{ApiError, NotesApi};
use crate::config::CarnetConfig;
use crate::core::note::{NewNote, Note, NoteFields, NoteId};
use crate::message::Message;
use crate::task::Task;
use crate::view;

/// How long the save badge stays up after a successful edit.
pub const SAVE_BADGE_DURATION: Duration = Duration::from_secs(2);

/// Two-step delete: a note id waits here until the user confirms or cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteFlow {
    #[default]
    Idle,
    Pending(NoteId),
}

/// A remote operation that failed, kept until the user dismisses it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("chargement des notes impossible ({0})")]
    LoadFailed(ApiError),
    #[error("création de la note impossible ({0})")]
    CreateFailed(ApiError),
    #[error("enregistrement de la note impossible ({0})")]
    UpdateFailed(ApiError),
    #[error("suppression de la note impossible ({0})")]
    DeleteFailed(ApiError),
}

/// The whole client state. Every mutation happens in [`Carnet::update`],
/// one message at a time; the returned task carries the follow-up effects.
pub struct Carnet {
    api: NotesApi,
    config: CarnetConfig,

    notes: Vec<Note>,
    is_loading: bool,

    selected_note: Option<NoteId>,
    search_query: String,
    pinned_notes: Vec<NoteId>,
    delete_flow: DeleteFlow,

    dark_mode: bool,
    last_error: Option<StoreError>,

    // Save badge: each successful save bumps the sequence; an expiry only
    // clears the badge when it still carries the current value.
    save_badge: Option<u64>,
    save_badge_seq: u64,
}

impl Carnet {
    /// Build the initial state and the task that fetches the collection.
    pub fn new(config: CarnetConfig) -> Result<(Self, Task<Message>), ApiError> {
        let api = NotesApi::new(&config.server_url)?;

        let fetch = {
            let api = api.clone();
            Task::perform(async move { api.list_notes().await }, Message::NotesFetched)
        };

        let app = Self {
            api,
            dark_mode: config.dark_mode,
            config,
            notes: Vec::new(),
            is_loading: true,
            selected_note: None,
            search_query: String::new(),
            pinned_notes: Vec::new(),
            delete_flow: DeleteFlow::Idle,
            last_error: None,
            save_badge: None,
            save_badge_seq: 0,
        };

        Ok((app, fetch))
    }

    /// Apply one message and return the effects to run.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // --- Note store ---
            Message::NotesFetched(result) => {
                self.is_loading = false;
                match result {
                    Ok(notes) => {
                        log::info!("Fetched {} notes", notes.len());
                        self.notes = notes;
                    }
                    Err(e) => {
                        log::error!("Failed to fetch notes: {}", e);
                        self.last_error = Some(StoreError::LoadFailed(e));
                    }
                }
            }

            Message::CreateNote => {
                let api = self.api.clone();
                return Task::perform(
                    async move { api.create_note(&NewNote::blank()).await },
                    Message::NoteCreated,
                );
            }

            Message::NoteCreated(result) => match result {
                Ok(note) => {
                    self.notes.insert(0, note);
                }
                Err(e) => {
                    log::error!("Failed to create note: {}", e);
                    self.last_error = Some(StoreError::CreateFailed(e));
                }
            },

            // --- Editing ---
            Message::SelectNote(id) => {
                self.selected_note = Some(id);
            }

            Message::SubmitEdit(id, fields) => {
                // Persist first; the local collection only changes once the
                // backend accepted the fields.
                let api = self.api.clone();
                return Task::perform(
                    async move {
                        let result = api.update_note(id, &fields).await;
                        (id, fields, result)
                    },
                    |(id, fields, result)| Message::EditSaved(id, fields, result),
                );
            }

            Message::EditSaved(id, fields, result) => match result {
                Ok(()) => {
                    self.apply_edit(id, &fields);
                    return self.show_save_badge();
                }
                Err(e) => {
                    log::error!("Failed to save note {}: {}", id, e);
                    self.last_error = Some(StoreError::UpdateFailed(e));
                }
            },

            Message::SaveBadgeExpired(seq) => {
                if self.save_badge == Some(seq) {
                    self.save_badge = None;
                }
            }

            // --- Delete confirmation ---
            Message::ConfirmDeleteNote(id) => {
                self.delete_flow = DeleteFlow::Pending(id);
            }

            Message::CancelDeleteNote => {
                self.delete_flow = DeleteFlow::Idle;
            }

            Message::DeleteNote => {
                if let DeleteFlow::Pending(id) = self.delete_flow {
                    let api = self.api.clone();
                    return Task::perform(
                        async move { (id, api.delete_note(id).await) },
                        |(id, result)| Message::NoteDeleted(id, result),
                    );
                }
            }

            Message::NoteDeleted(id, result) => {
                self.delete_flow = DeleteFlow::Idle;
                match result {
                    Ok(()) => {
                        self.notes.retain(|n| n.id != id);
                    }
                    Err(e) => {
                        log::error!("Failed to delete note {}: {}", id, e);
                        self.last_error = Some(StoreError::DeleteFailed(e));
                    }
                }
            }

            // --- Search filter ---
            Message::SearchQueryChanged(query) => {
                self.search_query = query;
            }

            // --- Pins ---
            Message::TogglePinNote(id) => {
                if let Some(pos) = self.pinned_notes.iter().position(|p| *p == id) {
                    self.pinned_notes.remove(pos);
                } else {
                    self.pinned_notes.insert(0, id);
                }
            }

            // --- Appearance ---
            Message::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
            }

            // --- Errors ---
            Message::DismissError => {
                self.last_error = None;
            }
        }

        Task::none()
    }

    /// Replace the note's fields and move it to the front of the collection.
    fn apply_edit(&mut self, id: NoteId, fields: &NoteFields) {
        if let Some(pos) = self.notes.iter().position(|n| n.id == id) {
            let mut note = self.notes.remove(pos);
            fields.apply_to(&mut note);
            self.notes.insert(0, note);
        }
    }

    /// Show the badge and schedule its expiry. Each save bumps the sequence,
    /// so an expiry left in flight from an earlier save cannot hide a newer
    /// badge.
    fn show_save_badge(&mut self) -> Task<Message> {
        self.save_badge_seq += 1;
        let seq = self.save_badge_seq;
        self.save_badge = Some(seq);
        Task::perform(
            async move {
                tokio::time::sleep(SAVE_BADGE_DURATION).await;
                seq
            },
            Message::SaveBadgeExpired,
        )
    }

    /// Notes to display: filtered by the search query, pinned notes first.
    pub fn visible_notes(&self) -> Vec<&Note> {
        view::visible_notes(&self.notes, &self.search_query, &self.pinned_notes)
    }

    /// The note open in the editor, if it still exists.
    pub fn selected_note(&self) -> Option<&Note> {
        let id = self.selected_note?;
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether the delete confirmation dialog is up.
    pub fn is_dialog_open(&self) -> bool {
        matches!(self.delete_flow, DeleteFlow::Pending(_))
    }

    pub fn delete_flow(&self) -> DeleteFlow {
        self.delete_flow
    }

    pub fn save_badge_visible(&self) -> bool {
        self.save_badge.is_some()
    }

    pub fn is_pinned(&self, id: NoteId) -> bool {
        self.pinned_notes.contains(&id)
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn server_url(&self) -> &str {
        &self.config.server_url
    }
}
