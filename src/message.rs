use crate::api::ApiError;
use crate::core::note::{Note, NoteFields, NoteId};

#[derive(Debug, Clone)]
pub enum Message {
    // Note store
    NotesFetched(Result<Vec<Note>, ApiError>),
    CreateNote,
    NoteCreated(Result<Note, ApiError>),

    // Editing
    SelectNote(NoteId),
    SubmitEdit(NoteId, NoteFields),
    EditSaved(NoteId, NoteFields, Result<(), ApiError>),
    SaveBadgeExpired(u64),

    // Delete confirmation
    ConfirmDeleteNote(NoteId),
    CancelDeleteNote,
    DeleteNote,
    NoteDeleted(NoteId, Result<(), ApiError>),

    // Search filter
    SearchQueryChanged(String),

    // Pins
    TogglePinNote(NoteId),

    // Appearance
    ToggleDarkMode,

    // Errors
    DismissError,
}
