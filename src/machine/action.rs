//! Actions accepted by the [`EditorMachine`](super::EditorMachine).
//!
//! Each variant maps to exactly one row of the transition table in [`reduce`](super::reduce).

use super::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// The initial fetch returned the post.
    FetchComplete { title: String, body: String },
    /// The initial fetch returned nothing.
    NotFound,
    /// The initial fetch failed at the transport level.
    FetchFailed { message: String },
    /// The user typed into a field.
    FieldChange { field: Field, text: String },
    /// A field lost focus, or a submit is re-checking it.
    FieldValidate { field: Field, text: String },
    SubmitRequested,
    SaveStarted,
    SaveFinished,
    /// The update call failed.
    SaveFailed { message: String },
}

impl EditorAction {
    pub fn change(field: Field, text: impl Into<String>) -> Self {
        Self::FieldChange {
            field,
            text: text.into(),
        }
    }

    pub fn validate(field: Field, text: impl Into<String>) -> Self {
        Self::FieldValidate {
            field,
            text: text.into(),
        }
    }

    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            EditorAction::FetchComplete { .. } => "fetch_complete",
            EditorAction::NotFound => "not_found",
            EditorAction::FetchFailed { .. } => "fetch_failed",
            EditorAction::FieldChange { .. } => "field_change",
            EditorAction::FieldValidate { .. } => "field_validate",
            EditorAction::SubmitRequested => "submit_requested",
            EditorAction::SaveStarted => "save_started",
            EditorAction::SaveFinished => "save_finished",
            EditorAction::SaveFailed { .. } => "save_failed",
        }
    }
}
