//! Error types for the editor controller.

use crate::machine::UnknownField;
use thiserror::Error;

/// Errors surfaced to callers of [`EditorClient`](crate::clients::EditorClient).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditorError {
    /// The controller task has stopped and its mailbox is closed.
    #[error("Editor controller closed")]
    ControllerClosed,

    /// The controller dropped the response channel before answering.
    #[error("Editor controller dropped response channel")]
    ControllerDropped,

    #[error(transparent)]
    UnknownField(#[from] UnknownField),
}
