//! # Editor Client
//!
//! Provides the host-facing API of an [`EditorController`](crate::controller::EditorController).
//! The view forwards page events through it and renders from the state it publishes.
use crate::controller::{EditorError, EditorRequest};
use crate::machine::{EditorState, Field};
use crate::model::PostId;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// A type-safe client for interacting with an `EditorController`.
///
/// Cheap to clone: it holds only the mailbox sender and a state receiver. The controller
/// stops once every clone has been dropped.
#[derive(Clone)]
pub struct EditorClient {
    sender: mpsc::Sender<EditorRequest>,
    states: watch::Receiver<Option<EditorState>>,
}

impl EditorClient {
    pub fn new(
        sender: mpsc::Sender<EditorRequest>,
        states: watch::Receiver<Option<EditorState>>,
    ) -> Self {
        Self { sender, states }
    }

    async fn send(&self, request: EditorRequest) -> Result<(), EditorError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| EditorError::ControllerClosed)
    }

    /// Mounts the editor for `post_id`, replacing any previous activation.
    #[instrument(skip(self))]
    pub async fn activate(&self, post_id: PostId) -> Result<(), EditorError> {
        debug!("Sending request");
        self.send(EditorRequest::Activate { post_id }).await
    }

    /// Unmounts the editor, cancelling every outstanding call.
    #[instrument(skip(self))]
    pub async fn deactivate(&self) -> Result<(), EditorError> {
        debug!("Sending request");
        self.send(EditorRequest::Deactivate).await
    }

    /// The user typed `text` into `field`.
    pub async fn input(&self, field: Field, text: impl Into<String>) -> Result<(), EditorError> {
        self.send(EditorRequest::Input {
            field,
            text: text.into(),
        })
        .await
    }

    /// `field` lost focus while holding `text`.
    pub async fn blur(&self, field: Field, text: impl Into<String>) -> Result<(), EditorError> {
        self.send(EditorRequest::Blur {
            field,
            text: text.into(),
        })
        .await
    }

    /// Same as [`input`](Self::input), addressing the field by its form name.
    pub async fn input_named(&self, name: &str, text: impl Into<String>) -> Result<(), EditorError> {
        let field: Field = name.parse()?;
        self.input(field, text).await
    }

    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<(), EditorError> {
        debug!("Sending request");
        self.send(EditorRequest::Submit).await
    }

    /// Current state, or `None` when the editor is not active.
    ///
    /// Answered in mailbox order, so it reflects every request sent before it.
    pub async fn snapshot(&self) -> Result<Option<EditorState>, EditorError> {
        let (respond_to, response) = oneshot::channel();
        self.send(EditorRequest::Snapshot { respond_to }).await?;
        response.await.map_err(|_| EditorError::ControllerDropped)
    }

    /// Receiver that sees every published state change.
    pub fn subscribe(&self) -> watch::Receiver<Option<EditorState>> {
        self.states.clone()
    }
}
