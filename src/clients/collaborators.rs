//! # Collaborator Contracts
//!
//! The editor never talks to the network, the router or the notification area directly.
//! The host injects implementations of these traits through
//! [`EditorContext`](crate::controller::EditorContext).

use crate::model::{Post, PostId, PostUpdate};
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a [`PostService`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// No post exists with the given id.
    #[error("Post not found: {0}")]
    NotFound(String),

    /// The credential does not belong to the post's author.
    #[error("Not allowed to edit post: {0}")]
    Forbidden(String),

    /// The call never produced a usable response.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Remote storage for posts.
#[async_trait]
pub trait PostService: Send + Sync + 'static {
    /// Fetch a post by id. `Ok(None)` means the post does not exist.
    async fn fetch_post(&self, id: &PostId) -> Result<Option<Post>, ServiceError>;

    /// Save new title and body for a post.
    async fn update_post(&self, id: &PostId, update: PostUpdate) -> Result<(), ServiceError>;
}

/// Global one-way notification area ("flash messages").
pub trait Dispatcher: Send + Sync + 'static {
    fn notify(&self, message: &str);
}

/// Moves the host away from the editor.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, path: &str);
}

/// Dispatcher that only writes flash messages to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDispatcher;

impl Dispatcher for LogDispatcher {
    fn notify(&self, message: &str) {
        tracing::info!(message, "Flash message");
    }
}

/// Navigator that only records the redirect in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(path, "Navigate");
    }
}
