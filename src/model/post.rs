use serde::{Deserialize, Serialize};
use std::fmt;

use super::Credential;

/// Identifier of a post, as it appears in the editor's route (`/post/{id}/edit`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The owner of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
}

/// A post as returned by the post service.
///
/// The editor only ever reads `title`, `body` and `author.username`; the id is carried so a
/// store can serve several posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub author: Author,
}

impl Post {
    /// Creates a new Post instance.
    ///
    /// # Arguments
    /// * `id` - Route identifier of the post
    /// * `title` - Post title
    /// * `body` - Post body content
    /// * `author` - Username of the owner
    pub fn new(
        id: impl Into<PostId>,
        title: impl Into<String>,
        body: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            author: Author {
                username: author.into(),
            },
        }
    }
}

/// Payload sent to the post service when saving an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostUpdate {
    pub title: String,
    pub body: String,
    pub credential: Credential,
}
