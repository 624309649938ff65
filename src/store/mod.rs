//! # Post Store
//!
//! An in-process stand-in for the remote post service, used by the demo binary and the
//! end-to-end tests.
//!
//! Posts live in a generic [`ResourceActor`] (see the [`ActorEntity`](crate::framework::ActorEntity)
//! impl in `entity.rs`); [`PostStoreClient`] wraps its client and implements
//! [`PostService`](crate::clients::PostService). The known [`Sessions`] are the actor's run
//! context, so they are in place before the first request is processed.
//!
//! ```rust
//! use post_editor::clients::PostService;
//! use post_editor::model::{Post, PostId, Session};
//! use post_editor::store::{self, Sessions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = store::new(8);
//!     tokio::spawn(actor.run(Sessions::new().with(Session::new("alice", "token-a"))));
//!
//!     client.insert(Post::new("1", "Hello", "World", "alice")).await.unwrap();
//!
//!     let post = client.fetch_post(&PostId::from("1")).await.unwrap();
//!     assert_eq!(post.unwrap().title, "Hello");
//! }
//! ```

mod client;
mod entity;

pub use client::*;

use crate::framework::ResourceActor;
use crate::model::{Credential, Post, Session};
use std::collections::HashMap;

/// Credential → username for every user the store will accept updates from.
#[derive(Debug, Clone, Default)]
pub struct Sessions {
    owners: HashMap<Credential, String>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `session`, replacing any user previously bound to the same credential.
    pub fn with(mut self, session: Session) -> Self {
        self.owners.insert(session.credential, session.username);
        self
    }

    pub fn owner_of(&self, credential: &Credential) -> Option<&str> {
        self.owners.get(credential).map(String::as_str)
    }
}

/// Creates a new post store actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Post>, PostStoreClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, PostStoreClient::new(generic_client))
}
