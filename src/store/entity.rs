//! Entity trait implementation for [`Post`], so posts can live in a
//! [`ResourceActor`](crate::framework::ResourceActor).

use super::Sessions;
use crate::framework::ActorEntity;
use crate::model::{Post, PostId, PostUpdate};
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Post {
    type Id = PostId;
    type UpdateParams = PostUpdate;
    type Context = Sessions;

    fn id(&self) -> PostId {
        self.id.clone()
    }

    /// Applies an edit if the credential belongs to the post's author.
    ///
    /// # Fields Updated
    /// - `title`
    /// - `body`
    async fn on_update(&mut self, update: PostUpdate, sessions: &Sessions) -> Result<(), String> {
        match sessions.owner_of(&update.credential) {
            Some(owner) if owner == self.author.username => {
                self.title = update.title;
                self.body = update.body;
                Ok(())
            }
            Some(owner) => Err(format!("{} does not own post {}", owner, self.id)),
            None => Err(format!("unknown credential for post {}", self.id)),
        }
    }
}
