use crate::clients::{PostService, ServiceError};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Post, PostId, PostUpdate};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for interacting with the post store actor.
#[derive(Clone)]
pub struct PostStoreClient {
    inner: ResourceClient<Post>,
    latency: Option<Duration>,
}

/// Maps actor errors onto what a remote post service would answer for `id`.
fn map_error(id: &PostId, e: FrameworkError) -> ServiceError {
    match e {
        FrameworkError::NotFound(_) => ServiceError::NotFound(id.to_string()),
        // Updates are only ever rejected by the ownership check.
        FrameworkError::Custom(_) => ServiceError::Forbidden(id.to_string()),
        FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
            ServiceError::Transport(format!("Post store unavailable: {}", e))
        }
    }
}

impl PostStoreClient {
    pub fn new(inner: ResourceClient<Post>) -> Self {
        Self {
            inner,
            latency: None,
        }
    }

    /// Delays every fetch and update by `latency`, to behave like a remote service.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Adds or replaces a post.
    #[instrument(skip(self, post), fields(post_id = %post.id))]
    pub async fn insert(&self, post: Post) -> Result<(), ServiceError> {
        debug!("Sending request");
        let id = post.id.clone();
        self.inner
            .insert(post)
            .await
            .map(|_| ())
            .map_err(|e| map_error(&id, e))
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl PostService for PostStoreClient {
    async fn fetch_post(&self, id: &PostId) -> Result<Option<Post>, ServiceError> {
        self.simulate_latency().await;
        self.inner
            .get(id.clone())
            .await
            .map_err(|e| map_error(id, e))
    }

    async fn update_post(&self, id: &PostId, update: PostUpdate) -> Result<(), ServiceError> {
        self.simulate_latency().await;
        self.inner
            .update(id.clone(), update)
            .await
            .map(|_| ())
            .map_err(|e| map_error(id, e))
    }
}
