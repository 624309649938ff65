use crate::clients::{Dispatcher, EditorClient, Navigator};
use crate::config::EditorConfig;
use crate::controller::{EditorContext, EditorController};
use crate::framework::ResourceActor;
use crate::model::{Post, Session};
use crate::store::{self, PostStoreClient, Sessions};
use std::sync::Arc;
use tracing::{error, info};

/// Runtime orchestrator for an editor backed by the in-process post store.
///
/// `EditorSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the store and the controller
/// - **Dependency Wiring**: handing the controller its [`EditorContext`]
///
/// # Example
///
/// ```ignore
/// let system = EditorSystem::new(session, config, dispatcher, navigator);
/// system.store_client.insert(post).await?;
/// system.editor.activate(post_id).await?;
/// // ...
/// system.shutdown().await?;
/// ```
pub struct EditorSystem {
    /// Client for the editor controller
    pub editor: EditorClient,

    /// Client for the post store, used to seed posts
    pub store_client: PostStoreClient,

    /// Task handles for the running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl EditorSystem {
    /// Creates the store and the controller and spawns both.
    ///
    /// `session` is the store's only known session, so the signed-in user can save their
    /// own posts and nobody else's.
    pub fn new(
        session: Session,
        config: EditorConfig,
        dispatcher: Arc<dyn Dispatcher>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::with_store(store::new(config.mailbox_size), session, config, dispatcher, navigator)
    }

    /// Same as [`new`](Self::new) with a caller-built store (for example one whose client
    /// adds latency).
    pub fn with_store(
        (store, store_client): (ResourceActor<Post>, PostStoreClient),
        session: Session,
        config: EditorConfig,
        dispatcher: Arc<dyn Dispatcher>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (controller, editor) = EditorController::new(config.mailbox_size);

        // Sessions are the store's run context: they exist before its first request.
        let sessions = Sessions::new().with(session.clone());
        let store_handle = tokio::spawn(store.run(sessions));

        let ctx = EditorContext {
            service: Arc::new(store_client.clone()),
            dispatcher,
            navigator,
            session,
            config,
        };
        let controller_handle = tokio::spawn(controller.run(ctx));

        Self {
            editor,
            store_client,
            handles: vec![controller_handle, store_handle],
        }
    }

    /// Gracefully shuts down the editor and the store.
    ///
    /// Dropping the editor client closes the controller's mailbox; the controller cancels
    /// its live requests and exits, which releases its store client, and the store exits
    /// once every store client is gone.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down editor system...");

        drop(self.editor);
        drop(self.store_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Task failed: {:?}", e);
                return Err(format!("Task failed: {:?}", e));
            }
        }

        info!("Editor system shutdown complete.");
        Ok(())
    }
}
