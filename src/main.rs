//! Scripted editing session against the in-process post store.
//!
//! Set `POST_EDITOR_CONFIG` to a TOML file to override the defaults.

use post_editor::clients::{LogDispatcher, LogNavigator};
use post_editor::config::EditorConfig;
use post_editor::lifecycle::{setup_tracing, EditorSystem};
use post_editor::machine::{EditorState, Field};
use post_editor::model::{Post, PostId, Session};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, Instrument};

async fn wait_for(
    states: &mut watch::Receiver<Option<EditorState>>,
    done: impl FnMut(&Option<EditorState>) -> bool,
) -> Result<EditorState, String> {
    let state = states.wait_for(done).await.map_err(|e| e.to_string())?;
    state.clone().ok_or_else(|| "editor is not active".to_string())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::var("POST_EDITOR_CONFIG") {
        Ok(path) => EditorConfig::load(path).map_err(|e| e.to_string())?,
        Err(_) => EditorConfig::default(),
    };

    let session = Session::new("alice", "alice-token");
    let (store, store_client) = post_editor::store::new(config.mailbox_size);
    let store_client = store_client.with_latency(Duration::from_millis(50));
    let system = EditorSystem::with_store(
        (store, store_client),
        session,
        config,
        Arc::new(LogDispatcher),
        Arc::new(LogNavigator),
    );

    system
        .store_client
        .insert(Post::new("1", "First post", "Hello world", "alice"))
        .await
        .map_err(|e| e.to_string())?;

    let editor = system.editor.clone();
    let mut states = editor.subscribe();

    let span = tracing::info_span!("editing_session", post_id = "1");
    let outcome: Result<(), String> = async {
        editor
            .activate(PostId::from("1"))
            .await
            .map_err(|e| e.to_string())?;
        let loaded = wait_for(&mut states, |s| s.as_ref().is_some_and(|s| !s.is_fetching)).await?;
        info!(title = %loaded.title.value, "Loaded");

        // An empty title is rejected on blur and blocks the submit.
        editor.input(Field::Title, "").await.map_err(|e| e.to_string())?;
        editor.blur(Field::Title, "").await.map_err(|e| e.to_string())?;
        editor.submit().await.map_err(|e| e.to_string())?;
        let rejected = editor
            .snapshot()
            .await
            .map_err(|e| e.to_string())?
            .ok_or("editor is not active")?;
        info!(
            message = %rejected.title.message,
            submit_count = rejected.submit_count,
            "Submit rejected"
        );

        editor
            .input(Field::Title, "First post, revised")
            .await
            .map_err(|e| e.to_string())?;
        editor.submit().await.map_err(|e| e.to_string())?;
        let saved = wait_for(&mut states, |s| {
            s.as_ref().is_some_and(|s| s.submit_count == 1 && !s.is_saving)
        })
        .await?;
        info!(title = %saved.title.value, "Saved");

        editor.deactivate().await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await;

    if let Err(e) = &outcome {
        error!(error = %e, "Editing session failed");
    }

    drop(editor);
    system.shutdown().await?;
    info!("Demo completed");
    outcome
}
