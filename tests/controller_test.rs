use post_editor::clients::{EditorClient, ServiceError};
use post_editor::config::EditorConfig;
use post_editor::controller::{EditorContext, EditorController, EditorError};
use post_editor::framework::mock::{MockPostService, RecordingDispatcher, RecordingNavigator};
use post_editor::machine::{EditorState, Field, UnknownField};
use post_editor::model::{Post, PostId, Session};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Real controller wired to scripted collaborators.
///
/// Pattern 2: Actor + Mocks
/// - Real EditorController (tests the transitions and side effects it drives)
/// - Mocked post service, dispatcher and navigator (isolates the network and the host)
struct Harness {
    editor: EditorClient,
    service: MockPostService,
    dispatcher: RecordingDispatcher,
    navigator: RecordingNavigator,
    handle: JoinHandle<()>,
}

impl Harness {
    fn start(service: MockPostService) -> Self {
        Self::start_with(service, EditorConfig::default())
    }

    fn start_with(service: MockPostService, config: EditorConfig) -> Self {
        let dispatcher = RecordingDispatcher::new();
        let navigator = RecordingNavigator::new();
        let (controller, editor) = EditorController::new(config.mailbox_size);
        let ctx = EditorContext {
            service: Arc::new(service.clone()),
            dispatcher: Arc::new(dispatcher.clone()),
            navigator: Arc::new(navigator.clone()),
            session: Session::new("alice", "alice-token"),
            config,
        };
        let handle = tokio::spawn(controller.run(ctx));
        Self {
            editor,
            service,
            dispatcher,
            navigator,
            handle,
        }
    }

    async fn wait_until(&self, done: impl Fn(&EditorState) -> bool) -> EditorState {
        let mut states = self.editor.subscribe();
        let state = tokio::time::timeout(
            Duration::from_secs(5),
            states.wait_for(|s| s.as_ref().is_some_and(|s| done(s))),
        )
        .await
        .expect("timed out waiting for editor state")
        .expect("controller stopped");
        state.clone().expect("editor not active")
    }

    /// Waits until the mock service has seen the calls `done` looks for.
    async fn until_service(&self, done: impl Fn(&MockPostService) -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !done(&self.service) {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("timed out waiting for service call");
    }

    async fn loaded(&self) -> EditorState {
        self.wait_until(|s| !s.is_fetching).await
    }

    async fn snapshot(&self) -> Option<EditorState> {
        self.editor.snapshot().await.unwrap()
    }

    async fn stop(self) {
        drop(self.editor);
        self.handle.await.unwrap();
        self.service.verify();
    }
}

fn alice_post(id: &str) -> Post {
    Post::new(id, "Original title", "Original body", "alice")
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(30)).await;
}

#[tokio::test]
async fn test_load_edit_and_save() {
    let mut service = MockPostService::new();
    service.expect_fetch("1").return_ok(Some(alice_post("1")));
    service.expect_update("1").return_ok();
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("1")).await.unwrap();
    let state = harness.loaded().await;
    assert_eq!(state.title.value, "Original title");
    assert_eq!(state.body.value, "Original body");
    assert!(!state.not_found);

    harness.editor.input(Field::Title, "New title").await.unwrap();
    harness.editor.submit().await.unwrap();
    let state = harness
        .wait_until(|s| s.submit_count == 1 && !s.is_saving)
        .await;
    assert!(state.save_error.is_none());

    let updates = harness.service.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, PostId::from("1"));
    assert_eq!(updates[0].1.title, "New title");
    assert_eq!(updates[0].1.body, "Original body");
    assert_eq!(updates[0].1.credential.expose(), "alice-token");

    assert_eq!(harness.dispatcher.messages(), vec!["Post was updated!"]);
    assert!(harness.navigator.paths().is_empty());
    harness.stop().await;
}

#[tokio::test]
async fn test_blur_validation_sets_field_error() {
    let mut service = MockPostService::new();
    service.expect_fetch("1").return_ok(Some(alice_post("1")));
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("1")).await.unwrap();
    harness.loaded().await;

    harness.editor.input(Field::Body, "   ").await.unwrap();
    harness.editor.blur(Field::Body, "   ").await.unwrap();
    let state = harness.snapshot().await.unwrap();
    assert!(state.body.has_error);
    assert_eq!(state.body.message, "You must provide body content");
    assert!(!state.title.has_error);

    harness.editor.input(Field::Body, "fixed").await.unwrap();
    let state = harness.snapshot().await.unwrap();
    assert!(!state.body.has_error);
    harness.stop().await;
}

#[tokio::test]
async fn test_invalid_submit_does_not_save() {
    let mut service = MockPostService::new();
    service.expect_fetch("1").return_ok(Some(alice_post("1")));
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("1")).await.unwrap();
    harness.loaded().await;

    // No blur: the submit itself re-validates both fields.
    harness.editor.input(Field::Title, "").await.unwrap();
    harness.editor.submit().await.unwrap();

    let state = harness.snapshot().await.unwrap();
    assert_eq!(state.submit_count, 0);
    assert!(!state.is_saving);
    assert!(state.title.has_error);
    assert_eq!(state.title.message, "You must provide a title");
    assert!(harness.service.updates().is_empty());
    harness.stop().await;
}

#[tokio::test]
async fn test_missing_post_shows_not_found_and_ignores_edits() {
    let mut service = MockPostService::new();
    service.expect_fetch("404").return_ok(None);
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("404")).await.unwrap();
    let state = harness.wait_until(|s| s.not_found).await;
    assert!(!state.is_fetching);

    harness.editor.input(Field::Title, "typed").await.unwrap();
    harness.editor.submit().await.unwrap();
    let after = harness.snapshot().await.unwrap();
    assert_eq!(after, state);
    assert!(harness.dispatcher.messages().is_empty());
    harness.stop().await;
}

#[tokio::test]
async fn test_foreign_post_redirects_with_message() {
    let mut service = MockPostService::new();
    service
        .expect_fetch("9")
        .return_ok(Some(Post::new("9", "Bob's", "Not yours", "bob")));
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("9")).await.unwrap();
    let state = harness.loaded().await;
    assert_eq!(state.title.value, "Bob's");

    assert_eq!(
        harness.dispatcher.messages(),
        vec!["You do not have permission to edit this post."]
    );
    assert_eq!(harness.navigator.paths(), vec!["/"]);

    // No update expectation: a submit here would be reported by verify().
    harness.editor.submit().await.unwrap();
    assert_eq!(harness.snapshot().await.unwrap().submit_count, 0);
    harness.stop().await;
}

#[tokio::test]
async fn test_cancelled_fetch_applies_nothing() {
    let mut service = MockPostService::new();
    let gate = service.expect_fetch("1").return_ok_after(Some(alice_post("1")));
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("1")).await.unwrap();
    let state = harness.wait_until(|s| s.is_fetching).await;
    assert!(state.title.value.is_empty());
    harness.until_service(|s| s.fetches().len() == 1).await;

    harness.editor.deactivate().await.unwrap();
    gate.release();
    settle().await;

    assert!(harness.snapshot().await.is_none());
    assert!(harness.dispatcher.messages().is_empty());
    harness.stop().await;
}

#[tokio::test]
async fn test_superseded_activation_discards_stale_fetch() {
    let mut service = MockPostService::new();
    let gate = service
        .expect_fetch("1")
        .return_ok_after(Some(Post::new("1", "Stale", "Stale", "alice")));
    service
        .expect_fetch("2")
        .return_ok(Some(Post::new("2", "Fresh", "Fresh body", "alice")));
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("1")).await.unwrap();
    harness.until_service(|s| s.fetches().len() == 1).await;
    harness.editor.activate(PostId::from("2")).await.unwrap();
    let state = harness.loaded().await;
    assert_eq!(state.resource_id, PostId::from("2"));
    assert_eq!(state.title.value, "Fresh");

    gate.release();
    settle().await;

    let state = harness.snapshot().await.unwrap();
    assert_eq!(state.resource_id, PostId::from("2"));
    assert_eq!(state.title.value, "Fresh");
    harness.stop().await;
}

#[tokio::test]
async fn test_reactivating_same_post_ignores_first_fetch() {
    let mut service = MockPostService::new();
    let stale = service
        .expect_fetch("1")
        .return_ok_after(Some(Post::new("1", "Stale", "Stale body", "alice")));
    let fresh = service
        .expect_fetch("1")
        .return_ok_after(Some(Post::new("1", "Fresh", "Fresh body", "alice")));
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("1")).await.unwrap();
    harness.until_service(|s| s.fetches().len() == 1).await;
    harness.editor.activate(PostId::from("1")).await.unwrap();
    harness.until_service(|s| s.fetches().len() == 2).await;

    // The first fetch resolves after it was cancelled: no transition may be applied.
    stale.release();
    settle().await;
    let state = harness.snapshot().await.unwrap();
    assert!(state.is_fetching);
    assert!(state.title.value.is_empty());
    assert!(state.body.value.is_empty());

    fresh.release();
    let state = harness.loaded().await;
    assert_eq!(state.title.value, "Fresh");
    assert_eq!(state.body.value, "Fresh body");
    assert!(harness.dispatcher.messages().is_empty());
    harness.stop().await;
}

#[tokio::test]
async fn test_deactivate_during_save_suppresses_completion() {
    let mut service = MockPostService::new();
    service.expect_fetch("1").return_ok(Some(alice_post("1")));
    let gate = service.expect_update("1").return_ok_after();
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("1")).await.unwrap();
    harness.loaded().await;
    harness.editor.submit().await.unwrap();
    harness.wait_until(|s| s.is_saving).await;
    harness.until_service(|s| s.updates().len() == 1).await;

    harness.editor.deactivate().await.unwrap();
    gate.release();
    settle().await;

    assert!(harness.snapshot().await.is_none());
    assert!(harness.dispatcher.messages().is_empty());
    assert_eq!(harness.service.updates().len(), 1);
    harness.stop().await;
}

#[tokio::test]
async fn test_submit_during_save_is_deferred_until_it_finishes() {
    let mut service = MockPostService::new();
    service.expect_fetch("1").return_ok(Some(alice_post("1")));
    let first = service.expect_update("1").return_ok_after();
    service.expect_update("1").return_ok();
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("1")).await.unwrap();
    harness.loaded().await;

    harness.editor.submit().await.unwrap();
    harness.wait_until(|s| s.is_saving).await;
    harness.until_service(|s| s.updates().len() == 1).await;

    harness.editor.input(Field::Title, "Second").await.unwrap();
    harness.editor.submit().await.unwrap();
    let state = harness.snapshot().await.unwrap();
    assert_eq!(state.submit_count, 2);
    assert!(state.is_saving);
    assert_eq!(harness.service.updates().len(), 1);

    first.release();
    harness
        .wait_until(|s| s.submit_count == 2 && !s.is_saving)
        .await;

    let updates = harness.service.updates();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].1.title, "Original title");
    assert_eq!(updates[1].1.title, "Second");
    assert_eq!(
        harness.dispatcher.messages(),
        vec!["Post was updated!", "Post was updated!"]
    );
    harness.stop().await;
}

#[tokio::test]
async fn test_fetch_failure_is_surfaced() {
    let mut service = MockPostService::new();
    service
        .expect_fetch("1")
        .return_err(ServiceError::Transport("connection reset".into()));
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("1")).await.unwrap();
    let state = harness.loaded().await;
    assert_eq!(
        state.fetch_error.as_deref(),
        Some("There was a problem loading the post.")
    );
    assert_eq!(
        harness.dispatcher.messages(),
        vec!["There was a problem loading the post."]
    );

    harness.editor.submit().await.unwrap();
    assert_eq!(harness.snapshot().await.unwrap().submit_count, 0);
    harness.stop().await;
}

#[tokio::test]
async fn test_save_failure_is_surfaced_and_retry_clears_it() {
    let mut service = MockPostService::new();
    service.expect_fetch("1").return_ok(Some(alice_post("1")));
    service
        .expect_update("1")
        .return_err(ServiceError::Forbidden("1".into()));
    service.expect_update("1").return_ok();
    let harness = Harness::start(service);

    harness.editor.activate(PostId::from("1")).await.unwrap();
    harness.loaded().await;

    harness.editor.submit().await.unwrap();
    let state = harness
        .wait_until(|s| s.submit_count == 1 && !s.is_saving)
        .await;
    assert_eq!(
        state.save_error.as_deref(),
        Some("There was a problem saving the post.")
    );

    harness.editor.submit().await.unwrap();
    let state = harness
        .wait_until(|s| s.submit_count == 2 && !s.is_saving)
        .await;
    assert!(state.save_error.is_none());
    assert_eq!(
        harness.dispatcher.messages(),
        vec!["There was a problem saving the post.", "Post was updated!"]
    );
    harness.stop().await;
}

#[tokio::test]
async fn test_configured_messages_and_redirect() {
    let config = EditorConfig::from_toml_str(
        r#"
        redirect_path = "/home"

        [messages]
        permission_denied = "Hands off."
        "#,
    )
    .unwrap();
    let mut service = MockPostService::new();
    service
        .expect_fetch("9")
        .return_ok(Some(Post::new("9", "T", "B", "bob")));
    let harness = Harness::start_with(service, config);

    harness.editor.activate(PostId::from("9")).await.unwrap();
    harness.loaded().await;
    assert_eq!(harness.dispatcher.messages(), vec!["Hands off."]);
    assert_eq!(harness.navigator.paths(), vec!["/home"]);
    harness.stop().await;
}

#[tokio::test]
async fn test_unknown_field_name_is_rejected() {
    let harness = Harness::start(MockPostService::new());
    let result = harness.editor.input_named("author", "x").await;
    assert_eq!(
        result,
        Err(EditorError::UnknownField(UnknownField("author".into())))
    );
    harness.stop().await;
}

#[tokio::test]
async fn test_client_reports_closed_controller() {
    let (controller, editor) = EditorController::new(4);
    drop(controller);
    assert_eq!(editor.submit().await, Err(EditorError::ControllerClosed));
}
