//! # Mock Collaborators & Testing Guide
//!
//! [`MockPostService`] implements [`PostService`] entirely in memory from a queue of
//! expectations. It lets tests script what the "server" answers, inject failures, and hold
//! a response back until the test releases it, which is how cancellation races are tested
//! deterministically.
//!
//! ## When to use Mocks vs the Post Store
//!
//! | Feature | MockPostService | Post store |
//! |---------|-----------------|-----------|
//! | **Determinism** | Full, responses can be gated | Subject to scheduler |
//! | **State** | None (expectations) | Real posts and sessions |
//! | **Error Injection** | Easy (`return_err`) | Only not-found / forbidden |
//! | **Use Case** | Controller races and error paths | End-to-end flows |
//!
//! ## Example
//!
//! ```rust
//! use post_editor::framework::mock::MockPostService;
//! use post_editor::clients::PostService;
//! use post_editor::model::{Post, PostId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockPostService::new();
//!     mock.expect_fetch("1").return_ok(Some(Post::new("1", "T", "B", "alice")));
//!
//!     let post = mock.fetch_post(&PostId::from("1")).await.unwrap();
//!     assert_eq!(post.unwrap().title, "T");
//!     mock.verify();
//! }
//! ```
//!
//! [`RecordingDispatcher`] and [`RecordingNavigator`] capture the controller's one-way
//! side effects so tests can assert on them.

use crate::clients::{Dispatcher, Navigator, PostService, ServiceError};
use crate::model::{Post, PostId, PostUpdate};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected call to the mock service and the answer to give.
enum Expectation {
    Fetch {
        id: PostId,
        response: Result<Option<Post>, ServiceError>,
        gate: Option<oneshot::Receiver<()>>,
    },
    Update {
        id: PostId,
        response: Result<(), ServiceError>,
        gate: Option<oneshot::Receiver<()>>,
    },
}

/// Holds a scripted response back until [`release`](Gate::release) is called.
///
/// Dropping the gate releases the response as well.
#[derive(Debug)]
pub struct Gate {
    sender: oneshot::Sender<()>,
}

impl Gate {
    fn new() -> (Self, oneshot::Receiver<()>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    pub fn release(self) {
        let _ = self.sender.send(());
    }
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    fetches: Vec<PostId>,
    updates: Vec<(PostId, PostUpdate)>,
    mismatches: Vec<String>,
}

/// A scripted [`PostService`].
///
/// Calls are matched against expectations in FIFO order. A call that does not match the
/// next expectation answers with a transport error and is reported by [`verify`](Self::verify).
#[derive(Clone, Default)]
pub struct MockPostService {
    state: Arc<Mutex<MockState>>,
}

impl MockPostService {
    /// Creates a new mock service with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `fetch_post` call.
    pub fn expect_fetch(&mut self, id: impl Into<PostId>) -> FetchExpectationBuilder {
        FetchExpectationBuilder {
            id: id.into(),
            state: self.state.clone(),
        }
    }

    /// Expects an `update_post` call.
    pub fn expect_update(&mut self, id: impl Into<PostId>) -> UpdateExpectationBuilder {
        UpdateExpectationBuilder {
            id: id.into(),
            state: self.state.clone(),
        }
    }

    /// Every fetched id so far, in call order.
    pub fn fetches(&self) -> Vec<PostId> {
        self.state.lock().unwrap().fetches.clone()
    }

    /// Every update payload received so far, in call order.
    pub fn updates(&self) -> Vec<(PostId, PostUpdate)> {
        self.state.lock().unwrap().updates.clone()
    }

    /// Verifies that all expectations were met and no unexpected call arrived.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.mismatches.is_empty() {
            panic!("Unexpected calls: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl PostService for MockPostService {
    async fn fetch_post(&self, id: &PostId) -> Result<Option<Post>, ServiceError> {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.fetches.push(id.clone());
            match state.expectations.pop_front() {
                Some(Expectation::Fetch {
                    id: expected,
                    response,
                    gate,
                }) if &expected == id => Ok((response, gate)),
                other => {
                    let message = format!("fetch_post({})", id);
                    state.mismatches.push(message.clone());
                    if let Some(other) = other {
                        state.expectations.push_front(other);
                    }
                    Err(ServiceError::Transport(message))
                }
            }
        };

        let (response, gate) = next?;
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        response
    }

    async fn update_post(&self, id: &PostId, update: PostUpdate) -> Result<(), ServiceError> {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.updates.push((id.clone(), update));
            match state.expectations.pop_front() {
                Some(Expectation::Update {
                    id: expected,
                    response,
                    gate,
                }) if &expected == id => Ok((response, gate)),
                other => {
                    let message = format!("update_post({})", id);
                    state.mismatches.push(message.clone());
                    if let Some(other) = other {
                        state.expectations.push_front(other);
                    }
                    Err(ServiceError::Transport(message))
                }
            }
        };

        let (response, gate) = next?;
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        response
    }
}

/// Builder for `fetch_post` expectations.
pub struct FetchExpectationBuilder {
    id: PostId,
    state: Arc<Mutex<MockState>>,
}

impl FetchExpectationBuilder {
    fn push(self, response: Result<Option<Post>, ServiceError>, gate: Option<oneshot::Receiver<()>>) {
        self.state
            .lock()
            .unwrap()
            .expectations
            .push_back(Expectation::Fetch {
                id: self.id,
                response,
                gate,
            });
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<Post>) {
        self.push(Ok(value), None);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error), None);
    }

    /// Returns `value` only once the returned [`Gate`] is released.
    pub fn return_ok_after(self, value: Option<Post>) -> Gate {
        let (gate, receiver) = Gate::new();
        self.push(Ok(value), Some(receiver));
        gate
    }
}

/// Builder for `update_post` expectations.
pub struct UpdateExpectationBuilder {
    id: PostId,
    state: Arc<Mutex<MockState>>,
}

impl UpdateExpectationBuilder {
    fn push(self, response: Result<(), ServiceError>, gate: Option<oneshot::Receiver<()>>) {
        self.state
            .lock()
            .unwrap()
            .expectations
            .push_back(Expectation::Update {
                id: self.id,
                response,
                gate,
            });
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self) {
        self.push(Ok(()), None);
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error), None);
    }

    /// Acknowledges the update only once the returned [`Gate`] is released.
    pub fn return_ok_after(self) -> Gate {
        let (gate, receiver) = Gate::new();
        self.push(Ok(()), Some(receiver));
        gate
    }
}

// =============================================================================
// RECORDING SIDE EFFECTS
// =============================================================================

/// Dispatcher that keeps every flash message.
#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Dispatcher for RecordingDispatcher {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Navigator that keeps every redirect target.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    paths: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}
