//! # Editor Controller
//!
//! The controller binds an [`EditorMachine`] to the page lifecycle. It is an actor: one
//! Tokio task that owns the machine and processes its mailbox sequentially, so transitions
//! are never applied concurrently and no locks guard the state.
//!
//! ## Responsibilities
//!
//! - **Activation**: start a fresh machine for a post id and fetch the post.
//! - **Ownership check**: after `FetchComplete`, compare the author with the session user;
//!   on mismatch flash a message and navigate away. This is a post-transition hook, the
//!   machine itself knows nothing about permissions.
//! - **Field events**: input → `FieldChange`, blur → `FieldValidate`.
//! - **Submit**: validate both fields with their current values, then `SubmitRequested`.
//! - **Saves**: when `submit_count` rises above the last value acted on, start a save.
//!   At most one save is in flight; rises observed meanwhile are coalesced into one
//!   follow-up save once the running one resolves.
//! - **Teardown**: deactivation, re-activation and shutdown cancel every live
//!   [`RequestHandle`]. Completions from a cancelled or superseded handle are discarded.
//!
//! ## Call tasks
//!
//! Network calls never run on the controller task. Each one is spawned with a
//! [`CancelToken`](crate::framework::CancelToken) and reports back through an internal
//! completion channel, tagged with its handle id.

pub mod error;
pub mod message;

pub use error::*;
pub use message::{EditorRequest, Response};

use crate::clients::{Dispatcher, EditorClient, Navigator, PostService};
use crate::config::EditorConfig;
use crate::framework::RequestHandle;
use crate::machine::{EditorAction, EditorMachine, EditorState, Field};
use crate::model::{Post, PostId, PostUpdate, Session};
use message::Completion;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, info_span, warn, Instrument};

/// Dependencies injected into [`EditorController::run`].
#[derive(Clone)]
pub struct EditorContext {
    pub service: Arc<dyn PostService>,
    pub dispatcher: Arc<dyn Dispatcher>,
    pub navigator: Arc<dyn Navigator>,
    pub session: Session,
    pub config: EditorConfig,
}

/// The actor that drives one editor instance.
pub struct EditorController {
    receiver: mpsc::Receiver<EditorRequest>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions: mpsc::UnboundedReceiver<Completion>,
    publisher: watch::Sender<Option<EditorState>>,
    machine: Option<EditorMachine>,
    fetch: Option<RequestHandle>,
    save: Option<RequestHandle>,
    /// Highest `submit_count` a save has been started for.
    last_saved_count: u64,
    /// Set once the ownership check redirected the user away.
    redirected: bool,
    next_handle_id: u64,
}

impl EditorController {
    /// Creates a new `EditorController` and its associated [`EditorClient`].
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the request mailbox. If it is full, client calls
    ///   wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, EditorClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (completions_tx, completions) = mpsc::unbounded_channel();
        let (publisher, states) = watch::channel(None);
        let controller = Self {
            receiver,
            completions_tx,
            completions,
            publisher,
            machine: None,
            fetch: None,
            save: None,
            last_saved_count: 0,
            redirected: false,
            next_handle_id: 1,
        };
        let client = EditorClient::new(sender, states);
        (controller, client)
    }

    /// Runs the controller's event loop until every client is dropped.
    pub async fn run(mut self, ctx: EditorContext) {
        info!(user = %ctx.session.username, "Editor controller started");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request, &ctx),
                    None => break,
                },
                Some(completion) = self.completions.recv() => {
                    self.handle_completion(completion, &ctx);
                }
            }
            self.publish();
        }

        self.cancel_all();
        self.machine = None;
        self.publish();
        info!("Editor controller shutdown");
    }

    fn handle_request(&mut self, request: EditorRequest, ctx: &EditorContext) {
        match request {
            EditorRequest::Activate { post_id } => self.activate(post_id, ctx),
            EditorRequest::Deactivate => self.deactivate(),
            EditorRequest::Input { field, text } => {
                self.edit(EditorAction::FieldChange { field, text });
            }
            EditorRequest::Blur { field, text } => {
                self.edit(EditorAction::FieldValidate { field, text });
            }
            EditorRequest::Submit => self.submit(ctx),
            EditorRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.machine.as_ref().map(|m| m.state().clone()));
            }
        }
    }

    fn activate(&mut self, post_id: PostId, ctx: &EditorContext) {
        self.cancel_all();
        info!(%post_id, "Activate");

        self.machine = Some(EditorMachine::new(post_id.clone()));
        self.last_saved_count = 0;
        self.redirected = false;

        let handle = self.next_handle();
        let handle_id = handle.id();
        let token = handle.token();
        let service = Arc::clone(&ctx.service);
        let completions = self.completions_tx.clone();
        let span = info_span!("fetch_post", %post_id, handle_id);
        tokio::spawn(
            async move {
                debug!("Sending request");
                let outcome = token.run(service.fetch_post(&post_id)).await;
                let _ = completions.send(Completion::Fetch { handle_id, outcome });
            }
            .instrument(span),
        );
        self.fetch = Some(handle);
    }

    fn deactivate(&mut self) {
        if let Some(machine) = self.machine.take() {
            info!(post_id = %machine.state().resource_id, "Deactivate");
        }
        self.cancel_all();
    }

    /// Machine that may currently receive user edits, if any.
    fn editable_machine(&mut self) -> Option<&mut EditorMachine> {
        if self.redirected {
            debug!("Ignored: permission denied");
            return None;
        }
        match self.machine.as_mut() {
            Some(machine) if machine.state().is_editable() => Some(machine),
            Some(machine) => {
                let state = machine.state();
                debug!(
                    is_fetching = state.is_fetching,
                    not_found = state.not_found,
                    "Ignored: editor not editable"
                );
                None
            }
            None => {
                debug!("Ignored: editor not active");
                None
            }
        }
    }

    fn edit(&mut self, action: EditorAction) {
        if let Some(machine) = self.editable_machine() {
            machine.apply(action);
        }
    }

    fn submit(&mut self, ctx: &EditorContext) {
        let Some(machine) = self.editable_machine() else {
            return;
        };
        let title = machine.state().title.value.clone();
        let body = machine.state().body.value.clone();
        machine.apply(EditorAction::validate(Field::Title, title));
        machine.apply(EditorAction::validate(Field::Body, body));
        let state = machine.apply(EditorAction::SubmitRequested);
        debug!(submit_count = state.submit_count, "Submit");
        self.start_pending_save(ctx);
    }

    /// Starts a save if `submit_count` rose past the last one acted on and none is running.
    fn start_pending_save(&mut self, ctx: &EditorContext) {
        if self.save.is_some() {
            debug!("Save in flight, deferring");
            return;
        }
        if self.redirected {
            return;
        }
        let Some(machine) = self.machine.as_mut() else {
            return;
        };
        let state = machine.state();
        if state.submit_count <= self.last_saved_count || !state.is_editable() {
            return;
        }

        self.last_saved_count = state.submit_count;
        let post_id = state.resource_id.clone();
        let update = PostUpdate {
            title: state.title.value.clone(),
            body: state.body.value.clone(),
            credential: ctx.session.credential.clone(),
        };
        machine.apply(EditorAction::SaveStarted);

        let handle = self.next_handle();
        let handle_id = handle.id();
        let token = handle.token();
        let service = Arc::clone(&ctx.service);
        let completions = self.completions_tx.clone();
        let span = info_span!("update_post", %post_id, handle_id);
        tokio::spawn(
            async move {
                debug!(?update, "Sending request");
                let outcome = token.run(service.update_post(&post_id, update)).await;
                let _ = completions.send(Completion::Save { handle_id, outcome });
            }
            .instrument(span),
        );
        self.save = Some(handle);
    }

    fn handle_completion(&mut self, completion: Completion, ctx: &EditorContext) {
        match completion {
            Completion::Fetch { handle_id, outcome } => {
                if !self.fetch.as_ref().is_some_and(|h| h.accepts(handle_id)) {
                    debug!(handle_id, "Discarded stale fetch result");
                    return;
                }
                self.fetch = None;
                let Some(machine) = self.machine.as_mut() else {
                    return;
                };

                match outcome {
                    Ok(Ok(Some(post))) => {
                        let Post {
                            title, body, author, ..
                        } = post;
                        machine.apply(EditorAction::FetchComplete { title, body });
                        if author.username != ctx.session.username {
                            warn!(
                                author = %author.username,
                                user = %ctx.session.username,
                                "Permission denied"
                            );
                            self.redirected = true;
                            ctx.dispatcher.notify(&ctx.config.messages.permission_denied);
                            ctx.navigator.navigate(&ctx.config.redirect_path);
                        } else {
                            info!(post_id = %machine.state().resource_id, "Post loaded");
                        }
                    }
                    Ok(Ok(None)) => {
                        info!(post_id = %machine.state().resource_id, "Post not found");
                        machine.apply(EditorAction::NotFound);
                    }
                    Ok(Err(e)) => {
                        warn!(error = %e, "Fetch failed");
                        machine.apply(EditorAction::FetchFailed {
                            message: ctx.config.messages.fetch_failed.clone(),
                        });
                        ctx.dispatcher.notify(&ctx.config.messages.fetch_failed);
                    }
                    Err(cancelled) => debug!(handle_id, %cancelled, "Fetch dropped"),
                }
            }
            Completion::Save { handle_id, outcome } => {
                if !self.save.as_ref().is_some_and(|h| h.accepts(handle_id)) {
                    debug!(handle_id, "Discarded stale save result");
                    return;
                }
                self.save = None;
                let Some(machine) = self.machine.as_mut() else {
                    return;
                };

                match outcome {
                    Ok(Ok(())) => {
                        info!(post_id = %machine.state().resource_id, "Post saved");
                        machine.apply(EditorAction::SaveFinished);
                        ctx.dispatcher.notify(&ctx.config.messages.post_updated);
                    }
                    Ok(Err(e)) => {
                        warn!(error = %e, "Save failed");
                        machine.apply(EditorAction::SaveFailed {
                            message: ctx.config.messages.save_failed.clone(),
                        });
                        ctx.dispatcher.notify(&ctx.config.messages.save_failed);
                    }
                    Err(cancelled) => debug!(handle_id, %cancelled, "Save dropped"),
                }
                self.start_pending_save(ctx);
            }
        }
    }

    fn next_handle(&mut self) -> RequestHandle {
        let handle = RequestHandle::create(self.next_handle_id);
        self.next_handle_id += 1;
        handle
    }

    fn cancel_all(&mut self) {
        if let Some(handle) = self.fetch.take() {
            if handle.cancel() {
                debug!(handle_id = handle.id(), "Cancelled fetch");
            }
        }
        if let Some(handle) = self.save.take() {
            if handle.cancel() {
                debug!(handle_id = handle.id(), "Cancelled save");
            }
        }
    }

    /// Pushes the current state to subscribers when it changed.
    fn publish(&self) {
        let snapshot = self.machine.as_ref().map(|m| m.state().clone());
        self.publisher.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}
