//! # Editor State Machine
//!
//! The editable-resource state machine: one [`EditorState`] value, one action type,
//! one pure transition function.
//!
//! ## Structure
//!
//! - [`state`] - [`EditorState`], [`FieldState`] and the [`Field`] enum
//! - [`action`] - [`EditorAction`], the complete set of transitions
//! - [`validation`] - [`ValidationRule`] and the per-field rules
//!
//! [`reduce`] never performs I/O and never mutates its input, so replaying the same actions
//! from the same initial state always lands on the same final state. [`EditorMachine`] is
//! a thin owner around it that the controller drives.
//!
//! ## Transition table
//!
//! | Action | Effect |
//! |---|---|
//! | `FetchComplete` | set both values, `is_fetching = false` (first settle only) |
//! | `NotFound` | `not_found = true`, `is_fetching = false` |
//! | `FetchFailed` | `is_fetching = false`, `fetch_error` set (first settle only) |
//! | `FieldChange` | set value, clear that field's error |
//! | `FieldValidate` | on failure set error + message, on pass leave as is |
//! | `SubmitRequested` | `submit_count += 1` if both fields are error-free |
//! | `SaveStarted` | `is_saving = true`, clear `save_error` |
//! | `SaveFinished` | `is_saving = false` |
//! | `SaveFailed` | `is_saving = false`, `save_error` set |

pub mod action;
pub mod state;
pub mod validation;

pub use action::*;
pub use state::*;
pub use validation::*;

use crate::model::PostId;
use tracing::{debug, trace};

/// Computes the state that follows `state` under `action`.
pub fn reduce(state: &EditorState, action: &EditorAction) -> EditorState {
    let mut next = state.clone();
    match action {
        EditorAction::FetchComplete { title, body } => {
            // The fetch latch settles once; late or repeated results are ignored.
            if next.is_fetching && !next.not_found {
                next.title.value = title.clone();
                next.body.value = body.clone();
                next.is_fetching = false;
            }
        }
        EditorAction::NotFound => {
            next.not_found = true;
            next.is_fetching = false;
        }
        EditorAction::FetchFailed { message } => {
            if next.is_fetching {
                next.is_fetching = false;
                next.fetch_error = Some(message.clone());
            }
        }
        EditorAction::FieldChange { field, text } => {
            let slot = next.field_mut(*field);
            slot.value = text.clone();
            slot.has_error = false;
        }
        EditorAction::FieldValidate { field, text } => {
            let outcome = rule_for(*field).validate(text);
            if !outcome.ok {
                let slot = next.field_mut(*field);
                slot.has_error = true;
                slot.message = outcome.message;
            }
        }
        EditorAction::SubmitRequested => {
            if next.fields_valid() {
                next.submit_count += 1;
            }
        }
        EditorAction::SaveStarted => {
            next.is_saving = true;
            next.save_error = None;
        }
        EditorAction::SaveFinished => {
            next.is_saving = false;
        }
        EditorAction::SaveFailed { message } => {
            next.is_saving = false;
            next.save_error = Some(message.clone());
        }
    }
    next
}

/// Owns the [`EditorState`] of one editor activation.
///
/// [`apply`](EditorMachine::apply) is the only way to change the state.
#[derive(Debug, Clone)]
pub struct EditorMachine {
    state: EditorState,
}

impl EditorMachine {
    pub fn new(resource_id: PostId) -> Self {
        Self {
            state: EditorState::new(resource_id),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn apply(&mut self, action: EditorAction) -> &EditorState {
        trace!(?action, "apply");
        let next = reduce(&self.state, &action);
        if next != self.state {
            debug!(
                post_id = %next.resource_id,
                action = action.kind(),
                submit_count = next.submit_count,
                is_saving = next.is_saving,
                "Transition"
            );
        }
        self.state = next;
        &self.state
    }
}
