//! # Post Editor
//!
//! > **An editable-resource state machine for a user-owned post.**
//!
//! This crate loads a post, lets its owner revise the title and body, validates both fields
//! and saves the result, while making sure that teardown, cancelled requests and
//! unauthorized editors can never leave the editor in an inconsistent state.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Reducer + Actor
//!
//! - **Reducer**: every state change goes through one pure function,
//!   [`machine::reduce`], over a tagged-union action type. No I/O, no partial updates.
//! - **Actor**: the [`controller::EditorController`] owns the machine inside a single Tokio
//!   task and processes page events one at a time. Network calls are the only suspension
//!   points and they run in separate tasks that report back through the mailbox.
//!
//! The machine decides *what* the state is; the controller decides *when* to call the
//! service, and throws away anything that comes back from a request it has cancelled.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Core ([`machine`])
//! - **Role**: [`EditorState`](machine::EditorState), [`EditorAction`](machine::EditorAction),
//!   validation rules and the transition table.
//!
//! ### 2. The Controller ([`controller`])
//! - **Role**: fetch on activation, ownership check, submit gating, one save at a time,
//!   cancellation on teardown.
//! - **Key items**: [`EditorController`](controller::EditorController),
//!   [`EditorContext`](controller::EditorContext).
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: the host-facing [`EditorClient`](clients::EditorClient) and the collaborator
//!   traits ([`PostService`](clients::PostService), [`Dispatcher`](clients::Dispatcher),
//!   [`Navigator`](clients::Navigator)).
//!
//! ### 4. The Plumbing ([`framework`])
//! - **Role**: [`RequestHandle`](framework::RequestHandle) cancellation, the generic
//!   [`ResourceActor`](framework::ResourceActor) behind the post store, and test mocks.
//!
//! ### 5. The Backend ([`store`]) and Orchestrator ([`lifecycle`])
//! - **Role**: an in-process post service actor, and the system that wires it to a
//!   controller.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the scripted demo session
//! RUST_LOG=info cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod controller;
pub mod framework;
pub mod lifecycle;
pub mod machine;
pub mod model;
pub mod store;
