//! # System Lifecycle & Orchestration
//!
//! Wiring and teardown for a running editor.
//!
//! - [`EditorSystem`] - spawns the post store and the editor controller, injects the
//!   controller's context, and shuts both down.
//! - [`setup_tracing`] - installs the logging subscriber.
//!
//! ## Dependency Injection via Context
//!
//! The controller is created without dependencies and receives them in
//! [`EditorController::run`](crate::controller::EditorController::run). Tests use this to
//! swap the store for a [`MockPostService`](crate::framework::mock::MockPostService)
//! without touching the controller.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the mailboxes
//! 2. **Controller cancels** - every live request handle is cancelled, so no stale
//!    completion can land
//! 3. **Await completion** - wait for the tasks to finish

pub mod editor_system;
pub mod tracing;

pub use editor_system::*;
pub use self::tracing::*;
