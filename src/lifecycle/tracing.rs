//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate for the whole
//! editor: the controller, its call tasks and the post store.
//!
//! ## Configuration
//!
//! The compact format hides the module prefix (`with_target(false)`); call tasks run inside
//! `fetch_post` / `update_post` spans carrying `post_id` and `handle_id`, so a line is
//! attributable to the request that produced it.
//!
//! ```bash
//! # Lifecycle only: activation, loads, saves, permission denials
//! RUST_LOG=info cargo run
//!
//! # Every applied transition and every request sent
//! RUST_LOG=debug cargo run
//!
//! # Also the raw action payloads
//! RUST_LOG=trace cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! INFO Editor controller started user="alice"
//! INFO Activate post_id=1
//! DEBUG fetch_post{post_id=1 handle_id=1}: Sending request
//! DEBUG Transition post_id=1 action="fetch_complete" submit_count=0 is_saving=false
//! INFO Post loaded post_id=1
//! DEBUG Transition post_id=1 action="submit_requested" submit_count=1 is_saving=false
//! DEBUG update_post{post_id=1 handle_id=2}: Sending request update=PostUpdate { .., credential: Credential(***) }
//! INFO Post saved post_id=1
//! ```
//!
//! A cancelled call shows up as `Cancelled fetch handle_id=..` followed, if the response
//! still arrives, by nothing at all: stale results are dropped before they reach the machine.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
