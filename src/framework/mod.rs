//! Request plumbing shared by the controller and its tests.
//!
//! # Main Components
//!
//! - [`RequestHandle`] - one outstanding call plus its cancellation
//! - [`CancelToken`] - the side of a handle that travels with the call
//! - [`ResourceActor`] / [`ResourceClient`] - a generic keyed-entity actor, see [`core`]
//!
//! # Testing
//!
//! See [`mock`] for scripted collaborators that make races reproducible.

pub mod core;
pub mod handle;
pub mod mock;

pub use self::core::*;
pub use handle::*;
