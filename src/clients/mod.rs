//! Client-side interfaces: the typed [`EditorClient`] and the collaborator contracts the
//! editor depends on.

pub mod collaborators;
pub mod editor_client;

pub use collaborators::*;
pub use editor_client::*;
