//! Plain data carried between the editor, its collaborators and the post store.

pub mod post;
pub mod session;

pub use post::*;
pub use session::*;
