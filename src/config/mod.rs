//! Editor configuration.
//!
//! Every field has a default, so an empty TOML document (or no file at all) yields the
//! stock editor:
//!
//! ```toml
//! mailbox_size = 32
//! redirect_path = "/"
//!
//! [messages]
//! permission_denied = "You do not have permission to edit this post."
//! post_updated = "Post was updated!"
//! ```

mod loader;

pub use loader::*;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Capacity of the controller's request mailbox.
    pub mailbox_size: usize,
    /// Where the editor sends a user who does not own the post.
    pub redirect_path: String,
    pub messages: Messages,
}

/// Flash messages sent to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub permission_denied: String,
    pub post_updated: String,
    pub fetch_failed: String,
    pub save_failed: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mailbox_size: 32,
            redirect_path: "/".to_string(),
            messages: Messages::default(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            permission_denied: "You do not have permission to edit this post.".to_string(),
            post_updated: "Post was updated!".to_string(),
            fetch_failed: "There was a problem loading the post.".to_string(),
            save_failed: "There was a problem saving the post.".to_string(),
        }
    }
}
