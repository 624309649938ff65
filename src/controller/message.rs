//! Messages flowing into the [`EditorController`](super::EditorController).

use crate::clients::ServiceError;
use crate::framework::Cancelled;
use crate::machine::{EditorState, Field};
use crate::model::{Post, PostId};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the controller.
pub type Response<T> = oneshot::Sender<T>;

/// Requests sent by the host (through [`EditorClient`](crate::clients::EditorClient)).
///
/// The variants mirror what the editor page can do: mount for a post, unmount, type, leave
/// a field, submit the form, and read the current state.
#[derive(Debug)]
pub enum EditorRequest {
    Activate {
        post_id: PostId,
    },
    Deactivate,
    Input {
        field: Field,
        text: String,
    },
    Blur {
        field: Field,
        text: String,
    },
    Submit,
    Snapshot {
        respond_to: Response<Option<EditorState>>,
    },
}

/// Results reported back by spawned call tasks, tagged with the handle that issued them.
#[derive(Debug)]
pub(crate) enum Completion {
    Fetch {
        handle_id: u64,
        outcome: Result<Result<Option<Post>, ServiceError>, Cancelled>,
    },
    Save {
        handle_id: u64,
        outcome: Result<Result<(), ServiceError>, Cancelled>,
    },
}
