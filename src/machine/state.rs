use std::fmt;
use std::str::FromStr;

use crate::model::PostId;

/// One of the two editable text attributes of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Body,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Title, Field::Body];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Body => "body",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a form input name does not map to an editable field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Field::Title),
            "body" => Ok(Field::Body),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Value and validity of a single input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub has_error: bool,
    pub message: String,
}

/// Everything the editor view renders from.
///
/// Only [`reduce`](super::reduce) produces new values of this type; the controller and
/// the view hold snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub title: FieldState,
    pub body: FieldState,
    /// Latch: true until the initial fetch settles, then false for good.
    pub is_fetching: bool,
    pub is_saving: bool,
    /// Latch: once set the view shows the not-found page.
    pub not_found: bool,
    /// Edge trigger for saves. Only ever grows.
    pub submit_count: u64,
    pub resource_id: PostId,
    pub fetch_error: Option<String>,
    pub save_error: Option<String>,
}

impl EditorState {
    pub fn new(resource_id: PostId) -> Self {
        Self {
            title: FieldState::default(),
            body: FieldState::default(),
            is_fetching: true,
            is_saving: false,
            not_found: false,
            submit_count: 0,
            resource_id,
            fetch_error: None,
            save_error: None,
        }
    }

    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Title => &self.title,
            Field::Body => &self.body,
        }
    }

    pub(crate) fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Title => &mut self.title,
            Field::Body => &mut self.body,
        }
    }

    /// True when neither field currently shows a validation error.
    pub fn fields_valid(&self) -> bool {
        Field::ALL.iter().all(|f| !self.field(*f).has_error)
    }

    /// True once the fetch settled with a post the editor can work on.
    pub fn is_editable(&self) -> bool {
        !self.is_fetching && !self.not_found && self.fetch_error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_parse() {
        assert_eq!("title".parse::<Field>(), Ok(Field::Title));
        assert_eq!("body".parse::<Field>(), Ok(Field::Body));
        assert_eq!(
            "author".parse::<Field>(),
            Err(UnknownField("author".to_string()))
        );
    }

    #[test]
    fn new_state_is_fetching_with_empty_fields() {
        let state = EditorState::new(PostId::from("42"));
        assert!(state.is_fetching);
        assert!(!state.is_editable());
        assert_eq!(state.title, FieldState::default());
        assert_eq!(state.body, FieldState::default());
        assert_eq!(state.submit_count, 0);
    }
}
