//! Field validation rules.
//!
//! Rules are pure and total: they never fail, they only report whether the text is
//! acceptable and, if not, the message to show under the input.

use super::Field;

/// Result of running a [`ValidationRule`] over a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub ok: bool,
    pub message: String,
}

impl ValidationOutcome {
    pub fn pass() -> Self {
        Self {
            ok: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// A synchronous predicate over a field's text.
pub trait ValidationRule {
    fn validate(&self, text: &str) -> ValidationOutcome;
}

/// Rejects text that is empty once surrounding whitespace is trimmed.
#[derive(Debug, Clone, Copy)]
pub struct Required {
    message: &'static str,
}

impl Required {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl ValidationRule for Required {
    fn validate(&self, text: &str) -> ValidationOutcome {
        if text.trim().is_empty() {
            ValidationOutcome::fail(self.message)
        } else {
            ValidationOutcome::pass()
        }
    }
}

pub const TITLE_REQUIRED: Required = Required::new("You must provide a title");
pub const BODY_REQUIRED: Required = Required::new("You must provide body content");

/// The rule attached to each editable field.
pub fn rule_for(field: Field) -> Required {
    match field {
        Field::Title => TITLE_REQUIRED,
        Field::Body => BODY_REQUIRED,
    }
}
