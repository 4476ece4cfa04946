// ABOUTME: Error types for podcast validation and feed rendering.
// ABOUTME: ValidationError names the offending field and rule; RenderError covers mailbox and XML failures.

use std::fmt;
use thiserror::Error;

/// The rule a field broke while a `Channel` or `Episode` was being constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// A required key was absent or null.
    Missing,
    /// The value has a shape that cannot be coerced to the target type.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The value is not one of the declared enum members.
    InvalidEnum {
        value: String,
        allowed: &'static [&'static str],
    },
    /// An integer outside the permitted range (negative size, zero season, ...).
    OutOfRange { value: String, expected: &'static str },
    /// A timestamp string no supported format accepts.
    InvalidDate(String),
    /// A duration string that is neither seconds nor a clock value.
    InvalidDuration(String),
    /// An `itunes_category` shape other than a name or a name pair.
    InvalidCategory(String),
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Missing => write!(f, "required field is missing"),
            Rule::TypeMismatch { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            Rule::InvalidEnum { value, allowed } => {
                write!(f, "`{}` is not one of: {}", value, allowed.join(", "))
            }
            Rule::OutOfRange { value, expected } => {
                write!(f, "{} is out of range, expected {}", value, expected)
            }
            Rule::InvalidDate(value) => write!(f, "malformed timestamp `{}`", value),
            Rule::InvalidDuration(value) => write!(f, "malformed duration `{}`", value),
            Rule::InvalidCategory(reason) => write!(f, "invalid category: {}", reason),
        }
    }
}

/// A field failed validation. `field` is a dotted path such as `episodes[2].media_size`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid `{field}`: {rule}")]
pub struct ValidationError {
    pub field: String,
    pub rule: Rule,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, rule: Rule) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }

    /// Creates a Missing error for a required field.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, Rule::Missing)
    }

    /// Nests the field path under `parent`; an empty path refers to the parent itself.
    pub(crate) fn within(mut self, parent: &str) -> Self {
        self.field = if self.field.is_empty() {
            parent.to_string()
        } else {
            format!("{}.{}", parent, self.field)
        };
        self
    }

    /// Names the object itself when the failure was not tied to one of its fields.
    pub(crate) fn at_root(mut self, name: &str) -> Self {
        if self.field.is_empty() {
            self.field = name.to_string();
        }
        self
    }
}

/// Errors raised while turning a validated channel into XML.
#[derive(Debug, Error)]
pub enum RenderError {
    /// `itunes_owner` could not be split into a display name and address.
    #[error("invalid itunes_owner mailbox {input:?}: {reason}")]
    Mailbox { input: String, reason: String },

    /// The XML writer failed.
    #[error("failed to write XML: {0}")]
    Xml(String),
}

impl RenderError {
    pub fn mailbox(input: impl Into<String>, reason: impl Into<String>) -> Self {
        RenderError::Mailbox {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an Xml error from an underlying writer or encoding error.
    pub fn xml(err: impl fmt::Display) -> Self {
        RenderError::Xml(err.to_string())
    }
}

/// Either stage of the validate-then-render pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
