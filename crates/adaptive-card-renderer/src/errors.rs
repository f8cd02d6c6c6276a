use thiserror::Error;

use crate::input_value::InputValidationError;

/// Failure raised by a renderer for a single node.
///
/// The walker never lets one of these escape the node it came from: it is
/// recorded as a warning and the node is skipped.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{element} is missing required property `{property}`")]
    MissingProperty { element: String, property: String },

    #[error("input `{0}` was registered twice")]
    DuplicateInput(String),

    #[error("{0}")]
    Renderer(String),
}

impl From<String> for RenderError {
    fn from(value: String) -> Self {
        RenderError::Renderer(value)
    }
}

impl From<&str> for RenderError {
    fn from(value: &str) -> Self {
        RenderError::Renderer(value.to_string())
    }
}

/// Errors converting a JSON document into card elements.
#[derive(Debug, Error)]
pub enum ElementError {
    #[error("invalid card JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path}: expected a JSON object")]
    NotAnObject { path: String },

    #[error("{path}: missing `type`")]
    MissingType { path: String },

    #[error("{path}: `{field}` must be an array")]
    NotAnArray { path: String, field: String },
}

/// Errors loading or checking a host configuration.
#[derive(Debug, Error)]
pub enum HostConfigError {
    #[error("invalid host config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid host config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors building the payload of a submit action.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("action `{0}` does not submit inputs")]
    NotSubmitAction(String),

    #[error("{} input(s) failed validation", .0.len())]
    Validation(Vec<InputValidationError>),
}
