use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of warning codes surfaced to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningStatusCode {
    UnsupportedElementType,
    InteractivityNotSupported,
    InvalidValue,
    PerformingFallback,
    MaxActionsExceeded,
    UnknownActionType,
    RendererFailure,
}

impl WarningStatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedElementType => "UnsupportedElementType",
            Self::InteractivityNotSupported => "InteractivityNotSupported",
            Self::InvalidValue => "InvalidValue",
            Self::PerformingFallback => "PerformingFallback",
            Self::MaxActionsExceeded => "MaxActionsExceeded",
            Self::UnknownActionType => "UnknownActionType",
            Self::RendererFailure => "RendererFailure",
        }
    }
}

impl fmt::Display for WarningStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-fatal degradation recorded during a render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderWarning {
    pub code: WarningStatusCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl RenderWarning {
    pub fn new(code: WarningStatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} at {}: {}", self.code, path, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}
