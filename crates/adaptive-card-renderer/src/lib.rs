//! Element-renderer dispatch core for Adaptive Cards.
//! A registry maps element type tags to renderers; a tree walker drives them
//! over the card body with a shared render context that collects warnings and
//! input bindings. The output is an abstract UI tree for the host to map onto
//! its widget toolkit.

pub mod args;
pub mod card_config;
pub mod context;
pub mod datetime;
pub mod element;
pub mod errors;
pub mod host_config;
pub mod input_value;
pub mod registry;
pub mod renderer;
pub mod renderers;
pub mod ui;
mod walker;
pub mod warning;

pub use args::RenderArgs;
pub use card_config::CardConfig;
pub use context::{Ancestor, RenderContext};
pub use element::{
    ActionKind, AdaptiveCard, AssociatedInputs, CardAction, CardElement, ElementType, Fallback,
};
pub use errors::{ElementError, HostConfigError, RenderError, SubmitError};
pub use host_config::HostConfig;
pub use input_value::{
    InputBinding, InputCollection, InputEntry, InputValidationError, InputValue,
    ValidationFailure,
};
pub use registry::{ElementRenderer, ElementRendererRegistry, Rendered, RenderedInput};
pub use renderer::{CardRenderer, RenderedCard, render_card};
pub use ui::{Control, ControlKind, ControlValue, UiElement, UiKind, ValidationIndicator};
pub use warning::{RenderWarning, WarningStatusCode};
