//! Built-in element renderers.
//!
//! Each renderer handles one element type and is installed by
//! [`ElementRendererRegistry::with_builtin_renderers`](crate::registry::ElementRendererRegistry::with_builtin_renderers).
//! Feature gating is done here rather than in the walker because each element
//! class gates on different host settings.

mod action_set;
mod choice_set_input;
mod column;
mod column_set;
mod container;
mod date_input;
mod image;
mod number_input;
mod text_block;
mod text_input;
mod time_input;
mod toggle_input;

pub use action_set::ActionSetRenderer;
pub use choice_set_input::ChoiceSetInputRenderer;
pub use column::ColumnRenderer;
pub use column_set::ColumnSetRenderer;
pub use container::ContainerRenderer;
pub use date_input::DateInputRenderer;
pub use image::ImageRenderer;
pub use number_input::NumberInputRenderer;
pub use text_block::TextBlockRenderer;
pub use text_input::TextInputRenderer;
pub use time_input::TimeInputRenderer;
pub use toggle_input::ToggleInputRenderer;

pub(crate) use action_set::render_actions;

use crate::context::RenderContext;
use crate::ui::{Control, HorizontalAlignment, UiElement, VerticalAlignment};
use crate::warning::WarningStatusCode;

/// Returns `false`, after recording a warning, when the host has turned
/// interactivity off.
pub(crate) fn ensure_interactive(context: &mut RenderContext<'_>, what: &str) -> bool {
    if context.host_config().supports_interactivity() {
        return true;
    }
    context.add_warning(
        WarningStatusCode::InteractivityNotSupported,
        format!("{what} was stripped from card because interactivity is not supported"),
    );
    false
}

/// Wraps an input control, stretched to full width and top-aligned.
pub(crate) fn input_control(control: Control, style_key: &str) -> UiElement {
    UiElement::control(control)
        .with_style_key(style_key)
        .with_alignment(HorizontalAlignment::Stretch, VerticalAlignment::Top)
}
