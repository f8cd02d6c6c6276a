use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::CardElement;
use crate::errors::RenderError;
use crate::registry::{ElementRenderer, Rendered};
use crate::ui::{HorizontalAlignment, Orientation, UiElement};

/// Horizontal panel; the walker fills in the columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnSetRenderer;

impl ElementRenderer for ColumnSetRenderer {
    fn render(
        &self,
        element: &CardElement,
        _context: &mut RenderContext<'_>,
        _args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        let mut panel = UiElement::panel(Orientation::Horizontal).with_style_key("Adaptive.ColumnSet");
        panel.horizontal_alignment = element
            .str_prop("horizontalAlignment")
            .and_then(HorizontalAlignment::parse)
            .unwrap_or(HorizontalAlignment::Stretch);
        Ok(Rendered::Element(panel))
    }
}
