use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::CardElement;
use crate::errors::RenderError;
use crate::host_config::TextSize;
use crate::registry::{ElementRenderer, Rendered};
use crate::ui::{HorizontalAlignment, UiElement, UiKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct TextBlockRenderer;

impl ElementRenderer for TextBlockRenderer {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        let size = element
            .str_prop("size")
            .and_then(TextSize::parse)
            .unwrap_or_default();
        let bold = element
            .str_prop("weight")
            .is_some_and(|weight| weight.eq_ignore_ascii_case("bolder"));
        // Narrow columns would otherwise clip unwrapped text.
        let wrap = element.bool_prop("wrap").unwrap_or(false) || args.restricted_width();

        let mut text_block = UiElement::new(UiKind::TextBlock {
            text: element.str_prop("text").unwrap_or_default().to_string(),
            font_size: context.host_config().font_size_for(size),
            bold,
            wrap,
        })
        .with_style_key("Adaptive.TextBlock");
        if let Some(alignment) = element
            .str_prop("horizontalAlignment")
            .and_then(HorizontalAlignment::parse)
        {
            text_block.horizontal_alignment = alignment;
        }
        Ok(Rendered::Element(text_block))
    }
}
