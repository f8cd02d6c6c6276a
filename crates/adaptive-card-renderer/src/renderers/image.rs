use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::CardElement;
use crate::errors::RenderError;
use crate::host_config::ImageSize;
use crate::registry::{ElementRenderer, Rendered};
use crate::ui::{HorizontalAlignment, UiElement, UiKind};
use crate::warning::WarningStatusCode;

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRenderer;

impl ElementRenderer for ImageRenderer {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        let Some(url) = element.str_prop("url") else {
            context.add_warning(
                WarningStatusCode::InvalidValue,
                "Image was dropped because it has no url",
            );
            return Ok(Rendered::Omitted);
        };

        let mut size = element
            .str_prop("size")
            .and_then(ImageSize::parse)
            .unwrap_or_default();
        if size == ImageSize::Stretch && args.restricted_width() {
            size = ImageSize::Auto;
        }
        let width = element
            .str_prop("width")
            .and_then(|width| width.strip_suffix("px"))
            .and_then(|pixels| pixels.trim().parse().ok())
            .or_else(|| context.host_config().image_size_for(size));

        let mut image = UiElement::new(UiKind::Image {
            url: url.to_string(),
            width,
        })
        .with_style_key("Adaptive.Image");
        image.horizontal_alignment = if size == ImageSize::Stretch {
            HorizontalAlignment::Stretch
        } else {
            element
                .str_prop("horizontalAlignment")
                .and_then(HorizontalAlignment::parse)
                .unwrap_or_default()
        };
        Ok(Rendered::Element(image))
    }
}
