use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::CardElement;
use crate::errors::RenderError;
use crate::host_config::ContainerStyle;
use crate::registry::{ElementRenderer, Rendered};
use crate::ui::{Orientation, UiElement, UiKind, VerticalAlignment};

/// Vertical panel; the walker fills in the items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerRenderer;

impl ElementRenderer for ContainerRenderer {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        _args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        let background = element
            .str_prop("style")
            .and_then(ContainerStyle::parse)
            .map(|style| context.host_config().background_for(style).to_string());
        let mut panel = UiElement::new(UiKind::Panel {
            orientation: Orientation::Vertical,
            background,
        })
        .with_style_key("Adaptive.Container");
        if let Some(alignment) = element
            .str_prop("verticalContentAlignment")
            .and_then(VerticalAlignment::parse)
        {
            panel.vertical_alignment = alignment;
        }
        Ok(Rendered::Element(panel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::host_config::HostConfig;

    #[test]
    fn style_sets_background() {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        let element = CardElement::new(ElementType::Container).with_property("style", "good");
        let Rendered::Element(ui) = ContainerRenderer
            .render(&element, &mut context, &RenderArgs::root(0, ContainerStyle::Default))
            .expect("render")
        else {
            panic!("expected element");
        };
        assert_eq!(
            ui.kind,
            UiKind::Panel {
                orientation: Orientation::Vertical,
                background: Some("#FFD5F0DD".into()),
            }
        );
        assert!(ui.children.is_empty());
    }
}
