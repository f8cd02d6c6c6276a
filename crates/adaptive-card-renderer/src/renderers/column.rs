use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::{CardElement, ElementType};
use crate::errors::RenderError;
use crate::registry::{ElementRenderer, Rendered};
use crate::ui::{ColumnWidth, UiElement, UiKind};
use crate::warning::WarningStatusCode;

#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnRenderer;

impl ElementRenderer for ColumnRenderer {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        if args.parent_type() != Some(&ElementType::ColumnSet) {
            tracing::debug!(path = args.path(), "column rendered outside a column set");
        }
        let width = match element.property("width") {
            None => ColumnWidth::default(),
            Some(value) => ColumnWidth::parse(value).unwrap_or_else(|| {
                context.add_warning(
                    WarningStatusCode::InvalidValue,
                    format!("Column width {value} is not valid; using stretch"),
                );
                ColumnWidth::default()
            }),
        };
        Ok(Rendered::Element(
            UiElement::new(UiKind::Column { width }).with_style_key("Adaptive.Column"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host_config::{ContainerStyle, HostConfig};

    fn render(element: &CardElement) -> (UiElement, usize) {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        let set = CardElement::new(ElementType::ColumnSet);
        let args = RenderArgs::root(0, ContainerStyle::Default).for_child(&set, 0);
        let Rendered::Element(ui) = ColumnRenderer
            .render(element, &mut context, &args)
            .expect("render")
        else {
            panic!("expected element");
        };
        (ui, context.warnings().len())
    }

    #[test]
    fn pixel_width() {
        let (ui, warnings) =
            render(&CardElement::new(ElementType::Column).with_property("width", "120px"));
        assert_eq!(ui.kind, UiKind::Column { width: ColumnWidth::Pixels(120) });
        assert_eq!(warnings, 0);
    }

    #[test]
    fn invalid_width_warns_and_stretches() {
        let (ui, warnings) =
            render(&CardElement::new(ElementType::Column).with_property("width", "wide"));
        assert_eq!(ui.kind, UiKind::Column { width: ColumnWidth::Stretch });
        assert_eq!(warnings, 1);
    }
}
