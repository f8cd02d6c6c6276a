use std::rc::Rc;

use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::CardElement;
use crate::errors::RenderError;
use crate::input_value::{InputBinding, TextInputValue, full_match_regex};
use crate::registry::{ElementRenderer, Rendered, RenderedInput};
use crate::renderers::{ensure_interactive, input_control};
use crate::ui::{Control, ControlKind, ControlValue};
use crate::warning::WarningStatusCode;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextInputRenderer;

impl ElementRenderer for TextInputRenderer {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        if !ensure_interactive(context, "Text Input") {
            return Ok(Rendered::Omitted);
        }

        if let Some(pattern) = element.str_prop("regex") {
            if let Err(err) = full_match_regex(pattern) {
                tracing::debug!(path = args.path(), error = %err, "uncompilable text input regex");
                context.add_warning(
                    WarningStatusCode::InvalidValue,
                    format!("Text Input regex `{pattern}` is not valid and will not be enforced"),
                );
            }
        }

        let multiline = element.bool_prop("isMultiline").unwrap_or(false);
        let kind = ControlKind::TextBox {
            multiline,
            max_length: element.u64_prop("maxLength").map(|max| max as usize),
            placeholder: element.str_prop("placeholder").map(str::to_owned),
        };
        let initial = element.str_prop("value").unwrap_or_default().to_string();
        let control = Control::new(kind, ControlValue::Text(initial));
        let value = TextInputValue::new(InputBinding::new(element, control.clone(), args));

        let style_key = if multiline {
            "Adaptive.Input.Text.Multiline"
        } else {
            "Adaptive.Input.Text"
        };
        Ok(Rendered::Input(RenderedInput {
            control: input_control(control, style_key),
            value: Rc::new(value),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::host_config::{ContainerStyle, HostConfig};
    use crate::input_value::InputValue;

    #[test]
    fn multiline_text_box() {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        let element = CardElement::new(ElementType::TextInput)
            .with_id("comment")
            .with_property("isMultiline", true)
            .with_property("maxLength", 140)
            .with_property("placeholder", "Say something")
            .with_property("value", "hi");
        let rendered = TextInputRenderer
            .render(&element, &mut context, &RenderArgs::root(0, ContainerStyle::Default))
            .expect("render");
        let Rendered::Input(input) = rendered else {
            panic!("expected input");
        };
        assert_eq!(
            input.control.style_key.as_deref(),
            Some("Adaptive.Input.Text.Multiline")
        );
        assert_eq!(
            input.control.as_control().expect("control").kind(),
            ControlKind::TextBox {
                multiline: true,
                max_length: Some(140),
                placeholder: Some("Say something".into()),
            }
        );
        assert_eq!(input.value.input_id(), "comment");
        assert_eq!(input.value.current_value(), "hi");
        assert!(input.value.has_validation_constraints());
    }

    #[test]
    fn invalid_regex_warns_and_still_renders() {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        let element = CardElement::new(ElementType::TextInput)
            .with_id("code")
            .with_property("regex", "[a-z");
        let rendered = TextInputRenderer
            .render(&element, &mut context, &RenderArgs::root(0, ContainerStyle::Default))
            .expect("render");
        let Rendered::Input(input) = rendered else {
            panic!("expected input");
        };
        assert_eq!(context.warnings().len(), 1);
        assert_eq!(context.warnings()[0].code, WarningStatusCode::InvalidValue);
        assert!(context.warnings()[0].message.contains("[a-z"));
        assert!(input.value.set_value_from_str("anything"));
        assert_eq!(input.value.validate(), Ok(()));
    }

    #[test]
    fn valid_regex_adds_no_warning() {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        let element = CardElement::new(ElementType::TextInput)
            .with_id("code")
            .with_property("regex", "[a-z]+");
        TextInputRenderer
            .render(&element, &mut context, &RenderArgs::root(0, ContainerStyle::Default))
            .expect("render");
        assert!(context.warnings().is_empty());
    }
}
