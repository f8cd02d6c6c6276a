use std::rc::Rc;

use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::CardElement;
use crate::errors::RenderError;
use crate::input_value::{InputBinding, ToggleInputValue};
use crate::registry::{ElementRenderer, Rendered, RenderedInput};
use crate::renderers::{ensure_interactive, input_control};
use crate::ui::{Control, ControlKind, ControlValue};

#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleInputRenderer;

impl ElementRenderer for ToggleInputRenderer {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        if !ensure_interactive(context, "Toggle Input") {
            return Ok(Rendered::Omitted);
        }

        let value_on = element.str_prop("valueOn").unwrap_or("true");
        let on = element.str_prop("value") == Some(value_on);
        let kind = ControlKind::ToggleSwitch {
            title: element.str_prop("title").unwrap_or_default().to_string(),
        };
        let control = Control::new(kind, ControlValue::Toggle(on));
        let value = ToggleInputValue::new(InputBinding::new(element, control.clone(), args));

        Ok(Rendered::Input(RenderedInput {
            control: input_control(control, "Adaptive.Input.Toggle"),
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

    fn render(element: &CardElement) -> RenderedInput {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        match ToggleInputRenderer
            .render(element, &mut context, &RenderArgs::root(0, ContainerStyle::Default))
            .expect("render")
        {
            Rendered::Input(input) => input,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn value_on_switches_toggle_on() {
        let input = render(
            &CardElement::new(ElementType::ToggleInput)
                .with_id("notify")
                .with_property("title", "Notify me")
                .with_property("valueOn", "yes")
                .with_property("value", "yes"),
        );
        assert_eq!(
            input.control.as_control().expect("control").value(),
            ControlValue::Toggle(true)
        );
        assert_eq!(input.value.current_value(), "yes");
    }

    #[test]
    fn other_values_leave_toggle_off() {
        let input = render(
            &CardElement::new(ElementType::ToggleInput)
                .with_id("notify")
                .with_property("value", "maybe"),
        );
        assert_eq!(input.value.current_value(), "false");
    }
}
