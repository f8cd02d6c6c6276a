use std::rc::Rc;

use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::datetime::parse_simple_date;
use crate::element::CardElement;
use crate::errors::RenderError;
use crate::input_value::{DateInputValue, InputBinding};
use crate::registry::{ElementRenderer, Rendered, RenderedInput};
use crate::renderers::{ensure_interactive, input_control};
use crate::ui::{Control, ControlKind, ControlValue};

#[derive(Debug, Clone, Copy, Default)]
pub struct DateInputRenderer;

impl ElementRenderer for DateInputRenderer {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        if !ensure_interactive(context, "Date Input") {
            return Ok(Rendered::Omitted);
        }

        let kind = ControlKind::DatePicker {
            min: element.str_prop("min").and_then(parse_simple_date),
            max: element.str_prop("max").and_then(parse_simple_date),
        };
        let initial = element.str_prop("value").and_then(parse_simple_date);
        let control = Control::new(kind, ControlValue::Date(initial));
        let value = DateInputValue::new(InputBinding::new(element, control.clone(), args));

        Ok(Rendered::Input(RenderedInput {
            control: input_control(control, "Adaptive.Input.Date"),
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
    use chrono::NaiveDate;

    #[test]
    fn bounds_and_value_are_parsed() {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        let element = CardElement::new(ElementType::DateInput)
            .with_id("due")
            .with_property("value", "2024-05-01")
            .with_property("min", "2024-01-01")
            .with_property("max", "bogus");
        let rendered = DateInputRenderer
            .render(&element, &mut context, &RenderArgs::root(0, ContainerStyle::Default))
            .expect("render");
        let Rendered::Input(input) = rendered else {
            panic!("expected input");
        };
        let control = input.control.as_control().expect("control");
        assert_eq!(
            control.kind(),
            ControlKind::DatePicker {
                min: NaiveDate::from_ymd_opt(2024, 1, 1),
                max: None,
            }
        );
        assert_eq!(input.value.current_value(), "2024-05-01");
        assert!(context.warnings().is_empty());
    }
}
