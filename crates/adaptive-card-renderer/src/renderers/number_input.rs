use std::rc::Rc;

use serde_json::Value;

use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::CardElement;
use crate::errors::RenderError;
use crate::input_value::{InputBinding, NumberInputValue};
use crate::registry::{ElementRenderer, Rendered, RenderedInput};
use crate::renderers::{ensure_interactive, input_control};
use crate::ui::{Control, ControlKind, ControlValue};

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberInputRenderer;

impl ElementRenderer for NumberInputRenderer {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        if !ensure_interactive(context, "Number Input") {
            return Ok(Rendered::Omitted);
        }

        let kind = ControlKind::NumberBox {
            min: element.f64_prop("min"),
            max: element.f64_prop("max"),
            placeholder: element.str_prop("placeholder").map(str::to_owned),
        };
        let control = Control::new(kind, ControlValue::Number(initial_number(element)));
        let value = NumberInputValue::new(InputBinding::new(element, control.clone(), args));

        Ok(Rendered::Input(RenderedInput {
            control: input_control(control, "Adaptive.Input.Number"),
            value: Rc::new(value),
        }))
    }
}

// Cards carry the value either as a JSON number or as a numeric string.
fn initial_number(element: &CardElement) -> Option<f64> {
    let number = match element.property("value")? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::host_config::{ContainerStyle, HostConfig};
    use crate::input_value::InputValue;
    use serde_json::json;

    fn rendered_value(value: Value) -> String {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        let element = CardElement::new(ElementType::NumberInput)
            .with_id("qty")
            .with_property("value", value);
        let rendered = NumberInputRenderer
            .render(&element, &mut context, &RenderArgs::root(0, ContainerStyle::Default))
            .expect("render");
        assert!(context.warnings().is_empty());
        match rendered {
            Rendered::Input(input) => input.value.current_value(),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(rendered_value(json!(3)), "3");
        assert_eq!(rendered_value(json!("2.5")), "2.5");
    }

    #[test]
    fn malformed_value_leaves_box_empty() {
        assert_eq!(rendered_value(json!("three")), "");
        assert_eq!(rendered_value(json!(true)), "");
    }
}
