use std::rc::Rc;

use serde_json::Value;

use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::CardElement;
use crate::errors::RenderError;
use crate::input_value::{ChoiceSetInputValue, InputBinding};
use crate::registry::{ElementRenderer, Rendered, RenderedInput};
use crate::renderers::{ensure_interactive, input_control};
use crate::ui::{Choice, Control, ControlKind, ControlValue};
use crate::warning::WarningStatusCode;

#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceSetInputRenderer;

impl ElementRenderer for ChoiceSetInputRenderer {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        if !ensure_interactive(context, "ChoiceSet Input") {
            return Ok(Rendered::Omitted);
        }

        let choices = parse_choices(element, context);
        let multi_select = element.bool_prop("isMultiSelect").unwrap_or(false);
        let compact = element
            .str_prop("style")
            .is_none_or(|style| style.eq_ignore_ascii_case("compact"));

        // Initial selection keeps only values that name a choice.
        let mut selected: Vec<String> = element
            .str_prop("value")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|value| choices.iter().any(|choice| choice.value == *value))
            .map(str::to_owned)
            .collect();
        if !multi_select {
            selected.truncate(1);
        }

        let (kind, style_key) = if compact && !multi_select {
            (
                ControlKind::ComboBox {
                    choices,
                    placeholder: element.str_prop("placeholder").map(str::to_owned),
                },
                "Adaptive.Input.ChoiceSet.Compact",
            )
        } else {
            (
                ControlKind::ChoiceList {
                    choices,
                    multi_select,
                },
                "Adaptive.Input.ChoiceSet.Expanded",
            )
        };
        let control = Control::new(kind, ControlValue::Selection(selected));
        let value = ChoiceSetInputValue::new(InputBinding::new(element, control.clone(), args));

        Ok(Rendered::Input(RenderedInput {
            control: input_control(control, style_key),
            value: Rc::new(value),
        }))
    }
}

fn parse_choices(element: &CardElement, context: &mut RenderContext<'_>) -> Vec<Choice> {
    let Some(Value::Array(items)) = element.property("choices") else {
        return Vec::new();
    };
    let mut choices = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let title = item.get("title").and_then(Value::as_str);
        let value = item.get("value").and_then(Value::as_str);
        match (title, value) {
            (Some(title), Some(value)) => choices.push(Choice {
                title: title.to_string(),
                value: value.to_string(),
            }),
            _ => context.add_warning(
                WarningStatusCode::InvalidValue,
                format!("Choice {index} was dropped because it lacks a title or value"),
            ),
        }
    }
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::host_config::{ContainerStyle, HostConfig};
    use crate::input_value::InputValue;
    use serde_json::json;

    fn choice_set() -> CardElement {
        CardElement::new(ElementType::ChoiceSetInput)
            .with_id("color")
            .with_property(
                "choices",
                json!([
                    { "title": "Red", "value": "r" },
                    { "title": "Green", "value": "g" },
                    { "title": "Broken" },
                ]),
            )
    }

    fn render(element: &CardElement) -> (RenderedInput, usize) {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        let rendered = ChoiceSetInputRenderer
            .render(element, &mut context, &RenderArgs::root(0, ContainerStyle::Default))
            .expect("render");
        match rendered {
            Rendered::Input(input) => (input, context.warnings().len()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn compact_single_select_is_a_combo_box() {
        let (input, warnings) = render(&choice_set().with_property("value", "g,r"));
        assert!(matches!(
            input.control.as_control().expect("control").kind(),
            ControlKind::ComboBox { ref choices, .. } if choices.len() == 2
        ));
        assert_eq!(input.value.current_value(), "g");
        assert_eq!(warnings, 1);
    }

    #[test]
    fn multi_select_is_an_expanded_list() {
        let (input, _) = render(
            &choice_set()
                .with_property("isMultiSelect", true)
                .with_property("value", "r,blue,g"),
        );
        assert_eq!(
            input.control.style_key.as_deref(),
            Some("Adaptive.Input.ChoiceSet.Expanded")
        );
        assert_eq!(input.value.current_value(), "r,g");
    }
}
