use std::rc::Rc;

use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::datetime::parse_simple_time;
use crate::element::CardElement;
use crate::errors::RenderError;
use crate::input_value::{InputBinding, TimeInputValue};
use crate::registry::{ElementRenderer, Rendered, RenderedInput};
use crate::renderers::{ensure_interactive, input_control};
use crate::ui::{Control, ControlKind, ControlValue};

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeInputRenderer;

impl ElementRenderer for TimeInputRenderer {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        if !ensure_interactive(context, "Time Input") {
            return Ok(Rendered::Omitted);
        }

        // Unparseable values leave the picker unset.
        let initial = element.str_prop("value").and_then(parse_simple_time);
        let control = Control::new(ControlKind::TimePicker, ControlValue::Time(initial));
        let value = TimeInputValue::new(InputBinding::new(element, control.clone(), args));

        Ok(Rendered::Input(RenderedInput {
            control: input_control(control, "Adaptive.Input.Time"),
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
    use crate::ui::{HorizontalAlignment, VerticalAlignment};
    use crate::warning::WarningStatusCode;
    use chrono::NaiveTime;

    fn render<'a>(config: &'a HostConfig, value: &str) -> (Rendered, RenderContext<'a>) {
        let mut context = RenderContext::new(config);
        let element = CardElement::new(ElementType::TimeInput)
            .with_id("start")
            .with_property("value", value);
        let rendered = TimeInputRenderer
            .render(&element, &mut context, &RenderArgs::root(0, ContainerStyle::Default))
            .expect("render");
        (rendered, context)
    }

    #[test]
    fn initial_value_is_parsed() {
        let config = HostConfig::default();
        let (rendered, context) = render(&config, "13:45");
        let Rendered::Input(input) = rendered else {
            panic!("expected input");
        };
        assert_eq!(
            input.control.as_control().expect("control").value(),
            ControlValue::Time(NaiveTime::from_hms_opt(13, 45, 0))
        );
        assert_eq!(input.control.style_key.as_deref(), Some("Adaptive.Input.Time"));
        assert_eq!(input.control.horizontal_alignment, HorizontalAlignment::Stretch);
        assert_eq!(input.control.vertical_alignment, VerticalAlignment::Top);
        assert_eq!(input.value.current_value(), "13:45");
        assert!(context.warnings().is_empty());
    }

    #[test]
    fn malformed_value_leaves_picker_unset() {
        let config = HostConfig::default();
        let (rendered, context) = render(&config, "25:99");
        let Rendered::Input(input) = rendered else {
            panic!("expected input");
        };
        assert_eq!(input.value.current_value(), "");
        assert!(context.warnings().is_empty());
    }

    #[test]
    fn stripped_without_interactivity() {
        let config = HostConfig {
            supports_interactivity: false,
            ..HostConfig::default()
        };
        let (rendered, context) = render(&config, "13:45");
        assert!(matches!(rendered, Rendered::Omitted));
        assert_eq!(context.warnings().len(), 1);
        assert_eq!(
            context.warnings()[0].code,
            WarningStatusCode::InteractivityNotSupported
        );
        assert_eq!(
            context.warnings()[0].message,
            "Time Input was stripped from card because interactivity is not supported"
        );
    }
}
