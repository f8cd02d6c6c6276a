use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::{ActionKind, CardAction, CardElement, actions_from_value};
use crate::errors::RenderError;
use crate::host_config::ActionsOrientation;
use crate::registry::{ElementRenderer, Rendered};
use crate::renderers::ensure_interactive;
use crate::ui::{Orientation, UiElement, UiKind};
use crate::warning::WarningStatusCode;

#[derive(Debug, Clone, Copy, Default)]
pub struct ActionSetRenderer;

impl ElementRenderer for ActionSetRenderer {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        _args: &RenderArgs,
    ) -> Result<Rendered, RenderError> {
        if !ensure_interactive(context, "ActionSet") {
            return Ok(Rendered::Omitted);
        }
        let actions = actions_from_value(element.property("actions"))
            .map_err(|err| RenderError::Renderer(err.to_string()))?;
        Ok(Rendered::Element(render_actions(&actions, context)))
    }
}

/// Lays out action buttons, honoring the host's action limit.
pub(crate) fn render_actions(actions: &[CardAction], context: &mut RenderContext<'_>) -> UiElement {
    let config = &context.host_config().actions;
    let max_actions = config.max_actions as usize;
    let button_spacing = config.button_spacing;
    let orientation = match config.actions_orientation {
        ActionsOrientation::Horizontal => Orientation::Horizontal,
        ActionsOrientation::Vertical => Orientation::Vertical,
    };

    let mut bar = UiElement::panel(orientation).with_style_key("Adaptive.Actions");
    for action in actions {
        if let ActionKind::Custom(tag) = &action.kind {
            context.add_warning(
                WarningStatusCode::UnknownActionType,
                format!("Action `{}` of type {tag} is not supported", action.describe()),
            );
            continue;
        }
        if bar.children.len() == max_actions {
            context.add_warning(
                WarningStatusCode::MaxActionsExceeded,
                format!("Some actions were not rendered because the host allows at most {max_actions}"),
            );
            break;
        }
        let mut button = UiElement::new(UiKind::Button {
            title: action.title.clone(),
            action: action.clone(),
        })
        .with_style_key("Adaptive.Action");
        if orientation == Orientation::Vertical && !bar.children.is_empty() {
            button.margin_top = button_spacing;
        }
        bar.children.push(button);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::host_config::{ContainerStyle, HostConfig};
    use serde_json::json;

    fn action_set(actions: serde_json::Value) -> CardElement {
        CardElement::new(ElementType::ActionSet).with_property("actions", actions)
    }

    #[test]
    fn stripped_without_interactivity() {
        let config = HostConfig {
            supports_interactivity: false,
            ..HostConfig::default()
        };
        let mut context = RenderContext::new(&config);
        let rendered = ActionSetRenderer
            .render(
                &action_set(json!([{ "type": "Action.Submit", "title": "Go" }])),
                &mut context,
                &RenderArgs::root(0, ContainerStyle::Default),
            )
            .expect("render");
        assert!(matches!(rendered, Rendered::Omitted));
        assert_eq!(
            context.warnings()[0].code,
            WarningStatusCode::InteractivityNotSupported
        );
    }

    #[test]
    fn limits_and_unknown_types_warn() {
        let mut config = HostConfig::default();
        config.actions.max_actions = 2;
        let mut context = RenderContext::new(&config);
        let actions = vec![
            CardAction::submit("One"),
            CardAction {
                kind: ActionKind::Custom("Action.ShowCard".into()),
                ..CardAction::submit("More")
            },
            CardAction::open_url("Two", "https://example.com"),
            CardAction::submit("Three"),
        ];
        let bar = render_actions(&actions, &mut context);
        assert_eq!(bar.children.len(), 2);
        let codes: Vec<_> = context.warnings().iter().map(|w| w.code).collect();
        assert_eq!(
            codes,
            vec![
                WarningStatusCode::UnknownActionType,
                WarningStatusCode::MaxActionsExceeded
            ]
        );
    }

    #[test]
    fn malformed_actions_fail_the_node() {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        let err = ActionSetRenderer
            .render(
                &action_set(json!("not a list")),
                &mut context,
                &RenderArgs::root(0, ContainerStyle::Default),
            )
            .unwrap_err();
        assert!(matches!(err, RenderError::Renderer(_)));
    }
}
