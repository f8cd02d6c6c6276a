use std::sync::Arc;

use serde_json::{Map, Value};

use crate::card_config::CardConfig;
use crate::context::RenderContext;
use crate::element::{ActionKind, AdaptiveCard, AssociatedInputs, CardAction};
use crate::errors::SubmitError;
use crate::host_config::{ContainerStyle, HostConfig, Spacing};
use crate::input_value::InputCollection;
use crate::registry::ElementRendererRegistry;
use crate::renderers::{ensure_interactive, render_actions};
use crate::ui::{Orientation, UiElement, UiKind};
use crate::walker::TreeWalker;
use crate::warning::RenderWarning;

/// Output of one render pass.
#[derive(Debug)]
pub struct RenderedCard {
    pub root: UiElement,
    pub warnings: Vec<RenderWarning>,
    pub inputs: InputCollection,
}

impl RenderedCard {
    /// Builds the payload a host sends when `action` is invoked.
    ///
    /// Inputs are validated first unless the action opts out with
    /// `associatedInputs: none`. Input values are merged into the action's
    /// `data` object; non-object data is kept under the `data` key.
    pub fn submit_payload(&self, action: &CardAction) -> Result<Value, SubmitError> {
        if action.kind != ActionKind::Submit {
            return Err(SubmitError::NotSubmitAction(action.describe()));
        }

        let mut payload = match &action.data {
            Some(Value::Object(data)) => data.clone(),
            Some(other) => {
                let mut payload = Map::new();
                payload.insert("data".to_string(), other.clone());
                payload
            }
            None => Map::new(),
        };
        if action.associated_inputs == AssociatedInputs::Auto {
            let errors = self.inputs.validate_all();
            if !errors.is_empty() {
                return Err(SubmitError::Validation(errors));
            }
            payload.extend(self.inputs.values());
        }
        Ok(Value::Object(payload))
    }
}

/// Renders cards against one host configuration and renderer registry.
///
/// Cheap to clone; clones share the registry and host config.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    registry: Arc<ElementRendererRegistry>,
    host_config: Arc<HostConfig>,
    card_config: Option<CardConfig>,
}

impl CardRenderer {
    /// A renderer using the built-in element renderers.
    pub fn new(host_config: HostConfig) -> Self {
        Self::with_registry(
            Arc::new(ElementRendererRegistry::with_builtin_renderers()),
            Arc::new(host_config),
        )
    }

    pub fn with_registry(
        registry: Arc<ElementRendererRegistry>,
        host_config: Arc<HostConfig>,
    ) -> Self {
        Self {
            registry,
            host_config,
            card_config: None,
        }
    }

    /// Overrides the card settings otherwise taken from the host config.
    pub fn with_card_config(mut self, card_config: CardConfig) -> Self {
        self.card_config = Some(card_config);
        self
    }

    pub fn host_config(&self) -> &HostConfig {
        &self.host_config
    }

    pub fn registry(&self) -> &ElementRendererRegistry {
        &self.registry
    }

    /// Renders `card`. Never fails; every degradation is a warning.
    pub fn render(&self, card: &AdaptiveCard) -> RenderedCard {
        let span = tracing::debug_span!("render_card", elements = card.body.len());
        let _entered = span.enter();

        let host_config = self.host_config.as_ref();
        let card_config = self
            .card_config
            .unwrap_or_else(|| CardConfig::from(&host_config.adaptive_card));
        let mut context = RenderContext::with_card_config(host_config, card_config);

        let style = card
            .style
            .as_deref()
            .and_then(ContainerStyle::parse)
            .filter(|_| card_config.allow_custom_style())
            .unwrap_or_default();
        let background = card_config
            .allow_custom_style()
            .then(|| host_config.background_for(style).to_string());

        let mut root = UiElement::new(UiKind::Panel {
            orientation: Orientation::Vertical,
            background,
        })
        .with_style_key("Adaptive.Card");
        root.children = TreeWalker::new(&self.registry).render_body(&card.body, &mut context, style);

        if !card.actions.is_empty() && ensure_interactive(&mut context, "Card actions") {
            let mut actions = render_actions(&card.actions, &mut context);
            if !actions.children.is_empty() {
                if !root.children.is_empty() {
                    actions.margin_top = host_config.spacing_for(Spacing::Default);
                }
                root.children.push(actions);
            }
        }

        let (warnings, inputs) = context.into_parts();
        tracing::debug!(
            warnings = warnings.len(),
            inputs = inputs.len(),
            "card rendered"
        );
        RenderedCard {
            root,
            warnings,
            inputs,
        }
    }
}

/// Renders `card` with the built-in renderers and `host_config`.
pub fn render_card(card: &AdaptiveCard, host_config: &HostConfig) -> RenderedCard {
    CardRenderer::new(host_config.clone()).render(card)
}
