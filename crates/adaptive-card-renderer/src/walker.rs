//! Recursive walk over the card body.
//!
//! The walker owns dispatch: it looks each element up in the registry, calls
//! the renderer, wraps inputs with their label and validation affordances,
//! registers input values and recurses into children. Renderer failures stop
//! at the node that raised them.

use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::{CardElement, Fallback};
use crate::host_config::{ContainerStyle, Spacing, TextSize};
use crate::registry::{ElementRendererRegistry, Rendered, RenderedInput};
use crate::ui::{HorizontalAlignment, Orientation, UiElement, UiKind, VerticalAlignment};
use crate::warning::WarningStatusCode;

/// What became of one element.
#[derive(Debug)]
enum NodeOutcome {
    Rendered(UiElement),
    Skipped,
    /// The element could not be rendered and an ancestor declares a fallback.
    FallbackNeeded,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeWalker<'r> {
    registry: &'r ElementRendererRegistry,
}

impl<'r> TreeWalker<'r> {
    pub(crate) fn new(registry: &'r ElementRendererRegistry) -> Self {
        Self { registry }
    }

    /// Renders the top-level body elements in order.
    pub(crate) fn render_body(
        &self,
        body: &[CardElement],
        context: &mut RenderContext<'_>,
        style: ContainerStyle,
    ) -> Vec<UiElement> {
        let mut rendered = Vec::with_capacity(body.len());
        for (index, element) in body.iter().enumerate() {
            let args = RenderArgs::root(index, style);
            // Top-level elements have no ancestor to fall back to.
            if let NodeOutcome::Rendered(ui) = self.render_element(element, context, &args) {
                rendered.push(decorate(ui, element, context, rendered.is_empty()));
            }
        }
        rendered
    }

    /// Renders `element`, substituting its fallback if it cannot be rendered.
    fn render_element(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> NodeOutcome {
        context.push_ancestor(element.element_type.clone(), args.path());
        let registered = context.inputs().len();
        let outcome = match self.render_node(element, context, args) {
            NodeOutcome::FallbackNeeded => {
                // Nothing under this node is shown, so its inputs must not submit.
                context.truncate_inputs(registered);
                self.perform_fallback(element, context, args)
            }
            outcome => outcome,
        };
        context.pop_ancestor();
        outcome
    }

    fn perform_fallback(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> NodeOutcome {
        match &element.fallback {
            Fallback::Element(replacement) => {
                context.add_warning(
                    WarningStatusCode::PerformingFallback,
                    format!(
                        "Performing fallback for element of type {} with {}",
                        element.element_type, replacement.element_type
                    ),
                );
                self.render_element(replacement, context, &args.for_fallback())
            }
            Fallback::Drop => {
                context.add_warning(
                    WarningStatusCode::PerformingFallback,
                    format!("Dropping element of type {}", element.element_type),
                );
                NodeOutcome::Skipped
            }
            Fallback::None if args.ancestor_has_fallback() => NodeOutcome::FallbackNeeded,
            Fallback::None => NodeOutcome::Skipped,
        }
    }

    fn render_node(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> NodeOutcome {
        let span = tracing::trace_span!(
            "render_element",
            element_type = %element.element_type,
            path = args.path(),
        );
        let _entered = span.enter();

        let Some(renderer) = self.registry.lookup(&element.element_type) else {
            context.add_warning(
                WarningStatusCode::UnsupportedElementType,
                format!("Unknown element type {}", element.element_type),
            );
            return NodeOutcome::FallbackNeeded;
        };

        let rendered = match renderer.render(element, context, args) {
            Ok(rendered) => rendered,
            Err(err) => {
                tracing::warn!(path = args.path(), error = %err, "renderer failed");
                context.add_warning(
                    WarningStatusCode::RendererFailure,
                    format!("{} could not be rendered: {err}", element.element_type),
                );
                return NodeOutcome::Skipped;
            }
        };

        match rendered {
            Rendered::Omitted => NodeOutcome::Skipped,
            Rendered::Input(input) => self.render_input(element, input, context, args),
            Rendered::Element(mut ui) => {
                let Some(children) = self.render_children(element, context, args) else {
                    return NodeOutcome::FallbackNeeded;
                };
                ui.children.extend(children);
                NodeOutcome::Rendered(ui)
            }
        }
    }

    /// Returns `None` when a child needs an ancestor's fallback.
    fn render_children(
        &self,
        parent: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Option<Vec<UiElement>> {
        let mut rendered = Vec::with_capacity(parent.children.len());
        for (index, child) in parent.children.iter().enumerate() {
            let child_args = args.for_child(parent, index);
            match self.render_element(child, context, &child_args) {
                NodeOutcome::Rendered(ui) => {
                    rendered.push(decorate(ui, child, context, rendered.is_empty()));
                }
                NodeOutcome::Skipped => {}
                NodeOutcome::FallbackNeeded => return None,
            }
        }
        Some(rendered)
    }

    fn render_input(
        &self,
        element: &CardElement,
        input: RenderedInput,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> NodeOutcome {
        let RenderedInput { control, value } = input;
        if let Err(err) = context.add_input_value(value.clone(), args) {
            tracing::warn!(path = args.path(), error = %err, "input registration failed");
            context.add_warning(WarningStatusCode::RendererFailure, err.to_string());
            return NodeOutcome::Skipped;
        }

        let host_config = context.host_config();
        let indicator = value.validation_indicator();
        let mut field = if value.has_validation_constraints() {
            UiElement::new(UiKind::ValidationBorder(indicator.clone()))
                .with_style_key("Adaptive.Input.ValidationBorder")
                .with_alignment(HorizontalAlignment::Stretch, VerticalAlignment::Top)
                .with_child(control)
        } else {
            control
        };

        let label = element.label();
        let error_message = element.error_message();
        if label.is_none() && error_message.is_none() {
            return NodeOutcome::Rendered(field);
        }

        let mut wrapper = UiElement::panel(Orientation::Vertical)
            .with_style_key("Adaptive.Input.Container")
            .with_alignment(HorizontalAlignment::Stretch, VerticalAlignment::Top);
        if let Some(label) = label {
            let label_config = &host_config.inputs.label;
            let text = if element.is_required() {
                format!("{label} {}", label_config.required_suffix)
            } else {
                label.to_string()
            };
            wrapper.children.push(
                UiElement::new(UiKind::TextBlock {
                    text,
                    font_size: host_config.font_size_for(TextSize::Default),
                    bold: false,
                    wrap: true,
                })
                .with_style_key("Adaptive.Input.Label"),
            );
            field.margin_top = host_config.spacing_for(label_config.input_spacing);
        }
        wrapper.children.push(field);
        if let Some(message) = error_message {
            let mut error = UiElement::new(UiKind::ErrorMessage {
                text: message.to_string(),
                indicator: indicator.clone(),
            })
            .with_style_key("Adaptive.Input.ErrorMessage");
            error.margin_top = host_config.spacing_for(host_config.inputs.error_message.spacing);
            wrapper.children.push(error);
        }
        NodeOutcome::Rendered(wrapper)
    }
}

/// Applies the properties every element shares: spacing, separator,
/// visibility and stretch height.
fn decorate(
    mut ui: UiElement,
    element: &CardElement,
    context: &RenderContext<'_>,
    is_first: bool,
) -> UiElement {
    if !is_first {
        let spacing = element
            .str_prop("spacing")
            .and_then(Spacing::parse)
            .unwrap_or_default();
        ui.margin_top = context.host_config().spacing_for(spacing);
        ui.separator = element.bool_prop("separator").unwrap_or(false);
    }
    if !element.is_visible() {
        ui.visible = false;
    }
    if element.str_prop("height") == Some("stretch") {
        ui.vertical_alignment = VerticalAlignment::Stretch;
    }
    ui
}
