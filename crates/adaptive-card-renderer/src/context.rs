use std::rc::Rc;

use crate::args::RenderArgs;
use crate::card_config::CardConfig;
use crate::element::ElementType;
use crate::errors::RenderError;
use crate::host_config::HostConfig;
use crate::input_value::{InputCollection, InputValue};
use crate::warning::{RenderWarning, WarningStatusCode};

/// An element currently being rendered, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub element_type: ElementType,
    pub path: String,
}

/// Mutable state of one render pass.
///
/// Created by the top-level render call and passed by `&mut` down the
/// recursion. Warnings and input registrations are append-only.
#[derive(Debug)]
pub struct RenderContext<'a> {
    host_config: &'a HostConfig,
    card_config: CardConfig,
    warnings: Vec<RenderWarning>,
    inputs: InputCollection,
    ancestors: Vec<Ancestor>,
}

impl<'a> RenderContext<'a> {
    pub fn new(host_config: &'a HostConfig) -> Self {
        Self::with_card_config(host_config, CardConfig::from(&host_config.adaptive_card))
    }

    pub fn with_card_config(host_config: &'a HostConfig, card_config: CardConfig) -> Self {
        Self {
            host_config,
            card_config,
            warnings: Vec::new(),
            inputs: InputCollection::default(),
            ancestors: Vec::new(),
        }
    }

    pub fn host_config(&self) -> &'a HostConfig {
        self.host_config
    }

    pub fn card_config(&self) -> &CardConfig {
        &self.card_config
    }

    /// Records a warning against the element currently being rendered.
    pub fn add_warning(&mut self, code: WarningStatusCode, message: impl Into<String>) {
        let mut warning = RenderWarning::new(code, message);
        warning.path = self.ancestors.last().map(|ancestor| ancestor.path.clone());
        tracing::debug!(%warning, "render warning");
        self.warnings.push(warning);
    }

    /// Registers an input under the element path carried by `args`.
    pub fn add_input_value(
        &mut self,
        value: Rc<dyn InputValue>,
        args: &RenderArgs,
    ) -> Result<(), RenderError> {
        let key = args.path();
        if self.inputs.contains_key(key) {
            return Err(RenderError::DuplicateInput(key.to_string()));
        }
        if self.inputs.contains_id(value.input_id()) {
            let message = format!(
                "input id `{}` is used by more than one input; the last one wins",
                value.input_id()
            );
            self.add_warning(WarningStatusCode::InvalidValue, message);
        }
        self.inputs.push(key.to_string(), value);
        Ok(())
    }

    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }

    pub fn inputs(&self) -> &InputCollection {
        &self.inputs
    }

    /// Elements enclosing the current node, outermost first.
    pub fn ancestors(&self) -> &[Ancestor] {
        &self.ancestors
    }

    pub(crate) fn push_ancestor(&mut self, element_type: ElementType, path: &str) {
        self.ancestors.push(Ancestor {
            element_type,
            path: path.to_string(),
        });
    }

    pub(crate) fn pop_ancestor(&mut self) {
        self.ancestors.pop();
    }

    /// Forgets inputs registered by a subtree that is being replaced.
    pub(crate) fn truncate_inputs(&mut self, len: usize) {
        if self.inputs.len() > len {
            tracing::debug!(
                discarded = self.inputs.len() - len,
                "dropping inputs of replaced subtree"
            );
        }
        self.inputs.truncate(len);
    }

    pub(crate) fn into_parts(self) -> (Vec<RenderWarning>, InputCollection) {
        (self.warnings, self.inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::CardElement;
    use crate::host_config::ContainerStyle;
    use crate::input_value::{InputBinding, TimeInputValue};
    use crate::ui::{Control, ControlKind, ControlValue};

    fn time_input(element: &CardElement, args: &RenderArgs) -> Rc<dyn InputValue> {
        let control = Control::new(ControlKind::TimePicker, ControlValue::Time(None));
        Rc::new(TimeInputValue::new(InputBinding::new(element, control, args)))
    }

    #[test]
    fn warnings_keep_order_and_duplicates() {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        context.add_warning(WarningStatusCode::InvalidValue, "first");
        context.push_ancestor(ElementType::Image, "body[3]");
        context.add_warning(WarningStatusCode::InvalidValue, "first");
        context.pop_ancestor();

        let warnings = context.warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].path, None);
        assert_eq!(warnings[1].path.as_deref(), Some("body[3]"));
        assert!(context.ancestors().is_empty());
    }

    #[test]
    fn same_path_cannot_register_twice() {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        let args = RenderArgs::root(0, ContainerStyle::Default);
        let element = CardElement::new(ElementType::TimeInput).with_id("t");

        context
            .add_input_value(time_input(&element, &args), &args)
            .expect("first registration");
        let err = context
            .add_input_value(time_input(&element, &args), &args)
            .unwrap_err();
        assert!(matches!(err, RenderError::DuplicateInput(key) if key == "body[0]"));
        assert_eq!(context.inputs().len(), 1);
    }

    #[test]
    fn duplicate_ids_register_with_warning() {
        let config = HostConfig::default();
        let mut context = RenderContext::new(&config);
        let element = CardElement::new(ElementType::TimeInput).with_id("t");
        for index in 0..2 {
            let args = RenderArgs::root(index, ContainerStyle::Default);
            context
                .add_input_value(time_input(&element, &args), &args)
                .expect("registration");
        }
        assert_eq!(context.inputs().len(), 2);
        assert_eq!(context.warnings().len(), 1);
        assert_eq!(context.warnings()[0].code, WarningStatusCode::InvalidValue);
    }

    #[test]
    fn card_config_copies_host_settings() {
        let mut config = HostConfig::default();
        config.adaptive_card.allow_custom_style = true;
        let context = RenderContext::new(&config);
        assert!(context.card_config().allow_custom_style());
    }
}
