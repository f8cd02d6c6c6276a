use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::args::RenderArgs;
use crate::context::RenderContext;
use crate::element::{CardElement, ElementType};
use crate::errors::RenderError;
use crate::input_value::InputValue;
use crate::renderers;
use crate::ui::UiElement;

/// A rendered input control and the value binding the walker registers for it.
#[derive(Debug)]
pub struct RenderedInput {
    pub control: UiElement,
    pub value: Rc<dyn InputValue>,
}

/// Outcome of a renderer for one element.
#[derive(Debug)]
pub enum Rendered {
    Element(UiElement),
    Input(RenderedInput),
    /// Nothing to show; the renderer has already recorded why.
    Omitted,
}

/// Renders one element type.
///
/// Degraded input should be reported with [`RenderContext::add_warning`] and
/// [`Rendered::Omitted`]; `Err` is reserved for failures the renderer did not
/// anticipate.
pub trait ElementRenderer: Send + Sync {
    fn render(
        &self,
        element: &CardElement,
        context: &mut RenderContext<'_>,
        args: &RenderArgs,
    ) -> Result<Rendered, RenderError>;
}

/// Maps element type tags to renderers. Last registration wins.
#[derive(Clone, Default)]
pub struct ElementRendererRegistry {
    renderers: HashMap<ElementType, Arc<dyn ElementRenderer>>,
}

impl ElementRendererRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in renderers for every known tag.
    pub fn with_builtin_renderers() -> Self {
        let mut registry = Self::new();
        registry.register(ElementType::TextBlock, renderers::TextBlockRenderer);
        registry.register(ElementType::Image, renderers::ImageRenderer);
        registry.register(ElementType::Container, renderers::ContainerRenderer);
        registry.register(ElementType::ColumnSet, renderers::ColumnSetRenderer);
        registry.register(ElementType::Column, renderers::ColumnRenderer);
        registry.register(ElementType::ActionSet, renderers::ActionSetRenderer);
        registry.register(ElementType::TextInput, renderers::TextInputRenderer);
        registry.register(ElementType::NumberInput, renderers::NumberInputRenderer);
        registry.register(ElementType::DateInput, renderers::DateInputRenderer);
        registry.register(ElementType::TimeInput, renderers::TimeInputRenderer);
        registry.register(ElementType::ToggleInput, renderers::ToggleInputRenderer);
        registry.register(ElementType::ChoiceSetInput, renderers::ChoiceSetInputRenderer);
        registry
    }

    /// Installs `renderer` for `element_type`, returning the one it replaces.
    pub fn register(
        &mut self,
        element_type: ElementType,
        renderer: impl ElementRenderer + 'static,
    ) -> Option<Arc<dyn ElementRenderer>> {
        self.register_shared(element_type, Arc::new(renderer))
    }

    pub fn register_shared(
        &mut self,
        element_type: ElementType,
        renderer: Arc<dyn ElementRenderer>,
    ) -> Option<Arc<dyn ElementRenderer>> {
        self.renderers.insert(element_type, renderer)
    }

    pub fn remove(&mut self, element_type: &ElementType) -> Option<Arc<dyn ElementRenderer>> {
        self.renderers.remove(element_type)
    }

    pub fn lookup(&self, element_type: &ElementType) -> Option<Arc<dyn ElementRenderer>> {
        self.renderers.get(element_type).cloned()
    }

    pub fn contains(&self, element_type: &ElementType) -> bool {
        self.renderers.contains_key(element_type)
    }

    /// Registered tags in sorted order.
    pub fn registered_types(&self) -> Vec<ElementType> {
        let mut types: Vec<ElementType> = self.renderers.keys().cloned().collect();
        types.sort();
        types
    }
}

impl fmt::Debug for ElementRendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRendererRegistry")
            .field("types", &self.registered_types())
            .finish()
    }
}
