use crate::element::{CardElement, ElementType};
use crate::host_config::ContainerStyle;
use crate::ui::ColumnWidth;

/// Per-node parameters derived while descending the tree.
///
/// Never mutated in place: each child gets its own value from [`RenderArgs::for_child`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderArgs {
    path: String,
    parent_type: Option<ElementType>,
    container_style: ContainerStyle,
    ancestor_has_fallback: bool,
    ancestor_has_stretch: bool,
    restricted_width: bool,
    depth: usize,
}

impl RenderArgs {
    /// Args for a top-level body element at `index`.
    pub fn root(index: usize, container_style: ContainerStyle) -> Self {
        Self {
            path: format!("body[{index}]"),
            parent_type: None,
            container_style,
            ancestor_has_fallback: false,
            ancestor_has_stretch: false,
            restricted_width: false,
            depth: 0,
        }
    }

    /// Args for the `index`-th child of `parent`, which was rendered with `self`.
    pub fn for_child(&self, parent: &CardElement, index: usize) -> Self {
        let container_style = parent
            .str_prop("style")
            .and_then(ContainerStyle::parse)
            .filter(|_| matches!(parent.element_type, ElementType::Container | ElementType::Column))
            .unwrap_or(self.container_style);
        let restricts = match parent.element_type {
            ElementType::Column => parent
                .property("width")
                .and_then(ColumnWidth::parse)
                .is_some_and(|width| width.restricts_width()),
            _ => false,
        };
        Self {
            path: format!("{}.{}[{index}]", self.path, parent.element_type.children_key()),
            parent_type: Some(parent.element_type.clone()),
            container_style,
            ancestor_has_fallback: self.ancestor_has_fallback || parent.fallback.is_declared(),
            ancestor_has_stretch: self.ancestor_has_stretch
                || parent.str_prop("height") == Some("stretch"),
            restricted_width: self.restricted_width || restricts,
            depth: self.depth + 1,
        }
    }

    /// Args for the fallback content that replaces the node rendered with `self`.
    pub fn for_fallback(&self) -> Self {
        Self {
            path: format!("{}.fallback", self.path),
            ..self.clone()
        }
    }

    /// Stable identity of the element within the card, e.g. `body[1].items[0]`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parent_type(&self) -> Option<&ElementType> {
        self.parent_type.as_ref()
    }

    pub fn container_style(&self) -> ContainerStyle {
        self.container_style
    }

    pub fn ancestor_has_fallback(&self) -> bool {
        self.ancestor_has_fallback
    }

    pub fn ancestor_has_stretch(&self) -> bool {
        self.ancestor_has_stretch
    }

    /// True inside a column whose width is sized to content or fixed pixels.
    pub fn restricted_width(&self) -> bool {
        self.restricted_width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}
