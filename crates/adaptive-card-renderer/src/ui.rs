//! Abstract native UI tree produced by the renderers.
//!
//! The concrete widget toolkit lives outside this crate; hosts map each
//! [`UiKind`] to a widget and resolve `style_key` against their own resource
//! dictionary. Interactive state is held behind shared handles so the input
//! collection and the tree observe the same control.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, Value, json};

use crate::datetime::{format_date, format_time};
use crate::element::CardAction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
    Stretch,
}

impl HorizontalAlignment {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "stretch" => Some(Self::Stretch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
    Stretch,
}

impl VerticalAlignment {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "top" => Some(Self::Top),
            "center" => Some(Self::Center),
            "bottom" => Some(Self::Bottom),
            "stretch" => Some(Self::Stretch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnWidth {
    Auto,
    #[default]
    Stretch,
    Weighted(u32),
    Pixels(u32),
}

impl ColumnWidth {
    /// Accepts `auto`, `stretch`, `"50px"`, a bare number (weight) or `"2"`.
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number
                .as_u64()
                .and_then(|weight| u32::try_from(weight).ok())
                .map(Self::Weighted),
            Value::String(text) => {
                let text = text.trim().to_ascii_lowercase();
                match text.as_str() {
                    "auto" => Some(Self::Auto),
                    "stretch" => Some(Self::Stretch),
                    _ => match text.strip_suffix("px") {
                        Some(pixels) => pixels.trim().parse().ok().map(Self::Pixels),
                        None => text.parse().ok().map(Self::Weighted),
                    },
                }
            }
            _ => None,
        }
    }

    pub fn restricts_width(&self) -> bool {
        !matches!(self, Self::Stretch | Self::Weighted(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub title: String,
    pub value: String,
}

/// What kind of interactive widget a control is.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    TextBox {
        multiline: bool,
        max_length: Option<usize>,
        placeholder: Option<String>,
    },
    NumberBox {
        min: Option<f64>,
        max: Option<f64>,
        placeholder: Option<String>,
    },
    DatePicker {
        min: Option<NaiveDate>,
        max: Option<NaiveDate>,
    },
    TimePicker,
    ToggleSwitch {
        title: String,
    },
    ComboBox {
        choices: Vec<Choice>,
        placeholder: Option<String>,
    },
    ChoiceList {
        choices: Vec<Choice>,
        multi_select: bool,
    },
}

/// Current value held by a control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlValue {
    Text(String),
    Number(Option<f64>),
    Date(Option<NaiveDate>),
    Time(Option<NaiveTime>),
    Toggle(bool),
    Selection(Vec<String>),
}

impl ControlValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Number(number) => number.is_none(),
            Self::Date(date) => date.is_none(),
            Self::Time(time) => time.is_none(),
            Self::Toggle(_) => false,
            Self::Selection(values) => values.is_empty(),
        }
    }

    fn describe(&self) -> Value {
        match self {
            Self::Text(text) => json!(text),
            Self::Number(number) => json!(number),
            Self::Date(date) => json!(date.map(format_date)),
            Self::Time(time) => json!(time.map(format_time)),
            Self::Toggle(on) => json!(on),
            Self::Selection(values) => json!(values),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct ControlState {
    pub kind: ControlKind,
    pub value: ControlValue,
}

/// Shared handle to an interactive control.
#[derive(Debug, Clone, PartialEq)]
pub struct Control(Rc<RefCell<ControlState>>);

impl Control {
    pub fn new(kind: ControlKind, value: ControlValue) -> Self {
        Self(Rc::new(RefCell::new(ControlState { kind, value })))
    }

    pub fn kind(&self) -> ControlKind {
        self.0.borrow().kind.clone()
    }

    pub fn value(&self) -> ControlValue {
        self.0.borrow().value.clone()
    }

    /// Replaces the value, as a user edit would.
    pub fn set_value(&self, value: ControlValue) {
        self.0.borrow_mut().value = value;
    }

    pub fn ptr_eq(&self, other: &Control) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared visibility flag for an input's validation affordances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationIndicator(Rc<Cell<bool>>);

impl ValidationIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_error_visible(&self) -> bool {
        self.0.get()
    }

    pub fn set_error_visible(&self, visible: bool) {
        self.0.set(visible);
    }

    pub fn ptr_eq(&self, other: &ValidationIndicator) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiKind {
    TextBlock {
        text: String,
        font_size: u32,
        bold: bool,
        wrap: bool,
    },
    Image {
        url: String,
        width: Option<u32>,
    },
    Panel {
        orientation: Orientation,
        background: Option<String>,
    },
    Column {
        width: ColumnWidth,
    },
    Button {
        title: String,
        action: CardAction,
    },
    Control(Control),
    /// Border around an input; highlighted while its indicator is set.
    ValidationBorder(ValidationIndicator),
    /// Message shown only while its indicator is set.
    ErrorMessage {
        text: String,
        indicator: ValidationIndicator,
    },
}

impl UiKind {
    fn name(&self) -> &'static str {
        match self {
            Self::TextBlock { .. } => "TextBlock",
            Self::Image { .. } => "Image",
            Self::Panel { .. } => "Panel",
            Self::Column { .. } => "Column",
            Self::Button { .. } => "Button",
            Self::Control(_) => "Control",
            Self::ValidationBorder(_) => "ValidationBorder",
            Self::ErrorMessage { .. } => "ErrorMessage",
        }
    }
}

/// One node of the rendered UI tree. Parents own their children.
#[derive(Debug, Clone, PartialEq)]
pub struct UiElement {
    pub kind: UiKind,
    pub style_key: Option<String>,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    pub margin_top: u32,
    pub separator: bool,
    pub visible: bool,
    pub children: Vec<UiElement>,
}

impl UiElement {
    pub fn new(kind: UiKind) -> Self {
        Self {
            kind,
            style_key: None,
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            margin_top: 0,
            separator: false,
            visible: true,
            children: Vec::new(),
        }
    }

    pub fn panel(orientation: Orientation) -> Self {
        Self::new(UiKind::Panel {
            orientation,
            background: None,
        })
    }

    pub fn control(control: Control) -> Self {
        Self::new(UiKind::Control(control))
    }

    pub fn with_style_key(mut self, key: impl Into<String>) -> Self {
        self.style_key = Some(key.into());
        self
    }

    pub fn with_alignment(
        mut self,
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
    ) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    pub fn with_child(mut self, child: UiElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn as_control(&self) -> Option<&Control> {
        match &self.kind {
            UiKind::Control(control) => Some(control),
            _ => None,
        }
    }

    /// Depth-first list of every control in the subtree.
    pub fn controls(&self) -> Vec<Control> {
        let mut out = Vec::new();
        self.collect_controls(&mut out);
        out
    }

    fn collect_controls(&self, out: &mut Vec<Control>) {
        if let UiKind::Control(control) = &self.kind {
            out.push(control.clone());
        }
        for child in &self.children {
            child.collect_controls(out);
        }
    }

    /// Number of nodes in the subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(UiElement::node_count).sum::<usize>()
    }

    /// JSON outline of the subtree for diagnostics.
    pub fn outline(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("kind".into(), json!(self.kind.name()));
        if let Some(style) = &self.style_key {
            fields.insert("style".into(), json!(style));
        }
        if !self.visible {
            fields.insert("visible".into(), json!(false));
        }
        match &self.kind {
            UiKind::TextBlock { text, .. } => {
                fields.insert("text".into(), json!(text));
            }
            UiKind::Image { url, .. } => {
                fields.insert("url".into(), json!(url));
            }
            UiKind::Button { title, .. } => {
                fields.insert("title".into(), json!(title));
            }
            UiKind::Control(control) => {
                fields.insert("value".into(), control.value().describe());
            }
            UiKind::ErrorMessage { text, indicator } => {
                fields.insert("text".into(), json!(text));
                fields.insert("shown".into(), json!(indicator.is_error_visible()));
            }
            UiKind::ValidationBorder(indicator) => {
                fields.insert("error".into(), json!(indicator.is_error_visible()));
            }
            UiKind::Panel { .. } | UiKind::Column { .. } => {}
        }
        if !self.children.is_empty() {
            let children: Vec<Value> = self.children.iter().map(UiElement::outline).collect();
            fields.insert("children".into(), Value::Array(children));
        }
        Value::Object(fields)
    }
}
