//! Card element tree.
//!
//! Elements are read-only during rendering. The JSON conversion here is a thin
//! structural walk over an Adaptive Card v1.x body: it separates the `type`,
//! `id`, child arrays and `fallback` from the element-specific properties and
//! leaves everything else to the renderers.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ElementError;

/// Element type tag used to dispatch to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    TextBlock,
    Image,
    Container,
    ColumnSet,
    Column,
    ActionSet,
    TextInput,
    NumberInput,
    DateInput,
    TimeInput,
    ToggleInput,
    ChoiceSetInput,
    /// Any tag without a built-in meaning; hosts may register renderers for it.
    Custom(String),
}

impl ElementType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "TextBlock" => Self::TextBlock,
            "Image" => Self::Image,
            "Container" => Self::Container,
            "ColumnSet" => Self::ColumnSet,
            "Column" => Self::Column,
            "ActionSet" => Self::ActionSet,
            "Input.Text" => Self::TextInput,
            "Input.Number" => Self::NumberInput,
            "Input.Date" => Self::DateInput,
            "Input.Time" => Self::TimeInput,
            "Input.Toggle" => Self::ToggleInput,
            "Input.ChoiceSet" => Self::ChoiceSetInput,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::TextBlock => "TextBlock",
            Self::Image => "Image",
            Self::Container => "Container",
            Self::ColumnSet => "ColumnSet",
            Self::Column => "Column",
            Self::ActionSet => "ActionSet",
            Self::TextInput => "Input.Text",
            Self::NumberInput => "Input.Number",
            Self::DateInput => "Input.Date",
            Self::TimeInput => "Input.Time",
            Self::ToggleInput => "Input.Toggle",
            Self::ChoiceSetInput => "Input.ChoiceSet",
            Self::Custom(tag) => tag,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::TextInput
                | Self::NumberInput
                | Self::DateInput
                | Self::TimeInput
                | Self::ToggleInput
                | Self::ChoiceSetInput
        )
    }

    /// Name of the JSON array holding this element's children.
    pub fn children_key(&self) -> &'static str {
        match self {
            Self::ColumnSet => "columns",
            _ => "items",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ElementType {
    fn from(value: String) -> Self {
        ElementType::parse(&value)
    }
}

impl From<&str> for ElementType {
    fn from(value: &str) -> Self {
        ElementType::parse(value)
    }
}

impl From<ElementType> for String {
    fn from(value: ElementType) -> Self {
        value.as_str().to_string()
    }
}

/// What to render when an element's type has no renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Fallback {
    #[default]
    None,
    Drop,
    Element(Box<CardElement>),
}

impl Fallback {
    pub fn is_declared(&self) -> bool {
        !matches!(self, Fallback::None)
    }
}

/// One node of the card document.
#[derive(Debug, Clone, PartialEq)]
pub struct CardElement {
    pub element_type: ElementType,
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub children: Vec<CardElement>,
    pub fallback: Fallback,
}

impl CardElement {
    pub fn new(element_type: impl Into<ElementType>) -> Self {
        Self {
            element_type: element_type.into(),
            id: None,
            properties: Map::new(),
            children: Vec::new(),
            fallback: Fallback::None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn with_child(mut self, child: CardElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// String property; empty strings are treated as absent.
    pub fn str_prop(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn bool_prop(&self, key: &str) -> Option<bool> {
        self.properties.get(key).and_then(Value::as_bool)
    }

    pub fn f64_prop(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(Value::as_f64)
    }

    pub fn u64_prop(&self, key: &str) -> Option<u64> {
        self.properties.get(key).and_then(Value::as_u64)
    }

    pub fn is_required(&self) -> bool {
        self.bool_prop("isRequired").unwrap_or(false)
    }

    pub fn label(&self) -> Option<&str> {
        self.str_prop("label")
    }

    pub fn error_message(&self) -> Option<&str> {
        self.str_prop("errorMessage")
    }

    pub fn is_visible(&self) -> bool {
        self.bool_prop("isVisible").unwrap_or(true)
    }

    /// Builds an element from its JSON form.
    pub fn from_value(value: &Value) -> Result<Self, ElementError> {
        element_from_value(value, "$")
    }
}

fn element_from_value(value: &Value, path: &str) -> Result<CardElement, ElementError> {
    let object = value.as_object().ok_or_else(|| ElementError::NotAnObject {
        path: path.to_string(),
    })?;
    let element_type = object
        .get("type")
        .and_then(Value::as_str)
        .map(ElementType::parse)
        .ok_or_else(|| ElementError::MissingType {
            path: path.to_string(),
        })?;
    let children_key = element_type.children_key();

    let mut element = CardElement::new(element_type);
    for (key, field) in object {
        match key.as_str() {
            "type" => {}
            "id" => element.id = field.as_str().map(str::to_owned),
            "fallback" => {
                element.fallback = match field {
                    Value::String(mode) if mode == "drop" => Fallback::Drop,
                    Value::Object(_) => Fallback::Element(Box::new(element_from_value(
                        field,
                        &format!("{path}.fallback"),
                    )?)),
                    _ => Fallback::None,
                };
            }
            key if key == children_key && accepts_children(&element.element_type) => {
                let items = field.as_array().ok_or_else(|| ElementError::NotAnArray {
                    path: path.to_string(),
                    field: key.to_string(),
                })?;
                element.children = elements_from_array(items, &format!("{path}.{key}"))?;
            }
            _ => {
                element.properties.insert(key.clone(), field.clone());
            }
        }
    }
    Ok(element)
}

fn accepts_children(element_type: &ElementType) -> bool {
    matches!(
        element_type,
        ElementType::Container | ElementType::ColumnSet | ElementType::Column | ElementType::Custom(_)
    )
}

fn elements_from_array(items: &[Value], path: &str) -> Result<Vec<CardElement>, ElementError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| element_from_value(item, &format!("{path}[{index}]")))
        .collect()
}

/// Which inputs a submit action gathers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssociatedInputs {
    #[default]
    Auto,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    Submit,
    OpenUrl,
    Custom(String),
}

impl ActionKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "Action.Submit" => Self::Submit,
            "Action.OpenUrl" => Self::OpenUrl,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Submit => "Action.Submit",
            Self::OpenUrl => "Action.OpenUrl",
            Self::Custom(tag) => tag,
        }
    }
}

/// A card or action-set action.
#[derive(Debug, Clone, PartialEq)]
pub struct CardAction {
    pub kind: ActionKind,
    pub id: Option<String>,
    pub title: String,
    pub url: Option<String>,
    pub data: Option<Value>,
    pub associated_inputs: AssociatedInputs,
}

impl CardAction {
    pub fn submit(title: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Submit,
            id: None,
            title: title.into(),
            url: None,
            data: None,
            associated_inputs: AssociatedInputs::Auto,
        }
    }

    pub fn open_url(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::OpenUrl,
            url: Some(url.into()),
            ..Self::submit(title)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Display name used in warnings.
    pub fn describe(&self) -> String {
        match (&self.id, self.title.is_empty()) {
            (Some(id), _) => id.clone(),
            (None, false) => self.title.clone(),
            (None, true) => self.kind.as_str().to_string(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, ElementError> {
        action_from_value(value, "$")
    }
}

fn action_from_value(value: &Value, path: &str) -> Result<CardAction, ElementError> {
    let object = value.as_object().ok_or_else(|| ElementError::NotAnObject {
        path: path.to_string(),
    })?;
    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .map(ActionKind::parse)
        .ok_or_else(|| ElementError::MissingType {
            path: path.to_string(),
        })?;
    let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_owned);
    let associated_inputs = match object.get("associatedInputs").and_then(Value::as_str) {
        Some(mode) if mode.eq_ignore_ascii_case("none") => AssociatedInputs::None,
        _ => AssociatedInputs::Auto,
    };
    Ok(CardAction {
        kind,
        id: text("id"),
        title: text("title").unwrap_or_default(),
        url: text("url"),
        data: object.get("data").cloned(),
        associated_inputs,
    })
}

/// Parses the `actions` array of an element (used by action sets).
pub fn actions_from_value(value: Option<&Value>) -> Result<Vec<CardAction>, ElementError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let items = value.as_array().ok_or_else(|| ElementError::NotAnArray {
        path: "$".to_string(),
        field: "actions".to_string(),
    })?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| action_from_value(item, &format!("$.actions[{index}]")))
        .collect()
}

/// Root of a card document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdaptiveCard {
    pub version: Option<String>,
    pub style: Option<String>,
    pub body: Vec<CardElement>,
    pub actions: Vec<CardAction>,
}

impl AdaptiveCard {
    pub fn new(body: Vec<CardElement>) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: CardAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ElementError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, ElementError> {
        let object = value.as_object().ok_or_else(|| ElementError::NotAnObject {
            path: "$".to_string(),
        })?;
        let body = match object.get("body") {
            Some(Value::Array(items)) => elements_from_array(items, "body")?,
            Some(_) => {
                return Err(ElementError::NotAnArray {
                    path: "$".to_string(),
                    field: "body".to_string(),
                });
            }
            None => Vec::new(),
        };
        let actions = match object.get("actions") {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| action_from_value(item, &format!("actions[{index}]")))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(ElementError::NotAnArray {
                    path: "$".to_string(),
                    field: "actions".to_string(),
                });
            }
            None => Vec::new(),
        };
        Ok(Self {
            version: object.get("version").and_then(Value::as_str).map(str::to_owned),
            style: object.get("style").and_then(Value::as_str).map(str::to_owned),
            body,
            actions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_known_and_custom_tags() {
        assert_eq!(ElementType::parse("Input.Time"), ElementType::TimeInput);
        assert_eq!(
            ElementType::parse("Rating"),
            ElementType::Custom("Rating".to_string())
        );
        assert_eq!(ElementType::TimeInput.to_string(), "Input.Time");
        assert!(ElementType::ChoiceSetInput.is_input());
        assert!(!ElementType::Container.is_input());
    }

    #[test]
    fn element_from_nested_json() {
        let value = json!({
            "type": "Container",
            "id": "outer",
            "style": "emphasis",
            "items": [
                { "type": "TextBlock", "text": "hi" },
                { "type": "Input.Time", "id": "t", "value": "13:45", "fallback": "drop" }
            ]
        });
        let element = CardElement::from_value(&value).expect("element");
        assert_eq!(element.element_type, ElementType::Container);
        assert_eq!(element.id.as_deref(), Some("outer"));
        assert_eq!(element.str_prop("style"), Some("emphasis"));
        assert!(element.property("items").is_none());
        assert_eq!(element.children.len(), 2);
        assert_eq!(element.children[1].fallback, Fallback::Drop);
        assert_eq!(element.children[1].str_prop("value"), Some("13:45"));
    }

    #[test]
    fn fallback_element_is_parsed() {
        let value = json!({
            "type": "Graph",
            "fallback": { "type": "TextBlock", "text": "no graph" }
        });
        let element = CardElement::from_value(&value).expect("element");
        match element.fallback {
            Fallback::Element(inner) => assert_eq!(inner.element_type, ElementType::TextBlock),
            other => panic!("unexpected fallback {other:?}"),
        }
    }

    #[test]
    fn column_set_children_come_from_columns() {
        let value = json!({
            "type": "ColumnSet",
            "columns": [{ "type": "Column", "items": [{ "type": "TextBlock", "text": "a" }] }]
        });
        let element = CardElement::from_value(&value).expect("element");
        assert_eq!(element.children.len(), 1);
        assert_eq!(element.children[0].children.len(), 1);
    }

    #[test]
    fn missing_type_reports_path() {
        let err = AdaptiveCard::from_value(&json!({ "body": [{ "text": "x" }] })).unwrap_err();
        assert_eq!(err.to_string(), "body[0]: missing `type`");
    }

    #[test]
    fn card_actions_are_parsed() {
        let card = AdaptiveCard::from_json_str(
            r#"{"type":"AdaptiveCard","version":"1.5","body":[],
                "actions":[{"type":"Action.Submit","title":"Send","data":{"k":1},"associatedInputs":"None"},
                           {"type":"Action.OpenUrl","title":"Docs","url":"https://example.com"}]}"#,
        )
        .expect("card");
        assert_eq!(card.version.as_deref(), Some("1.5"));
        assert_eq!(card.actions.len(), 2);
        assert_eq!(card.actions[0].kind, ActionKind::Submit);
        assert_eq!(card.actions[0].associated_inputs, AssociatedInputs::None);
        assert_eq!(card.actions[1].url.as_deref(), Some("https://example.com"));
    }
}
