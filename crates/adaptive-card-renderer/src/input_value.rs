//! Bindings between rendered controls and the values a host collects on submit.
//!
//! Each input renderer produces one [`InputValue`]; the walker registers it in
//! the render context and the host enumerates them afterwards through
//! [`InputCollection`] without walking the UI tree again.

use std::fmt;
use std::rc::Rc;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::args::RenderArgs;
use crate::datetime::{format_date, format_time, parse_simple_date, parse_simple_time};
use crate::element::CardElement;
use crate::ui::{Control, ControlKind, ControlValue, ValidationIndicator};

/// Why an input failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("a value is required")]
    Required,
    #[error("value does not match the expected format")]
    Pattern,
    #[error("value is longer than {0} characters")]
    TooLong(usize),
    #[error("value is below the minimum {0}")]
    BelowMin(String),
    #[error("value is above the maximum {0}")]
    AboveMax(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{input_id}: {failure}")]
pub struct InputValidationError {
    pub input_id: String,
    pub failure: ValidationFailure,
}

/// State shared by every input value: the element, its control and its
/// validation indicator.
#[derive(Debug, Clone)]
pub struct InputBinding {
    id: String,
    element: CardElement,
    control: Control,
    indicator: ValidationIndicator,
}

impl InputBinding {
    /// Inputs without an `id` are identified by their element path.
    pub fn new(element: &CardElement, control: Control, args: &RenderArgs) -> Self {
        Self {
            id: element
                .id
                .clone()
                .unwrap_or_else(|| args.path().to_string()),
            element: element.clone(),
            control,
            indicator: ValidationIndicator::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A rendered interactive control viewed as a form field.
pub trait InputValue: fmt::Debug {
    fn binding(&self) -> &InputBinding;

    /// Current value in the wire format of the input type.
    fn current_value(&self) -> String;

    /// Applies a value given in wire format, as a user edit would.
    /// Returns `false` and leaves the control untouched if `raw` does not parse.
    fn set_value_from_str(&self, raw: &str) -> bool;

    /// Whether the element declares checks beyond `isRequired`.
    fn has_type_specific_validation(&self) -> bool {
        false
    }

    /// Type-specific checks on a non-empty value.
    fn check(&self) -> Result<(), ValidationFailure> {
        Ok(())
    }

    fn input_id(&self) -> &str {
        self.binding().id()
    }

    fn element(&self) -> &CardElement {
        &self.binding().element
    }

    fn control(&self) -> &Control {
        &self.binding().control
    }

    fn validation_indicator(&self) -> &ValidationIndicator {
        &self.binding().indicator
    }

    fn has_validation_constraints(&self) -> bool {
        self.element().is_required() || self.has_type_specific_validation()
    }

    fn validate(&self) -> Result<(), ValidationFailure> {
        if self.control().value().is_empty() {
            return if self.element().is_required() {
                Err(ValidationFailure::Required)
            } else {
                Ok(())
            };
        }
        self.check()
    }

    fn set_validation_error_visible(&self, visible: bool) {
        self.validation_indicator().set_error_visible(visible);
    }
}

#[derive(Debug)]
pub struct TextInputValue {
    binding: InputBinding,
}

impl TextInputValue {
    pub fn new(binding: InputBinding) -> Self {
        Self { binding }
    }

    fn text(&self) -> String {
        match self.control().value() {
            ControlValue::Text(text) => text,
            _ => String::new(),
        }
    }
}

impl InputValue for TextInputValue {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn current_value(&self) -> String {
        self.text()
    }

    fn set_value_from_str(&self, raw: &str) -> bool {
        self.control().set_value(ControlValue::Text(raw.to_string()));
        true
    }

    fn has_type_specific_validation(&self) -> bool {
        self.element().str_prop("regex").is_some() || self.element().u64_prop("maxLength").is_some()
    }

    fn check(&self) -> Result<(), ValidationFailure> {
        let text = self.text();
        if let Some(max) = self.element().u64_prop("maxLength") {
            let max = max as usize;
            if text.chars().count() > max {
                return Err(ValidationFailure::TooLong(max));
            }
        }
        if let Some(pattern) = self.element().str_prop("regex") {
            if let Ok(regex) = full_match_regex(pattern) {
                if !regex.is_match(&text) {
                    return Err(ValidationFailure::Pattern);
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct NumberInputValue {
    binding: InputBinding,
}

impl NumberInputValue {
    pub fn new(binding: InputBinding) -> Self {
        Self { binding }
    }

    fn number(&self) -> Option<f64> {
        match self.control().value() {
            ControlValue::Number(number) => number,
            _ => None,
        }
    }
}

impl InputValue for NumberInputValue {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn current_value(&self) -> String {
        self.number().map(|number| number.to_string()).unwrap_or_default()
    }

    fn set_value_from_str(&self, raw: &str) -> bool {
        match raw.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => {
                self.control().set_value(ControlValue::Number(Some(number)));
                true
            }
            _ => false,
        }
    }

    fn has_type_specific_validation(&self) -> bool {
        self.element().f64_prop("min").is_some() || self.element().f64_prop("max").is_some()
    }

    fn check(&self) -> Result<(), ValidationFailure> {
        let Some(number) = self.number() else {
            return Ok(());
        };
        if let Some(min) = self.element().f64_prop("min") {
            if number < min {
                return Err(ValidationFailure::BelowMin(min.to_string()));
            }
        }
        if let Some(max) = self.element().f64_prop("max") {
            if number > max {
                return Err(ValidationFailure::AboveMax(max.to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct DateInputValue {
    binding: InputBinding,
}

impl DateInputValue {
    pub fn new(binding: InputBinding) -> Self {
        Self { binding }
    }
}

impl InputValue for DateInputValue {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn current_value(&self) -> String {
        match self.control().value() {
            ControlValue::Date(Some(date)) => format_date(date),
            _ => String::new(),
        }
    }

    fn set_value_from_str(&self, raw: &str) -> bool {
        match parse_simple_date(raw) {
            Some(date) => {
                self.control().set_value(ControlValue::Date(Some(date)));
                true
            }
            None => false,
        }
    }

    fn has_type_specific_validation(&self) -> bool {
        self.element().str_prop("min").is_some() || self.element().str_prop("max").is_some()
    }

    fn check(&self) -> Result<(), ValidationFailure> {
        let ControlValue::Date(Some(date)) = self.control().value() else {
            return Ok(());
        };
        if let Some(min) = self.element().str_prop("min").and_then(parse_simple_date) {
            if date < min {
                return Err(ValidationFailure::BelowMin(format_date(min)));
            }
        }
        if let Some(max) = self.element().str_prop("max").and_then(parse_simple_date) {
            if date > max {
                return Err(ValidationFailure::AboveMax(format_date(max)));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct TimeInputValue {
    binding: InputBinding,
}

impl TimeInputValue {
    pub fn new(binding: InputBinding) -> Self {
        Self { binding }
    }
}

impl InputValue for TimeInputValue {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn current_value(&self) -> String {
        match self.control().value() {
            ControlValue::Time(Some(time)) => format_time(time),
            _ => String::new(),
        }
    }

    fn set_value_from_str(&self, raw: &str) -> bool {
        match parse_simple_time(raw) {
            Some(time) => {
                self.control().set_value(ControlValue::Time(Some(time)));
                true
            }
            None => false,
        }
    }

    fn has_type_specific_validation(&self) -> bool {
        self.element().str_prop("min").is_some() || self.element().str_prop("max").is_some()
    }

    fn check(&self) -> Result<(), ValidationFailure> {
        let ControlValue::Time(Some(time)) = self.control().value() else {
            return Ok(());
        };
        if let Some(min) = self.element().str_prop("min").and_then(parse_simple_time) {
            if time < min {
                return Err(ValidationFailure::BelowMin(format_time(min)));
            }
        }
        if let Some(max) = self.element().str_prop("max").and_then(parse_simple_time) {
            if time > max {
                return Err(ValidationFailure::AboveMax(format_time(max)));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ToggleInputValue {
    binding: InputBinding,
}

impl ToggleInputValue {
    pub fn new(binding: InputBinding) -> Self {
        Self { binding }
    }

    pub fn value_on(&self) -> &str {
        self.element().str_prop("valueOn").unwrap_or("true")
    }

    pub fn value_off(&self) -> &str {
        self.element().str_prop("valueOff").unwrap_or("false")
    }

    fn is_on(&self) -> bool {
        matches!(self.control().value(), ControlValue::Toggle(true))
    }
}

impl InputValue for ToggleInputValue {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn current_value(&self) -> String {
        if self.is_on() {
            self.value_on().to_string()
        } else {
            self.value_off().to_string()
        }
    }

    fn set_value_from_str(&self, raw: &str) -> bool {
        let on = if raw == self.value_on() {
            true
        } else if raw == self.value_off() {
            false
        } else {
            return false;
        };
        self.control().set_value(ControlValue::Toggle(on));
        true
    }

    // A required toggle must be switched on.
    fn validate(&self) -> Result<(), ValidationFailure> {
        if self.element().is_required() && !self.is_on() {
            return Err(ValidationFailure::Required);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ChoiceSetInputValue {
    binding: InputBinding,
}

impl ChoiceSetInputValue {
    pub fn new(binding: InputBinding) -> Self {
        Self { binding }
    }

    fn allowed(&self) -> (Vec<String>, bool) {
        match self.control().kind() {
            ControlKind::ChoiceList {
                choices,
                multi_select,
            } => (choices.into_iter().map(|c| c.value).collect(), multi_select),
            ControlKind::ComboBox { choices, .. } => {
                (choices.into_iter().map(|c| c.value).collect(), false)
            }
            _ => (Vec::new(), false),
        }
    }
}

impl InputValue for ChoiceSetInputValue {
    fn binding(&self) -> &InputBinding {
        &self.binding
    }

    fn current_value(&self) -> String {
        match self.control().value() {
            ControlValue::Selection(values) => values.join(","),
            _ => String::new(),
        }
    }

    fn set_value_from_str(&self, raw: &str) -> bool {
        let (allowed, multi_select) = self.allowed();
        let selected: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .collect();
        if !selected.iter().all(|value| allowed.contains(value)) {
            return false;
        }
        if !multi_select && selected.len() > 1 {
            return false;
        }
        self.control().set_value(ControlValue::Selection(selected));
        true
    }
}

/// Compiles a `regex` property so that it must match the whole value.
pub(crate) fn full_match_regex(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

/// One registration: the element path it was keyed by and the bound value.
#[derive(Debug, Clone)]
pub struct InputEntry {
    pub key: String,
    pub value: Rc<dyn InputValue>,
}

/// Inputs registered during a render pass, in render order.
#[derive(Debug, Clone, Default)]
pub struct InputCollection {
    entries: Vec<InputEntry>,
}

impl InputCollection {
    pub(crate) fn push(&mut self, key: String, value: Rc<dyn InputValue>) {
        self.entries.push(InputEntry { key, value });
    }

    /// Drops every registration made after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.value.input_id() == id)
    }

    pub fn entries(&self) -> &[InputEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Rc<dyn InputValue>> {
        self.entries.iter().map(|entry| &entry.value)
    }

    /// Latest registration with this input id.
    pub fn get(&self, id: &str) -> Option<&Rc<dyn InputValue>> {
        self.iter().rev().find(|value| value.input_id() == id)
    }

    /// Current values keyed by input id. Later inputs win on duplicate ids.
    pub fn values(&self) -> Map<String, Value> {
        self.iter()
            .map(|value| {
                (
                    value.input_id().to_string(),
                    Value::String(value.current_value()),
                )
            })
            .collect()
    }

    /// Validates every input and shows or hides its error affordances.
    pub fn validate_all(&self) -> Vec<InputValidationError> {
        let mut errors = Vec::new();
        for value in self.iter() {
            match value.validate() {
                Ok(()) => value.set_validation_error_visible(false),
                Err(failure) => {
                    value.set_validation_error_visible(true);
                    errors.push(InputValidationError {
                        input_id: value.input_id().to_string(),
                        failure,
                    });
                }
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::host_config::ContainerStyle;
    use crate::ui::Choice;
    use chrono::NaiveTime;

    fn args() -> RenderArgs {
        RenderArgs::root(0, ContainerStyle::Default)
    }

    fn time_value(element: CardElement, initial: Option<NaiveTime>) -> TimeInputValue {
        let control = Control::new(ControlKind::TimePicker, ControlValue::Time(initial));
        TimeInputValue::new(InputBinding::new(&element, control, &args()))
    }

    #[test]
    fn id_falls_back_to_path() {
        let value = time_value(CardElement::new(ElementType::TimeInput), None);
        assert_eq!(value.input_id(), "body[0]");
        let value = time_value(CardElement::new(ElementType::TimeInput).with_id("t"), None);
        assert_eq!(value.input_id(), "t");
    }

    #[test]
    fn time_bounds_and_required() {
        let element = CardElement::new(ElementType::TimeInput)
            .with_id("t")
            .with_property("min", "09:00")
            .with_property("max", "17:00")
            .with_property("isRequired", true);
        let value = time_value(element, None);
        assert!(value.has_validation_constraints());
        assert_eq!(value.validate(), Err(ValidationFailure::Required));
        assert!(value.set_value_from_str("08:30"));
        assert_eq!(
            value.validate(),
            Err(ValidationFailure::BelowMin("09:00".into()))
        );
        assert!(value.set_value_from_str("12:00"));
        assert_eq!(value.validate(), Ok(()));
        assert!(!value.set_value_from_str("noon"));
        assert_eq!(value.current_value(), "12:00");
    }

    #[test]
    fn text_regex_and_max_length() {
        let element = CardElement::new(ElementType::TextInput)
            .with_id("code")
            .with_property("regex", "[A-Z]{3}")
            .with_property("maxLength", 3);
        let control = Control::new(
            ControlKind::TextBox {
                multiline: false,
                max_length: Some(3),
                placeholder: None,
            },
            ControlValue::Text("ABCD".into()),
        );
        let value = TextInputValue::new(InputBinding::new(&element, control, &args()));
        assert_eq!(value.validate(), Err(ValidationFailure::TooLong(3)));
        value.set_value_from_str("AB1");
        assert_eq!(value.validate(), Err(ValidationFailure::Pattern));
        value.set_value_from_str("ABC");
        assert_eq!(value.validate(), Ok(()));
    }

    #[test]
    fn number_formats_without_trailing_zero() {
        let element = CardElement::new(ElementType::NumberInput)
            .with_id("n")
            .with_property("max", 10);
        let control = Control::new(
            ControlKind::NumberBox {
                min: None,
                max: Some(10.0),
                placeholder: None,
            },
            ControlValue::Number(Some(5.0)),
        );
        let value = NumberInputValue::new(InputBinding::new(&element, control, &args()));
        assert_eq!(value.current_value(), "5");
        assert!(value.set_value_from_str("12.5"));
        assert_eq!(value.validate(), Err(ValidationFailure::AboveMax("10".into())));
        assert!(!value.set_value_from_str("ten"));
    }

    #[test]
    fn toggle_uses_custom_on_off_values() {
        let element = CardElement::new(ElementType::ToggleInput)
            .with_id("agree")
            .with_property("valueOn", "yes")
            .with_property("valueOff", "no")
            .with_property("isRequired", true);
        let control = Control::new(
            ControlKind::ToggleSwitch {
                title: "Agree".into(),
            },
            ControlValue::Toggle(false),
        );
        let value = ToggleInputValue::new(InputBinding::new(&element, control, &args()));
        assert_eq!(value.current_value(), "no");
        assert_eq!(value.validate(), Err(ValidationFailure::Required));
        assert!(value.set_value_from_str("yes"));
        assert_eq!(value.current_value(), "yes");
        assert_eq!(value.validate(), Ok(()));
        assert!(!value.set_value_from_str("maybe"));
    }

    #[test]
    fn choice_set_rejects_unknown_values() {
        let element = CardElement::new(ElementType::ChoiceSetInput).with_id("color");
        let choices = vec![
            Choice {
                title: "Red".into(),
                value: "r".into(),
            },
            Choice {
                title: "Green".into(),
                value: "g".into(),
            },
        ];
        let control = Control::new(
            ControlKind::ChoiceList {
                choices,
                multi_select: true,
            },
            ControlValue::Selection(Vec::new()),
        );
        let value = ChoiceSetInputValue::new(InputBinding::new(&element, control, &args()));
        assert!(value.set_value_from_str("r, g"));
        assert_eq!(value.current_value(), "r,g");
        assert!(!value.set_value_from_str("blue"));
        assert_eq!(value.current_value(), "r,g");
    }

    #[test]
    fn collection_validates_and_toggles_indicators() {
        let mut inputs = InputCollection::default();
        let required = Rc::new(time_value(
            CardElement::new(ElementType::TimeInput)
                .with_id("a")
                .with_property("isRequired", true),
            None,
        ));
        let optional = Rc::new(time_value(
            CardElement::new(ElementType::TimeInput).with_id("b"),
            NaiveTime::from_hms_opt(10, 0, 0),
        ));
        inputs.push("body[0]".into(), required.clone());
        inputs.push("body[1]".into(), optional);

        let errors = inputs.validate_all();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "a: a value is required");
        assert!(required.validation_indicator().is_error_visible());

        let values = inputs.values();
        assert_eq!(values.get("a"), Some(&Value::String(String::new())));
        assert_eq!(values.get("b"), Some(&Value::String("10:00".into())));
        assert!(inputs.contains_key("body[1]"));
        assert!(inputs.contains_id("b"));
    }

    #[test]
    fn get_returns_latest_registration_for_duplicate_id() {
        let mut inputs = InputCollection::default();
        let first = Rc::new(time_value(
            CardElement::new(ElementType::TimeInput).with_id("slot"),
            NaiveTime::from_hms_opt(9, 0, 0),
        ));
        let second = Rc::new(time_value(
            CardElement::new(ElementType::TimeInput).with_id("slot"),
            NaiveTime::from_hms_opt(14, 30, 0),
        ));
        inputs.push("body[0]".into(), first);
        inputs.push("body[1]".into(), second);

        let latest = inputs.get("slot").expect("registered");
        assert_eq!(latest.current_value(), "14:30");
        assert_eq!(inputs.values().get("slot"), Some(&Value::String("14:30".into())));
        assert!(inputs.get("missing").is_none());
    }

    #[test]
    fn truncate_forgets_later_registrations() {
        let mut inputs = InputCollection::default();
        for (index, id) in ["a", "b", "c"].into_iter().enumerate() {
            inputs.push(
                format!("body[{index}]"),
                Rc::new(time_value(
                    CardElement::new(ElementType::TimeInput).with_id(id),
                    None,
                )),
            );
        }
        inputs.truncate(1);
        assert_eq!(inputs.len(), 1);
        assert!(inputs.contains_id("a"));
        assert!(!inputs.contains_id("c"));
    }
}
