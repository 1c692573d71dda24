use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The input kind of a single logbook field.
///
/// Serialized as the lowercase name the backend stores (`"text"`, `"select"`...).
/// Any other name received from the backend is kept in `Unsupported` so it
/// survives a load/save cycle untouched and the renderer can show a placeholder
/// instead of failing the whole form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Select,
    Textarea,
    File,
    Unsupported(String),
}

impl FieldType {
    /// Types an administrator can pick in the builder, in menu order.
    pub const AUTHORABLE: [FieldType; 6] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Date,
        FieldType::Select,
        FieldType::Textarea,
        FieldType::File,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Textarea => "textarea",
            FieldType::File => "file",
            FieldType::Unsupported(name) => name,
        }
    }

    /// Human readable name used in the builder's type menu.
    pub fn label(&self) -> &str {
        match self {
            FieldType::Text => "Text",
            FieldType::Number => "Number",
            FieldType::Date => "Date",
            FieldType::Select => "Dropdown",
            FieldType::Textarea => "Long text",
            FieldType::File => "File",
            FieldType::Unsupported(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => FieldType::Text,
            "number" => FieldType::Number,
            "date" => FieldType::Date,
            "select" => FieldType::Select,
            "textarea" => FieldType::Textarea,
            "file" => FieldType::File,
            _ => FieldType::Unsupported(value),
        }
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Unsupported(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

/// A scalar captured for one field of an entry.
///
/// Truthiness mirrors what the browser forms always relied on: `null`, `false`,
/// `0`, `NaN` and the empty string are all "empty".
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
        }
    }

    /// Text shown inside an input control. `Null` renders as an empty box.
    pub fn as_input_text(&self) -> String {
        match self {
            FieldValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Integral numbers are written without a fractional part so that `3` goes
/// back to the backend as `3` and not `3.0`.
fn integral(n: f64) -> Option<i64> {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    (n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE).then_some(n as i64)
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Number(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            FieldValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => match integral(*n) {
                Some(i) => write!(f, "{}", i),
                None => write!(f, "{}", n),
            },
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

/// One configurable input inside a [`FieldGroup`](super::schema::FieldGroup).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Builder identity of the field, unique inside its group.
    #[serde(default)]
    pub field_name: String,
    pub field_label: String,
    #[serde(default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub is_required: bool,
    /// Choices for `select` fields, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_regex: Option<String>,
}

impl FieldDefinition {
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Self {
        let field_label = label.into();
        Self {
            field_name: derive_key(&field_label),
            field_label,
            field_type,
            is_required: false,
            options: Vec::new(),
            default_value: None,
            validation_regex: None,
        }
    }

    /// Key under which this field's value lives in its group's value bag.
    pub fn key(&self) -> String {
        derive_key(&self.field_label)
    }

    /// The validation pattern, ignoring an empty string left behind by the editor.
    pub fn validation_pattern(&self) -> Option<&str> {
        self.validation_regex
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
    }

    /// Value a freshly seeded bag holds for this field.
    pub fn initial_value(&self) -> FieldValue {
        self.default_value.clone().unwrap_or_else(FieldValue::empty)
    }
}

/// Lowercases `label` and collapses every run of whitespace into one `_`.
///
/// Leading and trailing whitespace are not trimmed: `" Age"` becomes `"_age"`,
/// which is what entries stored by earlier clients already use.
pub fn derive_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut in_space = false;
    for ch in label.chars() {
        if ch.is_whitespace() {
            if !in_space {
                key.push('_');
            }
            in_space = true;
        } else {
            key.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_collapses_whitespace_runs() {
        assert_eq!(derive_key("Full Name"), "full_name");
        assert_eq!(derive_key("Date  of\tVisit"), "date_of_visit");
        assert_eq!(derive_key(" Age "), "_age_");
        assert_eq!(derive_key("ÁREA"), "área");
    }

    #[test]
    fn unknown_field_type_round_trips() {
        let ty: FieldType = serde_json::from_str("\"signature\"").unwrap();
        assert_eq!(ty, FieldType::Unsupported("signature".to_string()));
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"signature\"");

        let ty: FieldType = serde_json::from_str("\"textarea\"").unwrap();
        assert_eq!(ty, FieldType::Textarea);
    }

    #[test]
    fn truthiness_matches_form_semantics() {
        assert!(!FieldValue::Null.is_truthy());
        assert!(!FieldValue::empty().is_truthy());
        assert!(!FieldValue::Number(0.0).is_truthy());
        assert!(!FieldValue::Number(f64::NAN).is_truthy());
        assert!(!FieldValue::Bool(false).is_truthy());
        assert!(FieldValue::from("0").is_truthy());
        assert!(FieldValue::Number(-1.5).is_truthy());
    }

    #[test]
    fn integral_numbers_serialize_without_fraction() {
        assert_eq!(serde_json::to_string(&FieldValue::Number(3.0)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&FieldValue::Number(2.5)).unwrap(), "2.5");
        assert_eq!(FieldValue::Number(42.0).to_string(), "42");
    }

    #[test]
    fn definition_fills_defaults_from_sparse_json() {
        let field: FieldDefinition =
            serde_json::from_str(r#"{"fieldLabel":"Hours Logged"}"#).unwrap();
        assert_eq!(field.field_type, FieldType::Text);
        assert!(!field.is_required);
        assert!(field.options.is_empty());
        assert_eq!(field.key(), "hours_logged");
        assert_eq!(field.initial_value(), FieldValue::empty());
    }

    #[test]
    fn empty_pattern_counts_as_absent() {
        let mut field = FieldDefinition::new("Roll", FieldType::Number);
        field.validation_regex = Some(String::new());
        assert_eq!(field.validation_pattern(), None);
    }
}
