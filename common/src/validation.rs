//! Field validation for logbook entries.
//!
//! A field fails when it is required and empty, or when it carries a
//! validation pattern and its (non-empty) value does not match. Errors are
//! kept in a flat map addressed by [`FieldKey`], which is what the renderer
//! reads for each control.

use crate::model::field::{FieldDefinition, FieldValue};
use crate::model::schema::{FieldGroup, TemplateSchema};
use crate::model::value_bag::ValueBag;
use fancy_regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

/// Address of one field's value: group name plus field key.
///
/// Kept as two strings rather than a joined `"group.field"` so names that
/// contain a dot cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    pub group: String,
    pub field: String,
}

impl FieldKey {
    pub fn new(group: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            field: field.into(),
        }
    }

    pub fn of(group: &FieldGroup, field: &FieldDefinition) -> Self {
        Self::new(group.group_name.clone(), field.key())
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.field)
    }
}

/// Per-field error messages. Absence means "no error".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(BTreeMap<FieldKey, String>);

impl FieldErrors {
    /// Records `message` for `key`, or clears it when `None`.
    pub fn set(&mut self, key: FieldKey, message: Option<String>) {
        match message {
            Some(message) => {
                self.0.insert(key, message);
            }
            None => {
                self.0.remove(&key);
            }
        }
    }

    /// The message for `key`, or an empty string when the field is fine.
    pub fn error(&self, key: &FieldKey) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn has_errors(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &String)> {
        self.0.iter()
    }
}

/// Checks one value against its field definition.
///
/// Returns the user-facing message on failure. `None` for `value` is treated
/// like an empty value.
pub fn validate_field(field: &FieldDefinition, value: Option<&FieldValue>) -> Option<String> {
    let truthy = value.is_some_and(FieldValue::is_truthy);

    if field.is_required && !truthy {
        return Some(format!("{} is required", field.field_label));
    }

    if let (Some(pattern), Some(value)) = (field.validation_pattern(), value) {
        if truthy && !pattern_matches(pattern, &value.to_string()) {
            return Some(format!("{} format is invalid", field.field_label));
        }
    }

    None
}

/// Unanchored search, the way the browser's `RegExp.test` behaves:
/// lookaround is allowed and `\d`/`\w` only cover ASCII.
/// A pattern that does not compile never matches.
fn pattern_matches(pattern: &str, text: &str) -> bool {
    compile(pattern).is_ok_and(|re| matches!(re.is_match(text), Ok(true)))
}

/// Compiles `pattern` to report authoring mistakes before a template is saved.
pub fn check_pattern(pattern: &str) -> Result<(), fancy_regex::Error> {
    compile(pattern).map(|_| ())
}

fn compile(pattern: &str) -> Result<Regex, fancy_regex::Error> {
    Regex::new(&ascii_classes(pattern))
}

/// Spells out `\d`, `\D`, `\w` and `\W` as ASCII ranges, since the engine
/// reads them as Unicode classes. Inside a bracket class only the positive
/// forms can be inlined; the negated ones are left alone there.
fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push(c);
                    break;
                };
                match (next, in_class) {
                    ('d', false) => out.push_str("[0-9]"),
                    ('D', false) => out.push_str("[^0-9]"),
                    ('w', false) => out.push_str("[A-Za-z0-9_]"),
                    ('W', false) => out.push_str("[^A-Za-z0-9_]"),
                    ('d', true) => out.push_str("0-9"),
                    ('w', true) => out.push_str("A-Za-z0-9_"),
                    _ => {
                        out.push(c);
                        out.push(next);
                    }
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Checks the value stored under `key` against every field that shares it.
/// The first failing field in declaration order supplies the message.
pub fn validate_key(
    schema: &TemplateSchema,
    key: &FieldKey,
    value: Option<&FieldValue>,
) -> Option<String> {
    schema
        .fields_matching(key)
        .find_map(|field| validate_field(field, value))
}

/// Validates every field of every group against `bag`.
pub fn validate_bag(schema: &TemplateSchema, bag: &ValueBag) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for (group, field) in schema.fields() {
        let key = FieldKey::of(group, field);
        if errors.0.contains_key(&key) {
            continue;
        }
        let message = validate_field(field, bag.get(&key.group, &key.field));
        errors.set(key, message);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::FieldType;

    fn required(label: &str) -> FieldDefinition {
        let mut field = FieldDefinition::new(label, FieldType::Text);
        field.is_required = true;
        field
    }

    fn patterned(label: &str, pattern: &str) -> FieldDefinition {
        let mut field = FieldDefinition::new(label, FieldType::Text);
        field.validation_regex = Some(pattern.to_string());
        field
    }

    #[test]
    fn required_rejects_every_falsy_value() {
        let field = required("Full Name");
        for value in [
            FieldValue::empty(),
            FieldValue::Number(0.0),
            FieldValue::Null,
            FieldValue::Bool(false),
        ] {
            assert_eq!(
                validate_field(&field, Some(&value)).as_deref(),
                Some("Full Name is required")
            );
        }
        assert_eq!(
            validate_field(&field, None).as_deref(),
            Some("Full Name is required")
        );
    }

    #[test]
    fn required_accepts_truthy_value_without_pattern() {
        let field = required("Full Name");
        assert_eq!(validate_field(&field, Some(&"Ann".into())), None);
        assert_eq!(validate_field(&field, Some(&FieldValue::Number(7.0))), None);
    }

    #[test]
    fn pattern_only_applies_to_non_empty_values() {
        let field = patterned("Roll Number", r"^\d+$");
        assert_eq!(validate_field(&field, Some(&"".into())), None);
        assert_eq!(
            validate_field(&field, Some(&"abc".into())).as_deref(),
            Some("Roll Number format is invalid")
        );
        assert_eq!(validate_field(&field, Some(&"123".into())), None);
        assert_eq!(validate_field(&field, Some(&FieldValue::Number(123.0))), None);
    }

    #[test]
    fn pattern_search_is_unanchored() {
        let field = patterned("Code", r"\d{3}");
        assert_eq!(validate_field(&field, Some(&"abc123".into())), None);
    }

    #[test]
    fn digit_class_is_ascii_only() {
        let field = patterned("Roll", r"^\d+$");
        assert_eq!(
            validate_field(&field, Some(&"١٢٣".into())).as_deref(),
            Some("Roll format is invalid")
        );
        assert_eq!(validate_field(&field, Some(&"123".into())), None);

        let word = patterned("Handle", r"^\w+$");
        assert!(validate_field(&word, Some(&"café".into())).is_some());
        assert_eq!(validate_field(&word, Some(&"cafe_1".into())), None);
    }

    #[test]
    fn lookahead_patterns_are_supported() {
        let field = patterned("Roll", r"^(?=.*\d)[A-Za-z\d]{6,}$");
        assert!(check_pattern(r"^(?=.*\d)[A-Za-z\d]{6,}$").is_ok());
        assert_eq!(validate_field(&field, Some(&"abc123".into())), None);
        assert_eq!(
            validate_field(&field, Some(&"abcdef".into())).as_deref(),
            Some("Roll format is invalid")
        );
    }

    #[test]
    fn escaped_backslash_is_not_a_class() {
        assert_eq!(ascii_classes(r"\\d"), r"\\d");
        assert_eq!(ascii_classes(r"[\d\s]\D"), r"[0-9\s][^0-9]");
    }

    #[test]
    fn broken_pattern_reports_invalid_format() {
        let field = patterned("Code", "([a-z");
        assert_eq!(
            validate_field(&field, Some(&"abc".into())).as_deref(),
            Some("Code format is invalid")
        );
        assert!(check_pattern("([a-z").is_err());
        assert!(check_pattern(r"^\d+$").is_ok());
    }

    #[test]
    fn required_check_wins_over_pattern() {
        let mut field = patterned("Code", r"^\d+$");
        field.is_required = true;
        assert_eq!(
            validate_field(&field, Some(&"".into())).as_deref(),
            Some("Code is required")
        );
    }

    #[test]
    fn errors_are_addressed_by_composite_key() {
        let schema = TemplateSchema::new(vec![
            FieldGroup::new("a.b").with_field(required("c")),
            FieldGroup::new("a").with_field(required("b.c")),
        ]);
        let mut bag = ValueBag::seed(&schema);
        bag.set("a", "b.c", "filled".into());

        let errors = validate_bag(&schema, &bag);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.error(&FieldKey::new("a.b", "c")), "c is required");
        assert_eq!(errors.error(&FieldKey::new("a", "b.c")), "");
        assert_eq!(FieldKey::new("a.b", "c").to_string(), "a.b.c");
    }

    #[test]
    fn duplicate_groups_agree_between_live_and_full_checks() {
        let schema = TemplateSchema::new(vec![
            FieldGroup::new("Day").with_field(required("Notes")),
            FieldGroup::new("Day").with_field(FieldDefinition::new("Notes", FieldType::Textarea)),
        ]);
        let key = FieldKey::new("Day", "notes");
        let bag = ValueBag::seed(&schema);

        assert_eq!(
            validate_key(&schema, &key, Some(&"".into())).as_deref(),
            Some("Notes is required")
        );
        assert_eq!(validate_bag(&schema, &bag).error(&key), "Notes is required");
        assert_eq!(validate_key(&schema, &key, Some(&"done".into())), None);
    }

    #[test]
    fn set_none_clears_previous_error() {
        let mut errors = FieldErrors::default();
        let key = FieldKey::new("Info", "full_name");
        errors.set(key.clone(), Some("Full Name is required".into()));
        assert!(errors.has_errors());
        errors.set(key.clone(), None);
        assert_eq!(errors.error(&key), "");
        assert!(!errors.has_errors());
    }
}
