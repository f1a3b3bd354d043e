//! Form snapshots and the payloads derived from them

use super::field::{Field, FieldValue};
use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Field name to value mapping, used for submit payloads and bulk updates.
/// Ordered by key so serialized payloads are stable.
pub type FormData = BTreeMap<String, FieldValue>;

/// One snapshot of a form: field name to field state.
///
/// Equality is structural and ignores insertion order. Cloning copies every
/// field, so a clone shares nothing with its source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Form {
    fields: HashMap<String, Field>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_field(mut self, key: impl Into<String>, field: Field) -> Self {
        self.fields.insert(key.into(), field);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, field: Field) {
        self.fields.insert(key.into(), field);
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Mutable access, failing with the missing key
    pub fn get_mut(&mut self, key: &str) -> Result<&mut Field, FormError> {
        self.fields
            .get_mut(key)
            .ok_or_else(|| FormError::field_not_found(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Set a field's value, leaving its error state alone
    pub fn set_value(&mut self, key: &str, value: FieldValue) -> Result<(), FormError> {
        self.get_mut(key)?.value = value;
        Ok(())
    }

    /// True when any field carries an error
    pub fn has_errors(&self) -> bool {
        self.fields.values().any(|f| f.error)
    }

    /// Values only, with error state dropped
    pub fn values(&self) -> FormData {
        self.fields
            .iter()
            .map(|(k, f)| (k.clone(), f.value.clone()))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Field)> for Form {
    fn from_iter<I: IntoIterator<Item = (K, Field)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, f)| (k.into(), f)).collect(),
        }
    }
}

/// Derived watch state of a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Watch {
    pub edited: bool,
}

impl Watch {
    /// Compare a current snapshot against its baseline
    pub fn between(baseline: &Form, current: &Form) -> Self {
        Self {
            edited: baseline != current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn login_form() -> Form {
        Form::new()
            .with_field("username", Field::text())
            .with_field("password", Field::text())
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = Form::new()
            .with_field("a", Field::new(1))
            .with_field("b", Field::new("x"));
        let b = Form::new()
            .with_field("b", Field::new("x"))
            .with_field("a", Field::new(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_sees_error_state() {
        let a = login_form();
        let mut b = login_form();
        b.get_mut("username").unwrap().set_error("required");
        assert_ne!(a, b);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = login_form();
        let mut copy = original.clone();
        copy.set_value("username", "alice".into()).unwrap();

        assert_eq!(original.get("username").unwrap().value, FieldValue::default());
        assert_eq!(copy.get("username").unwrap().value, FieldValue::from("alice"));
    }

    #[test]
    fn test_set_value_unknown_key() {
        let mut form = login_form();
        let err = form.set_value("email", "a@b".into()).unwrap_err();
        assert!(matches!(err, FormError::FieldNotFound { ref key } if key == "email"));
    }

    #[test]
    fn test_values_drop_error_state() {
        let mut form = login_form();
        form.set_value("username", "alice".into()).unwrap();
        form.get_mut("password").unwrap().set_error("required");

        let values = form.values();
        let expected: FormData = [
            ("password".to_string(), FieldValue::default()),
            ("username".to_string(), FieldValue::from("alice")),
        ]
        .into_iter()
        .collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_has_errors() {
        let mut form = login_form();
        assert!(!form.has_errors());
        form.get_mut("password").unwrap().set_error("required");
        assert!(form.has_errors());
    }

    #[test]
    fn test_from_iterator() {
        let form: Form = [("a", Field::new(true))].into_iter().collect();
        assert_eq!(form.len(), 1);
        assert!(form.contains_key("a"));
    }

    #[test]
    fn test_serializes_as_plain_mapping() {
        let form = Form::new().with_field("name", Field::new("x"));
        let json = serde_json::to_string(&form).unwrap();
        assert_eq!(json, r#"{"name":{"value":"x","error":false,"errorMessage":""}}"#);
    }

    #[test]
    fn test_watch_between() {
        let baseline = login_form();
        let mut current = baseline.clone();
        assert!(!Watch::between(&baseline, &current).edited);

        current.set_value("username", "a".into()).unwrap();
        assert!(Watch::between(&baseline, &current).edited);
    }
}
