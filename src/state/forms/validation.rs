//! Regex validation rules and their evaluation against a form snapshot

use super::form_state::Form;
use crate::error::FormError;
use regex::Regex;
use std::collections::BTreeMap;

/// A pattern plus the message shown when a value does not match it
#[derive(Debug, Clone)]
pub struct ValidationRule {
    pub rule: Regex,
    pub error_message: String,
}

impl ValidationRule {
    pub fn new(rule: Regex, error_message: impl Into<String>) -> Self {
        Self {
            rule,
            error_message: error_message.into(),
        }
    }

    /// Whether the value passes this rule (unanchored search, like `RegExp.test`)
    pub fn test(&self, value: &str) -> bool {
        self.rule.is_match(value)
    }
}

/// Per-field ordered rule lists
#[derive(Debug, Clone, Default)]
pub struct Validation {
    rules: BTreeMap<String, Vec<ValidationRule>>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule compiled from `pattern` to `field`'s list
    pub fn add_rule(
        &mut self,
        field: &str,
        pattern: &str,
        error_message: impl Into<String>,
    ) -> Result<&mut Self, FormError> {
        let rule = Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            source,
        })?;
        self.push(field, ValidationRule::new(rule, error_message));
        Ok(self)
    }

    /// Builder-style `add_rule`
    pub fn with_rule(
        mut self,
        field: &str,
        pattern: &str,
        error_message: impl Into<String>,
    ) -> Result<Self, FormError> {
        self.add_rule(field, pattern, error_message)?;
        Ok(self)
    }

    pub fn push(&mut self, field: &str, rule: ValidationRule) {
        self.rules.entry(field.to_string()).or_default().push(rule);
    }

    pub fn rules_for(&self, field: &str) -> Option<&[ValidationRule]> {
        self.rules.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply the rules to `form` in place.
    ///
    /// Ignored fields get their error cleared. Every other field with rules
    /// runs all of them in order and keeps the state of the last one.
    /// Unknown keys on either side are skipped.
    pub fn evaluate(&self, form: &mut Form, ignore_fields: &[String]) {
        for key in ignore_fields {
            match form.get_mut(key) {
                Ok(field) => field.clear_error(),
                Err(_) => tracing::warn!("Ignoring unknown field {key:?} in validation"),
            }
        }

        for (key, rules) in &self.rules {
            if ignore_fields.contains(key) {
                continue;
            }
            let Ok(field) = form.get_mut(key) else {
                tracing::warn!("Validation rules for {key:?} have no matching field");
                continue;
            };
            for rule in rules {
                if rule.test(&field.value.as_text()) {
                    field.clear_error();
                } else {
                    field.set_error(&rule.error_message);
                }
            }
        }
    }
}

/// Options for a validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Fields to clear instead of validate. `None` skips validation entirely.
    pub ignore_fields: Option<Vec<String>>,
}

impl ValidateOptions {
    /// Validate every field that has rules
    pub fn all() -> Self {
        Self {
            ignore_fields: Some(Vec::new()),
        }
    }

    /// Validate everything except the named fields
    pub fn ignoring<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignore_fields: Some(fields.into_iter().map(Into::into).collect()),
        }
    }
}

/// Result of a validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// No ignore list or no ruleset; nothing was checked
    Skipped,
    Valid,
    Invalid,
}

impl ValidationOutcome {
    pub fn is_valid(self) -> bool {
        self == ValidationOutcome::Valid
    }

    pub fn is_skipped(self) -> bool {
        self == ValidationOutcome::Skipped
    }

    /// `None` when skipped, otherwise the verdict
    pub fn verdict(self) -> Option<bool> {
        match self {
            ValidationOutcome::Skipped => None,
            ValidationOutcome::Valid => Some(true),
            ValidationOutcome::Invalid => Some(false),
        }
    }
}
