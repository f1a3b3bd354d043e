//! Form state store: baseline and current snapshots plus the operations that
//! move between them.
//!
//! Every operation builds a new snapshot from a copy and swaps it in. A
//! snapshot handed out by [`FormStore::form`] is never mutated afterwards, so
//! a render that started before an update keeps a consistent view.
//!
//! The edited flag is not stored. [`FormStore::watch`] compares the current
//! snapshot with the baseline on every read, so it stays correct after
//! `reset` and `commit_baseline`.

use super::field::FieldValue;
use super::form_state::{Form, FormData, Watch};
use super::listener::SnapshotListener;
use super::validation::{ValidateOptions, Validation, ValidationOutcome};
use crate::error::FormError;
use std::fmt;
use std::sync::Arc;

pub struct FormStore {
    baseline: Arc<Form>,
    current: Arc<Form>,
    validation: Option<Validation>,
    listener: Option<Box<dyn SnapshotListener>>,
}

impl FormStore {
    /// Create a store whose baseline and current snapshot are `initial`
    pub fn new(initial: Form) -> Self {
        let baseline = Arc::new(initial);
        Self {
            current: Arc::clone(&baseline),
            baseline,
            validation: None,
            listener: None,
        }
    }

    /// Create a store with a validation ruleset. An empty ruleset counts as
    /// none, so validation reports `Skipped`.
    pub fn with_validation(initial: Form, validation: Validation) -> Self {
        Self {
            validation: Some(validation).filter(|v| !v.is_empty()),
            ..Self::new(initial)
        }
    }

    /// Attach the listener notified after each snapshot change
    pub fn with_listener(mut self, listener: impl SnapshotListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Current snapshot
    pub fn form(&self) -> Arc<Form> {
        Arc::clone(&self.current)
    }

    /// Baseline snapshot
    pub fn baseline(&self) -> Arc<Form> {
        Arc::clone(&self.baseline)
    }

    pub fn validation(&self) -> Option<&Validation> {
        self.validation.as_ref()
    }

    /// Current value of one field
    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.current.get(key).map(|f| &f.value)
    }

    pub fn watch(&self) -> Watch {
        Watch::between(&self.baseline, &self.current)
    }

    pub fn is_edited(&self) -> bool {
        self.watch().edited
    }

    /// Set one field's value
    pub fn change(&mut self, key: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let mut next = Form::clone(&self.current);
        next.set_value(key, value.into())?;
        tracing::debug!("Changed field {key:?}");
        self.install_current(next);
        Ok(())
    }

    /// Set several fields at once. Nothing is applied if any key is unknown.
    pub fn multi_change<I, K, V>(&mut self, data: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        let mut next = Form::clone(&self.current);
        let mut count = 0usize;
        for (key, value) in data {
            next.set_value(key.as_ref(), value.into())?;
            count += 1;
        }
        tracing::debug!("Changed {count} fields");
        self.install_current(next);
        Ok(())
    }

    /// Write `data` over the current snapshot and make the result the new
    /// baseline. Keys the form does not have are skipped.
    pub fn commit_baseline(&mut self, data: &FormData) {
        let mut next = Form::clone(&self.current);
        for (key, value) in data {
            match next.get_mut(key) {
                Ok(field) => field.value = value.clone(),
                Err(_) => tracing::warn!("Skipping unknown field {key:?} in baseline commit"),
            }
        }
        tracing::debug!("Committed new baseline");
        self.install_baseline(next);
    }

    /// Replace the baseline with a whole new form
    pub fn replace_baseline(&mut self, form: Form) {
        tracing::debug!("Replaced baseline ({} fields)", form.len());
        self.install_baseline(form);
    }

    /// Drop all edits since the last baseline
    pub fn reset(&mut self) {
        tracing::debug!("Reset to baseline");
        self.current = Arc::clone(&self.baseline);
        self.notify();
    }

    /// Field values of the current snapshot, without error state
    pub fn submit(&self) -> FormData {
        self.current.values()
    }

    /// Run the validation rules against the current snapshot.
    ///
    /// Returns [`ValidationOutcome::Skipped`] without touching state when
    /// `options` carries no ignore list or the store has no rules. Otherwise
    /// the updated error state becomes the current snapshot.
    pub fn validate(&mut self, options: &ValidateOptions) -> ValidationOutcome {
        let (Some(ignore_fields), Some(validation)) = (&options.ignore_fields, &self.validation)
        else {
            tracing::debug!("Validation skipped");
            return ValidationOutcome::Skipped;
        };

        let mut next = Form::clone(&self.current);
        validation.evaluate(&mut next, ignore_fields);

        let outcome = if next.has_errors() {
            ValidationOutcome::Invalid
        } else {
            ValidationOutcome::Valid
        };
        tracing::debug!("Validation finished: {outcome:?}");
        self.install_current(next);
        outcome
    }

    fn install_current(&mut self, form: Form) {
        self.current = Arc::new(form);
        self.notify();
    }

    /// New baselines also become the current snapshot
    fn install_baseline(&mut self, form: Form) {
        self.baseline = Arc::new(form);
        self.current = Arc::clone(&self.baseline);
        self.notify();
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener.snapshot_changed(&self.current, self.watch());
        }
    }
}

impl fmt::Debug for FormStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormStore")
            .field("baseline", &self.baseline)
            .field("current", &self.current)
            .field("validation", &self.validation)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}
