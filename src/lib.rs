//! Masinton Form - form state management with edited tracking and regex
//! validation
//!
//! A [`FormStore`] keeps a baseline snapshot and a live snapshot of a set of
//! named fields. The UI feeds keystrokes into [`FormStore::change`], reads
//! [`FormStore::watch`] to know whether anything was edited, and calls
//! [`FormStore::validate`] on submit.
//!
//! ```
//! use masinton_form::{Field, Form, FormStore, ValidateOptions, Validation, ValidationOutcome};
//!
//! let form = Form::new()
//!     .with_field("username", Field::text())
//!     .with_field("password", Field::text());
//! let rules = Validation::new()
//!     .with_rule("username", r"\S", "Username must not be empty")?
//!     .with_rule("password", r"\S", "Password must not be empty")?;
//!
//! let mut store = FormStore::with_validation(form, rules);
//! store.change("username", "alice")?;
//! assert!(store.watch().edited);
//!
//! assert_eq!(store.validate(&ValidateOptions::all()), ValidationOutcome::Invalid);
//! store.change("password", "hunter2")?;
//! assert_eq!(store.validate(&ValidateOptions::all()), ValidationOutcome::Valid);
//!
//! store.reset();
//! assert!(!store.watch().edited);
//! # Ok::<(), masinton_form::FormError>(())
//! ```

pub mod config;
pub mod error;
pub mod state;

pub use config::FormConfig;
pub use error::FormError;
pub use state::{
    Field, FieldValue, Form, FormData, FormStore, SnapshotListener, ValidateOptions, Validation,
    ValidationOutcome, ValidationRule, Watch,
};
