//! Form domain layer
//!
//! Field values and snapshots, the store that moves between a baseline and
//! the live snapshot, and the regex validation that runs over it.

mod field;
mod form_state;
mod listener;
mod store;
mod validation;

pub use field::{Field, FieldValue};
pub use form_state::{Form, FormData, Watch};
pub use listener::SnapshotListener;
pub use store::FormStore;
pub use validation::{ValidateOptions, Validation, ValidationOutcome, ValidationRule};
