//! Hook for the host UI's reactive state cell

use super::form_state::{Form, Watch};

/// Notified whenever the store installs a new current snapshot.
///
/// The host UI treats this as its notify-on-write cell and schedules a
/// re-render; the store never reads anything back from it.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotListener {
    fn snapshot_changed(&self, form: &Form, watch: Watch);
}

impl<F> SnapshotListener for F
where
    F: Fn(&Form, Watch),
{
    fn snapshot_changed(&self, form: &Form, watch: Watch) {
        self(form, watch)
    }
}
