//! Full data reset.
//!
//! # Responsibility
//! - Clear every storage key in one remove-many call.
//! - Restore the scheduled default reminders after a reset.
//!
//! # Invariants
//! - Callers see reset as all-or-nothing; any failure is one `StoreError`.
//! - Live notification handles are cancelled before their records vanish.

use crate::clock::Clock;
use crate::model::reminder::Reminder;
use crate::notify::NotificationScheduler;
use crate::repo::document_store::{DocumentStore, StorageKey, StoreResult};
use crate::service::reminder_service::ReminderService;
use log::{error, info};

/// Reset service over a document store, scheduler and clock.
pub struct ResetService<S: DocumentStore, N: NotificationScheduler, C: Clock> {
    store: S,
    scheduler: N,
    clock: C,
}

impl<S: DocumentStore, N: NotificationScheduler, C: Clock> ResetService<S, N, C> {
    pub fn new(store: S, scheduler: N, clock: C) -> Self {
        Self {
            store,
            scheduler,
            clock,
        }
    }

    /// Removes all six storage keys.
    pub fn reset_all_data(&self) -> StoreResult<()> {
        match self.store.remove_many(&StorageKey::ALL) {
            Ok(()) => {
                info!(
                    "event=data_reset module=reset status=ok keys={}",
                    StorageKey::ALL.len()
                );
                Ok(())
            }
            Err(err) => {
                error!("event=data_reset module=reset status=error error={err}");
                Err(err)
            }
        }
    }

    /// Cancels live reminders, clears all data, then re-seeds the scheduled
    /// default reminders. Cleared settings always read as default mode.
    ///
    /// Returns the reminder list stored after the reset.
    pub fn reset_and_restore_defaults(&self) -> StoreResult<Vec<Reminder>> {
        let reminders = ReminderService::new(&self.store, &self.scheduler, &self.clock);
        reminders.cancel_all(&reminders.get_reminders());

        self.reset_all_data()?;
        reminders.restore_default_schedule()
    }
}
