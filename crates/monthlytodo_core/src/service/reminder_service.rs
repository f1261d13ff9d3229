//! Reminder use-case service.
//!
//! # Responsibility
//! - Provide reminder record CRUD and reminder mode settings.
//! - Pair record changes with host notification scheduling/cancellation.
//!
//! # Invariants
//! - Every mutation rewrites the whole reminder list and returns it.
//! - While custom mode is active (`use_default == false`), every mutation
//!   mirrors the reminder list into `ReminderSettings::custom_reminders`.
//! - Scheduling failures never fail a record write; the record is stored
//!   without a notification handle.
//! - Deactivating a reminder cancels its trigger and clears the handle.

use crate::clock::{generate_id, Clock};
use crate::model::patch::apply_patch;
use crate::model::reminder::{
    default_reminders, Reminder, ReminderDraft, ReminderPatch, ReminderSettings,
};
use crate::notify::{NotificationPayload, NotificationScheduler, REMINDER_NOTIFICATION_TITLE};
use crate::repo::document_store::{DocumentStore, StorageKey, StoreResult};
use crate::service::load_or_default;
use log::{debug, error, info, warn};

const REMINDER_ID_PREFIX: &str = "reminder_";

/// Reminder service over a document store and a host notification scheduler.
pub struct ReminderService<S: DocumentStore, N: NotificationScheduler, C: Clock> {
    store: S,
    scheduler: N,
    clock: C,
}

impl<S: DocumentStore, N: NotificationScheduler, C: Clock> ReminderService<S, N, C> {
    pub fn new(store: S, scheduler: N, clock: C) -> Self {
        Self {
            store,
            scheduler,
            clock,
        }
    }

    /// Returns stored reminders, or an empty list.
    pub fn get_reminders(&self) -> Vec<Reminder> {
        load_or_default(&self.store, StorageKey::Reminders)
    }

    /// Appends a reminder built from `draft` with a fresh id.
    pub fn add_reminder(&self, draft: ReminderDraft) -> StoreResult<Vec<Reminder>> {
        let mut reminders = self.get_reminders();
        let id = self.next_reminder_id(&reminders);
        reminders.push(draft.into_reminder(id.clone()));
        self.write_reminders(&reminders)?;

        info!("event=reminder_add module=reminder status=ok reminder_id={id}");
        Ok(reminders)
    }

    /// Merges `patch` into one reminder. Unknown ids are a no-op.
    pub fn update_reminder(
        &self,
        reminder_id: &str,
        patch: ReminderPatch,
    ) -> StoreResult<Vec<Reminder>> {
        let mut reminders = self.get_reminders();
        let Some(reminder) = reminders.iter_mut().find(|r| r.id == reminder_id) else {
            debug!("event=reminder_update module=reminder status=not_found reminder_id={reminder_id}");
            return Ok(reminders);
        };
        apply_patch(reminder, patch);
        self.write_reminders(&reminders)?;

        info!("event=reminder_update module=reminder status=ok reminder_id={reminder_id}");
        Ok(reminders)
    }

    /// Removes one reminder record. Does not touch its notification.
    pub fn delete_reminder(&self, reminder_id: &str) -> StoreResult<Vec<Reminder>> {
        let mut reminders = self.get_reminders();
        let before = reminders.len();
        reminders.retain(|r| r.id != reminder_id);
        if reminders.len() == before {
            debug!("event=reminder_delete module=reminder status=not_found reminder_id={reminder_id}");
            return Ok(reminders);
        }
        self.write_reminders(&reminders)?;

        info!("event=reminder_delete module=reminder status=ok reminder_id={reminder_id}");
        Ok(reminders)
    }

    /// Returns reminder settings, defaulting to default mode.
    pub fn get_reminder_settings(&self) -> ReminderSettings {
        load_or_default(&self.store, StorageKey::ReminderSettings)
    }

    pub fn save_reminder_settings(&self, settings: &ReminderSettings) -> StoreResult<()> {
        self.store.set(StorageKey::ReminderSettings, settings)
    }

    /// The two built-in reminders dated today. Not persisted.
    pub fn default_reminders(&self) -> Vec<Reminder> {
        default_reminders(self.clock.today())
    }

    /// Asks the host for notification permission.
    pub fn request_permission(&self) -> bool {
        let granted = self.scheduler.request_permission();
        info!("event=notification_permission module=reminder status=ok granted={granted}");
        granted
    }

    /// Registers a daily trigger for `reminder`.
    ///
    /// Returns `None` when the host refuses or fails; never errors.
    pub fn schedule_reminder_notification(&self, reminder: &Reminder) -> Option<String> {
        let payload = NotificationPayload {
            title: REMINDER_NOTIFICATION_TITLE.to_string(),
            body: reminder.message.clone(),
            reminder_id: reminder.id.clone(),
        };
        match self.scheduler.schedule_daily(reminder.time, &payload) {
            Ok(handle) => {
                debug!(
                    "event=notification_schedule module=reminder status=ok reminder_id={} time={}",
                    reminder.id, reminder.time
                );
                Some(handle)
            }
            Err(err) => {
                warn!(
                    "event=notification_schedule module=reminder status=error reminder_id={} error={}",
                    reminder.id, err
                );
                None
            }
        }
    }

    /// Cancels a host trigger. Failures are logged, never returned.
    pub fn cancel_reminder_notification(&self, handle: &str) {
        if let Err(err) = self.scheduler.cancel(handle) {
            error!("event=notification_cancel module=reminder status=error error={err}");
        }
    }

    /// Handles of every stored reminder that currently has a trigger.
    ///
    /// Hosts that schedule on their own side read these before a mode switch
    /// or reset and cancel them themselves.
    pub fn live_notification_ids(&self) -> Vec<String> {
        self.get_reminders()
            .into_iter()
            .filter_map(|reminder| reminder.notification_id)
            .collect()
    }

    /// Saves a new reminder, scheduling it first when active.
    ///
    /// The id is derived from the current time and is also the id carried in
    /// the notification payload.
    pub fn create_reminder(&self, draft: ReminderDraft) -> StoreResult<Vec<Reminder>> {
        let mut reminders = self.get_reminders();
        let id = self.next_reminder_id(&reminders);
        let mut reminder = draft.into_reminder(id.clone());
        reminder.notification_id = if reminder.is_active {
            self.schedule_reminder_notification(&reminder)
        } else {
            None
        };
        let scheduled = reminder.notification_id.is_some();
        reminders.push(reminder);
        self.write_reminders(&reminders)?;

        info!("event=reminder_create module=reminder status=ok reminder_id={id} scheduled={scheduled}");
        Ok(reminders)
    }

    /// Replaces the editable fields of a reminder and reschedules it.
    pub fn edit_reminder(&self, reminder_id: &str, draft: ReminderDraft) -> StoreResult<Vec<Reminder>> {
        let reminders = self.get_reminders();
        let Some(existing) = reminders.iter().find(|r| r.id == reminder_id) else {
            debug!("event=reminder_edit module=reminder status=not_found reminder_id={reminder_id}");
            return Ok(reminders);
        };

        if let Some(handle) = existing.notification_id.as_deref() {
            self.cancel_reminder_notification(handle);
        }
        let mut patch = draft.into_patch();
        let mut edited = existing.clone();
        apply_patch(&mut edited, patch.clone());
        let notification_id = if edited.is_active {
            self.schedule_reminder_notification(&edited)
        } else {
            None
        };
        patch.notification_id = Some(notification_id);

        self.update_reminder(reminder_id, patch)
    }

    /// Cancels a reminder's trigger and deletes the record.
    pub fn remove_reminder(&self, reminder_id: &str) -> StoreResult<Vec<Reminder>> {
        let handle = self
            .get_reminders()
            .into_iter()
            .find(|r| r.id == reminder_id)
            .and_then(|r| r.notification_id);
        if let Some(handle) = handle.as_deref() {
            self.cancel_reminder_notification(handle);
        }
        self.delete_reminder(reminder_id)
    }

    /// Activates or deactivates a reminder, scheduling or cancelling its
    /// trigger to match.
    pub fn set_reminder_active(&self, reminder_id: &str, active: bool) -> StoreResult<Vec<Reminder>> {
        let reminders = self.get_reminders();
        let Some(existing) = reminders.iter().find(|r| r.id == reminder_id) else {
            debug!("event=reminder_activate module=reminder status=not_found reminder_id={reminder_id}");
            return Ok(reminders);
        };

        if let Some(handle) = existing.notification_id.as_deref() {
            self.cancel_reminder_notification(handle);
        }
        let notification_id = if active {
            self.schedule_reminder_notification(existing)
        } else {
            None
        };

        self.update_reminder(
            reminder_id,
            ReminderPatch {
                is_active: Some(active),
                notification_id: Some(notification_id),
                ..ReminderPatch::default()
            },
        )
    }

    /// Flips a reminder between active and inactive.
    pub fn toggle_reminder_active(&self, reminder_id: &str) -> StoreResult<Vec<Reminder>> {
        let reminders = self.get_reminders();
        match reminders.iter().find(|r| r.id == reminder_id) {
            Some(reminder) => self.set_reminder_active(reminder_id, !reminder.is_active),
            None => Ok(reminders),
        }
    }

    /// Switches between the default and custom reminder sets.
    ///
    /// Saves the mode, cancels every live trigger, then schedules and stores
    /// either the defaults or the active custom reminders.
    pub fn set_reminder_mode(&self, use_default: bool) -> StoreResult<Vec<Reminder>> {
        let mut settings = self.get_reminder_settings();
        settings.use_default = use_default;
        self.save_reminder_settings(&settings)?;

        self.cancel_all(&self.get_reminders());

        let source = if use_default {
            self.default_reminders()
        } else {
            settings.custom_reminders.clone()
        };
        let reminders = self.schedule_all(source);
        self.write_reminders(&reminders)?;

        info!(
            "event=reminder_mode module=reminder status=ok use_default={} count={}",
            use_default,
            reminders.len()
        );
        Ok(reminders)
    }

    /// Seeds scheduled default reminders on first launch.
    ///
    /// Runs only when permission is granted, default mode is active and no
    /// reminders exist yet; otherwise returns the stored reminders.
    pub fn ensure_default_reminders(&self) -> StoreResult<Vec<Reminder>> {
        if !self.request_permission() {
            return Ok(self.get_reminders());
        }
        let existing = self.get_reminders();
        if !self.get_reminder_settings().use_default || !existing.is_empty() {
            return Ok(existing);
        }
        self.restore_default_schedule()
    }

    /// Schedules and stores the default reminders, replacing the list.
    pub(crate) fn restore_default_schedule(&self) -> StoreResult<Vec<Reminder>> {
        let reminders = self.schedule_all(self.default_reminders());
        self.write_reminders(&reminders)?;
        info!(
            "event=reminder_defaults module=reminder status=ok count={}",
            reminders.len()
        );
        Ok(reminders)
    }

    /// Cancels every live trigger in `reminders`.
    pub(crate) fn cancel_all(&self, reminders: &[Reminder]) {
        for handle in reminders.iter().filter_map(|r| r.notification_id.as_deref()) {
            self.cancel_reminder_notification(handle);
        }
    }

    fn schedule_all(&self, reminders: Vec<Reminder>) -> Vec<Reminder> {
        reminders
            .into_iter()
            .map(|mut reminder| {
                reminder.notification_id = if reminder.is_active {
                    self.schedule_reminder_notification(&reminder)
                } else {
                    None
                };
                reminder
            })
            .collect()
    }

    fn next_reminder_id(&self, reminders: &[Reminder]) -> String {
        generate_id(REMINDER_ID_PREFIX, self.clock.now_millis(), |candidate| {
            reminders.iter().any(|r| r.id == candidate)
        })
    }

    fn write_reminders(&self, reminders: &[Reminder]) -> StoreResult<()> {
        self.store.set(StorageKey::Reminders, &reminders)?;

        let mut settings = self.get_reminder_settings();
        if !settings.use_default {
            settings.custom_reminders = reminders.to_vec();
            self.save_reminder_settings(&settings)?;
        }
        Ok(())
    }
}
