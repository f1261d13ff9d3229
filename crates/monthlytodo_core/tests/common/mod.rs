#![allow(dead_code)]

use monthlytodo_core::{NotificationError, NotificationPayload, NotificationScheduler, ReminderTime};
use std::cell::{Cell, RefCell};

/// Scheduler double recording every host call.
#[derive(Default)]
pub struct RecordingScheduler {
    pub denied: Cell<bool>,
    pub failing: Cell<bool>,
    next_handle: Cell<u32>,
    pub scheduled: RefCell<Vec<(String, ReminderTime, NotificationPayload)>>,
    pub cancelled: RefCell<Vec<String>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled_handles(&self) -> Vec<String> {
        self.scheduled
            .borrow()
            .iter()
            .map(|(handle, _, _)| handle.clone())
            .collect()
    }

    pub fn cancelled_handles(&self) -> Vec<String> {
        self.cancelled.borrow().clone()
    }
}

impl NotificationScheduler for RecordingScheduler {
    fn request_permission(&self) -> bool {
        !self.denied.get()
    }

    fn schedule_daily(
        &self,
        time: ReminderTime,
        payload: &NotificationPayload,
    ) -> Result<String, NotificationError> {
        if self.failing.get() {
            return Err(NotificationError::Platform("channel missing".to_string()));
        }
        let next = self.next_handle.get() + 1;
        self.next_handle.set(next);
        let handle = format!("n{next}");
        self.scheduled
            .borrow_mut()
            .push((handle.clone(), time, payload.clone()));
        Ok(handle)
    }

    fn cancel(&self, handle: &str) -> Result<(), NotificationError> {
        self.cancelled.borrow_mut().push(handle.to_string());
        Ok(())
    }
}
