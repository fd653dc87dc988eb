//! Cancellable background tasks.

use gloo_timers::callback::{Interval, Timeout};

/// Owner of a recurring or delayed callback.
///
/// The callback stops when the handle is cancelled or dropped, so the scope
/// that started the task controls how long it runs.
#[must_use = "dropping a TaskHandle cancels the task"]
pub struct TaskHandle {
    task: Option<Task>,
}

enum Task {
    Interval(Interval),
    Timeout(Timeout),
}

impl TaskHandle {
    /// Run `callback` every `millis` milliseconds.
    pub fn every(millis: u32, callback: impl FnMut() + 'static) -> Self {
        Self {
            task: Some(Task::Interval(Interval::new(millis, callback))),
        }
    }

    /// Run `callback` once after `millis` milliseconds.
    pub fn after(millis: u32, callback: impl FnOnce() + 'static) -> Self {
        Self {
            task: Some(Task::Timeout(Timeout::new(millis, callback))),
        }
    }

    pub fn cancel(&mut self) {
        match self.task.take() {
            Some(Task::Interval(interval)) => {
                interval.cancel();
            }
            Some(Task::Timeout(timeout)) => {
                timeout.cancel();
            }
            None => {}
        }
    }

    /// Let the task run to completion without an owner.
    pub fn detach(mut self) {
        match self.task.take() {
            Some(Task::Interval(interval)) => {
                interval.forget();
            }
            Some(Task::Timeout(timeout)) => {
                timeout.forget();
            }
            None => {}
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
