//! Ownership of a host's repeating frame task.
//!
//! Hosts schedule the per-frame work themselves (a gtk tick callback, a timer, a test loop)
//! and hand the resulting handle to a [`TaskSlot`]. At most one task lives in a slot; storing a
//! new one cancels the old one, and dropping the slot cancels whatever is left.

use std::fmt;

/// A handle to a scheduled repeating task.
pub trait Cancel {
    /// Stops the task. Called at most once per handle.
    fn cancel(self);
}

/// For hosts that drive ticks synchronously and have nothing to unschedule.
impl Cancel for () {
    fn cancel(self) {}
}

pub struct TaskSlot<H: Cancel> {
    handle: Option<H>,
}

impl<H: Cancel> TaskSlot<H> {
    pub const fn empty() -> Self {
        Self { handle: None }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Cancels the running task, if any, then takes ownership of `handle`.
    pub fn replace(&mut self, handle: H) {
        self.cancel();
        self.handle = Some(handle);
    }

    /// Returns `true` when a task was running.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Forgets the handle without cancelling it, for tasks that have already stopped themselves.
    pub fn release(&mut self) -> Option<H> {
        self.handle.take()
    }
}

impl<H: Cancel> Default for TaskSlot<H> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<H: Cancel> Drop for TaskSlot<H> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<H: Cancel> fmt::Debug for TaskSlot<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSlot")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Cancel;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Handle that records whether it was cancelled.
    #[derive(Debug, Clone, Default)]
    pub struct CancelCounter {
        cancelled: Rc<Cell<u32>>,
    }

    impl CancelCounter {
        pub fn handle(&self) -> CountingHandle {
            CountingHandle(self.cancelled.clone())
        }

        pub fn cancellations(&self) -> u32 {
            self.cancelled.get()
        }
    }

    #[derive(Debug)]
    pub struct CountingHandle(Rc<Cell<u32>>);

    impl Cancel for CountingHandle {
        fn cancel(self) {
            self.0.set(self.0.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CancelCounter;
    use super::*;

    #[test]
    fn test_replace_cancels_previous() {
        let (first, second) = (CancelCounter::default(), CancelCounter::default());
        let mut slot = TaskSlot::empty();

        slot.replace(first.handle());
        slot.replace(second.handle());

        assert_eq!(first.cancellations(), 1);
        assert_eq!(second.cancellations(), 0);
        assert!(slot.is_active());
    }

    #[test]
    fn test_release_does_not_cancel() {
        let counter = CancelCounter::default();
        let mut slot = TaskSlot::empty();

        slot.replace(counter.handle());
        assert!(slot.release().is_some());
        drop(slot);

        assert_eq!(counter.cancellations(), 0);
    }

    #[test]
    fn test_drop_cancels_once() {
        let counter = CancelCounter::default();
        {
            let mut slot = TaskSlot::empty();
            slot.replace(counter.handle());
            assert!(slot.cancel());
            assert!(!slot.cancel());
        }
        assert_eq!(counter.cancellations(), 1);

        {
            let mut slot = TaskSlot::empty();
            slot.replace(counter.handle());
        }
        assert_eq!(counter.cancellations(), 2);
    }
}
