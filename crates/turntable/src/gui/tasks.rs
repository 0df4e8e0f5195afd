use gtk::prelude::*;
use gtk4 as gtk;
use orbit::task::Cancel;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// A widget tick callback, owned through an `orbit::task::TaskSlot`.
pub struct FrameTask {
    id: gtk::TickCallbackId,
    finished: Rc<Cell<bool>>,
}

impl FrameTask {
    /// Calls `frame` once per frame of `widget` with the time since the previous frame (`None`
    /// on the first) until it returns `Break`.
    pub fn start<W, F>(widget: &W, frame: F) -> Self
    where
        W: IsA<gtk::Widget>,
        F: FnMut(Option<Duration>) -> glib::ControlFlow + 'static,
    {
        let finished = Rc::new(Cell::new(false));
        let last_frame = Cell::new(None::<i64>);
        let frame = RefCell::new(frame);

        let done = finished.clone();
        let id = widget.add_tick_callback(move |_, clock| {
            let now = clock.frame_time();
            let elapsed = last_frame
                .replace(Some(now))
                .map(|prev| Duration::from_micros(now.saturating_sub(prev).max(0) as u64));

            let flow = (frame.borrow_mut())(elapsed);
            if flow == glib::ControlFlow::Break {
                done.set(true);
            }
            flow
        });

        Self { id, finished }
    }
}

impl Cancel for FrameTask {
    fn cancel(self) {
        // gtk complains about removing a callback that already returned Break
        if !self.finished.get() {
            self.id.remove();
        }
    }
}

impl fmt::Debug for FrameTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameTask")
            .field("finished", &self.finished.get())
            .finish()
    }
}

/// A one-shot main loop timeout that can be called off until it fires.
pub struct DelayTask {
    id: glib::SourceId,
    fired: Rc<Cell<bool>>,
}

impl DelayTask {
    pub fn start<F>(delay: Duration, func: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let fired = Rc::new(Cell::new(false));
        let done = fired.clone();
        let id = glib::timeout_add_local_once(delay, move || {
            done.set(true);
            func();
        });
        Self { id, fired }
    }
}

impl Cancel for DelayTask {
    fn cancel(self) {
        if !self.fired.get() {
            self.id.remove();
        }
    }
}

impl fmt::Debug for DelayTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayTask")
            .field("fired", &self.fired.get())
            .finish()
    }
}
