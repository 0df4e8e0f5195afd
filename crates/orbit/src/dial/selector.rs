use super::slots::SlotLayout;
use crate::error::Error;
use crate::geometry::{Point, angle_of};
use crate::item::{Item, ensure_unique_ids};
use crate::motion::{Easing, Step};
use crate::settings::{DialSettings, SeamPolicy};
use crate::task::{Cancel, TaskSlot};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    Dragging { last_pointer_angle: f64 },
    Snapping { index: usize, target: f64 },
}

/// Outcome of one frame of the snap animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapTick {
    /// Nothing to animate; the host should stop its frame task.
    Idle,
    Moving(f64),
    /// Reported once, on the frame the rotation lands on its target.
    Converged { index: usize, rotation: f64 },
}

/// Drag-rotatable dial whose active entry is the one resting at the reference position.
///
/// `H` is the host's handle for the repeating frame task that drives [`RotarySelector::tick`]
/// while snapping. The selector keeps it and cancels it whenever the animation is superseded.
#[derive(Debug)]
pub struct RotarySelector<H: Cancel> {
    entries: Vec<Item>,
    layout: SlotLayout,
    easing: Easing,
    seam: SeamPolicy,
    close_delay: Duration,
    rotation: f64,
    phase: Phase,
    active: Option<usize>,
    snap_task: TaskSlot<H>,
}

impl<H: Cancel> RotarySelector<H> {
    pub fn new(entries: Vec<Item>, settings: &DialSettings) -> Result<Self, Error> {
        let mut selector = Self {
            entries: Vec::new(),
            layout: SlotLayout::new(0, settings.tolerance, settings.overlap),
            easing: settings.easing(),
            seam: settings.seam,
            close_delay: settings.close_delay,
            rotation: 0.0,
            phase: Phase::Idle,
            active: None,
            snap_task: TaskSlot::empty(),
        };
        selector.reconfigure(entries, settings)?;
        Ok(selector)
    }

    /// Swaps in new entries and settings, resetting the dial to rest at the first entry.
    pub fn reconfigure(&mut self, entries: Vec<Item>, settings: &DialSettings) -> Result<(), Error> {
        settings.validate()?;
        ensure_unique_ids(&entries)?;

        self.snap_task.cancel();
        self.layout = SlotLayout::new(entries.len(), settings.tolerance, settings.overlap);
        if self.layout.windows_overlap() {
            log::warn!(
                "{} dial entries are {:.1}° apart, inside the {}° window; resolving by {}",
                entries.len(),
                self.layout.spacing().unwrap_or_default(),
                settings.tolerance,
                settings.overlap
            );
        }
        self.entries = entries;
        self.easing = settings.easing();
        self.seam = settings.seam;
        self.close_delay = settings.close_delay;
        self.rotation = 0.0;
        self.phase = Phase::Idle;
        self.active = self.layout.active(self.rotation);
        Ok(())
    }

    pub fn entries(&self) -> &[Item] {
        &self.entries
    }

    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn is_snapping(&self) -> bool {
        matches!(self.phase, Phase::Snapping { .. })
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&Item> {
        self.active.and_then(|i| self.entries.get(i))
    }

    /// Delay between convergence and the host closing the dial.
    pub fn close_delay(&self) -> Duration {
        self.close_delay
    }

    pub fn pointer_down(&mut self, pointer: Point, center: Point) {
        if self.snap_task.cancel() {
            log::debug!("snap interrupted by drag at {:.1}°", self.rotation);
        }
        self.phase = Phase::Dragging {
            last_pointer_angle: angle_of(pointer, center),
        };
    }

    /// Returns the new rotation, or `None` when no drag is in progress.
    pub fn pointer_move(&mut self, pointer: Point, center: Point) -> Option<f64> {
        let Phase::Dragging { last_pointer_angle } = &mut self.phase else {
            return None;
        };
        let now = angle_of(pointer, center);
        self.rotation += self.seam.delta(*last_pointer_angle, now);
        *last_pointer_angle = now;
        self.refresh_active();
        Some(self.rotation)
    }

    pub fn pointer_up(&mut self) {
        self.end_drag();
    }

    /// The pointer left the tracking area mid-gesture; treated like a release.
    pub fn pointer_leave(&mut self) {
        self.end_drag();
    }

    fn end_drag(&mut self) {
        if self.is_dragging() {
            log::debug!("drag released at {:.1}°", self.rotation);
            self.phase = Phase::Idle;
        }
    }

    /// Starts snapping entry `index` onto the reference position.
    ///
    /// `schedule` is called once to start the host's frame task; its handle replaces (and
    /// cancels) any previous one. Returns `false` without side effects for an unknown entry.
    pub fn select(&mut self, index: usize, schedule: impl FnOnce() -> H) -> bool {
        let Some(target) = self.layout.target(index) else {
            return false;
        };

        log::debug!("snapping entry {index} from {:.1}° to {target:.1}°", self.rotation);
        self.snap_task.cancel();
        self.phase = Phase::Snapping { index, target };
        self.snap_task.replace(schedule());
        true
    }

    /// Advances the snap animation by one frame. `elapsed` is the time since the previous frame,
    /// if the host knows it.
    pub fn tick(&mut self, elapsed: Option<Duration>) -> SnapTick {
        let Phase::Snapping { index, target } = self.phase else {
            return SnapTick::Idle;
        };

        match self.easing.step(self.rotation, target, elapsed) {
            Step::Moving(rotation) => {
                log::trace!("snap tick {rotation:.3}° -> {target:.1}°");
                self.rotation = rotation;
                self.refresh_active();
                SnapTick::Moving(rotation)
            }
            Step::Arrived(rotation) => {
                log::debug!("snap converged on entry {index}");
                self.rotation = rotation;
                self.phase = Phase::Idle;
                self.snap_task.release();
                self.refresh_active();
                SnapTick::Converged { index, rotation }
            }
        }
    }

    /// Cancels any pending animation; for component teardown.
    pub fn shutdown(&mut self) {
        self.snap_task.cancel();
        self.phase = Phase::Idle;
    }

    // Between windows the previous entry stays active.
    fn refresh_active(&mut self) {
        if let Some(index) = self.layout.active(self.rotation) {
            self.active = Some(index);
        }
    }
}
