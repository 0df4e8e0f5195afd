use std::time::Duration;

pub mod selector;
pub mod slots;

pub use selector::{Phase, RotarySelector, SnapTick};
pub use slots::SlotLayout;

pub const SLOT_SPAN: f64 = 180.0; // entries fan out over half a turn
pub const DEFAULT_TOLERANCE: f64 = 10.0;
pub const DEFAULT_DECAY: f64 = 0.15;
pub const SNAP_EPSILON: f64 = 0.5;
pub const CLOSE_DELAY: Duration = Duration::from_millis(100);
