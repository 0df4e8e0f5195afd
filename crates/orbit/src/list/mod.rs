pub mod pitch;
pub mod tracker;

pub use pitch::{ItemPitch, ScrollState, index_at};
pub use tracker::{ActiveItemTracker, ScrollContainer};

pub const DEFAULT_GAP: f64 = 8.0;
pub const DEFAULT_SCROLL_MARGIN: f64 = 8.0;
