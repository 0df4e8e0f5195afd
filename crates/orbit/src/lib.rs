//! Headless state machines behind the turntable widgets: a drag-rotatable dial
//! that snaps onto its entries, and a scroll-driven active-row tracker.

pub mod dial;
pub mod error;
pub mod geometry;
pub mod item;
pub mod list;
mod macros;
pub mod motion;
pub mod settings;
pub mod task;

pub use error::Error;
pub use geometry::Point;
pub use item::{Item, ItemId, Label, TrackLength};
