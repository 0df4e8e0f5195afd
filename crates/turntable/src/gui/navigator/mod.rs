pub mod model;
pub mod view;

pub use model::{DialGeometry, LabelGeometry};
pub use view::draw;

pub const DIAL_RADIUS: f64 = 64.0;
pub const HUB_RADIUS: f64 = 24.0;
pub const LABEL_RADIUS: f64 = 110.0; // entry labels orbit outside the ring
pub const MARKER_OFFSET: f64 = 64.0; // reference dot, left of the hub
pub const MARKER_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 28.0;
pub const CLICK_SLOP: f64 = 4.0; // pointer travel that still counts as a click
pub const REFERENCE_ANGLE: f64 = 180.0; // rotation 0 puts the first entry at the far left
pub const LABEL_FONT_SIZE: f64 = 16.0;
pub const INACTIVE_ALPHA: f64 = 0.4;
