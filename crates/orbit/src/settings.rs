use crate::dial::{CLOSE_DELAY, DEFAULT_DECAY, DEFAULT_TOLERANCE, SNAP_EPSILON};
use crate::error::Error;
use crate::list::{DEFAULT_GAP, DEFAULT_SCROLL_MARGIN};
use crate::motion::{Easing, TickMode};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, DurationMilliSeconds, serde_as};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

/// How a drag that crosses the ±180° seam of `atan2` is accounted for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SeamPolicy {
    /// Take the short way around, so crossing the seam moves the dial a few degrees.
    #[default]
    Unwrap,
    /// Plain difference of the two readings; crossing the seam jumps by ~360°.
    Raw,
}

/// Which entry wins when more than one sits inside the tolerance window.
///
/// The window only opens on one side of the reference, so the first match in order is also the
/// one nearest to it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    #[default]
    First,
    Last,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DialSettings {
    /// Width of the window `[0, tolerance)` in which an entry counts as active, in degrees.
    pub tolerance: f64,
    pub decay: f64,
    pub snap_epsilon: f64,
    pub tick: TickMode,
    pub seam: SeamPolicy,
    pub overlap: OverlapPolicy,
    #[serde(rename = "close_delay_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub close_delay: Duration,
}

impl Default for DialSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            decay: DEFAULT_DECAY,
            snap_epsilon: SNAP_EPSILON,
            tick: TickMode::default(),
            seam: SeamPolicy::default(),
            overlap: OverlapPolicy::default(),
            close_delay: CLOSE_DELAY,
        }
    }
}

impl DialSettings {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(invalid("tolerance", "must be a finite angle >= 0"));
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(invalid("decay", "must lie in (0, 1]"));
        }
        if !(self.snap_epsilon.is_finite() && self.snap_epsilon > 0.0) {
            return Err(invalid("snap_epsilon", "must be a finite angle > 0"));
        }
        Ok(())
    }

    pub fn easing(&self) -> Easing {
        Easing {
            decay: self.decay,
            epsilon: self.snap_epsilon,
            mode: self.tick,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ListSettings {
    /// Spacing between rendered rows, in pixels.
    pub gap: f64,
    /// Added to a row's top edge when scrolling it into place.
    pub scroll_margin: f64,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            scroll_margin: DEFAULT_SCROLL_MARGIN,
        }
    }
}

impl ListSettings {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(invalid("gap", "must be a finite length >= 0"));
        }
        if !self.scroll_margin.is_finite() {
            return Err(invalid("scroll_margin", "must be finite"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> Error {
    Error::InvalidSetting { field, reason }
}
