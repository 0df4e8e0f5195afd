use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

/// Frame length the per-tick decay constants are tuned for.
pub const REFERENCE_FRAME: Duration = Duration::from_micros(16_667);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TickMode {
    /// Scale the decay by the time since the previous tick.
    #[default]
    Elapsed,
    /// Apply the decay once per tick, whatever the frame rate.
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Moving(f64),
    Arrived(f64),
}

/// Exponential approach of a value toward a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Easing {
    /// Fraction of the remaining distance covered per reference frame, in `(0, 1]`.
    pub decay: f64,
    /// Distance under which the value jumps onto the target.
    pub epsilon: f64,
    pub mode: TickMode,
}

impl Easing {
    pub fn factor(&self, elapsed: Option<Duration>) -> f64 {
        let factor = match (self.mode, elapsed) {
            (TickMode::Elapsed, Some(dt)) => {
                let frames = dt.as_secs_f64() / REFERENCE_FRAME.as_secs_f64();
                1.0 - (1.0 - self.decay).powf(frames)
            }
            _ => self.decay,
        };
        factor.clamp(0.0, 1.0)
    }

    pub fn step(&self, current: f64, target: f64, elapsed: Option<Duration>) -> Step {
        let diff = target - current;
        if diff.abs() < self.epsilon {
            Step::Arrived(target)
        } else {
            Step::Moving(current + diff * self.factor(elapsed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn easing(mode: TickMode) -> Easing {
        Easing {
            decay: 0.15,
            epsilon: 0.5,
            mode,
        }
    }

    #[test]
    fn test_fixed_steps_converge_monotonically() {
        let easing = easing(TickMode::Fixed);

        for target in [-90.0, 0.0, 33.3, 720.0, -1234.5] {
            let mut current = 0.0;
            let mut distance = f64::INFINITY;
            let mut ticks = 0;

            loop {
                ticks += 1;
                assert!(ticks < 1_000, "no convergence toward {target}");
                match easing.step(current, target, None) {
                    Step::Moving(next) => {
                        let remaining = (target - next).abs();
                        assert!(remaining < distance);
                        assert!((target - next).signum() == (target - current).signum());
                        distance = remaining;
                        current = next;
                    }
                    Step::Arrived(value) => {
                        assert_eq!(value, target);
                        break;
                    }
                }
            }
        }
    }

    #[test]
    fn test_elapsed_factor_matches_fixed_at_reference_rate() {
        let elapsed = easing(TickMode::Elapsed);
        let fixed = easing(TickMode::Fixed);

        let at_ref = elapsed.factor(Some(REFERENCE_FRAME));
        assert!((at_ref - fixed.factor(None)).abs() < 1e-4);
        assert_eq!(elapsed.factor(None), 0.15);
        assert_eq!(fixed.factor(Some(Duration::from_millis(100))), 0.15);
    }

    #[test]
    fn test_elapsed_factor_is_frame_rate_independent() {
        let easing = easing(TickMode::Elapsed);

        // two 120 Hz ticks cover the same ground as one 60 Hz tick
        let half = easing.factor(Some(REFERENCE_FRAME / 2));
        let two_halves = 1.0 - (1.0 - half).powi(2);
        let full = easing.factor(Some(REFERENCE_FRAME));

        assert!((two_halves - full).abs() < 1e-12);
        assert_eq!(easing.factor(Some(Duration::ZERO)), 0.0);
        assert!(easing.factor(Some(Duration::from_secs(10))) <= 1.0);
    }

    #[test]
    fn test_tick_mode_parsing() {
        assert_eq!("fixed".parse::<TickMode>().unwrap(), TickMode::Fixed);
        assert_eq!("ELAPSED".parse::<TickMode>().unwrap(), TickMode::Elapsed);
        assert!("vsync".parse::<TickMode>().is_err());
    }
}
