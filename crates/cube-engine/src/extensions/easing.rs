// extensions/easing.rs
//
// Pure easing functions for animation interpolation.
// Parameterized families are plain `Copy` values, so one easing can drive any
// number of tweens at once.

use std::f32::consts::{PI, TAU};

/// Default overshoot for the back family.
pub const DEFAULT_OVERSHOOT: f32 = 1.70158;

/// Default period for the elastic family.
pub const DEFAULT_PERIOD: f32 = 0.3;

/// Easing function type.
///
/// Input is normalized progress. The output is not clamped: back and elastic
/// curves overshoot 1 on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// `t^p`.
    PowerIn(i32),
    /// Mirror of `PowerIn`, slow end.
    PowerOut(i32),
    /// `PowerIn` for the first half, `PowerOut` for the second.
    PowerInOut(i32),
    SineIn,
    SineOut,
    SineInOut,
    /// Pulls back below 0 before leaving.
    BackIn(f32),
    /// Overshoots past 1 then settles.
    BackOut(f32),
    /// Damped spring around 1.
    ElasticOut { amplitude: f32, period: f32 },
}

impl Easing {
    /// Power curve. The power is rounded to an integer; 0 falls back to 1.
    pub fn power_in(power: f32) -> Self {
        Easing::PowerIn(integer_power(power))
    }

    pub fn power_out(power: f32) -> Self {
        Easing::PowerOut(integer_power(power))
    }

    pub fn power_in_out(power: f32) -> Self {
        Easing::PowerInOut(integer_power(power))
    }

    /// Back curve. An overshoot of 0 falls back to [`DEFAULT_OVERSHOOT`].
    pub fn back_in(overshoot: f32) -> Self {
        Easing::BackIn(non_zero_or(overshoot, DEFAULT_OVERSHOOT))
    }

    pub fn back_out(overshoot: f32) -> Self {
        Easing::BackOut(non_zero_or(overshoot, DEFAULT_OVERSHOOT))
    }

    /// Elastic curve. A period of 0 falls back to [`DEFAULT_PERIOD`].
    pub fn elastic_out(amplitude: f32, period: f32) -> Self {
        Easing::ElasticOut {
            amplitude,
            period: non_zero_or(period, DEFAULT_PERIOD),
        }
    }

    /// Apply the easing function to normalized progress `t`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,

            Easing::PowerIn(p) => t.powi(p),
            Easing::PowerOut(p) => 1.0 - (t - 1.0).powi(p).abs(),
            Easing::PowerInOut(p) => {
                if t < 0.5 {
                    (t * 2.0).powi(p) / 2.0
                } else {
                    (1.0 - (t * 2.0 - 2.0).powi(p).abs()) / 2.0 + 0.5
                }
            }

            Easing::SineIn => 1.0 + (PI / 2.0 * t - PI / 2.0).sin(),
            Easing::SineOut => (PI / 2.0 * t).sin(),
            Easing::SineInOut => (1.0 + (PI * t - PI / 2.0).sin()) / 2.0,

            Easing::BackIn(s) => t * t * ((s + 1.0) * t - s),
            Easing::BackOut(s) => {
                let t = t - 1.0;
                t * t * ((s + 1.0) * t + s) + 1.0
            }

            Easing::ElasticOut { amplitude, period } => {
                let p1 = if amplitude >= 1.0 { amplitude } else { 1.0 };
                let p2 = period / if amplitude < 1.0 { amplitude } else { 1.0 };
                let shift = (1.0 / p1).asin();
                let p3 = p2 / TAU * if shift.is_nan() { 0.0 } else { shift };
                let p2 = TAU / p2;
                p1 * 2.0_f32.powf(-10.0 * t) * ((t - p3) * p2).sin() + 1.0
            }
        }
    }
}

fn integer_power(power: f32) -> i32 {
    non_zero_or(power, 1.0).round() as i32
}

fn non_zero_or(value: f32, fallback: f32) -> f32 {
    if value == 0.0 || value.is_nan() {
        fallback
    } else {
        value
    }
}

// -- Interpolation helpers --

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn families_hit_endpoints() {
        let curves = [
            Easing::power_in(2.0),
            Easing::power_out(3.0),
            Easing::power_in_out(4.0),
            Easing::SineIn,
            Easing::SineOut,
            Easing::SineInOut,
            Easing::back_in(0.0),
            Easing::back_out(2.0),
        ];
        for easing in curves {
            assert!(close(easing.apply(0.0), 0.0), "{:?} at 0", easing);
            assert!(close(easing.apply(1.0), 1.0), "{:?} at 1", easing);
        }
    }

    #[test]
    fn power_out_faster_start() {
        let mid = Easing::power_out(3.0).apply(0.5);
        assert!(close(mid, 0.875), "got {}", mid);
        assert!(close(Easing::power_in(3.0).apply(0.5), 0.125));
    }

    #[test]
    fn power_is_rounded_and_defaults_to_one() {
        assert_eq!(Easing::power_out(2.6), Easing::PowerOut(3));
        assert_eq!(Easing::power_in(0.0), Easing::PowerIn(1));
        assert!(close(Easing::power_in(0.0).apply(0.3), 0.3));
    }

    #[test]
    fn back_out_overshoots() {
        let easing = Easing::back_out(2.0);
        let peak = (1..100)
            .map(|i| easing.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "BackOut should overshoot, peak {}", peak);
        assert_eq!(Easing::back_out(0.0), Easing::BackOut(DEFAULT_OVERSHOOT));
    }

    #[test]
    fn back_in_dips_below_zero() {
        assert!(Easing::back_in(DEFAULT_OVERSHOOT).apply(0.2) < 0.0);
    }

    #[test]
    fn elastic_settles_on_one() {
        let easing = Easing::elastic_out(1.0, 0.0);
        assert_eq!(easing, Easing::ElasticOut { amplitude: 1.0, period: DEFAULT_PERIOD });
        assert!(close(easing.apply(0.0), 0.0));
        assert!((easing.apply(1.0) - 1.0).abs() < 1e-2);
        assert!(easing.apply(0.1) > 1.0);
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }
}
