//! Time-based tweens between visual states.

use super::palette::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    CubicIn,
    CubicOut,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::CubicIn => t * t * t,
            Ease::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
        }
    }
}

/// Values that can be blended; `t` runs from 0 (self) to 1 (other).
pub trait Interpolate: Clone {
    fn interpolate(&self, other: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Rgb {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        let channel = |a: u8, b: u8| (a as f64).interpolate(&(b as f64), t).round().clamp(0.0, 255.0) as u8;
        Rgb::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

/// Timing of one tween: when it starts, how long it waits, how long it runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub delay_ms: f64,
    pub duration_ms: f64,
    pub ease: Ease,
}

impl Timing {
    pub fn new(duration_ms: f64, ease: Ease) -> Self {
        Self {
            delay_ms: 0.0,
            duration_ms,
            ease,
        }
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween<V> {
    pub from: V,
    pub to: V,
    pub started_ms: f64,
    pub timing: Timing,
}

impl<V: Interpolate> Tween<V> {
    pub fn new(from: V, to: V, started_ms: f64, timing: Timing) -> Self {
        Self {
            from,
            to,
            started_ms,
            timing,
        }
    }

    fn progress(&self, now_ms: f64) -> f64 {
        let elapsed = now_ms - self.started_ms - self.timing.delay_ms;
        if elapsed <= 0.0 {
            0.0
        } else if self.timing.duration_ms <= 0.0 {
            1.0
        } else {
            (elapsed / self.timing.duration_ms).min(1.0)
        }
    }

    pub fn value_at(&self, now_ms: f64) -> V {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            return self.to.clone();
        }
        self.from.interpolate(&self.to, self.timing.ease.apply(p))
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        for ease in [Ease::Linear, Ease::CubicIn, Ease::CubicOut] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
        assert_eq!(Ease::CubicIn.apply(0.5), 0.125);
        assert_eq!(Ease::CubicOut.apply(0.5), 0.875);
    }

    #[test]
    fn tween_waits_for_its_delay() {
        let tween = Tween::new(0.0, 100.0, 1000.0, Timing::new(100.0, Ease::Linear).with_delay(50.0));
        assert_eq!(tween.value_at(1000.0), 0.0);
        assert_eq!(tween.value_at(1050.0), 0.0);
        assert_eq!(tween.value_at(1100.0), 50.0);
        assert_eq!(tween.value_at(1150.0), 100.0);
        assert!(tween.is_finished(1150.0));
    }

    #[test]
    fn colors_blend_per_channel() {
        let mid = Rgb::new(0, 100, 200).interpolate(&Rgb::new(100, 100, 0), 0.5);
        assert_eq!(mid, Rgb::new(50, 100, 100));
    }
}
