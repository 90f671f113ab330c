//! Timed interpolation driven by the host's frame clock.

use std::time::Duration;

use serde::Deserialize;

use crate::color::{self, Tint};

/// A value that can be linearly interpolated.
pub trait Lerp: Copy {
    /// Returns `self` at `t = 0` and `other` at `t = 1`.
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Tint {
    fn lerp(self, other: Self, t: f32) -> Self {
        color::mix(self, other, t)
    }
}

/// Maps linear progress in `[0, 1]` to eased progress.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Accelerates quickly and settles slowly.
    /// Equivalent to `CubicBezier { 0.4, 0.0, 0.2, 1.0 }`.
    FastOutSlowIn,
    /// A CSS-style cubic Bezier timing curve through
    /// `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Default for Easing {
    fn default() -> Self {
        Easing::FastOutSlowIn
    }
}

const BISECTION_STEPS: usize = 32;

impl Easing {
    pub fn apply(self, progress: f32) -> f32 {
        let progress = progress.clamp(0., 1.);
        match self {
            Easing::Linear => progress,
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0., 0.2, 1., progress),
            Easing::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, progress),
        }
    }
}

fn bezier_component(p1: f32, p2: f32, t: f32) -> f32 {
    let u = 1. - t;
    3. * u * u * t * p1 + 3. * u * t * t * p2 + t * t * t
}

/// Solves the curve's x for `progress`, then evaluates y there.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0. || progress >= 1. {
        return progress;
    }

    // x(t) is monotonic for x1, x2 in [0, 1].
    let x1 = x1.clamp(0., 1.);
    let x2 = x2.clamp(0., 1.);

    let mut low = 0.;
    let mut high = 1.;
    let mut t = progress;
    for _ in 0..BISECTION_STEPS {
        t = (low + high) / 2.;
        if bezier_component(x1, x2, t) < progress {
            low = t;
        } else {
            high = t;
        }
    }
    bezier_component(y1, y2, t)
}

/// Computes the value of a transition from `start` to `end` lasting
/// `duration`, `elapsed` time after it began.
///
/// A zero `duration` yields `end` immediately.
pub fn interpolate<T: Lerp>(
    start: T,
    end: T,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
) -> T {
    if duration.is_zero() {
        return end;
    }
    let progress = elapsed.as_secs_f32() / duration.as_secs_f32();
    start.lerp(end, easing.apply(progress))
}

/// A value that eases toward its target as the host advances time.
///
/// Retargeting mid-transition starts the new transition from the
/// value currently shown, so reversing never snaps.
#[derive(Debug, Clone)]
pub struct Animated<T> {
    start: T,
    target: T,
    current: T,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl<T: Lerp + PartialEq> Animated<T> {
    /// Creates an animation resting at `value`.
    pub fn new(value: T, duration: Duration, easing: Easing) -> Self {
        Self {
            start: value,
            target: value,
            current: value,
            elapsed: duration,
            duration,
            easing,
        }
    }

    pub fn value(&self) -> T {
        self.current
    }

    pub fn target(&self) -> T {
        self.target
    }

    pub fn is_running(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Begins a transition from the current value to `target`.
    ///
    /// Does nothing if `target` is already the target.
    pub fn animate_to(&mut self, target: T) {
        if target == self.target {
            return;
        }
        self.start = self.current;
        self.target = target;
        self.elapsed = Duration::ZERO;
        self.current = self.sample();
    }

    /// Jumps to `value` with no transition.
    pub fn snap_to(&mut self, value: T) {
        self.start = value;
        self.target = value;
        self.current = value;
        self.elapsed = self.duration;
    }

    /// Advances the transition by `dt`. Returns whether the
    /// value changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.is_running() {
            return false;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let previous = self.current;
        self.current = self.sample();
        self.current != previous
    }

    fn sample(&self) -> T {
        interpolate(
            self.start,
            self.target,
            self.duration,
            self.elapsed,
            self.easing,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_300: Duration = Duration::from_millis(300);

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn interpolate_endpoints() {
        for easing in [Easing::Linear, Easing::FastOutSlowIn] {
            assert_eq!(interpolate(100., 250., MS_300, Duration::ZERO, easing), 100.);
            assert_eq!(interpolate(100., 250., MS_300, MS_300, easing), 250.);
            assert_eq!(
                interpolate(100., 250., MS_300, Duration::from_secs(5), easing),
                250.
            );
        }
    }

    #[test]
    fn zero_duration_snaps_to_end() {
        assert_eq!(
            interpolate(0., 1., Duration::ZERO, Duration::ZERO, Easing::Linear),
            1.
        );
    }

    #[test]
    fn linear_midpoint() {
        let v = interpolate(
            100.,
            250.,
            MS_300,
            Duration::from_millis(150),
            Easing::Linear,
        );
        assert!(approx(v, 175.));
    }

    #[test]
    fn fast_out_slow_in_leads_linear() {
        let eased = Easing::FastOutSlowIn.apply(0.5);
        assert!(eased > 0.5 && eased < 1.);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut last = 0.;
        for i in 0..=100 {
            let v = Easing::FastOutSlowIn.apply(i as f32 / 100.);
            assert!(v >= last - 1e-4);
            last = v;
        }
        assert!(approx(last, 1.));
    }

    #[test]
    fn animated_reaches_target() {
        let mut extent = Animated::new(100., MS_300, Easing::FastOutSlowIn);
        assert!(!extent.is_running());
        extent.animate_to(250.);
        assert!(extent.is_running());
        assert_eq!(extent.value(), 100.);

        let mut last = extent.value();
        while extent.is_running() {
            assert!(extent.advance(Duration::from_millis(16)));
            assert!(extent.value() >= last);
            last = extent.value();
        }
        assert_eq!(extent.value(), 250.);
        assert!(!extent.advance(Duration::from_millis(16)));
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut extent = Animated::new(100., MS_300, Easing::Linear);
        extent.animate_to(250.);
        extent.advance(Duration::from_millis(150));
        let midway = extent.value();
        assert!(approx(midway, 175.));

        extent.animate_to(100.);
        assert_eq!(extent.value(), midway);
        extent.advance(Duration::from_millis(150));
        assert!(approx(extent.value(), (midway + 100.) / 2.));
    }

    #[test]
    fn same_target_does_not_restart() {
        let mut extent = Animated::new(0., MS_300, Easing::Linear);
        extent.animate_to(10.);
        extent.advance(Duration::from_millis(100));
        let value = extent.value();
        extent.animate_to(10.);
        assert_eq!(extent.value(), value);
        assert!(extent.advance(Duration::from_millis(100)));
        assert!(extent.value() > value);
    }

    #[test]
    fn snap_skips_transition() {
        let mut extent = Animated::new(0., MS_300, Easing::Linear);
        extent.snap_to(42.);
        assert!(!extent.is_running());
        assert_eq!(extent.value(), 42.);
    }

    #[test]
    fn tint_animation() {
        let mut tint = Animated::new(color::black(), MS_300, Easing::Linear);
        tint.animate_to(color::white());
        tint.advance(MS_300);
        assert_eq!(color::to_rgba8(tint.value()), [255, 255, 255, 255]);
    }
}
