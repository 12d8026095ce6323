//=========================================================================
// Interpolation
//=========================================================================
//
// Time-driven blending between control points.
//
// Architecture:
//   Clock → Interpolation::normal() → Interpolator::interpolate(points)
//
// The normal grows by `speed` per second from the moment the
// interpolation was started; looping wraps it into [0, 1).
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::clock::Clock;

//=== InterpolationError ==================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InterpolationError {
    #[error("linear interpolation needs exactly 2 points, got {0}")]
    PointCount(usize),

    #[error("cannot interpolate over zero points")]
    Empty,
}

//=== Interpolator Trait ==================================================

/// Blends a set of control points at a given normal.
pub trait Interpolator {
    fn interpolate(&self, normal: f32, points: &[Vec2]) -> Result<Vec2, InterpolationError>;
}

/// Straight line between two points.
pub fn lerp(normal: f32, from: Vec2, to: Vec2) -> Vec2 {
    from + (to - from) * normal
}

/// Straight line between exactly two points.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl Interpolator for Linear {
    fn interpolate(&self, normal: f32, points: &[Vec2]) -> Result<Vec2, InterpolationError> {
        match points {
            [from, to] => Ok(lerp(normal, *from, *to)),
            _ => Err(InterpolationError::PointCount(points.len())),
        }
    }
}

/// Bezier curve over any number of control points, evaluated by repeated
/// pairwise linear blending.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bezier;

impl Interpolator for Bezier {
    fn interpolate(&self, normal: f32, points: &[Vec2]) -> Result<Vec2, InterpolationError> {
        let mut level: Vec<Vec2> = points.to_vec();

        while level.len() > 1 {
            for i in 0..level.len() - 1 {
                level[i] = lerp(normal, level[i], level[i + 1]);
            }
            level.pop();
        }

        level.first().copied().ok_or(InterpolationError::Empty)
    }
}

//=== Interpolation =======================================================

/// Clock-driven interpolation over a default set of points.
///
/// ```rust
/// use cadence::core::clock::ManualClock;
/// use cadence::core::interpolation::{Interpolation, Linear};
/// use glam::Vec2;
///
/// let clock = ManualClock::new();
/// let points = vec![Vec2::ZERO, Vec2::new(100.0, 0.0)];
/// let mut slide = Interpolation::new(clock.clone(), Linear, points);
/// slide.start(2.0); // two sweeps per second
///
/// clock.advance(250);
/// assert_eq!(slide.value().unwrap(), Vec2::new(50.0, 0.0));
/// ```
pub struct Interpolation<C: Clock, I: Interpolator> {
    clock: C,
    interpolator: I,
    points: Vec<Vec2>,
    start_time: u64,
    speed: f32,
    looping: bool,
}

impl<C: Clock, I: Interpolator> Interpolation<C, I> {
    /// Creates a stopped interpolation (speed 0) over `points`.
    pub fn new(clock: C, interpolator: I, points: Vec<Vec2>) -> Self {
        let start_time = clock.now_millis();
        Self {
            clock,
            interpolator,
            points,
            start_time,
            speed: 0.0,
            looping: false,
        }
    }

    /// Restarts from normal 0 at `speed` sweeps per second.
    pub fn start(&mut self, speed: f32) {
        self.start_time = self.clock.now_millis();
        self.speed = speed;
    }

    /// Restarts from normal 0 keeping the current speed.
    pub fn reset(&mut self) {
        self.start_time = self.clock.now_millis();
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn set_points(&mut self, points: Vec<Vec2>) {
        self.points = points;
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Progress since the last start, wrapped into `[0, 1)` when looping.
    pub fn normal(&self) -> f32 {
        let elapsed = self.clock.now_millis().saturating_sub(self.start_time);
        let normal = elapsed as f32 * self.speed / 1000.0;

        if self.looping {
            normal.rem_euclid(1.0)
        } else {
            normal
        }
    }

    /// Interpolates the default points at the current normal.
    pub fn value(&self) -> Result<Vec2, InterpolationError> {
        self.value_of(&self.points)
    }

    /// Interpolates `points` at the current normal.
    pub fn value_of(&self, points: &[Vec2]) -> Result<Vec2, InterpolationError> {
        self.interpolator.interpolate(self.normal(), points)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    //=====================================================================
    // Interpolator Tests
    //=====================================================================

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let a = Vec2::new(0.0, 10.0);
        let b = Vec2::new(10.0, 30.0);

        assert_eq!(lerp(0.0, a, b), a);
        assert_eq!(lerp(1.0, a, b), b);
        assert_eq!(lerp(0.5, a, b), Vec2::new(5.0, 20.0));
    }

    #[test]
    fn linear_requires_two_points() {
        let three = [Vec2::ZERO, Vec2::ONE, Vec2::X];
        assert_eq!(Linear.interpolate(0.5, &three), Err(InterpolationError::PointCount(3)));
        assert_eq!(Linear.interpolate(0.5, &[]), Err(InterpolationError::PointCount(0)));
    }

    #[test]
    fn bezier_with_two_points_is_linear() {
        let points = [Vec2::ZERO, Vec2::new(8.0, 4.0)];
        assert!(close(Bezier.interpolate(0.25, &points).unwrap(), Vec2::new(2.0, 1.0)));
    }

    #[test]
    fn bezier_quadratic_midpoint() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0), Vec2::new(2.0, 0.0)];
        assert!(close(Bezier.interpolate(0.5, &points).unwrap(), Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn bezier_single_point_is_constant() {
        let point = Vec2::new(3.0, 4.0);
        assert_eq!(Bezier.interpolate(0.7, &[point]), Ok(point));
    }

    #[test]
    fn bezier_rejects_empty() {
        assert_eq!(Bezier.interpolate(0.5, &[]), Err(InterpolationError::Empty));
    }

    //=====================================================================
    // Timing Tests
    //=====================================================================

    #[test]
    fn normal_is_zero_until_started() {
        let clock = ManualClock::new();
        let interpolation = Interpolation::new(clock.clone(), Linear, vec![Vec2::ZERO, Vec2::ONE]);

        clock.advance(5_000);
        assert_eq!(interpolation.normal(), 0.0);
    }

    #[test]
    fn normal_grows_with_speed() {
        let clock = ManualClock::new();
        let mut interpolation =
            Interpolation::new(clock.clone(), Linear, vec![Vec2::ZERO, Vec2::ONE]);
        interpolation.start(0.5);

        clock.advance(3_000);
        assert!((interpolation.normal() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn looping_wraps_normal() {
        let clock = ManualClock::new();
        let mut interpolation =
            Interpolation::new(clock.clone(), Linear, vec![Vec2::ZERO, Vec2::ONE]);
        interpolation.start(1.0);
        interpolation.set_looping(true);

        clock.advance(2_250);
        assert!((interpolation.normal() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn reset_keeps_speed() {
        let clock = ManualClock::new();
        let mut interpolation =
            Interpolation::new(clock.clone(), Bezier, vec![Vec2::ZERO, Vec2::X * 10.0]);
        interpolation.start(1.0);
        clock.advance(800);

        interpolation.reset();
        clock.advance(100);

        assert_eq!(interpolation.speed(), 1.0);
        assert!(close(interpolation.value().unwrap(), Vec2::new(1.0, 0.0)));
    }
}
