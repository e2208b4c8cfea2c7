//! Pure vector and trajectory math. No ECS state, no physics stepping.

use bevy::math::Vec2;

/// Direction vector from `p0` to `p1`.
pub fn direction(p0: Vec2, p1: Vec2) -> Vec2 {
    p1 - p0
}

/// Normalise `v` to unit length; the zero vector maps to zero.
pub fn unit_vector(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Clamp `v` to at most `max` length, preserving direction exactly.
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len > max {
        v * (max / len)
    } else {
        v
    }
}

// ── Trajectory sampling ───────────────────────────────────────────────────────

/// Closed-form ballistic trajectory `p(t) = origin + v·t + ½·g·t²`.
///
/// [`Trajectory::points`] yields a lazy, finite sequence of world points at
/// fixed time steps; calling it again restarts the sequence. This is a
/// read-only preview and performs no physics stepping, so it is cheap to
/// recompute on every drag update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub origin: Vec2,
    pub velocity: Vec2,
    pub gravity: Vec2,
    pub dt: f32,
    pub max_t: f32,
}

impl Trajectory {
    pub fn new(origin: Vec2, velocity: Vec2, gravity: Vec2, dt: f32, max_t: f32) -> Self {
        Self {
            origin,
            velocity,
            gravity,
            dt,
            max_t,
        }
    }

    /// Position at flight time `t`.
    pub fn at(&self, t: f32) -> Vec2 {
        self.origin + self.velocity * t + 0.5 * self.gravity * t * t
    }

    /// Sampled points for `t = 0, dt, 2·dt, …, max_t`.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        let samples = (self.max_t / self.dt).floor() as usize;
        (0..=samples).map(move |i| self.at(i as f32 * self.dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_origin_returns_point_as_vector() {
        assert_eq!(
            direction(Vec2::ZERO, Vec2::new(3.0, 4.0)),
            Vec2::new(3.0, 4.0)
        );
    }

    #[test]
    fn direction_reversed_is_negated() {
        let p0 = Vec2::new(10.0, 20.0);
        let p1 = Vec2::new(30.0, 50.0);
        assert_eq!(direction(p1, p0), -direction(p0, p1));
    }

    #[test]
    fn unit_vector_normalizes_to_length_one() {
        let u = unit_vector(Vec2::new(3.0, 4.0));
        assert!((u.length() - 1.0).abs() < 1e-6);
        assert!((u.x - 0.6).abs() < 1e-6 && (u.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn unit_vector_of_zero_is_zero_not_nan() {
        let u = unit_vector(Vec2::ZERO);
        assert!(u.x.is_finite() && u.y.is_finite());
        assert_eq!(u, Vec2::ZERO);
    }

    #[test]
    fn distance_is_pythagorean() {
        assert_eq!(distance(Vec2::ZERO, Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(1.0, 2.0), Vec2::new(1.0, 2.0)), 0.0);
    }

    #[test]
    fn clamp_magnitude_preserves_direction_exactly() {
        let v = Vec2::new(300.0, 400.0); // length 500
        let c = clamp_magnitude(v, 90.0);
        assert!((c.length() - 90.0).abs() < 1e-4);
        let cross = v.x * c.y - v.y * c.x;
        assert!(cross.abs() < 1e-3, "direction changed: cross = {}", cross);
    }

    #[test]
    fn clamp_magnitude_leaves_short_vectors_untouched() {
        let v = Vec2::new(10.0, -5.0);
        assert_eq!(clamp_magnitude(v, 90.0), v);
    }

    #[test]
    fn trajectory_starts_at_origin() {
        let tr = Trajectory::new(
            Vec2::new(154.0, 156.0),
            Vec2::new(500.0, 300.0),
            Vec2::new(0.0, -700.0),
            0.02,
            1.5,
        );
        let first = tr.points().next().unwrap();
        assert_eq!(first, Vec2::new(154.0, 156.0));
    }

    #[test]
    fn trajectory_is_finite_and_restartable() {
        let tr = Trajectory::new(Vec2::ZERO, Vec2::X, Vec2::ZERO, 0.1, 1.0);
        let n1 = tr.points().count();
        let n2 = tr.points().count();
        assert_eq!(n1, 11); // t = 0.0, 0.1, …, 1.0
        assert_eq!(n1, n2, "points() must restart from t = 0");
    }

    #[test]
    fn zero_gravity_trajectory_is_collinear() {
        let tr = Trajectory::new(
            Vec2::new(154.0, 156.0),
            Vec2::new(400.0, 250.0),
            Vec2::ZERO,
            0.02,
            1.5,
        );
        let dir = tr.velocity.normalize();
        for p in tr.points().skip(1) {
            let d = (p - tr.origin).normalize();
            let cross = dir.x * d.y - dir.y * d.x;
            assert!(cross.abs() < 1e-5, "sample {:?} off the launch line", p);
        }
    }

    #[test]
    fn gravity_bends_trajectory_downward() {
        let tr = Trajectory::new(
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, -700.0),
            0.1,
            1.0,
        );
        let last = tr.points().last().unwrap();
        assert!(last.y < 0.0, "sample should fall below launch height");
        assert!((last.y - (0.5 * -700.0)).abs() < 1e-3); // ½·g·t² at t = 1
    }
}
