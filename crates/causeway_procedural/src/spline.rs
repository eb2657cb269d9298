//! # Spline Curve
//!
//! Arc-length parametrized curve built from editable control points.
//!
//! ## Parameterization
//!
//! Control points are interpolated with cubic Hermite segments using
//! Catmull-Rom automatic tangents. Distance queries go through a
//! precomputed reparameterization table (fixed number of steps per
//! segment) that maps traveled arc length back to the segment parameter.
//!
//! ## Determinism Guarantee
//!
//! Given the same control points, every query returns **exactly** the
//! same value on any platform, any time. There is no hidden state: the
//! tangents and the reparam table are derived data, recomputed on every
//! control-point mutation.

use causeway_shared::{Aabb, Vec3};

/// Steps per Hermite segment in the arc-length reparam table.
///
/// More steps tighten the distance -> parameter mapping at the cost of
/// rebuild time. Ten matches the granularity the pipeline was tuned for.
pub const REPARAM_STEPS_PER_SEGMENT: usize = 10;

/// One row of the arc-length table: cumulative distance at a segment key.
#[derive(Clone, Copy, Debug)]
struct ReparamEntry {
    /// Cumulative arc length from the curve start.
    distance: f32,
    /// Curve key: segment index plus local parameter, in `[0, segments]`.
    key: f32,
}

/// Editable world-space curve with arc-length distance queries.
///
/// All distance arguments are clamped to `[0, length]` before evaluation,
/// so out-of-range queries return the curve endpoints. A curve with fewer
/// than two control points has length zero; callers use that as their
/// no-op guard.
#[derive(Clone, Debug, Default)]
pub struct Spline {
    points: Vec<Vec3>,
    closed: bool,
    /// Catmull-Rom tangent per control point. Derived, same length as `points`.
    tangents: Vec<Vec3>,
    /// Arc-length table. Derived. Empty when there are no segments.
    reparam: Vec<ReparamEntry>,
    length: f32,
}

impl Spline {
    /// Creates an empty open curve.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an open curve from world-space control points.
    #[must_use]
    pub fn from_points(points: Vec<Vec3>) -> Self {
        let mut spline = Self {
            points,
            ..Self::default()
        };
        spline.refresh_derived();
        spline
    }

    /// Appends a control point and recomputes derived state.
    pub fn push_point(&mut self, point: Vec3) {
        self.points.push(point);
        self.refresh_derived();
    }

    /// Replaces all control points and recomputes derived state.
    pub fn set_points(&mut self, points: Vec<Vec3>) {
        self.points = points;
        self.refresh_derived();
    }

    /// Removes every control point. Length becomes zero.
    pub fn clear_points(&mut self) {
        self.points.clear();
        self.refresh_derived();
    }

    /// Opens or closes the curve. A closed curve adds a final segment
    /// from the last control point back to the first.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
        self.refresh_derived();
    }

    /// The control points, in order.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of control points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// True if the curve loops back to its first control point.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Total arc length, from the reparam table.
    #[must_use]
    pub const fn length(&self) -> f32 {
        self.length
    }

    /// World-space position at `distance` along the curve.
    ///
    /// Distance is clamped to `[0, length]`. An empty curve returns the
    /// origin; a single-point curve returns that point.
    #[must_use]
    pub fn position_at(&self, distance: f32) -> Vec3 {
        let key = self.distance_to_key(distance);
        self.position_at_key(key)
    }

    /// Curve tangent at `distance`, as the Hermite derivative with respect
    /// to the local segment parameter.
    ///
    /// NOT normalized: the magnitude scales with the local control-point
    /// spacing, which is what downstream tangent clamping acts on.
    #[must_use]
    pub fn tangent_at(&self, distance: f32) -> Vec3 {
        if self.segment_count() == 0 {
            return Vec3::ZERO;
        }
        let key = self.distance_to_key(distance);
        let (segment, t) = self.split_key(key);
        let (p0, t0, p1, t1) = self.segment_endpoints(segment);
        hermite_derivative(p0, t0, p1, t1, t)
    }

    /// Unit vector perpendicular to the curve direction in the ground
    /// plane (Z-up world).
    ///
    /// Near-vertical or degenerate tangents fall back to +X so callers
    /// always get a usable unit vector.
    #[must_use]
    pub fn right_vector_at(&self, distance: f32) -> Vec3 {
        let direction = self.tangent_at(distance).normalized_or_zero();
        let right = direction.cross(Vec3::Z).normalized_or_zero();
        if right == Vec3::ZERO {
            Vec3::X
        } else {
            right
        }
    }

    /// Smallest axis-aligned box around the curve, traversed at fine
    /// granularity. Invalid for an empty curve.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut bounds = Aabb::EMPTY;
        let segments = self.segment_count();
        if segments == 0 {
            // Degenerate curve: fold whatever control points exist.
            for &point in &self.points {
                bounds.fold(point);
            }
            return bounds;
        }

        let end = segments as f32;
        let mut key = 0.0;
        while key < end {
            bounds.fold(self.position_at_key(key));
            key += 0.1;
        }
        bounds.fold(self.position_at_key(end));
        bounds
    }

    /// Number of Hermite segments (one fewer than the control points for
    /// an open curve, equal for a closed one).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            0
        } else if self.closed {
            n
        } else {
            n - 1
        }
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    fn refresh_derived(&mut self) {
        self.recompute_tangents();
        self.rebuild_reparam();
    }

    /// Catmull-Rom automatic tangents: central difference of the two
    /// neighbors, one-sided at open endpoints.
    fn recompute_tangents(&mut self) {
        let n = self.points.len();
        self.tangents.clear();
        if n < 2 {
            self.tangents.resize(n, Vec3::ZERO);
            return;
        }
        for i in 0..n {
            let tangent = if self.closed {
                let prev = self.points[(i + n - 1) % n];
                let next = self.points[(i + 1) % n];
                (next - prev) * 0.5
            } else if i == 0 {
                self.points[1] - self.points[0]
            } else if i == n - 1 {
                self.points[n - 1] - self.points[n - 2]
            } else {
                (self.points[i + 1] - self.points[i - 1]) * 0.5
            };
            self.tangents.push(tangent);
        }
    }

    /// Rebuilds the arc-length table by accumulating chord lengths at
    /// fixed parameter steps.
    fn rebuild_reparam(&mut self) {
        self.reparam.clear();
        self.length = 0.0;
        let segments = self.segment_count();
        if segments == 0 {
            return;
        }

        self.reparam.push(ReparamEntry {
            distance: 0.0,
            key: 0.0,
        });
        let step = 1.0 / REPARAM_STEPS_PER_SEGMENT as f32;
        let mut previous = self.position_at_key(0.0);
        let mut total = 0.0;
        for segment in 0..segments {
            for s in 1..=REPARAM_STEPS_PER_SEGMENT {
                let key = segment as f32 + s as f32 * step;
                let position = self.position_at_key(key);
                total += previous.distance(position);
                previous = position;
                self.reparam.push(ReparamEntry {
                    distance: total,
                    key,
                });
            }
        }
        self.length = total;
    }

    // ------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------

    /// Maps a clamped arc-length distance to a curve key by linear
    /// interpolation between bracketing table rows.
    fn distance_to_key(&self, distance: f32) -> f32 {
        if self.reparam.len() < 2 {
            return 0.0;
        }
        let distance = distance.clamp(0.0, self.length);
        let upper = self
            .reparam
            .partition_point(|entry| entry.distance < distance)
            .clamp(1, self.reparam.len() - 1);
        let lo = self.reparam[upper - 1];
        let hi = self.reparam[upper];
        let span = hi.distance - lo.distance;
        if span <= f32::EPSILON {
            return lo.key;
        }
        let fraction = (distance - lo.distance) / span;
        lo.key + (hi.key - lo.key) * fraction
    }

    /// Splits a curve key into (segment index, local parameter in [0, 1]).
    fn split_key(&self, key: f32) -> (usize, f32) {
        let segments = self.segment_count();
        debug_assert!(segments > 0);
        let clamped = key.clamp(0.0, segments as f32);
        let mut segment = clamped.floor() as usize;
        if segment >= segments {
            // key == segments: evaluate the final segment at t = 1.
            segment = segments - 1;
        }
        (segment, clamped - segment as f32)
    }

    fn segment_endpoints(&self, segment: usize) -> (Vec3, Vec3, Vec3, Vec3) {
        let n = self.points.len();
        let next = (segment + 1) % n;
        (
            self.points[segment],
            self.tangents[segment],
            self.points[next],
            self.tangents[next],
        )
    }

    fn position_at_key(&self, key: f32) -> Vec3 {
        match self.points.len() {
            0 => Vec3::ZERO,
            1 => self.points[0],
            _ => {
                let (segment, t) = self.split_key(key);
                let (p0, t0, p1, t1) = self.segment_endpoints(segment);
                hermite(p0, t0, p1, t1, t)
            }
        }
    }
}

/// Cubic Hermite interpolation.
fn hermite(p0: Vec3, t0: Vec3, p1: Vec3, t1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    p0 * (2.0 * t3 - 3.0 * t2 + 1.0)
        + t0 * (t3 - 2.0 * t2 + t)
        + p1 * (-2.0 * t3 + 3.0 * t2)
        + t1 * (t3 - t2)
}

/// Derivative of [`hermite`] with respect to `t`.
fn hermite_derivative(p0: Vec3, t0: Vec3, p1: Vec3, t1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    p0 * (6.0 * t2 - 6.0 * t)
        + t0 * (3.0 * t2 - 4.0 * t + 1.0)
        + p1 * (-6.0 * t2 + 6.0 * t)
        + t1 * (3.0 * t2 - 2.0 * t)
}
