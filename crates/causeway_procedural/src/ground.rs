//! # Ground Projection
//!
//! Resamples a source curve at a fixed arc-length interval and drops each
//! sample onto the collision ground with a vertical probe. Samples whose
//! probe misses keep their original curve position, so the output polyline
//! always has one point per sample - never a gap, never a blend.
//!
//! The collision ground is an external collaborator behind
//! [`CollisionSurface`]; the projector only issues nearest-hit queries
//! restricted to static geometry.

use causeway_shared::Vec3;

use crate::config::ProjectorConfig;
use crate::spline::Spline;

/// Mobility filter for collision queries.
///
/// Ground probes only care about geometry that never moves; hosts with a
/// richer object model map these onto their own query channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryMobility {
    /// Immovable world geometry only.
    Static,
    /// Movable objects only.
    Movable,
    /// No mobility restriction.
    Any,
}

/// Result of a successful nearest-hit ray query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// World-space impact point of the nearest hit.
    pub point: Vec3,
}

/// External collision query surface.
///
/// Implementations are expected to be potentially expensive synchronous
/// calls (a physics scene, a heightfield, a spatial index). The pipeline
/// issues one query per ground sample and applies no retry or timeout:
/// a miss is a well-defined answer, not a failure.
pub trait CollisionSurface {
    /// Returns the nearest hit along the segment `from -> to` among
    /// geometry matching `mobility`, or `None` when nothing is hit.
    fn nearest_hit(&self, from: Vec3, to: Vec3, mobility: QueryMobility) -> Option<RayHit>;
}

/// Projects evenly spaced curve samples onto the collision ground.
///
/// Owns its output polyline; every [`GroundProjector::rebuild`] wipes and
/// regenerates it wholesale from the current curve state.
#[derive(Debug)]
pub struct GroundProjector {
    sample_interval: f32,
    search_range: f32,
    points: Vec<Vec3>,
}

impl GroundProjector {
    /// Creates a projector from validated configuration.
    #[must_use]
    pub fn new(config: &ProjectorConfig) -> Self {
        debug_assert!(config.sample_interval > 0.0);
        debug_assert!(config.search_range > 0.0);
        Self {
            sample_interval: config.sample_interval,
            search_range: config.search_range,
            points: Vec::new(),
        }
    }

    /// Regenerates the ground-conforming polyline.
    ///
    /// Clears the previous output first. A missing or zero-length source
    /// curve leaves the output empty and returns early - that is the
    /// defined no-op, not an error.
    ///
    /// Sample `k` sits at distance `min(k * interval, length)`; the final
    /// sample always lands exactly on the curve end. An interval at or
    /// beyond the curve length still yields the two endpoint samples.
    pub fn rebuild(&mut self, source: Option<&Spline>, surface: &dyn CollisionSurface) {
        self.points.clear();

        let Some(source) = source else {
            return;
        };
        let length = source.length();
        if length <= 0.0 {
            return;
        }

        let count = ((length / self.sample_interval) as usize + 1).max(2);
        self.points.reserve(count);
        let probe_offset = Vec3::Z * self.search_range;

        let mut hits = 0usize;
        for index in 0..count {
            let distance = (index as f32 * self.sample_interval).min(length);
            let sample = source.position_at(distance);
            let point = match surface.nearest_hit(
                sample + probe_offset,
                sample - probe_offset,
                QueryMobility::Static,
            ) {
                Some(hit) => {
                    hits += 1;
                    hit.point
                }
                None => sample,
            };
            self.points.push(point);
        }

        tracing::debug!(
            "ground projection rebuilt: {} points over length {:.1} ({} probe hits)",
            self.points.len(),
            length,
            hits
        );
    }

    /// The current ground-conforming polyline, in increasing distance order.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Builds a dependent curve through the projected points, for
    /// consumers that sample the ground-conforming path themselves.
    #[must_use]
    pub fn to_spline(&self) -> Spline {
        Spline::from_points(self.points.clone())
    }
}
