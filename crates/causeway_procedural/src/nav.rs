//! # Navigation Area Export
//!
//! Derives, per mesh segment, an extruded footprint that marks the
//! segment's space to the pathfinding subsystem: a ground quad spanned by
//! the curve's right vectors and a ceiling quad lifted by the extrusion
//! height. All footprints of a rebuild are folded into one aggregate
//! bounding volume the navigation system can use for relevancy checks.
//!
//! Everything here is regenerated wholesale on every rebuild; there is no
//! incremental maintenance of areas or bounds.

use causeway_shared::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::BuilderConfig;
use crate::mesh::MeshSegment;
use crate::spline::Spline;

/// Number of corner points per exported area: two parallel quads.
pub const POINTS_PER_AREA: usize = 8;

/// Classification tag the navigation system applies to an exported area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaClass {
    /// Normal walkable cost.
    Default,
    /// Traversable at increased cost.
    Obstacle,
    /// Excluded from navigation entirely.
    Null,
}

impl Default for AreaClass {
    fn default() -> Self {
        Self::Obstacle
    }
}

/// One exported polygon-with-metadata record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavArea {
    /// Corner points: ground quad then ceiling quad for the segment
    /// start cross-section, then the same pair for the end.
    pub polygon: [Vec3; POINTS_PER_AREA],
    /// Classification tag, constant across all areas of one exporter.
    pub area_class: AreaClass,
}

/// Derives navigation footprints and the aggregate bounding volume for
/// one generation of mesh segments.
#[derive(Debug)]
pub struct NavigationAreaExporter {
    half_width: f32,
    extrusion_height: f32,
    area_class: AreaClass,
    areas: Vec<[Vec3; POINTS_PER_AREA]>,
    bounds: Aabb,
}

impl NavigationAreaExporter {
    /// Creates an exporter from validated configuration.
    #[must_use]
    pub fn new(config: &BuilderConfig) -> Self {
        debug_assert!(config.half_width > 0.0);
        debug_assert!(config.extrusion_height > 0.0);
        Self {
            half_width: config.half_width,
            extrusion_height: config.extrusion_height,
            area_class: config.area_class,
            areas: Vec::new(),
            bounds: Aabb::EMPTY,
        }
    }

    /// Regenerates all footprints for the given segment generation.
    ///
    /// `footprint_length` is the segment spacing the builder used;
    /// segment `i` starts at curve distance `i * footprint_length`.
    /// Previous areas and bounds are wiped first. With zero segments the
    /// output is empty and the bounds stay invalid.
    pub fn rebuild(&mut self, spline: &Spline, segments: &[MeshSegment], footprint_length: f32) {
        self.areas.clear();
        self.bounds.reset();
        self.areas.reserve(segments.len());

        let ceiling = Vec3::Z * self.extrusion_height;
        for (index, segment) in segments.iter().enumerate() {
            let start_distance = index as f32 * footprint_length;
            let end_distance = start_distance + footprint_length;
            let start_right = spline.right_vector_at(start_distance) * self.half_width;
            let end_right = spline.right_vector_at(end_distance) * self.half_width;

            let start = segment.start_position;
            let end = segment.end_position;
            let corners = [
                start + start_right,
                start - start_right,
                start + start_right + ceiling,
                start - start_right + ceiling,
                end + end_right,
                end - end_right,
                end + end_right + ceiling,
                end - end_right + ceiling,
            ];

            for corner in corners {
                self.bounds.fold(corner);
                tracing::trace!(
                    "path segment point ({:.1}, {:.1}, {:.1})",
                    corner.x,
                    corner.y,
                    corner.z
                );
            }
            self.areas.push(corners);
        }

        tracing::debug!("navigation export rebuilt: {} areas", self.areas.len());
    }

    /// Number of exported areas in the current generation.
    #[must_use]
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// The full record set for the navigation-mesh subsystem.
    #[must_use]
    pub fn navigation_data(&self) -> Vec<NavArea> {
        self.areas
            .iter()
            .map(|&polygon| NavArea {
                polygon,
                area_class: self.area_class,
            })
            .collect()
    }

    /// Aggregate bounds over every footprint corner of the current
    /// generation. Invalid when there are no areas.
    #[must_use]
    pub const fn bounds(&self) -> Aabb {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuilderConfig;
    use crate::mesh::{MeshAsset, MeshAssetId, MeshSink, MeshHandle, MeshSegment, SegmentedMeshBuilder};

    struct CountingSink(u64);

    impl MeshSink for CountingSink {
        fn instantiate(
            &mut self,
            _: &MeshAsset,
            _: &MeshSegment,
            _: &str,
            _: Option<&str>,
        ) -> MeshHandle {
            self.0 += 1;
            MeshHandle::new(self.0)
        }
        fn detach(&mut self, _: MeshHandle) {}
        fn destroy(&mut self, _: MeshHandle) {}
    }

    /// Builds segments along a straight +X line at z = 0 and returns
    /// (spline, segments, footprint).
    fn straight_segments(length: f32, footprint: f32) -> (Spline, Vec<MeshSegment>, f32) {
        let count = (length / 50.0) as usize + 1;
        let spline = Spline::from_points(
            (0..count)
                .map(|i| Vec3::new(i as f32 * 50.0, 0.0, 0.0))
                .collect(),
        );
        let mut builder = SegmentedMeshBuilder::new(&BuilderConfig {
            vertical_offset: 0.0,
            ..BuilderConfig::default()
        });
        builder.set_mesh(Some(MeshAsset {
            id: MeshAssetId(1),
            half_extents: Vec3::new(25.0, footprint / 2.0, 10.0),
        }));
        builder.rebuild(Some(&spline), &mut CountingSink(0));
        let segments = builder.segments().to_vec();
        (spline, segments, footprint)
    }

    fn exporter() -> NavigationAreaExporter {
        NavigationAreaExporter::new(&BuilderConfig {
            vertical_offset: 0.0,
            ..BuilderConfig::default()
        })
    }

    #[test]
    fn test_one_area_of_eight_points_per_segment() {
        let (spline, segments, footprint) = straight_segments(400.0, 100.0);
        let mut nav = exporter();
        nav.rebuild(&spline, &segments, footprint);

        assert_eq!(nav.area_count(), segments.len());
        assert_eq!(nav.navigation_data().len(), 4);
    }

    #[test]
    fn test_footprint_spans_half_width_and_extrusion() {
        let (spline, segments, footprint) = straight_segments(200.0, 100.0);
        let mut nav = exporter();
        nav.rebuild(&spline, &segments, footprint);

        let area = nav.navigation_data()[0];
        // Straight +X curve: right vector is +-Y, so the ground quad sits
        // at y = +-half_width and the ceiling quad extrusion_height above.
        for (i, corner) in area.polygon.iter().enumerate() {
            assert!((corner.y.abs() - 50.0).abs() < 1e-3, "corner {i}");
            let expected_z = if i == 2 || i == 3 || i == 6 || i == 7 {
                200.0
            } else {
                0.0
            };
            assert!((corner.z - expected_z).abs() < 1e-3, "corner {i}");
        }
        // Start cross-section at x = 0, end cross-section at x = 100.
        for (i, corner) in area.polygon.iter().enumerate() {
            let expected_x = if i < 4 { 0.0 } else { 100.0 };
            assert!((corner.x - expected_x).abs() < 0.5, "corner {i}");
        }
    }

    #[test]
    fn test_bounds_contain_every_corner() {
        let (spline, segments, footprint) = straight_segments(950.0, 100.0);
        let mut nav = exporter();
        nav.rebuild(&spline, &segments, footprint);

        let bounds = nav.bounds();
        assert!(bounds.is_valid());
        let mut folded = 0;
        for area in nav.navigation_data() {
            for corner in area.polygon {
                assert!(bounds.contains(corner));
                folded += 1;
            }
        }
        assert_eq!(folded, 8 * segments.len());
    }

    #[test]
    fn test_empty_generation_leaves_bounds_invalid() {
        let (spline, _, footprint) = straight_segments(200.0, 100.0);
        let mut nav = exporter();
        nav.rebuild(&spline, &[], footprint);
        assert_eq!(nav.area_count(), 0);
        assert!(!nav.bounds().is_valid());
    }

    #[test]
    fn test_rebuild_replaces_previous_generation() {
        let (spline, segments, footprint) = straight_segments(400.0, 100.0);
        let mut nav = exporter();
        nav.rebuild(&spline, &segments, footprint);
        assert_eq!(nav.area_count(), 4);

        // Shrinking to one segment replaces, not appends.
        nav.rebuild(&spline, &segments[..1], footprint);
        assert_eq!(nav.area_count(), 1);

        // And an empty rebuild wipes everything.
        nav.rebuild(&spline, &[], footprint);
        assert_eq!(nav.area_count(), 0);
        assert!(!nav.bounds().is_valid());
    }

    #[test]
    fn test_area_class_tag_is_constant_and_configurable() {
        let (spline, segments, footprint) = straight_segments(300.0, 100.0);
        let mut nav = NavigationAreaExporter::new(&BuilderConfig {
            area_class: AreaClass::Null,
            ..BuilderConfig::default()
        });
        nav.rebuild(&spline, &segments, footprint);

        for area in nav.navigation_data() {
            assert_eq!(area.area_class, AreaClass::Null);
        }
    }
}
