//! # Segmented Mesh Builder
//!
//! Covers a curve with fixed-length segments, one mesh instance each.
//! The segment length comes from the mesh's own bounding extent along its
//! long axis, so pieces tile the curve without stretching. The curve tail
//! shorter than one footprint is dropped, not emitted as a short segment.
//!
//! Instantiation goes through the [`MeshSink`] collaborator, which returns
//! opaque handles. The builder keeps those handles only to tear the
//! previous generation down on the next rebuild: detach, then destroy,
//! for every handle, so at most one generation is ever live.

use causeway_shared::Vec3;

use crate::config::BuilderConfig;
use crate::spline::Spline;

/// Host-defined identity of a placeable mesh asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshAssetId(pub u64);

/// Opaque reference to a placeable mesh asset.
///
/// The pipeline never opens the asset; it only needs the bounding
/// half-extents to derive the footprint length, and forwards the
/// reference to the sink untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshAsset {
    /// Identity forwarded to the mesh sink.
    pub id: MeshAssetId,
    /// Bounding-box half-extents of the mesh, in its local axes.
    /// The long axis (Y) runs along the curve.
    pub half_extents: Vec3,
}

impl MeshAsset {
    /// Curve length covered by one instance: the full bounding extent
    /// along the mesh's long axis.
    #[must_use]
    pub fn footprint_length(&self) -> f32 {
        self.half_extents.y * 2.0
    }
}

/// Opaque handle to one instantiated mesh piece, issued by the sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(u64);

impl MeshHandle {
    /// Wraps a sink-side identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The sink-side identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Placement geometry for one mesh piece.
///
/// Tangent magnitudes are clamped to the footprint length so a strongly
/// curved or widely spaced spline cannot kink the piece.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshSegment {
    /// World-space start position (vertical offset applied).
    pub start_position: Vec3,
    /// Curve tangent at the start, clamped to the footprint length.
    pub start_tangent: Vec3,
    /// World-space end position (vertical offset applied).
    pub end_position: Vec3,
    /// Curve tangent at the end, clamped to the footprint length.
    pub end_tangent: Vec3,
}

/// External mesh-instantiation sink.
///
/// Receives the asset reference, the placement geometry, and the collision
/// setup; answers with a handle the builder can later tear down. Calls are
/// trusted to succeed - there is no partial-failure protocol.
pub trait MeshSink {
    /// Creates one mesh instance and returns its teardown handle.
    fn instantiate(
        &mut self,
        mesh: &MeshAsset,
        segment: &MeshSegment,
        collision_profile: &str,
        physical_material: Option<&str>,
    ) -> MeshHandle;

    /// Detaches an instance from whatever it is mounted on.
    /// Always called before [`MeshSink::destroy`] for the same handle.
    fn detach(&mut self, handle: MeshHandle);

    /// Destroys a detached instance. The handle is dead afterwards.
    fn destroy(&mut self, handle: MeshHandle);
}

/// Builds one generation of mesh segments along a curve.
///
/// Owns the handles of the generation it issued; `rebuild` tears the old
/// generation down before building the new one, wholesale. There is no
/// incremental diffing on purpose: destroy-all/recreate-all keeps the
/// state machine trivial (idle -> rebuilding -> idle) with no partial
/// generations to reason about.
#[derive(Debug)]
pub struct SegmentedMeshBuilder {
    mesh: Option<MeshAsset>,
    vertical_offset: f32,
    collision_profile: String,
    physical_material: Option<String>,
    segments: Vec<MeshSegment>,
    handles: Vec<MeshHandle>,
}

impl SegmentedMeshBuilder {
    /// Creates a builder from validated configuration. No mesh is
    /// assigned yet; rebuilds are no-ops until one is.
    #[must_use]
    pub fn new(config: &BuilderConfig) -> Self {
        Self {
            mesh: None,
            vertical_offset: config.vertical_offset,
            collision_profile: config.collision_profile.clone(),
            physical_material: config.physical_material.clone(),
            segments: Vec::new(),
            handles: Vec::new(),
        }
    }

    /// Assigns or clears the mesh asset used for every segment.
    pub fn set_mesh(&mut self, mesh: Option<MeshAsset>) {
        self.mesh = mesh;
    }

    /// The currently assigned mesh asset.
    #[must_use]
    pub const fn mesh(&self) -> Option<&MeshAsset> {
        self.mesh.as_ref()
    }

    /// Footprint length of the assigned mesh, if any.
    #[must_use]
    pub fn footprint_length(&self) -> Option<f32> {
        self.mesh.as_ref().map(MeshAsset::footprint_length)
    }

    /// Tears down the previous generation, then builds a new one from the
    /// current curve state.
    ///
    /// The build step skips entirely (leaving the output empty) when the
    /// mesh reference or the source curve is missing.
    pub fn rebuild(&mut self, spline: Option<&Spline>, sink: &mut dyn MeshSink) {
        self.clear_instances(sink);
        self.build(spline, sink);
    }

    /// Releases every issued handle: detach, then destroy, per handle.
    ///
    /// Also usable standalone when the host wants the curve bare without
    /// building a new generation.
    pub fn clear_instances(&mut self, sink: &mut dyn MeshSink) {
        let torn_down = self.handles.len();
        for handle in self.handles.drain(..) {
            sink.detach(handle);
            sink.destroy(handle);
        }
        self.segments.clear();
        if torn_down > 0 {
            tracing::trace!("tore down {} mesh instances", torn_down);
        }
    }

    /// The segments of the current generation, in curve order.
    #[must_use]
    pub fn segments(&self) -> &[MeshSegment] {
        &self.segments
    }

    /// The live instance handles, parallel to [`SegmentedMeshBuilder::segments`].
    #[must_use]
    pub fn handles(&self) -> &[MeshHandle] {
        &self.handles
    }

    fn build(&mut self, spline: Option<&Spline>, sink: &mut dyn MeshSink) {
        let Some(spline) = spline else {
            return;
        };
        let Some(mesh) = self.mesh else {
            return;
        };

        let footprint = mesh.footprint_length();
        debug_assert!(footprint > 0.0, "mesh footprint must be positive");
        let length = spline.length();
        // Integer truncation: a tail shorter than one footprint is dropped.
        let segment_count = (length / footprint) as usize;
        self.segments.reserve(segment_count);
        self.handles.reserve(segment_count);

        for index in 0..segment_count {
            let distance = index as f32 * footprint;
            let segment = place_segment(spline, distance, footprint, self.vertical_offset);
            let handle = sink.instantiate(
                &mesh,
                &segment,
                &self.collision_profile,
                self.physical_material.as_deref(),
            );
            self.segments.push(segment);
            self.handles.push(handle);
        }

        tracing::debug!(
            "segmented mesh rebuilt: {} segments, footprint {:.1}, curve length {:.1}",
            segment_count,
            footprint,
            length
        );
    }
}

/// Samples start/end placement for the segment covering
/// `[distance, distance + footprint]`.
fn place_segment(spline: &Spline, distance: f32, footprint: f32, vertical_offset: f32) -> MeshSegment {
    let lift = Vec3::Z * vertical_offset;
    MeshSegment {
        start_position: spline.position_at(distance) + lift,
        start_tangent: spline.tangent_at(distance).clamped_to_max_length(footprint),
        end_position: spline.position_at(distance + footprint) + lift,
        end_tangent: spline
            .tangent_at(distance + footprint)
            .clamped_to_max_length(footprint),
    }
}
