//! # CAUSEWAY Procedural Geometry
//!
//! Turns an editable spline into ground-conforming pathway geometry.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same curve and config always produce the same
//!    geometry, bit for bit
//! 2. **Wholesale rebuilds**: every rebuild destroys the previous
//!    generation and regenerates from scratch - no incremental diffing
//! 3. **No-op degradation**: missing curves, meshes, or probe hits are
//!    defined outcomes, never errors
//! 4. **Synchronous**: a rebuild runs to completion on the calling
//!    thread; collaborators are plain trait objects
//!
//! ## Core Components
//!
//! - `Spline`: arc-length parametrized curve with world-space queries
//! - `GroundProjector`: conforms curve samples to the collision ground
//! - `SegmentedMeshBuilder`: covers the curve with fixed-length mesh
//!   pieces through a host sink
//! - `NavigationAreaExporter`: per-segment nav footprints + aggregate
//!   bounds
//!
//! ## Example
//!
//! ```rust,ignore
//! use causeway_procedural::{CausewayConfig, GroundProjector, SegmentedMeshBuilder};
//!
//! let config = CausewayConfig::from_toml_file("data/causeway.toml")?;
//! let mut projector = GroundProjector::new(&config.projector);
//!
//! // Host edits the spline, then asks for a rebuild.
//! projector.rebuild(Some(&spline), &physics_scene);
//! let path = projector.to_spline();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod ground;
pub mod mesh;
pub mod nav;
pub mod spline;

pub use config::{BuilderConfig, CausewayConfig, ProjectorConfig};
pub use error::ConfigError;
pub use ground::{CollisionSurface, GroundProjector, QueryMobility, RayHit};
pub use mesh::{MeshAsset, MeshAssetId, MeshHandle, MeshSegment, MeshSink, SegmentedMeshBuilder};
pub use nav::{AreaClass, NavArea, NavigationAreaExporter, POINTS_PER_AREA};
pub use spline::{Spline, REPARAM_STEPS_PER_SEGMENT};
