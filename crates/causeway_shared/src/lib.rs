//! # CAUSEWAY Shared
//!
//! Math value types used by both the geometry pipeline and host code.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `wgpu`
//! - `raw-window-handle`
//! - Any GPU or window-related crate
//!
//! Host rendering code consumes these types; it does not live here.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod math;

pub use math::{Aabb, Vec3};
