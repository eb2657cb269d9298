//! Mathematical types shared between the pipeline and its hosts.
//!
//! The world is Z-up: X/Y span the ground plane, Z is vertical.
//! These are the canonical representations handed across collaborator
//! boundaries (mesh sinks, navigation consumers).

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3D Vector - position, tangent, direction
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit X vector
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector (world up)
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product (right-handed)
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or zero if the length is
    /// too small to normalize safely.
    #[must_use]
    pub fn normalized_or_zero(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > f32::EPSILON {
            self * (1.0 / len_sq.sqrt())
        } else {
            Self::ZERO
        }
    }

    /// Returns this vector scaled down to `max_length` if it is longer,
    /// unchanged otherwise.
    #[must_use]
    pub fn clamped_to_max_length(self, max_length: f32) -> Self {
        let len_sq = self.length_squared();
        if len_sq > max_length * max_length {
            self * (max_length / len_sq.sqrt())
        } else {
            self
        }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Axis-aligned bounding box built by folding points in one at a time.
///
/// Starts out invalid (empty); becomes valid once the first point is
/// folded. Consumers must check [`Aabb::is_valid`] before reading
/// `min`/`max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner. Meaningless while invalid.
    pub min: Vec3,
    /// Maximum corner. Meaningless while invalid.
    pub max: Vec3,
    valid: bool,
}

impl Aabb {
    /// An empty, invalid box. Folding a point makes it valid.
    pub const EMPTY: Self = Self {
        min: Vec3::new(f32::MAX, f32::MAX, f32::MAX),
        max: Vec3::new(f32::MIN, f32::MIN, f32::MIN),
        valid: false,
    };

    /// Resets to the empty, invalid state.
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// Grows the box to contain `point`. The first fold makes the box valid.
    pub fn fold(&mut self, point: Vec3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
        self.valid = true;
    }

    /// True once at least one point has been folded in.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// True if `point` lies inside or on the boundary. Always false for
    /// an invalid box.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        self.valid
            && point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_follows_right_hand_rule() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
    }

    #[test]
    fn test_clamp_length_shortens_long_vectors_only() {
        let long = Vec3::new(3.0, 4.0, 0.0);
        let clamped = long.clamped_to_max_length(2.5);
        assert!((clamped.length() - 2.5).abs() < 1e-5);
        // Direction is preserved
        assert!(clamped.normalized_or_zero().dot(long.normalized_or_zero()) > 0.999);

        let short = Vec3::new(0.3, 0.4, 0.0);
        assert_eq!(short.clamped_to_max_length(2.5), short);
    }

    #[test]
    fn test_normalized_or_zero_handles_degenerate_input() {
        assert_eq!(Vec3::ZERO.normalized_or_zero(), Vec3::ZERO);
        let n = Vec3::new(0.0, 0.0, 10.0).normalized_or_zero();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_aabb_starts_invalid_and_folds() {
        let mut bounds = Aabb::EMPTY;
        assert!(!bounds.is_valid());
        assert!(!bounds.contains(Vec3::ZERO));

        bounds.fold(Vec3::new(1.0, 2.0, 3.0));
        assert!(bounds.is_valid());
        assert_eq!(bounds.min, bounds.max);

        bounds.fold(Vec3::new(-1.0, 0.0, 5.0));
        assert!(bounds.contains(Vec3::new(0.0, 1.0, 4.0)));
        assert!(!bounds.contains(Vec3::new(0.0, 3.0, 4.0)));

        bounds.reset();
        assert!(!bounds.is_valid());
    }
}
