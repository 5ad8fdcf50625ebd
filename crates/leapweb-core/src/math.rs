//! Vector and quaternion primitives
//!
//! Single precision throughout, matching the tracking service output.

use std::ops::{Add, Mul, Sub};

use serde::Serialize;

/// Lengths below this are treated as zero when normalizing
pub const NORMALIZE_EPSILON: f32 = 1e-6;

/// 3D vector (positions, velocities, directions)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    pub const Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    pub const Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Euclidean length
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Distance to another point
    pub fn distance(&self, other: &Vector3) -> f32 {
        (*other - *self).length()
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector
    pub fn normalize(&self) -> Option<Vector3> {
        let len = self.length();
        if !len.is_finite() || len < NORMALIZE_EPSILON {
            return None;
        }
        Some(*self * (1.0 / len))
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// 4D vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

/// Three direction vectors (x, y, z axes) describing a local frame
pub type Basis = [Vector3; 3];

/// Orientation quaternion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation whose forward (+Z) axis points along `forward` and whose
    /// up (+Y) axis lies in the plane of `forward` and `up`.
    ///
    /// right = normalize(up × forward), up' = forward × right.
    /// Returns `None` if `forward` is zero or parallel to `up`.
    pub fn look_rotation(forward: Vector3, up: Vector3) -> Option<Quaternion> {
        let forward = forward.normalize()?;
        let right = up.cross(&forward).normalize()?;
        let up = forward.cross(&right);
        Some(Self::from_axes(right, up, forward))
    }

    /// Quaternion from the columns of an orthonormal rotation matrix
    pub fn from_axes(right: Vector3, up: Vector3, forward: Vector3) -> Quaternion {
        let (m00, m01, m02) = (right.x, up.x, forward.x);
        let (m10, m11, m12) = (right.y, up.y, forward.y);
        let (m20, m21, m22) = (right.z, up.z, forward.z);

        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quaternion::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Quaternion::new(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Quaternion::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Quaternion::new((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        };
        q.normalize()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    fn normalize(&self) -> Quaternion {
        let len = self.length();
        if len < 0.0001 {
            return Quaternion::identity();
        }
        Quaternion::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(&self, v: Vector3) -> Vector3 {
        let q = Vector3::new(self.x, self.y, self.z);
        let t = q.cross(&v) * 2.0;
        v + t * self.w + q.cross(&t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(a: Vector3, b: Vector3) {
        assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_vector_ops() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 6.0, 3.0);

        assert_eq!(b - a, Vector3::new(3.0, 4.0, 0.0));
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(a.midpoint(&b), Vector3::new(2.5, 4.0, 3.0));
        assert_eq!(Vector3::X.cross(&Vector3::Y), Vector3::Z);
    }

    #[test]
    fn test_normalize_zero() {
        assert!(Vector3::ZERO.normalize().is_none());
        let n = Vector3::new(0.0, 3.0, 4.0).normalize().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_look_rotation_identity() {
        let q = Quaternion::look_rotation(Vector3::Z, Vector3::Y).unwrap();
        assert!((q.w - 1.0).abs() < 1e-6);
        assert!(q.x.abs() < 1e-6 && q.y.abs() < 1e-6 && q.z.abs() < 1e-6);
    }

    #[test]
    fn test_look_rotation_axes() {
        // Forward along +X, up along +Y: a 90° turn about Y.
        let q = Quaternion::look_rotation(Vector3::X, Vector3::Y).unwrap();
        assert_close(q.rotate(Vector3::Z), Vector3::X);
        assert_close(q.rotate(Vector3::Y), Vector3::Y);
        assert_close(q.rotate(Vector3::X), Vector3::new(0.0, 0.0, -1.0));

        let q = Quaternion::look_rotation(Vector3::new(0.0, -1.0, 0.0), Vector3::Z).unwrap();
        assert_close(q.rotate(Vector3::Z), Vector3::new(0.0, -1.0, 0.0));
        assert_close(q.rotate(Vector3::Y), Vector3::Z);

        // Facing backwards: negative trace
        let q = Quaternion::look_rotation(Vector3::new(0.0, 0.0, -1.0), Vector3::Y).unwrap();
        assert_close(q.rotate(Vector3::Z), Vector3::new(0.0, 0.0, -1.0));
        assert_close(q.rotate(Vector3::X), Vector3::new(-1.0, 0.0, 0.0));
        assert!((q.y.abs() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_rotation_orthogonalizes_up() {
        let forward = Vector3::new(0.0, 0.0, 2.0);
        let up = Vector3::new(0.0, 1.0, 1.0);
        let q = Quaternion::look_rotation(forward, up).unwrap();
        assert!((q.length() - 1.0).abs() < 1e-5);
        assert_close(q.rotate(Vector3::Z), Vector3::Z);
        assert_close(q.rotate(Vector3::Y), Vector3::Y);
    }

    #[test]
    fn test_look_rotation_degenerate() {
        assert!(Quaternion::look_rotation(Vector3::ZERO, Vector3::Y).is_none());
        assert!(Quaternion::look_rotation(Vector3::Y, Vector3::Y * 3.0).is_none());
    }

    proptest! {
        #[test]
        fn prop_look_rotation_aligns_forward(
            fx in -1.0f32..1.0, fy in -1.0f32..1.0, fz in -1.0f32..1.0,
            ux in -1.0f32..1.0, uy in -1.0f32..1.0, uz in -1.0f32..1.0,
        ) {
            let forward = Vector3::new(fx, fy, fz);
            let up = Vector3::new(ux, uy, uz);
            prop_assume!(forward.length() > 0.1);
            prop_assume!(up.cross(&forward).length() > 0.1 * up.length().max(0.1));

            let q = Quaternion::look_rotation(forward, up).unwrap();
            let expected = forward.normalize().unwrap();
            prop_assert!((q.length() - 1.0).abs() < 1e-4);
            prop_assert!((q.rotate(Vector3::Z) - expected).length() < 1e-3);
            // Rotated up stays perpendicular to forward and on the side of `up`.
            let rotated_up = q.rotate(Vector3::Y);
            prop_assert!(rotated_up.dot(&expected).abs() < 1e-3);
            prop_assert!(rotated_up.dot(&up) >= -1e-4);
        }

        #[test]
        fn prop_distance_non_negative_and_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, az in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bz in -500.0f32..500.0,
        ) {
            let a = Vector3::new(ax, ay, az);
            let b = Vector3::new(bx, by, bz);
            prop_assert!(a.distance(&b) >= 0.0);
            prop_assert_eq!(a.distance(&b), b.distance(&a));
        }
    }
}
