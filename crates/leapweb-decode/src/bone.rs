//! Bone builder

use leapweb_core::{Basis, Bone, BoneType, DecodeResult, FieldPath, Vector3};

use crate::vector::build_orientation;

/// Build one finger bone spanning `start` → `end`.
///
/// The center is the plain midpoint of the two joints. Direction is the
/// raw segment (not normalized) and length its Euclidean norm, so a
/// zero-length bone (thumb metacarpal) has a zero direction.
pub fn build_bone(
    basis: &Basis,
    start: Vector3,
    end: Vector3,
    width: f32,
    bone_type: BoneType,
    basis_path: &FieldPath,
) -> DecodeResult<Bone> {
    let direction = end - start;
    Ok(Bone {
        start,
        end,
        center: start.midpoint(&end),
        direction,
        length: direction.length(),
        width,
        bone_type,
        orientation: build_orientation(basis, basis_path)?,
    })
}
