//! Vector and orientation builders
//!
//! Raw vectors arrive as JSON arrays of numbers. Extra trailing elements
//! are ignored; too few (or a non-number among the components) is a shape
//! mismatch.

use serde_json::Value;

use leapweb_core::{
    Basis, DecodeError, DecodeResult, FieldPath, Quaternion, ValueKind, Vector3, Vector4,
};

/// Read the first `N` elements of an array as single precision numbers
fn components<const N: usize>(value: &Value, path: &FieldPath) -> DecodeResult<[f32; N]> {
    let items = value.as_array().ok_or_else(|| DecodeError::TypeMismatch {
        path: path.clone(),
        expected: ValueKind::Array,
    })?;

    let mut out = [0.0f32; N];
    for (i, slot) in out.iter_mut().enumerate() {
        match items.get(i).and_then(Value::as_f64) {
            Some(v) => *slot = v as f32,
            None => {
                return Err(DecodeError::ShapeMismatch {
                    path: path.clone(),
                    expected: N,
                    actual: i,
                })
            }
        }
    }
    Ok(out)
}

/// `[x, y, z, ...]` → Vector3
pub fn build_vector3(value: &Value, path: &FieldPath) -> DecodeResult<Vector3> {
    let [x, y, z] = components::<3>(value, path)?;
    Ok(Vector3::new(x, y, z))
}

/// `[x, y, z, w, ...]` → Vector4
pub fn build_vector4(value: &Value, path: &FieldPath) -> DecodeResult<Vector4> {
    let [x, y, z, w] = components::<4>(value, path)?;
    Ok(Vector4::new(x, y, z, w))
}

/// Array of exactly three vectors → basis
pub fn build_basis(value: &Value, path: &FieldPath) -> DecodeResult<Basis> {
    let items = value.as_array().ok_or_else(|| DecodeError::TypeMismatch {
        path: path.clone(),
        expected: ValueKind::Array,
    })?;
    if items.len() != 3 {
        return Err(DecodeError::ShapeMismatch {
            path: path.clone(),
            expected: 3,
            actual: items.len(),
        });
    }
    Ok([
        build_vector3(&items[0], &path.index(0))?,
        build_vector3(&items[1], &path.index(1))?,
        build_vector3(&items[2], &path.index(2))?,
    ])
}

/// Orientation of a basis: forward along its z axis, up towards its y axis.
///
/// The x axis is not consulted; it is implied by y and z. A basis whose
/// z axis is zero or parallel to its y axis has no defined orientation and
/// fails with `DegenerateBasis`.
pub fn build_orientation(basis: &Basis, path: &FieldPath) -> DecodeResult<Quaternion> {
    let [_, up, forward] = *basis;
    Quaternion::look_rotation(forward, up).ok_or_else(|| DecodeError::DegenerateBasis {
        path: path.clone(),
    })
}
