//! Schema-checked access to frame records
//!
//! A [`Record`] wraps one JSON object together with its path in the frame
//! document. Builders declare the fields they need as a schema and call
//! [`Record::validate`] once before reading anything, so a malformed record
//! fails with a single error naming the first offending field.

use std::ops::Range;

use serde_json::{Map, Value};

use leapweb_core::{Basis, DecodeError, DecodeResult, FieldPath, ValueKind, Vector3};

use crate::vector::{build_basis, build_vector3};

/// One required field of a record schema
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: ValueKind,
}

/// Shorthand for schema tables
pub const fn field(name: &'static str, kind: ValueKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// Does `value` hold the given kind?
pub fn kind_matches(value: &Value, kind: ValueKind) -> bool {
    match kind {
        ValueKind::Integer => value.is_i64(),
        ValueKind::Number => value.is_number(),
        ValueKind::Boolean => value.is_boolean(),
        ValueKind::String => value.is_string(),
        ValueKind::Array => value.is_array(),
        ValueKind::Object => value.is_object(),
    }
}

/// A JSON object located in the frame document
#[derive(Clone, Debug)]
pub struct Record<'a> {
    map: &'a Map<String, Value>,
    path: FieldPath,
}

impl<'a> Record<'a> {
    /// Wrap `value`, which must be an object
    pub fn open(value: &'a Value, path: FieldPath) -> DecodeResult<Self> {
        match value {
            Value::Object(map) => Ok(Record { map, path }),
            _ => Err(DecodeError::TypeMismatch {
                path,
                expected: ValueKind::Object,
            }),
        }
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Check presence of every field first, then every kind.
    pub fn validate(&self, schema: &[FieldSpec]) -> DecodeResult<()> {
        if let Some(missing) = schema.iter().find(|f| !self.map.contains_key(f.name)) {
            return Err(DecodeError::MissingField {
                path: self.path.key(missing.name),
            });
        }
        for spec in schema {
            if let Some(value) = self.map.get(spec.name) {
                if !kind_matches(value, spec.kind) {
                    return Err(DecodeError::TypeMismatch {
                        path: self.path.key(spec.name),
                        expected: spec.kind,
                    });
                }
            }
        }
        Ok(())
    }

    fn get(&self, name: &'static str, kind: ValueKind) -> DecodeResult<&'a Value> {
        let value = self.map.get(name).ok_or_else(|| DecodeError::MissingField {
            path: self.path.key(name),
        })?;
        if !kind_matches(value, kind) {
            return Err(DecodeError::TypeMismatch {
                path: self.path.key(name),
                expected: kind,
            });
        }
        Ok(value)
    }

    fn mismatch(&self, name: &'static str, expected: ValueKind) -> DecodeError {
        DecodeError::TypeMismatch {
            path: self.path.key(name),
            expected,
        }
    }

    pub fn integer(&self, name: &'static str) -> DecodeResult<i64> {
        self.get(name, ValueKind::Integer)?
            .as_i64()
            .ok_or_else(|| self.mismatch(name, ValueKind::Integer))
    }

    /// Any JSON number, narrowed to single precision
    pub fn number(&self, name: &'static str) -> DecodeResult<f32> {
        self.get(name, ValueKind::Number)?
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| self.mismatch(name, ValueKind::Number))
    }

    pub fn boolean(&self, name: &'static str) -> DecodeResult<bool> {
        self.get(name, ValueKind::Boolean)?
            .as_bool()
            .ok_or_else(|| self.mismatch(name, ValueKind::Boolean))
    }

    pub fn string(&self, name: &'static str) -> DecodeResult<&'a str> {
        self.get(name, ValueKind::String)?
            .as_str()
            .ok_or_else(|| self.mismatch(name, ValueKind::String))
    }

    pub fn list(&self, name: &'static str) -> DecodeResult<RecordList<'a>> {
        let items = self
            .get(name, ValueKind::Array)?
            .as_array()
            .ok_or_else(|| self.mismatch(name, ValueKind::Array))?;
        Ok(RecordList::new(items, self.path.key(name)))
    }

    pub fn object(&self, name: &'static str) -> DecodeResult<Record<'a>> {
        let value = self.get(name, ValueKind::Object)?;
        Record::open(value, self.path.key(name))
    }

    pub fn vector3(&self, name: &'static str) -> DecodeResult<Vector3> {
        let value = self.get(name, ValueKind::Array)?;
        build_vector3(value, &self.path.key(name))
    }

    /// Exactly three direction vectors
    pub fn basis(&self, name: &'static str) -> DecodeResult<Basis> {
        let value = self.get(name, ValueKind::Array)?;
        build_basis(value, &self.path.key(name))
    }
}

/// A run of array elements, remembering where it sits in its parent array
#[derive(Clone, Debug)]
pub struct RecordList<'a> {
    items: &'a [Value],
    path: FieldPath,
    offset: usize,
}

impl<'a> RecordList<'a> {
    pub fn new(items: &'a [Value], path: FieldPath) -> Self {
        RecordList {
            items,
            path,
            offset: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Path of the parent array
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Path of the i-th element of this run
    pub fn item_path(&self, i: usize) -> FieldPath {
        self.path.index(self.offset + i)
    }

    /// Sub-run; `range` must lie within this run
    pub fn slice(&self, range: Range<usize>) -> DecodeResult<RecordList<'a>> {
        let items = self
            .items
            .get(range.clone())
            .ok_or_else(|| DecodeError::ShapeMismatch {
                path: self.path.clone(),
                expected: self.offset + range.end,
                actual: self.offset + self.items.len(),
            })?;
        Ok(RecordList {
            items,
            path: self.path.clone(),
            offset: self.offset + range.start,
        })
    }

    /// Elements paired with their paths
    pub fn iter(&self) -> impl Iterator<Item = (&'a Value, FieldPath)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(move |(i, v)| (v, self.item_path(i)))
    }
}
