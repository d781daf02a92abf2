//! The in-memory representation of a decoded data element value.
//!
//! Sequences and items are not represented here: per the core design,
//! hierarchy is carried by the element collection as a flat, leveled list
//! (see `dicom-object`'s element store), not as a recursive value tree.
//! `PrimitiveValue` only ever holds the decoded payload of a leaf element.

use smallvec::SmallVec;

use crate::tag::Tag;

/// The backing collection for a [`PrimitiveValue`]'s components: inline
/// storage for up to two elements (the common case — most DICOM value
/// multiplicities are 1), spilling to the heap only for wider values.
/// Mirrors the teacher crate's own `C<T>` alias for the same reason: a
/// decoded element value is allocated once per element, and the vast
/// majority never need more than a couple of components.
pub type C<T> = SmallVec<[T; 2]>;

/// A decoded DICOM element value, tagged by the category of VR that
/// produced it.
///
/// `SQ`, the item/delimiter pseudo-VR, and the long-form opaque VRs
/// (`OB`, `OW`, `OF`, `UN`, ...) never produce a `PrimitiveValue`; callers
/// work with their `raw` bytes directly.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    /// One or more textual components (`AE AS CS DA DS DT IS LO LT PN SH
    /// ST TM UI UT`), already right-trimmed of their padding character.
    Strs(C<String>),
    /// `UL` values.
    U32(C<u32>),
    /// `SL` values.
    I32(C<i32>),
    /// `US` values.
    U16(C<u16>),
    /// `SS` values.
    I16(C<i16>),
    /// `FL` values.
    F32(C<f32>),
    /// `FD` values.
    F64(C<f64>),
    /// `AT` values: one or more attribute tags.
    Tags(C<Tag>),
}

/// The kind of a [`PrimitiveValue`], independent of its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ValueType {
    Strs,
    U32,
    I32,
    U16,
    I16,
    F32,
    F64,
    Tags,
}

impl PrimitiveValue {
    /// This value's [`ValueType`].
    pub fn value_type(&self) -> ValueType {
        match self {
            PrimitiveValue::Strs(_) => ValueType::Strs,
            PrimitiveValue::U32(_) => ValueType::U32,
            PrimitiveValue::I32(_) => ValueType::I32,
            PrimitiveValue::U16(_) => ValueType::U16,
            PrimitiveValue::I16(_) => ValueType::I16,
            PrimitiveValue::F32(_) => ValueType::F32,
            PrimitiveValue::F64(_) => ValueType::F64,
            PrimitiveValue::Tags(_) => ValueType::Tags,
        }
    }

    /// The number of decoded components in this value (the VM, roughly).
    pub fn multiplicity(&self) -> usize {
        match self {
            PrimitiveValue::Strs(v) => v.len(),
            PrimitiveValue::U32(v) => v.len(),
            PrimitiveValue::I32(v) => v.len(),
            PrimitiveValue::U16(v) => v.len(),
            PrimitiveValue::I16(v) => v.len(),
            PrimitiveValue::F32(v) => v.len(),
            PrimitiveValue::F64(v) => v.len(),
            PrimitiveValue::Tags(v) => v.len(),
        }
    }

    /// Renders this value as a single display string, joining multiple
    /// components with `\`, DICOM's value-multiplicity delimiter.
    pub fn to_display_string(&self) -> String {
        match self {
            PrimitiveValue::Strs(v) => v.join("\\"),
            PrimitiveValue::U32(v) => join(v),
            PrimitiveValue::I32(v) => join(v),
            PrimitiveValue::U16(v) => join(v),
            PrimitiveValue::I16(v) => join(v),
            PrimitiveValue::F32(v) => join(v),
            PrimitiveValue::F64(v) => join(v),
            PrimitiveValue::Tags(v) => join(v),
        }
    }

    /// Borrow this value as a slice of strings, if it is textual.
    pub fn strings(&self) -> Option<&[String]> {
        match self {
            PrimitiveValue::Strs(v) => Some(v),
            _ => None,
        }
    }

    /// The first textual component, if this value is textual and non-empty.
    pub fn string(&self) -> Option<&str> {
        self.strings().and_then(|v| v.first()).map(String::as_str)
    }
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values.iter().map(T::to_string).collect::<Vec<_>>().join("\\")
}

/// Alias kept for callers that think in terms of a generic "value"; in
/// this codec, every decodable element value is primitive.
pub type Value = PrimitiveValue;

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn joins_numeric_components_with_backslash() {
        let v = PrimitiveValue::I32(smallvec![1, 2, 256, 3]);
        assert_eq!(v.to_display_string(), "1\\2\\256\\3");
    }

    #[test]
    fn multiplicity_matches_component_count() {
        assert_eq!(PrimitiveValue::Strs(smallvec!["a".to_string(), "b".to_string()]).multiplicity(), 2);
    }
}
