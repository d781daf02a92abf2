//! The reader/writer's unit of work: a data element plus its position in
//! the sequence/item hierarchy.
//!
//! Per the core crate's design, hierarchy is not a pointer graph: every
//! element carries the `level` at which it sits (0 = top), and a caller
//! reconstructs parent/child relationships by scanning runs of levels
//! (see `dicom-object`'s element store).

use dicom_core::header::{DataElementHeader, Header, Length};
use dicom_core::value::PrimitiveValue;
use dicom_core::{Tag, VR};

/// Which role an item plays inside encapsulated pixel data.
///
/// Items that are ordinary nested elements (inside a ordinary `SQ`) carry
/// `fragment_kind = None`; only items found directly under a promoted,
/// zero-length Pixel Data element are tagged this way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// The first item following the promoted Pixel Data element: a basic
    /// offset table, not image data.
    OffsetTable,
    /// A subsequent item: an opaque, still-encoded image frame.
    Frame,
}

/// A single parsed (or to-be-written) data element, positioned in the
/// hierarchy by `level`.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag, VR (`None` for item-related tags) and declared length.
    pub header: DataElementHeader,
    /// The raw, encoded value bytes, always of even length. Empty for
    /// elements that open a hierarchy scope (`SQ`, items).
    pub raw: Vec<u8>,
    /// The decoded value, when the VR supports one (absent for `SQ`,
    /// item-related tags, and the long-form opaque VRs).
    pub decoded: Option<PrimitiveValue>,
    /// This element's depth in the sequence/item hierarchy; 0 is the top.
    pub level: u32,
    /// Set only for items parsed directly under a promoted Pixel Data
    /// element (see [`dicom_core::header::DataElementHeader::opens_scope`]
    /// and the reader's pixel-data promotion rule).
    pub fragment_kind: Option<FragmentKind>,
    /// `true` for a zero-length `7FE0,0010` Pixel Data element whose
    /// frames follow as items rather than a flat value. This is tracked
    /// here, separately from `header.vr`, so the element's original wire
    /// VR (`OB`/`OW`) is preserved for byte-faithful writing: the element
    /// still opens a delimiter-terminated scope even though its VR never
    /// changes to `SQ`.
    pub encapsulated_pixel_data: bool,
}

impl Element {
    /// This element's VR, if it has one on the wire.
    pub fn vr(&self) -> Option<VR> {
        self.header.vr
    }

    /// This element's declared length.
    pub fn length(&self) -> Length {
        self.header.len
    }
}

impl Header for Element {
    fn tag(&self) -> Tag {
        self.header.tag
    }

    fn length(&self) -> Length {
        self.header.len
    }
}
