//! The byte-stream reader and writer for DICOM data sets.
//!
//! This crate turns a Part-10 byte stream into a flat, leveled list of
//! [`element::Element`]s (see [`reader::read_dataset`]) and back (see
//! [`writer::write_dataset`]). It owns the transfer-syntax switchover at
//! the meta/body boundary (via `dicom-transfer-syntax-registry`) and the
//! iterative, non-recursive scope tracking that keeps arbitrarily nested
//! sequences from blowing the call stack.

pub mod element;
pub mod error;
pub mod reader;
pub mod writer;

pub use element::{Element, FragmentKind};
pub use error::{ReadError, ReadResult, Warning, WriteError, WriteResult};
pub use reader::{read_dataset, split_at_boundaries, ReadOutcome};
pub use writer::{write_dataset, WriteOutcome};

use dicom_core::vr::VR;

/// The number of header bytes preceding an element's value, excluding its
/// 4-byte tag: the VR and length fields for an ordinary element, or just
/// the length field for an item-related tag.
///
/// Used to keep a group's `GGGG,0000` length element's declared value in
/// sync without re-serializing the whole group on every edit: adding or
/// removing an element changes that group's length by exactly
/// `4 + element_header_overhead(..) + value_len`.
pub fn element_header_overhead(explicit: bool, vr: Option<VR>, is_item_related: bool) -> usize {
    if is_item_related {
        return 4;
    }
    match (explicit, vr) {
        (true, Some(vr)) if vr.has_long_explicit_header() => 8,
        _ => 4,
    }
}
