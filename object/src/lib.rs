//! A high-level API for reading and manipulating DICOM objects.
//!
//! [`Object`] is the facade the rest of the toolkit builds on: it owns an
//! [`ElementStore`] (the ordered, leveled element collection, see
//! [`store`]) plus the bookkeeping a Part-10 file carries alongside its
//! elements — which transfer syntax its body was decoded under, whether
//! it had a preamble, and the recoverable warnings accumulated while
//! reading it.
//!
//! ```no_run
//! use dicom_object::{Object, ReadOptions};
//!
//! # fn run() -> dicom_object::Result<()> {
//! let obj = Object::open_file("scan.dcm", ReadOptions::default())?;
//! let value = obj.value("PatientName", Default::default())?;
//! println!("{}", value[0].to_display_string());
//! # Ok(())
//! # }
//! ```
#![deny(trivial_casts, trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications, unused_import_braces)]

pub mod error;
pub mod query;
pub mod store;

pub use error::{Error, Result};
pub use query::{Query, QueryOptions, SetOptions, SetValue};
pub use store::ElementStore;

use std::fs;
use std::path::Path;

use snafu::ResultExt;

use dicom_core::value::PrimitiveValue;
use dicom_core::VR;
use dicom_dictionary_std::{uids, StandardDataDictionary};
use dicom_encoding::codec::TransferSyntax;
use dicom_encoding::Endianness;
use dicom_parser::{element_header_overhead, read_dataset, split_at_boundaries, write_dataset, Element, Warning};

use error::{CreateDirSnafu, OpenFileSnafu, ReadSnafu, WriteFileSnafu, WriteSnafu};

/// Options governing how an [`Object`] is parsed from bytes or a file.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Pre-split the source into segments no larger than this many bytes
    /// each, recorded alongside the object for later retrieval; see
    /// [`Object::read_boundaries`]. `None` skips this bookkeeping.
    pub segment_size: Option<usize>,
    /// Override the transfer syntax to decode the body under, instead of
    /// resolving `0002,0010` (or defaulting to Implicit VR Little
    /// Endian). Useful for a bare data set handed over without its Part-10
    /// meta header.
    pub syntax: Option<String>,
}

/// Options governing how an [`Object`] is serialized.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Override the transfer syntax the body is written under, instead
    /// of the transfer syntax the object was read with (or the codec's
    /// default, `1.2.840.10008.1.2`, for a from-scratch object).
    pub transfer_syntax: Option<String>,
}

/// Options governing [`Object::print`].
#[derive(Debug, Clone, Default)]
pub struct PrintOptions<'a> {
    /// Prefix each line with its level number.
    pub levels: bool,
    /// Indent each line by its level, rendering the hierarchy as a tree.
    pub tree: bool,
    /// Write the rendered dump to this file instead of returning it.
    pub to_file: Option<&'a Path>,
}

/// A DICOM Part-10 object: an element collection plus the file-level
/// state (transfer syntax, preamble, warnings) that is not itself an
/// element.
#[derive(Debug, Clone)]
pub struct Object {
    store: ElementStore,
    dict: StandardDataDictionary,
    transfer_syntax_uid: String,
    preamble_present: bool,
    errors: Vec<Warning>,
    read_boundaries: Option<Vec<(usize, usize)>>,
}

impl Object {
    /// Parse a byte buffer into an object.
    pub fn from_bytes(bytes: &[u8], opts: ReadOptions) -> Result<Self> {
        let dict = StandardDataDictionary;
        let outcome = read_dataset(bytes, &dict).context(ReadSnafu)?;

        let (transfer_syntax_uid, policy) = match &opts.syntax {
            Some(uid) => (uid.clone(), policy_for_uid(uid)),
            None => (outcome.transfer_syntax_uid.clone(), outcome.policy),
        };

        let read_boundaries = opts
            .segment_size
            .map(|max| split_at_boundaries(bytes.len(), &outcome.boundaries, max));

        Ok(Object {
            store: ElementStore::new(outcome.elements, policy),
            dict,
            transfer_syntax_uid,
            preamble_present: outcome.preamble_present,
            errors: outcome.warnings,
            read_boundaries,
        })
    }

    /// Read a file from disk into an object, creating no output — the
    /// counterpart creating missing directories lives on the write side
    /// (§4.3's path creation rule is a writer concern, not a reader one).
    pub fn open_file(path: impl AsRef<Path>, opts: ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).context(OpenFileSnafu { path: path.to_path_buf() })?;
        Self::from_bytes(&bytes, opts)
    }

    /// The resolved body transfer syntax UID.
    pub fn transfer_syntax_uid(&self) -> &str {
        &self.transfer_syntax_uid
    }

    /// Whether the source had a 128-byte preamble and `"DICM"` magic.
    pub fn preamble_present(&self) -> bool {
        self.preamble_present
    }

    /// The recoverable warnings accumulated while reading (empty for an
    /// object built in memory and never read from bytes).
    pub fn errors(&self) -> &[Warning] {
        &self.errors
    }

    /// The byte ranges `[start, end)` in the original source this object
    /// was split into at construction time, if [`ReadOptions::segment_size`]
    /// was set.
    pub fn read_boundaries(&self) -> Option<&[(usize, usize)]> {
        self.read_boundaries.as_deref()
    }

    /// The backing element store, for direct access to hierarchy queries
    /// not mirrored on `Object` itself.
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// Mutable access to the backing element store.
    pub fn store_mut(&mut self) -> &mut ElementStore {
        &mut self.store
    }

    /// Resolve `query` to its matching positions.
    pub fn find(&self, query: impl Into<Query>, opts: QueryOptions) -> Vec<usize> {
        self.store.find(query, &self.dict, opts)
    }

    /// The decoded value(s) matching `query`.
    pub fn value(&self, query: impl Into<Query>, opts: QueryOptions) -> Result<Vec<&PrimitiveValue>> {
        self.store.value(query, &self.dict, opts)
    }

    /// The raw, encoded bytes of the value(s) matching `query`.
    pub fn raw(&self, query: impl Into<Query>, opts: QueryOptions) -> Result<Vec<&[u8]>> {
        self.store.raw(query, &self.dict, opts)
    }

    /// Set `query`'s value (optionally creating it, see [`SetOptions`]).
    pub fn set(&mut self, query: impl Into<Query>, value: SetValue, vr_hint: Option<VR>, opts: SetOptions) -> Result<usize> {
        self.store.set(query, value, vr_hint, &self.dict, opts)
    }

    /// Remove the element matching `query`.
    pub fn remove(&mut self, query: impl Into<Query>) -> Result<Element> {
        self.store.remove(query, &self.dict)
    }

    /// Positions whose level exceeds `position`'s until the level
    /// returns; see [`ElementStore::children`].
    pub fn children(&self, position: usize, next_only: bool) -> Vec<usize> {
        self.store.children(position, next_only)
    }

    /// The ascending chain of ancestor positions of `position`, outermost
    /// first.
    pub fn parents(&self, position: usize) -> Vec<usize> {
        self.store.parents(position)
    }

    /// Serialize this object to a byte buffer, synthesizing any missing
    /// meta elements and recomputing `0002,0000` (see `dicom-parser`'s
    /// writer).
    pub fn to_bytes(&self, opts: WriteOptions) -> Result<Vec<u8>> {
        let ts_uid = opts.transfer_syntax.unwrap_or_else(|| self.transfer_syntax_uid.clone());
        let outcome = write_dataset(self.store.elements(), &ts_uid).context(WriteSnafu)?;
        Ok(outcome.bytes)
    }

    /// Serialize and write this object to `path`, creating the parent
    /// directory if it does not already exist.
    pub fn write(&self, path: impl AsRef<Path>, opts: WriteOptions) -> Result<()> {
        let bytes = self.to_bytes(opts)?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context(CreateDirSnafu { path: parent.to_path_buf() })?;
            }
        }
        fs::write(path, &bytes).context(WriteFileSnafu { path: path.to_path_buf() })?;
        Ok(())
    }

    /// Serialize this object and split the result into segments no
    /// larger than `max_bytes`, cutting only on element boundaries, for
    /// handoff to an external network layer.
    pub fn encode_segments(&self, max_bytes: usize, opts: WriteOptions) -> Result<Vec<Vec<u8>>> {
        let ts_uid = opts.transfer_syntax.unwrap_or_else(|| self.transfer_syntax_uid.clone());
        let outcome = write_dataset(self.store.elements(), &ts_uid).context(WriteSnafu)?;
        let ranges = split_at_boundaries(outcome.bytes.len(), &outcome.boundaries, max_bytes);
        Ok(ranges.into_iter().map(|(start, end)| outcome.bytes[start..end].to_vec()).collect())
    }

    /// A one-line summary: element count, transfer syntax, and the
    /// top-level tag range.
    pub fn summary(&self) -> String {
        let elements = self.store.elements();
        let top_level: Vec<_> = elements.iter().filter(|e| e.level == 0).collect();
        let range = match (top_level.first(), top_level.last()) {
            (Some(first), Some(last)) => format!("{}..{}", first.header.tag, last.header.tag),
            _ => "(empty)".to_string(),
        };
        format!(
            "{} elements, transfer syntax {} ({}), tags {}",
            elements.len(),
            self.transfer_syntax_uid,
            uids::uid_name(&self.transfer_syntax_uid),
            range
        )
    }

    /// Render the element list as a dump (one line per element: tag,
    /// name, VR, length, value preview), per `opts`.
    pub fn print(&self, opts: PrintOptions<'_>) -> Result<String> {
        let mut out = String::new();
        for (i, element) in self.store.elements().iter().enumerate() {
            if opts.levels {
                out.push_str(&format!("[{:>3}] ", element.level));
            }
            if opts.tree {
                out.push_str(&"  ".repeat(element.level as usize));
            }
            let entry = self.dict.by_tag(element.header.tag);
            let name = entry.name.as_str();
            let vr = element.header.vr.map(|v| v.as_str()).unwrap_or("()");
            let preview = match &element.decoded {
                Some(value) => value.to_display_string(),
                None if element.header.vr == Some(VR::SQ) || element.header.tag.is_item_related() => {
                    "<sequence>".to_string()
                }
                None => format!("<{} raw bytes>", element.raw.len()),
            };
            out.push_str(&format!("#{i} {} {} {} {}: {}\n", element.header.tag, name, vr, element.header.len.0, preview));
        }

        if let Some(path) = opts.to_file {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent).context(CreateDirSnafu { path: parent.to_path_buf() })?;
                }
            }
            fs::write(path, &out).context(WriteFileSnafu { path: path.to_path_buf() })?;
        }
        Ok(out)
    }

    /// The per-element overhead (tag plus header, excluding the value
    /// itself) a new element of this VR would add, under this object's
    /// current body policy. Exposed so callers computing their own
    /// group-length deltas (e.g. scripted bulk edits) agree with the
    /// store's own bookkeeping.
    pub fn header_overhead(&self, vr: Option<VR>, is_item_related: bool) -> usize {
        element_header_overhead(self.store.policy().explicit, vr, is_item_related)
    }
}

fn policy_for_uid(uid: &str) -> TransferSyntax {
    let props = uids::transfer_syntax(uid);
    let endianness = if props.big_endian { Endianness::Big } else { Endianness::Little };
    TransferSyntax { explicit: props.explicit, endianness }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le_short_explicit(tag: dicom_core::Tag, vr: &str, value: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&tag.group().to_le_bytes());
        out.extend_from_slice(&tag.element().to_le_bytes());
        out.extend_from_slice(vr.as_bytes());
        out.extend_from_slice(&(value.len() as u16).to_le_bytes());
        out.extend_from_slice(value);
        out
    }

    fn build_file(ts_uid: &str, body: &[u8]) -> Vec<u8> {
        let mut meta_body = Vec::new();
        let mut uid = ts_uid.as_bytes().to_vec();
        if uid.len() % 2 != 0 {
            uid.push(0);
        }
        meta_body.extend(le_short_explicit(dicom_core::Tag(0x0002, 0x0010), "UI", &uid));
        let mut out = vec![0u8; 128];
        out.extend_from_slice(b"DICM");
        out.extend(le_short_explicit(
            dicom_core::Tag(0x0002, 0x0000),
            "UL",
            &(meta_body.len() as u32).to_le_bytes(),
        ));
        out.extend(meta_body);
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn reads_patient_name_and_transfer_syntax() {
        let body = le_short_explicit(dicom_core::Tag(0x0010, 0x0010), "PN", b"Doe^John");
        let bytes = build_file("1.2.840.10008.1.2.1", &body);
        let obj = Object::from_bytes(&bytes, ReadOptions::default()).unwrap();
        assert_eq!(obj.transfer_syntax_uid(), "1.2.840.10008.1.2.1");
        let value = obj.value("PatientName", QueryOptions::default()).unwrap();
        assert_eq!(value[0].to_display_string(), "Doe^John");
    }

    #[test]
    fn round_trips_byte_for_byte_when_untouched() {
        let body = le_short_explicit(dicom_core::Tag(0x0010, 0x0010), "PN", b"Doe^John");
        let bytes = build_file("1.2.840.10008.1.2.1", &body);
        let obj = Object::from_bytes(&bytes, ReadOptions::default()).unwrap();
        let written = obj.to_bytes(WriteOptions::default()).unwrap();
        assert_eq!(written, bytes);
    }

    #[test]
    fn set_then_remove_keeps_ordering_and_group_length_sane() {
        let body = le_short_explicit(dicom_core::Tag(0x0010, 0x0020), "LO", b"12345678");
        let bytes = build_file("1.2.840.10008.1.2.1", &body);
        let mut obj = Object::from_bytes(&bytes, ReadOptions::default()).unwrap();

        obj.set(
            "PatientName",
            SetValue::Decoded(PrimitiveValue::Strs(vec!["Doe^John".to_string()].into())),
            None,
            SetOptions::create(),
        )
        .unwrap();

        let positions = obj.find("0010,0010", QueryOptions::default());
        assert_eq!(positions.len(), 1);
        // PatientName (0010,0010) sorts before PatientID (0010,0020)
        assert!(positions[0] < obj.find("0010,0020", QueryOptions::default())[0]);

        obj.remove("PatientID").unwrap();
        assert!(obj.find("0010,0020", QueryOptions::default()).is_empty());
    }

    #[test]
    fn write_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("out.dcm");
        let obj = Object::from_bytes(&build_file("1.2.840.10008.1.2", &[]), ReadOptions::default()).unwrap();
        obj.write(&nested, WriteOptions::default()).unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn encode_segments_cuts_on_element_boundaries() {
        let mut body = Vec::new();
        for i in 0..20u16 {
            body.extend(le_short_explicit(dicom_core::Tag(0x0008, i), "SH", b"value"));
        }
        let bytes = build_file("1.2.840.10008.1.2.1", &body);
        let obj = Object::from_bytes(&bytes, ReadOptions::default()).unwrap();
        let segments = obj.encode_segments(64, WriteOptions::default()).unwrap();
        assert!(segments.len() > 1);
        let total: usize = segments.iter().map(Vec::len).sum();
        assert_eq!(total, obj.to_bytes(WriteOptions::default()).unwrap().len());
    }

    #[test]
    fn summary_reports_element_count_and_transfer_syntax() {
        let body = le_short_explicit(dicom_core::Tag(0x0010, 0x0010), "PN", b"Doe^John");
        let bytes = build_file("1.2.840.10008.1.2.1", &body);
        let obj = Object::from_bytes(&bytes, ReadOptions::default()).unwrap();
        let summary = obj.summary();
        assert!(summary.contains("Explicit VR Little Endian"));
    }
}
