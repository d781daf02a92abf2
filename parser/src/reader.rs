//! The per-element parsing loop: byte buffer in, ordered and leveled
//! element list out.
//!
//! The loop is iterative, not recursive (a deeply nested, pathological
//! file must not blow the call stack): a scope stack of active
//! sequence/item scopes stands in for recursion, exactly as described in
//! the core design notes.

use dicom_core::dictionary::DataDictionary;
use dicom_core::header::{DataElementHeader, Header, Length};
use dicom_core::tag::Tag;
use dicom_core::value::PrimitiveValue;
use dicom_core::vr::VR;
use dicom_encoding::codec::{Codec, TransferSyntax};
use dicom_transfer_syntax_registry::{State as TsState, TransferSyntaxFsm};

use crate::element::{Element, FragmentKind};
use crate::error::{ReadError, ReadResult, Warning};

const PREAMBLE_LEN: usize = 128;
const MAGIC: &[u8; 4] = b"DICM";

/// Tag of the transfer syntax UID element in the file meta group.
const TRANSFER_SYNTAX_UID: Tag = Tag(0x0002, 0x0010);

#[derive(Debug, Clone, Copy)]
enum Scope {
    /// Closes once the cursor reaches `end`.
    Known { end: usize, encapsulated: bool },
    /// Closes only on an explicit item/sequence delimiter.
    Delimited { encapsulated: bool },
}

impl Scope {
    fn is_encapsulated(self) -> bool {
        match self {
            Scope::Known { encapsulated, .. } | Scope::Delimited { encapsulated } => encapsulated,
        }
    }
}

/// The outcome of parsing a byte buffer into an ordered, leveled element
/// list.
#[derive(Debug, Clone)]
pub struct ReadOutcome {
    /// The elements, in read (and therefore write) order.
    pub elements: Vec<Element>,
    /// The resolved transfer syntax UID for the body (defaulted when
    /// `0002,0010` was absent).
    pub transfer_syntax_uid: String,
    /// The codec policy the body was decoded under.
    pub policy: TransferSyntax,
    /// Whether a 128-byte preamble + `"DICM"` magic was found.
    pub preamble_present: bool,
    /// Recoverable conditions encountered while parsing, in the order
    /// they were first observed.
    pub warnings: Vec<Warning>,
    /// `false` when the last element's value ran past the available
    /// bytes (the file was truncated mid-element).
    pub success: bool,
    /// Cursor offsets immediately after each successfully parsed
    /// element, for `extract_segments`.
    pub boundaries: Vec<usize>,
}

/// Parse `buf` into an ordered, leveled element list.
///
/// `dict` resolves a tag's provisional VR for implicit-VR elements and
/// for explicit-VR elements whose on-wire VR bytes are not recognized.
pub fn read_dataset(buf: &[u8], dict: &dyn DataDictionary) -> ReadResult<ReadOutcome> {
    if buf.len() < 8 {
        return Err(ReadError::TooShort);
    }

    let mut warnings = Vec::new();
    let mut boundaries = Vec::new();

    let (mut pos, preamble_present) =
        if buf.len() >= PREAMBLE_LEN + 4 && &buf[PREAMBLE_LEN..PREAMBLE_LEN + 4] == MAGIC {
            (PREAMBLE_LEN + 4, true)
        } else {
            tracing::warn!("{}", Warning::MissingPreamble);
            warnings.push(Warning::MissingPreamble);
            (0, false)
        };
    boundaries.push(pos);

    let mut fsm = TransferSyntaxFsm::new();
    let mut policy = TransferSyntaxFsm::meta_policy();
    let mut ts_uid_seen: Option<String> = None;
    let mut ts_uid_final: Option<String> = None;

    let mut elements: Vec<Element> = Vec::new();
    let mut scopes: Vec<Scope> = Vec::new();
    let mut hierarchy_warned = false;
    let mut success = true;

    loop {
        if pos + 4 > buf.len() {
            break;
        }

        let tag_bytes: [u8; 4] = buf[pos..pos + 4].try_into().unwrap();

        // Peek the group under the currently active policy. This is safe
        // even across an endianness flip: the file meta group's tag
        // bytes never decode to a non-0002 group under either
        // endianness in practice, so the peek reliably detects the
        // boundary; the tag is then redecoded below under whatever
        // policy is active after the (possible) transition.
        let peeked = Codec::new(policy).decode_tag(&tag_bytes);
        if fsm.state() == TsState::Meta && TransferSyntaxFsm::observes_boundary(peeked) {
            let resolution = fsm.enter_body(ts_uid_seen.as_deref());
            if resolution.invalid {
                warnings.push(Warning::InvalidTransferSyntax { uid: ts_uid_seen.clone() });
            } else if let Some(w) = &resolution.warning {
                warnings.push(Warning::Other(w.clone()));
            }
            policy = resolution.transfer_syntax;
            ts_uid_final = Some(resolution.uid);
        }

        let codec = Codec::new(policy);
        let tag = codec.decode_tag(&tag_bytes);
        pos += 4;

        let provisional_vr = dict.by_tag(tag).map(|e| e.vr).unwrap_or(VR::UN);

        let header = match decode_header(buf, &mut pos, tag, provisional_vr, policy, &mut warnings) {
            Some(h) => h,
            None => {
                success = false;
                break;
            }
        };

        // Pixel Data promotion: a zero-length 7FE0,0010 carries its
        // frames as items rather than a flat value. Its VR on the wire
        // (`OB`/`OW`) is kept as-is — only the scope-opening behavior is
        // promoted, via `opens_encapsulated`/`encapsulated_pixel_data`,
        // so a later write reproduces the original VR byte-for-byte.
        let opens_encapsulated = tag == Tag::PIXEL_DATA && header.len.get() == Some(0);

        let currently_encapsulated = scopes.last().map(|s| s.is_encapsulated()).unwrap_or(false);

        // A delimiter closes its scope immediately: its own level matches
        // the scope it is closing, one less than an un-popped reading of
        // the stack would give.
        let is_delimiter =
            tag.is_item_related() && (header.is_item_delimiter() || header.is_sequence_delimiter());
        if is_delimiter {
            scopes.pop();
        }
        let level = scopes.len() as u32;

        let (raw, decoded, fragment_kind) = if header.vr == Some(VR::SQ) || opens_encapsulated || tag.is_item_related() {
            (Vec::new(), None, None)
        } else if header.len.0 == 0 {
            let decoded = codec.decode(&[], header.vr.unwrap_or(VR::UN));
            (Vec::new(), decoded, None)
        } else {
            let len = header.len.get().expect("checked above") as usize;
            if pos + len > buf.len() {
                let raw = buf[pos..].to_vec();
                pos = buf.len();
                tracing::warn!("{}", Warning::TruncatedLastElement { tag });
                warnings.push(Warning::TruncatedLastElement { tag });
                elements.push(Element {
                    header,
                    raw,
                    decoded: None,
                    level,
                    fragment_kind: None,
                    encapsulated_pixel_data: false,
                });
                success = false;
                break;
            }

            if len % 2 != 0 {
                warnings.push(Warning::OddLength { tag, length: len as u32 });
            }

            let raw = buf[pos..pos + len].to_vec();
            pos += len;

            if tag == Tag::ITEM && currently_encapsulated {
                let already_has_fragment = elements
                    .iter()
                    .rev()
                    .take_while(|e| e.level >= level)
                    .any(|e| e.fragment_kind.is_some());
                let kind =
                    if already_has_fragment { FragmentKind::Frame } else { FragmentKind::OffsetTable };
                (raw, None, Some(kind))
            } else {
                let vr = header.vr.unwrap_or(VR::UN);
                let decoded = codec.decode(&raw, vr);
                (raw, decoded, None)
            }
        };

        if tag == TRANSFER_SYNTAX_UID {
            if let Some(PrimitiveValue::Strs(s)) = &decoded {
                ts_uid_seen = s.first().cloned();
            }
        }

        elements.push(Element { header, raw, decoded, level, fragment_kind, encapsulated_pixel_data: opens_encapsulated });
        boundaries.push(pos);

        // Hierarchy update: opening elements push (delimiters already
        // popped above, before `level` was computed).
        if !is_delimiter {
            if tag.is_item_related() {
                if header.opens_scope() && !currently_encapsulated {
                    scopes.push(scope_for(header.len, pos, false));
                }
            } else if header.vr == Some(VR::SQ) || opens_encapsulated {
                scopes.push(scope_for(header.len, pos, opens_encapsulated));
            }
        }

        while let Some(top) = scopes.last() {
            match *top {
                Scope::Known { end, .. } => {
                    if pos == end {
                        scopes.pop();
                    } else if pos > end {
                        if !hierarchy_warned {
                            tracing::warn!("{}", Warning::HierarchyOverflow);
                            warnings.push(Warning::HierarchyOverflow);
                            hierarchy_warned = true;
                        }
                        break;
                    } else {
                        break;
                    }
                }
                Scope::Delimited { .. } => break,
            }
        }
    }

    let transfer_syntax_uid = ts_uid_final.unwrap_or_else(|| {
        ts_uid_seen.unwrap_or_else(|| dicom_dictionary_std::uids::IMPLICIT_VR_LITTLE_ENDIAN.to_string())
    });

    Ok(ReadOutcome { elements, transfer_syntax_uid, policy, preamble_present, warnings, success, boundaries })
}

/// Decide what kind of scope an opening element pushes: known-length if
/// the header gave a concrete length, delimiter-closed if undefined —
/// except a promoted (zero-length) Pixel Data element, whose fragments
/// are always delimiter-terminated regardless of its literal zero
/// length, since a known-length scope of zero bytes would close before
/// any item could be read.
fn scope_for(len: Length, pos: usize, encapsulated: bool) -> Scope {
    if encapsulated {
        return Scope::Delimited { encapsulated: true };
    }
    match len.get() {
        Some(n) => Scope::Known { end: pos + n as usize, encapsulated: false },
        None => Scope::Delimited { encapsulated: false },
    }
}

/// Decode one element header, advancing `pos` past it. Returns `None` on
/// EOF mid-header (a truncated file whose last element doesn't even have
/// a complete header).
fn decode_header(
    buf: &[u8],
    pos: &mut usize,
    tag: Tag,
    provisional_vr: VR,
    policy: TransferSyntax,
    warnings: &mut Vec<Warning>,
) -> Option<DataElementHeader> {
    if tag.is_item_related() {
        if *pos + 4 > buf.len() {
            return None;
        }
        let len = read_u32(buf, pos, policy);
        return Some(DataElementHeader::new_item(tag, Length(len)));
    }

    if policy.explicit {
        if *pos + 2 > buf.len() {
            return None;
        }
        let vr_bytes = [buf[*pos], buf[*pos + 1]];
        *pos += 2;
        let vr = VR::from_binary(vr_bytes).unwrap_or_else(|| {
            tracing::warn!("{}", Warning::UnknownVR { tag });
            warnings.push(Warning::UnknownVR { tag });
            provisional_vr
        });

        if vr.has_long_explicit_header() {
            if *pos + 6 > buf.len() {
                return None;
            }
            *pos += 2; // reserved
            let len = read_u32(buf, pos, policy);
            Some(DataElementHeader::new(tag, vr, Length(len)))
        } else {
            if *pos + 2 > buf.len() {
                return None;
            }
            let len = read_u16(buf, pos, policy) as u32;
            Some(DataElementHeader::new(tag, vr, Length(len)))
        }
    } else {
        if *pos + 4 > buf.len() {
            return None;
        }
        let len = read_u32(buf, pos, policy);
        Some(DataElementHeader::new(tag, provisional_vr, Length(len)))
    }
}

fn read_u16(buf: &[u8], pos: &mut usize, policy: TransferSyntax) -> u16 {
    let bytes = [buf[*pos], buf[*pos + 1]];
    *pos += 2;
    match policy.endianness {
        dicom_encoding::Endianness::Little => u16::from_le_bytes(bytes),
        dicom_encoding::Endianness::Big => u16::from_be_bytes(bytes),
    }
}

fn read_u32(buf: &[u8], pos: &mut usize, policy: TransferSyntax) -> u32 {
    let bytes = [buf[*pos], buf[*pos + 1], buf[*pos + 2], buf[*pos + 3]];
    *pos += 4;
    match policy.endianness {
        dicom_encoding::Endianness::Little => u32::from_le_bytes(bytes),
        dicom_encoding::Endianness::Big => u32::from_be_bytes(bytes),
    }
}

/// Split a buffer of `total_len` bytes into contiguous chunks no larger
/// than `max_bytes`, only ever cutting at one of `boundaries`.
///
/// A single element larger than `max_bytes` unavoidably produces one
/// oversized segment, since a split may not fall mid-element.
pub fn split_at_boundaries(total_len: usize, boundaries: &[usize], max_bytes: usize) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();
    let mut start = 0usize;
    let mut last_cut = 0usize;

    for &b in boundaries {
        if b - start > max_bytes && last_cut > start {
            segments.push((start, last_cut));
            start = last_cut;
        }
        last_cut = b;
    }
    if start < total_len {
        segments.push((start, total_len));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_dictionary_std::StandardDataDictionary;

    fn le_short_explicit(tag: Tag, vr: &str, value: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&tag.group().to_le_bytes());
        out.extend_from_slice(&tag.element().to_le_bytes());
        out.extend_from_slice(vr.as_bytes());
        out.extend_from_slice(&(value.len() as u16).to_le_bytes());
        out.extend_from_slice(value);
        out
    }

    fn build_meta(ts_uid: &str) -> Vec<u8> {
        let mut body = Vec::new();
        let mut uid = ts_uid.as_bytes().to_vec();
        if uid.len() % 2 != 0 {
            uid.push(0);
        }
        body.extend(le_short_explicit(Tag(0x0002, 0x0010), "UI", &uid));
        let mut out = vec![0u8; 128];
        out.extend_from_slice(b"DICM");
        out.extend(le_short_explicit(Tag(0x0002, 0x0000), "UL", &(body.len() as u32).to_le_bytes()));
        out.extend(body);
        out
    }

    #[test]
    fn no_magic_rewinds_with_single_warning() {
        let elem = le_short_explicit(Tag(0x0010, 0x0010), "PN", b"Doe^John");
        let outcome = read_dataset(&elem, &StandardDataDictionary).unwrap();
        assert!(!outcome.preamble_present);
        assert_eq!(outcome.warnings.iter().filter(|w| matches!(w, Warning::MissingPreamble)).count(), 1);
        assert_eq!(outcome.elements.len(), 1);
    }

    #[test]
    fn resolves_explicit_le_body_after_meta() {
        let mut buf = build_meta("1.2.840.10008.1.2.1");
        buf.extend(le_short_explicit(Tag(0x0010, 0x0010), "PN", b"Doe^John"));
        let outcome = read_dataset(&buf, &StandardDataDictionary).unwrap();
        assert_eq!(outcome.transfer_syntax_uid, "1.2.840.10008.1.2.1");
        assert!(outcome.policy.explicit);
        assert_eq!(outcome.elements.last().unwrap().header.tag, Tag(0x0010, 0x0010));
        assert!(outcome.success);
    }

    #[test]
    fn deflated_transfer_syntax_warns_without_invalid_transfer_syntax() {
        let mut buf = build_meta("1.2.840.10008.1.2.1.99");
        buf.extend(le_short_explicit(Tag(0x0010, 0x0010), "PN", b"Doe^John"));
        let outcome = read_dataset(&buf, &StandardDataDictionary).unwrap();
        assert_eq!(outcome.transfer_syntax_uid, "1.2.840.10008.1.2.1.99");
        assert!(!outcome.warnings.iter().any(|w| matches!(w, Warning::InvalidTransferSyntax { .. })));
        assert!(outcome.warnings.iter().any(|w| matches!(w, Warning::Other(msg) if msg.contains("untested"))));
    }

    #[test]
    fn top_level_elements_are_level_zero() {
        let mut buf = build_meta("1.2.840.10008.1.2.1");
        buf.extend(le_short_explicit(Tag(0x0010, 0x0010), "PN", b"Doe^John"));
        let outcome = read_dataset(&buf, &StandardDataDictionary).unwrap();
        assert!(outcome.elements.iter().all(|e| e.level == 0));
    }

    #[test]
    fn sequence_with_undefined_length_nests_children() {
        let mut buf = build_meta("1.2.840.10008.1.2.1");
        // SQ, undefined length
        buf.extend_from_slice(&0x0008u16.to_le_bytes());
        buf.extend_from_slice(&0x1140u16.to_le_bytes());
        buf.extend_from_slice(b"SQ");
        buf.extend_from_slice(&[0, 0]); // reserved
        buf.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
        // item, undefined length
        buf.extend_from_slice(&0xFFFEu16.to_le_bytes());
        buf.extend_from_slice(&0xE000u16.to_le_bytes());
        buf.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
        // nested element inside item
        buf.extend(le_short_explicit(Tag(0x0008, 0x1150), "UI", b"1.2\0"));
        // item delimiter
        buf.extend_from_slice(&0xFFFEu16.to_le_bytes());
        buf.extend_from_slice(&0xE00Du16.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        // sequence delimiter
        buf.extend_from_slice(&0xFFFEu16.to_le_bytes());
        buf.extend_from_slice(&0xE0DDu16.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());

        let outcome = read_dataset(&buf, &StandardDataDictionary).unwrap();
        let levels: Vec<u32> = outcome.elements.iter().map(|e| e.level).collect();
        // meta group-length, meta TS UID, SQ(0), item(1), nested(2), item-delim(1), seq-delim(0)
        assert_eq!(levels, vec![0, 0, 0, 1, 2, 1, 0]);
    }

    #[test]
    fn truncated_value_is_reported_unsuccessful() {
        let mut buf = build_meta("1.2.840.10008.1.2.1");
        let mut elem = le_short_explicit(Tag(0x0010, 0x0010), "PN", b"Doe^John");
        elem.truncate(elem.len() - 4);
        buf.extend(elem);
        let outcome = read_dataset(&buf, &StandardDataDictionary).unwrap();
        assert!(!outcome.success);
        assert!(outcome.warnings.iter().any(|w| matches!(w, Warning::TruncatedLastElement { .. })));
    }

    #[test]
    fn too_short_input_errors() {
        assert!(matches!(read_dataset(&[0u8; 4], &StandardDataDictionary), Err(ReadError::TooShort)));
    }

    #[test]
    fn segments_split_on_element_boundaries_only() {
        let bounds = vec![10, 20, 30, 45];
        let segments = split_at_boundaries(45, &bounds, 15);
        for (s, e) in &segments {
            assert!(bounds.contains(e) || *e == 45);
            assert!(*s == 0 || bounds.contains(s));
        }
        assert_eq!(segments.last().unwrap().1, 45);
    }
}
