//! Serialization of an ordered, leveled element list back to a
//! standards-compliant byte stream.
//!
//! The writer never re-encodes a value unless asked to: every [`Element`]
//! already carries its `raw` bytes, so writing an untouched read's output
//! reproduces the original file byte-for-byte. Meta-group synthesis and
//! group-length maintenance are the only places this module computes new
//! bytes itself.

use dicom_core::header::DataElementHeader;
use dicom_core::tag::Tag;
use dicom_core::vr::VR;
use dicom_encoding::codec::{Codec, TransferSyntax};
use snafu::ResultExt;

use crate::element::Element;
use crate::error::{EncodeSnafu, WriteResult};

const PREAMBLE_LEN: usize = 128;

/// The outcome of serializing an element list.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    /// The complete byte stream: preamble, magic, meta group, body.
    pub bytes: Vec<u8>,
    /// Cursor offsets immediately after each written element, for
    /// `encode_segments`.
    pub boundaries: Vec<usize>,
}

/// Writes `elements` as a full DICOM Part-10 stream under `body_ts_uid`.
///
/// `elements` is consulted read-only; meta defaults the caller's object
/// didn't already carry are synthesized into the output but not written
/// back into `elements`. Group `0002`'s own group-length (`0002,0000`) is
/// always recomputed fresh; every other group's `GGGG,0000` is trusted
/// as already-maintained by the element store.
pub fn write_dataset(elements: &[Element], body_ts_uid: &str) -> WriteResult<WriteOutcome> {
    let mut bytes = vec![0u8; PREAMBLE_LEN];
    bytes.extend_from_slice(b"DICM");
    let mut boundaries = vec![bytes.len()];

    let meta_codec = Codec::new(TransferSyntax::EXPLICIT_LITTLE_ENDIAN);
    let meta_elements = synthesize_meta(elements, body_ts_uid, &meta_codec)?;

    for element in &meta_elements {
        write_element(&mut bytes, element, true, &meta_codec)?;
        boundaries.push(bytes.len());
    }

    let ts = dicom_dictionary_std::uids::transfer_syntax(body_ts_uid);
    let endianness =
        if ts.big_endian { dicom_encoding::Endianness::Big } else { dicom_encoding::Endianness::Little };
    let body_policy = TransferSyntax { explicit: ts.explicit, endianness };
    let body_codec = Codec::new(body_policy);

    for element in elements.iter().filter(|e| !e.header.tag.is_file_meta()) {
        write_element(&mut bytes, element, false, &body_codec)?;
        boundaries.push(bytes.len());
    }

    Ok(WriteOutcome { bytes, boundaries })
}

/// Build the complete, ordered file meta group: the caller's existing
/// `0002,xxxx` elements plus whichever of the four required ones were
/// missing, plus a freshly computed `0002,0000`.
fn synthesize_meta(elements: &[Element], body_ts_uid: &str, codec: &Codec) -> WriteResult<Vec<Element>> {
    let mut meta: Vec<Element> = elements.iter().filter(|e| e.header.tag.is_file_meta()).cloned().collect();
    meta.retain(|e| !e.header.tag.is_group_length());

    ensure_default(&mut meta, Tag(0x0002, 0x0001), VR::OB, vec![0x00, 0x01], codec)?;
    ensure_default(
        &mut meta,
        Tag(0x0002, 0x0010),
        VR::UI,
        encode_uid(body_ts_uid),
        codec,
    )?;
    ensure_default(
        &mut meta,
        Tag(0x0002, 0x0012),
        VR::UI,
        encode_uid(IMPLEMENTATION_CLASS_UID),
        codec,
    )?;
    ensure_default(
        &mut meta,
        Tag(0x0002, 0x0013),
        VR::SH,
        pad_even(IMPLEMENTATION_VERSION_NAME.as_bytes().to_vec(), b' '),
        codec,
    )?;

    meta.sort_by_key(|e| e.header.tag);

    let body_len: usize =
        meta.iter().map(|e| element_wire_len(e.header.tag, e.header.vr, e.raw.len())).sum();
    let gl_raw = codec
        .encode(&dicom_core::value::PrimitiveValue::U32(vec![body_len as u32].into()), VR::UL)
        .context(EncodeSnafu { tag: Tag(0x0002, 0x0000) })?;
    let gl = Element {
        header: DataElementHeader::new(Tag(0x0002, 0x0000), VR::UL, dicom_core::header::Length(4)),
        raw: gl_raw,
        decoded: Some(dicom_core::value::PrimitiveValue::U32(vec![body_len as u32].into())),
        level: 0,
        fragment_kind: None,
        encapsulated_pixel_data: false,
    };
    meta.insert(0, gl);

    Ok(meta)
}

/// DICOM wire length for one element under Explicit VR LE, excluding
/// nothing: `tag(4) + header-overhead(vr) + value`.
fn element_wire_len(tag: Tag, vr: Option<VR>, value_len: usize) -> usize {
    4 + crate::element_header_overhead(true, vr, tag.is_item_related()) + value_len
}

fn ensure_default(
    meta: &mut Vec<Element>,
    tag: Tag,
    vr: VR,
    default_raw: Vec<u8>,
    _codec: &Codec,
) -> WriteResult<()> {
    if meta.iter().any(|e| e.header.tag == tag) {
        return Ok(());
    }
    let decoded = dicom_encoding::codec::Codec::new(TransferSyntax::EXPLICIT_LITTLE_ENDIAN)
        .decode(&default_raw, vr);
    meta.push(Element {
        header: DataElementHeader::new(tag, vr, dicom_core::header::Length(default_raw.len() as u32)),
        raw: default_raw,
        decoded,
        level: 0,
        fragment_kind: None,
        encapsulated_pixel_data: false,
    });
    Ok(())
}

fn encode_uid(uid: &str) -> Vec<u8> {
    let mut out = uid.as_bytes().to_vec();
    if out.len() % 2 != 0 {
        out.push(0);
    }
    out
}

fn pad_even(mut bytes: Vec<u8>, pad: u8) -> Vec<u8> {
    if bytes.len() % 2 != 0 {
        bytes.push(pad);
    }
    bytes
}

/// The fixed implementation class UID this codec identifies itself with
/// in `0002,0012`.
pub const IMPLEMENTATION_CLASS_UID: &str = "1.2.840.10008.5.1.4.1.1.1.rs-dicom-codec";
/// The fixed implementation version name this codec identifies itself
/// with in `0002,0013`.
pub const IMPLEMENTATION_VERSION_NAME: &str = "RS_DICOM_CODEC_1";

fn write_element(
    out: &mut Vec<u8>,
    element: &Element,
    force_explicit_le: bool,
    codec: &Codec,
) -> WriteResult<()> {
    let tag = element.header.tag;
    let tag_codec = if force_explicit_le { Codec::new(TransferSyntax::EXPLICIT_LITTLE_ENDIAN) } else { *codec };
    out.extend_from_slice(&tag_codec.encode_tag(tag));

    if tag.is_item_related() {
        write_u32(out, element.header.len.0, tag_codec);
        out.extend_from_slice(&element.raw);
        return Ok(());
    }

    let explicit = force_explicit_le || tag_codec.is_explicit();
    let vr = element.header.vr.unwrap_or(VR::UN);

    if explicit {
        out.extend_from_slice(vr.as_str().as_bytes());
        if vr.has_long_explicit_header() {
            out.extend_from_slice(&[0, 0]);
            write_u32(out, element.header.len.0, tag_codec);
        } else {
            write_u16(out, element.header.len.0 as u16, tag_codec);
        }
    } else {
        write_u32(out, element.header.len.0, tag_codec);
    }

    out.extend_from_slice(&element.raw);
    Ok(())
}

fn write_u16(out: &mut Vec<u8>, value: u16, codec: Codec) {
    let bytes = match codec.endianness() {
        dicom_encoding::Endianness::Little => value.to_le_bytes(),
        dicom_encoding::Endianness::Big => value.to_be_bytes(),
    };
    out.extend_from_slice(&bytes);
}

fn write_u32(out: &mut Vec<u8>, value: u32, codec: Codec) {
    let bytes = match codec.endianness() {
        dicom_encoding::Endianness::Little => value.to_le_bytes(),
        dicom_encoding::Endianness::Big => value.to_be_bytes(),
    };
    out.extend_from_slice(&bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_dataset;
    use dicom_dictionary_std::StandardDataDictionary;

    #[test]
    fn round_trips_an_explicit_le_element() {
        let mut raw = b"Doe^John".to_vec();
        let element = Element {
            header: DataElementHeader::new(
                Tag(0x0010, 0x0010),
                VR::PN,
                dicom_core::header::Length(raw.len() as u32),
            ),
            raw: std::mem::take(&mut raw),
            decoded: Some(dicom_core::value::PrimitiveValue::Strs(vec!["Doe^John".into()].into())),
            level: 0,
            fragment_kind: None,
            encapsulated_pixel_data: false,
        };
        let outcome = write_dataset(&[element], "1.2.840.10008.1.2.1").unwrap();
        let reparsed = read_dataset(&outcome.bytes, &StandardDataDictionary).unwrap();
        assert_eq!(reparsed.transfer_syntax_uid, "1.2.840.10008.1.2.1");
        let found = reparsed.elements.iter().find(|e| e.header.tag == Tag(0x0010, 0x0010)).unwrap();
        assert_eq!(found.decoded, Some(dicom_core::value::PrimitiveValue::Strs(vec!["Doe^John".into()].into())));
    }

    #[test]
    fn synthesizes_required_meta_elements_when_absent() {
        let outcome = write_dataset(&[], "1.2.840.10008.1.2").unwrap();
        let reparsed = read_dataset(&outcome.bytes, &StandardDataDictionary).unwrap();
        for tag in [Tag(0x0002, 0x0001), Tag(0x0002, 0x0010), Tag(0x0002, 0x0012), Tag(0x0002, 0x0013)] {
            assert!(reparsed.elements.iter().any(|e| e.header.tag == tag), "missing {tag}");
        }
        assert_eq!(reparsed.transfer_syntax_uid, "1.2.840.10008.1.2");
    }

    #[test]
    fn meta_group_length_matches_encoded_body() {
        let outcome = write_dataset(&[], "1.2.840.10008.1.2").unwrap();
        let reparsed = read_dataset(&outcome.bytes, &StandardDataDictionary).unwrap();
        let gl = reparsed.elements.iter().find(|e| e.header.tag == Tag(0x0002, 0x0000)).unwrap();
        let declared = match &gl.decoded {
            Some(dicom_core::value::PrimitiveValue::U32(v)) => v[0],
            _ => panic!("expected UL group length"),
        };
        let others_len: usize = reparsed
            .elements
            .iter()
            .filter(|e| e.header.tag.is_file_meta() && !e.header.tag.is_group_length())
            .map(|e| element_wire_len(e.header.tag, e.header.vr, e.raw.len()))
            .sum();
        assert_eq!(declared as usize, others_len);
    }
}
