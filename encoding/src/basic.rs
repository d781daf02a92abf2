//! Endianness-aware packing and unpacking of fixed-width numbers and
//! attribute tags.
//!
//! These are the primitives the rest of the codec builds on: every
//! multi-byte numeric read/write in this crate funnels through here so
//! that the little/big-endian split is expressed once.

use byteordered::{ByteOrdered, Endianness};
use dicom_core::Tag;
use std::io::Cursor;

/// Read a sequence of `u16` words from `bytes` in the given endianness.
/// `bytes.len()` must be a multiple of 2; a trailing odd byte is ignored.
pub fn decode_u16(bytes: &[u8], endianness: Endianness) -> Vec<u16> {
    let mut cursor = ByteOrdered::new(Cursor::new(bytes), endianness);
    let n = bytes.len() / 2;
    (0..n).map(|_| cursor.read_u16().unwrap_or(0)).collect()
}

/// Read a sequence of `i16` words.
pub fn decode_i16(bytes: &[u8], endianness: Endianness) -> Vec<i16> {
    let mut cursor = ByteOrdered::new(Cursor::new(bytes), endianness);
    let n = bytes.len() / 2;
    (0..n).map(|_| cursor.read_i16().unwrap_or(0)).collect()
}

/// Read a sequence of `u32` words.
pub fn decode_u32(bytes: &[u8], endianness: Endianness) -> Vec<u32> {
    let mut cursor = ByteOrdered::new(Cursor::new(bytes), endianness);
    let n = bytes.len() / 4;
    (0..n).map(|_| cursor.read_u32().unwrap_or(0)).collect()
}

/// Read a sequence of `i32` words.
pub fn decode_i32(bytes: &[u8], endianness: Endianness) -> Vec<i32> {
    let mut cursor = ByteOrdered::new(Cursor::new(bytes), endianness);
    let n = bytes.len() / 4;
    (0..n).map(|_| cursor.read_i32().unwrap_or(0)).collect()
}

/// Read a sequence of IEEE-754 `f32` values.
pub fn decode_f32(bytes: &[u8], endianness: Endianness) -> Vec<f32> {
    let mut cursor = ByteOrdered::new(Cursor::new(bytes), endianness);
    let n = bytes.len() / 4;
    (0..n).map(|_| cursor.read_f32().unwrap_or(0.0)).collect()
}

/// Read a sequence of IEEE-754 `f64` values.
pub fn decode_f64(bytes: &[u8], endianness: Endianness) -> Vec<f64> {
    let mut cursor = ByteOrdered::new(Cursor::new(bytes), endianness);
    let n = bytes.len() / 8;
    (0..n).map(|_| cursor.read_f64().unwrap_or(0.0)).collect()
}

/// Encode a sequence of `u16` words.
pub fn encode_u16(values: &[u16], endianness: Endianness) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 2);
    let mut w = ByteOrdered::new(&mut out, endianness);
    for v in values {
        w.write_u16(*v).expect("writing to a Vec never fails");
    }
    out
}

/// Encode a sequence of `i16` words.
pub fn encode_i16(values: &[i16], endianness: Endianness) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 2);
    let mut w = ByteOrdered::new(&mut out, endianness);
    for v in values {
        w.write_i16(*v).expect("writing to a Vec never fails");
    }
    out
}

/// Encode a sequence of `u32` words.
pub fn encode_u32(values: &[u32], endianness: Endianness) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 4);
    let mut w = ByteOrdered::new(&mut out, endianness);
    for v in values {
        w.write_u32(*v).expect("writing to a Vec never fails");
    }
    out
}

/// Encode a sequence of `i32` words.
pub fn encode_i32(values: &[i32], endianness: Endianness) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 4);
    let mut w = ByteOrdered::new(&mut out, endianness);
    for v in values {
        w.write_i32(*v).expect("writing to a Vec never fails");
    }
    out
}

/// Encode a sequence of `f32` values.
pub fn encode_f32(values: &[f32], endianness: Endianness) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 4);
    let mut w = ByteOrdered::new(&mut out, endianness);
    for v in values {
        w.write_f32(*v).expect("writing to a Vec never fails");
    }
    out
}

/// Encode a sequence of `f64` values.
pub fn encode_f64(values: &[f64], endianness: Endianness) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 8);
    let mut w = ByteOrdered::new(&mut out, endianness);
    for v in values {
        w.write_f64(*v).expect("writing to a Vec never fails");
    }
    out
}

/// Decode a 4-byte tag: `(group_u16, element_u16)` read in the given
/// endianness, regardless of explicitness.
pub fn decode_tag(bytes: &[u8; 4], endianness: Endianness) -> Tag {
    let mut cursor = ByteOrdered::new(Cursor::new(bytes.as_slice()), endianness);
    let group = cursor.read_u16().unwrap_or(0);
    let element = cursor.read_u16().unwrap_or(0);
    Tag(group, element)
}

/// Encode a tag as 4 bytes in the given endianness.
pub fn encode_tag(tag: Tag, endianness: Endianness) -> [u8; 4] {
    let mut out = [0u8; 4];
    {
        let mut w = ByteOrdered::new(&mut out[..], endianness);
        w.write_u16(tag.group()).expect("fixed-size buffer");
        w.write_u16(tag.element()).expect("fixed-size buffer");
    }
    out
}

/// Decode two consecutive `u16` components as an [`AT`](dicom_core::VR::AT)
/// tag reference. Big-endian files are decoded with both `u16` components
/// in the file's endianness, per the DICOM standard; see the crate's
/// design notes for the rationale.
pub fn decode_attribute_tag(bytes: &[u8], endianness: Endianness) -> Vec<Tag> {
    let words = decode_u16(bytes, endianness);
    words.chunks_exact(2).map(|c| Tag(c[0], c[1])).collect()
}

/// Encode a sequence of tags as `AT` components.
pub fn encode_attribute_tag(tags: &[Tag], endianness: Endianness) -> Vec<u8> {
    let mut words = Vec::with_capacity(tags.len() * 2);
    for t in tags {
        words.push(t.group());
        words.push(t.element());
    }
    encode_u16(&words, endianness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u32_roundtrips_both_endians() {
        let values = [1u32, 0xFFFF_FFFE, 256];
        for endianness in [Endianness::Little, Endianness::Big] {
            let bytes = encode_u32(&values, endianness);
            assert_eq!(decode_u32(&bytes, endianness), values);
        }
    }

    #[test]
    fn little_and_big_endian_bytes_differ() {
        let le = encode_u16(&[0x0102], Endianness::Little);
        let be = encode_u16(&[0x0102], Endianness::Big);
        assert_eq!(le, vec![0x02, 0x01]);
        assert_eq!(be, vec![0x01, 0x02]);
    }

    #[test]
    fn tag_decodes_group_then_element() {
        // group=0x0010, element=0x0010, little endian on the wire
        let bytes = [0x10, 0x00, 0x10, 0x00];
        assert_eq!(decode_tag(&bytes, Endianness::Little), Tag(0x0010, 0x0010));
    }

    #[test]
    fn attribute_tag_decodes_pairs() {
        let bytes = encode_u16(&[0x0008, 0x0018], Endianness::Little);
        let tags = decode_attribute_tag(&bytes, Endianness::Little);
        assert_eq!(tags, vec![Tag(0x0008, 0x0018)]);
    }
}
