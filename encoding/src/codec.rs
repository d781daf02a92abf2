//! The VR-dispatching codec: the single seam through which raw element
//! bytes become a [`PrimitiveValue`] and back.

use byteordered::Endianness;
use dicom_core::value::PrimitiveValue;
use dicom_core::{Tag, VR};

use crate::basic;
use crate::text;

/// The transfer syntax applicable to a stretch of the data set: whether
/// elements carry an explicit VR on the wire, and in which byte order
/// multi-byte values are packed.
///
/// This is the same `(endian, explicit)` pair the transfer syntax FSM
/// (`dicom-transfer-syntax-registry`) resolves from a transfer syntax UID;
/// it is kept here, next to the codec, because every decode/encode call
/// needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSyntax {
    /// Whether elements are explicit-VR encoded.
    pub explicit: bool,
    /// The byte order of multi-byte values.
    pub endianness: Endianness,
}

impl TransferSyntax {
    /// Implicit VR Little Endian: the default when no transfer syntax is
    /// known.
    pub const IMPLICIT_LITTLE_ENDIAN: TransferSyntax =
        TransferSyntax { explicit: false, endianness: Endianness::Little };

    /// Explicit VR Little Endian: always used for the file meta group.
    pub const EXPLICIT_LITTLE_ENDIAN: TransferSyntax =
        TransferSyntax { explicit: true, endianness: Endianness::Little };

    /// Explicit VR Big Endian (retired).
    pub const EXPLICIT_BIG_ENDIAN: TransferSyntax =
        TransferSyntax { explicit: true, endianness: Endianness::Big };

    /// Build the codec that reads/writes under this policy.
    pub fn codec(self) -> Codec {
        Codec { ts: self }
    }
}

impl Default for TransferSyntax {
    fn default() -> Self {
        TransferSyntax::IMPLICIT_LITTLE_ENDIAN
    }
}

/// Packs and unpacks data element values under a fixed `(endian, explicit)`
/// policy.
///
/// Little-endian unpacking is the default; selecting big-endian only
/// changes how multi-byte numbers and tags are read, never how textual
/// values are packed (text is always a flat byte sequence, endianness
/// only governs multi-byte *binary* quantities).
#[derive(Debug, Clone, Copy)]
pub struct Codec {
    ts: TransferSyntax,
}

impl Codec {
    /// Build a codec for the given transfer syntax policy.
    pub fn new(ts: TransferSyntax) -> Self {
        Codec { ts }
    }

    /// The endianness this codec decodes multi-byte values with.
    pub fn endianness(&self) -> Endianness {
        self.ts.endianness
    }

    /// Whether this codec expects an explicit VR on the wire.
    pub fn is_explicit(&self) -> bool {
        self.ts.explicit
    }

    /// Decode a tag's 4 raw bytes under this codec's endianness.
    pub fn decode_tag(&self, bytes: &[u8; 4]) -> Tag {
        basic::decode_tag(bytes, self.ts.endianness)
    }

    /// Encode a tag as 4 bytes under this codec's endianness. Note that
    /// group `0002` (file meta) is always encoded little-endian regardless
    /// of the codec's configured policy; callers are responsible for
    /// selecting the right codec instance for that group.
    pub fn encode_tag(&self, tag: Tag) -> [u8; 4] {
        basic::encode_tag(tag, self.ts.endianness)
    }

    /// Decode `bytes` as a value of the given VR.
    ///
    /// Returns `None` on a decoding mismatch (e.g. a numeric VR whose byte
    /// length is not a multiple of its component width); callers should
    /// retain the raw bytes and record a warning rather than treat this as
    /// a hard failure, per this codec's recoverable-decode policy.
    pub fn decode(&self, bytes: &[u8], vr: VR) -> Option<PrimitiveValue> {
        use dicom_core::vr::VRCategory;
        let endianness = self.ts.endianness;
        match vr.category() {
            VRCategory::Numeric => {
                let width = vr.element_width()?;
                if bytes.len() % width != 0 {
                    return None;
                }
                Some(match vr {
                    VR::UL => PrimitiveValue::U32(basic::decode_u32(bytes, endianness).into()),
                    VR::SL => PrimitiveValue::I32(basic::decode_i32(bytes, endianness).into()),
                    VR::US => PrimitiveValue::U16(basic::decode_u16(bytes, endianness).into()),
                    VR::SS => PrimitiveValue::I16(basic::decode_i16(bytes, endianness).into()),
                    VR::FL => PrimitiveValue::F32(basic::decode_f32(bytes, endianness).into()),
                    VR::FD => PrimitiveValue::F64(basic::decode_f64(bytes, endianness).into()),
                    _ => return None,
                })
            }
            VRCategory::AttributeTag => {
                if bytes.len() % 4 != 0 {
                    return None;
                }
                Some(PrimitiveValue::Tags(basic::decode_attribute_tag(bytes, endianness).into()))
            }
            VRCategory::Text => Some(PrimitiveValue::Strs(text::decode_text_components(bytes, vr).into())),
            // SQ, item-related pseudo-VR and the long opaque VRs are not
            // decoded here; callers work with their raw bytes directly.
            VRCategory::LongForm => None,
        }
    }

    /// Decode the full ordered list of components in `bytes` for `vr`.
    /// Equivalent to `decode`, spelled out for callers that think in
    /// terms of "divide the buffer by the component width".
    pub fn decode_all(&self, bytes: &[u8], vr: VR) -> Option<PrimitiveValue> {
        self.decode(bytes, vr)
    }

    /// Encode `value` as the raw bytes of a `vr` element, applying
    /// padding so the result always has an even length.
    pub fn encode(&self, value: &PrimitiveValue, vr: VR) -> crate::error::Result<Vec<u8>> {
        use dicom_core::vr::VRCategory;
        let endianness = self.ts.endianness;
        match (vr.category(), value) {
            (VRCategory::Numeric, PrimitiveValue::U32(v)) if vr == VR::UL => {
                Ok(basic::encode_u32(v, endianness))
            }
            (VRCategory::Numeric, PrimitiveValue::I32(v)) if vr == VR::SL => {
                Ok(basic::encode_i32(v, endianness))
            }
            (VRCategory::Numeric, PrimitiveValue::U16(v)) if vr == VR::US => {
                Ok(basic::encode_u16(v, endianness))
            }
            (VRCategory::Numeric, PrimitiveValue::I16(v)) if vr == VR::SS => {
                Ok(basic::encode_i16(v, endianness))
            }
            (VRCategory::Numeric, PrimitiveValue::F32(v)) if vr == VR::FL => {
                Ok(basic::encode_f32(v, endianness))
            }
            (VRCategory::Numeric, PrimitiveValue::F64(v)) if vr == VR::FD => {
                Ok(basic::encode_f64(v, endianness))
            }
            (VRCategory::AttributeTag, PrimitiveValue::Tags(v)) => {
                Ok(basic::encode_attribute_tag(v, endianness))
            }
            (VRCategory::Text, PrimitiveValue::Strs(v)) => Ok(text::encode_text_components(v, vr)),
            _ => crate::error::EncodeFailureSnafu.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn decodes_odd_length_text_and_strips_padding() {
        let codec = Codec::new(TransferSyntax::EXPLICIT_LITTLE_ENDIAN);
        let value = codec.decode(b"PFP ", VR::CS).unwrap();
        assert_eq!(value, PrimitiveValue::Strs(smallvec!["PFP".to_string()]));
    }

    #[test]
    fn decodes_multi_valued_numeric() {
        let codec = Codec::new(TransferSyntax::EXPLICIT_LITTLE_ENDIAN);
        let bytes = basic::encode_u16(&[512, 256, 512, 256], Endianness::Little);
        let value = codec.decode(&bytes, VR::US).unwrap();
        assert_eq!(value, PrimitiveValue::U16(smallvec![512, 256, 512, 256]));
    }

    #[test]
    fn mismatched_length_returns_none_not_error() {
        let codec = Codec::new(TransferSyntax::EXPLICIT_LITTLE_ENDIAN);
        assert!(codec.decode(&[0u8, 1, 2], VR::UL).is_none());
    }

    #[test]
    fn roundtrips_numeric_through_encode_decode() {
        let codec = Codec::new(TransferSyntax::EXPLICIT_BIG_ENDIAN);
        let value = PrimitiveValue::I32(smallvec![1, -2, 300]);
        let bytes = codec.encode(&value, VR::SL).unwrap();
        assert_eq!(codec.decode(&bytes, VR::SL).unwrap(), value);
    }

    #[test]
    fn big_endian_flips_numeric_but_not_text() {
        let le = Codec::new(TransferSyntax::EXPLICIT_LITTLE_ENDIAN);
        let be = Codec::new(TransferSyntax::EXPLICIT_BIG_ENDIAN);
        let text = le.encode(&PrimitiveValue::Strs(smallvec!["ABC".to_string()]), VR::SH).unwrap();
        let text_be = be.encode(&PrimitiveValue::Strs(smallvec!["ABC".to_string()]), VR::SH).unwrap();
        assert_eq!(text, text_be);

        let num_le = le.encode(&PrimitiveValue::U16(smallvec![1]), VR::US).unwrap();
        let num_be = be.encode(&PrimitiveValue::U16(smallvec![1]), VR::US).unwrap();
        assert_ne!(num_le, num_be);
    }
}
