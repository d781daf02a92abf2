//! Value Representation (VR): the two-letter code that prescribes a data
//! element's value layout.

use std::fmt;
use std::str::FromStr;

/// The value representation of a DICOM data element.
///
/// `VR` does not model the item/delimiter pseudo-VR (tags `FFFE,E000`,
/// `FFFE,E00D`, `FFFE,E0DD` carry no VR at all); callers distinguish those
/// by tag, not by VR, see [`Tag::is_item_related`](crate::Tag::is_item_related).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum VR {
    AE, AS, AT, CS, DA, DS, DT, FL, FD, IS, LO, LT,
    OB, OD, OF, OL, OV, OW, PN, SH, SL, SQ, SS, ST,
    SV, TM, UC, UI, UL, UN, UR, US, UT, UV,
}

/// Coarse categories of VR used to drive codec behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VRCategory {
    /// Fixed-width numeric value, packed in the file's endianness.
    Numeric,
    /// Packed ASCII text, space-padded to even length (NUL for `UI`).
    Text,
    /// Opaque or sequence-like value using the long explicit header form
    /// (2 reserved bytes + 4-byte length).
    LongForm,
    /// Attribute tag reference: two `u16` components.
    AttributeTag,
}

impl VR {
    /// Parse a VR from its two-character ASCII code, as found on the wire.
    pub fn from_binary(chars: [u8; 2]) -> Option<Self> {
        std::str::from_utf8(&chars).ok().and_then(|s| VR::from_str(s).ok())
    }

    /// The VR's two-letter mnemonic.
    pub fn as_str(self) -> &'static str {
        use VR::*;
        match self {
            AE => "AE", AS => "AS", AT => "AT", CS => "CS", DA => "DA",
            DS => "DS", DT => "DT", FL => "FL", FD => "FD", IS => "IS",
            LO => "LO", LT => "LT", OB => "OB", OD => "OD", OF => "OF",
            OL => "OL", OV => "OV", OW => "OW", PN => "PN", SH => "SH",
            SL => "SL", SQ => "SQ", SS => "SS", ST => "ST", SV => "SV",
            TM => "TM", UC => "UC", UI => "UI", UL => "UL", UN => "UN",
            UR => "UR", US => "US", UT => "UT", UV => "UV",
        }
    }

    /// The VR's coarse category, see [`VRCategory`].
    pub fn category(self) -> VRCategory {
        use VR::*;
        match self {
            AT => VRCategory::AttributeTag,
            UL | SL | US | SS | FL | FD => VRCategory::Numeric,
            OB | OD | OF | OL | OV | OW | SQ | UN | UC | UR | UT | SV | UV => VRCategory::LongForm,
            _ => VRCategory::Text,
        }
    }

    /// Whether the explicit-VR header for this VR uses the long form: a VR
    /// code, two reserved bytes, and a 4-byte length (instead of a 2-byte
    /// length immediately after the VR code).
    pub fn has_long_explicit_header(self) -> bool {
        matches!(self, VR::OB | VR::OD | VR::OF | VR::OL | VR::OV | VR::OW | VR::SQ | VR::UN
            | VR::UC | VR::UR | VR::UT | VR::SV | VR::UV)
    }

    /// The byte-width of a single decoded component of this VR, for VRs
    /// with a `VRCategory::Numeric` or `VRCategory::AttributeTag` category.
    /// Returns `None` for VRs without a fixed component width.
    pub fn element_width(self) -> Option<usize> {
        use VR::*;
        match self {
            UL | SL | FL => Some(4),
            US | SS => Some(2),
            FD => Some(8),
            AT => Some(4), // two u16 components
            _ => None,
        }
    }

    /// The padding byte used to bring an odd-length text value up to an
    /// even length: `0x00` (NUL) for `UI`, `0x20` (space) otherwise.
    pub fn padding_byte(self) -> u8 {
        if self == VR::UI {
            0x00
        } else {
            0x20
        }
    }
}

impl FromStr for VR {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use VR::*;
        Ok(match s {
            "AE" => AE, "AS" => AS, "AT" => AT, "CS" => CS, "DA" => DA,
            "DS" => DS, "DT" => DT, "FL" => FL, "FD" => FD, "IS" => IS,
            "LO" => LO, "LT" => LT, "OB" => OB, "OD" => OD, "OF" => OF,
            "OL" => OL, "OV" => OV, "OW" => OW, "PN" => PN, "SH" => SH,
            "SL" => SL, "SQ" => SQ, "SS" => SS, "ST" => ST, "SV" => SV,
            "TM" => TM, "UC" => UC, "UI" => UI, "UL" => UL, "UN" => UN,
            "UR" => UR, "US" => US, "UT" => UT, "UV" => UV,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for VR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_form_vrs_match_spec_set() {
        for vr in [VR::OB, VR::OW, VR::SQ, VR::UN] {
            assert!(vr.has_long_explicit_header());
        }
        assert!(!VR::US.has_long_explicit_header());
    }

    #[test]
    fn padding_byte_is_nul_only_for_ui() {
        assert_eq!(VR::UI.padding_byte(), 0x00);
        assert_eq!(VR::LO.padding_byte(), 0x20);
        assert_eq!(VR::PN.padding_byte(), 0x20);
    }

    #[test]
    fn roundtrips_through_binary() {
        for vr in [VR::AE, VR::SQ, VR::AT, VR::UN] {
            let bin = vr.as_str().as_bytes();
            let chars = [bin[0], bin[1]];
            assert_eq!(VR::from_binary(chars), Some(vr));
        }
    }
}
