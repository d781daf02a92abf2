//! The DICOM attribute tag.

use std::fmt;
use std::str::FromStr;

use snafu::Snafu;

/// An error signaling that a string did not follow the `GGGG,EEEE` tag
/// format.
#[derive(Debug, Snafu, Clone, Copy, PartialEq, Eq)]
#[snafu(display("invalid tag syntax, expected `GGGG,EEEE`"))]
pub struct InvalidTagError;

/// A DICOM attribute tag: a pair of a 16-bit group number and a 16-bit
/// element number, canonically rendered as `GGGG,EEEE` in uppercase
/// hexadecimal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub u16, pub u16);

impl Tag {
    /// The data element `FFFE,E000`, either a sequence item or, within
    /// encapsulated pixel data, an opaque fragment.
    pub const ITEM: Tag = Tag(0xFFFE, 0xE000);
    /// The item delimitation element `FFFE,E00D`.
    pub const ITEM_DELIMITATION: Tag = Tag(0xFFFE, 0xE00D);
    /// The sequence delimitation element `FFFE,E0DD`.
    pub const SEQUENCE_DELIMITATION: Tag = Tag(0xFFFE, 0xE0DD);
    /// The conventional pixel data tag `7FE0,0010`.
    pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

    /// The tag's group part.
    #[inline]
    pub fn group(self) -> u16 {
        self.0
    }

    /// The tag's element part.
    #[inline]
    pub fn element(self) -> u16 {
        self.1
    }

    /// Whether this is the group-length element of its group (`GGGG,0000`).
    #[inline]
    pub fn is_group_length(self) -> bool {
        self.1 == 0x0000
    }

    /// Whether this tag belongs to the file meta group (`0002`), which is
    /// always encoded Explicit VR Little Endian regardless of the rest of
    /// the file.
    #[inline]
    pub fn is_file_meta(self) -> bool {
        self.0 == 0x0002
    }

    /// Whether this is one of the item-related pseudo-VR tags: an item,
    /// an item delimiter, or a sequence delimiter.
    #[inline]
    pub fn is_item_related(self) -> bool {
        matches!(self, Tag::ITEM | Tag::ITEM_DELIMITATION | Tag::SEQUENCE_DELIMITATION)
    }

    /// Render this tag as the canonical `GGGG,EEEE` string (8 hex digits
    /// plus a comma, 9 characters total).
    pub fn to_canonical_string(self) -> String {
        format!("{:04X},{:04X}", self.0, self.1)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({:#06X}, {:#06X})", self.0, self.1)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X},{:04X}", self.0, self.1)
    }
}

impl From<(u16, u16)> for Tag {
    fn from(value: (u16, u16)) -> Self {
        Tag(value.0, value.1)
    }
}

/// Parses `GGGG,EEEE` (comma mandatory at index 4), optionally wrapped in
/// parentheses, case-insensitively.
impl FromStr for Tag {
    type Err = InvalidTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('(').unwrap_or(s);
        let s = s.strip_suffix(')').unwrap_or(s);
        if s.len() != 9 || s.as_bytes()[4] != b',' {
            return Err(InvalidTagError);
        }
        let group = u16::from_str_radix(&s[0..4], 16).map_err(|_| InvalidTagError)?;
        let element = u16::from_str_radix(&s[5..9], 16).map_err(|_| InvalidTagError)?;
        Ok(Tag(group, element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_form() {
        assert_eq!("0010,0010".parse::<Tag>().unwrap(), Tag(0x0010, 0x0010));
        assert_eq!("(0010,0010)".parse::<Tag>().unwrap(), Tag(0x0010, 0x0010));
        assert_eq!("abcd,ef01".parse::<Tag>().unwrap(), Tag(0xABCD, 0xEF01));
    }

    #[test]
    fn rejects_malformed_tags() {
        assert!("0010".parse::<Tag>().is_err());
        assert!("0010.0010".parse::<Tag>().is_err());
        assert!("00100,0010".parse::<Tag>().is_err());
    }

    #[test]
    fn canonical_string_is_uppercase_and_9_chars() {
        let tag = Tag(0x0018, 0x1310);
        let s = tag.to_canonical_string();
        assert_eq!(s.len(), 9);
        assert_eq!(s, "0018,1310");
    }

    #[test]
    fn recognizes_item_related_tags() {
        assert!(Tag::ITEM.is_item_related());
        assert!(Tag::ITEM_DELIMITATION.is_item_related());
        assert!(Tag::SEQUENCE_DELIMITATION.is_item_related());
        assert!(!Tag(0x0008, 0x0018).is_item_related());
    }
}
