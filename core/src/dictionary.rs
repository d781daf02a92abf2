//! The data dictionary trait: the seam through which a tag is resolved to
//! its name and VR, independently of which concrete table backs it.

use crate::tag::Tag;
use crate::vr::VR;

/// A single dictionary record: a tag's name and typical VR.
pub trait DictionaryEntry {
    /// The attribute's tag.
    fn tag(&self) -> Tag;
    /// The attribute's human-readable name (its DICOM keyword).
    fn name(&self) -> &str;
    /// The attribute's typical value representation.
    fn vr(&self) -> VR;
}

/// An owned dictionary entry, suitable for entries synthesized at lookup
/// time (group lengths, unknown tags, repeating-group fallbacks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntryBuf {
    /// The attribute's tag.
    pub tag: Tag,
    /// The attribute's name.
    pub name: String,
    /// The attribute's VR.
    pub vr: VR,
}

impl DictionaryEntry for DictionaryEntryBuf {
    fn tag(&self) -> Tag {
        self.tag
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn vr(&self) -> VR {
        self.vr
    }
}

/// A type trait for a dictionary of DICOM attributes.
///
/// Implementors provide lookup from tag to (name, VR) and from name to
/// tag. The methods have no generic parameters so implementations can be
/// used as trait objects.
pub trait DataDictionary: std::fmt::Debug {
    /// Fetch an entry by its tag, applying whatever fallback rules the
    /// dictionary supports for tags not present verbatim (group lengths,
    /// repeating groups, unknown tags).
    fn by_tag(&self, tag: Tag) -> Option<DictionaryEntryBuf>;

    /// Fetch an entry by its keyword/name (exact, case-sensitive match).
    fn by_name(&self, name: &str) -> Option<DictionaryEntryBuf>;

    /// Resolve a tag from either its canonical string form or, failing
    /// that, its keyword in this dictionary.
    fn parse_tag(&self, expr: &str) -> Option<Tag> {
        expr.parse().ok().or_else(|| self.by_name(expr).map(|e| e.tag))
    }
}
