//! The standard DICOM attribute and transfer syntax dictionary.
//!
//! [`StandardDataDictionary`] is a read-only, process-wide table
//! initialized once from [`entries::ENTRIES`] and never mutated at
//! runtime. Callers who need private-tag support register their own
//! [`dicom_core::DataDictionary`] implementation rather than extending
//! this one.

pub mod entries;
pub mod uids;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use dicom_core::dictionary::{DataDictionary, DictionaryEntryBuf};
use dicom_core::{Tag, VR};

use entries::{Entry, ENTRIES};

static BY_TAG: Lazy<HashMap<Tag, &'static Entry>> =
    Lazy::new(|| ENTRIES.iter().map(|e| (e.tag, e)).collect());

static BY_NAME: Lazy<HashMap<&'static str, &'static Entry>> =
    Lazy::new(|| ENTRIES.iter().map(|e| (e.name, e)).collect());

/// The standard DICOM data element dictionary: a process-wide singleton
/// that resolves tags and names to `(name, VR)` pairs.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardDataDictionary;

/// Retrieve the global standard dictionary instance.
pub fn standard_dictionary() -> &'static StandardDataDictionary {
    &StandardDataDictionary
}

impl StandardDataDictionary {
    /// Look up `tag` applying the fallback rules described for the
    /// standard dictionary:
    ///
    /// - an exact match in the table, if present;
    /// - `xxxx,0000` resolves to the synthetic "Group Length" (`UL`) entry;
    /// - `0020,31xx` resolves through the canonical `(0020,3100)` entry;
    /// - `50xx,eeee` and `60xx,eeee` resolve through the canonical
    ///   `(5000,eeee)`/`(6000,eeee)` entry;
    /// - otherwise, the synthetic "Unknown Name" (`UN`) entry.
    pub fn by_tag(&self, tag: Tag) -> DictionaryEntryBuf {
        if let Some(entry) = BY_TAG.get(&tag) {
            return DictionaryEntryBuf { tag, name: entry.name.to_string(), vr: entry.vr };
        }

        if tag.is_group_length() {
            return DictionaryEntryBuf { tag, name: "Group Length".to_string(), vr: VR::UL };
        }

        if tag.group() == 0x0020 && (tag.element() >> 8) == 0x31 {
            let canonical = Tag(0x0020, 0x3100);
            if let Some(entry) = BY_TAG.get(&canonical) {
                return DictionaryEntryBuf { tag, name: entry.name.to_string(), vr: entry.vr };
            }
        }

        let group_high = tag.group() & 0xFF00;
        if group_high == 0x5000 {
            let canonical = Tag(0x5000, tag.element());
            if let Some(entry) = BY_TAG.get(&canonical) {
                return DictionaryEntryBuf { tag, name: entry.name.to_string(), vr: entry.vr };
            }
        }
        if group_high == 0x6000 {
            let canonical = Tag(0x6000, tag.element());
            if let Some(entry) = BY_TAG.get(&canonical) {
                return DictionaryEntryBuf { tag, name: entry.name.to_string(), vr: entry.vr };
            }
        }

        DictionaryEntryBuf { tag, name: "Unknown Name".to_string(), vr: VR::UN }
    }

    /// Look up an entry by its exact DICOM keyword.
    pub fn by_name(&self, name: &str) -> Option<DictionaryEntryBuf> {
        BY_NAME
            .get(name)
            .map(|entry| DictionaryEntryBuf { tag: entry.tag, name: entry.name.to_string(), vr: entry.vr })
    }
}

impl DataDictionary for StandardDataDictionary {
    fn by_tag(&self, tag: Tag) -> Option<DictionaryEntryBuf> {
        Some(StandardDataDictionary::by_tag(self, tag))
    }

    fn by_name(&self, name: &str) -> Option<DictionaryEntryBuf> {
        StandardDataDictionary::by_name(self, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_tag_resolves() {
        let entry = StandardDataDictionary.by_tag(Tag(0x0010, 0x0010));
        assert_eq!(entry.name, "PatientName");
        assert_eq!(entry.vr, VR::PN);
    }

    #[test]
    fn group_length_falls_back_regardless_of_group() {
        let entry = StandardDataDictionary.by_tag(Tag(0x0028, 0x0000));
        assert_eq!(entry.name, "Group Length");
        assert_eq!(entry.vr, VR::UL);
    }

    #[test]
    fn unknown_tag_falls_back_to_un() {
        let entry = StandardDataDictionary.by_tag(Tag(0x0009, 0x0001));
        assert_eq!(entry.name, "Unknown Name");
        assert_eq!(entry.vr, VR::UN);
    }

    #[test]
    fn overlay_group_resolves_through_canonical_entry() {
        let entry = StandardDataDictionary.by_tag(Tag(0x6010, 0x3000));
        assert_eq!(entry.name, "OverlayData");
        assert_eq!(entry.vr, VR::OW);
    }

    #[test]
    fn source_image_ids_family_resolves() {
        let entry = StandardDataDictionary.by_tag(Tag(0x0020, 0x3107));
        assert_eq!(entry.name, "SourceImageIDs");
    }

    #[test]
    fn by_name_is_exact_and_case_sensitive() {
        assert!(StandardDataDictionary.by_name("PatientName").is_some());
        assert!(StandardDataDictionary.by_name("patientname").is_none());
    }
}
