//! The in-memory element collection: an ordered, leveled
//! [`Element`](dicom_parser::Element) list with hierarchy queries and
//! group-length upkeep.
//!
//! This is a flat vector plus a per-element level column, not a pointer
//! graph: per the core design notes, that is enough to answer every query
//! DICOM's shallow nesting ever needs, and it sidesteps the whole class of
//! cycle/lifetime bugs a tree of owned children invites.

use dicom_core::dictionary::DataDictionary;
use dicom_core::header::{DataElementHeader, Length};
use dicom_core::value::PrimitiveValue;
use dicom_core::{Tag, VR};
use dicom_encoding::codec::{Codec, TransferSyntax};
use dicom_parser::element_header_overhead;
use dicom_parser::Element;
use snafu::{ensure, OptionExt};

use crate::error::{AmbiguousQuerySnafu, EncodeFailureSnafu, NotFoundSnafu, UnknownTagSnafu};
use crate::query::{Query, QueryOptions, SetOptions, SetValue};
use crate::Result;

/// The ordered, leveled element collection backing an [`crate::Object`].
#[derive(Debug, Clone)]
pub struct ElementStore {
    elements: Vec<Element>,
    /// The codec policy for every group but `0002`, which is always
    /// Explicit VR Little Endian regardless of this value.
    policy: TransferSyntax,
}

impl ElementStore {
    /// Wrap an already-parsed element list under the given body transfer
    /// syntax policy.
    pub fn new(elements: Vec<Element>, policy: TransferSyntax) -> Self {
        ElementStore { elements, policy }
    }

    /// The elements, in read (and write) order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The body transfer syntax policy this store encodes new/edited
    /// values under.
    pub fn policy(&self) -> TransferSyntax {
        self.policy
    }

    /// Change the body transfer syntax policy. Existing `raw` bytes are
    /// left untouched; only subsequent `set` encodes use the new policy.
    pub fn set_policy(&mut self, policy: TransferSyntax) {
        self.policy = policy;
    }

    fn codec_for_group(&self, group: u16) -> Codec {
        if group == 0x0002 {
            Codec::new(TransferSyntax::EXPLICIT_LITTLE_ENDIAN)
        } else {
            Codec::new(self.policy)
        }
    }

    /// Resolve `query` to the positions it matches, per [`QueryOptions`].
    pub fn find(&self, query: impl Into<Query>, dict: &dyn DataDictionary, opts: QueryOptions) -> Vec<usize> {
        let query = query.into();
        if opts.partial {
            if let Query::Name(needle) = &query {
                return self.find_partial(needle, dict);
            }
        }
        match query {
            Query::Index(i) => {
                if i < self.elements.len() {
                    vec![i]
                } else {
                    vec![]
                }
            }
            Query::Tag(tag) => self.positions_with_tag(tag),
            Query::Name(name) => match dict.parse_tag(&name) {
                Some(tag) => self.positions_with_tag(tag),
                None => vec![],
            },
        }
    }

    fn positions_with_tag(&self, tag: Tag) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.header.tag == tag)
            .map(|(i, _)| i)
            .collect()
    }

    /// Substring search: tag matches first, falling back to dictionary
    /// name matches only when no tag contains `needle`.
    fn find_partial(&self, needle: &str, dict: &dyn DataDictionary) -> Vec<usize> {
        let needle = needle.to_lowercase();
        let by_tag: Vec<usize> = self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.header.tag.to_canonical_string().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        if !by_tag.is_empty() {
            return by_tag;
        }
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                dict.by_tag(e.header.tag).map(|entry| entry.name.to_lowercase().contains(&needle)).unwrap_or(false)
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn resolve_one_or_many(&self, positions: Vec<usize>, opts: QueryOptions) -> Result<Vec<usize>> {
        if positions.is_empty() {
            ensure!(opts.silent, NotFoundSnafu);
            return Ok(positions);
        }
        ensure!(positions.len() == 1 || opts.all, AmbiguousQuerySnafu);
        Ok(positions)
    }

    /// The decoded value(s) matching `query`. Empty only when `silent` is
    /// set and nothing matched.
    pub fn value(&self, query: impl Into<Query>, dict: &dyn DataDictionary, opts: QueryOptions) -> Result<Vec<&PrimitiveValue>> {
        let positions = self.resolve_one_or_many(self.find(query, dict, opts), opts)?;
        Ok(positions.into_iter().filter_map(|i| self.elements[i].decoded.as_ref()).collect())
    }

    /// The raw, encoded value bytes matching `query`.
    pub fn raw(&self, query: impl Into<Query>, dict: &dyn DataDictionary, opts: QueryOptions) -> Result<Vec<&[u8]>> {
        let positions = self.resolve_one_or_many(self.find(query, dict, opts), opts)?;
        Ok(positions.into_iter().map(|i| self.elements[i].raw.as_slice()).collect())
    }

    /// Positions whose level exceeds `position`'s until the level returns
    /// to `position`'s own level or less. With `next_only`, restricted to
    /// exactly one level deeper.
    pub fn children(&self, position: usize, next_only: bool) -> Vec<usize> {
        let Some(anchor) = self.elements.get(position) else { return Vec::new() };
        let level = anchor.level;
        self.elements
            .iter()
            .enumerate()
            .skip(position + 1)
            .take_while(|(_, e)| e.level > level)
            .filter(|(_, e)| !next_only || e.level == level + 1)
            .map(|(i, _)| i)
            .collect()
    }

    /// The ascending chain of ancestor positions of `position`, outermost
    /// first. Empty if `position` is already at level 0.
    pub fn parents(&self, position: usize) -> Vec<usize> {
        let mut ancestors = Vec::new();
        let Some(anchor) = self.elements.get(position) else { return ancestors };
        let mut current_level = anchor.level;
        let mut i = position;
        while i > 0 && current_level > 0 {
            i -= 1;
            if self.elements[i].level < current_level {
                ancestors.push(i);
                current_level = self.elements[i].level;
            }
        }
        ancestors.reverse();
        ancestors
    }

    /// Set `query`'s value, or (with `opts.create`) insert a new top-level
    /// element for it. Returns the position written.
    pub fn set(
        &mut self,
        query: impl Into<Query>,
        value: SetValue,
        vr_hint: Option<VR>,
        dict: &dyn DataDictionary,
        opts: SetOptions,
    ) -> Result<usize> {
        let query = query.into();
        let positions = self.find(query.clone(), dict, QueryOptions::default());
        ensure!(positions.len() <= 1, AmbiguousQuerySnafu);

        if let Some(&pos) = positions.first() {
            self.set_existing(pos, value)?;
            return Ok(pos);
        }

        ensure!(opts.create, NotFoundSnafu);

        let tag = match &query {
            Query::Tag(tag) => *tag,
            Query::Name(name) => dict.parse_tag(name).context(crate::error::InvalidTagSnafu { text: name.clone() })?,
            Query::Index(_) => return NotFoundSnafu.fail(),
        };
        let vr = vr_hint.or_else(|| dict.by_tag(tag).map(|e| e.vr)).context(UnknownTagSnafu { tag })?;
        self.insert_new(tag, vr, value)
    }

    fn set_existing(&mut self, pos: usize, value: SetValue) -> Result<()> {
        let tag = self.elements[pos].header.tag;
        let vr = self.elements[pos].header.vr.unwrap_or(VR::UN);
        let codec = self.codec_for_group(tag.group());

        let (raw, decoded) = match value {
            SetValue::Raw(raw) => {
                let decoded = codec.decode(&raw, vr);
                (raw, decoded)
            }
            SetValue::Decoded(value) => {
                let raw = codec.encode(&value, vr).ok().context(EncodeFailureSnafu { tag, vr })?;
                (raw, Some(value))
            }
        };

        let old_len = self.elements[pos].raw.len() as i64;
        let new_len = raw.len() as i64;
        let delta = new_len - old_len;

        self.elements[pos].header.len = Length(raw.len() as u32);
        self.elements[pos].raw = raw;
        self.elements[pos].decoded = decoded;

        self.adjust_group_length(tag, delta)?;
        Ok(())
    }

    fn insert_new(&mut self, tag: Tag, vr: VR, value: SetValue) -> Result<usize> {
        let codec = self.codec_for_group(tag.group());
        let (raw, decoded) = match value {
            SetValue::Raw(raw) => {
                let decoded = codec.decode(&raw, vr);
                (raw, decoded)
            }
            SetValue::Decoded(value) => {
                let raw = codec.encode(&value, vr).ok().context(EncodeFailureSnafu { tag, vr })?;
                (raw, Some(value))
            }
        };

        let overhead = element_header_overhead(codec.is_explicit(), Some(vr), false);
        let delta = 4 + overhead as i64 + raw.len() as i64;

        let pos = self.insertion_point(tag);
        let header = DataElementHeader::new(tag, vr, Length(raw.len() as u32));
        self.elements.insert(pos, Element { header, raw, decoded, level: 0, fragment_kind: None, encapsulated_pixel_data: false });

        self.adjust_group_length(tag, delta)?;
        Ok(pos)
    }

    /// The index at which a new top-level element of `tag` preserves the
    /// ordering invariant: ascending tag order among level-0 elements,
    /// with each element's nested children following it undisturbed.
    fn insertion_point(&self, tag: Tag) -> usize {
        self.elements
            .iter()
            .position(|e| e.level == 0 && e.header.tag > tag)
            .unwrap_or(self.elements.len())
    }

    /// Remove the element matching `query`. Fails with `AmbiguousQuery`
    /// on more than one match, `NotFound` on none.
    pub fn remove(&mut self, query: impl Into<Query>, dict: &dyn DataDictionary) -> Result<Element> {
        let positions = self.find(query, dict, QueryOptions::default());
        ensure!(!positions.is_empty(), NotFoundSnafu);
        ensure!(positions.len() == 1, AmbiguousQuerySnafu);
        let pos = positions[0];

        let removed = self.elements.remove(pos);
        if !removed.header.tag.is_group_length() {
            let overhead =
                element_header_overhead(self.codec_for_group(removed.header.tag.group()).is_explicit(), removed.header.vr, removed.header.tag.is_item_related());
            let delta = -(4 + overhead as i64 + removed.raw.len() as i64);
            self.adjust_group_length(removed.header.tag, delta)?;
        }
        Ok(removed)
    }

    /// Apply `delta` to group `tag.group()`'s `GGGG,0000` element, if one
    /// is present. Per the spec, group length is advisory: a group
    /// without one carries no invariant to maintain, and item-related
    /// tags (group `FFFE`) never have one at all.
    fn adjust_group_length(&mut self, tag: Tag, delta: i64) -> Result<()> {
        if tag.is_group_length() || tag.group() == 0xFFFE {
            return Ok(());
        }
        let group = tag.group();
        let Some(gl_pos) = self.elements.iter().position(|e| e.header.tag == Tag(group, 0x0000)) else {
            return Ok(());
        };

        let current = match &self.elements[gl_pos].decoded {
            Some(PrimitiveValue::U32(v)) => v.first().copied().unwrap_or(0),
            _ => 0,
        };
        let updated = (current as i64 + delta).max(0) as u32;

        let codec = self.codec_for_group(group);
        let value = PrimitiveValue::U32(vec![updated].into());
        let raw = codec.encode(&value, VR::UL).ok().context(EncodeFailureSnafu { tag: Tag(group, 0x0000), vr: VR::UL })?;

        self.elements[gl_pos].raw = raw;
        self.elements[gl_pos].header.len = Length(4);
        self.elements[gl_pos].decoded = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_dictionary_std::StandardDataDictionary;

    fn el(tag: Tag, vr: VR, value: PrimitiveValue, raw: Vec<u8>, level: u32) -> Element {
        Element { header: DataElementHeader::new(tag, vr, Length(raw.len() as u32)), raw, decoded: Some(value), level, fragment_kind: None, encapsulated_pixel_data: false }
    }

    fn sample_store() -> ElementStore {
        let elements = vec![
            el(Tag(0x0028, 0x0000), VR::UL, PrimitiveValue::U32(vec![8].into()), vec![0u8; 4], 0),
            el(Tag(0x0028, 0x0010), VR::US, PrimitiveValue::U16(vec![512].into()), vec![0, 2], 0),
            el(Tag(0x0028, 0x0011), VR::US, PrimitiveValue::U16(vec![512].into()), vec![0, 2], 0),
        ];
        ElementStore::new(elements, TransferSyntax::EXPLICIT_LITTLE_ENDIAN)
    }

    #[test]
    fn find_by_tag_returns_single_position() {
        let store = sample_store();
        let hits = store.find(Tag(0x0028, 0x0010), &StandardDataDictionary, QueryOptions::default());
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn find_by_name_resolves_through_dictionary() {
        let store = sample_store();
        let hits = store.find("Rows", &StandardDataDictionary, QueryOptions::default());
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn set_existing_element_reencodes_and_updates_group_length() {
        let mut store = sample_store();
        store
            .set(Tag(0x0028, 0x0010), SetValue::Decoded(PrimitiveValue::U16(vec![256].into())), None, &StandardDataDictionary, SetOptions::default())
            .unwrap();
        let value = store.value(Tag(0x0028, 0x0010), &StandardDataDictionary, QueryOptions::default()).unwrap();
        assert_eq!(value, vec![&PrimitiveValue::U16(vec![256].into())]);
        // same width in, same width out: group length unchanged
        let gl = store.value(Tag(0x0028, 0x0000), &StandardDataDictionary, QueryOptions::default()).unwrap();
        assert_eq!(gl, vec![&PrimitiveValue::U32(vec![8].into())]);
    }

    #[test]
    fn create_inserts_in_tag_order_and_grows_group_length() {
        let mut store = sample_store();
        store
            .set(Tag(0x0028, 0x0008), SetValue::Decoded(PrimitiveValue::Strs(vec!["1".into()].into())), Some(VR::IS), &StandardDataDictionary, SetOptions::create())
            .unwrap();
        let positions = store.find(Tag(0x0028, 0x0008), &StandardDataDictionary, QueryOptions::default());
        assert_eq!(positions, vec![1]);
        let gl = store.value(Tag(0x0028, 0x0000), &StandardDataDictionary, QueryOptions::default()).unwrap();
        // tag(4) + header(4, short form) + value(2, "1" space-padded) = 10
        assert_eq!(gl, vec![&PrimitiveValue::U32(vec![18].into())]);
    }

    #[test]
    fn remove_shrinks_group_length_and_deletes_element() {
        let mut store = sample_store();
        store.remove(Tag(0x0028, 0x0011), &StandardDataDictionary).unwrap();
        assert!(store.find(Tag(0x0028, 0x0011), &StandardDataDictionary, QueryOptions::default()).is_empty());
        let gl = store.value(Tag(0x0028, 0x0000), &StandardDataDictionary, QueryOptions::default()).unwrap();
        // removed element was tag(4) + header(4) + value(2) = 10 bytes
        assert_eq!(gl, vec![&PrimitiveValue::U32(vec![0].into())]);
    }

    #[test]
    fn ambiguous_multi_hit_query_fails_without_all() {
        let mut elements = sample_store();
        elements.elements.push(el(Tag(0x0028, 0x0011), VR::US, PrimitiveValue::U16(vec![1].into()), vec![1, 0], 0));
        let result = elements.value(Tag(0x0028, 0x0011), &StandardDataDictionary, QueryOptions::default());
        assert!(matches!(result, Err(crate::Error::AmbiguousQuery)));
        let result = elements.value(Tag(0x0028, 0x0011), &StandardDataDictionary, QueryOptions::default().all());
        assert_eq!(result.unwrap().len(), 2);
    }

    #[test]
    fn silent_missing_query_returns_empty_not_error() {
        let store = sample_store();
        let result = store.value(Tag(0x0009, 0x0001), &StandardDataDictionary, QueryOptions::default().silent());
        assert_eq!(result.unwrap(), Vec::<&PrimitiveValue>::new());
        let result = store.value(Tag(0x0009, 0x0001), &StandardDataDictionary, QueryOptions::default());
        assert!(matches!(result, Err(crate::Error::NotFound)));
    }

    #[test]
    fn children_and_parents_reflect_level_runs() {
        let elements = vec![
            el(Tag(0x0008, 0x1140), VR::SQ, PrimitiveValue::Strs(vec![].into()), vec![], 0),
            el(Tag(0xFFFE, 0xE000), VR::UN, PrimitiveValue::Strs(vec![].into()), vec![], 1),
            el(Tag(0x0008, 0x1150), VR::UI, PrimitiveValue::Strs(vec!["1.2".into()].into()), vec![], 2),
            el(Tag(0x0010, 0x0010), VR::PN, PrimitiveValue::Strs(vec!["Doe".into()].into()), vec![], 0),
        ];
        let store = ElementStore::new(elements, TransferSyntax::EXPLICIT_LITTLE_ENDIAN);
        assert_eq!(store.children(0, false), vec![1, 2]);
        assert_eq!(store.children(0, true), vec![1]);
        assert_eq!(store.parents(2), vec![0, 1]);
        assert!(store.parents(0).is_empty());
    }
}
