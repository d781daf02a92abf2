//! The dynamic query type: a position resolved by index, canonical tag, or
//! dictionary name, plus the flags that govern how a query is matched and
//! how a new value is written.

use dicom_core::value::PrimitiveValue;
use dicom_core::Tag;

/// A reference to an element, in whichever form the caller has on hand.
///
/// `&str` converts to [`Query::Tag`] when it parses as `GGGG,EEEE`,
/// otherwise to [`Query::Name`]; this mirrors
/// [`dicom_core::DataDictionary::parse_tag`]'s own fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// A direct position in read order.
    Index(usize),
    /// An exact tag match.
    Tag(Tag),
    /// A dictionary keyword, or (with [`QueryOptions::partial`]) a
    /// substring to search tags and names for.
    Name(String),
}

impl From<usize> for Query {
    fn from(index: usize) -> Self {
        Query::Index(index)
    }
}

impl From<Tag> for Query {
    fn from(tag: Tag) -> Self {
        Query::Tag(tag)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        match s.parse::<Tag>() {
            Ok(tag) => Query::Tag(tag),
            Err(_) => Query::Name(s.to_string()),
        }
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Query::from(s.as_str())
    }
}

/// Flags governing how a [`Query`] is matched.
///
/// `all` and `partial` only matter for [`Query::Tag`]/[`Query::Name`]
/// queries (an index always matches at most one position); `silent`
/// applies uniformly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Permit (and return) more than one match instead of failing with
    /// `AmbiguousQuery`.
    pub all: bool,
    /// Suppress the `NotFound` error; an unmatched query yields an empty
    /// result rather than an error.
    pub silent: bool,
    /// Match tags/names that merely *contain* the query text, instead of
    /// requiring an exact match. Tag matches are preferred: name matching
    /// is only attempted when no tag contains the text.
    pub partial: bool,
}

impl QueryOptions {
    /// Equivalent to `QueryOptions { all: true, ..self }`.
    pub fn all(mut self) -> Self {
        self.all = true;
        self
    }
    /// Equivalent to `QueryOptions { silent: true, ..self }`.
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }
    /// Equivalent to `QueryOptions { partial: true, ..self }`.
    pub fn partial(mut self) -> Self {
        self.partial = true;
        self
    }
}

/// The value to write with [`crate::store::ElementStore::set`].
///
/// This replaces the spec's `already_encoded` boolean with a tagged
/// variant: a boolean paired with a value whose shape must agree with it
/// is exactly the parallel-array hazard the core crate's design avoids
/// elsewhere, so here the encoded/decoded distinction is the enum
/// discriminant instead of a flag callers could set inconsistently.
#[derive(Debug, Clone, PartialEq)]
pub enum SetValue {
    /// A decoded value; `set` encodes it under the current transfer
    /// syntax's codec before storing.
    Decoded(PrimitiveValue),
    /// Bytes already in their final, on-wire encoding; `set` stores them
    /// as-is (the spec's `already_encoded` case). The element's decoded
    /// form is refreshed by a best-effort decode of these bytes.
    Raw(Vec<u8>),
}

/// Flags governing [`crate::store::ElementStore::set`]'s creation path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// When the query does not resolve to an existing element, create
    /// one (looking up its VR in the dictionary unless one is given
    /// explicitly) instead of failing with `NotFound`.
    pub create: bool,
}

impl SetOptions {
    /// Equivalent to `SetOptions { create: true }`.
    pub fn create() -> Self {
        SetOptions { create: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_parses_as_tag_when_canonical() {
        assert_eq!(Query::from("0010,0010"), Query::Tag(Tag(0x0010, 0x0010)));
    }

    #[test]
    fn str_falls_back_to_name() {
        assert_eq!(Query::from("PatientName"), Query::Name("PatientName".to_string()));
    }
}
