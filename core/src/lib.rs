//! Core data types for DICOM compliant systems.
//!
//! This crate provides the foundational vocabulary shared by the rest of
//! the toolkit: attribute tags, value representations, element headers and
//! the in-memory value representation used to carry decoded data. Nothing
//! in this crate touches I/O; it is pure data modeling plus the small
//! amount of logic (formatting, classification, VR category dispatch) that
//! depends only on these types.
#![deny(trivial_casts, trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications, unused_import_braces)]

pub mod dictionary;
pub mod error;
pub mod header;
pub mod tag;
pub mod value;
pub mod vr;

pub use dictionary::DataDictionary;
pub use error::{Error, Result};
pub use header::{DataElementHeader, Header, Length};
pub use tag::Tag;
pub use value::{PrimitiveValue, Value};
pub use vr::VR;
