//! Endian- and VR-aware packing and unpacking of DICOM data element
//! values.
//!
//! This crate is deliberately narrow: it knows nothing about files,
//! streams, or the sequence/item hierarchy. Given a byte buffer, a VR and
//! an endianness/explicitness policy, it decodes that buffer into a
//! [`dicom_core::PrimitiveValue`] and can encode one back. Everything
//! stream-shaped (where bytes come from, how headers are framed, how the
//! hierarchy is reconstructed) lives in `dicom-parser`.
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications, unused_import_braces)]

pub mod basic;
pub mod codec;
pub mod error;
pub mod text;

pub use byteordered::Endianness;
pub use codec::{Codec, TransferSyntax};
pub use error::{Error, Result};
