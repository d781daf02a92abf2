//! Errors raised directly by core data types.
//!
//! Structural and I/O errors (truncated files, ambiguous queries, unknown
//! transfer syntaxes, ...) live closer to where they are raised, in
//! `dicom-parser` and `dicom-object`; this module only covers failures
//! that can occur while working with bare tags and values.

use snafu::Snafu;

use crate::tag::InvalidTagError;
use crate::value::ValueType;

/// The error type for the `dicom-core` crate.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// A tag string did not match the `GGGG,EEEE` format.
    #[snafu(display("invalid tag: {}", source))]
    InvalidTag { source: InvalidTagError },

    /// An attempt to read a value as an incompatible type.
    #[snafu(display("cannot read value of type {:?} as {}", got, requested))]
    CastValue { requested: &'static str, got: ValueType },
}

impl From<InvalidTagError> for Error {
    fn from(source: InvalidTagError) -> Self {
        Error::InvalidTag { source }
    }
}

/// This crate's result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
