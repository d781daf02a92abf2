//! Errors raised while packing or unpacking values.

use snafu::Snafu;

use dicom_core::Tag;

/// The error type for the `dicom-encoding` crate.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// A numeric value's byte length was not a multiple of its VR's
    /// component width.
    #[snafu(display(
        "value for tag {} has length {} which is not a multiple of the {}-byte component width",
        tag, len, width,
    ))]
    MisalignedLength { tag: Tag, len: usize, width: usize },

    /// A VR was requested for encoding that this codec cannot produce
    /// bytes for from the given value.
    #[snafu(display("no encoder available for this combination of value and VR"))]
    EncodeFailure,

    /// Text failed to decode as UTF-8/ASCII.
    #[snafu(display("value bytes are not valid text: {}", source))]
    InvalidText { source: std::str::Utf8Error },
}

/// This crate's result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
