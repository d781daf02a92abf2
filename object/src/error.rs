//! Errors raised while loading, querying or writing a DICOM object.

use std::io;
use std::path::PathBuf;

use dicom_core::Tag;
use snafu::Snafu;

/// This crate's error type.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Failed to open or read a file's contents.
    #[snafu(display("could not open {}: {}", path.display(), source))]
    OpenFile { path: PathBuf, source: io::Error },

    /// Failed to create the parent directory of an output file.
    #[snafu(display("could not create directory {}: {}", path.display(), source))]
    CreateDir { path: PathBuf, source: io::Error },

    /// Failed to write a file's contents.
    #[snafu(display("could not write {}: {}", path.display(), source))]
    WriteFile { path: PathBuf, source: io::Error },

    /// The byte stream could not be parsed into a data set.
    #[snafu(display("{}", source))]
    Read { source: dicom_parser::ReadError },

    /// The data set could not be serialized.
    #[snafu(display("{}", source))]
    Write { source: dicom_parser::WriteError },

    /// No element in the store matched the query.
    #[snafu(display("no element matches the query"))]
    NotFound,

    /// The query matched more than one element and neither `all` nor
    /// `partial` was set.
    #[snafu(display("query matched more than one element; pass `all` to allow this"))]
    AmbiguousQuery,

    /// The given text is neither a canonical tag (`GGGG,EEEE`) nor a
    /// dictionary keyword.
    #[snafu(display("{:?} is not a valid tag or known attribute name", text))]
    InvalidTag { text: String },

    /// A new element's tag is absent from the dictionary and no
    /// explicit VR was given, so its wire representation cannot be
    /// determined.
    #[snafu(display("tag {} is not in the dictionary and has no explicit VR", tag))]
    UnknownTag { tag: Tag },

    /// The codec has no encoder for this combination of value and VR.
    #[snafu(display("could not encode a value for tag {} as {}", tag, vr))]
    EncodeFailure { tag: Tag, vr: dicom_core::VR },
}

/// This crate's result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
