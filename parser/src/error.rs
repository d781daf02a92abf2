//! Errors and recoverable warnings raised while reading or writing a data
//! set.
//!
//! Structural problems (a file too short to contain a header, an I/O
//! failure, a value that runs past the end of the buffer) abort the
//! current read/write and are returned as `ReadError`/`WriteError`.
//! Everything the codec can recover from and keep parsing (odd lengths,
//! unrecognized VRs, an unrecognized transfer syntax, a missing
//! preamble, a hierarchy that overruns its declared bounds) is recorded
//! as a [`Warning`] instead, per the core design's recoverable-decode
//! policy.

use snafu::Snafu;
use std::io;

use dicom_core::Tag;

/// Errors that abort a read of a byte stream into a data set.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ReadError {
    /// The input is smaller than the minimum size needed to hold a
    /// single element header.
    #[snafu(display("input is too short to contain a valid DICOM stream"))]
    TooShort,

    /// An I/O failure while reading from the underlying source.
    #[snafu(display("I/O error while reading: {}", source))]
    Io { source: io::Error },
}

/// This crate's read result alias.
pub type ReadResult<T> = std::result::Result<T, ReadError>;

/// Errors that abort writing a data set to a byte stream.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum WriteError {
    /// An I/O failure while writing to the underlying sink.
    #[snafu(display("I/O error while writing: {}", source))]
    Io { source: io::Error },

    /// The codec could not encode a value for the given VR.
    #[snafu(display("failed to encode tag {}: {}", tag, source))]
    Encode { tag: Tag, source: dicom_encoding::error::Error },
}

/// This crate's write result alias.
pub type WriteResult<T> = std::result::Result<T, WriteError>;

/// A recoverable condition encountered while parsing a stream. Recorded,
/// never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Bytes `[128,132)` were not `"DICM"`; the reader rewound to offset 0
    /// and parsed the whole input as a data set with no preamble.
    MissingPreamble,
    /// An element's declared length was odd; it was accepted as-is.
    OddLength { tag: Tag, length: u32 },
    /// An explicit-VR element carried two bytes that are not a VR this
    /// codec recognizes; the dictionary's provisional VR was used
    /// instead.
    UnknownVR { tag: Tag },
    /// `0002,0010` was missing, empty, or not a recognized transfer
    /// syntax UID.
    InvalidTransferSyntax { uid: Option<String> },
    /// The cursor passed a known-length scope's declared end while
    /// parsing its contents; at most one of these is ever recorded per
    /// read.
    HierarchyOverflow,
    /// The last element's value ran past the end of the available bytes.
    TruncatedLastElement { tag: Tag },
    /// Any other recoverable condition, carrying a human-readable
    /// description.
    Other(String),
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::MissingPreamble => write!(f, "missing DICOM header (no preamble/DICM magic found)"),
            Warning::OddLength { tag, length } => {
                write!(f, "element {tag} has odd declared length {length}")
            }
            Warning::UnknownVR { tag } => write!(f, "element {tag} carries an unrecognized VR"),
            Warning::InvalidTransferSyntax { uid } => match uid {
                Some(uid) => write!(f, "unrecognized transfer syntax {uid:?}"),
                None => write!(f, "missing transfer syntax (0002,0010)"),
            },
            Warning::HierarchyOverflow => {
                write!(f, "an element's cursor passed its enclosing scope's declared end")
            }
            Warning::TruncatedLastElement { tag } => {
                write!(f, "element {tag}'s declared length exceeds the bytes available")
            }
            Warning::Other(msg) => write!(f, "{msg}"),
        }
    }
}
