//! The canonical transfer syntax table and UID lookup helpers.
//!
//! The canonical list below is ordered deliberately: the first five
//! entries are the transfer syntaxes whose pixel data is never compressed
//! (the two plain Little/Big Endian forms, the deflated LE variant, and
//! the uncompressed encapsulated form). Every entry after that is a
//! compressed transfer syntax. [`is_compressed`] is defined purely in
//! terms of this ordering, matching the source dictionary's convention.

/// Implicit VR Little Endian: the default transfer syntax.
pub const IMPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2";
/// Explicit VR Little Endian.
pub const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";
/// Deflated Explicit VR Little Endian.
pub const DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1.99";
/// Explicit VR Big Endian (retired).
pub const EXPLICIT_VR_BIG_ENDIAN: &str = "1.2.840.10008.1.2.2";
/// Encapsulated Uncompressed Explicit VR Little Endian.
pub const ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1.98";
/// JPEG Baseline (Process 1).
pub const JPEG_BASELINE8_BIT: &str = "1.2.840.10008.1.2.4.50";
/// JPEG Extended (Process 2 & 4).
pub const JPEG_EXTENDED12_BIT: &str = "1.2.840.10008.1.2.4.51";
/// JPEG Lossless, Non-Hierarchical, First-Order Prediction.
pub const JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION: &str = "1.2.840.10008.1.2.4.70";
/// JPEG-LS Lossless Image Compression.
pub const JPEG_LS_LOSSLESS_IMAGE_COMPRESSION: &str = "1.2.840.10008.1.2.4.80";
/// JPEG-LS Lossy (Near-Lossless) Image Compression.
pub const JPEG_LS_LOSSY_IMAGE_COMPRESSION: &str = "1.2.840.10008.1.2.4.81";
/// JPEG 2000 Image Compression (Lossless Only).
pub const JPEG2000_IMAGE_COMPRESSION_LOSSLESS_ONLY: &str = "1.2.840.10008.1.2.4.90";
/// JPEG 2000 Image Compression.
pub const JPEG2000_IMAGE_COMPRESSION: &str = "1.2.840.10008.1.2.4.91";
/// RLE Lossless.
pub const RLE_LOSSLESS: &str = "1.2.840.10008.1.2.5";

/// The canonical transfer syntax ordering. Index 0 corresponds to
/// [`IMPLICIT_VR_LITTLE_ENDIAN`].
pub static TRANSFER_SYNTAXES: &[&str] = &[
    IMPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_LITTLE_ENDIAN,
    DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
    EXPLICIT_VR_BIG_ENDIAN,
    ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN,
    JPEG_BASELINE8_BIT,
    JPEG_EXTENDED12_BIT,
    JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION,
    JPEG_LS_LOSSLESS_IMAGE_COMPRESSION,
    JPEG_LS_LOSSY_IMAGE_COMPRESSION,
    JPEG2000_IMAGE_COMPRESSION_LOSSLESS_ONLY,
    JPEG2000_IMAGE_COMPRESSION,
    RLE_LOSSLESS,
];

/// The index below which a transfer syntax's pixel data is guaranteed
/// uncompressed.
const FIRST_COMPRESSED_INDEX: usize = 5;

/// `(explicit, big_endian)` resolved from `0002,0010`'s value, per the
/// transfer syntax FSM's table. Unknown UIDs fall back to
/// `(true, false)`, assuming a compressed transfer syntax the Explicit VR
/// LE framing still applies to the few elements that remain interpretable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSyntaxProperties {
    /// Whether the transfer syntax is recognized by this dictionary.
    pub valid: bool,
    /// Whether the data set is Explicit VR encoded.
    pub explicit: bool,
    /// Whether the data set is Big Endian encoded.
    pub big_endian: bool,
}

/// Index of `uid` in the canonical transfer syntax table.
pub fn index_of(uid: &str) -> Option<usize> {
    TRANSFER_SYNTAXES.iter().position(|&u| u == uid)
}

/// Whether `uid` names a transfer syntax whose pixel data is compressed,
/// i.e. whose canonical index is past the uncompressed prefix.
pub fn is_compressed(uid: &str) -> bool {
    index_of(uid).map(|i| i >= FIRST_COMPRESSED_INDEX).unwrap_or(true)
}

/// Whether `uid` is a transfer syntax recognized by this dictionary.
pub fn ts_valid(uid: &str) -> bool {
    index_of(uid).is_some()
}

/// Resolve `(valid, explicit, big_endian)` for a transfer syntax UID,
/// applying the FSM's fallback table for anything this dictionary does
/// not recognize verbatim.
pub fn transfer_syntax(uid: &str) -> TransferSyntaxProperties {
    match uid {
        IMPLICIT_VR_LITTLE_ENDIAN => {
            TransferSyntaxProperties { valid: true, explicit: false, big_endian: false }
        }
        EXPLICIT_VR_LITTLE_ENDIAN => {
            TransferSyntaxProperties { valid: true, explicit: true, big_endian: false }
        }
        DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN => {
            TransferSyntaxProperties { valid: true, explicit: true, big_endian: false }
        }
        EXPLICIT_VR_BIG_ENDIAN => {
            TransferSyntaxProperties { valid: true, explicit: true, big_endian: true }
        }
        other => {
            let valid = ts_valid(other);
            TransferSyntaxProperties { valid, explicit: true, big_endian: false }
        }
    }
}

/// A human-readable name for a handful of well-known UIDs. Falls back to
/// the UID string itself when unrecognized.
pub fn uid_name(uid: &str) -> &str {
    match uid {
        IMPLICIT_VR_LITTLE_ENDIAN => "Implicit VR Little Endian",
        EXPLICIT_VR_LITTLE_ENDIAN => "Explicit VR Little Endian",
        DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN => "Deflated Explicit VR Little Endian",
        EXPLICIT_VR_BIG_ENDIAN => "Explicit VR Big Endian",
        ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN => {
            "Encapsulated Uncompressed Explicit VR Little Endian"
        }
        JPEG_BASELINE8_BIT => "JPEG Baseline (Process 1)",
        JPEG_EXTENDED12_BIT => "JPEG Extended (Process 2 & 4)",
        JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION => {
            "JPEG Lossless, Non-Hierarchical, First-Order Prediction"
        }
        JPEG_LS_LOSSLESS_IMAGE_COMPRESSION => "JPEG-LS Lossless Image Compression",
        JPEG_LS_LOSSY_IMAGE_COMPRESSION => "JPEG-LS Lossy (Near-Lossless) Image Compression",
        JPEG2000_IMAGE_COMPRESSION_LOSSLESS_ONLY => "JPEG 2000 Image Compression (Lossless Only)",
        JPEG2000_IMAGE_COMPRESSION => "JPEG 2000 Image Compression",
        RLE_LOSSLESS => "RLE Lossless",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncompressed_prefix_is_not_compressed() {
        assert!(!is_compressed(IMPLICIT_VR_LITTLE_ENDIAN));
        assert!(!is_compressed(EXPLICIT_VR_LITTLE_ENDIAN));
        assert!(!is_compressed(DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN));
        assert!(!is_compressed(EXPLICIT_VR_BIG_ENDIAN));
        assert!(!is_compressed(ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN));
    }

    #[test]
    fn jpeg_family_is_compressed() {
        assert!(is_compressed(JPEG_BASELINE8_BIT));
        assert!(is_compressed(JPEG2000_IMAGE_COMPRESSION));
        assert!(is_compressed(RLE_LOSSLESS));
    }

    #[test]
    fn unknown_uid_is_compressed_and_invalid() {
        assert!(is_compressed("1.2.3.4.5.6.unknown"));
        assert!(!ts_valid("1.2.3.4.5.6.unknown"));
    }

    #[test]
    fn big_endian_is_the_only_big_endian_entry() {
        assert!(transfer_syntax(EXPLICIT_VR_BIG_ENDIAN).big_endian);
        assert!(!transfer_syntax(IMPLICIT_VR_LITTLE_ENDIAN).big_endian);
        assert!(!transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN).big_endian);
    }

    #[test]
    fn compressed_transfer_syntax_defaults_to_explicit_le() {
        let props = transfer_syntax(JPEG_BASELINE8_BIT);
        assert!(props.valid);
        assert!(props.explicit);
        assert!(!props.big_endian);
    }

    #[test]
    fn wholly_unknown_uid_reports_invalid_but_still_explicit_le() {
        let props = transfer_syntax("1.2.3.4.5.6.unknown");
        assert!(!props.valid);
        assert!(props.explicit);
        assert!(!props.big_endian);
    }
}
