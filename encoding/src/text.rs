//! Packing rules for the textual VR group
//! (`AE AS CS DA DS DT IS LO LT PN SH ST TM UI UT`).
//!
//! Values are packed ASCII, space-padded to an even length; `UI` is
//! NUL-padded instead, since the padding character would otherwise be a
//! legal (if unusual) digit in a dotted numeric identifier.

use dicom_core::VR;

/// The value-multiplicity delimiter used by multi-valued textual VRs.
pub const VM_DELIMITER: char = '\\';

/// Split raw decoded text on the VM delimiter and trim the padding
/// character from each component (and from the whole buffer's trailing
/// byte, should padding have been applied only at the end).
pub fn decode_text_components(bytes: &[u8], vr: VR) -> Vec<String> {
    let pad = vr.padding_byte();
    let trimmed = trim_end_byte(bytes, pad);
    let text = String::from_utf8_lossy(trimmed);
    if text.is_empty() {
        return Vec::new();
    }
    text.split(VM_DELIMITER).map(|s| s.trim_end().to_string()).collect()
}

/// Encode textual components into packed, padded bytes.
pub fn encode_text_components(components: &[String], vr: VR) -> Vec<u8> {
    let mut out = components.join(&VM_DELIMITER.to_string()).into_bytes();
    if out.len() % 2 != 0 {
        out.push(vr.padding_byte());
    }
    out
}

fn trim_end_byte(bytes: &[u8], pad: u8) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && (bytes[end - 1] == pad || bytes[end - 1] == b' ' || bytes[end - 1] == 0) {
        end -= 1;
    }
    &bytes[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_strips_space_padding() {
        let bytes = b"PFP ";
        let components = decode_text_components(bytes, VR::CS);
        assert_eq!(components, vec!["PFP".to_string()]);
    }

    #[test]
    fn right_strips_nul_padding_for_ui() {
        let bytes = b"1.2.840.10008.1.2\0";
        let components = decode_text_components(bytes, VR::UI);
        assert_eq!(components, vec!["1.2.840.10008.1.2".to_string()]);
    }

    #[test]
    fn splits_on_backslash() {
        let bytes = b"256\\256\\1\\1";
        let components = decode_text_components(bytes, VR::IS);
        assert_eq!(components, vec!["256", "256", "1", "1"]);
    }

    #[test]
    fn encoding_pads_odd_length_with_space() {
        let bytes = encode_text_components(&["Doe^John".to_string()], VR::PN);
        assert_eq!(bytes.len() % 2, 0);
        assert_eq!(bytes, b"Doe^John");
    }

    #[test]
    fn encoding_pads_odd_length_ui_with_nul() {
        let bytes = encode_text_components(&["1.2.3".to_string()], VR::UI);
        assert_eq!(bytes.len() % 2, 0);
        assert_eq!(bytes.last(), Some(&0u8));
    }
}
