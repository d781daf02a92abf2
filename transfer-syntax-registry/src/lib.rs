//! The transfer syntax finite-state machine: the policy switch that fires
//! on the first data element whose group is not `0002`.
//!
//! The file meta group (`0002`) is always Explicit VR Little Endian,
//! independently of whatever the body turns out to use; this crate is the
//! single place that knows when to flip from one to the other and how to
//! resolve `0002,0010`'s value into concrete codec policy.
#![deny(trivial_casts, trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications, unused_import_braces)]

use dicom_core::Tag;
use dicom_dictionary_std::uids;
use dicom_encoding::codec::TransferSyntax;
use dicom_encoding::Endianness;

/// Which side of the group-`0002` boundary a read or write is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Still inside the file meta group: Explicit VR Little Endian.
    Meta,
    /// Past the boundary: whatever `0002,0010` resolved to.
    Body,
}

/// The result of resolving a transfer syntax UID into codec policy at the
/// Meta → Body transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The codec policy to use for the remainder of the stream.
    pub transfer_syntax: TransferSyntax,
    /// The UID this resolution was derived from (defaulted when absent).
    pub uid: String,
    /// A warning to surface to the caller, if the UID was missing,
    /// unrecognized, or names an untested transfer syntax.
    pub warning: Option<String>,
    /// Whether `warning` reflects a genuinely invalid UID (missing or
    /// unrecognized), as opposed to a recognized-but-untested one like
    /// deflated Explicit VR Little Endian.
    pub invalid: bool,
}

/// Drives the single `Meta` → `Body` transition a DICOM stream makes.
///
/// A fresh FSM starts in `Meta`; [`TransferSyntaxFsm::enter_body`] performs
/// the (one-way) transition and never needs to be reversed within a single
/// read or write, since the file meta group always precedes the body.
#[derive(Debug, Clone)]
pub struct TransferSyntaxFsm {
    state: State,
}

impl TransferSyntaxFsm {
    /// A fresh FSM, in `State::Meta`.
    pub fn new() -> Self {
        TransferSyntaxFsm { state: State::Meta }
    }

    /// The FSM's current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The codec policy active while in `State::Meta`: always Explicit VR
    /// Little Endian, regardless of what the body will use.
    pub fn meta_policy() -> TransferSyntax {
        TransferSyntax::EXPLICIT_LITTLE_ENDIAN
    }

    /// Whether `tag` is the one that triggers the Meta → Body transition:
    /// any tag whose group isn't `0002`.
    pub fn observes_boundary(tag: Tag) -> bool {
        !tag.is_file_meta()
    }

    /// Transition into `State::Body`, resolving `ts_uid` (the value last
    /// read from `0002,0010`, if any) into codec policy per the FSM's
    /// table. Idempotent: calling this more than once just re-resolves.
    pub fn enter_body(&mut self, ts_uid: Option<&str>) -> Resolution {
        self.state = State::Body;
        match ts_uid {
            None => {
                tracing::debug!("no transfer syntax found in file meta, defaulting to Implicit VR Little Endian");
                Resolution {
                    transfer_syntax: TransferSyntax::IMPLICIT_LITTLE_ENDIAN,
                    uid: uids::IMPLICIT_VR_LITTLE_ENDIAN.to_string(),
                    warning: Some(
                        "missing transfer syntax (0002,0010), defaulting to Implicit VR Little Endian"
                            .to_string(),
                    ),
                    invalid: true,
                }
            }
            Some(uid) => {
                let trimmed = uid.trim_end_matches(['\0', ' ']);
                let props = uids::transfer_syntax(trimmed);
                let endianness = if props.big_endian { Endianness::Big } else { Endianness::Little };
                let transfer_syntax = TransferSyntax { explicit: props.explicit, endianness };

                let invalid = !props.valid;
                let warning = if invalid {
                    Some(format!(
                        "unrecognized transfer syntax {trimmed:?}, assuming Explicit VR Little Endian \
                         (likely compressed pixel data)"
                    ))
                } else if trimmed == uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN {
                    Some(
                        "deflated explicit VR little endian is untested by this codec; the trailing \
                         stream is not inflated"
                            .to_string(),
                    )
                } else {
                    None
                };

                if let Some(w) = &warning {
                    tracing::warn!("{}", w);
                }
                tracing::debug!(uid = trimmed, "entered transfer syntax body state");

                Resolution { transfer_syntax, uid: trimmed.to_string(), warning, invalid }
            }
        }
    }
}

impl Default for TransferSyntaxFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_meta_with_explicit_le_policy() {
        let fsm = TransferSyntaxFsm::new();
        assert_eq!(fsm.state(), State::Meta);
        assert_eq!(TransferSyntaxFsm::meta_policy(), TransferSyntax::EXPLICIT_LITTLE_ENDIAN);
    }

    #[test]
    fn meta_group_never_observes_boundary() {
        assert!(!TransferSyntaxFsm::observes_boundary(Tag(0x0002, 0x0010)));
        assert!(TransferSyntaxFsm::observes_boundary(Tag(0x0008, 0x0018)));
    }

    #[test]
    fn missing_uid_defaults_to_implicit_le_with_warning() {
        let mut fsm = TransferSyntaxFsm::new();
        let resolution = fsm.enter_body(None);
        assert_eq!(fsm.state(), State::Body);
        assert_eq!(resolution.transfer_syntax, TransferSyntax::IMPLICIT_LITTLE_ENDIAN);
        assert!(resolution.warning.is_some());
    }

    #[test]
    fn explicit_be_resolves_big_endian_policy() {
        let mut fsm = TransferSyntaxFsm::new();
        let resolution = fsm.enter_body(Some(uids::EXPLICIT_VR_BIG_ENDIAN));
        assert!(resolution.transfer_syntax.explicit);
        assert_eq!(resolution.transfer_syntax.endianness, Endianness::Big);
        assert!(resolution.warning.is_none());
    }

    #[test]
    fn unknown_uid_warns_and_assumes_explicit_le() {
        let mut fsm = TransferSyntaxFsm::new();
        let resolution = fsm.enter_body(Some("1.2.3.4.5.6.7"));
        assert!(resolution.transfer_syntax.explicit);
        assert_eq!(resolution.transfer_syntax.endianness, Endianness::Little);
        assert!(resolution.warning.is_some());
        assert!(resolution.invalid);
    }

    #[test]
    fn deflated_le_warns_as_untested_but_is_not_invalid() {
        let mut fsm = TransferSyntaxFsm::new();
        let resolution = fsm.enter_body(Some(uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN));
        assert!(resolution.warning.unwrap().contains("untested"));
        assert!(!resolution.invalid);
    }

    #[test]
    fn nul_padded_uid_is_trimmed_before_lookup() {
        let mut fsm = TransferSyntaxFsm::new();
        let padded = format!("{}\0", uids::EXPLICIT_VR_LITTLE_ENDIAN);
        let resolution = fsm.enter_body(Some(&padded));
        assert_eq!(resolution.uid, uids::EXPLICIT_VR_LITTLE_ENDIAN);
        assert!(resolution.warning.is_none());
    }
}
