// Neon Ledger
// Written in 2026 by
//   The neon-ledger developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! # Error Handling

use crate::status::TransportFailure;
use thiserror::Error;

/// Reason an account index was rejected
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccountError {
    /// Account had a fractional part (or was not a number at all)
    NotAnInteger,
    /// Account was below zero
    Negative,
    /// Account does not fit in the last path segment
    OutOfRange,
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match *self {
            AccountError::NotAnInteger => "not an integer",
            AccountError::Negative => "cannot be negative",
            AccountError::OutOfRange => "out of range",
        })
    }
}

impl std::error::Error for AccountError {}

/// Neon Ledger error
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid account: {0}")]
    InvalidAccount(AccountError),
    #[error("{0}")]
    Framing(&'static str),
    #[error("malformed payload hex: {0}")]
    FramingHex(hex::FromHexError),
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("device replied with bad status code {status:04X}")]
    ResponseBadStatus { status: u16 },
    #[error("{0}")]
    Transport(TransportFailure),
    #[error("{0}")]
    Protocol(&'static str),
    #[error("malformed DER signature")]
    MalformedSignature,
    #[error("malformed public key")]
    MalformedPublicKey,
    #[error("incorrect channel for APDU (expected {expected:?}, found {found:?})")]
    ApduWrongChannel { expected: u16, found: u16 },
    #[error("incorrect tag for APDU (expected {expected:?}, found {found:?})")]
    ApduWrongTag { expected: u8, found: u8 },
    #[error("incorrect sequence no for APDU (expected {expected:?}, found {found:?})")]
    ApduWrongSequence { expected: u16, found: u16 },
    #[error("APDU data of {0} bytes exceeds the 255 byte limit")]
    ApduTooLong(usize),
    #[error("hidapi")]
    Hid(#[from] hidapi::HidError),
    #[error("USB Error: No device found.")]
    DongleNotFound,
    #[error("Your computer does not support the ledger!")]
    Unsupported,
    #[error("timed out waiting for the device")]
    Timeout,
    #[error("unexpected end-of-data")]
    UnexpectedEof,
}

impl Error {
    /// The device status word behind this error, if there is one
    pub fn status(&self) -> Option<u16> {
        match *self {
            Error::ResponseBadStatus { status } => Some(status),
            Error::Transport(ref failure) => Some(failure.status),
            _ => None,
        }
    }
}

impl From<AccountError> for Error {
    fn from(e: AccountError) -> Error {
        Error::InvalidAccount(e)
    }
}

impl From<core::convert::Infallible> for Error {
    fn from(e: core::convert::Infallible) -> Error {
        match e {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_errors_name_the_cause() {
        let err = Error::from(hex::decode("0g").unwrap_err());
        assert_eq!(err.to_string(), "invalid hex: Invalid character 'g' at position 1");

        let err = Error::FramingHex(hex::decode("abc").unwrap_err());
        assert_eq!(err.to_string(), "malformed payload hex: Odd number of digits");
    }
}
