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

//! # Status Words
//!
//! Turns the status words the NEO application replies with into something
//! a user can act on
//!

use core::fmt;

use crate::constants::apdu::ledger::sw;
use crate::Error;

/// A transport failure, relabeled for humans
///
/// Keeps the raw status word and message around so that callers can
/// branch on the status without parsing the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportFailure {
    /// Status word the device replied with
    pub status: u16,
    /// Message of the underlying transport error
    pub raw_message: String,
    /// Message to show the user
    pub message: String,
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (status {:04X})", self.message, self.status)
    }
}

/// Relabels a failed status word
pub fn translate(status: u16, raw_message: &str) -> TransportFailure {
    let message = match status {
        sw::APP_CLOSED => "Your NEO app is closed! Please login.",
        sw::MSG_TOO_BIG => "Your transaction is too big for the ledger to sign!",
        sw::TX_DENIED => "Transaction signing denied",
        _ => raw_message,
    };
    TransportFailure {
        status,
        raw_message: raw_message.to_owned(),
        message: message.to_owned(),
    }
}

/// Relabels a transport error if it carries a status word; any other error
/// is returned as-is
pub fn translate_error(e: Error) -> Error {
    let status = match e {
        Error::ResponseBadStatus { status } => status,
        e => return e,
    };
    let failure = translate(status, &e.to_string());
    log::debug!("device refused request: {}", failure);
    Error::Transport(failure)
}
