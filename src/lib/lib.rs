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

//! # Neon Ledger Library
//!
//! Talks to the NEO application on a Ledger Nano S (and possibly other
//! Ledger products): fetches the public key of an account and signs
//! serialized transactions, streaming them to the device in chunks and
//! turning the DER signature it replies with into the raw form NEO
//! witnesses use.
//!

// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

pub mod bip44;
pub mod constants;
mod dongle;
mod error;
pub mod status;
mod util;
pub mod witness;

pub use bip44::{encode_path, Account};
pub use dongle::ledger;
pub use dongle::message;
pub use dongle::Dongle;
pub use error::{AccountError, Error};
pub use status::{translate, TransportFailure};
pub use util::{decode_der, decode_der_bytes};
pub use witness::Witness;

// Re-export all the hidapi types because the double `hidapi::HidDevice`
// naming bugs me
/// Re-exports of types from `hidapi` with nicer names
pub mod hid {
    pub use hidapi::HidApi as Api;
    pub use hidapi::HidDevice as Device;
    pub use hidapi::HidError as Error;
}
