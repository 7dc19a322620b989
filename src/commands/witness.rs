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

//! `witness`
//!
//! Signs a serialized unsigned transaction and prints the witness scripts
//! to attach to it
//!

use anyhow::Context;
use neon_ledger::{hid, Dongle};
use serde::Deserialize;

/// Builds a witness
pub struct Witness;

/// Builds a witness
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    /// Hex-encoded unsigned transaction
    tx: String,
    /// Which account to sign with
    #[serde(default)]
    account: Option<serde_json::Number>,
    /// Public key to verify with; queried from the device if absent
    #[serde(default)]
    public_key: Option<String>,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

impl super::Command for Witness {
    type Options = Options;

    fn execute(options: Self::Options, hid: &hid::Api) -> anyhow::Result<()> {
        let account = super::parse_account(options.account.as_ref())?;
        let mut dongle = super::open_dongle(hid, options.timeout_ms)?;
        println!("Please confirm the transaction on the device.");
        let witness = match options.public_key {
            Some(ref key) => dongle
                .get_signature(&options.tx, account)
                .and_then(|sig| neon_ledger::Witness::new(&sig, key)),
            None => dongle.sign_witness(&options.tx, account),
        }
        .with_context(|| format!("building witness for account {}", account));
        dongle.close();
        println!("{}", witness?);
        Ok(())
    }
}
