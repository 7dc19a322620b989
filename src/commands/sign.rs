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

//! `sign`
//!
//! Signs a serialized unsigned transaction
//!

use anyhow::Context;
use neon_ledger::{hid, Dongle};
use serde::Deserialize;

/// Signs a transaction
pub struct Sign;

/// Signs a transaction
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    /// Hex-encoded unsigned transaction
    tx: String,
    /// Which account to sign with
    #[serde(default)]
    account: Option<serde_json::Number>,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

impl super::Command for Sign {
    type Options = Options;

    fn execute(options: Self::Options, hid: &hid::Api) -> anyhow::Result<()> {
        let account = super::parse_account(options.account.as_ref())?;
        let mut dongle = super::open_dongle(hid, options.timeout_ms)?;
        println!("Please confirm the transaction on the device.");
        let sig = dongle
            .get_signature(&options.tx, account)
            .with_context(|| format!("signing with account {}", account));
        dongle.close();
        println!("{}", sig?);
        Ok(())
    }
}
