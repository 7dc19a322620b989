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

//! `getpublickey`
//!
//! Fetches the public key of an account
//!

use anyhow::Context;
use neon_ledger::{hid, Dongle};
use serde::Deserialize;

/// Fetches a public key
pub struct GetPublicKey;

/// Fetches a public key
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    /// Which account to fetch the key for
    #[serde(default)]
    account: Option<serde_json::Number>,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

impl super::Command for GetPublicKey {
    type Options = Options;

    fn execute(options: Self::Options, hid: &hid::Api) -> anyhow::Result<()> {
        let account = super::parse_account(options.account.as_ref())?;
        let mut dongle = super::open_dongle(hid, options.timeout_ms)?;
        let key = dongle
            .get_public_key(account)
            .with_context(|| format!("getting public key for account {}", account));
        dongle.close();
        println!("{}", key?);
        Ok(())
    }
}
