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

//! `info`
//!
//! Prints what the connected device says about itself
//!

use anyhow::Context;
use neon_ledger::hid;
use serde::Deserialize;

/// Prints device information
pub struct Info;

/// Prints device information
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    #[serde(default)]
    timeout_ms: Option<u64>,
}

impl super::Command for Info {
    type Options = Options;

    fn execute(options: Self::Options, hid: &hid::Api) -> anyhow::Result<()> {
        let dongle = super::open_dongle(hid, options.timeout_ms)?;
        let info = dongle.device_info().context("reading device strings")?;
        println!("{}", info);
        dongle.close();
        Ok(())
    }
}
