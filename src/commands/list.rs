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

//! `list`
//!
//! Lists connected Ledger devices
//!

use neon_ledger::hid;
use neon_ledger::ledger::LedgerNano;
use serde::Deserialize;

/// Lists devices
pub struct List;

/// Lists devices
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {}

impl super::Command for List {
    type Options = Options;

    fn execute(_options: Self::Options, hid: &hid::Api) -> anyhow::Result<()> {
        let paths = LedgerNano::list(hid);
        if paths.is_empty() {
            println!("No device found.");
        }
        for path in paths {
            println!("{}", path);
        }
        Ok(())
    }
}
