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

//! # Neon Ledger
//!
//! Command-line access to the NEO application on a Ledger: list devices,
//! fetch public keys and sign serialized transactions.
//!
//! Set `RUST_LOG=neon_ledger=trace` to see every APDU on the wire.
//!

mod commands;

use anyhow::Context;
use neon_ledger::ledger::LedgerNano;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let hid = LedgerNano::hid_api().context("initializing USB HID")?;
    commands::execute_from_args(&hid)
}
