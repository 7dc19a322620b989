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

//! Argument Parsing
//!
//! Different subcommands supported by the command-line utility
//!

mod getpublickey;
mod info;
mod list;
mod sign;
mod witness;

use anyhow::{self, Context};
use neon_ledger::ledger::LedgerNano;
use neon_ledger::{hid, Account};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::convert::TryFrom;
use std::env;
use std::time::Duration;

pub trait Command {
    type Options: DeserializeOwned;

    fn execute(options: Self::Options, hid: &hid::Api) -> anyhow::Result<()>;
}

macro_rules! register_commands {
    ($($cmd_name:ident, $type_name:ident, $help:expr;)*) => {
        $(use $cmd_name::$type_name;)*

        fn usage<T>(name: &str) -> anyhow::Result<T> {
            eprintln!("Usage: {} <command> [options]", name);
            eprintln!("");
            eprintln!("Commands:");
            $(eprintln!("    {:14} {}", stringify!($cmd_name), $help);)*
            eprintln!("");
            eprintln!("Every command talking to the device also accepts \"timeout_ms\": int.");
            Err(anyhow::Error::msg("bad invocation"))
        }

        /// Parse command-line arguments and execute them
        pub fn execute_from_args(hid: &hid::Api) -> anyhow::Result<()> {
            let mut args = env::args_os();
            let name = args.next();
            let name = match name.as_ref() {
                Some(name) => name.to_string_lossy(),
                None => usage("")?,
            };
            let cmd = args.next();
            let cmd = match cmd.as_ref() {
                Some(cmd) => cmd.to_string_lossy(),
                None => usage(&name)?,
            };
            let options = args.next();
            let options = options
                .as_ref()
                .map(|oss| oss.to_string_lossy())
                .unwrap_or(Cow::Borrowed("{}"));

            if args.next().is_some() {
                usage(&name)?
            }

            match cmd.as_ref() {
                $(stringify!($cmd_name) => {
                    let opts: <$type_name as Command>::Options = serde_json::from_str(&options)
                        .with_context(|| format!(
                            "deserializing options for {}",
                             stringify!($cmd_name),
                        ))?;
                    $type_name::execute(opts, hid)?;
                }),*
                _ => usage(&name)?,
            }
            Ok(())
        }
    }
}

register_commands! {
    info, Info, "";
    list, List, "";
    getpublickey, GetPublicKey, "{ \"account\": int (optional) }";
    sign, Sign, "{ \"tx\": hexstring, \"account\": int (optional) }";
    witness, Witness, "{ \"tx\": hexstring, \"account\": int (optional), \"public_key\": hexstring (optional) }";
}

/// Open the first connected Ledger, with an optional reply timeout
fn open_dongle(hid: &hid::Api, timeout_ms: Option<u64>) -> anyhow::Result<LedgerNano> {
    let mut dongle = LedgerNano::get(hid).context("opening ledger")?;
    if let Some(ms) = timeout_ms {
        dongle.set_timeout(Duration::from_millis(ms));
    }
    Ok(dongle)
}

/// Interpret a JSON number as an account index
///
/// JSON does not distinguish `1` from `1.0` from `-1`, so this goes through
/// the same checks as any other account input.
fn parse_account(account: Option<&serde_json::Number>) -> anyhow::Result<Account> {
    let account = match account {
        None => return Ok(Account::default()),
        Some(n) => n,
    };
    let ret = if let Some(n) = account.as_u64() {
        Account::try_from(n)
    } else if let Some(n) = account.as_i64() {
        Account::try_from(n)
    } else if let Some(n) = account.as_f64() {
        Account::try_from(n)
    } else {
        return Err(anyhow::Error::msg(format!("account {} is not a number", account)));
    };
    ret.with_context(|| format!("invalid account {}", account))
}

#[cfg(test)]
mod tests {
    use super::*;
    use neon_ledger::AccountError;

    fn number(s: &str) -> serde_json::Number {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn accounts() {
        assert_eq!(parse_account(None).unwrap(), Account::default());
        assert_eq!(parse_account(Some(&number("16"))).unwrap(), Account::from(16u32));
        assert_eq!(parse_account(Some(&number("3.0"))).unwrap(), Account::from(3u32));

        let cases = [
            ("-1", AccountError::Negative),
            ("1.5", AccountError::NotAnInteger),
            ("4294967296", AccountError::OutOfRange),
        ];
        for &(s, reason) in &cases {
            let err = parse_account(Some(&number(s))).unwrap_err();
            assert_eq!(err.downcast_ref::<AccountError>(), Some(&reason), "{}", s);
        }
    }
}
