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

//! # BIP44 Paths
//!
//! The NEO application only ever signs with keys at `m/44'/888'/0'/0/n`,
//! so the only thing which varies between requests is the account leaf `n`.
//! The device expects the path as five big-endian 32-bit segments.
//!

use core::convert::{TryFrom, TryInto};
use core::fmt;
use core::str::FromStr;

use crate::constants::bip44;
use crate::error::AccountError;
use crate::Error;

/// An account index, i.e. the last segment of the derivation path
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Account(u32);

impl Account {
    /// The raw index
    pub fn index(self) -> u32 {
        self.0
    }

    /// Encodes the full derivation path for this account as hex
    pub fn path(self) -> String {
        format!(
            "{}{}{}{}{:08x}",
            bip44::PURPOSE,
            bip44::COIN_TYPE,
            bip44::ACCOUNT,
            bip44::CHANGE,
            self.0,
        )
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for Account {
    fn from(n: u32) -> Account {
        Account(n)
    }
}

macro_rules! impl_from_small_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Account {
            fn from(n: $t) -> Account {
                Account(u32::from(n))
            }
        })*
    }
}
impl_from_small_unsigned!(u8, u16);

macro_rules! impl_try_from_unsigned {
    ($($t:ty),*) => {
        $(impl TryFrom<$t> for Account {
            type Error = AccountError;
            fn try_from(n: $t) -> Result<Account, AccountError> {
                u32::try_from(n).map(Account).map_err(|_| AccountError::OutOfRange)
            }
        })*
    }
}
impl_try_from_unsigned!(u64, u128, usize);

macro_rules! impl_try_from_signed {
    ($($t:ty),*) => {
        $(impl TryFrom<$t> for Account {
            type Error = AccountError;
            fn try_from(n: $t) -> Result<Account, AccountError> {
                if n < 0 {
                    return Err(AccountError::Negative);
                }
                u32::try_from(n).map(Account).map_err(|_| AccountError::OutOfRange)
            }
        })*
    }
}
impl_try_from_signed!(i8, i16, i32, i64, i128, isize);

impl TryFrom<f64> for Account {
    type Error = AccountError;
    fn try_from(n: f64) -> Result<Account, AccountError> {
        if !n.is_finite() || n.fract() != 0.0 {
            return Err(AccountError::NotAnInteger);
        }
        if n < 0.0 {
            return Err(AccountError::Negative);
        }
        if n > f64::from(u32::MAX) {
            return Err(AccountError::OutOfRange);
        }
        Ok(Account(n as u32))
    }
}

impl TryFrom<f32> for Account {
    type Error = AccountError;
    fn try_from(n: f32) -> Result<Account, AccountError> {
        Account::try_from(f64::from(n))
    }
}

impl FromStr for Account {
    type Err = AccountError;
    fn from_str(s: &str) -> Result<Account, AccountError> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i128>() {
            return Account::try_from(n);
        }
        // Anything else numeric (e.g. "1.5" or "1e12") goes through the
        // float checks so it gets the right reason attached
        match s.parse::<f64>() {
            Ok(n) => Account::try_from(n),
            Err(_) => Err(AccountError::NotAnInteger),
        }
    }
}

/// Encodes the derivation path frame for `account`
///
/// The result is always 40 hex characters: the four fixed segments followed
/// by the account index, zero-padded to 8 characters. Accounts which are not
/// non-negative integers below 2^32 are rejected rather than encoded.
pub fn encode_path<A>(account: A) -> Result<String, Error>
where
    A: TryInto<Account>,
    Error: From<A::Error>,
{
    let account = account.try_into()?;
    Ok(account.path())
}
