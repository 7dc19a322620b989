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

//! # Miscellaneous Functions

use crate::constants::SIGNATURE_INTEGER_HEX_LEN;
use crate::Error;

/// Reads `n` bytes starting at `offset`, returning them and the offset
/// just past them
fn read(buf: &[u8], offset: usize, n: usize) -> Result<(&[u8], usize), Error> {
    let end = offset.checked_add(n).ok_or(Error::MalformedSignature)?;
    match buf.get(offset..end) {
        Some(bytes) => Ok((bytes, end)),
        None => Err(Error::MalformedSignature),
    }
}

/// Reads a single length byte followed by that many bytes
fn read_var_bytes(buf: &[u8], offset: usize) -> Result<(&[u8], usize), Error> {
    let (len, offset) = read(buf, offset, 1)?;
    read(buf, offset, usize::from(len[0]))
}

/// Forces a big-endian integer into exactly 32 bytes of hex
fn normalize_integer(int: &[u8]) -> String {
    let hex = hex::encode(int);
    if hex.len() < SIGNATURE_INTEGER_HEX_LEN {
        format!("{:0>width$}", hex, width = SIGNATURE_INTEGER_HEX_LEN)
    } else {
        // DER sign-pads with a leading zero byte when the high bit is set
        hex[hex.len() - SIGNATURE_INTEGER_HEX_LEN..].to_owned()
    }
}

/// Parse a Ledger-encoded signature into its raw `r‖s` hex form
///
/// The Ledger signature format is ASN.1-ish: the first byte is 0x30
/// (SEQUENCE OF) or 0x31 (SET OF), followed by the total length, then each
/// of `r` and `s` as a type byte, a length byte and the integer itself. The
/// integers are variable-length (and signed) so each is forced back into 32
/// bytes. Anything after `s`, such as the trailing status word, is ignored.
pub fn decode_der_bytes(sig: &[u8]) -> Result<String, Error> {
    // Format and total length
    let (_, offset) = read(sig, 0, 2)?;
    let (_, offset) = read(sig, offset, 1)?;
    let (r, offset) = read_var_bytes(sig, offset)?;
    let (_, offset) = read(sig, offset, 1)?;
    let (s, _) = read_var_bytes(sig, offset)?;

    let mut ret = normalize_integer(r);
    ret.push_str(&normalize_integer(s));
    Ok(ret)
}

/// Same as `decode_der_bytes` but takes the signature as hex
pub fn decode_der(response: &str) -> Result<String, Error> {
    let bytes = hex::decode(response)?;
    decode_der_bytes(&bytes)
}
