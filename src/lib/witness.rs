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

//! # Witnesses
//!
//! A NEO transaction is authorized by a witness: an invocation script which
//! pushes the signature, and a verification script which pushes the public
//! key and checks the signature against it. Splicing the witness into the
//! transaction is left to whoever owns the transaction encoding.
//!

use core::fmt;

use crate::Error;

/// PUSHBYTES64
const PUSH_SIGNATURE: &str = "40";
/// PUSHBYTES33
const PUSH_PUBLIC_KEY: &str = "21";
/// CHECKSIG
const CHECKSIG: &str = "ac";

/// Hex-encoded invocation and verification scripts for a single signer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness {
    /// Pushes the signature
    pub invocation_script: String,
    /// Pushes the public key and checks the signature
    pub verification_script: String,
}

impl Witness {
    /// Builds the witness from a raw 64-byte signature and a public key,
    /// which may be compressed or uncompressed
    pub fn new(signature: &str, public_key: &str) -> Result<Witness, Error> {
        if signature.len() != 128 || hex::decode(signature).is_err() {
            return Err(Error::MalformedSignature);
        }
        let encoded = encode_public_key(public_key)?;
        Ok(Witness {
            invocation_script: format!("{}{}", PUSH_SIGNATURE, signature),
            verification_script: format!("{}{}{}", PUSH_PUBLIC_KEY, encoded, CHECKSIG),
        })
    }
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "invocation:   {}", self.invocation_script)?;
        write!(f, "verification: {}", self.verification_script)
    }
}

/// Compresses an uncompressed public key; compressed keys are passed through
pub fn encode_public_key(public_key: &str) -> Result<String, Error> {
    let bytes = hex::decode(public_key).map_err(|_| Error::MalformedPublicKey)?;
    match bytes.len() {
        33 if bytes[0] == 0x02 || bytes[0] == 0x03 => Ok(hex::encode(bytes)),
        65 if bytes[0] == 0x04 => {
            let prefix = if bytes[64] & 1 == 0 { 0x02 } else { 0x03 };
            let mut ret = Vec::with_capacity(33);
            ret.push(prefix);
            ret.extend(&bytes[1..33]);
            Ok(hex::encode(ret))
        }
        _ => Err(Error::MalformedPublicKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: &str = "6a1e5f0c1bfe3f8e3d0d1a9c5ef8e1d2b5b4dc2f0b8e1cfe0f8d2c1f4a8b8e61";
    const Y_EVEN: &str = "0d2e3f4a5b6c7d8e9fa0b1c2d3e4f5061728394a5b6c7d8e9fa0b1c2d3e4f510";
    const Y_ODD: &str = "0d2e3f4a5b6c7d8e9fa0b1c2d3e4f5061728394a5b6c7d8e9fa0b1c2d3e4f511";

    #[test]
    fn compress_by_parity() {
        let even = format!("04{}{}", X, Y_EVEN);
        assert_eq!(encode_public_key(&even).unwrap(), format!("02{}", X));
        let odd = format!("04{}{}", X, Y_ODD);
        assert_eq!(encode_public_key(&odd).unwrap(), format!("03{}", X));
    }

    #[test]
    fn compressed_passthrough() {
        let key = format!("03{}", X);
        assert_eq!(encode_public_key(&key).unwrap(), key);
    }

    #[test]
    fn bad_keys() {
        for key in &[
            String::new(),
            "zz".to_owned(),
            format!("05{}", X),
            format!("04{}", X),
            format!("02{}{}", X, Y_EVEN),
        ] {
            match encode_public_key(key) {
                Err(Error::MalformedPublicKey) => {}
                x => panic!("key {}: unexpected {:?}", key, x),
            }
        }
    }

    #[test]
    fn witness_scripts() {
        let sig = "11".repeat(64);
        let key = format!("04{}{}", X, Y_ODD);
        let witness = Witness::new(&sig, &key).unwrap();
        assert_eq!(witness.invocation_script, format!("40{}", sig));
        assert_eq!(witness.verification_script, format!("2103{}ac", X));
        assert_eq!(witness.verification_script.len(), 70);
    }

    #[test]
    fn witness_bad_signature() {
        let key = format!("02{}", X);
        match Witness::new("1111", &key) {
            Err(Error::MalformedSignature) => {}
            x => panic!("unexpected {:?}", x),
        }
    }
}
