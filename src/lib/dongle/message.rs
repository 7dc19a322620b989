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

//! # Messages
//!
//! Structured versions of the APDU messages understood by the NEO application
//!

use core::convert::TryFrom as _;

use crate::bip44::Account;
use crate::constants::apdu::ledger::{self, ins, p2};
use crate::Error;

/// A single command frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apdu {
    /// Class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// First parameter
    pub p1: u8,
    /// Second parameter
    pub p2: u8,
    /// Payload
    pub data: Vec<u8>,
}

impl Apdu {
    /// Constructor
    pub fn new(cla: u8, ins: u8, p1: u8, p2: u8, data: Vec<u8>) -> Apdu {
        Apdu {
            cla,
            ins,
            p1,
            p2,
            data,
        }
    }

    /// Builds a frame from a hex header (exactly 4 bytes) and a hex payload
    pub fn from_hex(header: &str, payload: &str) -> Result<Apdu, Error> {
        if header.len() != 8 {
            return Err(Error::Framing("params requires 4 bytes"));
        }
        let header =
            hex::decode(header).map_err(|_| Error::Framing("params requires 4 bytes"))?;
        let data = hex::decode(payload).map_err(Error::FramingHex)?;
        match header[..] {
            [cla, ins, p1, p2] => Ok(Apdu::new(cla, ins, p1, p2, data)),
            _ => Err(Error::Framing("params requires 4 bytes")),
        }
    }

    /// The four header bytes, as hex
    pub fn header_hex(&self) -> String {
        hex::encode_upper([self.cla, self.ins, self.p1, self.p2])
    }

    /// Serializes the frame as `CLA INS P1 P2 Lc DATA`
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let lc = u8::try_from(self.data.len()).map_err(|_| Error::ApduTooLong(self.data.len()))?;
        let mut ret = Vec::with_capacity(5 + self.data.len());
        ret.push(self.cla);
        ret.push(self.ins);
        ret.push(self.p1);
        ret.push(self.p2);
        ret.push(lc);
        ret.extend(&self.data);
        Ok(ret)
    }
}

/// A message that can be sent to the dongle
pub trait Command {
    /// Produces the next frame, or None if there are no remaining frames
    /// to send
    fn encode_next(&mut self) -> Option<Apdu>;

    /// Used to update a (potentially multipart) reply
    fn decode_reply(&mut self, data: Vec<u8>) -> Result<(), Error>;

    /// Pull the command apart into the final reply, status word included
    fn into_reply(self) -> Vec<u8>;
}

/// GET PUBLIC KEY message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPublicKey {
    path: Option<Vec<u8>>,
    reply: Vec<u8>,
}

impl GetPublicKey {
    /// Constructor
    pub fn new(account: Account) -> Result<GetPublicKey, Error> {
        Ok(GetPublicKey {
            path: Some(hex::decode(account.path())?),
            reply: vec![],
        })
    }
}

impl Command for GetPublicKey {
    fn encode_next(&mut self) -> Option<Apdu> {
        let path = self.path.take()?;
        Some(Apdu::new(ledger::NEO_CLA, ins::GET_PUBLIC_KEY, 0x00, 0x00, path))
    }

    fn decode_reply(&mut self, data: Vec<u8>) -> Result<(), Error> {
        self.reply = data;
        Ok(())
    }

    fn into_reply(self) -> Vec<u8> {
        self.reply
    }
}

/// SIGN TRANSACTION message
///
/// The serialized transaction is followed by the derivation path and then
/// streamed to the device in chunks. The device only answers with the
/// signature once it sees the final chunk, so every earlier reply is thrown
/// away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignTransaction {
    chunks: Vec<Vec<u8>>,
    reply: Vec<u8>,
}

impl SignTransaction {
    /// Constructor: `data` is the hex-encoded unsigned transaction
    pub fn new(data: &str, account: Account) -> Result<SignTransaction, Error> {
        let mut payload = data.to_owned();
        payload.push_str(&account.path());
        if payload.is_empty() {
            return Err(Error::Framing("invalid data provided"));
        }
        let payload = hex::decode(&payload)?;

        let mut chunks: Vec<Vec<u8>> = payload
            .chunks(ledger::MAX_DATA_SIZE)
            .map(<[u8]>::to_vec)
            .collect();
        chunks.reverse(); // Reverse the order of the chunks so we can send them by popping
        Ok(SignTransaction {
            chunks,
            reply: vec![],
        })
    }

    /// Number of frames left to send
    pub fn remaining(&self) -> usize {
        self.chunks.len()
    }
}

impl Command for SignTransaction {
    fn encode_next(&mut self) -> Option<Apdu> {
        // If `self.chunks` is empty we are done sending the entire transaction
        let chunk = self.chunks.pop()?;
        let p2 = if self.chunks.is_empty() {
            p2::LAST
        } else {
            p2::MORE
        };
        Some(Apdu::new(ledger::NEO_CLA, ins::SIGN_TRANSACTION, 0x00, p2, chunk))
    }

    fn decode_reply(&mut self, data: Vec<u8>) -> Result<(), Error> {
        // Only the reply to the last chunk carries anything
        self.reply = data;
        Ok(())
    }

    fn into_reply(self) -> Vec<u8> {
        self.reply
    }
}
