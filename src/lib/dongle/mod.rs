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

//! # Dongle
//!
//! Abstract API for communicating with the device
//!

use core::convert::TryInto;

use crate::bip44::Account;
use crate::constants::apdu::ledger::sw;
use crate::constants::PUBLIC_KEY_HEX_LEN;
use crate::witness::Witness;
use crate::{status, util, Error};
use self::message::{Apdu, Command};

pub mod ledger;
pub mod message;

/// Trait representing an abstract hardware wallet running the NEO app
///
/// Every call is a blocking round-trip, and a signing request is a sequence
/// of them which the device tracks as one operation. Taking `&mut self`
/// everywhere keeps two requests from ever interleaving on one device.
pub trait Dongle {
    /// Sends a single frame to the device and returns its raw response,
    /// trailing status word included. Fails with `Error::ResponseBadStatus`
    /// if the status word is not in `accepted`. Generally this function is
    /// never used directly.
    fn exchange(&mut self, apdu: &Apdu, accepted: &[u16]) -> Result<Vec<u8>, Error>;

    /// Like `exchange`, but with failures relabeled for humans
    fn transmit(&mut self, apdu: &Apdu, accepted: &[u16]) -> Result<Vec<u8>, Error> {
        log::trace!("sending {} with {} bytes of data", apdu.header_hex(), apdu.data.len());
        self.exchange(apdu, accepted)
            .map_err(status::translate_error)
    }

    /// Sends a frame given as a hex header (4 bytes) and a hex payload
    ///
    /// Malformed input is rejected before the device is contacted.
    fn send(&mut self, header: &str, payload: &str, accepted: &[u16]) -> Result<Vec<u8>, Error> {
        let apdu = Apdu::from_hex(header, payload)?;
        self.transmit(&apdu, accepted)
    }

    /// Sends every frame of a (potentially multipart) command in order and
    /// returns the reply to the last one. The first failure aborts the
    /// whole command.
    fn run<C: Command>(&mut self, mut cmd: C) -> Result<Vec<u8>, Error> {
        while let Some(apdu) = cmd.encode_next() {
            let reply = self.transmit(&apdu, &[sw::VALID_STATUS])?;
            cmd.decode_reply(reply)?;
        }
        Ok(cmd.into_reply())
    }

    /// Queries the device for the uncompressed public key of an account
    fn get_public_key<A>(&mut self, account: A) -> Result<String, Error>
    where
        A: TryInto<Account>,
        Error: From<A::Error>,
    {
        let account = account.try_into()?;
        let command = message::GetPublicKey::new(account)?;
        let rev = self.run(command)?;
        let mut key = hex::encode(rev);
        key.truncate(PUBLIC_KEY_HEX_LEN);
        Ok(key)
    }

    /// Query the device to sign a hex-encoded unsigned transaction; returns
    /// the raw 64-byte `r‖s` signature as hex
    fn get_signature<A>(&mut self, data: &str, account: A) -> Result<String, Error>
    where
        A: TryInto<Account>,
        Error: From<A::Error>,
    {
        let account = account.try_into()?;
        let command = message::SignTransaction::new(data, account)?;
        log::debug!(
            "signing {} bytes for account {} in {} chunks",
            data.len() / 2,
            account,
            command.remaining(),
        );
        let rev = self.run(command)?;
        // A bare status word means the device accepted the last chunk but
        // never produced a signature
        if let [sw1, sw2, ..] = rev[..] {
            if u16::from_be_bytes([sw1, sw2]) == sw::VALID_STATUS {
                return Err(Error::Protocol("no more data but device did not return signature"));
            }
        }
        util::decode_der_bytes(&rev)
    }

    /// Queries both the public key and a signature for an account and
    /// assembles them into a witness
    fn sign_witness<A>(&mut self, data: &str, account: A) -> Result<Witness, Error>
    where
        A: TryInto<Account>,
        Error: From<A::Error>,
    {
        let account = account.try_into()?;
        let public_key = self.get_public_key::<Account>(account)?;
        let signature = self.get_signature::<Account>(data, account)?;
        Witness::new(&signature, &public_key)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::constants::apdu::ledger::p2;
    use crate::error::AccountError;

    /// Records every frame and replays canned responses
    #[derive(Default)]
    struct MockDongle {
        sent: Vec<(Apdu, Vec<u16>)>,
        replies: VecDeque<Vec<u8>>,
    }

    impl MockDongle {
        fn with_replies(replies: &[&str]) -> MockDongle {
            MockDongle {
                sent: vec![],
                replies: replies.iter().map(|r| hex::decode(r).unwrap()).collect(),
            }
        }
    }

    impl Dongle for MockDongle {
        fn exchange(&mut self, apdu: &Apdu, accepted: &[u16]) -> Result<Vec<u8>, Error> {
            self.sent.push((apdu.clone(), accepted.to_vec()));
            let reply = self.replies.pop_front().expect("no reply scripted");
            let n = reply.len();
            let status = u16::from_be_bytes([reply[n - 2], reply[n - 1]]);
            if accepted.contains(&status) {
                Ok(reply)
            } else {
                Err(Error::ResponseBadStatus { status })
            }
        }
    }

    const R: &str = "1cd3c63bcbd4cd2e35d8b1e6b4a8d1d07d6b3db0c3cd87e7a8b3d8aa0f6d1e6a";
    const S: &str = "5b1b29e0f4b6a1e7c4bfb3b5d1ff3bb5ac6e30ed3f1c54cf6a3fc1d9a0d6d0b2";
    const PUBKEY: &str = "04\
        6a1e5f0c1bfe3f8e3d0d1a9c5ef8e1d2b5b4dc2f0b8e1cfe0f8d2c1f4a8b8e61\
        0d2e3f4a5b6c7d8e9fa0b1c2d3e4f5061728394a5b6c7d8e9fa0b1c2d3e4f511";

    fn der_reply() -> String {
        format!("3044022000{}0220{}9000", &R[2..], S)
    }

    #[test]
    fn send_splits_header() {
        let mut dongle = MockDongle::with_replies(&["9000"]);
        let rev = dongle.send("12345678", "ab", &[0x9000]).unwrap();
        assert_eq!(rev, vec![0x90, 0x00]);
        assert_eq!(dongle.sent.len(), 1);
        let (ref apdu, ref accepted) = dongle.sent[0];
        assert_eq!((apdu.cla, apdu.ins, apdu.p1, apdu.p2), (0x12, 0x34, 0x56, 0x78));
        assert_eq!(apdu.data, vec![0xab]);
        assert_eq!(accepted, &vec![0x9000]);
    }

    #[test]
    fn send_rejects_before_transport() {
        let mut dongle = MockDongle::default();
        for header in &["", "800400", "800400000", "80 04 00 00"] {
            match dongle.send(header, "", &[0x9000]) {
                Err(Error::Framing("params requires 4 bytes")) => {}
                x => panic!("header {:?}: unexpected {:?}", header, x),
            }
        }
        match dongle.send("8004000g", "", &[0x9000]) {
            Err(Error::Framing("params requires 4 bytes")) => {}
            x => panic!("unexpected {:?}", x),
        }
        match dongle.send("80040000", "abc", &[0x9000]) {
            Err(Error::FramingHex(_)) => {}
            x => panic!("unexpected {:?}", x),
        }
        assert!(dongle.sent.is_empty());
    }

    #[test]
    fn send_translates_status() {
        let cases = [
            ("6e00", "Your NEO app is closed! Please login."),
            ("6d08", "Your transaction is too big for the ledger to sign!"),
            ("6985", "Transaction signing denied"),
        ];
        for &(status, message) in &cases {
            let mut dongle = MockDongle::with_replies(&[status]);
            match dongle.send("80040000", "", &[0x9000]) {
                Err(Error::Transport(failure)) => {
                    assert_eq!(failure.status, u16::from_str_radix(status, 16).unwrap());
                    assert_eq!(failure.message, message);
                }
                x => panic!("unexpected {:?}", x),
            }
        }

        let mut dongle = MockDongle::with_replies(&["6a80"]);
        let err = dongle.send("80040000", "", &[0x9000]).unwrap_err();
        assert_eq!(err.status(), Some(0x6a80));
        assert!(err.to_string().contains("6A80"));
    }

    #[test]
    fn public_key() {
        let reply = format!("{}9000", PUBKEY);
        let mut dongle = MockDongle::with_replies(&[&reply]);
        let key = dongle.get_public_key(16u32).unwrap();
        assert_eq!(key, PUBKEY);
        assert_eq!(key.len(), 130);

        assert_eq!(dongle.sent.len(), 1);
        let (ref apdu, ref accepted) = dongle.sent[0];
        assert_eq!(apdu.header_hex(), "80040000");
        assert_eq!(
            hex::encode_upper(&apdu.data),
            "8000002C80000378800000000000000000000010",
        );
        assert_eq!(accepted, &vec![sw::VALID_STATUS]);
    }

    #[test]
    fn public_key_bad_account() {
        let mut dongle = MockDongle::default();
        match dongle.get_public_key(-3i32) {
            Err(Error::InvalidAccount(AccountError::Negative)) => {}
            x => panic!("unexpected {:?}", x),
        }
        match dongle.get_public_key(0.5f64) {
            Err(Error::InvalidAccount(AccountError::NotAnInteger)) => {}
            x => panic!("unexpected {:?}", x),
        }
        assert!(dongle.sent.is_empty());
    }

    #[test]
    fn public_key_app_closed() {
        let mut dongle = MockDongle::with_replies(&["6e00"]);
        let err = dongle.get_public_key(0u32).unwrap_err();
        assert_eq!(err.status(), Some(0x6e00));
        assert!(err.to_string().contains("app is closed"));
    }

    #[test]
    fn signature_single_chunk() {
        let reply = der_reply();
        let mut dongle = MockDongle::with_replies(&[&reply]);
        let sig = dongle.get_signature("d1001234", 0u32).unwrap();
        assert_eq!(sig, format!("00{}{}", &R[2..], S));

        assert_eq!(dongle.sent.len(), 1);
        let (ref apdu, _) = dongle.sent[0];
        assert_eq!(apdu.header_hex(), "80020080");
        assert_eq!(hex::encode_upper(&apdu.data), "D10012348000002C800003788000000000000000".to_owned() + "00000000");
    }

    #[test]
    fn signature_many_chunks() {
        // 600 bytes of transaction and 20 of path make 255 + 255 + 110
        let data = "5a".repeat(600);
        let reply = der_reply();
        let mut dongle = MockDongle::with_replies(&["9000", "9000", &reply]);
        let sig = dongle.get_signature(&data, 7u32).unwrap();
        assert_eq!(sig.len(), 128);

        let p2s: Vec<u8> = dongle.sent.iter().map(|(apdu, _)| apdu.p2).collect();
        assert_eq!(p2s, vec![p2::MORE, p2::MORE, p2::LAST]);
        let lens: Vec<usize> = dongle.sent.iter().map(|(apdu, _)| apdu.data.len()).collect();
        assert_eq!(lens, vec![255, 255, 110]);
        for (apdu, accepted) in &dongle.sent {
            assert_eq!((apdu.cla, apdu.ins, apdu.p1), (0x80, 0x02, 0x00));
            assert_eq!(accepted, &vec![sw::VALID_STATUS]);
        }

        let mut sent = vec![];
        for (apdu, _) in &dongle.sent {
            sent.extend(&apdu.data);
        }
        assert_eq!(hex::encode(sent), data + "8000002c800003788000000000000000" + "00000007");
    }

    #[test]
    fn signature_bare_status() {
        let mut dongle = MockDongle::with_replies(&["9000"]);
        match dongle.get_signature("d100", 0u32) {
            Err(Error::Protocol(msg)) => {
                assert_eq!(msg, "no more data but device did not return signature");
            }
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn signature_aborts_on_failure() {
        let data = "00".repeat(600);
        let mut dongle = MockDongle::with_replies(&["9000", "6985", "9000"]);
        match dongle.get_signature(&data, 0u32) {
            Err(Error::Transport(failure)) => {
                assert_eq!(failure.status, 0x6985);
                assert_eq!(failure.message, "Transaction signing denied");
            }
            x => panic!("unexpected {:?}", x),
        }
        assert_eq!(dongle.sent.len(), 2);
        assert_eq!(dongle.replies.len(), 1);
    }

    #[test]
    fn signature_too_big() {
        let mut dongle = MockDongle::with_replies(&["6d08"]);
        let err = dongle.get_signature("d100", 0u32).unwrap_err();
        assert!(err.to_string().contains("too big"));
    }

    #[test]
    fn signature_rejects_before_transport() {
        let mut dongle = MockDongle::default();
        match dongle.get_signature("d10", 0u32) {
            Err(Error::Hex(_)) => {}
            x => panic!("unexpected {:?}", x),
        }
        match dongle.get_signature("d100", 0x1_0000_0000u64) {
            Err(Error::InvalidAccount(AccountError::OutOfRange)) => {}
            x => panic!("unexpected {:?}", x),
        }
        assert!(dongle.sent.is_empty());
    }

    #[test]
    fn signature_malformed() {
        let mut dongle = MockDongle::with_replies(&["3044022011119000"]);
        match dongle.get_signature("d100", 0u32) {
            Err(Error::MalformedSignature) => {}
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn witness() {
        let key_reply = format!("{}9000", PUBKEY);
        let sig_reply = der_reply();
        let mut dongle = MockDongle::with_replies(&[&key_reply, &sig_reply]);
        let witness = dongle.sign_witness("d100", 2u32).unwrap();
        assert_eq!(witness.invocation_script, format!("4000{}{}", &R[2..], S));
        assert_eq!(
            witness.verification_script,
            format!("2103{}ac", &PUBKEY[2..66]),
        );
        let headers: Vec<String> = dongle.sent.iter().map(|(apdu, _)| apdu.header_hex()).collect();
        assert_eq!(headers, vec!["80040000", "80020080"]);
    }
}
