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

//! # Constants
//!
//! Various constants
//!

/// HID-related constants
pub mod hid {
    /// USB vendor ID shared by all Ledger devices
    pub const LEDGER_VENDOR_ID: u16 = 0x2c97;
    /// HID usage page of the APDU interface on newer firmwares
    pub const LEDGER_USAGE_PAGE: u16 = 0xffa0;
}

/// Communication constants
pub mod apdu {
    /// Ledger-specific APDU constants
    #[allow(missing_docs)]
    pub mod ledger {
        pub const DEFAULT_CHANNEL: u16 = 0x0101;
        pub const TAG_APDU: u8 = 0x05;
        /// Maximum size an individual HID message can be
        pub const PACKET_SIZE: usize = 64;
        /// Maximum payload of a single APDU
        pub const MAX_DATA_SIZE: usize = 255;

        /// Class byte of the NEO application
        pub const NEO_CLA: u8 = 0x80;

        /// Instructions
        pub mod ins {
            pub const SIGN_TRANSACTION: u8 = 0x02;
            pub const GET_PUBLIC_KEY: u8 = 0x04;
        }

        /// Values of the p2 byte while streaming a transaction
        pub mod p2 {
            /// More chunks follow this one
            pub const MORE: u8 = 0x00;
            /// This is the final chunk
            pub const LAST: u8 = 0x80;
        }

        /// Status Words
        pub mod sw {
            pub const VALID_STATUS: u16 = 0x9000;
            pub const MSG_TOO_BIG: u16 = 0x6d08;
            pub const APP_CLOSED: u16 = 0x6e00;
            pub const TX_DENIED: u16 = 0x6985;
        }
    }
}

/// BIP44 derivation constants
pub mod bip44 {
    /// Hardened purpose (44')
    pub const PURPOSE: &str = "8000002C";
    /// Hardened NEO coin type (888')
    pub const COIN_TYPE: &str = "80000378";
    /// Hardened account (0')
    pub const ACCOUNT: &str = "80000000";
    /// External chain (0)
    pub const CHANGE: &str = "00000000";
    /// Length in hex characters of a full derivation path frame
    pub const PATH_HEX_LEN: usize = 40;
}

/// Length in hex characters of an uncompressed public key
pub const PUBLIC_KEY_HEX_LEN: usize = 130;

/// Length in hex characters of one signature integer
pub const SIGNATURE_INTEGER_HEX_LEN: usize = 64;
