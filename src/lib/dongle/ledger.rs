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

//! # Ledger Dongle
//!
//! Specific support for Ledger-branded dongles
//!

use byteorder::{BigEndian, ByteOrder};
use core::cmp;
use core::convert::TryFrom as _;
use core::fmt;
use std::collections::BTreeSet;
use std::ffi::CString;
use std::time::Duration;

use crate::constants::apdu::ledger;
use crate::dongle::{message::Apdu, Dongle};
use crate::{constants, hid, Error};

/// How long to wait for the device to answer a single frame, which includes
/// the user confirming on-screen
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Structure representing the device
pub struct LedgerNano {
    hid_dev: hid::Device,
    path: String,
    timeout: Duration,
}

/// Strings the device reports about itself over USB
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    /// HID path the device was opened at
    pub path: String,
    /// Manufacturer string
    pub manufacturer: Option<String>,
    /// Product string
    pub product: Option<String>,
    /// Serial number
    pub serial_number: Option<String>,
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let unknown = "(unknown)";
        writeln!(f, "Path:         {}", self.path)?;
        writeln!(f, "Manufacturer: {}", self.manufacturer.as_deref().unwrap_or(unknown))?;
        writeln!(f, "Product:      {}", self.product.as_deref().unwrap_or(unknown))?;
        write!(f, "Serial:       {}", self.serial_number.as_deref().unwrap_or(unknown))
    }
}

impl Dongle for LedgerNano {
    fn exchange(&mut self, apdu: &Apdu, accepted: &[u16]) -> Result<Vec<u8>, Error> {
        let msg = apdu.encode()?;
        log::trace!("-> {}", hex::encode(&msg));
        write_apdu(&self.hid_dev, &msg)?;
        let timeout = self.timeout;
        let hid_dev = &self.hid_dev;
        let reply = read_apdu(|frame| read_frame(hid_dev, frame, timeout))?;
        log::trace!("<- {}", hex::encode(&reply));

        let status = match reply[..] {
            [.., sw1, sw2] => BigEndian::read_u16(&[sw1, sw2]),
            _ => return Err(Error::UnexpectedEof),
        };
        if accepted.contains(&status) {
            Ok(reply)
        } else {
            Err(Error::ResponseBadStatus { status })
        }
    }
}

impl LedgerNano {
    /// Initializes the HID library, failing if this machine cannot talk to
    /// USB HID devices at all
    pub fn hid_api() -> Result<hid::Api, Error> {
        hid::Api::new().map_err(|e| {
            log::debug!("hidapi unavailable: {}", e);
            Error::Unsupported
        })
    }

    /// Lists the HID paths of every connected Ledger
    pub fn list(hid: &hid::Api) -> Vec<String> {
        let paths = hid
            .device_list()
            .filter(|dev| {
                dev.vendor_id() == constants::hid::LEDGER_VENDOR_ID
                    && (dev.interface_number() == 0
                        || dev.usage_page() == constants::hid::LEDGER_USAGE_PAGE)
            })
            .map(|dev| dev.path().to_string_lossy().into_owned());
        // The same device can show up once per interface or usage page
        unique_paths(paths)
    }

    /// Opens the device at a given HID path
    pub fn open(hid: &hid::Api, path: &str) -> Result<LedgerNano, Error> {
        let c_path = CString::new(path).map_err(|_| Error::DongleNotFound)?;
        let hid_dev = hid.open_path(&c_path)?;
        log::debug!("opened ledger at {}", path);
        Ok(LedgerNano {
            hid_dev,
            path: path.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Function to get a handle of the device. Opens the first Ledger found,
    /// erroring out if there are none.
    pub fn get(hid: &hid::Api) -> Result<LedgerNano, Error> {
        match LedgerNano::list(hid).first() {
            Some(path) => LedgerNano::open(hid, path),
            None => Err(Error::DongleNotFound),
        }
    }

    /// Sets how long to wait for each reply from the device
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// HID path this device was opened at
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Queries the USB descriptor strings of the device
    pub fn device_info(&self) -> Result<DeviceInfo, Error> {
        Ok(DeviceInfo {
            path: self.path.clone(),
            manufacturer: self.hid_dev.get_manufacturer_string()?,
            product: self.hid_dev.get_product_string()?,
            serial_number: self.hid_dev.get_serial_number_string()?,
        })
    }

    /// Closes the connection to the device
    pub fn close(self) {
        log::debug!("closing ledger at {}", self.path);
    }
}

/// Read one full HID report, failing if the device goes quiet
fn read_frame(hid_dev: &hid::Device, frame: &mut [u8], timeout: Duration) -> Result<(), Error> {
    let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
    let mut frame_ptr = frame;
    while !frame_ptr.is_empty() {
        let n_read_bytes = hid_dev.read_timeout(frame_ptr, millis)?;
        if n_read_bytes == 0 {
            return Err(Error::Timeout);
        }
        frame_ptr = &mut frame_ptr[n_read_bytes..];
    }
    Ok(())
}

/// Header length of a HID report: channel, tag and sequence number, plus
/// the total message length in the first report only
fn header_len(sequence_no: u16) -> usize {
    if sequence_no == 0 {
        7
    } else {
        5
    }
}

/// Stamp channel, tag and sequence number onto a report
fn write_frame_header(frame: &mut [u8], sequence_no: u16) {
    BigEndian::write_u16(&mut frame[0..2], ledger::DEFAULT_CHANNEL);
    frame[2] = ledger::TAG_APDU;
    BigEndian::write_u16(&mut frame[3..5], sequence_no);
}

/// Check the channel, tag and sequence number of a report
fn check_frame_header(frame: &[u8], sequence_no: u16) -> Result<(), Error> {
    let channel = BigEndian::read_u16(&frame[0..2]);
    if channel != ledger::DEFAULT_CHANNEL {
        return Err(Error::ApduWrongChannel {
            expected: ledger::DEFAULT_CHANNEL,
            found: channel,
        });
    }
    if frame[2] != ledger::TAG_APDU {
        return Err(Error::ApduWrongTag {
            expected: ledger::TAG_APDU,
            found: frame[2],
        });
    }
    let found = BigEndian::read_u16(&frame[3..5]);
    if found != sequence_no {
        return Err(Error::ApduWrongSequence {
            expected: sequence_no,
            found,
        });
    }
    Ok(())
}

/// Split an encoded APDU into HID reports
fn frame_apdu(data: &[u8]) -> Result<Vec<[u8; ledger::PACKET_SIZE]>, Error> {
    let total_len = u16::try_from(data.len()).map_err(|_| Error::ApduTooLong(data.len()))?;

    let mut frames = vec![];
    let mut rest = data;
    let mut sequence_no = 0u16;
    while !rest.is_empty() {
        let mut frame = [0u8; ledger::PACKET_SIZE];
        write_frame_header(&mut frame, sequence_no);
        if sequence_no == 0 {
            BigEndian::write_u16(&mut frame[5..7], total_len);
        }
        let start = header_len(sequence_no);
        let n = cmp::min(rest.len(), frame.len() - start);
        frame[start..start + n].copy_from_slice(&rest[..n]);
        rest = &rest[n..];

        frames.push(frame);
        sequence_no += 1;
    }
    Ok(frames)
}

/// Write a message encoded as a APDU to the Ledger device
fn write_apdu(hid_dev: &hid::Device, data: &[u8]) -> Result<(), Error> {
    for frame in frame_apdu(data)? {
        hid_dev.write(&frame[..])?;
    }
    Ok(())
}

/// Read a message encoded as a APDU from the Ledger device, one HID report
/// at a time
fn read_apdu<F>(mut read_frame: F) -> Result<Vec<u8>, Error>
where
    F: FnMut(&mut [u8]) -> Result<(), Error>,
{
    let mut frame = [0u8; ledger::PACKET_SIZE];
    read_frame(&mut frame[..])?;
    check_frame_header(&frame, 0)?;
    let total_len = usize::from(BigEndian::read_u16(&frame[5..7]));

    let mut ret = Vec::with_capacity(total_len);
    let mut sequence_no = 0u16;
    loop {
        let start = header_len(sequence_no);
        let n = cmp::min(total_len - ret.len(), frame.len() - start);
        ret.extend_from_slice(&frame[start..start + n]);
        if ret.len() == total_len {
            return Ok(ret);
        }

        sequence_no += 1;
        read_frame(&mut frame[..])?;
        check_frame_header(&frame, sequence_no)?;
    }
}

/// Sorted HID paths with duplicates removed
fn unique_paths<I: IntoIterator<Item = String>>(paths: I) -> Vec<String> {
    paths.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}
