//! Beacon sighting types
//!
//! The data model for one beacon seen in one scan window: its 6-byte
//! address, the raw advertisement handed over by the radio driver, and the
//! decoded reading the codec produces from it. All types are small,
//! stack-allocated, and live only within a single cycle (the address type
//! doubles as the report map key).

use core::fmt;

use heapless::Vec;

use crate::codec::BeaconValue;
use crate::constants::MAX_ADV_DATA_LEN;

/// 6-byte beacon device address
///
/// Rendered as colon-separated hex (`AA:BB:CC:DD:EE:FF`) for logs and the
/// report wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BeaconAddr(pub [u8; 6]);

impl fmt::Display for BeaconAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a, b, c, d, e, g
        )
    }
}

/// One raw scan result from the radio driver
///
/// Transient: produced by the external scan call, consumed by the codec,
/// gone by the end of the cycle.
#[derive(Debug, Clone)]
pub struct RawAdvertisement {
    /// Advertising device address
    pub addr: BeaconAddr,
    /// Received signal strength for this sighting
    pub rssi: i8,
    /// Manufacturer-specific advertisement bytes
    data: Vec<u8, MAX_ADV_DATA_LEN>,
}

impl RawAdvertisement {
    /// Build a scan result from driver-provided bytes
    ///
    /// Returns `None` if the payload exceeds the radio-defined maximum.
    pub fn new(addr: BeaconAddr, rssi: i8, data: &[u8]) -> Option<Self> {
        Some(Self {
            addr,
            rssi,
            data: Vec::from_slice(data).ok()?,
        })
    }

    /// Manufacturer-specific payload carried by this advertisement
    pub fn manufacturer_data(&self) -> &[u8] {
        &self.data
    }
}

/// A validated reading decoded from one advertisement
#[derive(Debug, Clone, Copy)]
pub struct DecodedReading<V: BeaconValue> {
    /// Address of the beacon that broadcast the reading
    pub addr: BeaconAddr,
    /// Decoded payload value
    pub value: V,
    /// Signal strength of the sighting
    pub rssi: i8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_renders_colon_hex() {
        let addr = BeaconAddr([0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x7F]);
        assert_eq!(format!("{addr}"), "DE:AD:BE:EF:00:7F");
    }

    #[test]
    fn advertisement_rejects_oversized_payload() {
        let addr = BeaconAddr([0; 6]);
        let too_long = [0u8; MAX_ADV_DATA_LEN + 1];
        assert!(RawAdvertisement::new(addr, -40, &too_long).is_none());

        let max = [0u8; MAX_ADV_DATA_LEN];
        let adv = RawAdvertisement::new(addr, -40, &max).unwrap();
        assert_eq!(adv.manufacturer_data().len(), MAX_ADV_DATA_LEN);
    }
}
