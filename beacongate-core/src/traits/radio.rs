//! Short-range radio scan contract

use heapless::Vec;

use crate::beacon::RawAdvertisement;
use crate::constants::SCAN_RESULT_MAX;

/// Reused per-cycle scan result buffer
///
/// Capacity enforces the scan-result maximum: a driver can fill it, never
/// overrun it.
pub type ScanBuffer = Vec<RawAdvertisement, SCAN_RESULT_MAX>;

/// Blocking scan driver for the short-range radio
pub trait RadioScanner {
    /// Bound the next scan to the given window
    fn set_scan_timeout(&mut self, timeout_ms: u32);

    /// Run one blocking scan, filling `results` up to its capacity
    ///
    /// Returns the driver's raw result count; zero or negative means the
    /// window saw nothing (negative values are driver error codes, treated
    /// the same way).
    fn scan(&mut self, results: &mut ScanBuffer) -> i32;
}
