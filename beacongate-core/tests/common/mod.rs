//! Shared fakes and frame builders for integration tests
//!
//! Stand-ins for the four hardware seams the core drives: a scripted
//! radio, a recording uplink, a fake power controller, and a name-keeping
//! control registry.

#![allow(dead_code)]

use beacongate_core::{
    BeaconAddr, BeaconCodec, ControlRegistry, PowerControl, PublishFlags, RadioScanner,
    RawAdvertisement, ScanBuffer, SleepPolicy, Uplink, WakeReason,
};
use core::convert::Infallible;

/// Radio driver that replays a scripted frame list every scan
#[derive(Default)]
pub struct MockRadio {
    pub frames: Vec<RawAdvertisement>,
    pub timeout_ms: Option<u32>,
    pub scans: usize,
    /// Overrides the returned count (driver error codes, phantom results)
    pub forced_count: Option<i32>,
}

impl RadioScanner for MockRadio {
    fn set_scan_timeout(&mut self, timeout_ms: u32) {
        self.timeout_ms = Some(timeout_ms);
    }

    fn scan(&mut self, results: &mut ScanBuffer) -> i32 {
        self.scans += 1;
        for frame in &self.frames {
            if results.push(frame.clone()).is_err() {
                // Buffer capacity is the scan-result maximum; extra
                // driver results are dropped here, never written past it.
                break;
            }
        }
        self.forced_count.unwrap_or(results.len() as i32)
    }
}

/// Uplink that records every transmission attempt
pub struct MockUplink {
    pub connected: bool,
    pub accept: bool,
    pub connects: usize,
    pub published: Vec<(String, Vec<u8>, PublishFlags)>,
}

impl Default for MockUplink {
    fn default() -> Self {
        Self {
            connected: true,
            accept: true,
            connects: 0,
            published: Vec::new(),
        }
    }
}

impl Uplink for MockUplink {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self) {
        self.connects += 1;
    }

    fn publish(&mut self, topic: &str, payload: &[u8], flags: PublishFlags) -> bool {
        self.published.push((topic.into(), payload.to_vec(), flags));
        self.accept
    }
}

/// Power controller that records sleeps/delays and replays a wake reason
pub struct MockPower {
    pub sleeps: Vec<SleepPolicy>,
    pub delays: Vec<u32>,
    pub wake: WakeReason,
    pub resets: usize,
}

impl Default for MockPower {
    fn default() -> Self {
        Self {
            sleeps: Vec::new(),
            delays: Vec::new(),
            wake: WakeReason::Timer,
            resets: 0,
        }
    }
}

impl PowerControl for MockPower {
    fn sleep(&mut self, policy: &SleepPolicy) -> WakeReason {
        self.sleeps.push(*policy);
        self.wake
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

/// Registry that remembers what the core registered
#[derive(Default)]
pub struct MockRegistry {
    pub commands: Vec<&'static str>,
    pub variables: Vec<&'static str>,
}

impl ControlRegistry for MockRegistry {
    type Error = Infallible;

    fn register_command(&mut self, name: &'static str) -> Result<(), Infallible> {
        self.commands.push(name);
        Ok(())
    }

    fn register_variable(&mut self, name: &'static str) -> Result<(), Infallible> {
        self.variables.push(name);
        Ok(())
    }
}

/// Address with a distinguishing last byte
pub fn addr(last: u8) -> BeaconAddr {
    BeaconAddr([0xC0, 0xFF, 0xEE, 0x00, 0x00, last])
}

/// Well-formed 7-byte airq frame
pub fn airq_frame(value: u32) -> Vec<u8> {
    let mut buf = vec![0u8; BeaconCodec::<u32>::FRAME_LEN];
    BeaconCodec::<u32>::encode(value, &mut buf).expect("frame buffer sized for variant");
    buf
}

/// Scripted advertisement carrying a valid airq frame
pub fn airq_advert(last: u8, value: u32, rssi: i8) -> RawAdvertisement {
    RawAdvertisement::new(addr(last), rssi, &airq_frame(value)).expect("payload within adv limit")
}
