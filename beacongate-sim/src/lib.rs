//! Desktop stand-ins for the beacongate hardware seams
//!
//! Lets the full duty cycle run on a workstation: a scripted radio that
//! synthesizes plausible beacon traffic, an uplink that validates and logs
//! every payload instead of transmitting, and a power controller that
//! scales sleep down to something a demo can sit through.

use beacongate_core::{
    BeaconAddr, BeaconCodec, PublishFlags, RadioScanner, RawAdvertisement, ScanBuffer,
    SleepPolicy, Uplink, WakeReason,
};

/// One synthetic beacon the radio keeps re-advertising
#[derive(Debug, Clone)]
pub struct SimBeacon {
    addr: BeaconAddr,
    base_value: u32,
}

impl SimBeacon {
    /// Beacon with a fixed address and a base reading to jitter around
    pub fn new(addr: BeaconAddr, base_value: u32) -> Self {
        Self { addr, base_value }
    }
}

/// Radio driver producing deterministic pseudo-random beacon traffic
pub struct SimRadio {
    beacons: Vec<SimBeacon>,
    timeout_ms: u32,
    seed: u32,
}

impl SimRadio {
    /// Radio advertising the given beacons, seeded for reproducibility
    pub fn new(beacons: Vec<SimBeacon>, seed: u32) -> Self {
        Self {
            beacons,
            timeout_ms: 0,
            seed,
        }
    }

    fn next_rand(&mut self) -> u32 {
        // Numerical Recipes LCG; plenty for demo jitter
        self.seed = self.seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.seed
    }
}

impl RadioScanner for SimRadio {
    fn set_scan_timeout(&mut self, timeout_ms: u32) {
        self.timeout_ms = timeout_ms;
    }

    fn scan(&mut self, results: &mut ScanBuffer) -> i32 {
        log::debug!(
            "simulated scan, {} beacons, {} ms window",
            self.beacons.len(),
            self.timeout_ms
        );
        for beacon in self.beacons.clone() {
            let jitter = self.next_rand() % 16;
            let value = beacon.base_value.saturating_add(jitter);
            let rssi = -40 - (self.next_rand() % 50) as i8;

            let mut frame = [0u8; BeaconCodec::<u32>::FRAME_LEN];
            if BeaconCodec::<u32>::encode(value, &mut frame).is_none() {
                continue;
            }
            let Some(adv) = RawAdvertisement::new(beacon.addr, rssi, &frame) else {
                continue;
            };
            if results.push(adv).is_err() {
                break;
            }
        }
        results.len() as i32
    }
}

/// Uplink that validates payloads locally instead of transmitting
pub struct SimUplink {
    connected: bool,
    /// Connect attempts before `is_connected` flips true
    attempts_needed: usize,
    attempts: usize,
    published: usize,
}

impl SimUplink {
    /// Uplink that comes up after `attempts_needed` connect calls
    pub fn new(attempts_needed: usize) -> Self {
        Self {
            connected: attempts_needed == 0,
            attempts_needed,
            attempts: 0,
            published: 0,
        }
    }

    /// Reports handed over so far
    pub fn published(&self) -> usize {
        self.published
    }
}

impl Uplink for SimUplink {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self) {
        self.attempts += 1;
        if self.attempts >= self.attempts_needed {
            log::info!("uplink connected after {} attempts", self.attempts);
            self.connected = true;
        }
    }

    fn publish(&mut self, topic: &str, payload: &[u8], flags: PublishFlags) -> bool {
        self.published += 1;
        match serde_json::from_slice::<serde_json::Value>(payload) {
            Ok(report) => log::info!(
                "publish #{} topic={} private={} ack={} -> {}",
                self.published,
                topic,
                flags.private,
                flags.require_ack,
                report
            ),
            // A clamped oversized report can lose its trailing entry
            Err(_) => log::warn!(
                "publish #{} topic={} carried a truncated report ({} bytes)",
                self.published,
                topic,
                payload.len()
            ),
        }
        true
    }
}

/// Power controller that compresses sleep time for interactive runs
pub struct SimPower {
    /// Divisor applied to requested sleep/delay durations
    time_scale: u32,
}

impl SimPower {
    /// Fake power control; durations are divided by `time_scale`
    pub fn new(time_scale: u32) -> Self {
        Self {
            time_scale: time_scale.max(1),
        }
    }

    fn wait(&self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            ms / self.time_scale,
        )));
    }
}

impl beacongate_core::PowerControl for SimPower {
    fn sleep(&mut self, policy: &SleepPolicy) -> WakeReason {
        self.wait(policy.duration_ms);
        WakeReason::Timer
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait(ms);
    }

    fn reset(&mut self) {
        // A desktop process has nothing to reboot; make it visible instead
        log::warn!("device reset requested");
    }
}
