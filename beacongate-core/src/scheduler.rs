//! Duty-cycle scheduler
//!
//! Drives the connect → scan → publish → sleep loop forever:
//!
//! ```text
//! Connecting ──connected──▶ Scanning ──▶ Publishing ──▶ Sleeping
//!      ▲  │                                                │
//!      │  └─ connect() + fixed wait (loop)                 │
//!      └──────────────────── wake ─────────────────────────┘
//! ```
//!
//! [`DutyCycle::step`] executes exactly one state and returns the next,
//! which keeps every transition testable with injected fakes;
//! [`DutyCycle::run`] is the firmware entry point that never returns.
//! There is one logical thread: the scan blocks up to its timeout, the
//! sleep blocks the whole process until a wake event, and no cycle state
//! is shared outside this struct.

use crate::aggregate::{Aggregator, ExtremaState};
use crate::beacon::DecodedReading;
use crate::codec::{BeaconCodec, BeaconValue};
use crate::constants::{DEFAULT_CONNECT_POLL_MS, DEFAULT_IDLE_DELAY_MS, DEFAULT_SCAN_TIMEOUT_MS};
use crate::control::{self, ControlReply, ControlRequest};
use crate::publish::{PublishOutcome, ReportPublisher};
use crate::traits::{PowerControl, RadioScanner, ScanBuffer, SleepPolicy, Uplink, WakeReason};

/// Scheduler states, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// Waiting for the uplink; no cycle work happens while disconnected
    Connecting,
    /// Running the bounded scan and feeding results through the codec
    Scanning,
    /// Handing the finished report to the publisher
    Publishing,
    /// Low-power sleep (or degraded busy-delay) until the next cycle
    Sleeping,
}

/// Timing and power policy for the duty cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    /// Bounded scan window
    pub scan_timeout_ms: u32,
    /// Wait between connectivity re-checks while disconnected
    pub connect_poll_ms: u32,
    /// Sleep request issued between cycles when `low_power` is set
    pub sleep: SleepPolicy,
    /// Use the hardware low-power sleep; when false, a fixed busy-delay
    /// of `idle_delay_ms` separates cycles instead
    pub low_power: bool,
    /// Inter-cycle delay for the degraded (no-sleep) policy
    pub idle_delay_ms: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            scan_timeout_ms: DEFAULT_SCAN_TIMEOUT_MS,
            connect_poll_ms: DEFAULT_CONNECT_POLL_MS,
            sleep: SleepPolicy::default(),
            low_power: true,
            idle_delay_ms: DEFAULT_IDLE_DELAY_MS,
        }
    }
}

/// The beacon gateway's main loop
///
/// Generic over the beacon variant `V` and the three injected hardware
/// seams. Owns every piece of cycle state: the reused scan buffer, the
/// aggregator (report map + session extrema), and the publisher's
/// serialization buffer.
pub struct DutyCycle<V, R, U, P>
where
    V: BeaconValue,
    R: RadioScanner,
    U: Uplink,
    P: PowerControl,
{
    state: CycleState,
    config: SchedulerConfig,
    radio: R,
    uplink: U,
    power: P,
    aggregator: Aggregator<V>,
    publisher: ReportPublisher,
    scan_buf: ScanBuffer,
}

impl<V, R, U, P> DutyCycle<V, R, U, P>
where
    V: BeaconValue,
    R: RadioScanner,
    U: Uplink,
    P: PowerControl,
{
    /// Assemble a scheduler in its initial `Connecting` state
    pub fn new(config: SchedulerConfig, radio: R, uplink: U, power: P,
               publisher: ReportPublisher) -> Self {
        Self {
            state: CycleState::Connecting,
            config,
            radio,
            uplink,
            power,
            aggregator: Aggregator::new(),
            publisher,
            scan_buf: ScanBuffer::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Session extrema, for readouts and diagnostics
    pub fn extrema(&self) -> &ExtremaState<V> {
        self.aggregator.extrema()
    }

    /// The aggregator holding the most recent window's report
    pub fn aggregator(&self) -> &Aggregator<V> {
        &self.aggregator
    }

    /// Injected radio driver
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Injected radio driver, mutable (test scripting, reconfiguration)
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// Injected uplink stack
    pub fn uplink(&self) -> &U {
        &self.uplink
    }

    /// Injected power controller
    pub fn power(&self) -> &P {
        &self.power
    }

    /// Answer an operator request delivered between cycles
    pub fn handle_control(&mut self, request: ControlRequest) -> ControlReply {
        control::dispatch(request, self.aggregator.extrema(), &mut self.power)
    }

    /// Execute the current state and advance to the next
    pub fn step(&mut self) -> CycleState {
        let next = match self.state {
            CycleState::Connecting => self.connect_step(),
            CycleState::Scanning => self.scan_step(),
            CycleState::Publishing => self.publish_step(),
            CycleState::Sleeping => self.sleep_step(),
        };
        self.state = next;
        next
    }

    /// Run the duty cycle forever (firmware entry point)
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    fn connect_step(&mut self) -> CycleState {
        if self.uplink.is_connected() {
            return CycleState::Scanning;
        }
        self.uplink.connect();
        self.power.delay_ms(self.config.connect_poll_ms);
        CycleState::Connecting
    }

    fn scan_step(&mut self) -> CycleState {
        self.radio.set_scan_timeout(self.config.scan_timeout_ms);
        self.scan_buf.clear();
        let raw_count = self.radio.scan(&mut self.scan_buf);
        log::trace!("scanned: {raw_count}");

        // begin_cycle clears the reused report map, so an empty window
        // still publishes (i.e. skips) an empty report rather than last
        // cycle's contents.
        let mut builder = self.aggregator.begin_cycle();
        if raw_count <= 0 {
            log::warn!("no scan results: {raw_count}");
            return CycleState::Publishing;
        }

        for result in &self.scan_buf {
            // Wrong length or header is a silent per-frame drop
            let Some(value) = BeaconCodec::<V>::decode(result.manufacturer_data()) else {
                continue;
            };
            let reading = DecodedReading {
                addr: result.addr,
                value,
                rssi: result.rssi,
            };
            log::info!(
                "beacon: {} value: {} rssi={}",
                reading.addr,
                reading.value,
                reading.rssi
            );
            builder.observe(reading.addr, reading.value, reading.rssi);
        }
        builder.finish();
        CycleState::Publishing
    }

    fn publish_step(&mut self) -> CycleState {
        match self
            .publisher
            .publish(self.aggregator.report(), &mut self.uplink)
        {
            Ok(PublishOutcome::Sent { bytes, .. }) => log::trace!("published {bytes} bytes"),
            Ok(PublishOutcome::Skipped) => log::trace!("empty report, skipping publish"),
            Err(err) => log::warn!("publish failed: {err}"),
        }
        CycleState::Sleeping
    }

    fn sleep_step(&mut self) -> CycleState {
        if self.config.low_power {
            log::info!("sleep {} ms", self.config.sleep.duration_ms);
            match self.power.sleep(&self.config.sleep) {
                WakeReason::Timer => log::info!("wakeup on timer"),
                WakeReason::Gpio { pin } => log::info!("gpio wakeup pin: {pin}"),
                WakeReason::Network => log::info!("network wakeup"),
                WakeReason::Other(code) => log::info!("wakeup: {code}"),
            }
        } else {
            self.power.delay_ms(self.config.idle_delay_ms);
        }
        CycleState::Connecting
    }
}
