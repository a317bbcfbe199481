//! Power-management contract
//!
//! The sleep call blocks the entire process until a wake event fires;
//! nothing in the core runs during sleep. Modelling it as
//! `sleep(policy) -> WakeReason` keeps the scheduler's sleep/wake logic
//! testable without the hardware driver.

use crate::constants::DEFAULT_SLEEP_MS;

/// Low-power mode requested for the sleep interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerMode {
    /// Peripherals stopped, RAM retained, fast resume
    Stop,
    /// Deepest mode that still honors the keep-powered set
    UltraLowPower,
    /// Everything off; resume is a cold boot
    Hibernate,
}

/// Peripherals that stay powered through sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeripheralSet {
    /// Keep the long-haul radio link up
    pub network: bool,
    /// Keep the short-range radio powered
    pub ble: bool,
}

/// One cycle's sleep request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SleepPolicy {
    /// Requested low-power mode
    pub mode: PowerMode,
    /// Peripherals to keep powered
    pub keep: PeripheralSet,
    /// Requested sleep duration
    pub duration_ms: u32,
}

impl Default for SleepPolicy {
    fn default() -> Self {
        Self {
            mode: PowerMode::UltraLowPower,
            keep: PeripheralSet {
                network: true,
                ble: true,
            },
            duration_ms: DEFAULT_SLEEP_MS,
        }
    }
}

/// Classified cause that ended a sleep interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WakeReason {
    /// Requested duration elapsed
    Timer,
    /// Edge on an external wake pin
    Gpio {
        /// Pin that fired
        pin: u8,
    },
    /// Inbound activity on the kept-powered network link
    Network,
    /// Anything the platform reports outside the cases above
    Other(u16),
}

/// Power-management hardware driver
pub trait PowerControl {
    /// Block the whole process until a wake event, then classify it
    fn sleep(&mut self, policy: &SleepPolicy) -> WakeReason;

    /// Plain blocking delay (connect polling, degraded idle policy)
    fn delay_ms(&mut self, ms: u32);

    /// Immediate, unconditional device restart
    ///
    /// On hardware this does not return; fakes record the call instead.
    fn reset(&mut self);
}
