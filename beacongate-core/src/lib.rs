//! Core beacon pipeline for beacongate
//!
//! Handles the decode → aggregate → publish pipeline for short-range radio
//! beacons, plus the duty-cycle scheduler that drives it. Designed for
//! battery/solar field hardware with tight resource budgets.
//!
//! Key constraints:
//! - No heap allocation in the per-cycle path (heapless buffers throughout)
//! - Single logical thread of control; no locks
//! - Every per-cycle failure is absorbed locally, never fatal
//!
//! ```
//! use beacongate_core::codec::BeaconCodec;
//!
//! // 3-byte vendor header followed by a little-endian u32 payload
//! let payload = [0xFF, 0xFF, 0x55, 0x64, 0x00, 0x00, 0x00];
//! assert_eq!(BeaconCodec::<u32>::decode(&payload), Some(100));
//!
//! // Anything malformed is dropped without side effects
//! assert_eq!(BeaconCodec::<u32>::decode(&payload[..6]), None);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod beacon;
pub mod codec;
pub mod constants;
pub mod control;
pub mod errors;
pub mod publish;
pub mod scheduler;
pub mod traits;

// Public API
pub use aggregate::{AggregateReport, Aggregator, ExtremaState, ReportBuilder, ReportEntry};
pub use beacon::{BeaconAddr, DecodedReading, RawAdvertisement};
pub use codec::{BeaconCodec, BeaconValue, FRAME_HEADER};
pub use errors::{PublishError, PublishResult};
pub use publish::{PublishOutcome, ReportPublisher};
pub use scheduler::{CycleState, DutyCycle, SchedulerConfig};
pub use traits::{
    ControlRegistry, PowerControl, PublishFlags, RadioScanner, ScanBuffer, SleepPolicy, Uplink,
    WakeReason,
};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
