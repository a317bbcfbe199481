//! Collaborator contracts consumed by the core
//!
//! The pipeline never talks to hardware directly; it drives these four
//! seams and nothing else. Each trait mirrors the contract of an external
//! collaborator the core does not reimplement:
//!
//! - [`radio`] — the short-range scan driver
//! - [`uplink`] — the long-haul connectivity stack
//! - [`power`] — the power-management hardware driver
//! - [`control`] — the remote operator's registration surface
//!
//! Keeping the seams as traits is what makes the scheduler testable on a
//! desktop: the integration tests and the simulator crate inject fakes
//! where field firmware injects the platform drivers.

pub mod control;
pub mod power;
pub mod radio;
pub mod uplink;

pub use control::ControlRegistry;
pub use power::{PeripheralSet, PowerControl, PowerMode, SleepPolicy, WakeReason};
pub use radio::{RadioScanner, ScanBuffer};
pub use uplink::{PublishFlags, Uplink};
