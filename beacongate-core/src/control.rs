//! Control surface for the remote operator
//!
//! Thin pass-throughs: a `reset` command that restarts the device
//! immediately and unconditionally, and read-only `maxValue`/`minValue`
//! variables backed by the session extrema. No validation beyond that.
//!
//! Registration happens once at startup against the platform's
//! [`ControlRegistry`]; dispatch is a pure function the embedding
//! application calls when the platform hands it a request (between cycles
//! — nothing runs during sleep).

use crate::aggregate::ExtremaState;
use crate::codec::BeaconValue;
use crate::traits::{ControlRegistry, PowerControl};

/// Name of the remote restart command
pub const RESET_COMMAND: &str = "reset";
/// Name of the running-maximum variable
pub const MAX_VALUE_VAR: &str = "maxValue";
/// Name of the running-minimum variable
pub const MIN_VALUE_VAR: &str = "minValue";

/// An inbound operator request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    /// Restart the device, no confirmation, no flushing
    Reset,
    /// Read the largest value observed this session
    ReadMaxValue,
    /// Read the smallest value observed this session
    ReadMinValue,
}

/// Answer to an operator request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlReply {
    /// Command accepted (on hardware, reset preempts this reply)
    Ack,
    /// Variable readout
    Value(f64),
}

/// Register the command and variables with the platform
pub fn register<C: ControlRegistry>(registry: &mut C) -> Result<(), C::Error> {
    registry.register_command(RESET_COMMAND)?;
    registry.register_variable(MAX_VALUE_VAR)?;
    registry.register_variable(MIN_VALUE_VAR)
}

/// Handle one operator request
///
/// Variable reads report 0.0 until the first beacon of the session has
/// been decoded.
pub fn dispatch<V: BeaconValue, P: PowerControl>(
    request: ControlRequest,
    extrema: &ExtremaState<V>,
    power: &mut P,
) -> ControlReply {
    match request {
        ControlRequest::Reset => {
            log::info!("reset on network command");
            power.reset();
            ControlReply::Ack
        }
        ControlRequest::ReadMaxValue => {
            ControlReply::Value(extrema.max().map_or(0.0, BeaconValue::as_f64))
        }
        ControlRequest::ReadMinValue => {
            ControlReply::Value(extrema.min().map_or(0.0, BeaconValue::as_f64))
        }
    }
}
