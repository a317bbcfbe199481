//! Long-haul uplink contract

/// Delivery options for one uplink transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublishFlags {
    /// Restrict visibility to the owning account
    pub private: bool,
    /// Request delivery acknowledgment from the transport
    pub require_ack: bool,
}

/// Connectivity and publish surface of the uplink stack
pub trait Uplink {
    /// Whether the uplink currently has a usable connection
    fn is_connected(&self) -> bool;

    /// Kick off a connection attempt (non-blocking; poll `is_connected`)
    fn connect(&mut self);

    /// Transmit one payload; `true` means the transport accepted it
    fn publish(&mut self, topic: &str, payload: &[u8], flags: PublishFlags) -> bool;
}
