//! Error types for the publish path
//!
//! The per-cycle pipeline absorbs almost everything locally: decode
//! rejects are silent drops, an empty scan window is a warning, and a
//! report that outgrows the chunk limit is clamped. The only error that
//! crosses a component boundary is a transport refusal from the uplink —
//! and even that is terminal only for the one report (no retry, no
//! re-queue). Errors stay small and `Copy` so they can be returned from
//! the hot path without ceremony.

use thiserror_no_std::Error;

/// Result type for publish operations
pub type PublishResult<T> = Result<T, PublishError>;

/// Failure to hand a serialized report to the uplink
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    /// The transport refused or failed to acknowledge the transmission.
    ///
    /// The report for this cycle is lost; the next cycle starts fresh.
    #[error("uplink rejected report ({len} bytes)")]
    Transport {
        /// Byte length of the payload the uplink refused
        len: usize,
    },
}
