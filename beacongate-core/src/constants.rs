//! Reference limits and defaults for the beacon pipeline
//!
//! Centralizes the numbers the rest of the crate keys off: scan buffer
//! sizing, the uplink chunk limit, and the duty-cycle timing defaults.
//! Values mirror the field hardware this core was written for.

/// Maximum number of scan results accepted in one window
///
/// The scan buffer is sized to this; the radio driver can never hand the
/// pipeline more results than fit here.
pub const SCAN_RESULT_MAX: usize = 30;

/// Maximum advertisement payload length the radio can deliver
pub const MAX_ADV_DATA_LEN: usize = 31;

/// Maximum byte size the uplink accepts in one transmission
pub const PUBLISH_CHUNK: usize = 622;

/// Serialization buffer capacity
///
/// Chunk limit rounded up to a 4-byte boundary plus a little header slack,
/// so the writer can run slightly past the chunk limit and the publisher
/// can detect the overflow before clamping.
pub const REPORT_BUF_LEN: usize = ((PUBLISH_CHUNK + 8) / 4) * 4;

/// Report map capacity (power of two, >= [`SCAN_RESULT_MAX`])
pub const REPORT_ENTRY_MAX: usize = 32;

/// A serialized report at or below this length holds no entries
///
/// An empty JSON object is 2 bytes; anything this short is skipped rather
/// than transmitted.
pub const EMPTY_REPORT_MAX_LEN: usize = 4;

/// Default bounded scan timeout
pub const DEFAULT_SCAN_TIMEOUT_MS: u32 = 500;

/// Default wait between connectivity re-checks while disconnected
pub const DEFAULT_CONNECT_POLL_MS: u32 = 3_000;

/// Default low-power sleep duration between cycles
pub const DEFAULT_SLEEP_MS: u32 = 12_000;

/// Default busy-delay between cycles when low-power sleep is disabled
pub const DEFAULT_IDLE_DELAY_MS: u32 = 12_000;

/// Default uplink topic for aggregated beacon reports
pub const DEFAULT_TOPIC: &str = "bcnz";
