//! Report serialization and uplink transmission
//!
//! Serializes an [`AggregateReport`] into a reused fixed-capacity buffer
//! and hands it to the uplink, once per cycle. The wire format is a JSON
//! object keyed by colon-hex beacon address:
//!
//! ```text
//! {"AA:BB:CC:DD:EE:FF":{"airq":100,"rssi":-42},...}
//! ```
//!
//! The buffer refuses writes past its capacity, so serialization can never
//! overflow; when the serialized length still exceeds the transport chunk
//! limit, the transmitted length is clamped to `limit - 1` and a warning
//! is emitted. The clamp can cut through the trailing entry — a known
//! truncation artifact of the format, left uncorrected.

use core::fmt::{self, Write};

use heapless::String;

use crate::aggregate::AggregateReport;
use crate::codec::BeaconValue;
use crate::constants::{DEFAULT_TOPIC, EMPTY_REPORT_MAX_LEN, PUBLISH_CHUNK, REPORT_BUF_LEN};
use crate::errors::{PublishError, PublishResult};
use crate::traits::{PublishFlags, Uplink};

/// Fixed-capacity serialization buffer, reused across cycles
pub type ReportBuf = String<REPORT_BUF_LEN>;

/// What a publish attempt did with the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Report held no entries; nothing was transmitted (not an error)
    Skipped,
    /// One transmission was attempted and accepted
    Sent {
        /// Bytes actually handed to the uplink
        bytes: usize,
        /// Whether the serialized report outgrew the chunk limit and was
        /// clamped to `PUBLISH_CHUNK - 1` bytes
        truncated: bool,
    },
}

/// Serializes aggregate reports and performs the single publish attempt
pub struct ReportPublisher {
    topic: &'static str,
    value_field: &'static str,
    buf: ReportBuf,
}

impl ReportPublisher {
    /// Publisher for a given topic and per-variant value field name
    ///
    /// The field name is `"airq"` for the u32 variant and `"custom"` for
    /// the f64 variant in the deployed fleets.
    pub fn new(topic: &'static str, value_field: &'static str) -> Self {
        Self {
            topic,
            value_field,
            buf: ReportBuf::new(),
        }
    }

    /// Publisher with the default topic and the u32 variant's field name
    pub fn airq() -> Self {
        Self::new(DEFAULT_TOPIC, "airq")
    }

    /// Serialize the report and attempt exactly one transmission
    ///
    /// An effectively empty report (nothing beyond the JSON braces) skips
    /// the uplink entirely. A transport refusal is logged and returned;
    /// the report is not re-queued.
    pub fn publish<V: BeaconValue, U: Uplink>(
        &mut self,
        report: &AggregateReport<V>,
        uplink: &mut U,
    ) -> PublishResult<PublishOutcome> {
        // The buffer is reused every cycle; stale bytes from the previous
        // report must not survive into this one.
        self.buf.clear();
        // A full write errors only at capacity; the buffer then holds a
        // valid prefix, which is all the clamp below ever transmits.
        let _ = write_report(&mut self.buf, report, self.value_field);

        let written = self.buf.len();
        if written <= EMPTY_REPORT_MAX_LEN {
            return Ok(PublishOutcome::Skipped);
        }

        let truncated = written > PUBLISH_CHUNK;
        let send_len = if truncated {
            log::warn!("report size excessive: {written}");
            PUBLISH_CHUNK - 1
        } else {
            written
        };

        let payload = &self.buf.as_bytes()[..send_len];
        let flags = PublishFlags {
            private: true,
            require_ack: true,
        };
        if uplink.publish(self.topic, payload, flags) {
            Ok(PublishOutcome::Sent {
                bytes: send_len,
                truncated,
            })
        } else {
            Err(PublishError::Transport { len: send_len })
        }
    }
}

impl Default for ReportPublisher {
    fn default() -> Self {
        Self::airq()
    }
}

/// Write the report as a JSON object, stopping at the writer's capacity
fn write_report<V: BeaconValue, W: Write>(
    out: &mut W,
    report: &AggregateReport<V>,
    value_field: &str,
) -> fmt::Result {
    out.write_char('{')?;
    for (idx, (addr, entry)) in report.iter().enumerate() {
        if idx > 0 {
            out.write_char(',')?;
        }
        write!(
            out,
            "\"{}\":{{\"{}\":{},\"rssi\":{}}}",
            addr, value_field, entry.value, entry.rssi
        )?;
    }
    out.write_char('}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregator;
    use crate::beacon::BeaconAddr;

    // `String` is the heapless buffer in this module's scope
    use std::string::String as StdString;

    #[derive(Default)]
    struct RecordingUplink {
        accept: bool,
        sent: Vec<(StdString, Vec<u8>, PublishFlags)>,
    }

    impl RecordingUplink {
        fn accepting() -> Self {
            Self {
                accept: true,
                sent: Vec::new(),
            }
        }
    }

    impl Uplink for RecordingUplink {
        fn is_connected(&self) -> bool {
            true
        }

        fn connect(&mut self) {}

        fn publish(&mut self, topic: &str, payload: &[u8], flags: PublishFlags) -> bool {
            self.sent.push((topic.into(), payload.to_vec(), flags));
            self.accept
        }
    }

    fn addr(last: u8) -> BeaconAddr {
        BeaconAddr([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, last])
    }

    #[test]
    fn empty_report_skips_transmission() {
        let agg = Aggregator::<u32>::new();
        let mut uplink = RecordingUplink::accepting();
        let mut publisher = ReportPublisher::airq();

        let outcome = publisher.publish(agg.report(), &mut uplink).unwrap();
        assert_eq!(outcome, PublishOutcome::Skipped);
        assert!(uplink.sent.is_empty());
    }

    #[test]
    fn small_report_publishes_valid_json() {
        let mut agg = Aggregator::<u32>::new();
        let mut builder = agg.begin_cycle();
        builder.observe(addr(0x01), 100, -42);
        builder.observe(addr(0x02), 7, -70);
        builder.finish();

        let mut uplink = RecordingUplink::accepting();
        let mut publisher = ReportPublisher::airq();
        let outcome = publisher.publish(agg.report(), &mut uplink).unwrap();

        assert!(matches!(
            outcome,
            PublishOutcome::Sent {
                truncated: false,
                ..
            }
        ));
        let (topic, payload, flags) = &uplink.sent[0];
        assert_eq!(topic, "bcnz");
        assert!(flags.private && flags.require_ack);

        let parsed: serde_json::Value = serde_json::from_slice(payload).unwrap();
        assert_eq!(parsed["AA:BB:CC:DD:EE:01"]["airq"], 100);
        assert_eq!(parsed["AA:BB:CC:DD:EE:01"]["rssi"], -42);
        assert_eq!(parsed["AA:BB:CC:DD:EE:02"]["airq"], 7);
    }

    #[test]
    fn float_variant_uses_its_field_name() {
        let mut agg = Aggregator::<f64>::new();
        let mut builder = agg.begin_cycle();
        builder.observe(addr(0x03), 4.5, -55);
        builder.finish();

        let mut uplink = RecordingUplink::accepting();
        let mut publisher = ReportPublisher::new(DEFAULT_TOPIC, "custom");
        publisher.publish(agg.report(), &mut uplink).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_slice(&uplink.sent[0].1).unwrap();
        assert_eq!(parsed["AA:BB:CC:DD:EE:03"]["custom"], 4.5);
    }

    #[test]
    fn oversized_report_clamps_to_limit_minus_one() {
        let mut agg = Aggregator::<u32>::new();
        let mut builder = agg.begin_cycle();
        // 30 max-width entries serialize well past the chunk limit
        for i in 0..30 {
            builder.observe(addr(i), u32::MAX, -99);
        }
        builder.finish();

        let mut uplink = RecordingUplink::accepting();
        let mut publisher = ReportPublisher::airq();
        let outcome = publisher.publish(agg.report(), &mut uplink).unwrap();

        assert_eq!(
            outcome,
            PublishOutcome::Sent {
                bytes: PUBLISH_CHUNK - 1,
                truncated: true,
            }
        );
        assert_eq!(uplink.sent[0].1.len(), PUBLISH_CHUNK - 1);
    }

    #[test]
    fn transport_refusal_is_reported_once() {
        let mut agg = Aggregator::<u32>::new();
        let mut builder = agg.begin_cycle();
        builder.observe(addr(0x01), 1, -40);
        builder.finish();

        let mut uplink = RecordingUplink::default(); // refuses
        let mut publisher = ReportPublisher::airq();
        let err = publisher.publish(agg.report(), &mut uplink).unwrap_err();

        assert!(matches!(err, PublishError::Transport { .. }));
        // Exactly one attempt, no retry
        assert_eq!(uplink.sent.len(), 1);
    }

    #[test]
    fn buffer_reuse_leaves_no_stale_bytes() {
        let mut agg = Aggregator::<u32>::new();
        let mut builder = agg.begin_cycle();
        for i in 0..10 {
            builder.observe(addr(i), 1_000_000 + u32::from(i), -40);
        }
        builder.finish();

        let mut uplink = RecordingUplink::accepting();
        let mut publisher = ReportPublisher::airq();
        publisher.publish(agg.report(), &mut uplink).unwrap();

        // A much smaller second cycle must serialize standalone
        let mut builder = agg.begin_cycle();
        builder.observe(addr(0x20), 5, -45);
        builder.finish();
        publisher.publish(agg.report(), &mut uplink).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_slice(&uplink.sent[1].1).unwrap();
        let obj = parsed.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(parsed["AA:BB:CC:DD:EE:20"]["airq"], 5);
    }
}
