//! Scan-window aggregation and session extrema
//!
//! Folds the decoded readings of one scan window into a bounded
//! [`AggregateReport`] and keeps the session-lifetime [`ExtremaState`] up
//! to date. The report map is owned by the [`Aggregator`] and reused cycle
//! to cycle; `begin_cycle` clears it so nothing from the previous window
//! leaks into the next report.
//!
//! Duplicate addresses within one window overwrite by key: the last
//! observation wins, the entry keeps its first-seen position. Entry count
//! is capped upstream by the scan buffer, so the map never sees more than
//! one window's worth of addresses.

use heapless::FnvIndexMap;

use crate::beacon::BeaconAddr;
use crate::codec::BeaconValue;
use crate::constants::REPORT_ENTRY_MAX;

/// Running maximum and minimum of all decoded values since process start
///
/// Monotonic for the process lifetime: the maximum never decreases and the
/// minimum never increases. Both start unset and are seeded by the first
/// observed value; there is no windowed reset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtremaState<V: BeaconValue> {
    max: Option<V>,
    min: Option<V>,
}

impl<V: BeaconValue> ExtremaState<V> {
    /// Fresh state with no observations
    pub const fn new() -> Self {
        Self {
            max: None,
            min: None,
        }
    }

    /// Fold one decoded value into the extrema
    pub fn observe(&mut self, value: V) {
        match self.max {
            Some(max) if !(value > max) => {}
            _ => self.max = Some(value),
        }
        match self.min {
            Some(min) if !(value < min) => {}
            _ => self.min = Some(value),
        }
    }

    /// Largest value observed so far, if any
    pub fn max(&self) -> Option<V> {
        self.max
    }

    /// Smallest value observed so far, if any
    pub fn min(&self) -> Option<V> {
        self.min
    }
}

/// Per-beacon slot in an aggregate report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportEntry<V: BeaconValue> {
    /// Decoded payload value
    pub value: V,
    /// Signal strength of the sighting that produced the value
    pub rssi: i8,
}

/// One scan window's readings, keyed by beacon address
///
/// Insertion-ordered and bounded: never more entries than scan results in
/// the window, and its serialized form is clamped to the transport chunk
/// limit by the publisher.
#[derive(Debug, Default)]
pub struct AggregateReport<V: BeaconValue> {
    entries: FnvIndexMap<BeaconAddr, ReportEntry<V>, REPORT_ENTRY_MAX>,
}

impl<V: BeaconValue> AggregateReport<V> {
    /// Empty report
    pub fn new() -> Self {
        Self {
            entries: FnvIndexMap::new(),
        }
    }

    /// Number of beacons in the report
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the window produced no valid readings
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a specific beacon, if it was seen this window
    pub fn get(&self, addr: &BeaconAddr) -> Option<&ReportEntry<V>> {
        self.entries.get(addr)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&BeaconAddr, &ReportEntry<V>)> {
        self.entries.iter()
    }
}

/// Owner of the reused report map and the session extrema
///
/// The session context the scheduler threads through each cycle; nothing
/// here is ambient or global.
#[derive(Debug, Default)]
pub struct Aggregator<V: BeaconValue> {
    extrema: ExtremaState<V>,
    report: AggregateReport<V>,
}

impl<V: BeaconValue> Aggregator<V> {
    /// Aggregator with empty extrema and report
    pub fn new() -> Self {
        Self {
            extrema: ExtremaState::new(),
            report: AggregateReport::new(),
        }
    }

    /// Start a new scan window
    ///
    /// Clears the reused report map; the extrema carry over untouched.
    pub fn begin_cycle(&mut self) -> ReportBuilder<'_, V> {
        self.report.entries.clear();
        ReportBuilder {
            report: &mut self.report,
            extrema: &mut self.extrema,
        }
    }

    /// Report built by the most recent window
    pub fn report(&self) -> &AggregateReport<V> {
        &self.report
    }

    /// Session extrema, read-only
    pub fn extrema(&self) -> &ExtremaState<V> {
        &self.extrema
    }
}

/// Collects one window's readings into the aggregator's report
pub struct ReportBuilder<'a, V: BeaconValue> {
    report: &'a mut AggregateReport<V>,
    extrema: &'a mut ExtremaState<V>,
}

impl<'a, V: BeaconValue> ReportBuilder<'a, V> {
    /// Fold one decoded reading into the report and the extrema
    ///
    /// A repeated address overwrites its earlier entry (last seen wins).
    pub fn observe(&mut self, addr: BeaconAddr, value: V, rssi: i8) {
        self.extrema.observe(value);
        // Capacity exceeds the scan maximum, so this only fails if the
        // upstream cap is violated; the reading is dropped in that case.
        let _ = self.report.entries.insert(addr, ReportEntry { value, rssi });
    }

    /// Current number of entries collected
    pub fn len(&self) -> usize {
        self.report.len()
    }

    /// Whether nothing has been observed yet this window
    pub fn is_empty(&self) -> bool {
        self.report.is_empty()
    }

    /// Finish the window and hand back the aggregate report
    pub fn finish(self) -> &'a AggregateReport<V> {
        self.report
    }
}
