use serde::{Deserialize, Serialize};

/// Lifecycle counters kept per server unit.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub starts: u64,
    pub stops: u64,
    pub process_calls: u64,
    /// Process calls that waited for their duration
    pub delayed_calls: u64,
    /// Process calls that returned immediately (elapsed time above threshold)
    pub skipped_delays: u64,
    /// Sum of every drawn duration, never reset
    pub total_drawn: u64,
    pub interruptions: u64,
}

impl UnitStats {
    pub fn record_start(&mut self) {
        self.starts += 1;
    }

    pub fn record_stop(&mut self) {
        self.stops += 1;
    }

    pub fn record_process(&mut self, duration: u64) {
        self.process_calls += 1;
        self.total_drawn += duration;
    }

    pub fn record_delayed(&mut self) {
        self.delayed_calls += 1;
    }

    pub fn record_skipped_delay(&mut self) {
        self.skipped_delays += 1;
    }

    pub fn record_interruption(&mut self) {
        self.interruptions += 1;
    }
}
