//! # Server Unit
//!
//! A server with `start`, `stop` and `process` lifecycle operations, driven
//! sequentially by a single caller.
//!
//! The unit tracks an elapsed-time counter. `start` and `stop` reset it;
//! `process` draws a duration, adds it, and waits for that duration while the
//! counter stays at or below the configured threshold.
//!
//! There are no guarded transitions: `process` after `stop`, or two `start`s
//! in a row, follow the same rules as any other call.

use std::sync::Arc;

use log::{debug, warn};

use crate::server::config::ProcessConfig;
use crate::server::durations::{DurationSource, RandomDurations};
use crate::server::error::{Result, ServerError};
use crate::server::id_issuer::IdIssuer;
use crate::server::metrics::UnitStats;
use crate::server::shutdown::{ShutdownSignal, WaitOutcome};
use crate::server::status::{LogSink, StatusEvent, StatusKind, StatusSink};

/// What a single `process` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReport {
    /// Drawn duration, in duration units
    pub duration: u64,
    /// Elapsed time after the call
    pub elapsed_time: u64,
    /// Whether the call waited for `duration`
    pub waited: bool,
}

pub struct ServerUnit {
    id: u32,
    elapsed_time: u64,
    settings: ProcessConfig,
    durations: Box<dyn DurationSource + Send>,
    sink: Arc<dyn StatusSink>,
    stats: UnitStats,
}

impl ServerUnit {
    /// Create a new server unit with the next identifier from `issuer`.
    ///
    /// # Errors
    /// [`ServerError::IdsExhausted`] when the issuer has no identifier left.
    ///
    /// # Example
    /// ```ignore
    /// let mut issuer = IdIssuer::default();
    /// let unit = ServerUnit::new(
    ///     &mut issuer,
    ///     ProcessConfig::default(),
    ///     Box::new(RandomDurations::from_entropy()),
    ///     Arc::new(LogSink),
    /// )?;
    /// ```
    pub fn new(
        issuer: &mut IdIssuer,
        settings: ProcessConfig,
        durations: Box<dyn DurationSource + Send>,
        sink: Arc<dyn StatusSink>,
    ) -> Result<Self> {
        let id = issuer.next_id()?;
        debug!(
            "Server {} created (max duration {}, delay threshold {}, {} ms per unit)",
            id, settings.max_duration, settings.delay_threshold, settings.time_unit_ms
        );

        Ok(Self {
            id,
            elapsed_time: 0,
            settings,
            durations,
            sink,
            stats: UnitStats::default(),
        })
    }

    /// Unit with default settings, random durations and log output.
    pub fn with_defaults(issuer: &mut IdIssuer) -> Result<Self> {
        Self::new(
            issuer,
            ProcessConfig::default(),
            Box::new(RandomDurations::from_entropy()),
            Arc::new(LogSink),
        )
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn elapsed_time(&self) -> u64 {
        self.elapsed_time
    }

    pub fn stats(&self) -> &UnitStats {
        &self.stats
    }

    pub fn start(&mut self) {
        self.emit(StatusKind::Starting);
        self.elapsed_time = 0;
        self.stats.record_start();
    }

    pub fn stop(&mut self) {
        self.emit(StatusKind::Stopping);
        self.elapsed_time = 0;
        self.stats.record_stop();
    }

    /// Run one unit of work.
    ///
    /// Draws a duration `d` in `[0, max_duration)`, announces it and adds it
    /// to the elapsed time. While the elapsed time is at most
    /// `delay_threshold` the call reports `processing` and waits
    /// `d × time_unit`; above it the call returns immediately.
    ///
    /// # Errors
    /// [`ServerError::Interrupted`] if `shutdown` fires during the wait. The
    /// elapsed time keeps the added duration.
    pub async fn process(&mut self, shutdown: &ShutdownSignal) -> Result<ProcessReport> {
        let duration = self.durations.next_duration(self.settings.max_duration);
        self.emit(StatusKind::WillRun(duration));

        self.elapsed_time = self.elapsed_time.saturating_add(duration);
        self.stats.record_process(duration);

        let mut report = ProcessReport {
            duration,
            elapsed_time: self.elapsed_time,
            waited: false,
        };

        if self.elapsed_time > self.settings.delay_threshold {
            debug!(
                "Server {} skipping wait: elapsed time {} above threshold {}",
                self.id, self.elapsed_time, self.settings.delay_threshold
            );
            self.stats.record_skipped_delay();
            return Ok(report);
        }

        self.emit(StatusKind::Processing);
        self.stats.record_delayed();

        match shutdown.sleep(self.settings.wait_for(duration)).await {
            WaitOutcome::Completed => {
                report.waited = true;
                Ok(report)
            }
            WaitOutcome::Cancelled => {
                warn!(
                    "⚠️  Server {} interrupted during {} sec of processing",
                    self.id, duration
                );
                self.stats.record_interruption();
                Err(ServerError::Interrupted {
                    id: self.id,
                    duration,
                })
            }
        }
    }

    fn emit(&self, kind: StatusKind) {
        self.sink.emit(&StatusEvent::new(self.id, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::durations::ScriptedDurations;
    use crate::server::status::RecordingSink;
    use std::time::Duration;
    use tokio::time::Instant;

    fn scripted_unit(issuer: &mut IdIssuer, script: Vec<u64>) -> (ServerUnit, RecordingSink) {
        let sink = RecordingSink::new();
        let unit = ServerUnit::new(
            issuer,
            ProcessConfig::default(),
            Box::new(ScriptedDurations::new(script)),
            Arc::new(sink.clone()),
        )
        .unwrap();
        (unit, sink)
    }

    #[test]
    fn test_new_unit() {
        let mut issuer = IdIssuer::new(5);
        let (unit, sink) = scripted_unit(&mut issuer, vec![]);

        assert_eq!(unit.id(), 5);
        assert_eq!(unit.elapsed_time(), 0);
        assert_eq!(issuer.peek(), Some(6));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_units_get_increasing_ids() {
        let mut issuer = IdIssuer::default();
        let first = ServerUnit::with_defaults(&mut issuer).unwrap();
        let second = ServerUnit::with_defaults(&mut issuer).unwrap();
        assert!(second.id() > first.id());
    }

    #[test]
    fn test_unit_at_last_identifier() {
        let mut issuer = IdIssuer::new(u32::MAX);

        let unit = ServerUnit::with_defaults(&mut issuer).unwrap();
        assert_eq!(unit.id(), u32::MAX);

        let next = ServerUnit::with_defaults(&mut issuer);
        assert!(matches!(next, Err(ServerError::IdsExhausted { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_process_below_threshold_waits() {
        let mut issuer = IdIssuer::default();
        let (mut unit, sink) = scripted_unit(&mut issuer, vec![2]);
        let shutdown = ShutdownSignal::new();
        let started = Instant::now();

        let report = unit.process(&shutdown).await.unwrap();

        assert_eq!(
            report,
            ProcessReport {
                duration: 2,
                elapsed_time: 2,
                waited: true
            }
        );
        let waited = started.elapsed();
        assert!(waited >= Duration::from_secs(2));
        assert!(waited < Duration::from_secs(3));
        assert_eq!(
            sink.lines(),
            vec!["Server 1 : Process will run for 2 sec", "Server 1 : processing"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_process_above_threshold_returns_immediately() {
        let mut issuer = IdIssuer::default();
        let (mut unit, sink) = scripted_unit(&mut issuer, vec![3, 4]);
        let shutdown = ShutdownSignal::new();

        unit.process(&shutdown).await.unwrap();
        let started = Instant::now();
        let report = unit.process(&shutdown).await.unwrap();

        assert_eq!(report.elapsed_time, 7);
        assert!(!report.waited);
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(
            sink.lines().last().map(String::as_str),
            Some("Server 1 : Process will run for 4 sec")
        );
        assert_eq!(unit.stats().skipped_delays, 1);
        assert_eq!(unit.stats().delayed_calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_threshold_is_inclusive() {
        let mut issuer = IdIssuer::default();
        let (mut unit, _sink) = scripted_unit(&mut issuer, vec![1, 2]);
        let shutdown = ShutdownSignal::new();

        unit.process(&shutdown).await.unwrap();
        let report = unit.process(&shutdown).await.unwrap();

        assert_eq!(report.elapsed_time, 3);
        assert!(report.waited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_still_reports_processing() {
        let mut issuer = IdIssuer::default();
        let (mut unit, sink) = scripted_unit(&mut issuer, vec![0]);
        let shutdown = ShutdownSignal::new();

        let report = unit.process(&shutdown).await.unwrap();

        assert_eq!(report.elapsed_time, 0);
        assert!(report.waited);
        assert_eq!(sink.lines().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop_reset_elapsed_time() {
        let mut issuer = IdIssuer::default();
        let (mut unit, sink) = scripted_unit(&mut issuer, vec![1, 4]);
        let shutdown = ShutdownSignal::new();

        unit.process(&shutdown).await.unwrap();
        assert_eq!(unit.elapsed_time(), 1);
        unit.start();
        assert_eq!(unit.elapsed_time(), 0);

        unit.process(&shutdown).await.unwrap();
        assert_eq!(unit.elapsed_time(), 4);
        unit.stop();
        assert_eq!(unit.elapsed_time(), 0);

        let lines = sink.lines();
        assert!(lines.contains(&"Server 1 : starting".to_string()));
        assert!(lines.contains(&"Server 1 : stopping".to_string()));
    }

    #[test]
    fn test_repeated_stop() {
        let mut issuer = IdIssuer::default();
        let (mut unit, sink) = scripted_unit(&mut issuer, vec![]);

        unit.stop();
        assert_eq!(unit.elapsed_time(), 0);
        unit.stop();
        assert_eq!(unit.elapsed_time(), 0);

        assert_eq!(
            sink.lines(),
            vec!["Server 1 : stopping", "Server 1 : stopping"]
        );
        assert_eq!(unit.stats().stops, 2);
    }

    #[tokio::test]
    async fn test_process_interrupted() {
        let mut issuer = IdIssuer::default();
        let (mut unit, sink) = scripted_unit(&mut issuer, vec![3]);
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();

        let err = unit.process(&shutdown).await.unwrap_err();

        assert!(matches!(
            err,
            ServerError::Interrupted { id: 1, duration: 3 }
        ));
        assert_eq!(unit.elapsed_time(), 3);
        assert_eq!(unit.stats().interruptions, 1);
        assert_eq!(sink.lines().last().map(String::as_str), Some("Server 1 : processing"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_process_interrupted_midway() {
        let mut issuer = IdIssuer::default();
        let (mut unit, _sink) = scripted_unit(&mut issuer, vec![3]);
        let shutdown = ShutdownSignal::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            trigger.trigger();
        });

        let result = unit.process(&shutdown).await;

        assert!(result.unwrap_err().is_interrupted());
    }

    #[tokio::test]
    async fn test_no_wait_means_no_interruption() {
        let mut issuer = IdIssuer::default();
        let (mut unit, _sink) = scripted_unit(&mut issuer, vec![4]);
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();

        let report = unit.process(&shutdown).await.unwrap();

        assert!(!report.waited);
    }

    #[tokio::test(start_paused = true)]
    async fn test_random_durations_keep_invariants() {
        let mut issuer = IdIssuer::default();
        let mut unit = ServerUnit::new(
            &mut issuer,
            ProcessConfig::default(),
            Box::new(RandomDurations::seeded(2024)),
            Arc::new(RecordingSink::new()),
        )
        .unwrap();
        let shutdown = ShutdownSignal::new();

        for round in 0..50 {
            let before = unit.elapsed_time();
            let report = unit.process(&shutdown).await.unwrap();
            assert!(report.duration < 5);
            assert_eq!(unit.elapsed_time(), before + report.duration);
            assert_eq!(report.waited, unit.elapsed_time() <= 3);
            if round % 3 == 0 {
                unit.start();
                assert_eq!(unit.elapsed_time(), 0);
            }
        }
    }
}
