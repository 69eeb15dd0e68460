use crate::smoothing::{Correction, CorrectionRule, PassReport};
use crate::types::ActivityType;
use serde::Serialize;
use std::cell::RefCell;

/// Diagnostic record for one relabelled run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorrectionEvent {
    pub pass: usize,
    pub rule: CorrectionRule,
    pub position: usize,
    pub size: usize,
    pub from: ActivityType,
    pub to: ActivityType,
    pub average_speed_kmh: f64,
}

impl CorrectionEvent {
    pub fn from_correction(pass: usize, correction: &Correction) -> Self {
        CorrectionEvent {
            pass,
            rule: correction.rule,
            position: correction.position,
            size: correction.size,
            from: correction.from,
            to: correction.to,
            average_speed_kmh: correction.average_speed_kmh,
        }
    }
}

/// Receives smoother diagnostics. Every hook defaults to a no-op.
pub trait SmoothingObserver {
    fn pass_started(&self, _pass: usize, _sample_count: usize) {}

    /// Rule engine bypassed because the trajectory has too few runs
    fn pass_skipped(&self, _pass: usize, _run_count: usize) {}

    fn run_corrected(&self, _event: &CorrectionEvent) {}

    fn pass_completed(&self, _report: &PassReport) {}
}

/// Discards every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl SmoothingObserver for NullObserver {}

/// Forwards events to the `log` facade
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl SmoothingObserver for LogObserver {
    fn pass_started(&self, pass: usize, sample_count: usize) {
        log::debug!("[pass {}] starting with {} samples", pass, sample_count);
    }

    fn pass_skipped(&self, pass: usize, run_count: usize) {
        log::debug!(
            "[pass {}] only {} run(s), leaving labels unchanged",
            pass,
            run_count
        );
    }

    fn run_corrected(&self, event: &CorrectionEvent) {
        log::debug!(
            "[pass {}] rule {} run #{} ({} samples, {:.1} km/h): {} -> {}",
            event.pass,
            event.rule.id(),
            event.position,
            event.size,
            event.average_speed_kmh,
            event.from,
            event.to
        );
    }

    fn pass_completed(&self, report: &PassReport) {
        log::debug!(
            "[pass {}] done: {} runs, {} corrections, {}/{} samples kept",
            report.pass,
            report.run_count,
            report.corrections.len(),
            report.kept_samples,
            report.input_samples
        );
    }
}

/// Keeps correction events in memory for later inspection. Events are still
/// forwarded to [`LogObserver`].
#[derive(Debug, Default)]
pub struct RecordingObserver {
    log: LogObserver,
    events: RefCell<Vec<CorrectionEvent>>,
    skipped_passes: RefCell<Vec<usize>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CorrectionEvent> {
        self.events.borrow().clone()
    }

    pub fn skipped_passes(&self) -> Vec<usize> {
        self.skipped_passes.borrow().clone()
    }
}

impl SmoothingObserver for RecordingObserver {
    fn pass_started(&self, pass: usize, sample_count: usize) {
        self.log.pass_started(pass, sample_count);
    }

    fn pass_skipped(&self, pass: usize, run_count: usize) {
        self.log.pass_skipped(pass, run_count);
        self.skipped_passes.borrow_mut().push(pass);
    }

    fn run_corrected(&self, event: &CorrectionEvent) {
        self.log.run_corrected(event);
        self.events.borrow_mut().push(event.clone());
    }

    fn pass_completed(&self, report: &PassReport) {
        self.log.pass_completed(report);
    }
}
