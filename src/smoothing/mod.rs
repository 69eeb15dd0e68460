//! Segment-based activity label smoothing.
//!
//! One pass runs filter -> normalize -> segment -> resolve context -> apply
//! rules. Context is resolved against the run partition as it stood at the
//! start of the pass, so a relabel is only seen by its neighbours in the
//! next pass. [`ActivitySmoother::smooth`] always runs [`PASSES`] passes.

pub mod context;
pub mod normalize;
pub mod rules;
pub mod sample_filter;
pub mod segment;

#[cfg(test)]
pub(crate) mod fixtures;

pub use context::RunContext;
pub use normalize::normalize;
pub use rules::{evaluate, Correction, CorrectionRule};
pub use sample_filter::filter_samples;
pub use segment::{Run, Segmentation};

use crate::config::SmoothingConfig;
use crate::error::SmootherResult;
use crate::observer::{CorrectionEvent, LogObserver, SmoothingObserver};
use crate::types::Sample;
use serde::Serialize;

/// Number of sweeps per trajectory
pub const PASSES: usize = 2;
/// Fewer runs than this leave no room to judge any run against its neighbours
pub const MIN_RUNS: usize = 3;

/// What happened during one pass
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PassReport {
    pub pass: usize,
    pub input_samples: usize,
    pub kept_samples: usize,
    pub run_count: usize,
    /// Rule engine bypassed by the minimum run guard
    pub skipped: bool,
    pub corrections: Vec<Correction>,
}

/// Smoothed trajectory plus per-pass reports
#[derive(Clone, Debug)]
pub struct SmoothingOutcome {
    pub samples: Vec<Sample>,
    pub passes: Vec<PassReport>,
}

impl SmoothingOutcome {
    pub fn correction_count(&self) -> usize {
        self.passes.iter().map(|p| p.corrections.len()).sum()
    }
}

/// Two-pass activity label smoother
pub struct ActivitySmoother<O: SmoothingObserver = LogObserver> {
    config: SmoothingConfig,
    observer: O,
}

impl ActivitySmoother<LogObserver> {
    pub fn new(config: SmoothingConfig) -> SmootherResult<Self> {
        Self::with_observer(config, LogObserver)
    }
}

impl<O: SmoothingObserver> ActivitySmoother<O> {
    pub fn with_observer(config: SmoothingConfig, observer: O) -> SmootherResult<Self> {
        config.validate()?;
        Ok(ActivitySmoother { config, observer })
    }

    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Runs both passes, feeding the first pass's output into the second.
    ///
    /// Any error aborts the whole call; the caller's samples are consumed and
    /// no partially corrected trajectory is returned.
    pub fn smooth(&self, samples: Vec<Sample>) -> SmootherResult<SmoothingOutcome> {
        let mut current = samples;
        let mut passes = Vec::with_capacity(PASSES);

        for pass in 1..=PASSES {
            let (next, report) = self.run_pass(pass, current)?;
            current = next;
            passes.push(report);
        }

        let outcome = SmoothingOutcome {
            samples: current,
            passes,
        };
        log::info!(
            "Smoothed trajectory: {} samples, {} corrections over {} passes",
            outcome.samples.len(),
            outcome.correction_count(),
            PASSES
        );
        Ok(outcome)
    }

    /// One filter/normalize/segment/correct sweep.
    ///
    /// All corrections are decided against the pass snapshot before any
    /// label is written back.
    pub fn run_pass(
        &self,
        pass: usize,
        samples: Vec<Sample>,
    ) -> SmootherResult<(Vec<Sample>, PassReport)> {
        let input_samples = samples.len();
        self.observer.pass_started(pass, input_samples);

        let filtered = filter_samples(samples, self.config.max_coordinate_accuracy_m);
        let mut trajectory = normalize(filtered);
        let segmentation = Segmentation::from_samples(&trajectory);

        let mut report = PassReport {
            pass,
            input_samples,
            kept_samples: trajectory.len(),
            run_count: segmentation.len(),
            skipped: false,
            corrections: Vec::new(),
        };

        if segmentation.len() < MIN_RUNS {
            report.skipped = true;
            self.observer.pass_skipped(pass, segmentation.len());
            self.observer.pass_completed(&report);
            return Ok((trajectory, report));
        }

        log::debug!("[pass {}] run summary: {:?}", pass, segmentation.summary());

        let mut corrections = Vec::new();
        for run in segmentation.runs() {
            let ctx = RunContext::resolve(&segmentation, run, self.config.next_run_bound);
            if let Some(correction) = evaluate(&ctx, &self.config)? {
                corrections.push(correction);
            }
        }

        for correction in &corrections {
            for sample in &mut trajectory[correction.samples.clone()] {
                sample.activity_type = correction.to;
            }
            self.observer
                .run_corrected(&CorrectionEvent::from_correction(pass, correction));
        }

        report.corrections = corrections;
        self.observer.pass_completed(&report);
        Ok((trajectory, report))
    }
}
