use crate::types::{ActivityType, Sample, MS_TO_KMH};
use std::ops::Range;

/// Maximal stretch of consecutive samples sharing one activity label
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub label: ActivityType,
    /// Indices into the normalized trajectory
    pub samples: Range<usize>,
    pub average_speed_kmh: f64,
    /// 1-based rank of the run in time order
    pub position: usize,
}

impl Run {
    pub fn size(&self) -> usize {
        self.samples.len()
    }
}

/// Run partition of one trajectory, computed fresh for every pass
#[derive(Clone, Debug, Default)]
pub struct Segmentation {
    runs: Vec<Run>,
    /// owner[i] is the index into `runs` of the run holding sample i
    owner: Vec<usize>,
}

impl Segmentation {
    /// Splits the trajectory wherever the label changes from one sample to
    /// the next.
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut runs: Vec<Run> = Vec::new();
        let mut owner = Vec::with_capacity(samples.len());
        let mut start = 0;

        for i in 1..=samples.len() {
            let boundary =
                i == samples.len() || samples[i].activity_type != samples[i - 1].activity_type;
            if !boundary {
                continue;
            }
            let members = &samples[start..i];
            let speed_sum: f64 = members.iter().map(|s| s.speed).sum();
            runs.push(Run {
                label: samples[start].activity_type,
                samples: start..i,
                average_speed_kmh: speed_sum / members.len() as f64 * MS_TO_KMH,
                position: runs.len() + 1,
            });
            owner.extend(std::iter::repeat(runs.len() - 1).take(members.len()));
            start = i;
        }

        Segmentation { runs, owner }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Run at a 1-based sequence position
    pub fn at_position(&self, position: usize) -> Option<&Run> {
        position.checked_sub(1).and_then(|idx| self.runs.get(idx))
    }

    /// Run owning the sample at `sample_index`
    pub fn run_of(&self, sample_index: usize) -> Option<&Run> {
        self.owner
            .get(sample_index)
            .and_then(|&idx| self.runs.get(idx))
    }

    /// Label sequence, one entry per run
    pub fn summary(&self) -> Vec<ActivityType> {
        self.runs.iter().map(|r| r.label).collect()
    }
}
