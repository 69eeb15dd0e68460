use super::segment::{Run, Segmentation};
use crate::config::NextRunBound;
use crate::error::{SmootherError, SmootherResult};
use crate::types::ActivityType;

/// A run together with its neighbours in the pass snapshot
#[derive(Clone, Copy, Debug)]
pub struct RunContext<'a> {
    pub run: &'a Run,
    pub previous: Option<&'a Run>,
    pub next: Option<&'a Run>,
}

impl<'a> RunContext<'a> {
    /// Resolves neighbours from the segmentation as it stood at the start of
    /// the pass. Relabels applied later in the pass are not visible here.
    pub fn resolve(segmentation: &'a Segmentation, run: &'a Run, bound: NextRunBound) -> Self {
        let previous = if run.position > 1 {
            segmentation.at_position(run.position - 1)
        } else {
            None
        };
        let next = if bound.has_next(run.position, segmentation.len()) {
            segmentation.at_position(run.position + 1)
        } else {
            None
        };
        RunContext {
            run,
            previous,
            next,
        }
    }

    /// Whether the existing neighbours all carry `label`.
    ///
    /// With both neighbours present both must match; with only one present
    /// that one decides.
    pub fn surrounded_by(&self, label: ActivityType) -> SmootherResult<bool> {
        match (self.previous, self.next) {
            (Some(prev), Some(next)) => Ok(prev.label == label && next.label == label),
            (None, Some(next)) => Ok(next.label == label),
            (Some(prev), None) => Ok(prev.label == label),
            (None, None) => Err(SmootherError::ContextUnavailable {
                position: self.run.position,
            }),
        }
    }

    /// Label an insignificant run borrows: previous first, then next
    pub fn replacement_label(&self) -> SmootherResult<ActivityType> {
        self.previous
            .or(self.next)
            .map(|r| r.label)
            .ok_or(SmootherError::NoReplacementLabel {
                position: self.run.position,
            })
    }
}
