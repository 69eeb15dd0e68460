use super::context::RunContext;
use crate::config::SmoothingConfig;
use crate::error::SmootherResult;
use crate::types::ActivityType;
use serde::Serialize;
use std::ops::Range;

/// Noise patterns, in evaluation order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CorrectionRule {
    /// Fast walking between two vehicle runs
    #[serde(rename = "A")]
    WalkingInVehicle,
    /// Fast walking between two bicycle runs
    #[serde(rename = "B")]
    WalkingInCycling,
    /// Vehicle blip between two bicycle runs
    #[serde(rename = "C")]
    VehicleInCycling,
    /// Run too short to be trusted
    #[serde(rename = "D")]
    Insignificant,
}

impl CorrectionRule {
    pub fn id(&self) -> &'static str {
        match self {
            CorrectionRule::WalkingInVehicle => "A",
            CorrectionRule::WalkingInCycling => "B",
            CorrectionRule::VehicleInCycling => "C",
            CorrectionRule::Insignificant => "D",
        }
    }
}

/// Relabel decided for one run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Correction {
    pub rule: CorrectionRule,
    pub position: usize,
    pub size: usize,
    #[serde(skip)]
    pub samples: Range<usize>,
    pub from: ActivityType,
    pub to: ActivityType,
    pub average_speed_kmh: f64,
}

/// First matching rule wins; `None` leaves the run as it is.
///
/// Neighbour checks only run once the label test passed, so a run that
/// cannot match a rule never touches its context.
pub fn evaluate(
    ctx: &RunContext<'_>,
    config: &SmoothingConfig,
) -> SmootherResult<Option<Correction>> {
    let run = ctx.run;
    let fast = run.average_speed_kmh > config.max_walking_speed_kmh;

    let decision = if run.label.is_on_foot() && ctx.surrounded_by(ActivityType::InVehicle)? && fast
    {
        Some((CorrectionRule::WalkingInVehicle, ActivityType::InVehicle))
    } else if run.label.is_on_foot() && ctx.surrounded_by(ActivityType::OnBicycle)? && fast {
        Some((CorrectionRule::WalkingInCycling, ActivityType::OnBicycle))
    } else if run.label == ActivityType::InVehicle && ctx.surrounded_by(ActivityType::OnBicycle)? {
        Some((CorrectionRule::VehicleInCycling, ActivityType::OnBicycle))
    } else if run.size() < config.significance_threshold {
        Some((CorrectionRule::Insignificant, ctx.replacement_label()?))
    } else {
        None
    };

    Ok(decision.map(|(rule, to)| Correction {
        rule,
        position: run.position,
        size: run.size(),
        samples: run.samples.clone(),
        from: run.label,
        to,
        average_speed_kmh: run.average_speed_kmh,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NextRunBound;
    use crate::error::SmootherError;
    use crate::smoothing::fixtures::trip;
    use crate::smoothing::segment::Segmentation;
    use ActivityType::*;

    fn decide(blocks: &[(ActivityType, usize, f64)], position: usize) -> Option<Correction> {
        let seg = Segmentation::from_samples(&trip(blocks));
        let run = seg.at_position(position).unwrap();
        let ctx = RunContext::resolve(&seg, run, NextRunBound::LastRun);
        evaluate(&ctx, &SmoothingConfig::default()).unwrap()
    }

    #[test]
    fn test_rule_a_fast_walking_in_vehicle() {
        let c = decide(
            &[(InVehicle, 15, 80.0), (Walking, 2, 20.0), (InVehicle, 15, 80.0)],
            2,
        )
        .unwrap();
        assert_eq!(c.rule, CorrectionRule::WalkingInVehicle);
        assert_eq!(c.to, InVehicle);
        assert_eq!(c.samples, 15..17);
    }

    #[test]
    fn test_rule_a_applies_to_on_foot_even_when_long() {
        let c = decide(
            &[(InVehicle, 15, 80.0), (OnFoot, 30, 12.0), (InVehicle, 15, 80.0)],
            2,
        )
        .unwrap();
        assert_eq!(c.rule, CorrectionRule::WalkingInVehicle);
    }

    #[test]
    fn test_slow_walking_between_vehicles_is_left_alone_when_significant() {
        let c = decide(
            &[(InVehicle, 15, 80.0), (Walking, 12, 4.0), (InVehicle, 15, 80.0)],
            2,
        );
        assert!(c.is_none());
    }

    #[test]
    fn test_speed_threshold_is_strict() {
        let c = decide(
            &[(InVehicle, 15, 80.0), (Walking, 12, 6.0), (InVehicle, 15, 80.0)],
            2,
        );
        assert!(c.is_none());
    }

    #[test]
    fn test_rule_b_fast_walking_in_cycling() {
        let c = decide(
            &[(OnBicycle, 15, 18.0), (Walking, 12, 14.0), (OnBicycle, 15, 18.0)],
            2,
        )
        .unwrap();
        assert_eq!(c.rule, CorrectionRule::WalkingInCycling);
        assert_eq!(c.to, OnBicycle);
    }

    #[test]
    fn test_rule_c_vehicle_in_cycling_ignores_speed() {
        let c = decide(
            &[(OnBicycle, 15, 18.0), (InVehicle, 25, 2.0), (OnBicycle, 15, 18.0)],
            2,
        )
        .unwrap();
        assert_eq!(c.rule, CorrectionRule::VehicleInCycling);
        assert_eq!(c.from, InVehicle);
        assert_eq!(c.to, OnBicycle);
    }

    #[test]
    fn test_rule_d_borrows_previous_label() {
        let c = decide(
            &[(InVehicle, 20, 50.0), (OnBicycle, 3, 50.0), (InVehicle, 20, 50.0)],
            2,
        )
        .unwrap();
        assert_eq!(c.rule, CorrectionRule::Insignificant);
        assert_eq!(c.to, InVehicle);
    }

    #[test]
    fn test_rule_d_first_run_borrows_next_label() {
        let c = decide(
            &[(Walking, 3, 4.0), (InVehicle, 20, 50.0), (OnBicycle, 20, 15.0)],
            1,
        )
        .unwrap();
        assert_eq!(c.rule, CorrectionRule::Insignificant);
        assert_eq!(c.to, InVehicle);
    }

    #[test]
    fn test_earlier_rule_wins() {
        // short fast walk between vehicles: rule A fires, not rule D
        let c = decide(
            &[(InVehicle, 15, 80.0), (Walking, 2, 20.0), (InVehicle, 15, 80.0)],
            2,
        )
        .unwrap();
        assert_eq!(c.rule.id(), "A");

        // short slow walk between vehicles: only rule D applies
        let c = decide(
            &[(InVehicle, 15, 80.0), (Walking, 2, 3.0), (InVehicle, 15, 80.0)],
            2,
        )
        .unwrap();
        assert_eq!(c.rule.id(), "D");
        assert_eq!(c.to, InVehicle);
    }

    #[test]
    fn test_running_is_not_on_foot() {
        let c = decide(
            &[(InVehicle, 15, 80.0), (Running, 12, 14.0), (InVehicle, 15, 80.0)],
            2,
        );
        assert!(c.is_none());
    }

    #[test]
    fn test_lone_insignificant_run_fails() {
        let seg = Segmentation::from_samples(&trip(&[(OnBicycle, 3, 15.0)]));
        let ctx = RunContext::resolve(&seg, &seg.runs()[0], NextRunBound::LastRun);
        assert_eq!(
            evaluate(&ctx, &SmoothingConfig::default()),
            Err(SmootherError::NoReplacementLabel { position: 1 })
        );
    }

    #[test]
    fn test_lone_walking_run_fails_on_context() {
        let seg = Segmentation::from_samples(&trip(&[(Walking, 30, 4.0)]));
        let ctx = RunContext::resolve(&seg, &seg.runs()[0], NextRunBound::LastRun);
        assert_eq!(
            evaluate(&ctx, &SmoothingConfig::default()),
            Err(SmootherError::ContextUnavailable { position: 1 })
        );
    }

    #[test]
    fn test_rule_serializes_as_id() {
        for rule in [
            CorrectionRule::WalkingInVehicle,
            CorrectionRule::WalkingInCycling,
            CorrectionRule::VehicleInCycling,
            CorrectionRule::Insignificant,
        ] {
            assert_eq!(serde_json::to_value(rule).unwrap(), rule.id());
        }

        let c = decide(
            &[(InVehicle, 20, 50.0), (OnBicycle, 3, 50.0), (InVehicle, 20, 50.0)],
            2,
        )
        .unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["rule"], "D");
        assert_eq!(json["from"], "on_bicycle");
        assert!(json.get("samples").is_none());
    }
}
