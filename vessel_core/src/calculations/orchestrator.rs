//! # Calculation Orchestrator
//!
//! Composes the geometry formulas and the corrosion/life policy into one
//! fully-traced bundle per vessel component, with a pass/marginal/fail
//! determination.
//!
//! The orchestrator is a state machine per invocation, not a persistent
//! object: it validates head prerequisites, computes the two load-bearing
//! results (required thickness and MAWP), derives the corrosion allowance
//! when absent, then runs the best-effort life calculations for whatever
//! inputs are present. A sub-calculation that fails (or is skipped for
//! missing inputs) never erases another's valid result.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::calculations::input::CalculationInput;
//! use vessel_core::calculations::orchestrator::{evaluate, FitnessStatus};
//! use vessel_core::config::EngineConfig;
//!
//! let input = CalculationInput {
//!     label: "V-101 Shell".to_string(),
//!     inside_diameter_in: Some(48.0),
//!     design_pressure_psi: 150.0,
//!     design_temperature_f: 100.0,
//!     material_spec: "SA-516 Gr 70".to_string(),
//!     joint_efficiency: 1.0,
//!     nominal_thickness_in: Some(0.5),
//!     current_thickness_in: Some(0.45),
//!     year_built: Some(2010),
//!     ..Default::default()
//! };
//!
//! let bundle = evaluate(&input, &EngineConfig::default());
//! assert!(bundle.success);
//! assert_eq!(bundle.summary.status, FitnessStatus::Acceptable);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;

use super::corrosion::{
    self, GoverningRate, IntervalClassification, RemainingLife,
};
use super::heads;
use super::input::{CalculationInput, ComponentKind};
use super::result::{CalculationResult, RateBasis, Warning};
use super::shell;

/// Overall fitness determination for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitnessStatus {
    /// Thickness above minimum and at least four years of remaining life
    Acceptable,
    /// Remaining life between two and four years
    Marginal,
    /// Thickness at/below minimum, remaining life under two years, or a
    /// load-bearing calculation failed
    Unacceptable,
}

impl FitnessStatus {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FitnessStatus::Acceptable => "Acceptable",
            FitnessStatus::Marginal => "Marginal",
            FitnessStatus::Unacceptable => "Unacceptable",
        }
    }
}

impl std::fmt::Display for FitnessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Derived summary of a component evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSummary {
    /// Minimum required thickness (in)
    pub t_required_in: Option<f64>,
    /// MAWP at current thickness (psi)
    pub mawp_psi: Option<f64>,
    /// Corrosion allowance, supplied or derived (in)
    pub corrosion_allowance_in: Option<f64>,
    /// Governing corrosion rate (in/yr)
    pub governing_rate_in_per_yr: Option<f64>,
    /// Which measurement the governing rate came from
    pub governing_rate_basis: Option<RateBasis>,
    /// Remaining life, when computable
    pub remaining_life: Option<RemainingLife>,
    /// Next inspection interval (years)
    pub next_inspection_years: Option<f64>,
    /// Interval branch classification
    pub interval_classification: Option<IntervalClassification>,
    /// Overall determination
    pub status: FitnessStatus,
    /// Why the status is what it is
    pub status_reason: String,
}

/// The per-component bundle: every sub-calculation's full trace plus the
/// derived summary and the union of all warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullCalculationResult {
    /// Component label from the input
    pub label: String,
    /// Logical AND of the two load-bearing results (t_required, MAWP)
    pub success: bool,
    /// Minimum required thickness
    pub t_required: CalculationResult,
    /// MAWP at current thickness
    pub mawp: CalculationResult,
    /// Long-term corrosion rate, when inputs were present
    pub corrosion_rate_lt: Option<CalculationResult>,
    /// Short-term corrosion rate, when inputs were present
    pub corrosion_rate_st: Option<CalculationResult>,
    /// Remaining life, when a governing rate was available
    pub remaining_life: Option<CalculationResult>,
    /// Next inspection interval, when remaining life was computed
    pub next_inspection_interval: Option<CalculationResult>,
    /// Projected MAWP at the next inspection, when an interval was computed
    pub projected_mawp: Option<CalculationResult>,
    /// Derived summary
    pub summary: CalculationSummary,
    /// Union (deduplicated) of every sub-calculation's warnings
    pub warnings: Vec<Warning>,
}

/// Evaluate one component with the default engine configuration.
pub fn evaluate_with_defaults(input: &CalculationInput) -> FullCalculationResult {
    evaluate(input, &EngineConfig::default())
}

/// Evaluate one component: dispatch to the matching geometry formulas, run
/// the corrosion/life policy best-effort, and classify the overall status.
pub fn evaluate(input: &CalculationInput, config: &EngineConfig) -> FullCalculationResult {
    debug!(label = %input.label, component = ?input.component, "evaluating component");

    // Load-bearing results: required thickness and MAWP
    let (t_required, mawp) = match input.component {
        ComponentKind::Shell => (
            shell::required_thickness(input, config),
            shell::mawp(input, config),
        ),
        ComponentKind::Head => (
            heads::required_thickness(input, config),
            heads::mawp(input, config),
        ),
    };
    let success = t_required.success && mawp.success;

    // Corrosion allowance: derived when not supplied
    let mut orchestrator_warnings: Vec<Warning> = Vec::new();
    let corrosion_allowance_in = match input.corrosion_allowance_in {
        Some(ca) => Some(ca),
        None => match (input.current_thickness_in, t_required.result_value) {
            (Some(t_current), Some(t_req)) if t_required.success => {
                let allowance_in = (t_current - t_req).max(0.0);
                orchestrator_warnings.push(Warning::DerivedCorrosionAllowance { allowance_in });
                Some(allowance_in)
            }
            _ => None,
        },
    };

    // Best-effort policy chain: each step is independently skippable
    let corrosion_rate_lt = corrosion::has_long_term_inputs(input)
        .then(|| corrosion::long_term_rate(input));
    let corrosion_rate_st = corrosion::has_short_term_inputs(input)
        .then(|| corrosion::short_term_rate(input));

    let governing: Option<GoverningRate> =
        corrosion::governing_rate(corrosion_rate_lt.as_ref(), corrosion_rate_st.as_ref());

    let mut life: Option<RemainingLife> = None;
    let mut remaining_life_result: Option<CalculationResult> = None;
    if let (Some(rate), Some(t_req), true) =
        (governing.as_ref(), t_required.result_value, t_required.success)
    {
        if input.current_thickness_in.is_some() {
            let (value, result) = corrosion::remaining_life(input, t_req, rate);
            life = Some(value);
            remaining_life_result = Some(result);
        }
    }

    let mut next_inspection_years: Option<f64> = None;
    let mut interval_classification: Option<IntervalClassification> = None;
    let mut interval_result: Option<CalculationResult> = None;
    if let Some(life_value) = life.as_ref() {
        let (years, classification, result) = corrosion::next_inspection_interval(life_value);
        next_inspection_years = Some(years);
        interval_classification = Some(classification);
        interval_result = Some(result);
    }

    let projected_mawp = match (next_inspection_years, governing.as_ref()) {
        (Some(years), Some(rate)) => Some(corrosion::projected_mawp(input, years, rate)),
        _ => None,
    };

    // Overall status
    let (status, status_reason) = classify(input, &t_required, &mawp, life.as_ref());

    // Union of warnings from every sub-calculation, deduplicated
    let mut warnings = orchestrator_warnings;
    let sub_results = [
        Some(&t_required),
        Some(&mawp),
        corrosion_rate_lt.as_ref(),
        corrosion_rate_st.as_ref(),
        remaining_life_result.as_ref(),
        interval_result.as_ref(),
        projected_mawp.as_ref(),
    ];
    for result in sub_results.into_iter().flatten() {
        for warning in &result.warnings {
            if !warnings.contains(warning) {
                warnings.push(warning.clone());
            }
        }
    }

    let summary = CalculationSummary {
        t_required_in: t_required.result_value,
        mawp_psi: mawp.result_value,
        corrosion_allowance_in,
        governing_rate_in_per_yr: governing.as_ref().map(|g| g.rate_in_per_yr),
        governing_rate_basis: governing.as_ref().map(|g| g.basis),
        remaining_life: life,
        next_inspection_years,
        interval_classification,
        status,
        status_reason,
    };

    FullCalculationResult {
        label: input.label.clone(),
        success,
        t_required,
        mawp,
        corrosion_rate_lt,
        corrosion_rate_st,
        remaining_life: remaining_life_result,
        next_inspection_interval: interval_result,
        projected_mawp,
        summary,
        warnings,
    }
}

/// Classify the overall status from thickness margin and remaining life.
fn classify(
    input: &CalculationInput,
    t_required: &CalculationResult,
    mawp: &CalculationResult,
    life: Option<&RemainingLife>,
) -> (FitnessStatus, String) {
    if !t_required.success {
        return (
            FitnessStatus::Unacceptable,
            format!(
                "required thickness could not be computed: {}",
                t_required
                    .error_message
                    .as_deref()
                    .unwrap_or("unknown failure")
            ),
        );
    }
    if !mawp.success {
        return (
            FitnessStatus::Unacceptable,
            format!(
                "MAWP could not be computed: {}",
                mawp.error_message.as_deref().unwrap_or("unknown failure")
            ),
        );
    }

    let t_req = t_required.result_value.unwrap_or(0.0);
    if let Some(t_current) = input.current_thickness_in {
        if t_current < t_req {
            return (
                FitnessStatus::Unacceptable,
                format!(
                    "current thickness {:.4} in is below the required minimum {:.4} in",
                    t_current, t_req
                ),
            );
        }
    }

    match life {
        Some(RemainingLife::Years(years)) if *years < 2.0 => (
            FitnessStatus::Unacceptable,
            format!("remaining life {:.2} years is under the 2-year limit", years),
        ),
        Some(RemainingLife::Years(years)) if *years < 4.0 => (
            FitnessStatus::Marginal,
            format!(
                "remaining life {:.2} years is under the 4-year caution threshold",
                years
            ),
        ),
        Some(RemainingLife::Years(years)) => (
            FitnessStatus::Acceptable,
            format!("remaining life {:.1} years", years),
        ),
        Some(RemainingLife::Infinite) => (
            FitnessStatus::Acceptable,
            "no measurable corrosion; remaining life unbounded".to_string(),
        ),
        None => (
            FitnessStatus::Acceptable,
            "thickness above minimum; remaining life not evaluated".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::calculations::input::HeadType;
    use crate::calculations::result::ValidationStatus;

    fn full_input() -> CalculationInput {
        CalculationInput {
            label: "V-101 Shell Course 2".to_string(),
            component: ComponentKind::Shell,
            inside_diameter_in: Some(48.0),
            design_pressure_psi: 150.0,
            design_temperature_f: 100.0,
            material_spec: "SA-516 Gr 70".to_string(),
            joint_efficiency: 1.0,
            nominal_thickness_in: Some(0.5),
            current_thickness_in: Some(0.45),
            previous_thickness_in: Some(0.47),
            year_built: Some(2010),
            previous_inspection_date: NaiveDate::from_ymd_opt(2020, 6, 15),
            current_inspection_date: NaiveDate::from_ymd_opt(2025, 6, 15),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_evaluation_happy_path() {
        let bundle = evaluate(&full_input(), &EngineConfig::default());

        assert!(bundle.success);
        assert!(bundle.t_required.success);
        assert!(bundle.mawp.success);
        assert!(bundle.corrosion_rate_lt.is_some());
        assert!(bundle.corrosion_rate_st.is_some());
        assert!(bundle.remaining_life.is_some());
        assert!(bundle.next_inspection_interval.is_some());
        assert!(bundle.projected_mawp.is_some());

        // ST rate (0.02/5yr = 0.004) governs over LT (0.05/15 = 0.00333)
        let summary = &bundle.summary;
        assert_eq!(summary.governing_rate_basis, Some(RateBasis::ShortTerm));
        assert!((summary.governing_rate_in_per_yr.unwrap() - 0.004).abs() < 0.0001);

        // RL = (0.45 - 0.1808) / 0.004 = 67.3 years -> 10-year cap
        let rl = summary.remaining_life.unwrap().years().unwrap();
        assert!((rl - 67.3).abs() < 0.3);
        assert_eq!(summary.next_inspection_years, Some(10.0));
        assert_eq!(
            summary.interval_classification,
            Some(IntervalClassification::HalfLife)
        );
        assert_eq!(summary.status, FitnessStatus::Acceptable);
    }

    #[test]
    fn test_derived_corrosion_allowance_is_warned() {
        let bundle = evaluate(&full_input(), &EngineConfig::default());
        // CA = 0.45 - 0.1808 = 0.2692
        let ca = bundle.summary.corrosion_allowance_in.unwrap();
        assert!((ca - 0.2692).abs() < 0.0005);
        assert!(bundle.warnings.iter().any(|w| matches!(
            w,
            Warning::DerivedCorrosionAllowance { .. }
        )));

        // A supplied allowance is passed through without the warning
        let mut supplied = full_input();
        supplied.corrosion_allowance_in = Some(0.125);
        let bundle = evaluate(&supplied, &EngineConfig::default());
        assert_eq!(bundle.summary.corrosion_allowance_in, Some(0.125));
        assert!(!bundle.warnings.iter().any(|w| matches!(
            w,
            Warning::DerivedCorrosionAllowance { .. }
        )));
    }

    #[test]
    fn test_missing_life_inputs_skip_policy_chain() {
        let mut input = full_input();
        input.nominal_thickness_in = None;
        input.previous_thickness_in = None;
        input.year_built = None;

        let bundle = evaluate(&input, &EngineConfig::default());
        assert!(bundle.success);
        assert!(bundle.corrosion_rate_lt.is_none());
        assert!(bundle.corrosion_rate_st.is_none());
        assert!(bundle.remaining_life.is_none());
        assert!(bundle.next_inspection_interval.is_none());
        assert!(bundle.projected_mawp.is_none());
        assert_eq!(bundle.summary.status, FitnessStatus::Acceptable);
        assert!(bundle.summary.status_reason.contains("not evaluated"));
    }

    #[test]
    fn test_thickness_below_minimum_is_unacceptable() {
        let mut input = full_input();
        input.current_thickness_in = Some(0.15); // below t_required = 0.1808

        let bundle = evaluate(&input, &EngineConfig::default());
        // Load-bearing calcs still succeed; the judgement is in the summary
        assert!(bundle.success);
        assert_eq!(bundle.summary.status, FitnessStatus::Unacceptable);
        assert!(bundle.summary.status_reason.contains("below the required minimum"));

        // Remaining life reflects the immediate-action state
        let life = bundle.remaining_life.unwrap();
        assert_eq!(life.validation_status, ValidationStatus::Error);
        assert_eq!(life.result_value, Some(0.0));
        assert_eq!(bundle.summary.next_inspection_years, Some(0.0));
        assert_eq!(
            bundle.summary.interval_classification,
            Some(IntervalClassification::Immediate)
        );
    }

    #[test]
    fn test_short_remaining_life_classifications() {
        // Tune previous thickness so the ST rate dominates and RL lands in
        // the marginal band: rate = (0.6-0.45)/5 = 0.03 -> RL = 8.97... no;
        // use current 0.25: RL = (0.25-0.1808)/0.03 = 2.31 years
        let mut input = full_input();
        input.nominal_thickness_in = Some(0.65);
        input.current_thickness_in = Some(0.25);
        input.previous_thickness_in = Some(0.4);
        let bundle = evaluate(&input, &EngineConfig::default());
        assert_eq!(bundle.summary.status, FitnessStatus::Marginal);
        assert_eq!(
            bundle.summary.interval_classification,
            Some(IntervalClassification::FixedTwoYear)
        );

        // Faster corrosion: RL = (0.25-0.1808)/0.06 = 1.15 years
        input.previous_thickness_in = Some(0.55);
        let bundle = evaluate(&input, &EngineConfig::default());
        assert_eq!(bundle.summary.status, FitnessStatus::Unacceptable);
        assert!(bundle.summary.status_reason.contains("2-year"));
    }

    #[test]
    fn test_head_dispatch_with_defaulted_type() {
        let mut input = full_input();
        input.component = ComponentKind::Head;
        let bundle = evaluate(&input, &EngineConfig::default());
        assert!(bundle.success);
        assert!(bundle.warnings.contains(&Warning::DefaultedHeadType));
        assert!(bundle
            .t_required
            .code_reference
            .as_deref()
            .unwrap()
            .contains("UG-32(d)"));
    }

    #[test]
    fn test_head_explicit_type_dispatch() {
        let mut input = full_input();
        input.component = ComponentKind::Head;
        input.head_type = Some(HeadType::Hemispherical);
        let bundle = evaluate(&input, &EngineConfig::default());
        assert!(bundle
            .t_required
            .code_reference
            .as_deref()
            .unwrap()
            .contains("UG-32(f)"));
    }

    #[test]
    fn test_partial_failure_preserves_other_results() {
        // Unknown material: both load-bearing calcs fail, but the corrosion
        // rates (pure thickness arithmetic) still compute
        let mut input = full_input();
        input.material_spec = "SA-000-NOPE".to_string();
        let bundle = evaluate(&input, &EngineConfig::default());

        assert!(!bundle.success);
        assert!(!bundle.t_required.success);
        assert!(!bundle.mawp.success);
        assert_eq!(bundle.summary.status, FitnessStatus::Unacceptable);

        let lt = bundle.corrosion_rate_lt.unwrap();
        assert!(lt.success);
        assert!((lt.result_value.unwrap() - 0.00333).abs() < 0.0001);
        // Life needs t_required, so it is skipped, not failed
        assert!(bundle.remaining_life.is_none());
    }

    #[test]
    fn test_mawp_failure_alone_fails_bundle() {
        let mut input = full_input();
        input.current_thickness_in = None;
        let bundle = evaluate(&input, &EngineConfig::default());
        assert!(bundle.t_required.success);
        assert!(!bundle.mawp.success);
        assert!(!bundle.success);
        assert_eq!(bundle.summary.status, FitnessStatus::Unacceptable);
        assert!(bundle.summary.status_reason.contains("MAWP"));
    }

    #[test]
    fn test_zero_corrosion_gives_infinite_life_and_ten_year_interval() {
        let mut input = full_input();
        input.nominal_thickness_in = Some(0.45); // no loss since build
        input.previous_thickness_in = None; // no ST rate
        let bundle = evaluate(&input, &EngineConfig::default());

        assert_eq!(bundle.summary.remaining_life, Some(RemainingLife::Infinite));
        assert_eq!(bundle.summary.next_inspection_years, Some(10.0));
        assert_eq!(bundle.summary.status, FitnessStatus::Acceptable);
        let life = bundle.remaining_life.unwrap();
        assert!(life.success);
        assert_eq!(life.result_value, None);
    }

    #[test]
    fn test_warning_union_deduplicates() {
        // Torispherical defaults fire in t_required, MAWP, and projection;
        // the union must carry each warning once
        let mut input = full_input();
        input.component = ComponentKind::Head;
        input.head_type = Some(HeadType::Torispherical);
        let bundle = evaluate(&input, &EngineConfig::default());

        let crown_count = bundle
            .warnings
            .iter()
            .filter(|w| matches!(w, Warning::DefaultedCrownRadius { .. }))
            .count();
        assert_eq!(crown_count, 1);
    }

    #[test]
    fn test_bundle_serialization_roundtrip() {
        let bundle = evaluate(&full_input(), &EngineConfig::default());
        let json = serde_json::to_string_pretty(&bundle).unwrap();
        let roundtrip: FullCalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(bundle, roundtrip);
        assert!(json.contains("engine_version"));
    }

    #[test]
    fn test_spec_scenario_values_in_bundle() {
        let bundle = evaluate(&full_input(), &EngineConfig::default());
        assert!((bundle.summary.t_required_in.unwrap() - 0.1808).abs() < 0.0005);
        assert!((bundle.summary.mawp_psi.unwrap() - 309.6).abs() < 0.05);
    }
}
