//! # Corrosion Rates, Remaining Life, and Inspection Intervals
//!
//! The API 510 policy layer: long- and short-term corrosion rates, the
//! governing rate, remaining life, the next inspection interval, and the
//! MAWP projected to that future date.
//!
//! ## Conventions
//!
//! - Apparent thickness growth (re-measurement scatter, weld overlay) is
//!   clamped to a zero rate with a warning, never reported as negative
//! - A zero governing rate yields [`RemainingLife::Infinite`]; no numeric
//!   sentinel is ever used for "no measurable corrosion"
//! - Thickness at or below the required minimum is a regulatory
//!   immediate-action state: remaining life 0 with a hard-error status
//! - Short-term spans use calendar days divided by 365.25

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::codes::{CodeReference, API_510_EDITION};
use crate::units::{Feet, Inches, InchesPerYear, Years};

use super::geometry::{resolve_allowable_stress, resolve_geometry};
use super::input::{CalculationInput, VesselOrientation};
use super::result::{
    Assumption, CalculationResult, CalculationType, RateBasis, ResultBuilder, Warning,
};

/// Safety multiplier applied to the governing rate when projecting thickness
/// to the next inspection. Fixed by API 510; not configurable.
pub const PROJECTION_RATE_FACTOR: f64 = 2.0;

/// Mean calendar year length for inspection-span arithmetic
const DAYS_PER_YEAR: f64 = 365.25;

/// Static-head deduction per foot of water column (psi/ft)
const PSI_PER_FOOT_WATER: f64 = 0.433;

const RATE_REFERENCE: CodeReference = CodeReference::Api510 {
    edition: API_510_EDITION,
    section: "7.1.1.1",
};
const REMAINING_LIFE_REFERENCE: CodeReference = CodeReference::Api510 {
    edition: API_510_EDITION,
    section: "7.1.1.2",
};
const INTERVAL_REFERENCE: CodeReference = CodeReference::Api510 {
    edition: API_510_EDITION,
    section: "7.2.2",
};
const PROJECTION_REFERENCE: CodeReference = CodeReference::Api510 {
    edition: API_510_EDITION,
    section: "7.1.1.3",
};

/// Remaining life until the component reaches its retirement thickness.
///
/// Explicitly tagged: unbounded life is `Infinite`, never a numeric
/// sentinel and never a bare missing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RemainingLife {
    /// No measurable corrosion; life is unbounded
    Infinite,
    /// Finite life in years (0 means the retirement state is reached)
    Years(f64),
}

impl RemainingLife {
    /// Finite years, if bounded
    pub fn years(&self) -> Option<f64> {
        match self {
            RemainingLife::Infinite => None,
            RemainingLife::Years(years) => Some(*years),
        }
    }

    /// True when life is used up (finite and <= 0)
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RemainingLife::Years(years) if *years <= 0.0)
    }
}

/// The corrosion rate selected to govern life calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoverningRate {
    /// Selected rate (in/yr), never negative
    pub rate_in_per_yr: f64,
    /// Which measurement the selected rate came from
    pub basis: RateBasis,
    /// True when both rates were available and the larger was selected
    pub governing_of_both: bool,
}

/// Classification of the next-inspection interval branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalClassification {
    /// Remaining life exhausted; inspect immediately
    Immediate,
    /// Under two years of life: interval equals remaining life
    Critical,
    /// Two to four years of life: fixed two-year interval
    FixedTwoYear,
    /// Half remaining life, capped at the API 510 ten-year maximum
    HalfLife,
}

impl IntervalClassification {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            IntervalClassification::Immediate => "Immediate",
            IntervalClassification::Critical => "Critical",
            IntervalClassification::FixedTwoYear => "Fixed Two-Year",
            IntervalClassification::HalfLife => "Half Remaining Life",
        }
    }
}

impl std::fmt::Display for IntervalClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// True when the long-term rate has all of its inputs
pub fn has_long_term_inputs(input: &CalculationInput) -> bool {
    input.nominal_thickness_in.is_some()
        && input.current_thickness_in.is_some()
        && input.year_built.is_some()
}

/// True when the short-term rate has all of its inputs
pub fn has_short_term_inputs(input: &CalculationInput) -> bool {
    input.previous_thickness_in.is_some()
        && input.current_thickness_in.is_some()
        && input.previous_inspection_date.is_some()
        && input.current_inspection_date.is_some()
}

/// Long-term corrosion rate since build:
/// `CR_LT = (t_nominal - t_current) / (current_year - year_built)`.
pub fn long_term_rate(input: &CalculationInput) -> CalculationResult {
    let mut builder = ResultBuilder::new(CalculationType::CorrosionRateLongTerm)
        .code_reference(&RATE_REFERENCE)
        .formula("CR_LT = (t_nominal - t_current) / (current_year - year_built)");

    if let Err(error) = input.validate() {
        return builder.fail(error);
    }
    let t_nominal = match input.nominal_thickness_in {
        Some(t) => t,
        None => return builder.fail(CalcError::missing_field("nominal_thickness_in")),
    };
    let t_current = match input.current_thickness_in {
        Some(t) => t,
        None => return builder.fail(CalcError::missing_field("current_thickness_in")),
    };
    let year_built = match input.year_built {
        Some(year) => year,
        None => return builder.fail(CalcError::missing_field("year_built")),
    };
    let current_year = match input.current_inspection_date {
        Some(date) => date.year(),
        None => {
            let year = Utc::now().year();
            builder.assumption(Assumption::CurrentYearFromToday { year });
            year
        }
    };

    let service_years = f64::from(current_year - year_built);
    if service_years <= 0.0 {
        return builder.fail(CalcError::invalid_input(
            "year_built",
            year_built.to_string(),
            "Service span must be positive to compute a long-term rate",
        ));
    }

    let thickness_loss = t_nominal - t_current;
    let rate = if thickness_loss < 0.0 {
        builder.warning(Warning::ApparentThicknessGrowth {
            basis: RateBasis::LongTerm,
        });
        0.0
    } else {
        thickness_loss / service_years
    };

    builder.intermediate("t_nominal_in", t_nominal);
    builder.intermediate("t_current_in", t_current);
    builder.intermediate("thickness_loss_in", thickness_loss);
    builder.intermediate("year_built", f64::from(year_built));
    builder.intermediate("current_year", f64::from(current_year));
    builder.intermediate("service_years", service_years);
    builder.intermediate("rate_in_per_yr", rate);
    builder.finish(rate)
}

/// Short-term corrosion rate between the last two inspections:
/// `CR_ST = (t_previous - t_current) / span_years`, with the span taken as
/// calendar days / 365.25.
pub fn short_term_rate(input: &CalculationInput) -> CalculationResult {
    let mut builder = ResultBuilder::new(CalculationType::CorrosionRateShortTerm)
        .code_reference(&RATE_REFERENCE)
        .formula("CR_ST = (t_previous - t_current) / ((current_date - previous_date) / 365.25)");

    if let Err(error) = input.validate() {
        return builder.fail(error);
    }
    let t_previous = match input.previous_thickness_in {
        Some(t) => t,
        None => return builder.fail(CalcError::missing_field("previous_thickness_in")),
    };
    let t_current = match input.current_thickness_in {
        Some(t) => t,
        None => return builder.fail(CalcError::missing_field("current_thickness_in")),
    };
    let previous_date = match input.previous_inspection_date {
        Some(date) => date,
        None => return builder.fail(CalcError::missing_field("previous_inspection_date")),
    };
    let current_date = match input.current_inspection_date {
        Some(date) => date,
        None => return builder.fail(CalcError::missing_field("current_inspection_date")),
    };

    let span_days = (current_date - previous_date).num_days() as f64;
    if span_days <= 0.0 {
        return builder.fail(CalcError::invalid_input(
            "previous_inspection_date",
            previous_date.to_string(),
            "Inspection dates must span a positive interval",
        ));
    }
    let span_years = span_days / DAYS_PER_YEAR;

    let thickness_loss = t_previous - t_current;
    let rate = if thickness_loss < 0.0 {
        builder.warning(Warning::ApparentThicknessGrowth {
            basis: RateBasis::ShortTerm,
        });
        0.0
    } else {
        thickness_loss / span_years
    };

    builder.intermediate("t_previous_in", t_previous);
    builder.intermediate("t_current_in", t_current);
    builder.intermediate("thickness_loss_in", thickness_loss);
    builder.intermediate("span_days", span_days);
    builder.intermediate("span_years", span_years);
    builder.intermediate("rate_in_per_yr", rate);
    builder.finish(rate)
}

/// Select the governing rate: the larger of the available rates.
///
/// Returns `None` when neither rate was computed. Failed rate results
/// contribute nothing.
pub fn governing_rate(
    long_term: Option<&CalculationResult>,
    short_term: Option<&CalculationResult>,
) -> Option<GoverningRate> {
    let lt = long_term.and_then(|r| if r.success { r.result_value } else { None });
    let st = short_term.and_then(|r| if r.success { r.result_value } else { None });

    match (lt, st) {
        (Some(lt_rate), Some(st_rate)) => Some(GoverningRate {
            rate_in_per_yr: lt_rate.max(st_rate),
            basis: if st_rate > lt_rate {
                RateBasis::ShortTerm
            } else {
                RateBasis::LongTerm
            },
            governing_of_both: true,
        }),
        (Some(lt_rate), None) => Some(GoverningRate {
            rate_in_per_yr: lt_rate,
            basis: RateBasis::LongTerm,
            governing_of_both: false,
        }),
        (None, Some(st_rate)) => Some(GoverningRate {
            rate_in_per_yr: st_rate,
            basis: RateBasis::ShortTerm,
            governing_of_both: false,
        }),
        (None, None) => None,
    }
}

/// Remaining life at the governing rate:
/// `RL = (t_current - t_required) / rate`.
///
/// Thickness at or below the minimum is the regulatory immediate-action
/// state: the result is a hard error that still carries the value 0 so the
/// interval state machine can consume it. A zero rate yields
/// [`RemainingLife::Infinite`].
pub fn remaining_life(
    input: &CalculationInput,
    t_required_in: f64,
    rate: &GoverningRate,
) -> (RemainingLife, CalculationResult) {
    let mut builder = ResultBuilder::new(CalculationType::RemainingLife)
        .code_reference(&REMAINING_LIFE_REFERENCE)
        .formula("RL = (t_current - t_required) / governing_rate");

    let t_current = match input.current_thickness_in {
        Some(t) => t,
        None => {
            let result = builder.fail(CalcError::missing_field("current_thickness_in"));
            return (RemainingLife::Years(0.0), result);
        }
    };

    builder.intermediate("t_current_in", t_current);
    builder.intermediate("t_required_in", t_required_in);
    builder.intermediate("governing_rate_in_per_yr", rate.rate_in_per_yr);
    builder.intermediate("corrosion_margin_in", t_current - t_required_in);

    if t_current <= t_required_in {
        builder.warning(Warning::ThicknessAtOrBelowMinimum {
            current_in: t_current,
            required_in: t_required_in,
        });
        let result = builder.fail_with_value(
            CalcError::calculation_failed(
                "remaining_life",
                format!(
                    "current thickness {:.4} in is at or below the required minimum {:.4} in",
                    t_current, t_required_in
                ),
            ),
            0.0,
        );
        return (RemainingLife::Years(0.0), result);
    }

    if rate.rate_in_per_yr <= 0.0 {
        builder.assumption(Assumption::NoMeasurableCorrosion);
        let result = builder.finish_optional(None);
        return (RemainingLife::Infinite, result);
    }

    let years = (t_current - t_required_in) / rate.rate_in_per_yr;
    builder.intermediate("remaining_life_years", years);
    if years < 2.0 {
        builder.warning(Warning::RemainingLifeBelowTwoYears { years });
    } else if years < 4.0 {
        builder.warning(Warning::RemainingLifeBelowFourYears { years });
    }

    let result = builder.finish(years);
    (RemainingLife::Years(years), result)
}

/// Next inspection interval from remaining life.
///
/// Four-branch state machine; inclusive boundaries belong to the
/// lower-interval branch:
///
/// | Remaining life | Interval          | Classification |
/// |----------------|-------------------|----------------|
/// | RL <= 0        | 0                 | Immediate      |
/// | 0 < RL < 2     | RL                | Critical       |
/// | 2 <= RL <= 4   | 2                 | FixedTwoYear   |
/// | RL > 4         | min(RL/2, 10)     | HalfLife       |
pub fn next_inspection_interval(
    life: &RemainingLife,
) -> (f64, IntervalClassification, CalculationResult) {
    let mut builder = ResultBuilder::new(CalculationType::NextInspectionInterval)
        .code_reference(&INTERVAL_REFERENCE);

    let (interval_years, classification) = match life {
        RemainingLife::Infinite => (10.0, IntervalClassification::HalfLife),
        RemainingLife::Years(rl) if *rl <= 0.0 => (0.0, IntervalClassification::Immediate),
        RemainingLife::Years(rl) if *rl < 2.0 => (*rl, IntervalClassification::Critical),
        RemainingLife::Years(rl) if *rl <= 4.0 => (2.0, IntervalClassification::FixedTwoYear),
        RemainingLife::Years(rl) => ((rl / 2.0).min(10.0), IntervalClassification::HalfLife),
    };

    builder = builder.formula(match classification {
        IntervalClassification::Immediate => "interval = 0 (RL <= 0)",
        IntervalClassification::Critical => "interval = RL (0 < RL < 2)",
        IntervalClassification::FixedTwoYear => "interval = 2 (2 <= RL <= 4)",
        IntervalClassification::HalfLife => "interval = min(RL / 2, 10) (RL > 4)",
    });

    if let RemainingLife::Years(rl) = life {
        builder.intermediate("remaining_life_years", *rl);
    }
    builder.intermediate("interval_years", interval_years);

    if classification == IntervalClassification::Immediate {
        builder.warning(Warning::ImmediateInspectionRequired);
    }
    if *life == RemainingLife::Infinite {
        builder.assumption(Assumption::NoMeasurableCorrosion);
    }

    let result = builder.finish(interval_years);
    (interval_years, classification, result)
}

/// MAWP projected to the next inspection.
///
/// Thickness is projected forward with the fixed 2x safety multiplier:
/// `t_proj = t_current - 2 * interval * rate`. A fully consumed projection
/// reports 0 psi with a critical warning and skips the MAWP recomputation;
/// otherwise the geometry MAWP at `t_proj` is reduced by the worst-case
/// static-head deduction (full liquid column).
pub fn projected_mawp(
    input: &CalculationInput,
    interval_years: f64,
    rate: &GoverningRate,
) -> CalculationResult {
    let mut builder = ResultBuilder::new(CalculationType::ProjectedMawp)
        .code_reference(&PROJECTION_REFERENCE)
        .formula("MAWP_proj = MAWP(t_current - 2 * interval * rate) - static_head");

    if let Err(error) = input.validate() {
        return builder.fail(error);
    }
    let t_current = match input.current_thickness_in {
        Some(t) => t,
        None => return builder.fail(CalcError::missing_field("current_thickness_in")),
    };

    let projected_loss = InchesPerYear(rate.rate_in_per_yr)
        .loss_over(Years(PROJECTION_RATE_FACTOR * interval_years));
    let t_projected = t_current - projected_loss.value();
    builder.intermediate("t_current_in", t_current);
    builder.intermediate("governing_rate_in_per_yr", rate.rate_in_per_yr);
    builder.intermediate("interval_years", interval_years);
    builder.intermediate("projection_factor", PROJECTION_RATE_FACTOR);
    builder.intermediate("t_projected_in", t_projected);

    if t_projected <= 0.0 {
        builder.warning(Warning::ProjectedThicknessExhausted {
            projected_in: t_projected,
        });
        return builder.finish(0.0);
    }

    let (geometry, geometry_warnings) = match resolve_geometry(input) {
        Ok(resolved) => resolved,
        Err(error) => return builder.fail(error),
    };
    builder.warnings(geometry_warnings);

    let stress = match resolve_allowable_stress(input) {
        Ok(stress) => stress,
        Err(error) => return builder.fail(error),
    };
    builder.warnings(stress.warnings);
    builder.assumptions(stress.assumptions);

    let s = stress.stress_psi;
    let e = input.joint_efficiency;
    let (mawp_gross, _, _) = geometry.mawp_at(s, e, t_projected);

    // Worst-case static-head deduction: full liquid column
    let deduction_psi = match (input.specific_gravity, input.orientation) {
        (Some(sg), Some(VesselOrientation::Horizontal)) => {
            let diameter_ft = match input.inside_diameter() {
                Ok(diameter) => Feet::from(diameter).value(),
                Err(error) => return builder.fail(error),
            };
            diameter_ft * PSI_PER_FOOT_WATER * sg
        }
        (Some(sg), orientation) => match input.liquid_height_in {
            Some(height_in) => {
                if orientation.is_none() {
                    builder.warning(Warning::AssumedVerticalOrientation);
                }
                Feet::from(Inches(height_in)).value() * PSI_PER_FOOT_WATER * sg
            }
            None => 0.0,
        },
        (None, _) => 0.0,
    };

    let mawp_projected = (mawp_gross - deduction_psi).max(0.0);

    builder.intermediate("S_psi", s);
    builder.intermediate("E", e);
    geometry.record_intermediates(&mut builder);
    builder.intermediate("mawp_gross_psi", mawp_gross);
    builder.intermediate("static_head_deduction_psi", deduction_psi);
    builder.intermediate("mawp_projected_psi", mawp_projected);

    if mawp_projected < input.design_pressure_psi {
        builder.warning(Warning::MawpBelowDesignPressure {
            mawp_psi: mawp_projected,
            design_pressure_psi: input.design_pressure_psi,
        });
    }

    builder.finish(mawp_projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::calculations::result::ValidationStatus;

    fn corroding_input() -> CalculationInput {
        CalculationInput {
            label: "V-101 Shell".to_string(),
            inside_diameter_in: Some(48.0),
            design_pressure_psi: 150.0,
            design_temperature_f: 100.0,
            material_spec: "SA-516-70".to_string(),
            joint_efficiency: 1.0,
            nominal_thickness_in: Some(0.5),
            current_thickness_in: Some(0.45),
            year_built: Some(2010),
            current_inspection_date: NaiveDate::from_ymd_opt(2025, 6, 15),
            ..Default::default()
        }
    }

    fn any_rate(rate: f64) -> GoverningRate {
        GoverningRate {
            rate_in_per_yr: rate,
            basis: RateBasis::LongTerm,
            governing_of_both: false,
        }
    }

    #[test]
    fn test_long_term_rate_worked_example() {
        // (0.5 - 0.45) / (2025 - 2010) = 0.003333 in/yr
        let result = long_term_rate(&corroding_input());
        assert!(result.success);
        assert!((result.result_value.unwrap() - 0.00333).abs() < 0.0001);
        assert_eq!(result.intermediates["service_years"], 15.0);
    }

    #[test]
    fn test_long_term_rate_requires_positive_span() {
        let mut input = corroding_input();
        input.year_built = Some(2025);
        let result = long_term_rate(&input);
        assert!(!result.success);

        input.year_built = Some(2030);
        assert!(!long_term_rate(&input).success);
    }

    #[test]
    fn test_long_term_growth_clamps_to_zero() {
        let mut input = corroding_input();
        input.nominal_thickness_in = Some(0.4);
        let result = long_term_rate(&input);
        assert!(result.success);
        assert_eq!(result.result_value, Some(0.0));
        assert!(result.warnings.contains(&Warning::ApparentThicknessGrowth {
            basis: RateBasis::LongTerm,
        }));
        // The raw negative loss stays visible in the trace
        assert!(result.intermediates["thickness_loss_in"] < 0.0);
    }

    #[test]
    fn test_short_term_rate_calendar_days() {
        let mut input = corroding_input();
        input.previous_thickness_in = Some(0.47);
        input.previous_inspection_date = NaiveDate::from_ymd_opt(2020, 6, 15);
        // 2020-06-15 to 2025-06-15 is 1826 days = 4.9993 years
        let result = short_term_rate(&input);
        assert!(result.success);
        let rate = result.result_value.unwrap();
        assert!((rate - 0.02 / 4.9993).abs() < 1e-5);
        assert_eq!(result.intermediates["span_days"], 1826.0);
    }

    #[test]
    fn test_short_term_rate_rejects_inverted_dates() {
        let mut input = corroding_input();
        input.previous_thickness_in = Some(0.47);
        input.previous_inspection_date = NaiveDate::from_ymd_opt(2026, 1, 1);
        let result = short_term_rate(&input);
        assert!(!result.success);
    }

    #[test]
    fn test_governing_rate_selects_larger() {
        let mut input = corroding_input();
        input.previous_thickness_in = Some(0.48);
        input.previous_inspection_date = NaiveDate::from_ymd_opt(2020, 6, 15);

        let lt = long_term_rate(&input);
        let st = short_term_rate(&input);
        // LT = 0.05/15 = 0.00333; ST = 0.03/5 = 0.006
        let governing = governing_rate(Some(&lt), Some(&st)).unwrap();
        assert_eq!(governing.basis, RateBasis::ShortTerm);
        assert!(governing.governing_of_both);
        assert!((governing.rate_in_per_yr - 0.006).abs() < 0.0001);
    }

    #[test]
    fn test_governing_rate_single_source() {
        let lt = long_term_rate(&corroding_input());
        let governing = governing_rate(Some(&lt), None).unwrap();
        assert_eq!(governing.basis, RateBasis::LongTerm);
        assert!(!governing.governing_of_both);

        assert!(governing_rate(None, None).is_none());
    }

    #[test]
    fn test_governing_rate_ignores_failed_results() {
        let mut input = corroding_input();
        input.year_built = None;
        let failed_lt = long_term_rate(&input);
        assert!(!failed_lt.success);
        assert!(governing_rate(Some(&failed_lt), None).is_none());
    }

    #[test]
    fn test_remaining_life_worked_example() {
        // (0.45 - 0.18) / 0.005 = 54 years
        let (life, result) = remaining_life(&corroding_input(), 0.18, &any_rate(0.005));
        assert_eq!(life, RemainingLife::Years(54.0));
        assert!(result.success);
        assert_eq!(result.result_value, Some(54.0));
        assert_eq!(result.validation_status, ValidationStatus::Valid);
    }

    #[test]
    fn test_remaining_life_zero_at_minimum_is_hard_error() {
        let mut input = corroding_input();
        input.current_thickness_in = Some(0.18);
        for required in [0.18, 0.25] {
            let (life, result) = remaining_life(&input, required, &any_rate(0.005));
            assert_eq!(life, RemainingLife::Years(0.0));
            assert!(!result.success);
            assert_eq!(result.validation_status, ValidationStatus::Error);
            // The regulatory zero is still carried for the interval machine
            assert_eq!(result.result_value, Some(0.0));
            assert!(result.warnings.iter().any(|w| matches!(
                w,
                Warning::ThicknessAtOrBelowMinimum { .. }
            )));
        }
    }

    #[test]
    fn test_remaining_life_zero_rate_is_infinite() {
        let (life, result) = remaining_life(&corroding_input(), 0.18, &any_rate(0.0));
        assert_eq!(life, RemainingLife::Infinite);
        assert!(result.success);
        assert_eq!(result.result_value, None);
        assert!(result.assumptions.contains(&Assumption::NoMeasurableCorrosion));
    }

    #[test]
    fn test_remaining_life_thresholds_warn() {
        let mut input = corroding_input();
        input.current_thickness_in = Some(0.19);
        // (0.19 - 0.18) / 0.005 = 2.0 years: exactly at the boundary, no
        // critical warning but a caution
        let (_, result) = remaining_life(&input, 0.18, &any_rate(0.005));
        assert!(result.warnings.iter().any(|w| matches!(
            w,
            Warning::RemainingLifeBelowFourYears { .. }
        )));

        // (0.19 - 0.18) / 0.01 = 1.0 year: critical
        let (_, result) = remaining_life(&input, 0.18, &any_rate(0.01));
        assert!(result.warnings.iter().any(|w| matches!(
            w,
            Warning::RemainingLifeBelowTwoYears { .. }
        )));
    }

    #[test]
    fn test_interval_state_machine_boundaries() {
        // Inclusive boundaries belong to the lower-interval branch
        let cases = [
            (0.0, 0.0, IntervalClassification::Immediate),
            (-1.0, 0.0, IntervalClassification::Immediate),
            (1.0, 1.0, IntervalClassification::Critical),
            (1.99, 1.99, IntervalClassification::Critical),
            (2.0, 2.0, IntervalClassification::FixedTwoYear),
            (3.0, 2.0, IntervalClassification::FixedTwoYear),
            (4.0, 2.0, IntervalClassification::FixedTwoYear),
            (4.01, 2.005, IntervalClassification::HalfLife),
            (12.0, 6.0, IntervalClassification::HalfLife),
            (54.0, 10.0, IntervalClassification::HalfLife),
            (100.0, 10.0, IntervalClassification::HalfLife),
        ];
        for (rl, expected_interval, expected_class) in cases {
            let (interval, classification, result) =
                next_inspection_interval(&RemainingLife::Years(rl));
            assert!(
                (interval - expected_interval).abs() < 1e-9,
                "RL = {} gave interval {}",
                rl,
                interval
            );
            assert_eq!(classification, expected_class, "RL = {}", rl);
            assert!(result.success);
            assert_eq!(result.result_value, Some(interval));
        }
    }

    #[test]
    fn test_interval_immediate_is_critical_warning() {
        let (interval, classification, result) =
            next_inspection_interval(&RemainingLife::Years(0.0));
        assert_eq!(interval, 0.0);
        assert_eq!(classification, IntervalClassification::Immediate);
        assert!(result
            .warnings
            .contains(&Warning::ImmediateInspectionRequired));
        assert!(result.warnings.iter().any(|w| w.is_critical()));
    }

    #[test]
    fn test_interval_infinite_life_caps_at_ten_years() {
        let (interval, classification, result) =
            next_inspection_interval(&RemainingLife::Infinite);
        assert_eq!(interval, 10.0);
        assert_eq!(classification, IntervalClassification::HalfLife);
        assert!(result.success);
    }

    #[test]
    fn test_projected_mawp_projects_thickness_with_safety_factor() {
        let input = corroding_input();
        let result = projected_mawp(&input, 10.0, &any_rate(0.005));
        assert!(result.success);
        // t_proj = 0.45 - 2 * 10 * 0.005 = 0.35
        assert!((result.intermediates["t_projected_in"] - 0.35).abs() < 1e-12);
        // MAWP = 20000 * 0.35 / (24 + 0.21) = 289.1 psi, no liquid deduction
        assert!((result.result_value.unwrap() - 289.1).abs() < 0.2);
        assert_eq!(result.intermediates["static_head_deduction_psi"], 0.0);
    }

    #[test]
    fn test_projected_mawp_exhausted_thickness_reports_zero() {
        let mut input = corroding_input();
        input.current_thickness_in = Some(0.05);
        let result = projected_mawp(&input, 10.0, &any_rate(0.005));
        assert!(result.success);
        assert_eq!(result.result_value, Some(0.0));
        assert!(result.warnings.iter().any(|w| matches!(
            w,
            Warning::ProjectedThicknessExhausted { .. }
        )));
        // MAWP recomputation skipped entirely
        assert!(!result.intermediates.contains_key("mawp_gross_psi"));
    }

    #[test]
    fn test_projected_mawp_vertical_deduction() {
        let mut input = corroding_input();
        input.orientation = Some(VesselOrientation::Vertical);
        input.specific_gravity = Some(1.0);
        input.liquid_height_in = Some(96.0);
        let result = projected_mawp(&input, 10.0, &any_rate(0.005));
        // 8 ft * 0.433 * 1.0 = 3.464 psi deduction
        assert!((result.intermediates["static_head_deduction_psi"] - 3.464).abs() < 1e-9);
        let gross = result.intermediates["mawp_gross_psi"];
        assert!((result.result_value.unwrap() - (gross - 3.464)).abs() < 1e-9);
    }

    #[test]
    fn test_projected_mawp_horizontal_uses_full_bore() {
        let mut input = corroding_input();
        input.orientation = Some(VesselOrientation::Horizontal);
        input.specific_gravity = Some(0.9);
        // Height is irrelevant for the horizontal worst case
        input.liquid_height_in = Some(12.0);
        let result = projected_mawp(&input, 10.0, &any_rate(0.005));
        // ID = 48 in = 4 ft: 4 * 0.433 * 0.9 = 1.5588 psi
        assert!((result.intermediates["static_head_deduction_psi"] - 1.5588).abs() < 1e-9);
    }
}
