//! # Calculation Results
//!
//! The traceable result type shared by every calculation in the engine, plus
//! the structured warning and assumption vocabularies.
//!
//! ## Audit replay
//!
//! A [`CalculationResult`] is a self-contained audit record: formula text,
//! code citation, every named intermediate value, the engine and database
//! versions, and a timestamp. An auditor can recompute the result from its
//! intermediates without access to the original input record.
//!
//! ## Structured warnings
//!
//! Warnings and assumptions are tagged enum variants with parameters, not
//! prose. Tests and downstream consumers match on variants; prose is
//! produced only at the presentation boundary via `Display`.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "success": true,
//!   "calculation_type": "RequiredThickness",
//!   "result_value": 0.1808,
//!   "unit": "in",
//!   "code_reference": "ASME VIII Div.1 (2023) UG-27(c)(1)",
//!   "formula": "t = P*R / (S*E - 0.6*P)",
//!   "intermediates": { "E": 1.0, "P_total_psi": 150.0, "R_in": 24.0 },
//!   "assumptions": [],
//!   "warnings": [],
//!   "engine_version": "1.2.0",
//!   "database_version": "IID-1A-2023.1",
//!   "validation_status": "Valid"
//! }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codes::CodeReference;
use crate::config::HorizontalStaticHead;
use crate::errors::CalcError;
use crate::materials::LookupStatus;
use crate::version::{CALCULATION_ENGINE_VERSION, MATERIAL_DATABASE_VERSION};

/// The quantity a single result describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationType {
    /// Minimum code-required (retirement) thickness
    RequiredThickness,
    /// Maximum allowable working pressure at current thickness
    Mawp,
    /// Long-term corrosion rate (since build)
    CorrosionRateLongTerm,
    /// Short-term corrosion rate (between the last two inspections)
    CorrosionRateShortTerm,
    /// Remaining life at the governing corrosion rate
    RemainingLife,
    /// Next inspection interval
    NextInspectionInterval,
    /// MAWP projected to the next inspection date
    ProjectedMawp,
}

impl CalculationType {
    /// Fixed output unit for this quantity
    pub fn unit(&self) -> &'static str {
        match self {
            CalculationType::RequiredThickness => "in",
            CalculationType::Mawp => "psi",
            CalculationType::CorrosionRateLongTerm => "in/yr",
            CalculationType::CorrosionRateShortTerm => "in/yr",
            CalculationType::RemainingLife => "years",
            CalculationType::NextInspectionInterval => "years",
            CalculationType::ProjectedMawp => "psi",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CalculationType::RequiredThickness => "Required Thickness",
            CalculationType::Mawp => "MAWP",
            CalculationType::CorrosionRateLongTerm => "Long-Term Corrosion Rate",
            CalculationType::CorrosionRateShortTerm => "Short-Term Corrosion Rate",
            CalculationType::RemainingLife => "Remaining Life",
            CalculationType::NextInspectionInterval => "Next Inspection Interval",
            CalculationType::ProjectedMawp => "Projected MAWP at Next Inspection",
        }
    }
}

impl std::fmt::Display for CalculationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Severity classification of a finished result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// Clean result
    Valid,
    /// Usable result with at least one flagged condition
    Warning,
    /// Hard failure; no usable result (except the remaining-life zero state)
    Error,
}

impl ValidationStatus {
    fn rank(&self) -> u8 {
        match self {
            ValidationStatus::Valid => 0,
            ValidationStatus::Warning => 1,
            ValidationStatus::Error => 2,
        }
    }

    /// The more severe of two statuses
    pub fn worst(self, other: ValidationStatus) -> ValidationStatus {
        if self.rank() >= other.rank() {
            self
        } else {
            other
        }
    }
}

/// Which corrosion-rate measurement a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateBasis {
    /// Long-term rate (nominal vs current, since year built)
    LongTerm,
    /// Short-term rate (previous vs current inspection)
    ShortTerm,
}

impl RateBasis {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RateBasis::LongTerm => "long-term",
            RateBasis::ShortTerm => "short-term",
        }
    }
}

/// Flagged condition: the result is usable but needs attention.
///
/// Variants carry their parameters; render to prose with `Display` at the
/// presentation boundary only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", content = "details")]
pub enum Warning {
    /// Caller supplied an allowable stress directly, bypassing the
    /// versioned database
    DirectStressOverride { stress_psi: f64 },
    /// Head component had no head type; defaulted to 2:1 ellipsoidal
    DefaultedHeadType,
    /// Torispherical crown radius defaulted to the inside diameter
    DefaultedCrownRadius { crown_radius_in: f64 },
    /// Torispherical knuckle radius defaulted to 6% of the inside diameter
    DefaultedKnuckleRadius { knuckle_radius_in: f64 },
    /// Liquid data supplied without an orientation; vertical assumed
    AssumedVerticalOrientation,
    /// Horizontal-vessel static head computed under a configured convention
    /// that remains unresolved between divergent industry practices
    HorizontalStaticHeadConvention { convention: HorizontalStaticHead },
    /// Computed MAWP is below the design pressure (valid but concerning)
    MawpBelowDesignPressure {
        mawp_psi: f64,
        design_pressure_psi: f64,
    },
    /// Measured thickness increased over the comparison span; rate clamped
    /// to zero
    ApparentThicknessGrowth { basis: RateBasis },
    /// Current thickness is at or below the required minimum
    ThicknessAtOrBelowMinimum {
        current_in: f64,
        required_in: f64,
    },
    /// Remaining life is under the 2-year critical threshold
    RemainingLifeBelowTwoYears { years: f64 },
    /// Remaining life is under the 4-year caution threshold
    RemainingLifeBelowFourYears { years: f64 },
    /// Remaining life exhausted; inspection due immediately
    ImmediateInspectionRequired,
    /// Thickness projected to the next inspection is fully consumed
    ProjectedThicknessExhausted { projected_in: f64 },
    /// Corrosion allowance was not supplied and has been derived from
    /// current minus required thickness
    DerivedCorrosionAllowance { allowance_in: f64 },
}

impl Warning {
    /// True for the warnings that demand immediate operator action
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Warning::ThicknessAtOrBelowMinimum { .. }
                | Warning::ImmediateInspectionRequired
                | Warning::ProjectedThicknessExhausted { .. }
        )
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::DirectStressOverride { stress_psi } => write!(
                f,
                "allowable stress {} psi supplied directly, bypassing the versioned stress table",
                stress_psi
            ),
            Warning::DefaultedHeadType => {
                write!(f, "head type not specified; defaulted to 2:1 ellipsoidal")
            }
            Warning::DefaultedCrownRadius { crown_radius_in } => write!(
                f,
                "crown radius not supplied; defaulted to inside diameter ({} in)",
                crown_radius_in
            ),
            Warning::DefaultedKnuckleRadius { knuckle_radius_in } => write!(
                f,
                "knuckle radius not supplied; defaulted to 6% of inside diameter ({} in)",
                knuckle_radius_in
            ),
            Warning::AssumedVerticalOrientation => write!(
                f,
                "liquid data supplied without vessel orientation; vertical assumed"
            ),
            Warning::HorizontalStaticHeadConvention { convention } => write!(
                f,
                "horizontal vessel static head follows the '{}' convention; \
                 industry practice diverges and the choice needs domain review",
                convention
            ),
            Warning::MawpBelowDesignPressure {
                mawp_psi,
                design_pressure_psi,
            } => write!(
                f,
                "MAWP {:.1} psi is below the design pressure {:.1} psi; de-rate or repair",
                mawp_psi, design_pressure_psi
            ),
            Warning::ApparentThicknessGrowth { basis } => write!(
                f,
                "{} thickness readings show apparent growth; corrosion rate clamped to 0",
                basis.display_name()
            ),
            Warning::ThicknessAtOrBelowMinimum {
                current_in,
                required_in,
            } => write!(
                f,
                "current thickness {:.4} in is at or below the required minimum {:.4} in; \
                 immediate action required",
                current_in, required_in
            ),
            Warning::RemainingLifeBelowTwoYears { years } => write!(
                f,
                "remaining life {:.2} years is below the 2-year critical threshold",
                years
            ),
            Warning::RemainingLifeBelowFourYears { years } => write!(
                f,
                "remaining life {:.2} years is below the 4-year caution threshold",
                years
            ),
            Warning::ImmediateInspectionRequired => {
                write!(f, "remaining life exhausted; inspection due immediately")
            }
            Warning::ProjectedThicknessExhausted { projected_in } => write!(
                f,
                "projected thickness {:.4} in at next inspection is fully consumed",
                projected_in
            ),
            Warning::DerivedCorrosionAllowance { allowance_in } => write!(
                f,
                "corrosion allowance not supplied; derived as {:.4} in from current minus \
                 required thickness",
                allowance_in
            ),
        }
    }
}

/// Informational assumption: recorded for the audit trail, does not affect
/// the validation status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", content = "details")]
pub enum Assumption {
    /// Allowable stress resolved through the versioned database
    StressFromDatabase {
        material_spec: String,
        temperature_f: f64,
        stress_psi: f64,
        database_version: String,
        lookup: LookupStatus,
    },
    /// A static-head term was added to the design pressure
    StaticHeadIncluded { static_head_psi: f64 },
    /// No static-head term was applied
    NoStaticHead,
    /// Liquid data supplied for a head component; static head is not
    /// applied to head thickness/MAWP calculations
    StaticHeadNotAppliedToHead,
    /// No current inspection date supplied; long-term span measured to
    /// today's date
    CurrentYearFromToday { year: i32 },
    /// Governing corrosion rate is zero; remaining life is unbounded
    NoMeasurableCorrosion,
}

impl std::fmt::Display for Assumption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Assumption::StressFromDatabase {
                material_spec,
                temperature_f,
                stress_psi,
                database_version,
                lookup,
            } => write!(
                f,
                "allowable stress {} psi for {} at {} F from stress table {} ({:?})",
                stress_psi, material_spec, temperature_f, database_version, lookup
            ),
            Assumption::StaticHeadIncluded { static_head_psi } => write!(
                f,
                "static head {:.2} psi included in total design pressure",
                static_head_psi
            ),
            Assumption::NoStaticHead => write!(f, "static head = 0"),
            Assumption::StaticHeadNotAppliedToHead => write!(
                f,
                "liquid data supplied but static head is not applied to head calculations"
            ),
            Assumption::CurrentYearFromToday { year } => write!(
                f,
                "no current inspection date; long-term span measured to {}",
                year
            ),
            Assumption::NoMeasurableCorrosion => {
                write!(f, "no measurable corrosion; remaining life unbounded")
            }
        }
    }
}

/// One computed quantity with its full audit trace.
///
/// Immutable once produced. Every result embeds the locked engine and
/// database versions and a UTC timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// False when the calculation could not produce a usable value
    pub success: bool,

    /// Which quantity this result describes
    pub calculation_type: CalculationType,

    /// The computed value, `None` on hard failure or unbounded results
    pub result_value: Option<f64>,

    /// Fixed unit for the quantity (in, psi, in/yr, years)
    pub unit: String,

    /// Citation of the governing code paragraph
    pub code_reference: Option<String>,

    /// The formula as applied, in plain text
    pub formula: String,

    /// Named intermediate values sufficient for independent replay
    pub intermediates: BTreeMap<String, f64>,

    /// Informational assumptions recorded along the way
    pub assumptions: Vec<Assumption>,

    /// Flagged conditions
    pub warnings: Vec<Warning>,

    /// Locked engine version that produced this result
    pub engine_version: String,

    /// Locked stress-table version consulted (directly or not) by this result
    pub database_version: String,

    /// When the result was computed
    pub computed_at: DateTime<Utc>,

    /// Overall severity of this result
    pub validation_status: ValidationStatus,

    /// Populated on hard failure
    pub error_message: Option<String>,
}

impl CalculationResult {
    /// True when this result carries a hard error
    pub fn is_error(&self) -> bool {
        self.validation_status == ValidationStatus::Error
    }
}

/// Incremental builder used by the formula and policy modules.
///
/// Collects intermediates, warnings, and assumptions as a calculation
/// proceeds, then seals them into an immutable [`CalculationResult`].
#[derive(Debug)]
pub(crate) struct ResultBuilder {
    calculation_type: CalculationType,
    code_reference: Option<String>,
    formula: String,
    intermediates: BTreeMap<String, f64>,
    assumptions: Vec<Assumption>,
    warnings: Vec<Warning>,
}

impl ResultBuilder {
    pub fn new(calculation_type: CalculationType) -> Self {
        ResultBuilder {
            calculation_type,
            code_reference: None,
            formula: String::new(),
            intermediates: BTreeMap::new(),
            assumptions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn code_reference(mut self, reference: &CodeReference) -> Self {
        self.code_reference = Some(reference.citation());
        self
    }

    pub fn formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = formula.into();
        self
    }

    pub fn intermediate(&mut self, name: &str, value: f64) -> &mut Self {
        self.intermediates.insert(name.to_string(), value);
        self
    }

    pub fn assumption(&mut self, assumption: Assumption) -> &mut Self {
        self.assumptions.push(assumption);
        self
    }

    pub fn warning(&mut self, warning: Warning) -> &mut Self {
        self.warnings.push(warning);
        self
    }

    pub fn warnings(&mut self, warnings: impl IntoIterator<Item = Warning>) -> &mut Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn assumptions(&mut self, assumptions: impl IntoIterator<Item = Assumption>) -> &mut Self {
        self.assumptions.extend(assumptions);
        self
    }

    /// Seal a successful result.
    pub fn finish(self, value: f64) -> CalculationResult {
        self.finish_optional(Some(value))
    }

    /// Seal a successful result whose value may be unbounded (`None`).
    pub fn finish_optional(self, value: Option<f64>) -> CalculationResult {
        let status = if self.warnings.is_empty() {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Warning
        };
        self.seal(true, value, status, None)
    }

    /// Seal a hard failure.
    pub fn fail(self, error: CalcError) -> CalculationResult {
        self.seal(false, None, ValidationStatus::Error, Some(error.to_string()))
    }

    /// Seal a hard failure that still carries a regulatory value (the
    /// remaining-life zero state).
    pub fn fail_with_value(self, error: CalcError, value: f64) -> CalculationResult {
        self.seal(
            false,
            Some(value),
            ValidationStatus::Error,
            Some(error.to_string()),
        )
    }

    fn seal(
        self,
        success: bool,
        result_value: Option<f64>,
        validation_status: ValidationStatus,
        error_message: Option<String>,
    ) -> CalculationResult {
        CalculationResult {
            success,
            calculation_type: self.calculation_type,
            result_value,
            unit: self.calculation_type.unit().to_string(),
            code_reference: self.code_reference,
            formula: self.formula,
            intermediates: self.intermediates,
            assumptions: self.assumptions,
            warnings: self.warnings,
            engine_version: CALCULATION_ENGINE_VERSION.to_string(),
            database_version: MATERIAL_DATABASE_VERSION.to_string(),
            computed_at: Utc::now(),
            validation_status,
            error_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::CodeReference;

    #[test]
    fn test_builder_success_is_valid() {
        let mut builder = ResultBuilder::new(CalculationType::RequiredThickness)
            .code_reference(&CodeReference::AsmeViiiDiv1 {
                year: 2023,
                paragraph: "UG-27(c)(1)",
            })
            .formula("t = P*R / (S*E - 0.6*P)");
        builder.intermediate("P_total_psi", 150.0);
        builder.intermediate("R_in", 24.0);
        let result = builder.finish(0.1808);

        assert!(result.success);
        assert_eq!(result.validation_status, ValidationStatus::Valid);
        assert_eq!(result.unit, "in");
        assert_eq!(result.result_value, Some(0.1808));
        assert_eq!(result.engine_version, CALCULATION_ENGINE_VERSION);
        assert_eq!(result.intermediates["R_in"], 24.0);
        assert!(result
            .code_reference
            .as_deref()
            .unwrap()
            .contains("UG-27(c)(1)"));
    }

    #[test]
    fn test_builder_with_warning_downgrades_status() {
        let mut builder = ResultBuilder::new(CalculationType::Mawp);
        builder.warning(Warning::MawpBelowDesignPressure {
            mawp_psi: 243.6,
            design_pressure_psi: 280.0,
        });
        let result = builder.finish(243.6);

        assert!(result.success);
        assert_eq!(result.validation_status, ValidationStatus::Warning);
    }

    #[test]
    fn test_builder_failure() {
        let result = ResultBuilder::new(CalculationType::RequiredThickness)
            .fail(CalcError::missing_field("design_pressure_psi"));

        assert!(!result.success);
        assert_eq!(result.validation_status, ValidationStatus::Error);
        assert_eq!(result.result_value, None);
        assert!(result.error_message.unwrap().contains("design_pressure_psi"));
    }

    #[test]
    fn test_failure_can_carry_regulatory_zero() {
        let result = ResultBuilder::new(CalculationType::RemainingLife).fail_with_value(
            CalcError::calculation_failed("remaining_life", "thickness at minimum"),
            0.0,
        );
        assert!(!result.success);
        assert_eq!(result.result_value, Some(0.0));
        assert!(result.is_error());
    }

    #[test]
    fn test_status_worst() {
        assert_eq!(
            ValidationStatus::Valid.worst(ValidationStatus::Warning),
            ValidationStatus::Warning
        );
        assert_eq!(
            ValidationStatus::Error.worst(ValidationStatus::Warning),
            ValidationStatus::Error
        );
    }

    #[test]
    fn test_warning_criticality() {
        assert!(Warning::ImmediateInspectionRequired.is_critical());
        assert!(!Warning::DefaultedHeadType.is_critical());
    }

    #[test]
    fn test_warning_renders_to_prose() {
        let warning = Warning::MawpBelowDesignPressure {
            mawp_psi: 243.6,
            design_pressure_psi: 280.0,
        };
        let prose = warning.to_string();
        assert!(prose.contains("243.6"));
        assert!(prose.contains("280.0"));
    }

    #[test]
    fn test_result_serialization_roundtrip() {
        let mut builder = ResultBuilder::new(CalculationType::Mawp)
            .formula("MAWP = S*E*t / (R + 0.6*t)");
        builder.intermediate("t_in", 0.375);
        builder.assumption(Assumption::NoStaticHead);
        let result = builder.finish(309.6);

        let json = serde_json::to_string_pretty(&result).unwrap();
        let roundtrip: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }

    #[test]
    fn test_units_follow_calculation_type() {
        assert_eq!(CalculationType::RemainingLife.unit(), "years");
        assert_eq!(CalculationType::CorrosionRateShortTerm.unit(), "in/yr");
        assert_eq!(CalculationType::ProjectedMawp.unit(), "psi");
    }
}
