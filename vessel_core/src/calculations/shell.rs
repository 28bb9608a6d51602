//! # Cylindrical Shell Calculations
//!
//! Required thickness and MAWP for cylindrical shell courses under internal
//! pressure per ASME VIII-1 UG-27(c)(1), circumferential stress governing.
//!
//! ## Assumptions
//!
//! - Internal pressure only; `t <= 0.5R` and `P <= 0.385SE` thin-wall range
//! - Required thickness is the retirement thickness: corrosion allowance is
//!   never added here
//! - Static head is added to the design pressure for vertical vessels with
//!   liquid data (see [`crate::config::EngineConfig`] for the horizontal
//!   convention)
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::calculations::input::CalculationInput;
//! use vessel_core::calculations::shell;
//! use vessel_core::config::EngineConfig;
//!
//! let input = CalculationInput {
//!     label: "V-101 Shell".to_string(),
//!     inside_diameter_in: Some(48.0),
//!     design_pressure_psi: 150.0,
//!     design_temperature_f: 100.0,
//!     material_spec: "SA-516-70".to_string(),
//!     joint_efficiency: 1.0,
//!     current_thickness_in: Some(0.375),
//!     ..Default::default()
//! };
//!
//! let t_required = shell::required_thickness(&input, &EngineConfig::default());
//! assert!(t_required.success);
//! assert!((t_required.result_value.unwrap() - 0.1808).abs() < 0.0005);
//! ```

use crate::config::EngineConfig;
use crate::errors::CalcError;

use super::geometry::{resolve_allowable_stress, ResolvedGeometry};
use super::input::CalculationInput;
use super::result::{CalculationResult, CalculationType, ResultBuilder, Warning};

/// Minimum required shell thickness per UG-27(c)(1):
/// `t = P*R / (S*E - 0.6*P)`.
///
/// The result is the retirement thickness; corrosion allowance is excluded
/// by definition.
pub fn required_thickness(input: &CalculationInput, config: &EngineConfig) -> CalculationResult {
    let mut builder = ResultBuilder::new(CalculationType::RequiredThickness);

    if let Err(error) = input.validate() {
        return builder.fail(error);
    }
    let radius_in = match input.inside_radius() {
        Ok(radius) => radius.value(),
        Err(error) => return builder.fail(error),
    };
    let geometry = ResolvedGeometry::Shell { radius_in };
    builder = builder
        .code_reference(&geometry.code_reference())
        .formula(geometry.thickness_formula());

    let stress = match resolve_allowable_stress(input) {
        Ok(stress) => stress,
        Err(error) => return builder.fail(error),
    };
    builder.warnings(stress.warnings);
    builder.assumptions(stress.assumptions);

    let pressure = match input.total_design_pressure(config) {
        Ok(pressure) => pressure,
        Err(error) => return builder.fail(error),
    };
    builder.warnings(pressure.warnings);
    builder.assumptions(pressure.assumptions);

    let p = pressure.total_psi;
    let s = stress.stress_psi;
    let e = input.joint_efficiency;

    builder.intermediate("P_design_psi", input.design_pressure_psi);
    builder.intermediate("P_static_psi", pressure.static_head_psi);
    builder.intermediate("P_total_psi", p);
    builder.intermediate("R_in", radius_in);
    builder.intermediate("S_psi", s);
    builder.intermediate("E", e);

    let denominator = s * e - 0.6 * p;
    builder.intermediate("denominator", denominator);
    if denominator <= 0.0 {
        return builder.fail(CalcError::infeasible_geometry(
            "required_thickness",
            format!("S*E - 0.6*P = {:.2} <= 0; pressure exceeds the stress capacity", denominator),
        ));
    }

    let numerator = p * radius_in;
    builder.intermediate("numerator", numerator);

    let t_required = numerator / denominator;
    builder.intermediate("t_required_in", t_required);
    builder.finish(t_required)
}

/// Shell MAWP at the current measured thickness:
/// `MAWP = S*E*t / (R + 0.6*t)`.
///
/// A MAWP below the design pressure is a warning, not an error: the vessel
/// is in a valid but de-rated operating state.
pub fn mawp(input: &CalculationInput, _config: &EngineConfig) -> CalculationResult {
    let mut builder = ResultBuilder::new(CalculationType::Mawp);

    if let Err(error) = input.validate() {
        return builder.fail(error);
    }
    let radius_in = match input.inside_radius() {
        Ok(radius) => radius.value(),
        Err(error) => return builder.fail(error),
    };
    let thickness_in = match input.current_thickness_in {
        Some(t) => t,
        None => return builder.fail(CalcError::missing_field("current_thickness_in")),
    };
    let stress = match resolve_allowable_stress(input) {
        Ok(stress) => stress,
        Err(error) => return builder.fail(error),
    };

    let geometry = ResolvedGeometry::Shell { radius_in };
    builder = builder
        .code_reference(&geometry.code_reference())
        .formula(geometry.mawp_formula());
    builder.warnings(stress.warnings);
    builder.assumptions(stress.assumptions);

    let s = stress.stress_psi;
    let e = input.joint_efficiency;
    let (mawp_psi, numerator, denominator) = geometry.mawp_at(s, e, thickness_in);

    builder.intermediate("R_in", radius_in);
    builder.intermediate("t_in", thickness_in);
    builder.intermediate("S_psi", s);
    builder.intermediate("E", e);
    builder.intermediate("numerator", numerator);
    builder.intermediate("denominator", denominator);
    builder.intermediate("mawp_psi", mawp_psi);

    if mawp_psi < input.design_pressure_psi {
        builder.warning(Warning::MawpBelowDesignPressure {
            mawp_psi,
            design_pressure_psi: input.design_pressure_psi,
        });
    }

    builder.finish(mawp_psi)
}
