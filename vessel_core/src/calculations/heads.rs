//! # Formed Head Calculations
//!
//! Required thickness and MAWP for 2:1 ellipsoidal, torispherical, and
//! hemispherical heads under internal pressure per ASME VIII-1 UG-32.
//!
//! ## Assumptions
//!
//! - A head input with no head type defaults to 2:1 ellipsoidal (warned)
//! - Torispherical crown/knuckle radii default to D and 0.06*D (warned);
//!   the shape factor is `M = 0.25 * (3 + sqrt(L/r))`
//! - Static head is not applied to head calculations; when liquid data is
//!   supplied anyway the omission is recorded as an assumption
//! - Required thickness is the retirement thickness, corrosion allowance
//!   excluded
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::calculations::input::{CalculationInput, ComponentKind, HeadType};
//! use vessel_core::calculations::heads;
//! use vessel_core::config::EngineConfig;
//!
//! let input = CalculationInput {
//!     label: "V-101 Top Head".to_string(),
//!     component: ComponentKind::Head,
//!     head_type: Some(HeadType::Torispherical),
//!     inside_diameter_in: Some(48.0),
//!     crown_radius_in: Some(48.0),
//!     knuckle_radius_in: Some(2.88),
//!     design_pressure_psi: 150.0,
//!     design_temperature_f: 100.0,
//!     material_spec: "SA-516-70".to_string(),
//!     joint_efficiency: 1.0,
//!     ..Default::default()
//! };
//!
//! let t_required = heads::required_thickness(&input, &EngineConfig::default());
//! assert!(t_required.success);
//! // t = P*L*M / (2SE - 0.2P) with M = 1.77
//! assert!((t_required.result_value.unwrap() - 0.3189).abs() < 0.001);
//! ```

use crate::config::EngineConfig;
use crate::errors::CalcError;

use super::geometry::{resolve_allowable_stress, resolve_geometry, ResolvedGeometry};
use super::input::{CalculationInput, ComponentKind};
use super::result::{Assumption, CalculationResult, CalculationType, ResultBuilder, Warning};

/// Minimum required head thickness per UG-32(d)/(e)/(f).
///
/// Dispatches on the resolved head type; the result is the retirement
/// thickness with corrosion allowance excluded.
pub fn required_thickness(input: &CalculationInput, _config: &EngineConfig) -> CalculationResult {
    let mut builder = ResultBuilder::new(CalculationType::RequiredThickness);

    if let Err(error) = input.validate() {
        return builder.fail(error);
    }
    if input.component != ComponentKind::Head {
        return builder.fail(CalcError::calculation_failed(
            "required_thickness",
            "head calculation dispatched for a non-head component",
        ));
    }
    let (geometry, geometry_warnings) = match resolve_geometry(input) {
        Ok(resolved) => resolved,
        Err(error) => return builder.fail(error),
    };
    builder = builder
        .code_reference(&geometry.code_reference())
        .formula(geometry.thickness_formula());
    builder.warnings(geometry_warnings);

    let stress = match resolve_allowable_stress(input) {
        Ok(stress) => stress,
        Err(error) => return builder.fail(error),
    };
    builder.warnings(stress.warnings);
    builder.assumptions(stress.assumptions);

    // Heads see the design pressure only; record the omission when liquid
    // data was supplied
    if input.has_liquid_data() {
        builder.assumption(Assumption::StaticHeadNotAppliedToHead);
    }

    let p = input.design_pressure_psi;
    let s = stress.stress_psi;
    let e = input.joint_efficiency;

    builder.intermediate("P_psi", p);
    builder.intermediate("S_psi", s);
    builder.intermediate("E", e);
    geometry.record_intermediates(&mut builder);

    let denominator = 2.0 * s * e - 0.2 * p;
    builder.intermediate("denominator", denominator);
    if denominator <= 0.0 {
        return builder.fail(CalcError::infeasible_geometry(
            "required_thickness",
            format!("2*S*E - 0.2*P = {:.2} <= 0; pressure exceeds the stress capacity", denominator),
        ));
    }

    let numerator = match geometry {
        ResolvedGeometry::Ellipsoidal { diameter_in } => p * diameter_in,
        ResolvedGeometry::Torispherical { geometry } => {
            p * geometry.crown_radius_in * geometry.m_factor()
        }
        ResolvedGeometry::Hemispherical { radius_in } => p * radius_in,
        // Guarded above: heads never resolve to a shell
        ResolvedGeometry::Shell { .. } => unreachable!("shell dispatched to head formula"),
    };
    builder.intermediate("numerator", numerator);

    let t_required = numerator / denominator;
    builder.intermediate("t_required_in", t_required);
    builder.finish(t_required)
}

/// Head MAWP at the current measured thickness per UG-32, solved for
/// pressure.
pub fn mawp(input: &CalculationInput, _config: &EngineConfig) -> CalculationResult {
    let mut builder = ResultBuilder::new(CalculationType::Mawp);

    if let Err(error) = input.validate() {
        return builder.fail(error);
    }
    if input.component != ComponentKind::Head {
        return builder.fail(CalcError::calculation_failed(
            "mawp",
            "head calculation dispatched for a non-head component",
        ));
    }
    let thickness_in = match input.current_thickness_in {
        Some(t) => t,
        None => return builder.fail(CalcError::missing_field("current_thickness_in")),
    };
    let (geometry, geometry_warnings) = match resolve_geometry(input) {
        Ok(resolved) => resolved,
        Err(error) => return builder.fail(error),
    };
    builder = builder
        .code_reference(&geometry.code_reference())
        .formula(geometry.mawp_formula());
    builder.warnings(geometry_warnings);

    let stress = match resolve_allowable_stress(input) {
        Ok(stress) => stress,
        Err(error) => return builder.fail(error),
    };
    builder.warnings(stress.warnings);
    builder.assumptions(stress.assumptions);

    if input.has_liquid_data() {
        builder.assumption(Assumption::StaticHeadNotAppliedToHead);
    }

    let s = stress.stress_psi;
    let e = input.joint_efficiency;
    let (mawp_psi, numerator, denominator) = geometry.mawp_at(s, e, thickness_in);

    builder.intermediate("t_in", thickness_in);
    builder.intermediate("S_psi", s);
    builder.intermediate("E", e);
    geometry.record_intermediates(&mut builder);
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
