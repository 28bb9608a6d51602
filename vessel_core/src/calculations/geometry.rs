//! Shared calculation plumbing: allowable-stress resolution and geometry
//! dispatch.
//!
//! Every thickness/MAWP function walks the same first steps - validate,
//! resolve stress, resolve geometry - so those steps live here, once. The
//! MAWP kernels are also here because the corrosion policy re-evaluates MAWP
//! at a projected thickness using the exact same formulas.

use crate::codes::{CodeReference, ASME_VIII_YEAR};
use crate::errors::{CalcError, CalcResult};
use crate::materials::database;

use super::input::{CalculationInput, ComponentKind, HeadType, TorisphericalGeometry};
use super::result::{Assumption, ResultBuilder, Warning};

/// Allowable stress after override-vs-database resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedStress {
    pub stress_psi: f64,
    pub warnings: Vec<Warning>,
    pub assumptions: Vec<Assumption>,
}

/// Resolve the allowable stress for an input record.
///
/// A directly-supplied stress wins but is flagged (it bypasses the versioned
/// table); otherwise the database is consulted and the full lookup
/// provenance is recorded as an assumption.
pub(crate) fn resolve_allowable_stress(input: &CalculationInput) -> CalcResult<ResolvedStress> {
    if let Some(stress_psi) = input.allowable_stress_psi {
        if stress_psi <= 0.0 || !stress_psi.is_finite() {
            return Err(CalcError::invalid_input(
                "allowable_stress_psi",
                stress_psi.to_string(),
                "Allowable stress override must be positive",
            ));
        }
        return Ok(ResolvedStress {
            stress_psi,
            warnings: vec![Warning::DirectStressOverride { stress_psi }],
            assumptions: Vec::new(),
        });
    }

    let db = database();
    let lookup = db.lookup(&input.material_spec, input.design_temperature_f);
    match lookup.stress_psi {
        Some(stress_psi) => {
            let canonical = db
                .normalize(&input.material_spec)
                .unwrap_or_else(|| input.material_spec.clone());
            Ok(ResolvedStress {
                stress_psi,
                warnings: Vec::new(),
                assumptions: vec![Assumption::StressFromDatabase {
                    material_spec: canonical,
                    temperature_f: input.design_temperature_f,
                    stress_psi,
                    database_version: lookup.database_version,
                    lookup: lookup.status,
                }],
            })
        }
        None => match lookup.temperature_range_f {
            Some((min_f, max_f)) => Err(CalcError::TemperatureOutOfRange {
                material_spec: input.material_spec.clone(),
                temperature_f: input.design_temperature_f,
                min_f,
                max_f,
            }),
            None => Err(CalcError::material_not_found(&input.material_spec)),
        },
    }
}

/// Geometry after component/head-type dispatch and defaulting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ResolvedGeometry {
    Shell { radius_in: f64 },
    Ellipsoidal { diameter_in: f64 },
    Torispherical { geometry: TorisphericalGeometry },
    Hemispherical { radius_in: f64 },
}

impl ResolvedGeometry {
    /// Governing ASME VIII-1 paragraph for this geometry
    pub fn code_reference(&self) -> CodeReference {
        let paragraph = match self {
            ResolvedGeometry::Shell { .. } => "UG-27(c)(1)",
            ResolvedGeometry::Ellipsoidal { .. } => "UG-32(d)",
            ResolvedGeometry::Torispherical { .. } => "UG-32(e)",
            ResolvedGeometry::Hemispherical { .. } => "UG-32(f)",
        };
        CodeReference::AsmeViiiDiv1 {
            year: ASME_VIII_YEAR,
            paragraph,
        }
    }

    /// Required-thickness formula text
    pub fn thickness_formula(&self) -> &'static str {
        match self {
            ResolvedGeometry::Shell { .. } => "t = P*R / (S*E - 0.6*P)",
            ResolvedGeometry::Ellipsoidal { .. } => "t = P*D / (2*S*E - 0.2*P)",
            ResolvedGeometry::Torispherical { .. } => "t = P*L*M / (2*S*E - 0.2*P)",
            ResolvedGeometry::Hemispherical { .. } => "t = P*R / (2*S*E - 0.2*P)",
        }
    }

    /// MAWP formula text (the same paragraph solved for pressure)
    pub fn mawp_formula(&self) -> &'static str {
        match self {
            ResolvedGeometry::Shell { .. } => "MAWP = S*E*t / (R + 0.6*t)",
            ResolvedGeometry::Ellipsoidal { .. } => "MAWP = 2*S*E*t / (D + 0.2*t)",
            ResolvedGeometry::Torispherical { .. } => "MAWP = 2*S*E*t / (L*M + 0.2*t)",
            ResolvedGeometry::Hemispherical { .. } => "MAWP = 2*S*E*t / (R + 0.2*t)",
        }
    }

    /// MAWP at thickness `t`: `(mawp_psi, numerator, denominator)`.
    ///
    /// Denominators are sums of positive geometry terms, so unlike the
    /// thickness formulas there is no infeasibility case here.
    pub fn mawp_at(&self, stress_psi: f64, joint_efficiency: f64, thickness_in: f64) -> (f64, f64, f64) {
        let (numerator, denominator) = match self {
            ResolvedGeometry::Shell { radius_in } => (
                stress_psi * joint_efficiency * thickness_in,
                radius_in + 0.6 * thickness_in,
            ),
            ResolvedGeometry::Ellipsoidal { diameter_in } => (
                2.0 * stress_psi * joint_efficiency * thickness_in,
                diameter_in + 0.2 * thickness_in,
            ),
            ResolvedGeometry::Torispherical { geometry } => (
                2.0 * stress_psi * joint_efficiency * thickness_in,
                geometry.crown_radius_in * geometry.m_factor() + 0.2 * thickness_in,
            ),
            ResolvedGeometry::Hemispherical { radius_in } => (
                2.0 * stress_psi * joint_efficiency * thickness_in,
                radius_in + 0.2 * thickness_in,
            ),
        };
        (numerator / denominator, numerator, denominator)
    }

    /// Record this geometry's named dimensions into a result trace.
    pub fn record_intermediates(&self, builder: &mut ResultBuilder) {
        match self {
            ResolvedGeometry::Shell { radius_in } => {
                builder.intermediate("R_in", *radius_in);
            }
            ResolvedGeometry::Ellipsoidal { diameter_in } => {
                builder.intermediate("D_in", *diameter_in);
            }
            ResolvedGeometry::Torispherical { geometry } => {
                builder.intermediate("L_in", geometry.crown_radius_in);
                builder.intermediate("r_in", geometry.knuckle_radius_in);
                builder.intermediate("M", geometry.m_factor());
            }
            ResolvedGeometry::Hemispherical { radius_in } => {
                builder.intermediate("R_in", *radius_in);
            }
        }
    }
}

/// Dispatch an input record to its geometry, applying head-type and
/// torispherical defaulting with warnings.
pub(crate) fn resolve_geometry(
    input: &CalculationInput,
) -> CalcResult<(ResolvedGeometry, Vec<Warning>)> {
    match input.component {
        ComponentKind::Shell => {
            let radius_in = input.inside_radius()?.value();
            Ok((ResolvedGeometry::Shell { radius_in }, Vec::new()))
        }
        ComponentKind::Head => {
            let mut warnings = Vec::new();
            let (head_type, defaulted) = input.resolved_head_type();
            if defaulted {
                warnings.push(Warning::DefaultedHeadType);
            }
            let geometry = match head_type {
                HeadType::Ellipsoidal => ResolvedGeometry::Ellipsoidal {
                    diameter_in: input.inside_diameter()?.value(),
                },
                HeadType::Torispherical => {
                    let geometry = input.torispherical_geometry()?;
                    warnings.extend(geometry.defaulting_warnings());
                    ResolvedGeometry::Torispherical { geometry }
                }
                HeadType::Hemispherical => ResolvedGeometry::Hemispherical {
                    radius_in: input.inside_radius()?.value(),
                },
            };
            Ok((geometry, warnings))
        }
    }
}
