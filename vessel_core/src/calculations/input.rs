//! # Calculation Input
//!
//! One vessel component's engineering parameters, passed by value into every
//! calculation. Units are fixed (psi, F, inches, years) and are never
//! inferred or converted by the engine.
//!
//! ## JSON Example (shell course)
//!
//! ```json
//! {
//!   "label": "V-101 Shell Course 2",
//!   "component": "Shell",
//!   "inside_diameter_in": 48.0,
//!   "design_pressure_psi": 150.0,
//!   "design_temperature_f": 100.0,
//!   "material_spec": "SA-516 Gr 70",
//!   "joint_efficiency": 1.0,
//!   "nominal_thickness_in": 0.5,
//!   "current_thickness_in": 0.375,
//!   "year_built": 2010,
//!   "orientation": "Vertical",
//!   "specific_gravity": 0.92,
//!   "liquid_height_in": 96.0
//! }
//! ```
//!
//! ## JSON Example (torispherical head)
//!
//! ```json
//! {
//!   "label": "V-101 Top Head",
//!   "component": "Head",
//!   "head_type": "Torispherical",
//!   "inside_diameter_in": 48.0,
//!   "crown_radius_in": 48.0,
//!   "knuckle_radius_in": 2.88,
//!   "design_pressure_psi": 150.0,
//!   "design_temperature_f": 100.0,
//!   "material_spec": "SA-516-70",
//!   "joint_efficiency": 1.0,
//!   "current_thickness_in": 0.31
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, HorizontalStaticHead};
use crate::errors::{CalcError, CalcResult};
use crate::units::{DegF, Inches, Psi};

use super::result::{Assumption, Warning};

/// Fresh water density used for static-head terms (lb/ft3)
const FRESH_WATER_DENSITY_PCF: f64 = 62.4;

/// Component classification for formula dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Cylindrical shell course
    #[default]
    Shell,
    /// Formed head
    Head,
}

/// Head geometry per ASME VIII-1 UG-32
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeadType {
    /// 2:1 ellipsoidal head (UG-32(d))
    #[default]
    Ellipsoidal,
    /// Torispherical (flanged and dished) head (UG-32(e))
    Torispherical,
    /// Hemispherical head (UG-32(f))
    Hemispherical,
}

impl HeadType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            HeadType::Ellipsoidal => "2:1 Ellipsoidal",
            HeadType::Torispherical => "Torispherical",
            HeadType::Hemispherical => "Hemispherical",
        }
    }
}

impl std::fmt::Display for HeadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Installed orientation of the vessel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VesselOrientation {
    Vertical,
    Horizontal,
}

/// Torispherical head geometry after explicit defaulting.
///
/// All defaulting for the crown and knuckle radii happens in one place
/// ([`CalculationInput::torispherical_geometry`]); the flags record which
/// values were substituted so the trace never loses that information.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorisphericalGeometry {
    /// Crown (dish) radius L (in)
    pub crown_radius_in: f64,
    /// Knuckle radius r (in)
    pub knuckle_radius_in: f64,
    /// True when L was defaulted to the inside diameter
    pub crown_defaulted: bool,
    /// True when r was defaulted to 0.06 x inside diameter
    pub knuckle_defaulted: bool,
}

impl TorisphericalGeometry {
    /// Shape factor `M = 0.25 x (3 + sqrt(L/r))`
    pub fn m_factor(&self) -> f64 {
        0.25 * (3.0 + (self.crown_radius_in / self.knuckle_radius_in).sqrt())
    }

    /// Warnings for any defaulted radii
    pub fn defaulting_warnings(&self) -> Vec<Warning> {
        let mut warnings = Vec::new();
        if self.crown_defaulted {
            warnings.push(Warning::DefaultedCrownRadius {
                crown_radius_in: self.crown_radius_in,
            });
        }
        if self.knuckle_defaulted {
            warnings.push(Warning::DefaultedKnuckleRadius {
                knuckle_radius_in: self.knuckle_radius_in,
            });
        }
        warnings
    }
}

/// Total design pressure after static-head resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedPressure {
    /// Design pressure plus static head (psi)
    pub total_psi: f64,
    /// The static-head term alone (psi)
    pub static_head_psi: f64,
    pub warnings: Vec<Warning>,
    pub assumptions: Vec<Assumption>,
}

/// One vessel component's engineering parameters.
///
/// Optional fields may be omitted from JSON entirely. Thicknesses, diameters,
/// and pressures that are supplied must be strictly positive; joint
/// efficiency must be in (0, 1].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationInput {
    /// User label for this component (e.g. "V-101 Shell Course 2")
    #[serde(default)]
    pub label: String,

    /// Shell or head
    #[serde(default)]
    pub component: ComponentKind,

    /// Head geometry; required only for heads (defaults to 2:1 ellipsoidal
    /// with a warning when absent)
    #[serde(default)]
    pub head_type: Option<HeadType>,

    /// Inside diameter (in); either this or `inside_radius_in` must be set
    #[serde(default)]
    pub inside_diameter_in: Option<f64>,

    /// Inside radius (in)
    #[serde(default)]
    pub inside_radius_in: Option<f64>,

    /// Design pressure (psi)
    pub design_pressure_psi: f64,

    /// Design temperature (F)
    pub design_temperature_f: f64,

    /// Material specification (free-form; normalized against the stress
    /// table)
    pub material_spec: String,

    /// Direct allowable-stress override (psi); bypasses the versioned
    /// database and is flagged with a warning
    #[serde(default)]
    pub allowable_stress_psi: Option<f64>,

    /// Joint efficiency E, in (0, 1]
    pub joint_efficiency: f64,

    /// Nominal (as-built) thickness (in)
    #[serde(default)]
    pub nominal_thickness_in: Option<f64>,

    /// Current measured thickness (in)
    #[serde(default)]
    pub current_thickness_in: Option<f64>,

    /// Thickness at the previous inspection (in)
    #[serde(default)]
    pub previous_thickness_in: Option<f64>,

    /// Corrosion allowance (in); derived as max(0, t_current - t_required)
    /// when absent
    #[serde(default)]
    pub corrosion_allowance_in: Option<f64>,

    /// Torispherical crown radius L (in)
    #[serde(default)]
    pub crown_radius_in: Option<f64>,

    /// Torispherical knuckle radius r (in)
    #[serde(default)]
    pub knuckle_radius_in: Option<f64>,

    /// Year the vessel was built
    #[serde(default)]
    pub year_built: Option<i32>,

    /// Date of the previous inspection
    #[serde(default)]
    pub previous_inspection_date: Option<NaiveDate>,

    /// Date of the current inspection
    #[serde(default)]
    pub current_inspection_date: Option<NaiveDate>,

    /// Installed orientation; assumed vertical (with a warning) when liquid
    /// data is supplied without it
    #[serde(default)]
    pub orientation: Option<VesselOrientation>,

    /// Specific gravity of the contained liquid
    #[serde(default)]
    pub specific_gravity: Option<f64>,

    /// Liquid column height above the component (in)
    #[serde(default)]
    pub liquid_height_in: Option<f64>,
}

impl CalculationInput {
    /// Validate input parameters.
    ///
    /// Mandatory fields must be strictly positive; optional fields are
    /// validated only when supplied.
    pub fn validate(&self) -> CalcResult<()> {
        if self.design_pressure_psi <= 0.0 {
            return Err(CalcError::invalid_input(
                "design_pressure_psi",
                self.design_pressure_psi.to_string(),
                "Design pressure must be positive",
            ));
        }
        if !self.design_pressure_psi.is_finite() || !self.design_temperature_f.is_finite() {
            return Err(CalcError::invalid_input(
                "design_pressure_psi/design_temperature_f",
                "non-finite",
                "Design conditions must be finite numbers",
            ));
        }
        if self.joint_efficiency <= 0.0 || self.joint_efficiency > 1.0 {
            return Err(CalcError::invalid_input(
                "joint_efficiency",
                self.joint_efficiency.to_string(),
                "Joint efficiency must be in (0, 1]",
            ));
        }
        for (name, value) in [
            ("inside_diameter_in", self.inside_diameter_in),
            ("inside_radius_in", self.inside_radius_in),
            ("nominal_thickness_in", self.nominal_thickness_in),
            ("current_thickness_in", self.current_thickness_in),
            ("previous_thickness_in", self.previous_thickness_in),
            ("crown_radius_in", self.crown_radius_in),
            ("knuckle_radius_in", self.knuckle_radius_in),
            ("specific_gravity", self.specific_gravity),
            ("liquid_height_in", self.liquid_height_in),
        ] {
            if let Some(v) = value {
                if v <= 0.0 || !v.is_finite() {
                    return Err(CalcError::invalid_input(
                        name,
                        v.to_string(),
                        "Value must be positive when supplied",
                    ));
                }
            }
        }
        if let Some(ca) = self.corrosion_allowance_in {
            if ca < 0.0 || !ca.is_finite() {
                return Err(CalcError::invalid_input(
                    "corrosion_allowance_in",
                    ca.to_string(),
                    "Corrosion allowance must be non-negative",
                ));
            }
        }
        Ok(())
    }

    /// Inside diameter, resolved from whichever of D or R was supplied.
    pub fn inside_diameter(&self) -> CalcResult<Inches> {
        match (self.inside_diameter_in, self.inside_radius_in) {
            (Some(d), _) => Ok(Inches(d)),
            (None, Some(r)) => Ok(Inches(r * 2.0)),
            (None, None) => Err(CalcError::missing_field(
                "inside_diameter_in or inside_radius_in",
            )),
        }
    }

    /// Inside radius, resolved from whichever of D or R was supplied.
    pub fn inside_radius(&self) -> CalcResult<Inches> {
        match (self.inside_radius_in, self.inside_diameter_in) {
            (Some(r), _) => Ok(Inches(r)),
            (None, Some(d)) => Ok(Inches(d / 2.0)),
            (None, None) => Err(CalcError::missing_field(
                "inside_diameter_in or inside_radius_in",
            )),
        }
    }

    /// Get the design pressure as a typed unit
    pub fn design_pressure(&self) -> Psi {
        Psi(self.design_pressure_psi)
    }

    /// Get the design temperature as a typed unit
    pub fn design_temperature(&self) -> DegF {
        DegF(self.design_temperature_f)
    }

    /// Head type with explicit defaulting: `(resolved, was_defaulted)`.
    pub fn resolved_head_type(&self) -> (HeadType, bool) {
        match self.head_type {
            Some(head_type) => (head_type, false),
            None => (HeadType::Ellipsoidal, true),
        }
    }

    /// Torispherical geometry with explicit defaulting: absent crown radius
    /// defaults to the inside diameter, absent knuckle radius to 6% of it.
    pub fn torispherical_geometry(&self) -> CalcResult<TorisphericalGeometry> {
        let diameter = self.inside_diameter()?.value();
        let (crown_radius_in, crown_defaulted) = match self.crown_radius_in {
            Some(l) => (l, false),
            None => (diameter, true),
        };
        let (knuckle_radius_in, knuckle_defaulted) = match self.knuckle_radius_in {
            Some(r) => (r, false),
            None => (0.06 * diameter, true),
        };
        Ok(TorisphericalGeometry {
            crown_radius_in,
            knuckle_radius_in,
            crown_defaulted,
            knuckle_defaulted,
        })
    }

    /// True when both liquid parameters needed for a static-head term are
    /// present.
    pub fn has_liquid_data(&self) -> bool {
        self.specific_gravity.is_some() && self.liquid_height_in.is_some()
    }

    /// Orientation-aware total design pressure for shell calculations.
    ///
    /// Vertical vessels with liquid data add
    /// `P_static = SG x 62.4 x h_in / 144`; horizontal vessels follow the
    /// configured convention; a missing orientation with liquid data present
    /// is treated as vertical with a warning.
    pub(crate) fn total_design_pressure(&self, config: &EngineConfig) -> CalcResult<ResolvedPressure> {
        let mut warnings = Vec::new();
        let mut assumptions = Vec::new();

        let static_head_psi = match (self.specific_gravity, self.liquid_height_in) {
            (Some(sg), Some(height_in)) => match self.orientation {
                Some(VesselOrientation::Vertical) => {
                    sg * FRESH_WATER_DENSITY_PCF * height_in / 144.0
                }
                Some(VesselOrientation::Horizontal) => {
                    warnings.push(Warning::HorizontalStaticHeadConvention {
                        convention: config.horizontal_static_head,
                    });
                    match config.horizontal_static_head {
                        HorizontalStaticHead::Zero => 0.0,
                        HorizontalStaticHead::FullBore => {
                            let diameter = self.inside_diameter()?.value();
                            sg * FRESH_WATER_DENSITY_PCF * diameter / 144.0
                        }
                    }
                }
                None => {
                    warnings.push(Warning::AssumedVerticalOrientation);
                    sg * FRESH_WATER_DENSITY_PCF * height_in / 144.0
                }
            },
            _ => 0.0,
        };

        if static_head_psi > 0.0 {
            assumptions.push(Assumption::StaticHeadIncluded { static_head_psi });
        } else {
            assumptions.push(Assumption::NoStaticHead);
        }

        Ok(ResolvedPressure {
            total_psi: self.design_pressure_psi + static_head_psi,
            static_head_psi,
            warnings,
            assumptions,
        })
    }
}
