//! # vessel_core - Pressure-Vessel Integrity Calculation Engine
//!
//! `vessel_core` is the locked calculation engine behind API 510 / ASME
//! Section VIII Division 1 vessel inspections: required wall thickness,
//! MAWP, corrosion rates, remaining life, and next-inspection intervals,
//! backed by a versioned allowable-stress database.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions of the input record plus the static
//!   material table; nothing is persisted and nothing is cached
//! - **Locked**: formulas and stress values never change silently; the
//!   engine and database versions are embedded in every result
//! - **Audit-traceable**: every result carries its code citation, formula
//!   text, named intermediates, assumptions, and warnings, sufficient for
//!   independent replay by a regulator
//! - **JSON-First**: all inputs and outputs serialize cleanly
//!
//! ## Quick Start
//!
//! ```rust
//! use vessel_core::calculations::input::CalculationInput;
//! use vessel_core::{evaluate, EngineConfig};
//!
//! let input = CalculationInput {
//!     label: "V-101 Shell Course 2".to_string(),
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
//! println!("t_required = {:.4} in", bundle.summary.t_required_in.unwrap());
//! println!("MAWP = {:.1} psi", bundle.summary.mawp_psi.unwrap());
//! println!("status = {}", bundle.summary.status);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - formulas, policy logic, and the orchestrator
//! - [`materials`] - versioned allowable-stress database
//! - [`audit`] - append-only audit recorder seam (best-effort)
//! - [`codes`] - code/paragraph citations
//! - [`config`] - engine configuration
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types
//! - [`version`] - locked engine/database version constants

pub mod audit;
pub mod calculations;
pub mod codes;
pub mod config;
pub mod errors;
pub mod materials;
pub mod units;
pub mod version;

// Re-export commonly used types at crate root for convenience
pub use calculations::{evaluate, evaluate_with_defaults, FullCalculationResult};
pub use config::{EngineConfig, HorizontalStaticHead};
pub use errors::{CalcError, CalcResult};
pub use version::{CALCULATION_ENGINE_VERSION, MATERIAL_DATABASE_VERSION};
