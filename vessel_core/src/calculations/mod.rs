//! # Vessel Calculations
//!
//! This module contains the calculation engine proper. Each calculation
//! follows the pattern:
//!
//! - [`input::CalculationInput`] - one component's parameters (JSON-serializable)
//! - [`result::CalculationResult`] - one traced quantity (JSON-serializable)
//! - pure functions `f(&input, &config) -> CalculationResult`
//!
//! ## Layout
//!
//! - [`input`] - the input record, head-geometry resolution, static head
//! - [`result`] - result type, structured warnings and assumptions
//! - [`shell`] - cylindrical shell thickness/MAWP (UG-27)
//! - [`heads`] - ellipsoidal, torispherical, hemispherical heads (UG-32)
//! - [`corrosion`] - rates, remaining life, inspection intervals (API 510)
//! - [`orchestrator`] - per-component bundle with pass/marginal/fail status
//!
//! Every function is synchronous, side-effect-free, and safe to call from
//! any number of threads concurrently; the only shared state is the
//! immutable material table.

pub mod corrosion;
pub(crate) mod geometry;
pub mod heads;
pub mod input;
pub mod orchestrator;
pub mod result;
pub mod shell;

// Re-export commonly used types
pub use corrosion::{GoverningRate, IntervalClassification, RemainingLife, PROJECTION_RATE_FACTOR};
pub use input::{CalculationInput, ComponentKind, HeadType, TorisphericalGeometry, VesselOrientation};
pub use orchestrator::{
    evaluate, evaluate_with_defaults, CalculationSummary, FitnessStatus, FullCalculationResult,
};
pub use result::{
    Assumption, CalculationResult, CalculationType, RateBasis, ValidationStatus, Warning,
};
