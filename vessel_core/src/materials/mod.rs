//! # Material Stress Database
//!
//! Versioned, read-only allowable-stress data for pressure-vessel materials
//! per ASME Section II Part D. The table is compiled into the binary and
//! accessed through a process-wide immutable handle; every lookup result
//! carries the database version for audit traceability.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::materials::{database, LookupStatus};
//!
//! let db = database();
//! let result = db.lookup("SA-516 Gr 70", 100.0);
//! assert_eq!(result.status, LookupStatus::Exact);
//! assert_eq!(result.stress_psi, Some(20_000.0));
//! ```

pub mod allowable_stress;

pub use allowable_stress::{
    database, AllowableStressDb, AllowableStressResult, LookupStatus, MaterialCurve,
};
