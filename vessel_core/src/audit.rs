//! # Audit Recorder Interface
//!
//! The engine produces audit-ready data; persisting it is an external,
//! append-only concern. This module defines the entry shape and the recorder
//! seam, plus a best-effort helper that never lets an audit failure block or
//! fail a calculation: a failed write is swallowed and logged.
//!
//! The engine never reads audit records back.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::audit::{record_calculation, MemoryAuditRecorder};
//! use vessel_core::calculations::input::CalculationInput;
//! use vessel_core::calculations::orchestrator::evaluate_with_defaults;
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
//! let bundle = evaluate_with_defaults(&input);
//!
//! let recorder = MemoryAuditRecorder::new();
//! record_calculation(&recorder, "jdoe", "vessel_components", "V-101", &input, &bundle);
//! assert!(!recorder.entries().is_empty());
//! ```

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::calculations::orchestrator::FullCalculationResult;
use crate::calculations::result::{CalculationResult, CalculationType};
use crate::calculations::input::CalculationInput;
use crate::version::{CALCULATION_ENGINE_VERSION, MATERIAL_DATABASE_VERSION};

/// Error surfaced by a recorder implementation.
///
/// Never propagated to calculation callers; see [`record_calculation`].
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AuditError {
    /// The backing store rejected or failed the write
    #[error("Audit write failed: {reason}")]
    WriteFailed { reason: String },

    /// The entry could not be serialized for storage
    #[error("Audit serialization failed: {reason}")]
    SerializationFailed { reason: String },
}

/// One append-only audit record for one computed quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique entry id
    pub id: Uuid,
    /// Acting user or service identity
    pub user: String,
    /// Logical table/collection the record belongs to
    pub table_name: String,
    /// Component identifier the calculation belongs to
    pub record_id: String,
    /// Which quantity was computed
    pub calculation_type: CalculationType,
    /// Input record snapshot, verbatim
    pub input_snapshot: serde_json::Value,
    /// Named intermediates from the result, for independent replay
    pub output_intermediates: serde_json::Value,
    /// Code citation for the formula applied
    pub code_reference: Option<String>,
    /// Locked engine version
    pub engine_version: String,
    /// Locked stress-table version
    pub database_version: String,
    /// When the entry was assembled
    pub recorded_at: DateTime<Utc>,
}

/// Append-only audit sink.
///
/// Implementations persist entries however the surrounding service chooses;
/// the engine only ever appends.
pub trait AuditRecorder {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError>;
}

/// In-memory recorder for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryAuditRecorder {
    entries: Mutex<Vec<AuditEntry>>,
}

impl MemoryAuditRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().expect("audit lock poisoned").clone()
    }
}

impl AuditRecorder for MemoryAuditRecorder {
    fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries.lock().expect("audit lock poisoned").push(entry);
        Ok(())
    }
}

/// Assemble one audit entry from a finished sub-calculation.
fn entry_for(
    user: &str,
    table_name: &str,
    record_id: &str,
    input_snapshot: &serde_json::Value,
    result: &CalculationResult,
) -> AuditEntry {
    AuditEntry {
        id: Uuid::new_v4(),
        user: user.to_string(),
        table_name: table_name.to_string(),
        record_id: record_id.to_string(),
        calculation_type: result.calculation_type,
        input_snapshot: input_snapshot.clone(),
        output_intermediates: serde_json::to_value(&result.intermediates)
            .unwrap_or(serde_json::Value::Null),
        code_reference: result.code_reference.clone(),
        engine_version: CALCULATION_ENGINE_VERSION.to_string(),
        database_version: MATERIAL_DATABASE_VERSION.to_string(),
        recorded_at: Utc::now(),
    }
}

/// Record every sub-calculation of a bundle, best-effort.
///
/// Recorder failures are swallowed and logged; this function never fails
/// and never blocks the calculation path on audit trouble.
pub fn record_calculation(
    recorder: &dyn AuditRecorder,
    user: &str,
    table_name: &str,
    record_id: &str,
    input: &CalculationInput,
    bundle: &FullCalculationResult,
) {
    let input_snapshot = match serde_json::to_value(input) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            warn!(%record_id, %error, "audit input snapshot failed; recording without it");
            serde_json::Value::Null
        }
    };

    let results = [
        Some(&bundle.t_required),
        Some(&bundle.mawp),
        bundle.corrosion_rate_lt.as_ref(),
        bundle.corrosion_rate_st.as_ref(),
        bundle.remaining_life.as_ref(),
        bundle.next_inspection_interval.as_ref(),
        bundle.projected_mawp.as_ref(),
    ];
    for result in results.into_iter().flatten() {
        let entry = entry_for(user, table_name, record_id, &input_snapshot, result);
        if let Err(error) = recorder.record(entry) {
            warn!(
                %record_id,
                calculation_type = %result.calculation_type,
                %error,
                "audit write failed; calculation result is unaffected"
            );
        }
    }
}
