//! # Code References
//!
//! References to the inspection and construction codes behind every formula
//! and tabulated value. Each calculation result cites its source so a
//! regulator or third-party auditor can verify the number against the
//! governing paragraph without re-deriving anything.
//!
//! ## Covered standards
//!
//! - ASME Section VIII Division 1 (construction: UG-27 shells, UG-32 heads)
//! - ASME Section II Part D (allowable stress tables)
//! - API 510 (in-service inspection: corrosion rates, remaining life,
//!   inspection intervals)

use serde::{Deserialize, Serialize};

/// Reference to a pressure-vessel code or standard.
///
/// All formulas and tabulated values cite their source for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// ASME Boiler and Pressure Vessel Code, Section VIII, Division 1
    AsmeViiiDiv1 {
        year: u16,
        paragraph: &'static str,
    },
    /// ASME Section II Part D (material properties / allowable stresses)
    AsmeIiD {
        year: u16,
        table: &'static str,
    },
    /// API 510 Pressure Vessel Inspection Code
    Api510 {
        edition: u16,
        section: &'static str,
    },
}

impl CodeReference {
    /// Format the reference for display in reports and audit records
    pub fn citation(&self) -> String {
        match self {
            CodeReference::AsmeViiiDiv1 { year, paragraph } => {
                format!("ASME VIII Div.1 ({}) {}", year, paragraph)
            }
            CodeReference::AsmeIiD { year, table } => {
                format!("ASME II-D ({}) Table {}", year, table)
            }
            CodeReference::Api510 { edition, section } => {
                format!("API 510 {}th Ed. Section {}", edition, section)
            }
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::AsmeViiiDiv1 { .. } => "ASME VIII-1",
            CodeReference::AsmeIiD { .. } => "ASME II-D",
            CodeReference::Api510 { .. } => "API 510",
        }
    }
}

/// Code year for all ASME VIII-1 formula citations emitted by this engine.
pub const ASME_VIII_YEAR: u16 = 2023;

/// Table year for all ASME II-D stress-table citations.
pub const ASME_IID_YEAR: u16 = 2023;

/// API 510 edition for all inspection-policy citations.
pub const API_510_EDITION: u16 = 11;
