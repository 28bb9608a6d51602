//! Allowable Stress Database (ASME II-D Table 1A)
//!
//! Maximum allowable stress vs. metal temperature for the plate, pipe, and
//! stainless grades most commonly found in API 510 vessel inspections.
//!
//! ## Data Source
//!
//! Values follow ASME Section II Part D, Table 1A conventions: stress is
//! constant from -20 F through the moderate-temperature columns, then steps
//! down toward each material's tabulated limit. The table is a compiled-in
//! constant; revising any value requires bumping
//! [`MATERIAL_DATABASE_VERSION`](crate::version::MATERIAL_DATABASE_VERSION).
//!
//! ## Lookup Rules
//!
//! - Unknown materials fail; the database never guesses a specification.
//! - Temperatures outside a material's tabulated range fail; the database
//!   never extrapolates.
//! - Exact tabulated temperatures bypass interpolation; anything strictly
//!   between two points is linearly interpolated.
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::materials::{database, LookupStatus};
//!
//! let db = database();
//!
//! // Exact column hit
//! let exact = db.lookup("SA-516-70", 500.0);
//! assert_eq!(exact.status, LookupStatus::Exact);
//!
//! // Between 600 F (19,400 psi) and 650 F (18,800 psi)
//! let mid = db.lookup("SA-516-70", 625.0);
//! assert_eq!(mid.status, LookupStatus::Interpolated);
//! assert_eq!(mid.stress_psi, Some(19_100.0));
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::codes::{CodeReference, ASME_IID_YEAR};
use crate::units::Psi;
use crate::version::MATERIAL_DATABASE_VERSION;

/// Outcome classification for a stress lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupStatus {
    /// Requested temperature matched a tabulated point exactly
    Exact,
    /// Value linearly interpolated between two tabulated points
    Interpolated,
    /// Lookup failed (unknown material or temperature out of range)
    Error,
}

/// Result of one allowable-stress lookup.
///
/// Constructed fresh on every call; never cached across calls. Carries the
/// database version so downstream results stay replayable against the exact
/// table revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowableStressResult {
    /// Allowable stress in psi, `None` on failure
    pub stress_psi: Option<f64>,
    /// Exact, interpolated, or error
    pub status: LookupStatus,
    /// Human-readable account of how the value was obtained (or why not)
    pub message: String,
    /// Version of the stress table that produced this result
    pub database_version: String,
    /// Tabulated temperature range (min F, max F) for the resolved material
    pub temperature_range_f: Option<(f64, f64)>,
}

impl AllowableStressResult {
    fn error(message: String) -> Self {
        AllowableStressResult {
            stress_psi: None,
            status: LookupStatus::Error,
            message,
            database_version: MATERIAL_DATABASE_VERSION.to_string(),
            temperature_range_f: None,
        }
    }

    /// True when the lookup produced a usable stress value
    pub fn is_ok(&self) -> bool {
        self.status != LookupStatus::Error
    }

    /// Get the stress as a typed unit
    pub fn stress(&self) -> Option<Psi> {
        self.stress_psi.map(Psi)
    }
}

/// One material's allowable-stress curve.
///
/// Points are `(temperature_F, stress_psi)`, sorted ascending by
/// temperature.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialCurve {
    /// Canonical specification key (e.g. "SA-516-70")
    pub spec: &'static str,
    /// Product-form description for display
    pub description: &'static str,
    /// Tabulated points, ascending temperature
    pub points: &'static [(f64, f64)],
}

impl MaterialCurve {
    /// Tabulated temperature range (min F, max F)
    pub fn temperature_range_f(&self) -> (f64, f64) {
        (self.points[0].0, self.points[self.points.len() - 1].0)
    }
}

// Curve points follow the II-D column layout: flat through the moderate
// columns, stepping down toward the tabulated limit.
const CURVES: &[MaterialCurve] = &[
    MaterialCurve {
        spec: "SA-516-70",
        description: "Carbon steel plate, Grade 70",
        points: &[
            (-20.0, 20_000.0),
            (100.0, 20_000.0),
            (200.0, 20_000.0),
            (300.0, 20_000.0),
            (400.0, 20_000.0),
            (500.0, 20_000.0),
            (600.0, 19_400.0),
            (650.0, 18_800.0),
            (700.0, 18_100.0),
            (750.0, 14_800.0),
            (800.0, 12_000.0),
        ],
    },
    MaterialCurve {
        spec: "SA-516-60",
        description: "Carbon steel plate, Grade 60",
        points: &[
            (-20.0, 17_100.0),
            (100.0, 17_100.0),
            (200.0, 17_100.0),
            (300.0, 17_100.0),
            (400.0, 17_100.0),
            (500.0, 17_100.0),
            (600.0, 16_700.0),
            (650.0, 16_200.0),
            (700.0, 15_600.0),
            (750.0, 13_300.0),
            (800.0, 10_700.0),
        ],
    },
    MaterialCurve {
        spec: "SA-285-C",
        description: "Carbon steel plate, low/intermediate strength",
        points: &[
            (-20.0, 15_700.0),
            (100.0, 15_700.0),
            (200.0, 15_700.0),
            (300.0, 15_700.0),
            (400.0, 15_700.0),
            (500.0, 15_700.0),
            (600.0, 15_300.0),
            (650.0, 14_800.0),
            (700.0, 13_900.0),
        ],
    },
    MaterialCurve {
        spec: "SA-612",
        description: "Carbon steel plate for moderate/low temperature",
        points: &[
            (-20.0, 20_000.0),
            (100.0, 20_000.0),
            (200.0, 20_000.0),
            (300.0, 20_000.0),
            (400.0, 19_600.0),
            (500.0, 18_800.0),
            (600.0, 17_900.0),
            (650.0, 17_300.0),
        ],
    },
    MaterialCurve {
        spec: "SA-106-B",
        description: "Seamless carbon steel pipe, Grade B",
        points: &[
            (-20.0, 17_100.0),
            (100.0, 17_100.0),
            (200.0, 17_100.0),
            (300.0, 17_100.0),
            (400.0, 17_100.0),
            (500.0, 17_100.0),
            (600.0, 17_100.0),
            (650.0, 17_000.0),
            (700.0, 16_600.0),
            (750.0, 13_400.0),
            (800.0, 10_800.0),
        ],
    },
    MaterialCurve {
        spec: "SA-36",
        description: "Structural carbon steel",
        points: &[
            (-20.0, 16_600.0),
            (100.0, 16_600.0),
            (200.0, 16_600.0),
            (300.0, 16_600.0),
            (400.0, 16_600.0),
            (500.0, 16_600.0),
            (600.0, 16_300.0),
            (650.0, 15_900.0),
        ],
    },
    MaterialCurve {
        spec: "SA-240-304",
        description: "Stainless steel plate, Type 304",
        points: &[
            (-20.0, 20_000.0),
            (100.0, 20_000.0),
            (200.0, 20_000.0),
            (300.0, 18_600.0),
            (400.0, 17_500.0),
            (500.0, 16_700.0),
            (600.0, 16_200.0),
            (650.0, 16_000.0),
            (700.0, 15_800.0),
            (750.0, 15_500.0),
            (800.0, 15_200.0),
        ],
    },
    MaterialCurve {
        spec: "SA-240-316L",
        description: "Stainless steel plate, Type 316L",
        points: &[
            (-20.0, 16_700.0),
            (100.0, 16_700.0),
            (200.0, 16_700.0),
            (300.0, 15_400.0),
            (400.0, 14_300.0),
            (500.0, 13_500.0),
            (600.0, 12_900.0),
            (650.0, 12_700.0),
            (700.0, 12_500.0),
        ],
    },
];

/// The allowable-stress database handle.
///
/// Wraps the compiled-in curve table; construct via [`database`].
#[derive(Debug)]
pub struct AllowableStressDb {
    curves: &'static [MaterialCurve],
}

static DATABASE: Lazy<AllowableStressDb> = Lazy::new(|| AllowableStressDb { curves: CURVES });

/// Get the process-wide stress database.
pub fn database() -> &'static AllowableStressDb {
    &DATABASE
}

impl AllowableStressDb {
    /// Version of the stress table
    pub fn version(&self) -> &'static str {
        MATERIAL_DATABASE_VERSION
    }

    /// Code reference for the table itself
    pub fn code_reference(&self) -> CodeReference {
        CodeReference::AsmeIiD {
            year: ASME_IID_YEAR,
            table: "1A",
        }
    }

    /// All canonical specification keys, in table order
    pub fn material_specs(&self) -> Vec<&'static str> {
        self.curves.iter().map(|c| c.spec).collect()
    }

    /// Get the curve for a canonical key
    pub fn curve(&self, canonical: &str) -> Option<&MaterialCurve> {
        self.curves.iter().find(|c| c.spec == canonical)
    }

    /// Resolve a material specification string to its canonical table key.
    ///
    /// Accepts common variant spellings ("SA-516 Gr 70", "Grade 70",
    /// "Type 304", "TP304"). Resolution ladder, in order: direct match,
    /// structural rewrite, case-insensitive exact, substring fallback.
    /// Returns `None` when nothing resolves unambiguously - callers must
    /// then fail loudly, never guess a material.
    pub fn normalize(&self, material_spec: &str) -> Option<String> {
        let trimmed = material_spec.trim();
        if trimmed.is_empty() {
            return None;
        }

        // 1. Direct match against canonical keys
        if self.curve(trimmed).is_some() {
            return Some(trimmed.to_string());
        }

        // 2. Structural rewrite: case fold, strip grade/type markers,
        //    re-hyphenate ("SA-516 Gr. 70" -> "SA-516-70")
        let rewritten = structural_rewrite(trimmed);
        if self.curve(&rewritten).is_some() {
            return Some(rewritten);
        }

        // 3. Case-insensitive exact
        let lowered = trimmed.to_lowercase();
        if let Some(curve) = self
            .curves
            .iter()
            .find(|c| c.spec.to_lowercase() == lowered)
        {
            return Some(curve.spec.to_string());
        }

        // 4. Substring fallback on the rewritten form, accepted only when
        //    it identifies exactly one material
        let candidates: Vec<&MaterialCurve> = self
            .curves
            .iter()
            .filter(|c| c.spec.contains(rewritten.as_str()))
            .collect();
        match candidates.as_slice() {
            [single] => Some(single.spec.to_string()),
            _ => None,
        }
    }

    /// Look up the allowable stress for a material at a temperature.
    ///
    /// Never extrapolates: temperatures outside the tabulated range produce
    /// an error result. Exact tabulated hits bypass interpolation.
    pub fn lookup(&self, material_spec: &str, temperature_f: f64) -> AllowableStressResult {
        let canonical = match self.normalize(material_spec) {
            Some(key) => key,
            None => {
                return AllowableStressResult::error(format!(
                    "material specification '{}' not found in stress table",
                    material_spec
                ));
            }
        };
        // normalize() only returns keys present in the table
        let curve = match self.curve(&canonical) {
            Some(curve) => curve,
            None => {
                return AllowableStressResult::error(format!(
                    "material specification '{}' not found in stress table",
                    material_spec
                ));
            }
        };

        let (min_f, max_f) = curve.temperature_range_f();
        if temperature_f < min_f || temperature_f > max_f {
            return AllowableStressResult {
                stress_psi: None,
                status: LookupStatus::Error,
                message: format!(
                    "temperature {} F is outside the tabulated range {} F to {} F for {}",
                    temperature_f, min_f, max_f, canonical
                ),
                database_version: MATERIAL_DATABASE_VERSION.to_string(),
                temperature_range_f: Some((min_f, max_f)),
            };
        }

        // Exact hit bypasses interpolation
        if let Some(&(temp, stress)) = curve
            .points
            .iter()
            .find(|(temp, _)| *temp == temperature_f)
        {
            return AllowableStressResult {
                stress_psi: Some(stress),
                status: LookupStatus::Exact,
                message: format!("exact tabulated value for {} at {} F", canonical, temp),
                database_version: MATERIAL_DATABASE_VERSION.to_string(),
                temperature_range_f: Some((min_f, max_f)),
            };
        }

        // Strictly between two points: linear interpolation
        let upper_idx = curve
            .points
            .iter()
            .position(|(temp, _)| *temp > temperature_f)
            .unwrap_or(curve.points.len() - 1);
        let (t_lo, s_lo) = curve.points[upper_idx - 1];
        let (t_hi, s_hi) = curve.points[upper_idx];
        let fraction = (temperature_f - t_lo) / (t_hi - t_lo);
        let stress = s_lo + fraction * (s_hi - s_lo);

        AllowableStressResult {
            stress_psi: Some(stress),
            status: LookupStatus::Interpolated,
            message: format!(
                "interpolated for {} between {} F ({} psi) and {} F ({} psi)",
                canonical, t_lo, s_lo, t_hi, s_hi
            ),
            database_version: MATERIAL_DATABASE_VERSION.to_string(),
            temperature_range_f: Some((min_f, max_f)),
        }
    }
}

/// Rewrite a free-form specification string toward the canonical key shape:
/// uppercase, punctuation stripped, grade/type markers removed, tokens
/// joined by hyphens.
fn structural_rewrite(spec: &str) -> String {
    let upper = spec.to_uppercase().replace('.', " ");
    let mut tokens: Vec<String> = Vec::new();
    for raw in upper.split(|c: char| c == ' ' || c == '-' || c == '_') {
        if raw.is_empty() {
            continue;
        }
        match raw {
            "GRADE" | "GR" | "TYPE" | "TP" => continue,
            _ => {}
        }
        // "SA516" -> "SA", "516"; "TP304" -> "304"
        if let Some(rest) = raw.strip_prefix("TP") {
            if rest.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                tokens.push(rest.to_string());
                continue;
            }
        }
        if let Some(rest) = raw.strip_prefix("SA") {
            if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                tokens.push("SA".to_string());
                tokens.push(rest.to_string());
                continue;
            }
        }
        tokens.push(raw.to_string());
    }
    tokens.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        let result = database().lookup("SA-516-70", 100.0);
        assert_eq!(result.status, LookupStatus::Exact);
        assert_eq!(result.stress_psi, Some(20_000.0));
        assert_eq!(result.database_version, MATERIAL_DATABASE_VERSION);
        assert_eq!(result.temperature_range_f, Some((-20.0, 800.0)));
    }

    #[test]
    fn test_interpolated_lookup() {
        // 625 F sits midway between 600 F (19,400) and 650 F (18,800)
        let result = database().lookup("SA-516-70", 625.0);
        assert_eq!(result.status, LookupStatus::Interpolated);
        assert!((result.stress_psi.unwrap() - 19_100.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolation_on_flat_segment_is_flat() {
        // SA-612 at 125 F: both bracketing points are 20,000 psi
        let result = database().lookup("SA-612", 125.0);
        assert_eq!(result.status, LookupStatus::Interpolated);
        assert_eq!(result.stress_psi, Some(20_000.0));
    }

    #[test]
    fn test_unknown_material_fails() {
        let result = database().lookup("SA-999-XX", 100.0);
        assert_eq!(result.status, LookupStatus::Error);
        assert_eq!(result.stress_psi, None);
        assert!(result.message.contains("SA-999-XX"));
    }

    #[test]
    fn test_never_extrapolates() {
        let above = database().lookup("SA-516-70", 900.0);
        assert_eq!(above.status, LookupStatus::Error);
        assert_eq!(above.temperature_range_f, Some((-20.0, 800.0)));

        let below = database().lookup("SA-516-70", -40.0);
        assert_eq!(below.status, LookupStatus::Error);
    }

    #[test]
    fn test_range_boundaries_are_inclusive() {
        assert_eq!(
            database().lookup("SA-516-70", -20.0).status,
            LookupStatus::Exact
        );
        assert_eq!(
            database().lookup("SA-516-70", 800.0).status,
            LookupStatus::Exact
        );
    }

    #[test]
    fn test_normalize_variants() {
        let db = database();
        assert_eq!(db.normalize("SA-516-70").as_deref(), Some("SA-516-70"));
        assert_eq!(db.normalize("SA-516 Gr 70").as_deref(), Some("SA-516-70"));
        assert_eq!(db.normalize("SA-516 Gr. 70").as_deref(), Some("SA-516-70"));
        assert_eq!(db.normalize("SA 516 Grade 70").as_deref(), Some("SA-516-70"));
        assert_eq!(db.normalize("sa-516-70").as_deref(), Some("SA-516-70"));
        assert_eq!(db.normalize("SA516-70").as_deref(), Some("SA-516-70"));
    }

    #[test]
    fn test_normalize_substring_fallback() {
        let db = database();
        // "Grade 70" reduces to "70", contained only in SA-516-70
        assert_eq!(db.normalize("Grade 70").as_deref(), Some("SA-516-70"));
        assert_eq!(db.normalize("Type 304").as_deref(), Some("SA-240-304"));
        assert_eq!(db.normalize("TP304").as_deref(), Some("SA-240-304"));
        assert_eq!(db.normalize("TP316L").as_deref(), Some("SA-240-316L"));
    }

    #[test]
    fn test_normalize_rejects_ambiguous_and_unknown() {
        let db = database();
        assert_eq!(db.normalize("totally unknown alloy"), None);
        assert_eq!(db.normalize(""), None);
        // "SA" alone matches every carbon-steel key: ambiguous, must fail
        assert_eq!(db.normalize("SA"), None);
    }

    #[test]
    fn test_results_are_fresh_per_call() {
        let a = database().lookup("SA-285-C", 350.0);
        let b = database().lookup("SA-285-C", 350.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_material_specs_listing() {
        let specs = database().material_specs();
        assert!(specs.contains(&"SA-516-70"));
        assert!(specs.contains(&"SA-240-316L"));
        assert_eq!(specs.len(), 8);
    }

    #[test]
    fn test_serialization() {
        let result = database().lookup("SA-106-B", 650.0);
        let json = serde_json::to_string(&result).unwrap();
        let roundtrip: AllowableStressResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
