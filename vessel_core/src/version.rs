//! # Locked Engine and Database Versions
//!
//! The calculation engine is "locked": its formulas and its material stress
//! table must never change silently between runs. Both version strings are
//! defined here, once, and embedded into every emitted result so an audit
//! trail can always be replayed against the exact revision that produced it.
//!
//! Any change to a formula, a defaulting rule, or a tabulated stress value
//! MUST bump the corresponding constant in the same commit.

/// Version of the calculation engine (formulas, defaulting rules, policy
/// logic). Embedded in every [`crate::calculations::CalculationResult`].
pub const CALCULATION_ENGINE_VERSION: &str = "1.2.0";

/// Version of the allowable-stress table in [`crate::materials`].
///
/// The table is an immutable constant compiled into the binary; it is not
/// hot-patchable. A revised table is a new version.
pub const MATERIAL_DATABASE_VERSION: &str = "IID-1A-2023.1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_nonempty() {
        assert!(!CALCULATION_ENGINE_VERSION.is_empty());
        assert!(!MATERIAL_DATABASE_VERSION.is_empty());
    }
}
