//! # Unit Types
//!
//! Type-safe wrappers for engineering units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64
//! wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Vessel inspection calculations use a fixed set of US customary units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## US Customary Units (Fixed)
//!
//! The engine never infers or converts units implicitly; inputs are defined
//! in these units and the engine computes in them:
//! - Length: inches (in), feet (ft)
//! - Pressure/stress: pounds per square inch (psi)
//! - Temperature: degrees Fahrenheit (F)
//! - Time: years
//! - Corrosion rate: inches per year (in/yr)
//!
//! ## Example
//!
//! ```rust
//! use vessel_core::units::{Feet, Inches};
//!
//! let height = Inches(96.0);
//! let height_ft: Feet = height.into();
//! assert_eq!(height_ft.0, 8.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Pressure / Stress
// ============================================================================

/// Pressure or stress in pounds per square inch (psi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

// ============================================================================
// Temperature
// ============================================================================

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DegF(pub f64);

// ============================================================================
// Time and Rates
// ============================================================================

/// Elapsed or remaining time in years
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Years(pub f64);

/// Corrosion rate in inches per year
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InchesPerYear(pub f64);

impl InchesPerYear {
    /// Thickness consumed over a span of years
    pub fn loss_over(self, span: Years) -> Inches {
        Inches(self.0 * span.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Inches);
impl_arithmetic!(Feet);
impl_arithmetic!(Psi);
impl_arithmetic!(DegF);
impl_arithmetic!(Years);
impl_arithmetic!(InchesPerYear);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_feet() {
        let h = Inches(130.26);
        let ft: Feet = h.into();
        assert!((ft.0 - 10.855).abs() < 1e-3);
    }

    #[test]
    fn test_rate_loss_over_span() {
        let rate = InchesPerYear(0.005);
        let loss = rate.loss_over(Years(10.0));
        assert!((loss.0 - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = Psi(150.0);
        let b = Psi(50.0);
        assert_eq!((a + b).0, 200.0);
        assert_eq!((a - b).0, 100.0);
        assert_eq!((a * 2.0).0, 300.0);
        assert_eq!((a / 2.0).0, 75.0);
    }

    #[test]
    fn test_serialization() {
        let t = DegF(650.0);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "650.0");

        let roundtrip: DegF = serde_json::from_str(&json).unwrap();
        assert_eq!(t, roundtrip);
    }
}
