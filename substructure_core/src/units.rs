//! # Unit Types
//!
//! Type-safe wrappers for the units the substructure model works in. These
//! are plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## Conventions
//!
//! - Length: inches internally, feet for volumes
//! - Volume: cubic feet (ft³), cubic yards (yd³) for concrete totals
//! - Angle: degrees at the parameter boundary, radians everywhere inside
//!
//! ## Example
//!
//! ```rust
//! use substructure_core::units::{CuFt, CuYd, Degrees, Feet, Inches, Radians};
//!
//! let span = Inches(1800.0);
//! let span_ft: Feet = span.into();
//! assert_eq!(span_ft.0, 150.0);
//!
//! let concrete: CuYd = CuFt(54.0).into();
//! assert_eq!(concrete.0, 2.0);
//!
//! let start: Radians = Degrees(180.0).into();
//! assert!((start.0 - std::f64::consts::PI).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

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
// Area Units
// ============================================================================

/// Area in square inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqIn(pub f64);

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl From<SqFt> for SqIn {
    fn from(sqft: SqFt) -> Self {
        SqIn(sqft.0 * 144.0)
    }
}

impl From<SqIn> for SqFt {
    fn from(sqin: SqIn) -> Self {
        SqFt(sqin.0 / 144.0)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuFt(pub f64);

/// Volume in cubic yards (1 yd³ = 27 ft³)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuYd(pub f64);

impl From<CuFt> for CuYd {
    fn from(cuft: CuFt) -> Self {
        CuYd(cuft.0 / 27.0)
    }
}

impl From<CuYd> for CuFt {
    fn from(cuyd: CuYd) -> Self {
        CuFt(cuyd.0 * 27.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees (parameter boundary only)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
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

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
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

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(SqIn);
impl_arithmetic!(SqFt);
impl_arithmetic!(CuFt);
impl_arithmetic!(CuYd);
impl_arithmetic!(Degrees);
impl_arithmetic!(Radians);

/// Box volume in cubic feet from three edge lengths given in inches.
pub fn box_volume_cuft(a: Inches, b: Inches, c: Inches) -> CuFt {
    CuFt((a.0 / 12.0) * (b.0 / 12.0) * (c.0 / 12.0))
}

/// Round for display only; internal values are never rounded.
pub fn format_2dp(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_inches() {
        let ft = Feet(10.0);
        let inches: Inches = ft.into();
        assert_eq!(inches.0, 120.0);
    }

    #[test]
    fn test_cubic_yards() {
        let yd: CuYd = CuFt(81.0).into();
        assert_eq!(yd.0, 3.0);
        let ft: CuFt = CuYd(2.0).into();
        assert_eq!(ft.0, 54.0);
    }

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(90.0).into();
        assert!((rad.0 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = CuFt(10.0);
        let b = CuFt(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
        let total: CuFt = vec![a, b, CuFt(1.5)].into_iter().sum();
        assert_eq!(total.0, 16.5);
    }

    #[test]
    fn test_box_volume() {
        // 12" x 24" x 36" = 1 x 2 x 3 ft
        assert_eq!(box_volume_cuft(Inches(12.0), Inches(24.0), Inches(36.0)).0, 6.0);
    }

    #[test]
    fn test_format_2dp() {
        assert_eq!(format_2dp(2.004), "2.00");
        assert_eq!(format_2dp(7040.0), "7040.00");
    }

    #[test]
    fn test_serialization() {
        let v = CuFt(12.5);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: CuFt = serde_json::from_str(&json).unwrap();
        assert_eq!(v, roundtrip);
    }
}
