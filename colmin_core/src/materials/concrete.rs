//! Concrete Materials (EN 1992-1-1)
//!
//! Strength classes and design stress-strain diagrams for normal-weight
//! concrete up to C50/60. The dimensioning solver consumes the bi-linear
//! ULS compression law (EN 1992-1-1 §3.1.7(2)) together with a zero-stress
//! tension law for the cracked zone.
//!
//! ## Example
//!
//! ```rust
//! use colmin_core::materials::{Concrete, ConcreteClass};
//!
//! let c = Concrete::from_class(ConcreteClass::C20_25);
//! assert_eq!(c.fck_mpa(), 20.0);
//! let law = c.bi_linear_uls().unwrap();
//! assert_eq!(law.ultimate_strain(), 3.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::materials::diagram::StressStrainDiagram;

/// Partial safety factor for concrete (persistent/transient design situations)
pub const GAMMA_C: f64 = 1.5;

/// Compressive strain at the plateau of the bi-linear law, eps_c3 (‰)
pub const EPS_C3_PERMILLE: f64 = 1.75;

/// Ultimate compressive strain of the bi-linear law, eps_cu3 (‰)
pub const EPS_CU3_PERMILLE: f64 = 3.5;

/// Concrete strength classes (EN 1992-1-1 Table 3.1, fck ≤ 50 MPa)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcreteClass {
    #[serde(rename = "C20/25")]
    C20_25,
    #[serde(rename = "C25/30")]
    C25_30,
    #[serde(rename = "C30/37")]
    C30_37,
    #[serde(rename = "C35/45")]
    C35_45,
    #[serde(rename = "C40/50")]
    C40_50,
    #[serde(rename = "C45/55")]
    C45_55,
    #[serde(rename = "C50/60")]
    C50_60,
}

impl ConcreteClass {
    /// All strength classes for UI selection
    pub const ALL: [ConcreteClass; 7] = [
        ConcreteClass::C20_25,
        ConcreteClass::C25_30,
        ConcreteClass::C30_37,
        ConcreteClass::C35_45,
        ConcreteClass::C40_50,
        ConcreteClass::C45_55,
        ConcreteClass::C50_60,
    ];

    /// Characteristic cylinder strength fck (MPa)
    pub fn fck_mpa(&self) -> f64 {
        match self {
            ConcreteClass::C20_25 => 20.0,
            ConcreteClass::C25_30 => 25.0,
            ConcreteClass::C30_37 => 30.0,
            ConcreteClass::C35_45 => 35.0,
            ConcreteClass::C40_50 => 40.0,
            ConcreteClass::C45_55 => 45.0,
            ConcreteClass::C50_60 => 50.0,
        }
    }

    /// Get display name (e.g. "C20/25")
    pub fn display_name(&self) -> &'static str {
        match self {
            ConcreteClass::C20_25 => "C20/25",
            ConcreteClass::C25_30 => "C25/30",
            ConcreteClass::C30_37 => "C30/37",
            ConcreteClass::C35_45 => "C35/45",
            ConcreteClass::C40_50 => "C40/50",
            ConcreteClass::C45_55 => "C45/55",
            ConcreteClass::C50_60 => "C50/60",
        }
    }
}

impl std::fmt::Display for ConcreteClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A concrete material, by class or by arbitrary characteristic strength.
///
/// The dimensioning solver iterates over trial strengths coming straight
/// from user input, so arbitrary fck values are first-class here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Concrete {
    fck_mpa: f64,
}

impl Concrete {
    /// Concrete from a standard strength class
    pub fn from_class(class: ConcreteClass) -> Self {
        Self {
            fck_mpa: class.fck_mpa(),
        }
    }

    /// Concrete from an arbitrary characteristic strength (MPa)
    pub fn from_fck(fck_mpa: f64) -> Self {
        Self { fck_mpa }
    }

    /// Characteristic cylinder strength fck (MPa)
    pub fn fck_mpa(&self) -> f64 {
        self.fck_mpa
    }

    /// Design compressive strength fcd = fck / γc (MPa)
    pub fn fcd_mpa(&self) -> f64 {
        self.fck_mpa / GAMMA_C
    }

    /// Bi-linear ULS compression law: elastic to eps_c3, plateau at fcd
    /// until eps_cu3.
    pub fn bi_linear_uls(&self) -> CalcResult<StressStrainDiagram> {
        StressStrainDiagram::new(vec![
            (0.0, 0.0),
            (EPS_C3_PERMILLE, self.fcd_mpa()),
            (EPS_CU3_PERMILLE, self.fcd_mpa()),
        ])
    }

    /// Tension law for the cracked zone: concrete carries no tensile stress.
    pub fn no_tension() -> StressStrainDiagram {
        StressStrainDiagram::new(vec![(0.0, 0.0)]).expect("zero law is always valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_strengths() {
        assert_eq!(ConcreteClass::C20_25.fck_mpa(), 20.0);
        assert_eq!(ConcreteClass::C50_60.fck_mpa(), 50.0);
    }

    #[test]
    fn test_design_strength() {
        let c = Concrete::from_fck(20.0);
        assert!((c.fcd_mpa() - 13.333333333333334).abs() < 1e-12);
    }

    #[test]
    fn test_bi_linear_uls_shape() {
        let law = Concrete::from_class(ConcreteClass::C30_37).bi_linear_uls().unwrap();
        assert_eq!(law.ultimate_strain(), EPS_CU3_PERMILLE);
        // Plateau at fcd between eps_c3 and eps_cu3
        assert!((law.stress_at(1.75) - 20.0).abs() < 1e-12);
        assert!((law.stress_at(3.5) - 20.0).abs() < 1e-12);
        // Elastic branch at half the plateau strain
        assert!((law.stress_at(0.875) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_tension_is_zero_everywhere() {
        let law = Concrete::no_tension();
        assert_eq!(law.stress_at(0.0), 0.0);
        assert_eq!(law.stress_at(1.0), 0.0);
        assert_eq!(law.stress_at(100.0), 0.0);
    }

    #[test]
    fn test_serialization() {
        let class = ConcreteClass::C25_30;
        let json = serde_json::to_string(&class).unwrap();
        assert_eq!(json, "\"C25/30\"");
        let roundtrip: ConcreteClass = serde_json::from_str(&json).unwrap();
        assert_eq!(class, roundtrip);
    }
}
