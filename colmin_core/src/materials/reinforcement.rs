//! Reinforcing Steel (EN 1992-1-1 / EN 10080)
//!
//! Grades of ribbed reinforcing steel with their design stress-strain laws.
//! The design diagram is elastic up to the design yield strain, then a
//! horizontal top branch (EN 1992-1-1 §3.2.7(2), branch b with k = 1).
//!
//! The dimensioning formulas hard-code the B500 design values (fyd =
//! 435 N/mm², Es = 200 000 N/mm²), and consult the law at a fixed 1.75‰
//! strain for the axial-capacity contribution of the reinforcement.
//!
//! ## Example
//!
//! ```rust
//! use colmin_core::materials::SteelGrade;
//!
//! let law = SteelGrade::B500.design_diagram();
//! assert!((law.stress_at(1.75) - 350.0).abs() < 1e-9); // elastic branch
//! assert!((law.stress_at(10.0) - 435.0).abs() < 1e-9); // yield plateau
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::materials::diagram::StressStrainDiagram;

/// Modulus of elasticity of reinforcing steel, Es (MPa)
pub const ES_MPA: f64 = 200_000.0;

/// Strain limit of the horizontal top branch (‰)
pub const EPS_UD_PERMILLE: f64 = 45.0;

/// Reinforcing steel grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelGrade {
    /// B400 (fyd = 348 N/mm²)
    B400,
    /// B500 (fyd = 435 N/mm²) - the common European grade
    B500,
    /// B600 (fyd = 522 N/mm²)
    B600,
}

impl SteelGrade {
    /// All steel grades for UI selection
    pub const ALL: [SteelGrade; 3] = [SteelGrade::B400, SteelGrade::B500, SteelGrade::B600];

    /// Design yield stress fyd (MPa).
    ///
    /// These are the conventional rounded design values (fyk / 1.15) the
    /// dimensioning formulas use.
    pub fn fyd_mpa(&self) -> f64 {
        match self {
            SteelGrade::B400 => 348.0,
            SteelGrade::B500 => 435.0,
            SteelGrade::B600 => 522.0,
        }
    }

    /// Design yield strain, eps_yd = fyd / Es (‰)
    pub fn eps_yd_permille(&self) -> f64 {
        self.fyd_mpa() / ES_MPA * 1000.0
    }

    /// Design stress-strain law: elastic branch to eps_yd, horizontal top
    /// branch to the strain limit.
    pub fn design_diagram(&self) -> StressStrainDiagram {
        StressStrainDiagram::new(vec![
            (0.0, 0.0),
            (self.eps_yd_permille(), self.fyd_mpa()),
            (EPS_UD_PERMILLE, self.fyd_mpa()),
        ])
        .expect("grade diagrams are well-formed")
    }

    /// Get display name (e.g. "B500")
    pub fn display_name(&self) -> &'static str {
        match self {
            SteelGrade::B400 => "B400",
            SteelGrade::B500 => "B500",
            SteelGrade::B600 => "B600",
        }
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The B500 design law, shared by every solve (hot path).
pub static B500: Lazy<StressStrainDiagram> = Lazy::new(|| SteelGrade::B500.design_diagram());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_b500_design_values() {
        assert_eq!(SteelGrade::B500.fyd_mpa(), 435.0);
        assert!((SteelGrade::B500.eps_yd_permille() - 2.175).abs() < 1e-12);
    }

    #[test]
    fn test_elastic_branch_at_1_75_permille() {
        // The axial-capacity formula consults the law at 1.75‰: below yield,
        // so stress = Es * eps = 350 MPa.
        let law = SteelGrade::B500.design_diagram();
        assert!((law.stress_at(1.75) - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_yield_plateau() {
        let law = SteelGrade::B500.design_diagram();
        assert!((law.stress_at(2.175) - 435.0).abs() < 1e-9);
        assert!((law.stress_at(25.0) - 435.0).abs() < 1e-9);
        assert!((law.stress_at(EPS_UD_PERMILLE) - 435.0).abs() < 1e-9);
    }

    #[test]
    fn test_static_b500_matches_grade() {
        assert_eq!(*B500, SteelGrade::B500.design_diagram());
    }

    #[test]
    fn test_other_grades() {
        assert!((SteelGrade::B400.design_diagram().stress_at(10.0) - 348.0).abs() < 1e-9);
        assert!((SteelGrade::B600.design_diagram().stress_at(10.0) - 522.0).abs() < 1e-9);
    }

    #[test]
    fn test_serialization() {
        let grade = SteelGrade::B500;
        let json = serde_json::to_string(&grade).unwrap();
        let roundtrip: SteelGrade = serde_json::from_str(&json).unwrap();
        assert_eq!(grade, roundtrip);
    }
}
