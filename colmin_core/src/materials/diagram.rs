//! Piecewise-linear stress-strain diagrams.
//!
//! A diagram maps a strain (in permille) to a stress (MPa) by linear
//! interpolation between its points. Diagrams are the common currency for
//! material laws in this crate: the concrete compression block, the cracked
//! tensile zone and the reinforcement design law are all diagrams, so the
//! capacity search can consult them uniformly.
//!
//! ## Conventions
//!
//! - Strains are positive magnitudes in permille (‰); the caller applies
//!   sign conventions.
//! - The first point is the origin (0, 0), strains strictly ascend.
//! - Beyond the last point the material is exhausted and the stress is 0.
//!
//! ## Example
//!
//! ```rust
//! use colmin_core::materials::StressStrainDiagram;
//!
//! // Bi-linear law: elastic to 1.75‰, plateau at 20 MPa until 3.5‰
//! let law = StressStrainDiagram::new(vec![(0.0, 0.0), (1.75, 20.0), (3.5, 20.0)]).unwrap();
//! assert!((law.stress_at(0.875) - 10.0).abs() < 1e-12);
//! assert_eq!(law.stress_at(3.5), 20.0);
//! assert_eq!(law.stress_at(4.0), 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Piecewise-linear stress-strain law.
///
/// Points are (strain ‰, stress MPa), strictly ascending in strain,
/// starting at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressStrainDiagram {
    points: Vec<(f64, f64)>,
}

impl StressStrainDiagram {
    /// Build a diagram from its polyline points, validating the shape.
    pub fn new(points: Vec<(f64, f64)>) -> CalcResult<Self> {
        if points.is_empty() {
            return Err(CalcError::invalid_input(
                "points",
                "[]",
                "A stress-strain diagram needs at least one point",
            ));
        }
        if points[0] != (0.0, 0.0) {
            return Err(CalcError::invalid_input(
                "points",
                format!("({}, {})", points[0].0, points[0].1),
                "A stress-strain diagram must start at the origin",
            ));
        }
        for pair in points.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(CalcError::invalid_input(
                    "points",
                    pair[1].0.to_string(),
                    "Strains must be strictly ascending",
                ));
            }
        }
        for &(strain, stress) in &points {
            if !strain.is_finite() || !stress.is_finite() || stress < 0.0 {
                return Err(CalcError::invalid_input(
                    "points",
                    format!("({}, {})", strain, stress),
                    "Stresses must be finite and non-negative",
                ));
            }
        }
        Ok(Self { points })
    }

    /// Stress (MPa) at a strain magnitude (‰), by linear interpolation.
    ///
    /// Negative strains and strains beyond the ultimate point return 0.
    pub fn stress_at(&self, strain_permille: f64) -> f64 {
        if strain_permille < 0.0 || strain_permille > self.ultimate_strain() {
            return 0.0;
        }
        for pair in self.points.windows(2) {
            let (e0, s0) = pair[0];
            let (e1, s1) = pair[1];
            if strain_permille <= e1 {
                return s0 + (s1 - s0) * (strain_permille - e0) / (e1 - e0);
            }
        }
        // Single-point diagram (the degenerate zero law)
        0.0
    }

    /// Strain (‰) of the last diagram point; the material carries no stress
    /// beyond it.
    pub fn ultimate_strain(&self) -> f64 {
        self.points.last().map(|&(e, _)| e).unwrap_or(0.0)
    }

    /// Peak stress (MPa) over the diagram.
    pub fn peak_stress(&self) -> f64 {
        self.points.iter().map(|&(_, s)| s).fold(0.0, f64::max)
    }

    /// The polyline points of this diagram.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bilinear() -> StressStrainDiagram {
        StressStrainDiagram::new(vec![(0.0, 0.0), (1.75, 13.33), (3.5, 13.33)]).unwrap()
    }

    #[test]
    fn test_interpolation() {
        let law = bilinear();
        assert!((law.stress_at(0.875) - 6.665).abs() < 1e-9);
        assert!((law.stress_at(1.75) - 13.33).abs() < 1e-12);
        assert!((law.stress_at(2.5) - 13.33).abs() < 1e-12);
        assert!((law.stress_at(3.5) - 13.33).abs() < 1e-12);
    }

    #[test]
    fn test_outside_range_is_zero() {
        let law = bilinear();
        assert_eq!(law.stress_at(-0.5), 0.0);
        assert_eq!(law.stress_at(3.6), 0.0);
    }

    #[test]
    fn test_ultimate_and_peak() {
        let law = bilinear();
        assert_eq!(law.ultimate_strain(), 3.5);
        assert!((law.peak_stress() - 13.33).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_descending_strains() {
        let result = StressStrainDiagram::new(vec![(0.0, 0.0), (2.0, 10.0), (1.0, 5.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_missing_origin() {
        let result = StressStrainDiagram::new(vec![(0.5, 0.0), (2.0, 10.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_negative_stress() {
        let result = StressStrainDiagram::new(vec![(0.0, 0.0), (2.0, -10.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization() {
        let law = bilinear();
        let json = serde_json::to_string(&law).unwrap();
        let roundtrip: StressStrainDiagram = serde_json::from_str(&json).unwrap();
        assert_eq!(law, roundtrip);
    }
}
