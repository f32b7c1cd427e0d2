//! # Minimum Column Dimensioning (NEN-EN 1992-1-1)
//!
//! Computes the minimum square cross-section of a braced concrete column
//! under an axial load and end moments, including the second-order moment
//! of art. 5.8.8 (nominal-curvature method).
//!
//! ## Algorithm Overview
//!
//! 1. Iterate the width until the axial resistance Nrd matches the applied
//!    load (adaptive multiplicative corrections)
//! 2. Check the resulting section's moment capacity against the governing
//!    design moment M0Ed + M2
//! 3. If insufficient, re-iterate jointly on the moment and axial targets,
//!    growing the step damping whenever the corrections start to escalate
//!
//! The search is a heuristic local descent, not a global optimizer: it
//! terminates on tolerance bands or on hard iteration caps, and reports
//! non-convergence through the result's `validity` flag.
//!
//! ## Units
//!
//! N, mm, MPa. The axial load is signed, negative = compression; the
//! reinforcement ratio is a fraction of the gross area.
//!
//! ## Example
//!
//! ```rust
//! use colmin_core::calculations::column::{solve, ColumnDesignInput};
//!
//! let input = ColumnDesignInput::new("C-1", 0.0, 0.0, -900_000.0, 20.0, 0.01, 3000.0, 1.0);
//! let result = solve(&input).unwrap();
//! assert!(result.axial_iterations <= 51);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::convergence::{convergence_conditions, convergence_factor, AdaptiveDivisor};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{Concrete, StressStrainDiagram, B500, ES_MPA};
use crate::mnkappa::{MnKappa, MomentCapacity};
use crate::section::RectangularSection;
use crate::units::{KiloNewtonMeters, KiloNewtons, Millimeters, NewtonMillimeters, Newtons, SquareMillimeters};

/// Design yield stress the code formulas hard-code (B500, MPa)
const FYD_MPA: f64 = 435.0;

/// Design yield strain, eps_yd = fyd / Es (dimensionless)
const EPS_YD: f64 = FYD_MPA / ES_MPA;

/// Steel strain consulted for the axial-capacity contribution (‰)
const AXIAL_STEEL_STRAIN_PERMILLE: f64 = 1.75;

/// Balanced-failure relative axial load, n_bal
const N_BAL: f64 = 0.4;

/// Code shorthand for the radius of gyration of a rectangle: i = h / 3.46
const GYRATION_DIVISOR: f64 = 3.46;

/// Seed width for the search (mm)
const SEED_WIDTH_MM: f64 = 1000.0;

/// Iteration cap of the axial search; exceeded silently
const AXIAL_MAX_ITERATIONS: usize = 50;

/// Iteration cap of the joint search; exceeded with `validity = false`
const JOINT_MAX_ITERATIONS: usize = 30;

/// Fixed damping of the axial correction inside the joint search
const JOINT_AXIAL_DIVISOR: f64 = 3.0;

/// Absolute moment-surplus tolerance accepted as converged (N·mm)
const ABS_MOMENT_TOLERANCE_NMM: f64 = 0.25e6;

/// Fractional strain step of the capacity peak scan
const PEAK_SCAN_STEP: f64 = 0.05;

fn default_cover_fraction() -> f64 {
    0.2
}

fn default_aspect_ratio() -> f64 {
    1.0
}

/// Input parameters for a column dimensioning run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "C-1",
///   "m1_nmm": 0.0,
///   "m2_nmm": 0.0,
///   "ned_n": -900000.0,
///   "fck_mpa": 20.0,
///   "rho": 0.01,
///   "l0_mm": 3000.0,
///   "phi_eff": 1.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDesignInput {
    /// User label for this column (e.g. "C-1", "Basement column")
    pub label: String,

    /// First-order bending moment at one column end (N·mm, signed)
    pub m1_nmm: f64,

    /// First-order bending moment at the other column end (N·mm, signed)
    pub m2_nmm: f64,

    /// Applied axial force (N), negative = compression
    pub ned_n: f64,

    /// Characteristic concrete cylinder strength fck (MPa)
    pub fck_mpa: f64,

    /// Reinforcement ratio: total steel area / gross area (fraction)
    pub rho: f64,

    /// Effective buckling length l0 (mm)
    pub l0_mm: f64,

    /// Effective creep factor phi_eff
    pub phi_eff: f64,

    /// Reinforcement centroid distance from the face, as a fraction of the
    /// height (a·h)
    #[serde(default = "default_cover_fraction")]
    pub a: f64,

    /// Assumed width/height ratio of the trial sections (1 = square)
    #[serde(default = "default_aspect_ratio")]
    pub bh: f64,
}

impl ColumnDesignInput {
    /// Input with the standard cover fraction (0.2) and a square trial
    /// section.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        label: impl Into<String>,
        m1_nmm: f64,
        m2_nmm: f64,
        ned_n: f64,
        fck_mpa: f64,
        rho: f64,
        l0_mm: f64,
        phi_eff: f64,
    ) -> Self {
        Self {
            label: label.into(),
            m1_nmm,
            m2_nmm,
            ned_n,
            fck_mpa,
            rho,
            l0_mm,
            phi_eff,
            a: default_cover_fraction(),
            bh: default_aspect_ratio(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("m1_nmm", self.m1_nmm),
            ("m2_nmm", self.m2_nmm),
            ("ned_n", self.ned_n),
            ("fck_mpa", self.fck_mpa),
            ("rho", self.rho),
            ("l0_mm", self.l0_mm),
            ("phi_eff", self.phi_eff),
            ("a", self.a),
            ("bh", self.bh),
        ] {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Value must be finite",
                ));
            }
        }
        if self.ned_n >= 0.0 {
            return Err(CalcError::invalid_input(
                "ned_n",
                self.ned_n.to_string(),
                "Axial force must be compressive (negative)",
            ));
        }
        if self.fck_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "fck_mpa",
                self.fck_mpa.to_string(),
                "Characteristic strength must be positive",
            ));
        }
        if self.rho <= 0.0 || self.rho > 0.2 {
            return Err(CalcError::invalid_input(
                "rho",
                self.rho.to_string(),
                "Reinforcement ratio must be in (0, 0.2]",
            ));
        }
        if self.l0_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "l0_mm",
                self.l0_mm.to_string(),
                "Buckling length cannot be negative",
            ));
        }
        if self.phi_eff < 0.0 {
            return Err(CalcError::invalid_input(
                "phi_eff",
                self.phi_eff.to_string(),
                "Creep factor cannot be negative",
            ));
        }
        if self.a <= 0.0 || self.a >= 0.5 {
            return Err(CalcError::invalid_input(
                "a",
                self.a.to_string(),
                "Cover fraction must be in (0, 0.5)",
            ));
        }
        if self.bh <= 0.0 {
            return Err(CalcError::invalid_input(
                "bh",
                self.bh.to_string(),
                "Width/height ratio must be positive",
            ));
        }
        Ok(())
    }

    /// Governing first-order design moment M0e per art. 5.8.8.2(2).
    ///
    /// m02 = max(m1, m2), m01 = min(m1, m2), m0e = 0.6·m02 + 0.4·m01;
    /// returns m0e when m0e > 0.4·m02, otherwise 0.4·m0e.
    pub fn governing_first_order_moment(&self) -> f64 {
        let m02 = self.m1_nmm.max(self.m2_nmm);
        let m01 = self.m1_nmm.min(self.m2_nmm);
        let m0e = 0.6 * m02 + 0.4 * m01;
        if m0e > 0.4 * m02 {
            m0e
        } else {
            0.4 * m0e
        }
    }

    /// Second-order moment M2 per art. 5.8.8 (nominal curvature), for the
    /// given trial area, height and radius of gyration (N·mm).
    ///
    /// The radius of gyration of the *current* trial section is an explicit
    /// parameter; it feeds the slenderness-dependent creep amplification.
    pub fn second_order_moment(&self, area_mm2: f64, h_mm: f64, i_mm: f64) -> f64 {
        let fcd_area = area_mm2 * self.fck_mpa / 1.5;

        // Kr: curvature reduction from the relative axial load. Not clamped
        // below zero; see the design notes.
        let n = self.ned_n / fcd_area;
        let omega = (area_mm2 * self.rho) * FYD_MPA / fcd_area;
        let n_u = 1.0 + omega;
        let kr = ((n_u - n) / (n_u - N_BAL)).min(1.0);

        // K_phi: creep amplification, slenderness-dependent
        let lambda = self.l0_mm / i_mm;
        let beta = 0.35 + self.fck_mpa / 200.0 - lambda / 150.0;
        let k_phi = (1.0 + beta * self.phi_eff).max(1.0);

        let d = h_mm - self.a * h_mm;
        let one_div_r0 = EPS_YD / (0.45 * d);
        let one_div_r = kr * k_phi * one_div_r0;
        let e2 = one_div_r * self.l0_mm.powi(2) / PI.powi(2);
        -self.ned_n * e2
    }

    /// Governing design moment: M0EdM2 = max(m0ed + M2, m2, m1 + 0.5·M2)
    pub fn moment_target(&self, m2_second_order_nmm: f64) -> f64 {
        (self.governing_first_order_moment() + m2_second_order_nmm)
            .max(self.m2_nmm)
            .max(self.m1_nmm + 0.5 * m2_second_order_nmm)
    }

    /// Axial resistance of a trial gross area (N):
    /// Nrd = A·fck/1.5 + A·rho·sigma_s(1.75‰)
    pub fn axial_force_resistance(&self, area_mm2: f64) -> f64 {
        area_mm2 * self.fck_mpa / 1.5
            + area_mm2 * self.rho * B500.stress_at(AXIAL_STEEL_STRAIN_PERMILLE)
    }
}

/// Which phase the search ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesignPhase {
    /// The axial-minimum section already carried the governing moment
    AxialSearch,
    /// The joint moment/axial iteration produced (or failed to produce)
    /// the section
    JointSearch,
}

/// A dimensioned cross-section, as assigned by the search.
///
/// Only trustworthy when the owning result's `validity` is true; a capped
/// search still populates these fields for inspection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColumnDesign {
    /// Section width (mm)
    pub width_mm: f64,
    /// Section height (mm)
    pub height_mm: f64,
    /// Reinforcement area per face (mm²); the total is split evenly over
    /// the two faces
    pub as_mm2: f64,
    /// Resisting moment of the section (N·mm)
    pub mrd_nmm: f64,
    /// Axial resistance of the section (N)
    pub nrd_n: f64,
    /// Governing design moment the section was checked against (N·mm)
    pub m0ed_m2_nmm: f64,
}

impl ColumnDesign {
    /// Section width
    pub fn width(&self) -> Millimeters {
        Millimeters(self.width_mm)
    }

    /// Section height
    pub fn height(&self) -> Millimeters {
        Millimeters(self.height_mm)
    }

    /// Reinforcement area per face
    pub fn reinforcement_area(&self) -> SquareMillimeters {
        SquareMillimeters(self.as_mm2)
    }

    /// Resisting moment
    pub fn mrd(&self) -> KiloNewtonMeters {
        NewtonMillimeters(self.mrd_nmm).into()
    }

    /// Axial resistance
    pub fn nrd(&self) -> KiloNewtons {
        Newtons(self.nrd_n).into()
    }

    /// Governing design moment
    pub fn governing_moment(&self) -> KiloNewtonMeters {
        NewtonMillimeters(self.m0ed_m2_nmm).into()
    }
}

/// Outcome of a dimensioning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDesignResult {
    /// True when the search converged on an adequate section. When false,
    /// `solution` is the last trial (iteration cap) or absent (diverged).
    pub validity: bool,
    /// Phase the search ended in
    pub phase: DesignPhase,
    /// Iterations spent in the axial search
    pub axial_iterations: usize,
    /// Iterations spent in the joint search
    pub joint_iterations: usize,
    /// The assigned section, if any
    pub solution: Option<ColumnDesign>,
}

/// Solve for the minimum required column dimensions.
///
/// First sizes the section for the axial force alone; if that section
/// cannot carry the governing moment M0Ed + M2, re-iterates jointly on the
/// moment and axial conditions. Preconditions are checked up front; the
/// numerical outcome is reported through [`ColumnDesignResult::validity`].
pub fn solve(input: &ColumnDesignInput) -> CalcResult<ColumnDesignResult> {
    input.validate()?;
    Ok(DimensionSolver::new(input)?.run())
}

/// One dimensioning run: owns the trial width and the material diagrams.
struct DimensionSolver<'a> {
    input: &'a ColumnDesignInput,
    fc: StressStrainDiagram,
    no_tension: StressStrainDiagram,
    b_mm: f64,
}

impl<'a> DimensionSolver<'a> {
    fn new(input: &'a ColumnDesignInput) -> CalcResult<Self> {
        Ok(Self {
            input,
            fc: Concrete::from_fck(input.fck_mpa).bi_linear_uls()?,
            no_tension: Concrete::no_tension(),
            b_mm: SEED_WIDTH_MM,
        })
    }

    fn run(mut self) -> ColumnDesignResult {
        let input = self.input;
        let target_n = -input.ned_n;

        // Phase 1: iterate the minimum dimension for the axial force.
        let mut div = AdaptiveDivisor::new(3.0);
        let mut axial_iterations = 0usize;
        loop {
            let h = self.b_mm / input.bh;
            let area = self.b_mm * h;
            let nrd = input.axial_force_resistance(area);
            if convergence_conditions(nrd, target_n, 1.01, 0.975) {
                break;
            }
            let factor = convergence_factor(nrd, target_n, div.value());
            self.b_mm *= factor;
            axial_iterations += 1;
            if axial_iterations > AXIAL_MAX_ITERATIONS {
                // Fall through with the current width, unflagged; the
                // moment check below still runs on it.
                break;
            }
            div.update(factor);
        }

        // Trial at exit. On the cap path this re-reads the final width.
        let h = self.b_mm / input.bh;
        let area = self.b_mm * h;
        let nrd = input.axial_force_resistance(area);
        let as_face = input.rho * area / 2.0;
        let m = self.capacity(h, as_face);

        // Is the axial-minimum section able to carry the total moment?
        let i = h / GYRATION_DIVISOR;
        let m2 = input.second_order_moment(area, h, i);
        let target_m = input.moment_target(m2);
        if m.moment_nmm > target_m {
            return ColumnDesignResult {
                validity: true,
                phase: DesignPhase::AxialSearch,
                axial_iterations,
                joint_iterations: 0,
                solution: Some(ColumnDesign {
                    width_mm: self.b_mm,
                    height_mm: h,
                    as_mm2: as_face,
                    mrd_nmm: m.moment_nmm,
                    nrd_n: nrd,
                    m0ed_m2_nmm: target_m,
                }),
            };
        }

        self.joint_search(axial_iterations)
    }

    /// Phase 2: iterate jointly on the moment and axial conditions.
    fn joint_search(mut self, axial_iterations: usize) -> ColumnDesignResult {
        let input = self.input;
        let target_n = -input.ned_n;

        let mut div = AdaptiveDivisor::new(5.0);
        let mut c = 0usize;

        loop {
            let h = self.b_mm / input.bh;
            let area = self.b_mm * h;
            let i = h / GYRATION_DIVISOR;
            let as_face = input.rho * area / 2.0;

            let m = self.capacity(h, as_face);
            let m2 = input.second_order_moment(area, h, i);
            let target_m = input.moment_target(m2);
            let factor_moment = convergence_factor(m.moment_nmm.abs(), target_m, div.value());

            let nrd = input.axial_force_resistance(area);
            let factor_axial = convergence_factor(nrd, target_n, JOINT_AXIAL_DIVISOR);

            // The axial correction wins only when the section is under-sized
            // for the axial load and asks for a larger step than the moment.
            if factor_axial > 1.0 && factor_axial > factor_moment {
                self.b_mm *= factor_axial;
            } else {
                self.b_mm *= factor_moment;
            }

            if !self.b_mm.is_finite() {
                return ColumnDesignResult {
                    validity: false,
                    phase: DesignPhase::JointSearch,
                    axial_iterations,
                    joint_iterations: c,
                    solution: None,
                };
            }

            c += 1;

            // The assigned width is the already-updated trial; the rest of
            // the record belongs to the trial just evaluated.
            let design = ColumnDesign {
                width_mm: self.b_mm,
                height_mm: h,
                as_mm2: as_face,
                mrd_nmm: m.moment_nmm,
                nrd_n: nrd,
                m0ed_m2_nmm: target_m,
            };

            if c > JOINT_MAX_ITERATIONS {
                return ColumnDesignResult {
                    validity: false,
                    phase: DesignPhase::JointSearch,
                    axial_iterations,
                    joint_iterations: c,
                    solution: Some(design),
                };
            }

            let moment_converged =
                convergence_conditions(m.moment_nmm.abs(), target_m, 0.99, 0.95) && m.validity();
            let axial_converged = convergence_conditions(nrd, target_n, 0.99, 0.95)
                && m.moment_nmm.abs() > target_m;
            if moment_converged || axial_converged {
                return ColumnDesignResult {
                    validity: true,
                    phase: DesignPhase::JointSearch,
                    axial_iterations,
                    joint_iterations: c,
                    solution: Some(design),
                };
            }

            // Absolute fallback for near-misses the ratio bands reject.
            let dm = m.moment_nmm.abs() - target_m;
            if dm > 0.0 && dm < ABS_MOMENT_TOLERANCE_NMM {
                return ColumnDesignResult {
                    validity: true,
                    phase: DesignPhase::JointSearch,
                    axial_iterations,
                    joint_iterations: c,
                    solution: Some(design),
                };
            }

            div.update(factor_moment);
        }
    }

    /// Moment capacity of the current trial section.
    fn capacity(&self, h_mm: f64, as_face_mm2: f64) -> MomentCapacity {
        let section = RectangularSection {
            width_mm: self.b_mm,
            height_mm: h_mm,
        };
        let mnk = MnKappa::new(
            &section,
            &self.fc,
            &self.no_tension,
            &B500,
            [as_face_mm2, as_face_mm2],
            [self.input.a * h_mm, (1.0 - self.input.a) * h_mm],
            self.input.ned_n,
        );
        let mut m = mnk.ultimate();
        mnk.scan_peak(PEAK_SCAN_STEP, &mut m);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> ColumnDesignInput {
        ColumnDesignInput::new("Test column", 0.0, 0.0, -900_000.0, 20.0, 0.01, 3000.0, 1.0)
    }

    #[test]
    fn test_governing_first_order_moment() {
        // 0.6·m02 + 0.4·m01 governs when it exceeds 0.4·m02
        let input = ColumnDesignInput::new("m", 50.0e6, 100.0e6, -1.0, 20.0, 0.01, 1.0, 0.0);
        assert!((input.governing_first_order_moment() - 80.0e6).abs() < 1.0);
    }

    #[test]
    fn test_governing_first_order_moment_lower_branch() {
        // Both moments negative: m0e = -14e6 fails the 0.4·m02 = -4e6 check
        // and the lower branch scales m0e itself, not m02.
        let input = ColumnDesignInput::new("m", -20.0e6, -10.0e6, -1.0, 20.0, 0.01, 1.0, 0.0);
        assert!((input.governing_first_order_moment() - (-5.6e6)).abs() < 1.0);
    }

    #[test]
    fn test_second_order_moment_value() {
        // Hand-computed for area = 90000 mm², h = 300, i = h/3.46:
        // kr = 1, lambda = 34.6, beta = 0.219333, k_phi = 1.219333,
        // 1/r0 = 0.002175/108, e2 = 22.3924 mm, M2 = 9e5 · e2
        let input = test_input();
        let m2 = input.second_order_moment(90_000.0, 300.0, 300.0 / 3.46);
        assert!((m2 / 2.01532e7 - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_second_order_moment_grows_with_creep() {
        let mut input = test_input();
        let i = 300.0 / 3.46;
        let base = input.second_order_moment(90_000.0, 300.0, i);
        input.phi_eff = 2.0;
        let crept = input.second_order_moment(90_000.0, 300.0, i);
        assert!(crept > base);
    }

    #[test]
    fn test_second_order_moment_scales_with_length() {
        let input = test_input();
        let short = ColumnDesignInput {
            l0_mm: 1500.0,
            ..input.clone()
        };
        let i = 300.0 / 3.46;
        assert!(input.second_order_moment(90_000.0, 300.0, i)
            > short.second_order_moment(90_000.0, 300.0, i));
    }

    #[test]
    fn test_axial_force_resistance() {
        // A·fck/1.5 + A·rho·350 for B500 at 1.75‰
        let input = test_input();
        let nrd = input.axial_force_resistance(90_000.0);
        assert!((nrd - 1_515_000.0).abs() < 1.0);
    }

    #[test]
    fn test_moment_target_takes_the_governing_maximum() {
        let input = ColumnDesignInput::new("m", 10.0e6, 40.0e6, -1.0e5, 20.0, 0.01, 1.0, 0.0);
        // m0ed = 0.6·40e6 + 0.4·10e6 = 28e6
        let target = input.moment_target(5.0e6);
        // max(28e6 + 5e6, 40e6, 10e6 + 2.5e6) = 40e6
        assert!((target - 40.0e6).abs() < 1.0);
        let target_large_m2 = input.moment_target(20.0e6);
        // max(48e6, 40e6, 20e6) = 48e6
        assert!((target_large_m2 - 48.0e6).abs() < 1.0);
    }

    #[test]
    fn test_axial_only_sufficiency() {
        // Negative end moments make the governing moment negative, so the
        // axial-minimum section must be accepted without a joint search.
        let input =
            ColumnDesignInput::new("C-ax", -20.0e6, -10.0e6, -90_000.0, 20.0, 0.01, 500.0, 1.0);
        let result = solve(&input).unwrap();
        assert!(result.validity);
        assert_eq!(result.phase, DesignPhase::AxialSearch);
        assert_eq!(result.joint_iterations, 0);

        let design = result.solution.expect("converged run assigns a section");
        // Square trial sections, assigned before any further width update
        assert_eq!(design.width_mm, design.height_mm);
        // Exit condition of the axial search
        assert!(convergence_conditions(design.nrd_n, 90_000.0, 1.01, 0.975));
        assert!(design.m0ed_m2_nmm < 0.0);
        // Reinforcement split evenly over the two faces
        let area = design.width_mm * design.height_mm;
        assert!((design.as_mm2 - 0.01 * area / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_joint_search_scenario() {
        // Axial-only sizing leaves no moment margin, so the slenderness
        // moment forces the joint search.
        let input = ColumnDesignInput::new("C-j", 0.0, 0.0, -9000.0, 20.0, 0.01, 3000.0, 1.0);
        let result = solve(&input).unwrap();
        assert_eq!(result.phase, DesignPhase::JointSearch);
        assert!(result.validity);
        assert!(result.axial_iterations <= AXIAL_MAX_ITERATIONS + 1);
        assert!(result.joint_iterations <= JOINT_MAX_ITERATIONS + 1);

        let design = result.solution.expect("valid result carries a section");
        assert!(design.width_mm > 0.0);
        // The stored width is the next trial; near convergence it stays
        // close to the evaluated height.
        assert!((design.width_mm / design.height_mm - 1.0).abs() < 0.25);
        // Every convergence exit guarantees at least 95% of the target.
        assert!(design.mrd_nmm.abs() >= 0.95 * design.m0ed_m2_nmm * (1.0 - 1e-12));
    }

    #[test]
    fn test_validity_implies_moment_adequacy() {
        for ned in [-9000.0, -90_000.0, -900_000.0, -2.0e6] {
            let input = ColumnDesignInput::new("C-adeq", 0.0, 0.0, ned, 20.0, 0.01, 3000.0, 1.0);
            let result = solve(&input).unwrap();
            if result.validity {
                let design = result.solution.expect("valid result carries a section");
                assert!(
                    design.mrd_nmm.abs() >= 0.95 * design.m0ed_m2_nmm * (1.0 - 1e-12),
                    "ned = {}: mrd {} vs target {}",
                    ned,
                    design.mrd_nmm,
                    design.m0ed_m2_nmm
                );
            }
        }
    }

    #[test]
    fn test_more_reinforcement_never_widens_the_section() {
        let base = ColumnDesignInput::new("C-lo", 0.0, 0.0, -900_000.0, 20.0, 0.005, 2000.0, 1.0);
        let rich = ColumnDesignInput {
            rho: 0.03,
            ..base.clone()
        };
        let lo = solve(&base).unwrap();
        let hi = solve(&rich).unwrap();
        let (lo, hi) = (lo.solution.unwrap(), hi.solution.unwrap());
        assert!(hi.width_mm <= lo.width_mm * 1.02);
    }

    #[test]
    fn test_termination_within_caps() {
        // Extreme demand with token reinforcement: the search must stop at
        // its caps, never hang or panic, and never report a silently
        // inadequate section as valid.
        let input =
            ColumnDesignInput::new("C-ext", 0.0, 0.0, -9.0e9, 20.0, 1.0e-4, 3000.0, 1.0);
        let result = solve(&input).unwrap();
        assert!(result.axial_iterations <= AXIAL_MAX_ITERATIONS + 1);
        assert!(result.joint_iterations <= JOINT_MAX_ITERATIONS + 1);
        if result.validity {
            let design = result.solution.expect("valid result carries a section");
            assert!(design.mrd_nmm.abs() >= 0.95 * design.m0ed_m2_nmm * (1.0 - 1e-12));
        }
    }

    #[test]
    fn test_capped_joint_search_keeps_last_trial_for_inspection() {
        // A capped joint search must still expose the last trial, flagged
        // invalid. Run a spread of hostile inputs and check the contract on
        // whichever ones cap out.
        for (ned, rho) in [(-9.0e9, 1.0e-4), (-5.0e8, 1.0e-4), (-1.0e9, 0.001)] {
            let input = ColumnDesignInput::new("C-cap", 0.0, 0.0, ned, 20.0, rho, 3000.0, 1.0);
            let result = solve(&input).unwrap();
            if !result.validity && result.joint_iterations > JOINT_MAX_ITERATIONS {
                let design = result.solution.expect("capped run assigns the last trial");
                assert!(design.width_mm > 0.0);
                assert!(design.height_mm > 0.0);
            }
        }
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let mut input = test_input();
        input.fck_mpa = 0.0;
        assert!(solve(&input).is_err());

        let mut input = test_input();
        input.rho = 0.0;
        assert!(solve(&input).is_err());

        let mut input = test_input();
        input.rho = 0.5;
        assert!(solve(&input).is_err());

        let mut input = test_input();
        input.ned_n = 100.0;
        assert!(solve(&input).is_err());

        let mut input = test_input();
        input.l0_mm = -1.0;
        assert!(solve(&input).is_err());

        let mut input = test_input();
        input.m1_nmm = f64::NAN;
        assert!(solve(&input).is_err());

        let mut input = test_input();
        input.a = 0.6;
        assert!(solve(&input).is_err());

        let mut input = test_input();
        input.bh = 0.0;
        assert!(solve(&input).is_err());
    }

    #[test]
    fn test_typed_accessors() {
        let input =
            ColumnDesignInput::new("C-units", -20.0e6, -10.0e6, -90_000.0, 20.0, 0.01, 500.0, 1.0);
        let result = solve(&input).unwrap();
        let design = result.solution.unwrap();
        assert!((design.width().value() - design.width_mm).abs() < 1e-12);
        assert!((design.nrd().value() - design.nrd_n / 1000.0).abs() < 1e-9);
        assert!((design.mrd().value() - design.mrd_nmm / 1.0e6).abs() < 1e-9);
    }

    #[test]
    fn test_serialization() {
        let input = test_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: ColumnDesignInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input.ned_n, roundtrip.ned_n);
        assert_eq!(input.rho, roundtrip.rho);

        // Defaulted fields deserialize from sparse JSON
        let sparse: ColumnDesignInput = serde_json::from_str(
            r#"{"label":"C-1","m1_nmm":0.0,"m2_nmm":0.0,"ned_n":-900000.0,
                "fck_mpa":20.0,"rho":0.01,"l0_mm":3000.0,"phi_eff":1.0}"#,
        )
        .unwrap();
        assert_eq!(sparse.a, 0.2);
        assert_eq!(sparse.bh, 1.0);

        let result = solve(&input).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let roundtrip: ColumnDesignResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.validity, roundtrip.validity);
    }
}
