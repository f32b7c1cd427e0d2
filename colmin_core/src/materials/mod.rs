//! # Materials Database
//!
//! Material definitions and design stress-strain laws for reinforced
//! concrete design per EN 1992-1-1.
//!
//! ## Material Types
//!
//! - **Concrete**: strength classes C20/25 through C50/60 (or arbitrary
//!   fck), bi-linear ULS compression law, no-tension law for the cracked
//!   zone
//! - **Reinforcing steel**: grades B400/B500/B600, elastic-plateau design
//!   law
//!
//! All laws are expressed as piecewise-linear [`StressStrainDiagram`]s so
//! the capacity search can consult them uniformly.
//!
//! ## Example
//!
//! ```rust
//! use colmin_core::materials::{Concrete, SteelGrade};
//!
//! let concrete = Concrete::from_fck(20.0);
//! let fc = concrete.bi_linear_uls().unwrap();
//! let steel = SteelGrade::B500.design_diagram();
//!
//! assert!((fc.peak_stress() - 20.0 / 1.5).abs() < 1e-9);
//! assert!((steel.stress_at(1.75) - 350.0).abs() < 1e-9);
//! ```

pub mod concrete;
pub mod diagram;
pub mod reinforcement;

// Re-export concrete types
pub use concrete::{Concrete, ConcreteClass, EPS_C3_PERMILLE, EPS_CU3_PERMILLE, GAMMA_C};

// Re-export diagram types
pub use diagram::StressStrainDiagram;

// Re-export reinforcement types
pub use reinforcement::{SteelGrade, B500, EPS_UD_PERMILLE, ES_MPA};
