//! Quadrature rules for reference finite elements
//!
//! This crate supplies the integration rules that mesh assembly and regridding
//! sample, and derives the lower-dimensional rules for element boundaries.
//!
//! # Features
//!
//! - **Gauss-Legendre**: n-point rules on [-1, 1] computed by Newton iteration
//! - **Reference shapes**: bars, quadrilaterals and hexahedra (tensor rules),
//!   triangles and tetrahedra (symmetric tables)
//! - **Canonical instances**: one shared rule per (shape, order), safe to
//!   request from parallel workers
//! - **Side rules**: per-face rules for standard and mixed-shape elements
//!
//! # Example
//!
//! ```
//! use math_audio_quadrature::mesh::HEX8;
//! use math_audio_quadrature::quadrature::{RuleCache, SideRuleFactory, Variant};
//!
//! let hex = RuleCache::instance(Variant::Hex, 3).unwrap();
//! assert_eq!(hex.num_points(), 8);
//!
//! let faces = SideRuleFactory::instance(&HEX8, hex).unwrap();
//! let face = faces.side_rule(0).unwrap();
//! assert!(face.is_same(hex.side_rule().unwrap()));
//! ```

pub mod error;
pub mod mesh;
pub mod quadrature;

pub use error::{QuadratureError, Result};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
