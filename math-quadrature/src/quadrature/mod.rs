//! Numerical quadrature rules for finite element integration
//!
//! Provides Gauss-Legendre rules on bars, quadrilaterals and hexahedra,
//! symmetric tables on triangles and tetrahedra, a process-wide cache of
//! canonical rules and the side-rule factory for boundary integrals.

mod cache;
mod gauss;
mod rules;
mod side;
mod tables;

pub use cache::RuleCache;
pub use gauss::*;
pub use rules::*;
pub use side::*;
pub use tables::{TET_MAX_ORDER, TRI_MAX_ORDER};
