//! Element topology descriptors consumed by the quadrature layer

mod topology;

pub use topology::*;
