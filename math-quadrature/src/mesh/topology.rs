//! Element topology descriptors
//!
//! A descriptor names an element shape and lists its sides in canonical
//! order together with the reference shape of each side. Side numbering and
//! local node lists follow the Exodus II convention.
//!
//! The side-rule factory keys on descriptor identity, so callers should pass
//! the shared statics below rather than building equal copies.

use crate::quadrature::Variant;
use std::any::Any;
use std::fmt;

/// Side structure of an element shape, as seen by the quadrature layer
///
/// Descriptors are identified by address together with their concrete type,
/// so zero-sized descriptors placed at one address stay distinct.
pub trait TopologyDescriptor: Any + fmt::Debug + Send + Sync {
    /// Canonical topology name (e.g. "HEX8")
    fn name(&self) -> &str;

    /// Parametric dimension of the element
    fn parametric_dim(&self) -> usize;

    /// Number of sides (edges in 2D, faces in 3D)
    fn num_sides(&self) -> usize;

    /// Reference shape of side `side`, `None` when out of range
    fn side_shape(&self, side: usize) -> Option<Variant>;

    /// Rule variant for the element itself, `None` for shapes this crate
    /// has no volume rule for
    fn element_variant(&self) -> Option<Variant>;
}

/// Static description of a standard element shape
#[derive(Debug, PartialEq, Eq)]
pub struct ElementTopology {
    name: &'static str,
    dim: usize,
    num_nodes: usize,
    element_variant: Option<Variant>,
    sides: &'static [Side],
}

/// One side of an element: its shape and the local nodes on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Side {
    pub shape: Variant,
    pub nodes: &'static [usize],
}

const fn side(shape: Variant, nodes: &'static [usize]) -> Side {
    Side { shape, nodes }
}

/// 3-node triangle
pub static TRI3: ElementTopology = ElementTopology {
    name: "TRI3",
    dim: 2,
    num_nodes: 3,
    element_variant: Some(Variant::Tri),
    sides: &[
        side(Variant::Bar, &[0, 1]),
        side(Variant::Bar, &[1, 2]),
        side(Variant::Bar, &[2, 0]),
    ],
};

/// 4-node quadrilateral
pub static QUAD4: ElementTopology = ElementTopology {
    name: "QUAD4",
    dim: 2,
    num_nodes: 4,
    element_variant: Some(Variant::Quad),
    sides: &[
        side(Variant::Bar, &[0, 1]),
        side(Variant::Bar, &[1, 2]),
        side(Variant::Bar, &[2, 3]),
        side(Variant::Bar, &[3, 0]),
    ],
};

/// 4-node tetrahedron
pub static TETRA4: ElementTopology = ElementTopology {
    name: "TETRA4",
    dim: 3,
    num_nodes: 4,
    element_variant: Some(Variant::Tetra),
    sides: &[
        side(Variant::Tri, &[0, 1, 3]),
        side(Variant::Tri, &[1, 2, 3]),
        side(Variant::Tri, &[0, 3, 2]),
        side(Variant::Tri, &[0, 2, 1]),
    ],
};

/// 8-node hexahedron
pub static HEX8: ElementTopology = ElementTopology {
    name: "HEX8",
    dim: 3,
    num_nodes: 8,
    element_variant: Some(Variant::Hex),
    sides: &[
        side(Variant::Quad, &[0, 1, 5, 4]),
        side(Variant::Quad, &[1, 2, 6, 5]),
        side(Variant::Quad, &[2, 3, 7, 6]),
        side(Variant::Quad, &[0, 4, 7, 3]),
        side(Variant::Quad, &[0, 3, 2, 1]),
        side(Variant::Quad, &[4, 5, 6, 7]),
    ],
};

/// 6-node wedge (triangular prism): three quad sides, then two triangles
pub static WEDGE6: ElementTopology = ElementTopology {
    name: "WEDGE6",
    dim: 3,
    num_nodes: 6,
    element_variant: None,
    sides: &[
        side(Variant::Quad, &[0, 1, 4, 3]),
        side(Variant::Quad, &[1, 2, 5, 4]),
        side(Variant::Quad, &[0, 3, 5, 2]),
        side(Variant::Tri, &[0, 2, 1]),
        side(Variant::Tri, &[3, 4, 5]),
    ],
};

/// 5-node pyramid: four triangles, then the quad base
pub static PYRAMID5: ElementTopology = ElementTopology {
    name: "PYRAMID5",
    dim: 3,
    num_nodes: 5,
    element_variant: None,
    sides: &[
        side(Variant::Tri, &[0, 1, 4]),
        side(Variant::Tri, &[1, 2, 4]),
        side(Variant::Tri, &[2, 3, 4]),
        side(Variant::Tri, &[0, 4, 3]),
        side(Variant::Quad, &[0, 3, 2, 1]),
    ],
};

/// All shapes known to this crate
pub static STANDARD_TOPOLOGIES: [&ElementTopology; 6] =
    [&TRI3, &QUAD4, &TETRA4, &HEX8, &WEDGE6, &PYRAMID5];

impl ElementTopology {
    /// Look up a standard topology by name (case-insensitive)
    pub fn by_name(name: &str) -> Option<&'static ElementTopology> {
        STANDARD_TOPOLOGIES
            .iter()
            .copied()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Number of vertices
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn sides(&self) -> &'static [Side] {
        self.sides
    }

    /// Local node indices of side `side`
    pub fn side_nodes(&self, side: usize) -> Option<&'static [usize]> {
        self.sides.get(side).map(|s| s.nodes)
    }

    /// Whether all sides share one reference shape
    pub fn has_uniform_sides(&self) -> bool {
        self.sides.windows(2).all(|w| w[0].shape == w[1].shape)
    }
}

impl TopologyDescriptor for ElementTopology {
    fn name(&self) -> &str {
        self.name
    }

    fn parametric_dim(&self) -> usize {
        self.dim
    }

    fn num_sides(&self) -> usize {
        self.sides.len()
    }

    fn side_shape(&self, side: usize) -> Option<Variant> {
        self.sides.get(side).map(|s| s.shape)
    }

    fn element_variant(&self) -> Option<Variant> {
        self.element_variant
    }
}

impl fmt::Display for ElementTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
