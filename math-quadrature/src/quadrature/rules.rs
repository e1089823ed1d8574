//! Integration rules for reference elements
//!
//! A [`Rule`] is an immutable set of parametric points and weights. Canonical
//! rules (every variant except [`Variant::Arbitrary`]) are built once per
//! order by [`RuleCache`] and shared as `&'static Rule`; comparing two rules
//! with [`Rule::is_same`] tells whether they are the same discretization.

use super::cache::RuleCache;
use super::gauss::{QuadraturePoint, bar_point_count, gauss_legendre};
use super::tables::{self, TET_MAX_ORDER, TRI_MAX_ORDER};
use crate::error::{QuadratureError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference shape a rule integrates over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Gauss-Legendre on [-1, 1]
    Bar,
    /// Gauss-Legendre tensor on [-1, 1]²
    Quad,
    /// Symmetric rule on the unit triangle
    Tri,
    /// Gauss-Legendre tensor on [-1, 1]³
    Hex,
    /// Symmetric rule on the unit tetrahedron
    Tetra,
    /// Caller-supplied points, no order semantics
    Arbitrary,
}

impl Variant {
    /// Every variant that [`RuleCache`] can build
    pub const CACHED: [Variant; 5] = [
        Variant::Bar,
        Variant::Quad,
        Variant::Tri,
        Variant::Hex,
        Variant::Tetra,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Bar => "bar",
            Variant::Quad => "quad",
            Variant::Tri => "tri",
            Variant::Hex => "hex",
            Variant::Tetra => "tetra",
            Variant::Arbitrary => "arbitrary",
        }
    }

    /// Parametric dimension, `None` for arbitrary rules (set per instance)
    pub fn parametric_dim(&self) -> Option<usize> {
        match self {
            Variant::Bar => Some(1),
            Variant::Quad | Variant::Tri => Some(2),
            Variant::Hex | Variant::Tetra => Some(3),
            Variant::Arbitrary => None,
        }
    }

    /// Variant of this shape's sides, one dimension lower
    pub fn side_variant(&self) -> Option<Variant> {
        match self {
            Variant::Quad | Variant::Tri => Some(Variant::Bar),
            Variant::Hex => Some(Variant::Quad),
            Variant::Tetra => Some(Variant::Tri),
            Variant::Bar | Variant::Arbitrary => None,
        }
    }

    /// Length, area or volume of the reference element
    pub fn reference_measure(&self) -> Option<f64> {
        match self {
            Variant::Bar => Some(2.0),
            Variant::Quad => Some(4.0),
            Variant::Tri => Some(0.5),
            Variant::Hex => Some(8.0),
            Variant::Tetra => Some(1.0 / 6.0),
            Variant::Arbitrary => None,
        }
    }

    /// Highest tabulated order, `None` for Gauss-Legendre based and arbitrary rules
    pub fn max_order(&self) -> Option<usize> {
        match self {
            Variant::Tri => Some(TRI_MAX_ORDER),
            Variant::Tetra => Some(TET_MAX_ORDER),
            _ => None,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Variant::Bar => 0,
            Variant::Quad => 1,
            Variant::Tri => 2,
            Variant::Hex => 3,
            Variant::Tetra => 4,
            Variant::Arbitrary => 5,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Largest point count of a cached tensor rule (Quad, Hex)
pub const MAX_RULE_POINTS: usize = 1 << 22;

/// Quadrature rule on a reference element
#[derive(Debug, Clone)]
pub struct Rule {
    variant: Variant,
    order: usize,
    dim: usize,
    /// Row-major, `dim` coordinates per point
    locations: Vec<f64>,
    weights: Vec<f64>,
    has_weights: bool,
}

impl Rule {
    /// Rule from caller-supplied parametric points
    ///
    /// `points` holds `dim` coordinates per point. Without `weights` every
    /// weight is zero and the rule only supplies sample locations. The result
    /// is owned by the caller and never enters [`RuleCache`].
    pub fn arbitrary(dim: usize, points: &[f64], weights: Option<&[f64]>) -> Result<Self> {
        if !(1..=3).contains(&dim) {
            return Err(QuadratureError::InvalidDimension { dim });
        }
        if points.len() % dim != 0 {
            return Err(QuadratureError::LengthMismatch {
                what: "point coordinate",
                expected: points.len().div_ceil(dim) * dim,
                got: points.len(),
            });
        }
        let n = points.len() / dim;

        let weights = match weights {
            Some(w) if w.len() != n => {
                return Err(QuadratureError::LengthMismatch {
                    what: "weight",
                    expected: n,
                    got: w.len(),
                });
            }
            Some(w) => Some(w.to_vec()),
            None => None,
        };

        Ok(Self {
            variant: Variant::Arbitrary,
            order: 0,
            dim,
            locations: points.to_vec(),
            has_weights: weights.is_some(),
            weights: weights.unwrap_or_else(|| vec![0.0; n]),
        })
    }

    /// Build the canonical rule for `variant` at `order`
    ///
    /// Only [`RuleCache`] calls this; everyone else goes through the cache so
    /// rule identity stays meaningful.
    pub(crate) fn build(variant: Variant, order: usize) -> Result<Self> {
        match variant {
            Variant::Bar => {
                let (locations, weights) = gauss_legendre(bar_point_count(order))?;
                Ok(Self::canonical(variant, order, 1, locations, weights))
            }
            Variant::Quad => Self::tensor(variant, order, 2),
            Variant::Hex => Self::tensor(variant, order, 3),
            Variant::Tri => {
                let table = tables::triangle(order).ok_or(QuadratureError::UnsupportedOrder {
                    variant,
                    order,
                    max_order: TRI_MAX_ORDER,
                })?;
                Ok(Self::canonical(variant, order, 2, table.locations, table.weights))
            }
            Variant::Tetra => {
                let table = tables::tetrahedron(order).ok_or(QuadratureError::UnsupportedOrder {
                    variant,
                    order,
                    max_order: TET_MAX_ORDER,
                })?;
                Ok(Self::canonical(variant, order, 3, table.locations, table.weights))
            }
            Variant::Arbitrary => Err(QuadratureError::UnsupportedOperation {
                variant,
                operation: "cached construction",
            }),
        }
    }

    fn canonical(
        variant: Variant,
        order: usize,
        dim: usize,
        locations: Vec<f64>,
        weights: Vec<f64>,
    ) -> Self {
        Self {
            variant,
            order,
            dim,
            locations,
            weights,
            has_weights: true,
        }
    }

    /// Tensor product of the bar rule of the same order, first axis slowest
    fn tensor(variant: Variant, order: usize, dim: usize) -> Result<Self> {
        let bar = RuleCache::instance(Variant::Bar, order)?;
        let n_1d = bar.num_points();
        let n = n_1d
            .checked_pow(dim as u32)
            .filter(|&n| n <= MAX_RULE_POINTS)
            .ok_or(QuadratureError::InvalidPointCount {
                points: n_1d.saturating_pow(dim as u32),
                max: MAX_RULE_POINTS,
            })?;

        let mut locations = Vec::with_capacity(n * dim);
        let mut weights = Vec::with_capacity(n);
        let mut idx = vec![0usize; dim];

        for _ in 0..n {
            let mut w = 1.0;
            for &i in &idx {
                locations.push(bar.locations[i]);
                w *= bar.weights[i];
            }
            weights.push(w);

            // Odometer increment, last axis fastest
            for axis in (0..dim).rev() {
                idx[axis] += 1;
                if idx[axis] < n_1d {
                    break;
                }
                idx[axis] = 0;
            }
        }

        Ok(Self::canonical(variant, order, dim, locations, weights))
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn name(&self) -> &'static str {
        self.variant.name()
    }

    /// Requested polynomial degree (0 for arbitrary rules)
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of quadrature points
    pub fn num_points(&self) -> usize {
        self.weights.len()
    }

    pub fn parametric_dim(&self) -> usize {
        self.dim
    }

    /// Parametric locations, `parametric_dim()` values per point
    pub fn locations(&self) -> &[f64] {
        &self.locations
    }

    /// Weights, one per point
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// `false` for arbitrary rules built without weights
    pub fn has_weights(&self) -> bool {
        self.has_weights
    }

    /// Coordinates of point `i`
    ///
    /// # Panics
    /// If `i >= num_points()`.
    pub fn location(&self, i: usize) -> &[f64] {
        &self.locations[i * self.dim..(i + 1) * self.dim]
    }

    /// Point `i` with its weight
    ///
    /// # Panics
    /// If `i >= num_points()`.
    pub fn point(&self, i: usize) -> QuadraturePoint {
        QuadraturePoint::new(self.location(i), self.weights[i])
    }

    /// Iterator over quadrature points
    pub fn iter(&self) -> impl Iterator<Item = QuadraturePoint> + '_ {
        self.locations
            .chunks_exact(self.dim)
            .zip(&self.weights)
            .map(|(coords, &w)| QuadraturePoint::new(coords, w))
    }

    /// Σ wᵢ f(xᵢ) over the rule's points
    pub fn integrate<F>(&self, f: F) -> f64
    where
        F: Fn(&[f64]) -> f64,
    {
        self.locations
            .chunks_exact(self.dim)
            .zip(&self.weights)
            .map(|(coords, w)| f(coords) * w)
            .sum()
    }

    /// Canonical rule for this variant's sides at the same order
    pub fn side_rule(&self) -> Result<&'static Rule> {
        let side = self
            .variant
            .side_variant()
            .ok_or(QuadratureError::UnsupportedOperation {
                variant: self.variant,
                operation: "side rule",
            })?;
        RuleCache::instance(side, self.order)
    }

    /// Canonical rule of the same variant at another order
    pub fn change_order(&self, order: usize) -> Result<&'static Rule> {
        if self.variant == Variant::Arbitrary {
            return Err(QuadratureError::UnsupportedOperation {
                variant: self.variant,
                operation: "order change",
            });
        }
        RuleCache::instance(self.variant, order)
    }

    /// Whether `other` is this very instance
    pub fn is_same(&self, other: &Rule) -> bool {
        std::ptr::eq(self, other)
    }
}
