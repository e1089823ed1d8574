//! Side rules for element boundaries
//!
//! [`SideRuleFactory`] maps an element topology and a base rule to the rules
//! for each of the element's sides, in the topology's side order. Factories
//! are memoized by the identity of both arguments.

use super::cache::{KeyedCache, RuleCache};
use super::rules::{Rule, Variant};
use crate::error::{QuadratureError, Result};
use crate::mesh::{ElementTopology, TopologyDescriptor};
use std::any::{Any, TypeId};
use std::sync::LazyLock;

/// Identity of a (topology, base rule) pair
///
/// Distinct zero-sized statics may share an address, so the topology is
/// identified by its address and its concrete type together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FactoryKey {
    topology: usize,
    descriptor: TypeId,
    base: usize,
}

impl FactoryKey {
    fn new(topology: &'static dyn TopologyDescriptor, base: &'static Rule) -> Self {
        Self {
            topology: topology as *const dyn TopologyDescriptor as *const () as usize,
            // Dispatches through the vtable to the implementing type
            descriptor: Any::type_id(topology),
            base: base as *const Rule as usize,
        }
    }
}

static FACTORIES: LazyLock<KeyedCache<FactoryKey, SideRuleFactory>> =
    LazyLock::new(KeyedCache::new);

/// Per-side rules for one (topology, base rule) pair
#[derive(Debug)]
pub struct SideRuleFactory {
    topology: &'static dyn TopologyDescriptor,
    base: &'static Rule,
    side_rules: Vec<&'static Rule>,
}

impl SideRuleFactory {
    /// Factory for `topology` sides at the order of `base`
    ///
    /// Sides whose shape matches the base rule's side variant use
    /// `base.side_rule()`; the others (wedge and pyramid faces) take the
    /// canonical rule of their own shape at the base order. Two distinct
    /// descriptor objects yield two factories even when they are equal.
    pub fn instance(
        topology: &'static dyn TopologyDescriptor,
        base: &'static Rule,
    ) -> Result<&'static SideRuleFactory> {
        let key = FactoryKey::new(topology, base);
        FACTORIES.get_or_try_insert_with(key, || Self::build(topology, base))
    }

    fn build(topology: &'static dyn TopologyDescriptor, base: &'static Rule) -> Result<Self> {
        if base.variant() == Variant::Arbitrary {
            return Err(QuadratureError::UnsupportedOperation {
                variant: Variant::Arbitrary,
                operation: "side rule factory",
            });
        }
        if base.parametric_dim() != topology.parametric_dim() {
            return Err(QuadratureError::DimensionMismatch {
                rule: base.name(),
                rule_dim: base.parametric_dim(),
                topology: topology.name().to_string(),
                topology_dim: topology.parametric_dim(),
            });
        }

        let num_sides = topology.num_sides();
        let mut side_rules = Vec::with_capacity(num_sides);
        for side in 0..num_sides {
            let shape = topology
                .side_shape(side)
                .ok_or(QuadratureError::IndexOutOfRange {
                    index: side,
                    len: num_sides,
                })?;
            let rule = if Some(shape) == base.variant().side_variant() {
                base.side_rule()?
            } else {
                RuleCache::instance(shape, base.order())?
            };
            log::trace!(
                "{} side {}: {} rule of order {}",
                topology.name(),
                side,
                rule.name(),
                rule.order()
            );
            side_rules.push(rule);
        }

        log::debug!(
            "Built side rule factory for {} over {} rule of order {}",
            topology.name(),
            base.name(),
            base.order()
        );

        Ok(Self {
            topology,
            base,
            side_rules,
        })
    }

    /// Rule for local side `side`
    pub fn side_rule(&self, side: usize) -> Result<&'static Rule> {
        self.side_rules
            .get(side)
            .copied()
            .ok_or(QuadratureError::IndexOutOfRange {
                index: side,
                len: self.side_rules.len(),
            })
    }

    pub fn num_sides(&self) -> usize {
        self.side_rules.len()
    }

    /// All side rules in side order
    pub fn side_rules(&self) -> &[&'static Rule] {
        &self.side_rules
    }

    pub fn topology(&self) -> &'static dyn TopologyDescriptor {
        self.topology
    }

    pub fn base_rule(&self) -> &'static Rule {
        self.base
    }
}

/// Element rule of `order` for a topology given by name
///
/// Fails with `UnknownTopology` for names outside the standard set and
/// `NoElementRule` for shapes without a volume rule (wedge, pyramid).
pub fn rule_for_topology(order: usize, name: &str) -> Result<&'static Rule> {
    let topology = ElementTopology::by_name(name).ok_or_else(|| QuadratureError::UnknownTopology {
        name: name.to_string(),
    })?;
    let variant = topology
        .element_variant()
        .ok_or_else(|| QuadratureError::NoElementRule {
            name: topology.name().to_string(),
        })?;
    RuleCache::instance(variant, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{HEX8, PYRAMID5, QUAD4, TETRA4, TRI3, WEDGE6};

    #[test]
    fn test_hex_sides_share_base_side_rule() {
        let hex = RuleCache::instance(Variant::Hex, 3).unwrap();
        let factory = SideRuleFactory::instance(&HEX8, hex).unwrap();
        let quad = RuleCache::instance(Variant::Quad, 3).unwrap();

        assert_eq!(factory.num_sides(), 6);
        for side in 0..6 {
            assert!(factory.side_rule(side).unwrap().is_same(quad));
        }
        assert!(factory.base_rule().is_same(hex));
        assert_eq!(factory.topology().name(), "HEX8");
    }

    #[test]
    fn test_factory_is_memoized() {
        let tri = RuleCache::instance(Variant::Tri, 2).unwrap();
        let a = SideRuleFactory::instance(&TRI3, tri).unwrap();
        let b = SideRuleFactory::instance(&TRI3, tri).unwrap();
        assert!(std::ptr::eq(a, b));

        let other_order = SideRuleFactory::instance(&TRI3, tri.change_order(4).unwrap()).unwrap();
        assert!(!std::ptr::eq(a, other_order));
    }

    /// Unit-struct polygon with `SIDES` bar sides
    #[derive(Debug)]
    struct Polygon<const SIDES: usize>;

    impl<const SIDES: usize> TopologyDescriptor for Polygon<SIDES> {
        fn name(&self) -> &str {
            match SIDES {
                3 => "TRIANGLE",
                _ => "SQUARE",
            }
        }
        fn parametric_dim(&self) -> usize {
            2
        }
        fn num_sides(&self) -> usize {
            SIDES
        }
        fn side_shape(&self, side: usize) -> Option<Variant> {
            (side < SIDES).then_some(Variant::Bar)
        }
        fn element_variant(&self) -> Option<Variant> {
            Some(Variant::Quad)
        }
    }

    static SQUARE: Polygon<4> = Polygon;
    static TRIANGLE: Polygon<3> = Polygon;

    #[test]
    fn test_zero_sized_descriptors_get_their_own_factories() {
        let quad = RuleCache::instance(Variant::Quad, 2).unwrap();
        let square = SideRuleFactory::instance(&SQUARE, quad).unwrap();
        let triangle = SideRuleFactory::instance(&TRIANGLE, quad).unwrap();

        assert!(!std::ptr::eq(square, triangle));
        assert_eq!(square.num_sides(), 4);
        assert_eq!(triangle.num_sides(), 3);
        assert_eq!(square.topology().name(), "SQUARE");
        assert_eq!(triangle.topology().name(), "TRIANGLE");

        // Repeated lookups still land on the same factories
        assert!(std::ptr::eq(
            SideRuleFactory::instance(&TRIANGLE, quad).unwrap(),
            triangle
        ));
        assert!(std::ptr::eq(
            SideRuleFactory::instance(&SQUARE, quad).unwrap(),
            square
        ));
    }

    #[test]
    fn test_factory_key_separates_descriptor_types() {
        let quad = RuleCache::instance(Variant::Quad, 2).unwrap();
        let square = FactoryKey::new(&SQUARE, quad);
        let triangle = FactoryKey::new(&TRIANGLE, quad);
        assert_ne!(square.descriptor, triangle.descriptor);
        assert_ne!(square, triangle);
        assert_eq!(square, FactoryKey::new(&SQUARE, quad));
        assert_eq!(square.descriptor, TypeId::of::<Polygon<4>>());
    }

    #[test]
    fn test_mixed_wedge_sides() {
        let hex = RuleCache::instance(Variant::Hex, 4).unwrap();
        let factory = SideRuleFactory::instance(&WEDGE6, hex).unwrap();
        let variants: Vec<Variant> = factory.side_rules().iter().map(|r| r.variant()).collect();
        assert_eq!(
            variants,
            vec![Variant::Quad, Variant::Quad, Variant::Quad, Variant::Tri, Variant::Tri]
        );
        assert!(factory.side_rules().iter().all(|r| r.order() == 4));
        assert!(factory
            .side_rule(3)
            .unwrap()
            .is_same(RuleCache::instance(Variant::Tri, 4).unwrap()));
    }

    #[test]
    fn test_mixed_pyramid_sides() {
        let tet = RuleCache::instance(Variant::Tetra, 2).unwrap();
        let factory = SideRuleFactory::instance(&PYRAMID5, tet).unwrap();
        assert_eq!(factory.side_rule(0).unwrap().variant(), Variant::Tri);
        assert_eq!(factory.side_rule(4).unwrap().variant(), Variant::Quad);
        assert_eq!(factory.side_rule(4).unwrap().order(), 2);
    }

    #[test]
    fn test_side_index_out_of_range() {
        let quad = RuleCache::instance(Variant::Quad, 1).unwrap();
        let factory = SideRuleFactory::instance(&QUAD4, quad).unwrap();
        assert_eq!(
            factory.side_rule(4).unwrap_err(),
            QuadratureError::IndexOutOfRange { index: 4, len: 4 }
        );
    }

    #[test]
    fn test_side_order_beyond_table_fails() {
        // Wedge triangles need a Tri rule at the hex order
        let hex = RuleCache::instance(Variant::Hex, 11).unwrap();
        let err = SideRuleFactory::instance(&WEDGE6, hex).unwrap_err();
        assert!(err.is_order_error());
    }

    #[test]
    fn test_dimension_mismatch() {
        let quad = RuleCache::instance(Variant::Quad, 2).unwrap();
        let err = SideRuleFactory::instance(&TETRA4, quad).unwrap_err();
        assert!(matches!(
            err,
            QuadratureError::DimensionMismatch {
                rule_dim: 2,
                topology_dim: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_arbitrary_base_rejected() {
        let arb: &'static Rule =
            Box::leak(Box::new(Rule::arbitrary(2, &[0.25, 0.25], None).unwrap()));
        assert!(SideRuleFactory::instance(&QUAD4, arb).unwrap_err().is_fatal());
    }

    #[test]
    fn test_rule_for_topology() {
        let rule = rule_for_topology(3, "HEX8").unwrap();
        assert!(rule.is_same(RuleCache::instance(Variant::Hex, 3).unwrap()));
        assert_eq!(rule_for_topology(2, "tetra4").unwrap().variant(), Variant::Tetra);

        assert_eq!(
            rule_for_topology(2, "PYRAMID5").unwrap_err(),
            QuadratureError::NoElementRule {
                name: "PYRAMID5".to_string()
            }
        );
        assert!(matches!(
            rule_for_topology(2, "POLYGON"),
            Err(QuadratureError::UnknownTopology { .. })
        ));
    }
}
