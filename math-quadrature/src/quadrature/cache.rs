//! Process-wide caches of canonical rules
//!
//! Entries are built on first request and never evicted. Values are leaked
//! into `&'static` references so that every holder shares the one instance
//! and pointer equality identifies a discretization.

use super::rules::{Rule, Variant};
use crate::error::{QuadratureError, Result};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{LazyLock, PoisonError, RwLock};

/// Insert-only map from keys to leaked, immutable values
///
/// Lookups take the read lock. A miss takes the write lock, checks again and
/// builds the value while holding it, so a key is built at most once and no
/// reader sees a partially built value. A failed build inserts nothing.
#[derive(Debug)]
pub(crate) struct KeyedCache<K, V: 'static> {
    entries: RwLock<HashMap<K, &'static V>>,
}

impl<K, V> KeyedCache<K, V>
where
    K: Eq + Hash + Copy,
    V: Sync + 'static,
{
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<&'static V> {
        // Values are never mutated, so a poisoned lock still holds valid data
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).copied()
    }

    pub(crate) fn get_or_try_insert_with<F>(&self, key: K, build: F) -> Result<&'static V>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(&value) = entries.get(&key) {
            return Ok(value);
        }

        let value: &'static V = Box::leak(Box::new(build()?));
        entries.insert(key, value);
        Ok(value)
    }

    pub(crate) fn keys(&self) -> Vec<K> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.keys().copied().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

static RULE_CACHE: LazyLock<RuleCache> = LazyLock::new(RuleCache::new);

/// Canonical rule per (variant, order)
///
/// Each variant has its own bucket, so requests for different variants never
/// wait on each other. Building a tensor rule locks its own bucket and then
/// the bar bucket; no bucket ever locks a higher-dimensional one.
#[derive(Debug)]
pub struct RuleCache {
    buckets: [KeyedCache<usize, Rule>; 5],
}

impl RuleCache {
    fn new() -> Self {
        Self {
            buckets: std::array::from_fn(|_| KeyedCache::new()),
        }
    }

    /// The unique rule for `variant` at `order`, built on first access
    ///
    /// Fails with `UnsupportedOperation` for [`Variant::Arbitrary`] and with
    /// `UnsupportedOrder` for simplex orders past the published tables.
    pub fn instance(variant: Variant, order: usize) -> Result<&'static Rule> {
        RULE_CACHE.bucket(variant)?.get_or_try_insert_with(order, || {
            let rule = Rule::build(variant, order)?;
            log::debug!(
                "Built {} rule of order {} with {} points",
                variant,
                order,
                rule.num_points()
            );
            Ok(rule)
        })
    }

    /// Orders already built for `variant`, ascending
    pub fn cached_orders(variant: Variant) -> Vec<usize> {
        let mut orders = RULE_CACHE
            .bucket(variant)
            .map(KeyedCache::keys)
            .unwrap_or_default();
        orders.sort_unstable();
        orders
    }

    /// Total number of cached rules across all variants
    pub fn len() -> usize {
        RULE_CACHE.buckets.iter().map(KeyedCache::len).sum()
    }

    fn bucket(&self, variant: Variant) -> Result<&KeyedCache<usize, Rule>> {
        self.buckets
            .get(variant.index())
            .ok_or(QuadratureError::UnsupportedOperation {
                variant,
                operation: "cached construction",
            })
    }
}
