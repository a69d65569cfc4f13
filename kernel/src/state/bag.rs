//! `ResourceBag`: named resource quantities held by one agent.
//!
//! Backed by a `BTreeMap` (not `HashMap`) so that iteration order is
//! deterministic wherever a bag is enumerated: successor generation,
//! fingerprinting, and report serialization all walk keys in byte order.
//!
//! Quantities are `f64`. Transforms may produce fractional amounts (e.g.
//! `FoodWaste: 0.5`) and negative outputs are permitted, so a held quantity
//! may go below zero. An absent resource always reads as `0.0`.

use std::collections::BTreeMap;

/// Named resource quantities with zero-default reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceBag {
    quantities: BTreeMap<String, f64>,
}

impl ResourceBag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity of `resource`, or `0.0` if absent. Never fails.
    #[must_use]
    pub fn get(&self, resource: &str) -> f64 {
        self.quantities.get(resource).copied().unwrap_or(0.0)
    }

    /// Whether `resource` has an explicit entry (even if zero).
    #[must_use]
    pub fn contains(&self, resource: &str) -> bool {
        self.quantities.contains_key(resource)
    }

    /// Set `resource` to exactly `quantity`, creating the entry if absent.
    pub fn set(&mut self, resource: impl Into<String>, quantity: f64) {
        self.quantities.insert(resource.into(), quantity);
    }

    /// Add `amount` (may be negative) to `resource`, creating it if absent.
    pub fn add(&mut self, resource: &str, amount: f64) {
        match self.quantities.get_mut(resource) {
            Some(held) => *held += amount,
            None => {
                self.quantities.insert(resource.to_string(), amount);
            }
        }
    }

    /// True iff `self.get(k) >= required.get(k)` for every `k` in `required`.
    ///
    /// Keys missing from `self` count as zero. An empty requirement is
    /// always covered.
    #[must_use]
    pub fn covers(&self, required: &ResourceBag) -> bool {
        required
            .iter()
            .all(|(resource, amount)| self.get(resource) >= amount)
    }

    /// The first resource in `required` that `self` does not cover, with the
    /// needed and held amounts.
    #[must_use]
    pub fn first_shortfall<'a>(&self, required: &'a ResourceBag) -> Option<(&'a str, f64, f64)> {
        required.iter().find_map(|(resource, amount)| {
            let held = self.get(resource);
            (held < amount).then_some((resource, amount, held))
        })
    }

    /// A new bag with every quantity multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> ResourceBag {
        self.quantities
            .iter()
            .map(|(k, v)| (k.clone(), v * factor))
            .collect()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.quantities.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Resource names in key order.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.quantities.keys().map(String::as_str)
    }

    /// Number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Whether the bag has no explicit entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

impl FromIterator<(String, f64)> for ResourceBag {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            quantities: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, f64)> for ResourceBag {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

impl<const N: usize> From<[(&str, f64); N]> for ResourceBag {
    fn from(entries: [(&str, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}
