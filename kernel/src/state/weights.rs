//! `ResourceWeights`: the signed per-resource weight table used by scoring.

use std::collections::BTreeMap;

/// Signed weight per resource. Unlisted resources weigh `0.0`.
///
/// Negative weights penalize holdings (waste byproducts).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceWeights {
    weights: BTreeMap<String, f64>,
}

impl ResourceWeights {
    /// Create an empty table (every resource weighs zero).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight of `resource`, or `0.0` if unlisted.
    #[must_use]
    pub fn get(&self, resource: &str) -> f64 {
        self.weights.get(resource).copied().unwrap_or(0.0)
    }

    /// Set the weight of `resource`.
    pub fn set(&mut self, resource: impl Into<String>, weight: f64) {
        self.weights.insert(resource.into(), weight);
    }

    /// Listed entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of listed resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no resource is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, f64)> for ResourceWeights {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}

impl FromIterator<(String, f64)> for ResourceWeights {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, f64); N]> for ResourceWeights {
    fn from(entries: [(&str, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}
