use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named numeric features describing one user-game pair
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    values: BTreeMap<String, f64>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a feature, replacing any previous value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lays the features out in `columns` order
    ///
    /// Names the vector does not carry are read as 0. Features not named in
    /// `columns` are ignored.
    pub fn to_ordered(&self, columns: &[String]) -> Vec<f64> {
        columns
            .iter()
            .map(|name| self.get(name).unwrap_or(0.0))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
