use std::collections::{BTreeMap, BTreeSet};

/// Distinct training values per feature name, both levels kept in
/// ascending order so that positional selection is reproducible.
pub type FeatureStats = BTreeMap<String, BTreeSet<u64>>;

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Feature {
    name: String,
    value: u64,
}
impl Feature {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn value(&self) -> u64 {
        self.value
    }
}

/// A named observation. Feature order is the order in which the scoring
/// walk looks features up; duplicate names are allowed and the first wins.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Sample {
    name: String,
    features: Vec<Feature>,
}
impl Sample {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
        }
    }
    pub fn with_feature(mut self, name: impl Into<String>, value: u64) -> Self {
        self.features.push(Feature::new(name, value));
        self
    }
    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }
    pub fn add_features(&mut self, features: impl IntoIterator<Item = Feature>) {
        self.features.extend(features);
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn features(&self) -> &[Feature] {
        &self.features
    }
    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }
}

#[macro_export]
macro_rules! assert_eq_with_tol {
    ($left:expr, $right:expr, $tolerance:expr) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;

        if (left - right).abs() > tolerance {
            panic!(
                "assertion failed: `(left == right)` \
                \n   left: `{:?}`,\
                \n  right: `{:?}`,\
                \n  diff:  `{:?}`,\
                \n  max tolerance: `{:?}`",
                left,
                right,
                (left - right).abs(),
                tolerance
            );
        }
    };
}
