use crate::{
    tree::{
        node::Node,
        tree::{path_length, TreeBuilder},
    },
    utils::{
        random::{ChaChaSource, RandomSource},
        statistics::{average_path_length, mean},
        structures::{FeatureStats, Sample},
    },
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

pub const DEFAULT_N_TREES: u32 = 10;
const ANOMALY_THRESHOLD: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees `create` tries to grow.
    pub n_trees: u32,
    /// Maximum tree depth, `0` for unbounded.
    pub max_depth: u32,
}
impl ForestConfig {
    pub fn new(n_trees: u32, max_depth: u32) -> Self {
        Self { n_trees, max_depth }
    }
}
impl Default for ForestConfig {
    fn default() -> Self {
        Self::new(DEFAULT_N_TREES, 0)
    }
}

/// Isolation forest over named integer features.
///
/// Training only records, per feature name, the set of distinct values
/// seen. `create` grows every tree from that record; scoring walks the
/// trees with a query sample.
pub struct Forest {
    random_source: Box<dyn RandomSource>,
    feature_stats: FeatureStats,
    trees: Vec<Node>,
    config: ForestConfig,
}

impl Forest {
    /// New forest with an entropy-seeded [`ChaChaSource`].
    pub fn new(config: &ForestConfig) -> Self {
        Self::with_random_source(config, Box::new(ChaChaSource::from_entropy()))
    }
    pub fn with_random_source(config: &ForestConfig, random_source: Box<dyn RandomSource>) -> Self {
        Self {
            random_source,
            feature_stats: FeatureStats::new(),
            trees: Vec::new(),
            config: config.clone(),
        }
    }
    /// Replaces the random source, dropping the previous one.
    pub fn set_random_source(&mut self, random_source: Box<dyn RandomSource>) {
        self.random_source = random_source;
    }
    pub fn get_config(&self) -> &ForestConfig {
        &self.config
    }
    pub fn get_trees(&self) -> &[Node] {
        &self.trees
    }
    pub fn feature_stats(&self) -> &FeatureStats {
        &self.feature_stats
    }

    /// Records the values of every feature in `sample`.
    pub fn add_sample(&mut self, sample: &Sample) {
        for feature in sample.features() {
            match self.feature_stats.get_mut(feature.name()) {
                Some(values) => {
                    values.insert(feature.value());
                }
                None => {
                    self.feature_stats
                        .insert(feature.name().to_string(), [feature.value()].into());
                }
            }
        }
    }
    pub fn add_samples<'a>(&mut self, samples: impl IntoIterator<Item = &'a Sample>) {
        for sample in samples {
            self.add_sample(sample);
        }
    }

    /// Grows up to `n_trees` trees from the statistics gathered so far,
    /// replacing any trees from a previous call. Builds that cannot split
    /// (fewer than two known features) are left out.
    #[instrument(skip_all, fields(n_trees = self.config.n_trees, max_depth = self.config.max_depth))]
    pub fn create(&mut self) {
        let builder = TreeBuilder::new(&self.feature_stats, self.config.max_depth);
        let mut trees = Vec::with_capacity(self.config.n_trees as usize);
        for i in 0..self.config.n_trees {
            match builder.build(self.random_source.as_mut()) {
                Some(tree) => {
                    debug!(tree = i, n_nodes = tree.n_nodes(), height = tree.height(), "tree built");
                    trees.push(tree);
                }
                None => debug!(tree = i, "tree omitted"),
            }
        }
        info!(
            n_features = builder.n_features(),
            n_trees_built = trees.len(),
            "forest created"
        );
        self.trees = trees;
    }

    /// Path length of `sample` through `tree`.
    pub fn score_tree(sample: &Sample, tree: &Node) -> f64 {
        path_length(Some(tree), sample)
    }

    /// Average path length over all trees, `0` without trees.
    pub fn score(&self, sample: &Sample) -> f64 {
        average_depth(&self.trees, sample)
    }

    /// `2^(-score / c(n))` where `n` is the number of trees. Closer to `1`
    /// means more anomalous. Returns `0` with fewer than two trees.
    pub fn normalized_score(&self, sample: &Sample) -> f64 {
        normalized_depth(&self.trees, sample)
    }

    /// Normalized scores of many samples, computed in parallel.
    pub fn score_samples(&self, data: &[Sample]) -> Vec<f64> {
        let trees = &self.trees;
        data.par_iter()
            .map(|sample| normalized_depth(trees, sample))
            .collect()
    }
    pub fn depth_samples(&self, data: &[Sample]) -> Vec<f64> {
        let trees = &self.trees;
        data.par_iter()
            .map(|sample| average_depth(trees, sample))
            .collect()
    }
    /// `1` for samples whose normalized score exceeds 0.5, `0` otherwise.
    pub fn predict(&self, data: &[Sample]) -> Vec<isize> {
        self.score_samples(data)
            .into_iter()
            .map(|score| if score > ANOMALY_THRESHOLD { 1 } else { 0 })
            .collect()
    }
}

fn average_depth(trees: &[Node], sample: &Sample) -> f64 {
    if trees.is_empty() {
        return 0.0;
    }
    let depths = trees
        .iter()
        .map(|tree| Forest::score_tree(sample, tree))
        .collect::<Vec<_>>();
    mean(&depths)
}

fn normalized_depth(trees: &[Node], sample: &Sample) -> f64 {
    let n_trees = trees.len();
    if n_trees <= 1 {
        return 0.0;
    }
    2.0_f64.powf(-average_depth(trees, sample) / average_path_length(n_trees))
}

/// Debug dump of the statistics and trees. Not meant to be parsed.
impl fmt::Display for Forest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'Sub Sampling Size': {}, 'Feature Values': [",
            self.config.max_depth
        )?;
        for (i, (name, values)) in self.feature_stats.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let values = values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "'{}': [{}]", name, values)?;
        }
        f.write_str("], 'Trees': [")?;
        for (i, tree) in self.trees.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", tree)?;
        }
        f.write_str("]}")
    }
}
