use super::node::Node;
use crate::utils::{random::RandomSource, structures::FeatureStats, structures::Sample};
use std::ops::Range;

/// Window of a feature's sorted training values still available for
/// splitting below the current node.
#[derive(Clone, Debug)]
struct Candidates {
    feature: usize,
    range: Range<usize>,
}

/// Grows isolation trees from a frozen copy of the training statistics.
///
/// Each node picks a feature uniformly among those still available, then a
/// split value uniformly among that feature's remaining values. The left
/// child keeps the values up to and including the split, the right child
/// the values after it; other features pass through unchanged.
///
/// Growth stops when at most one feature is left or, with a non-zero
/// `max_depth`, when the depth reaches it. Without a depth limit a split on
/// the last value of a window would hand the left child the same window
/// again, so that feature is dropped from the left child instead. Every
/// level then shrinks a window or removes a feature, whatever the source
/// returns.
pub struct TreeBuilder<'a> {
    features: Vec<(&'a str, Vec<u64>)>,
    max_depth: u32,
}
impl<'a> TreeBuilder<'a> {
    pub fn new(stats: &'a FeatureStats, max_depth: u32) -> Self {
        Self {
            features: stats
                .iter()
                .map(|(name, values)| (name.as_str(), values.iter().copied().collect()))
                .collect(),
            max_depth,
        }
    }
    pub fn n_features(&self) -> usize {
        self.features.len()
    }
    pub fn build(&self, random: &mut dyn RandomSource) -> Option<Node> {
        let candidates = self
            .features
            .iter()
            .enumerate()
            .map(|(feature, (_, values))| Candidates {
                feature,
                range: 0..values.len(),
            })
            .collect::<Vec<_>>();
        self.grow(&candidates, 0, random)
    }
    fn grow(
        &self,
        candidates: &[Candidates],
        depth: u32,
        random: &mut dyn RandomSource,
    ) -> Option<Node> {
        if candidates.len() <= 1 {
            return None;
        }
        if self.max_depth > 0 && depth >= self.max_depth {
            return None;
        }

        let selected = random.uniform(0, candidates.len() as u64 - 1) as usize;
        let Candidates { feature, range } = candidates[selected].clone();
        if range.is_empty() {
            return None;
        }
        let (name, all_values) = &self.features[feature];
        let values = &all_values[range.clone()];
        let split_index = if values.len() > 1 {
            random.uniform(0, values.len() as u64 - 1) as usize
        } else {
            0
        };

        let mut node = Node::new(*name, values[split_index]);
        let is_last = split_index + 1 == values.len();

        let mut children = candidates.to_vec();
        if is_last && self.max_depth == 0 {
            children.remove(selected);
        } else {
            children[selected].range = range.start..range.start + split_index + 1;
        }
        node.set_left(self.grow(&children, depth + 1, random));

        if !is_last {
            let mut children = candidates.to_vec();
            children[selected].range = range.start + split_index + 1..range.end;
            node.set_right(self.grow(&children, depth + 1, random));
        }
        Some(node)
    }
}

/// Number of edges a sample travels from `node` before it falls off the
/// tree. Values below the split go left, the rest go right.
///
/// When the sample lacks the feature a node splits on, the walk cannot
/// continue. Both subtrees are then scored from scratch, the depth reached
/// so far is added to each, and the two are averaged.
pub fn path_length(node: Option<&Node>, sample: &Sample) -> f64 {
    let mut depth = 0.0;
    let mut current = node;
    while let Some(node) = current {
        match sample.get(node.feature_name()) {
            Some(feature) => {
                current = if feature.value() < node.split_value() {
                    node.left()
                } else {
                    node.right()
                };
                depth += 1.0;
            }
            None => {
                let left = depth + path_length(node.left(), sample);
                let right = depth + path_length(node.right(), sample);
                return (left + right) / 2.0;
            }
        }
    }
    depth
}
