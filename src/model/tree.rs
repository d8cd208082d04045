//! Binary CART classifier grown with Gini impurity.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Tree node stored in a flat arena; children are indices into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        /// Fraction of positive samples that reached this leaf
        p_positive: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    /// Candidate features examined per split before accepting the best one
    pub max_features: usize,
    pub min_samples_split: usize,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl DecisionTree {
    /// Grow a tree on the rows of `x` listed in `samples` (duplicates allowed).
    pub fn fit<R: Rng + ?Sized>(
        x: &[Vec<f64>],
        y: &[u8],
        samples: Vec<usize>,
        params: TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(x, y, samples, 0, params, rng);
        tree
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Probability that `row` belongs to the positive class
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { p_positive } => return *p_positive,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Check that every child index points inside the arena and after its parent.
    pub fn is_well_formed(&self, n_features: usize) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().enumerate().all(|(i, node)| match node {
                TreeNode::Leaf { p_positive } => (0.0..=1.0).contains(p_positive),
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    *feature < n_features
                        && *left > i
                        && *right > i
                        && *left < self.nodes.len()
                        && *right < self.nodes.len()
                }
            })
    }

    fn grow<R: Rng + ?Sized>(
        &mut self,
        x: &[Vec<f64>],
        y: &[u8],
        samples: Vec<usize>,
        depth: usize,
        params: TreeParams,
        rng: &mut R,
    ) -> usize {
        let index = self.nodes.len();
        let counts = class_counts(y, &samples);
        let p_positive = counts[1] as f64 / samples.len().max(1) as f64;
        self.nodes.push(TreeNode::Leaf { p_positive });

        let pure = counts[0] == 0 || counts[1] == 0;
        let too_small = samples.len() < params.min_samples_split;
        let too_deep = params.max_depth.is_some_and(|max| depth >= max);
        if pure || too_small || too_deep {
            return index;
        }

        let Some(split) = best_split(x, y, &samples, params.max_features, rng) else {
            return index;
        };

        let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&s| x[s][split.feature] <= split.threshold);
        if left_samples.is_empty() || right_samples.is_empty() {
            return index;
        }

        let left = self.grow(x, y, left_samples, depth + 1, params, rng);
        let right = self.grow(x, y, right_samples, depth + 1, params, rng);
        self.nodes[index] = TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        index
    }
}

fn class_counts(y: &[u8], samples: &[usize]) -> [usize; 2] {
    let mut counts = [0usize; 2];
    for &s in samples {
        counts[usize::from(y[s] == 1)] += 1;
    }
    counts
}

fn gini(counts: [usize; 2]) -> f64 {
    let total = (counts[0] + counts[1]) as f64;
    if total == 0.0 {
        return 0.0;
    }
    let p0 = counts[0] as f64 / total;
    let p1 = counts[1] as f64 / total;
    1.0 - p0 * p0 - p1 * p1
}

/// Visit features in random order. Stop once `max_features` have been
/// examined and a usable split exists; constant features don't count as found.
fn best_split<R: Rng + ?Sized>(
    x: &[Vec<f64>],
    y: &[u8],
    samples: &[usize],
    max_features: usize,
    rng: &mut R,
) -> Option<SplitCandidate> {
    let n_features = x[samples[0]].len();
    let mut order: Vec<usize> = (0..n_features).collect();
    order.shuffle(rng);

    let total = class_counts(y, samples);
    let n = samples.len() as f64;
    let mut best: Option<SplitCandidate> = None;

    for (visited, &feature) in order.iter().enumerate() {
        if visited >= max_features && best.is_some() {
            break;
        }

        let mut sorted: Vec<(f64, u8)> = samples.iter().map(|&s| (x[s][feature], y[s])).collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left = [0usize; 2];
        for i in 0..sorted.len() - 1 {
            left[usize::from(sorted[i].1 == 1)] += 1;
            let (current, next) = (sorted[i].0, sorted[i + 1].0);
            if current == next {
                continue;
            }

            let right = [total[0] - left[0], total[1] - left[1]];
            let n_left = (i + 1) as f64;
            let impurity = (n_left * gini(left) + (n - n_left) * gini(right)) / n;

            if best.as_ref().is_none_or(|b| impurity < b.impurity) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: midpoint(current, next),
                    impurity,
                });
            }
        }
    }

    best
}

/// Threshold between two distinct sorted values. Falls back to `current`
/// when the halfway point rounds up to `next` or overflows.
fn midpoint(current: f64, next: f64) -> f64 {
    let mid = current / 2.0 + next / 2.0;
    if mid.is_finite() && mid < next {
        mid
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn params(max_features: usize) -> TreeParams {
        TreeParams {
            max_features,
            min_samples_split: 2,
            max_depth: None,
        }
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini([4, 0]), 0.0);
        assert_eq!(gini([2, 2]), 0.5);
        assert_eq!(gini([0, 0]), 0.0);
    }

    #[test]
    fn test_separable_single_feature() {
        let x = vec![vec![0.1], vec![0.2], vec![0.8], vec![0.9]];
        let y = vec![0, 0, 1, 1];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(&x, &y, (0..4).collect(), params(1), &mut rng);

        assert_eq!(tree.node_count(), 3);
        assert!(tree.is_well_formed(1));
        assert_eq!(tree.predict_proba(&[0.15]), 0.0);
        assert_eq!(tree.predict_proba(&[0.85]), 1.0);
        // Threshold sits halfway between 0.2 and 0.8
        assert_eq!(tree.predict_proba(&[0.5]), 0.0);
        assert_eq!(tree.predict_proba(&[0.51]), 1.0);
    }

    #[test]
    fn test_pure_node_is_leaf() {
        let x = vec![vec![0.1, 0.3], vec![0.7, 0.2]];
        let y = vec![1, 1];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(&x, &y, vec![0, 1], params(2), &mut rng);

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict_proba(&[0.0, 0.0]), 1.0);
    }

    #[test]
    fn test_constant_features_yield_mixed_leaf() {
        let x = vec![vec![0.5], vec![0.5], vec![0.5]];
        let y = vec![0, 1, 1];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(&x, &y, vec![0, 1, 2], params(1), &mut rng);

        assert_eq!(tree.node_count(), 1);
        assert!((tree.predict_proba(&[0.5]) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_search_continues_past_constant_feature() {
        // Feature 0 is constant, so with max_features = 1 the search must
        // still reach feature 1 whichever comes first.
        let x = vec![vec![1.0, 0.1], vec![1.0, 0.2], vec![1.0, 0.8], vec![1.0, 0.9]];
        let y = vec![0, 0, 1, 1];
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let tree = DecisionTree::fit(&x, &y, (0..4).collect(), params(1), &mut rng);
            assert_eq!(tree.node_count(), 3);
            assert_eq!(tree.predict_proba(&[1.0, 0.9]), 1.0);
        }
    }

    #[test]
    fn test_midpoint_stays_below_next() {
        assert_eq!(midpoint(0.2, 0.8), 0.5);

        let a = f64::from_bits(0.7f64.to_bits() + 1);
        let b = f64::from_bits(a.to_bits() + 1);
        assert!(midpoint(a, b) < b);

        let wide = midpoint(-1.4e308, 1.5e308);
        assert!(wide.is_finite() && wide < 1.5e308);
        assert_eq!(midpoint(-f64::MAX, f64::MAX), 0.0);
    }

    #[test]
    fn test_adjacent_floats_split_cleanly() {
        let a = f64::from_bits(0.7f64.to_bits() + 1);
        let b = f64::from_bits(a.to_bits() + 1);
        let x = vec![vec![a], vec![b]];
        let y = vec![0, 1];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(&x, &y, vec![0, 1], params(1), &mut rng);

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.predict_proba(&[a]), 0.0);
        assert_eq!(tree.predict_proba(&[b]), 1.0);
    }

    #[test]
    fn test_extreme_magnitudes_split_cleanly() {
        let x = vec![vec![-1.5e308], vec![-1.4e308], vec![1.5e308]];
        let y = vec![0, 0, 1];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(&x, &y, vec![0, 1, 2], params(1), &mut rng);

        assert!(tree.is_well_formed(1));
        assert_eq!(tree.predict_proba(&[-1.4e308]), 0.0);
        assert_eq!(tree.predict_proba(&[1.5e308]), 1.0);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let x = vec![vec![0.1], vec![0.2], vec![0.3], vec![0.4]];
        let y = vec![0, 1, 0, 1];
        let mut rng = StdRng::seed_from_u64(0);
        let tree = DecisionTree::fit(
            &x,
            &y,
            (0..4).collect(),
            TreeParams {
                max_features: 1,
                min_samples_split: 2,
                max_depth: Some(1),
            },
            &mut rng,
        );
        assert!(tree.node_count() <= 3);
    }
}
