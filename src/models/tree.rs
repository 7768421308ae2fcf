//! Decision trees in scikit-learn's flat array layout.
//!
//! A fitted `sklearn.tree` stores its nodes in parallel arrays (`tree_.children_left`,
//! `tree_.children_right`, `tree_.feature`, `tree_.threshold`, `tree_.value`). We keep
//! the same layout so exports need no reshaping:
//!
//! - node `0` is the root
//! - `children_left[i] == -1` marks a leaf
//! - an internal node sends `x` left when `x[feature[i]] <= threshold[i]`
//! - `value[i]` holds the node's output vector (per-class weights for
//!   classifiers, regression targets for regressors)
//!
//! Validation requires every child index to be greater than its parent's. Fitted
//! trees are stored depth-first so this always holds, and it guarantees that a
//! walk terminates.

use serde::{Deserialize, Serialize};

/// Sentinel child index for leaves.
pub const TREE_LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl Tree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    /// Check structure against the expected input and output widths.
    pub fn validate(&self, n_features: usize, value_len: usize) -> Result<(), String> {
        let n = self.node_count();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(format!(
                "tree arrays disagree on node count (children_left={n}, children_right={}, feature={}, threshold={}, value={})",
                self.children_right.len(),
                self.feature.len(),
                self.threshold.len(),
                self.value.len()
            ));
        }

        for i in 0..n {
            let left = self.children_left[i];
            let right = self.children_right[i];

            if left == TREE_LEAF {
                if right != TREE_LEAF {
                    return Err(format!("node {i} has a right child but no left child"));
                }
                let value = &self.value[i];
                if value.len() != value_len {
                    return Err(format!(
                        "leaf {i} holds {} values, expected {value_len}",
                        value.len()
                    ));
                }
                if value.iter().any(|v| !v.is_finite()) {
                    return Err(format!("leaf {i} holds a non-finite value"));
                }
                continue;
            }

            for child in [left, right] {
                if child <= i as i64 || child >= n as i64 {
                    return Err(format!("node {i} points to invalid child {child}"));
                }
            }

            let feature = self.feature[i];
            if feature < 0 || feature >= n_features as i64 {
                return Err(format!(
                    "node {i} splits on feature {feature}, model has {n_features}"
                ));
            }
            if !self.threshold[i].is_finite() {
                return Err(format!("node {i} has a non-finite threshold"));
            }
        }

        Ok(())
    }

    /// Walk from the root to a leaf and return the leaf's value row.
    ///
    /// Only call on trees that passed `validate` with `x.len()` features.
    pub fn leaf_value(&self, x: &[f64]) -> &[f64] {
        let mut node = 0usize;
        while self.children_left[node] != TREE_LEAF {
            let feature = self.feature[node] as usize;
            let next = if x[feature] <= self.threshold[node] {
                self.children_left[node]
            } else {
                self.children_right[node]
            };
            node = next as usize;
        }
        &self.value[node]
    }
}

/// Validate each tree in an ensemble, prefixing errors with the tree index.
pub fn validate_forest(trees: &[Tree], n_features: usize, value_len: usize) -> Result<(), String> {
    if trees.is_empty() {
        return Err("ensemble has no trees".to_string());
    }
    for (idx, tree) in trees.iter().enumerate() {
        tree.validate(n_features, value_len)
            .map_err(|e| format!("tree {idx}: {e}"))?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn stump(feature: i64, threshold: f64, left: Vec<f64>, right: Vec<f64>) -> Tree {
    let width = left.len();
    Tree {
        children_left: vec![1, TREE_LEAF, TREE_LEAF],
        children_right: vec![2, TREE_LEAF, TREE_LEAF],
        feature: vec![feature, -2, -2],
        threshold: vec![threshold, -2.0, -2.0],
        value: vec![vec![0.0; width], left, right],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stump_routes_on_threshold() {
        let tree = stump(1, 0.5, vec![10.0], vec![20.0]);
        tree.validate(2, 1).unwrap();

        assert_eq!(tree.leaf_value(&[99.0, 0.5]), &[10.0]);
        assert_eq!(tree.leaf_value(&[99.0, 0.6]), &[20.0]);
    }

    #[test]
    fn deeper_tree_walks_both_levels() {
        //        0: x0 <= 0
        //       /          \
        //  1: x1 <= 1      4: leaf [3]
        //   /     \
        // 2:[1]  3:[2]
        let tree = Tree {
            children_left: vec![1, 2, TREE_LEAF, TREE_LEAF, TREE_LEAF],
            children_right: vec![4, 3, TREE_LEAF, TREE_LEAF, TREE_LEAF],
            feature: vec![0, 1, -2, -2, -2],
            threshold: vec![0.0, 1.0, -2.0, -2.0, -2.0],
            value: vec![vec![0.0], vec![0.0], vec![1.0], vec![2.0], vec![3.0]],
        };
        tree.validate(2, 1).unwrap();

        assert_eq!(tree.leaf_value(&[-1.0, 0.0]), &[1.0]);
        assert_eq!(tree.leaf_value(&[-1.0, 5.0]), &[2.0]);
        assert_eq!(tree.leaf_value(&[1.0, 0.0]), &[3.0]);
    }

    #[test]
    fn backward_child_is_rejected() {
        let mut tree = stump(0, 0.0, vec![1.0], vec![2.0]);
        tree.children_left[0] = 0;
        let err = tree.validate(1, 1).unwrap_err();
        assert!(err.contains("invalid child"), "{err}");
    }

    #[test]
    fn out_of_range_feature_is_rejected() {
        let tree = stump(3, 0.0, vec![1.0], vec![2.0]);
        let err = tree.validate(3, 1).unwrap_err();
        assert!(err.contains("feature 3"), "{err}");
    }

    #[test]
    fn leaf_width_must_match() {
        let tree = stump(0, 0.0, vec![1.0, 2.0], vec![2.0]);
        assert!(tree.validate(1, 2).is_err());
    }

    #[test]
    fn empty_forest_is_rejected() {
        assert!(validate_forest(&[], 1, 1).is_err());
    }
}
