pub mod predict;
pub mod tree;

// Unit-testing
#[cfg(test)]
mod tests {
    use crate::criterion::Criterion;
    use crate::splitter::{ExhaustiveSplitter, ThresholdRule};
    use crate::tree::tree::Tree;
    use crate::Matrix;
    use hashbrown::HashMap;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn fit_tree(data: &Matrix<f64>, y: &[f64], criterion: Criterion, max_depth: Option<usize>) -> Tree {
        let splitter = ExhaustiveSplitter::new(criterion, 2, 1, 0.0, ThresholdRule::Midpoint, data.rows);
        let mut tree = Tree::new();
        tree.fit(data, y, &splitter, max_depth);
        tree
    }

    fn check_structure(tree: &Tree) {
        let mut n_leaves = 0;
        for node in tree.nodes.values() {
            match &node.split {
                None => n_leaves += 1,
                Some(split) => {
                    let left = &tree.nodes[&split.left_child];
                    let right = &tree.nodes[&split.right_child];
                    assert_eq!(left.depth, node.depth + 1);
                    assert_eq!(right.depth, node.depth + 1);
                    assert_eq!(left.n_samples + right.n_samples, node.n_samples);
                    assert!(split.split_gain > 0.0);
                }
            }
        }
        assert_eq!(n_leaves, tree.n_leaves);
        assert_eq!(tree.nodes.len(), 2 * n_leaves - 1);
    }

    #[test]
    fn test_tree_fit_regression_stump() {
        let v = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![1.0, 1.0, 10.0, 10.0];
        let data = Matrix::new(&v, 4, 1);
        let tree = fit_tree(&data, &y, Criterion::SquaredError, Some(1));

        let root = tree.root().unwrap();
        let split = root.split.as_ref().unwrap();
        assert_eq!(split.split_feature, 0);
        assert_eq!(split.split_value, 2.5);
        assert_eq!(root.impurity, 20.25);
        assert_eq!(root.value, 5.5);

        let left = &tree.nodes[&split.left_child];
        let right = &tree.nodes[&split.right_child];
        assert_eq!((left.value, left.impurity, left.n_samples), (1.0, 0.0, 2));
        assert_eq!((right.value, right.impurity, right.n_samples), (10.0, 0.0, 2));
        assert_eq!(tree.depth, 1);
        assert_eq!(tree.n_leaves, 2);
        assert_eq!(tree.predict(&data, false), y);
    }

    #[test]
    fn test_tree_fit_classification_perfect_split() {
        let v = vec![0.0, 0.0, 1.0, 1.0];
        let y = vec![0.0, 0.0, 1.0, 1.0];
        let data = Matrix::new(&v, 4, 1);
        let tree = fit_tree(&data, &y, Criterion::Gini, Some(1));

        let split = tree.root().unwrap().split.clone().unwrap();
        assert_eq!(split.split_value, 0.5);
        let left = &tree.nodes[&split.left_child];
        let right = &tree.nodes[&split.right_child];
        assert_eq!((left.value, left.impurity), (0.0, 0.0));
        assert_eq!((right.value, right.impurity), (1.0, 0.0));
    }

    #[test]
    fn test_tree_fit_uninformative_feature_stays_leaf() {
        // Each feature value holds one sample of each class, so the only
        // split leaves gini unchanged.
        let v = vec![0.0, 1.0, 0.0, 1.0];
        let y = vec![0.0, 0.0, 1.0, 1.0];
        let data = Matrix::new(&v, 4, 1);
        let tree = fit_tree(&data, &y, Criterion::Gini, Some(1));
        assert_eq!(tree.nodes.len(), 1);
        let root = tree.root().unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.impurity, 0.5);
        assert_eq!(root.value, 0.0);
    }

    #[test]
    fn test_tree_fit_constant_target() {
        let v = vec![3.0, 1.0, 2.0, 5.0, 4.0, 0.0];
        let y = vec![7.0; 6];
        let data = Matrix::new(&v, 6, 1);
        for criterion in [Criterion::SquaredError, Criterion::AbsoluteError, Criterion::Gini] {
            let tree = fit_tree(&data, &y, criterion, None);
            assert_eq!(tree.nodes.len(), 1);
            let root = tree.root().unwrap();
            assert_eq!(root.impurity, 0.0);
            assert_eq!(root.value, 7.0);
        }
    }

    #[test]
    fn test_tree_fit_unbounded_depth_reaches_purity() {
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let data = Matrix::new(&v, 6, 1);
        let tree = fit_tree(&data, &y, Criterion::Gini, None);
        check_structure(&tree);
        for node in tree.nodes.values().filter(|n| n.is_leaf()) {
            assert_eq!(node.impurity, 0.0);
        }
        assert_eq!(tree.predict(&data, false), y);
    }

    #[test]
    fn test_tree_fit_depth_first_numbering() {
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let y = vec![1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0, 128.0];
        let data = Matrix::new(&v, 8, 1);
        let tree = fit_tree(&data, &y, Criterion::SquaredError, Some(2));
        let root_split = tree.root().unwrap().split.clone().unwrap();
        assert_eq!((root_split.left_child, root_split.right_child), (1, 2));
        // The left child is grown before the right one, so it numbers its
        // children first.
        let left_split = tree.nodes[&1].split.clone().unwrap();
        assert_eq!((left_split.left_child, left_split.right_child), (3, 4));
        assert_eq!(tree.depth, 2);
    }

    #[test]
    fn test_tree_fit_random_data_structure() {
        let mut rng = StdRng::seed_from_u64(0);
        let rows = 60;
        let cols = 3;
        let v: Vec<f64> = (0..rows * cols).map(|_| (rng.gen::<f64>() * 10.0).round()).collect();
        let y: Vec<f64> = (0..rows).map(|_| rng.gen_range(0..3) as f64).collect();
        let data = Matrix::new(&v, rows, cols);

        for max_depth in [Some(1), Some(3), None] {
            let tree = fit_tree(&data, &y, Criterion::Gini, max_depth);
            check_structure(&tree);
            if let Some(d) = max_depth {
                assert!(tree.depth <= d);
            }
            for i in 0..rows {
                let row = data.get_row(i);
                let path = tree.decision_path(&row);
                assert!(path.len() - 1 <= tree.depth);
                assert!(tree.nodes[path.last().unwrap()].is_leaf());
                assert_eq!(tree.predict_row_from_row_slice(&row), tree.nodes[path.last().unwrap()].value);
            }
            assert_eq!(tree.predict(&data, false), tree.predict(&data, true));
        }
    }

    #[test]
    fn test_tree_fit_upper_value_thresholds() {
        let v = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![1.0, 1.0, 10.0, 10.0];
        let data = Matrix::new(&v, 4, 1);
        let splitter = ExhaustiveSplitter::new(Criterion::SquaredError, 2, 1, 0.0, ThresholdRule::UpperValue, 4);
        let mut tree = Tree::new();
        tree.fit(&data, &y, &splitter, Some(1));
        let split = tree.root().unwrap().split.clone().unwrap();
        // The threshold is the upper value of the pair, 2.0 still goes left.
        assert_eq!(split.split_value, 2.0);
        assert_eq!(tree.predict(&data, false), y);
    }

    #[test]
    fn test_tree_to_text() {
        let v = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![1.0, 1.0, 10.0, 10.0];
        let data = Matrix::new(&v, 4, 1);
        let tree = fit_tree(&data, &y, Criterion::SquaredError, Some(1));
        assert_eq!(tree.to_text(), "feature_0 <= 2.50?\n| T: Pred: 1.00\n| T: Pred: 10.00");
        println!("{}", tree);
        let display = tree.to_string();
        assert_eq!(display.lines().count(), 3);
        assert!(display.starts_with("0:[0 <= 2.5]"));
    }

    #[test]
    fn test_tree_importance() {
        // Feature 1 is noise, feature 0 carries the target.
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0, 5.0, 5.0, 5.0];
        let y = vec![1.0, 1.0, 10.0, 10.0];
        let data = Matrix::new(&v, 4, 2);
        let tree = fit_tree(&data, &y, Criterion::SquaredError, None);
        let mut stats = HashMap::new();
        tree.calculate_importance_weight(&mut stats);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[&0], (1.0, 1));
        let mut stats = HashMap::new();
        tree.calculate_importance_cover(&mut stats);
        assert_eq!(stats[&0], (4.0, 1));
        let mut stats = HashMap::new();
        tree.calculate_importance_gain(&mut stats);
        assert_eq!(stats[&0], (20.25, 1));
    }

    #[test]
    fn test_tree_remove_children() {
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
        let data = Matrix::new(&v, 6, 1);
        let mut tree = fit_tree(&data, &y, Criterion::Gini, None);
        let n = tree.nodes.len();
        assert_eq!(tree.remove_children(0), n);
        assert!(tree.nodes.is_empty());
    }
}
