use std::collections::BTreeSet;

use nbs_space::{binomial, parent_sets, ConstraintTable};

fn as_vecs(node: usize, fan_in: usize) -> Vec<Vec<usize>> {
    parent_sets(node, fan_in)
        .map(|set| set.iter().collect())
        .collect()
}

#[test]
fn node_one_only_reads_the_input() {
    assert_eq!(as_vecs(1, 1), vec![vec![0]]);
}

#[test]
fn node_three_pairs() {
    assert_eq!(as_vecs(3, 2), vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
}

#[test]
fn every_node_of_the_standard_table_has_binomial_many_sets() {
    let table = ConstraintTable::default();
    for (node, fan_in) in table.iter() {
        let sets = parent_sets(node, fan_in);
        assert_eq!(sets.len(), binomial(node, fan_in));
        let distinct: BTreeSet<_> = sets.clone().map(|set| set.mask()).collect();
        assert_eq!(distinct.len(), binomial(node, fan_in));
        for set in sets {
            assert_eq!(set.node(), node);
            assert_eq!(set.len(), fan_in);
            assert!(set.iter().all(|parent| parent < node));
        }
    }
}

#[test]
fn all_small_combinations_are_counted() {
    for node in 0..6 {
        for fan_in in 0..=6 {
            let sets: Vec<_> = parent_sets(node, fan_in).collect();
            assert_eq!(sets.len(), binomial(node, fan_in), "node {node} fan-in {fan_in}");
            let distinct: BTreeSet<_> = sets.iter().map(|set| set.mask()).collect();
            assert_eq!(distinct.len(), sets.len());
        }
    }
}

#[test]
fn enumeration_restarts_identically() {
    let first: Vec<_> = parent_sets(5, 3).collect();
    let second: Vec<_> = parent_sets(5, 3).collect();
    assert_eq!(first, second);
}
