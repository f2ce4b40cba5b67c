use std::collections::BTreeSet;

use nbs_core::rng::RngHandle;
use nbs_core::NUM_INTERMEDIATE_NODES;
use nbs_space::{ConstraintTable, SearchSpace};
use proptest::prelude::*;

#[test]
fn loose_end_samples_come_from_the_enumeration() {
    let space = SearchSpace::default();
    let all: BTreeSet<_> = space.enumerate_with_loose_ends().collect();
    let mut rng = RngHandle::from_seed(11);
    for _ in 0..200 {
        let matrix = space.sample_with_loose_ends(&mut rng).unwrap();
        assert!(all.contains(&matrix));
    }
}

#[test]
fn complete_samples_are_members_of_the_space() {
    let space = SearchSpace::default();
    let mut rng = RngHandle::from_seed(5);
    for _ in 0..20 {
        let matrix = space.sample_without_loose_ends(&mut rng).unwrap();
        assert!(space.contains(&matrix));
    }
}

#[test]
fn sampled_architecture_has_one_op_per_intermediate_node() {
    let space = SearchSpace::default();
    let mut rng = RngHandle::from_seed(3);
    let cell = space.sample_architecture(&mut rng).unwrap();
    assert_eq!(cell.ops.len(), NUM_INTERMEDIATE_NODES);
    assert!(cell.ops.iter().all(|op| op.is_intermediate()));
    assert_eq!(cell.matrix.edge_count(), 9);
}

#[test]
fn empty_spaces_sample_nothing() {
    let mut rng = RngHandle::from_seed(1);
    let impossible = SearchSpace::new(ConstraintTable::new([0, 1, 3, 0, 0, 1]).unwrap());
    assert!(impossible.sample_with_loose_ends(&mut rng).is_none());
    assert!(impossible.sample_architecture(&mut rng).is_none());

    let degenerate = SearchSpace::new(ConstraintTable::new([0; 6]).unwrap());
    assert!(degenerate.sample_without_loose_ends(&mut rng).is_none());
}

#[test]
fn sampling_reaches_many_cells() {
    let space = SearchSpace::default();
    let mut rng = RngHandle::from_seed(2024);
    let seen: BTreeSet<_> = (0..2_000)
        .filter_map(|_| space.sample_with_loose_ends(&mut rng))
        .collect();
    assert!(seen.len() > 300, "only {} distinct cells sampled", seen.len());
}

proptest! {
    #[test]
    fn sampling_is_reproducible(seed in any::<u64>()) {
        let space = SearchSpace::default();
        let mut rng_a = RngHandle::from_seed(seed);
        let mut rng_b = RngHandle::from_seed(seed);
        prop_assert_eq!(
            space.sample_architecture(&mut rng_a),
            space.sample_architecture(&mut rng_b)
        );
    }
}
