// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infodist::VarSet;
use rstest::*;

#[rstest]
#[case(0, 1)]
#[case(1, 1)]
#[case(2, 2)]
#[case(3, 5)]
#[case(4, 15)]
#[case(5, 52)]
fn partitions_follow_bell_numbers(#[case] n: usize, #[case] bell: usize) {
    assert_eq!(VarSet::full(n).partitions().len(), bell);
}

#[test]
fn every_partition_covers_the_set_disjointly() {
    let s = VarSet::from_indices([1, 3, 4, 6]);
    for partition in s.partitions() {
        let mut seen = VarSet::empty();
        for block in partition {
            assert!(!block.is_empty());
            assert!(block.is_disjoint(&seen));
            seen = seen.union(block);
        }
        assert_eq!(seen, s);
    }
}

#[test]
fn subsets_of_a_sparse_mask() {
    let s = VarSet::from_indices([0, 5]);
    let subs: Vec<VarSet> = s.subsets().collect();
    assert_eq!(
        subs,
        vec![
            VarSet::empty(),
            VarSet::singleton(0),
            VarSet::singleton(5),
            s
        ]
    );
    assert_eq!(s.nonempty_subsets().count(), 3);
    assert_eq!(s.to_string(), "{0, 5}");
}
