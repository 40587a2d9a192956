use proptest::prelude::*;
use slotkit::IndexSet;
use std::collections::BTreeSet;
use std::ops::ControlFlow;

#[test]
fn adjacent_ranges_merge() {
    let mut s = IndexSet::new();
    s.add_range(5..10);
    s.add_range(10..15);
    assert_eq!(s.ranges().collect::<Vec<_>>(), vec![5..15]);
    assert_eq!(s.len(), 10);
    assert!(s.contains(5) && s.contains(14));
    assert!(!s.contains(15));
}

#[test]
fn remove_leaves_the_other_index() {
    let mut s = IndexSet::new();
    s.add_index(3);
    s.add_index(7);
    s.remove_index(3);
    assert_eq!(s.iter().collect::<Vec<_>>(), vec![7]);
    assert_eq!(s.first(), Some(7));
    assert_eq!(s.last(), Some(7));
}

#[test]
fn neighbor_queries_cross_ranges() {
    let s: IndexSet = [1, 2, 3, 10, 11, 20].into_iter().collect();
    assert_eq!(s.range_count(), 3);
    assert_eq!(s.index_greater_than(3), Some(10));
    assert_eq!(s.index_greater_or_equal(11), Some(11));
    assert_eq!(s.index_less_than(10), Some(3));
    assert_eq!(s.index_less_or_equal(19), Some(11));
    assert_eq!(s.index_less_than(1), None);
    assert_eq!(s.index_greater_than(20), None);
    assert_eq!(s.count_less_than(11), 4);
}

#[test]
fn enumerate_stops_early() {
    let s = IndexSet::from_range(0..100);
    let mut seen = Vec::new();
    let flow = s.enumerate(|i| {
        seen.push(i);
        if i == 4 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(flow, ControlFlow::Break(()));
    assert_eq!(seen, vec![0, 1, 2, 3, 4]);
}

#[test]
fn set_algebra_with_other_sets() {
    let mut a = IndexSet::from_range(0..10);
    let b: IndexSet = [2, 3, 4, 8].into_iter().collect();
    a.remove_indexes(&b);
    assert_eq!(a.ranges().collect::<Vec<_>>(), vec![0..2, 5..8, 9..10]);
    a.add_indexes(&b);
    assert_eq!(a, IndexSet::from_range(0..10));
}

#[derive(Clone, Debug)]
enum Op {
    AddRange(usize, usize),
    RemoveRange(usize, usize),
    AddIndex(usize),
    RemoveIndex(usize),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        (0usize..64, 0usize..12).prop_map(|(s, n)| Op::AddRange(s, n)),
        (0usize..64, 0usize..12).prop_map(|(s, n)| Op::RemoveRange(s, n)),
        (0usize..64).prop_map(Op::AddIndex),
        (0usize..64).prop_map(Op::RemoveIndex),
    ];
    proptest::collection::vec(op, 1..60)
}

proptest! {
    // After every edit the set holds exactly the model's members, its ranges
    // are sorted, non-empty and separated by at least one missing index.
    #[test]
    fn prop_matches_btreeset(ops in arb_ops()) {
        let mut sut = IndexSet::new();
        let mut model = BTreeSet::new();
        for op in ops {
            match op {
                Op::AddRange(s, n) => {
                    sut.add_range(s..s + n);
                    model.extend(s..s + n);
                }
                Op::RemoveRange(s, n) => {
                    sut.remove_range(s..s + n);
                    for i in s..s + n {
                        model.remove(&i);
                    }
                }
                Op::AddIndex(i) => {
                    sut.add_index(i);
                    model.insert(i);
                }
                Op::RemoveIndex(i) => {
                    sut.remove_index(i);
                    model.remove(&i);
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert!(sut.iter().eq(model.iter().copied()));
            let ranges: Vec<_> = sut.ranges().collect();
            prop_assert!(ranges.iter().all(|r| r.start < r.end));
            prop_assert!(ranges.windows(2).all(|w| w[0].end < w[1].start));
            for probe in 0..80 {
                prop_assert_eq!(sut.contains(probe), model.contains(&probe));
                prop_assert_eq!(sut.count_less_than(probe), model.range(..probe).count());
                prop_assert_eq!(sut.index_greater_or_equal(probe), model.range(probe..).next().copied());
                prop_assert_eq!(sut.index_less_than(probe), model.range(..probe).next_back().copied());
            }
        }
    }
}
