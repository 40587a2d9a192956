use slotkit::{FixedArray, SortedSet, SparseArray};

#[test]
fn fixed_and_sparse_arrays_agree() {
    let mut fixed = FixedArray::with_capacity(64);
    let mut sparse = SparseArray::with_capacity(64);
    for i in (0..64).step_by(7).chain([3, 40, 41]) {
        assert_eq!(fixed.set(i, Some(i)), sparse.set(i, Some(i)));
    }
    for i in [7, 40, 50] {
        assert_eq!(fixed.take(i), sparse.take(i));
    }
    assert_eq!(fixed.len(), sparse.len());
    assert_eq!(fixed.occupied_indexes(), sparse.occupied_indexes());
    assert!(fixed.iter().eq(sparse.iter()));
    for i in 0..64 {
        assert_eq!(fixed.get(i), sparse.get(i));
    }
}

#[test]
fn sorted_set_by_key_field() {
    #[derive(Debug, PartialEq)]
    struct Job {
        priority: u8,
        name: &'static str,
    }
    let mut q: SortedSet<Job, _> =
        SortedSet::with_comparator(|a: &Job, b: &Job| a.priority.cmp(&b.priority));
    q.insert(Job { priority: 3, name: "c" });
    q.insert(Job { priority: 1, name: "a" });
    assert!(!q.insert(Job { priority: 3, name: "dup" }));
    q.insert(Job { priority: 2, name: "b" });
    let names: Vec<_> = q.iter().map(|j| j.name).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(q.remove_at(0).name, "a");
    assert_eq!(q.first().map(|j| j.priority), Some(2));
}
