use avl_collections::avl_tree::{AvlSet, NodeRef, Rotation};
use log::LevelFilter;
use rand::Rng;
use simplelog::{Config, TestLogger};
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 10_000;

// walks the tree through its public view and asserts every structural invariant
fn check_node(node: NodeRef<u32>, lower: Option<u32>, upper: Option<u32>) -> i32 {
    let key = *node.key();
    if let Some(lower) = lower {
        assert!(lower < key);
    }
    if let Some(upper) = upper {
        assert!(key < upper);
    }

    let mut left_height = -1;
    if let Some(left) = node.left() {
        assert_eq!(left.parent(), Some(node));
        left_height = check_node(left, lower, Some(key));
    }
    let mut right_height = -1;
    if let Some(right) = node.right() {
        assert_eq!(right.parent(), Some(node));
        right_height = check_node(right, Some(key), upper);
    }

    assert_eq!(node.height(), left_height.max(right_height) + 1);
    assert_eq!(node.balance(), left_height - right_height);
    assert!(node.balance().abs() <= 1);
    node.height()
}

fn check_invariants(set: &AvlSet<u32>) {
    match set.root() {
        Some(root) => {
            assert!(root.parent().is_none());
            assert_eq!(check_node(root, None, None), set.height());
        },
        None => {
            assert!(set.is_empty());
            assert_eq!(set.height(), -1);
        },
    }
}

fn keys(set: &AvlSet<u32>) -> Vec<u32> {
    set.iter().cloned().collect()
}

#[test]
fn int_test_scenario() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());

    let mut set = AvlSet::new();
    for key in &[8, 1, 2, 6, 5, 3, 4, 7, 10, 9] {
        assert_eq!(set.insert(*key), None);
        check_invariants(&set);
    }
    assert_eq!(keys(&set), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);

    for key in &[1, 8, 2, 5] {
        assert_eq!(set.remove(key), Some(*key));
        check_invariants(&set);
    }
    assert_eq!(keys(&set), vec![3, 4, 6, 7, 9, 10]);
    assert_eq!(set.len(), 6);
}

#[test]
fn int_test_ascending_insert_rotates_left() {
    let mut set = AvlSet::new();
    let mut rotations = Vec::new();
    for key in 1..4 {
        set.insert_with(key, |rotation| rotations.push(rotation));
    }

    assert_eq!(rotations, vec![Rotation::Left]);
    let root = set.root().unwrap();
    assert_eq!(root.key(), &2);
    assert_eq!(root.left().map(|node| *node.key()), Some(1));
    assert_eq!(root.right().map(|node| *node.key()), Some(3));
    check_invariants(&set);
}

#[test]
fn int_test_zig_zag_insert_rotates_twice() {
    let mut set = AvlSet::new();
    let mut rotations = Vec::new();
    for key in &[3, 1, 2] {
        set.insert_with(*key, |rotation| rotations.push(rotation));
    }

    assert_eq!(rotations, vec![Rotation::LeftRight]);
    let root = set.root().unwrap();
    assert_eq!(root.key(), &2);
    assert_eq!(root.left().map(|node| *node.key()), Some(1));
    assert_eq!(root.right().map(|node| *node.key()), Some(3));
    check_invariants(&set);
}

#[test]
fn int_test_duplicate_insert_keeps_shape() {
    let mut set = AvlSet::new();
    for key in &[4, 2, 6, 1, 3] {
        set.insert(*key);
    }
    let before = keys(&set);
    let root_before = set.root().map(|node| (*node.key(), node.height()));

    assert_eq!(set.insert(3), Some(3));
    assert_eq!(keys(&set), before);
    assert_eq!(set.root().map(|node| (*node.key(), node.height())), root_before);
    check_invariants(&set);
}

#[test]
fn int_test_missing_remove_keeps_shape() {
    let mut set = AvlSet::new();
    for key in &[4, 2, 6] {
        set.insert(*key);
    }

    assert_eq!(set.remove(&5), None);
    assert_eq!(keys(&set), vec![2, 4, 6]);
    assert_eq!(set.root().map(|node| *node.key()), Some(4));
    check_invariants(&set);
}

#[test]
fn int_test_iter_is_restartable() {
    let mut set = AvlSet::new();
    for key in &[5, 3, 9, 1] {
        set.insert(*key);
    }

    let mut first = set.iter();
    assert_eq!(first.next(), Some(&1));
    assert_eq!(keys(&set), vec![1, 3, 5, 9]);
    assert_eq!(first.collect::<Vec<&u32>>(), vec![&3, &5, &9]);
}

#[test]
fn int_test_avl_set() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = AvlSet::new();
    let mut expected = BTreeSet::new();

    for i in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 1000);
        if rng.gen::<bool>() {
            let inserted = expected.insert(key);
            assert_eq!(set.insert(key).is_none(), inserted);
        } else {
            let removed = expected.remove(&key);
            assert_eq!(set.remove(&key).is_some(), removed);
        }

        assert_eq!(set.len(), expected.len());
        if i % 100 == 0 {
            check_invariants(&set);
            assert_eq!(keys(&set), expected.iter().cloned().collect::<Vec<u32>>());
        }
    }

    check_invariants(&set);
    assert_eq!(set.min(), expected.iter().next());
    assert_eq!(set.max(), expected.iter().next_back());
}

#[test]
fn int_test_insert_then_remove_all() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = AvlSet::with_chunk_size(16);
    let mut expected = (0..NUM_OF_OPERATIONS as u32).collect::<Vec<u32>>();
    rng.shuffle(&mut expected);

    for key in &expected {
        assert_eq!(set.insert(*key), None);
    }
    check_invariants(&set);
    // a balanced tree of n nodes is at most about 1.44 * log2(n) high
    assert!(set.height() < 20);

    rng.shuffle(&mut expected);
    let mut expected_len = expected.len();
    for key in &expected {
        assert_eq!(set.remove(key), Some(*key));
        expected_len -= 1;
        assert_eq!(set.len(), expected_len);
    }

    assert!(set.is_empty());
    assert!(set.root().is_none());
    check_invariants(&set);
}

#[test]
fn int_test_into_iter_sorted() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = AvlSet::new();
    let mut expected = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen::<u32>();
        if set.insert(key).is_none() {
            expected.push(key);
        }
    }

    expected.sort();
    assert_eq!(set.into_iter().collect::<Vec<u32>>(), expected);
}
