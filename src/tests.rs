use std::ops::Range;

use proptest::prelude::*;

use crate::model;

use super::*;

fn pre_order(tree: &OrderedTree<u32>) -> Vec<u32> {
    let mut out = Vec::new();
    tree.pre_order(|&e| out.push(e));
    out
}

fn post_order(tree: &OrderedTree<u32>) -> Vec<u32> {
    let mut out = Vec::new();
    tree.post_order(|&e| out.push(e));
    out
}

fn insert_find_all(keys: &[u32]) {
    let mut tree: OrderedTree<u32> = OrderedTree::natural();

    for &key in keys {
        assert_eq!(tree.insert(key), None);
        tree.assert_invariants();
    }

    for key in keys {
        let node = tree.find_node(key).expect("item not found");
        assert_eq!(tree.get(node), Some(key));
    }

    let mut sorted = keys.to_vec();
    sorted.sort_unstable();
    assert_eq!(tree.materialize(), sorted);
}

#[test]
fn zero_elems_find() {
    insert_find_all(&[]);
}

#[test]
fn single_elem_find() {
    insert_find_all(&[0]);
}

#[test]
fn two_elems_find() {
    insert_find_all(&[0, 1]);
    insert_find_all(&[1, 0]);
}

#[test]
fn three_elems_find() {
    insert_find_all(&[0, 1, 2]);
    insert_find_all(&[0, 2, 1]);
    insert_find_all(&[1, 0, 2]);
    insert_find_all(&[1, 2, 0]);
    insert_find_all(&[2, 0, 1]);
    insert_find_all(&[2, 1, 0]);
}

// Every permutation of `keys`, in lexicographic order of positions.
fn permutations(keys: &[u32]) -> Vec<Vec<u32>> {
    if keys.len() <= 1 {
        return vec![keys.to_vec()];
    }

    let mut out = Vec::new();
    for i in 0..keys.len() {
        let mut rest = keys.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

#[test]
fn four_elems_find() {
    let perms = permutations(&[0, 1, 2, 3]);
    assert_eq!(perms.len(), 24);

    for keys in perms {
        insert_find_all(&keys);
    }
}

fn insert_remove_all(keys: &[u32]) {
    let mut tree: OrderedTree<u32> = OrderedTree::natural();

    for &key in keys {
        tree.insert(key);
        tree.assert_invariants();
    }

    for key in keys {
        assert_eq!(tree.remove(key), Some(*key));
        tree.assert_invariants();
        assert_eq!(tree.find(key), None);
    }

    for &key in keys {
        tree.insert(key);
        tree.assert_invariants();
    }

    for key in keys.iter().rev() {
        let node = tree.find_node(key).expect("item not found");
        assert_eq!(tree.remove_node(node), Ok(*key));
        tree.assert_invariants();
    }

    assert!(tree.is_empty());
}

#[test]
fn remove_one() {
    insert_remove_all(&[0]);
}

#[test]
fn remove_two() {
    insert_remove_all(&[0, 1]);
    insert_remove_all(&[1, 0]);
}

#[test]
fn remove_three() {
    for keys in permutations(&[0, 1, 2]) {
        insert_remove_all(&keys);
    }
}

#[test]
fn remove_four() {
    for keys in permutations(&[0, 1, 2, 3]) {
        insert_remove_all(&keys);
    }
}

#[test]
fn remove_five() {
    for keys in permutations(&[0, 1, 2, 3, 4]) {
        insert_remove_all(&keys);
    }
}

fn five_node_tree() -> OrderedTree<u32> {
    let tree: OrderedTree<u32> = [50, 25, 75, 10, 30].into_iter().collect();
    tree.assert_invariants();
    assert_eq!(pre_order(&tree), [50, 25, 10, 30, 75]);
    tree
}

#[test]
fn remove_node_with_two_children() {
    let mut tree = five_node_tree();

    assert_eq!(tree.remove(&25), Some(25));
    tree.assert_invariants();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.find(&25), None);

    // 30 took the place of 25.
    assert_eq!(pre_order(&tree), [50, 30, 10, 75]);
}

#[test]
fn remove_leaf() {
    let mut tree = five_node_tree();

    assert_eq!(tree.remove(&10), Some(10));
    tree.assert_invariants();
    assert_eq!(tree.len(), 4);
    assert_eq!(pre_order(&tree), [50, 25, 30, 75]);
}

#[test]
fn remove_node_with_one_child_promotes_it() {
    let mut tree = five_node_tree();
    assert_eq!(tree.insert(60), None);

    assert_eq!(tree.remove(&75), Some(75));
    tree.assert_invariants();
    assert_eq!(tree.len(), 5);

    let node_60 = tree.find_node(&60).expect("60 is present");
    let root = tree.find_node(&50).expect("50 is present");
    assert_eq!(tree.nodes[node_60].parent, Some(root));
    assert_eq!(tree.nodes[root].right(), Some(node_60));
    assert_eq!(pre_order(&tree), [50, 25, 10, 30, 60]);
}

#[test]
fn remove_root_with_one_child() {
    let mut tree: OrderedTree<u32> = [1, 2, 3].into_iter().collect();

    assert_eq!(tree.remove(&1), Some(1));
    tree.assert_invariants();

    let root = tree.root.expect("tree is not empty");
    assert_eq!(tree.get(root), Some(&2));
    assert_eq!(tree.nodes[root].parent, None);
}

#[test]
fn remove_missing_is_a_no_op() {
    let mut tree = five_node_tree();
    let before = pre_order(&tree);

    assert_eq!(tree.remove(&42), None);
    tree.assert_invariants();
    assert_eq!(tree.len(), 5);
    assert_eq!(pre_order(&tree), before);
}

#[test]
fn removal_repurposes_two_child_node() {
    let mut tree = five_node_tree();
    let node_25 = tree.find_node(&25).expect("25 is present");
    let node_30 = tree.find_node(&30).expect("30 is present");

    tree.remove(&25);

    // The handle for 25 now names 30, and 30's old node is gone.
    assert_eq!(tree.get(node_25), Some(&30));
    assert_eq!(tree.get(node_30), None);
    assert_eq!(tree.remove_node(node_30), Err(Error::NotFound));
}

#[test]
fn stale_handle_is_not_found() {
    let mut tree = five_node_tree();
    let node_10 = tree.find_node(&10).expect("10 is present");

    assert_eq!(tree.remove_node(node_10), Ok(10));
    assert_eq!(tree.remove_node(node_10), Err(Error::NotFound));
    assert_eq!(tree.successor(node_10), None);
    assert_eq!(tree.predecessor(node_10), None);

    // The freed slot is reused without reviving the old handle.
    tree.insert(11);
    let node_11 = tree.find_node(&11).expect("11 is present");
    assert_ne!(node_10, node_11);
    assert_eq!(tree.get(node_10), None);
    tree.assert_invariants();
}

#[test]
fn foreign_handle_is_not_found() {
    let mut a: OrderedTree<u32> = [50, 25, 75].into_iter().collect();
    let b: OrderedTree<u32> = [1, 2].into_iter().collect();
    let foreign = b.find_node(&1).expect("1 is present");

    assert_eq!(a.get(foreign), None);
    assert_eq!(a.successor(foreign), None);
    assert_eq!(a.predecessor(foreign), None);
    assert!(a.cursor_at(foreign).is_none());
    assert_eq!(a.remove_node(foreign), Err(Error::NotFound));

    a.assert_invariants();
    assert_eq!(a.materialize(), [25, 50, 75]);
    assert_eq!(b.get(foreign), Some(&1));
}

#[test]
fn clone_accepts_handles_of_its_original() {
    let tree = five_node_tree();
    let node_25 = tree.find_node(&25).expect("25 is present");

    let mut copy = tree.clone();
    assert_eq!(copy.remove_node(node_25), Ok(25));
    copy.assert_invariants();

    assert_eq!(tree.get(node_25), Some(&25));
    assert_eq!(copy.get(node_25), Some(&30));
}

#[test]
fn round_trip() {
    let keys = [17, 3, 99, 42, 8, 64, 23, 1, 77, 50];
    let tree: OrderedTree<u32> = keys.into_iter().collect();

    let mut sorted = keys.to_vec();
    sorted.sort_unstable();
    assert_eq!(tree.len(), keys.len());
    assert_eq!(tree.materialize(), sorted);
}

#[test]
fn materialize_is_a_snapshot() {
    let mut tree = five_node_tree();
    let snapshot = tree.materialize();

    tree.remove(&50);
    tree.insert(5);

    assert_eq!(snapshot, [10, 25, 30, 50, 75]);
    assert_eq!(tree.materialize(), [5, 10, 25, 30, 75]);
}

#[test]
fn duplicate_insert_is_idempotent() {
    let mut tree = five_node_tree();
    let shape = pre_order(&tree);
    let height = tree.height();

    assert_eq!(tree.insert(30), Some(30));
    tree.assert_invariants();
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.height(), height);
    assert_eq!(pre_order(&tree), shape);
}

#[test]
fn successor_and_predecessor_boundaries() {
    let tree = five_node_tree();

    let max = tree.last_node().expect("tree is not empty");
    let min = tree.first_node().expect("tree is not empty");
    assert_eq!(tree.get(max), Some(&75));
    assert_eq!(tree.get(min), Some(&10));

    assert_eq!(tree.successor(max), None);
    assert_eq!(tree.predecessor(min), None);

    let mut ascending = Vec::new();
    let mut cur = Some(min);
    while let Some(node) = cur {
        ascending.push(*tree.get(node).expect("live node"));
        cur = tree.successor(node);
    }
    assert_eq!(ascending, [10, 25, 30, 50, 75]);

    let mut descending = Vec::new();
    let mut cur = Some(max);
    while let Some(node) = cur {
        descending.push(*tree.get(node).expect("live node"));
        cur = tree.predecessor(node);
    }
    assert_eq!(descending, [75, 50, 30, 25, 10]);
}

#[test]
fn traversal_orders() {
    let tree: OrderedTree<u32> = [100, 50, 150].into_iter().collect();

    let mut in_order = Vec::new();
    tree.in_order(|&e| in_order.push(e));

    assert_eq!(pre_order(&tree), [100, 50, 150]);
    assert_eq!(in_order, [50, 100, 150]);
    assert_eq!(post_order(&tree), [50, 150, 100]);
}

#[test]
fn into_elements_yields_post_order() {
    let tree = five_node_tree();
    let expected = post_order(&tree);

    assert_eq!(tree.into_elements(), expected);
}

#[test]
fn clear_drops_every_element() {
    use std::rc::Rc;

    let marker = Rc::new(());
    let mut tree = OrderedTree::new(|a: &(u32, Rc<()>), b: &(u32, Rc<()>)| a.0.cmp(&b.0));
    for i in 0..10 {
        tree.insert((i, Rc::clone(&marker)));
    }
    assert_eq!(Rc::strong_count(&marker), 11);

    tree.clear();
    tree.assert_invariants();
    assert!(tree.is_empty());
    assert_eq!(Rc::strong_count(&marker), 1);

    // The tree is still usable after being cleared.
    tree.insert((3, Rc::clone(&marker)));
    assert_eq!(tree.len(), 1);

    drop(tree);
    assert_eq!(Rc::strong_count(&marker), 1);
}

#[test]
fn reverse_comparator() {
    let mut tree = OrderedTree::new(natural().rev());
    tree.extend([3, 1, 4, 5, 9, 2, 6]);

    tree.assert_invariants();
    assert_eq!(tree.materialize(), [9, 6, 5, 4, 3, 2, 1]);
    assert_eq!(tree.first(), Some(&9));
    assert_eq!(tree.pop_last(), Some(1));
}

#[test]
fn height_tracks_insertion_order() {
    let balanced: OrderedTree<u32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
    assert_eq!(balanced.height(), 3);

    let degenerate: OrderedTree<u32> = (1..=7).collect();
    assert_eq!(degenerate.height(), 7);

    let empty: OrderedTree<u32> = OrderedTree::natural();
    assert_eq!(empty.height(), 0);
}

#[test]
fn debug_lists_elements_in_order() {
    let tree = five_node_tree();
    assert_eq!(format!("{tree:?}"), "{10, 25, 30, 50, 75}");
}

#[test]
fn cursor_walk_through_every_removal_case() {
    use model::CursorOp::*;

    model::run_cursor_equivalence(model::CursorInput {
        values: vec![50, 25, 75, 10, 30],
        ops: vec![
            Next,
            Remove,
            Remove,
            Prev,
            RemoveAndMovePrev,
            PeekNext,
            Next,
            Next,
            Remove,
            PeekPrev,
        ],
    });
}

#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..1000;

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        max_shrink_iters: 65536,
        .. ProptestConfig::default()
    })]

    #[test]
    fn btree_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_btree_equivalence(ops);
    }

    #[test]
    fn cursor_equivalence(
        values in proptest::collection::vec(0u32..1000, 0..100),
        ops in proptest::collection::vec(model::cursor_op_strategy(), FUZZ_RANGE),
    ) {
        model::run_cursor_equivalence(model::CursorInput { values, ops });
    }

    #[test]
    fn set_algebra_equivalence(
        a in proptest::collection::vec(0u16..200, 0..100),
        b in proptest::collection::vec(0u16..200, 0..100),
    ) {
        model::run_set_algebra_equivalence(model::SetAlgebraInput { a, b });
    }
}
