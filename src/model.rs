//! Model-based equivalence checks against `std::collections::BTreeSet`.
//!
//! Shared by the unit tests (through `proptest`) and the fuzz targets (through `arbitrary`).

use std::{
    collections::BTreeSet,
    ops::Bound::{Excluded, Unbounded},
};

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::{BoundedSet, OrderedTree};

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Find(ItemValue),
    Remove(ItemValue),
    Successor(ItemValue),
    Predecessor(ItemValue),
    First,
    PopFirst,
    Last,
    PopLast,
}

impl Op {
    fn finalize(self, sorted: &[u32]) -> FinalOp {
        fn get_value(v: &[u32], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len()]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Find(item) => FinalOp::Find(get_value(sorted, item)),
            Op::Remove(item) => FinalOp::Remove(get_value(sorted, item)),
            Op::Successor(item) => FinalOp::Successor(get_value(sorted, item)),
            Op::Predecessor(item) => FinalOp::Predecessor(get_value(sorted, item)),
            Op::First => FinalOp::First,
            Op::PopFirst => FinalOp::PopFirst,
            Op::Last => FinalOp::Last,
            Op::PopLast => FinalOp::PopLast,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Find(u32),
    Remove(u32),
    Successor(u32),
    Predecessor(u32),
    First,
    PopFirst,
    Last,
    PopLast,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        value_strategy().prop_map(Op::Insert),
        value_strategy().prop_map(Op::Find),
        value_strategy().prop_map(Op::Remove),
        value_strategy().prop_map(Op::Successor),
        value_strategy().prop_map(Op::Predecessor),
        Just(Op::First),
        Just(Op::PopFirst),
        Just(Op::Last),
        Just(Op::PopLast),
    ]
}

/// Applies `ops` to an `OrderedTree` and a `BTreeSet`, asserting that they agree after each one
/// and that the tree's invariants hold throughout.
pub fn run_btree_equivalence(ops: Vec<Op>) {
    let mut sorted_values = Vec::with_capacity(ops.len());
    let mut btree = BTreeSet::new();
    let mut tree: OrderedTree<u32> = OrderedTree::natural();

    fn insert_sorted(v: &mut Vec<u32>, value: u32) {
        if let Err(idx) = v.binary_search(&value) {
            v.insert(idx, value);
        }
    }

    fn remove_sorted(v: &mut Vec<u32>, value: u32) {
        if let Ok(idx) = v.binary_search(&value) {
            v.remove(idx);
        }
    }

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_values);

        match final_op {
            FinalOp::Insert(value) => {
                insert_sorted(&mut sorted_values, value);

                let from_btree = if btree.insert(value) {
                    None
                } else {
                    Some(value)
                };
                let from_tree = tree.insert(value);

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::Find(value) => {
                let from_btree = btree.get(&value);
                let from_tree = tree.find(&value);

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::Remove(value) => {
                remove_sorted(&mut sorted_values, value);

                let from_btree = btree.remove(&value).then_some(value);
                let from_tree = tree.remove(&value);

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::Successor(value) => {
                let from_btree = btree
                    .contains(&value)
                    .then(|| btree.range(value + 1..).next())
                    .flatten();
                let from_tree = tree
                    .find_node(&value)
                    .and_then(|node| tree.successor(node))
                    .and_then(|node| tree.get(node));

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::Predecessor(value) => {
                let from_btree = btree
                    .contains(&value)
                    .then(|| btree.range(..value).next_back())
                    .flatten();
                let from_tree = tree
                    .find_node(&value)
                    .and_then(|node| tree.predecessor(node))
                    .and_then(|node| tree.get(node));

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::First => {
                let from_btree = btree.first();
                let from_tree = tree.first();

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::PopFirst => {
                let from_btree = btree.pop_first();
                if let Some(value) = from_btree {
                    remove_sorted(&mut sorted_values, value);
                }
                let from_tree = tree.pop_first();

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::Last => {
                let from_btree = btree.last();
                let from_tree = tree.last();

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {op:?}");
            }

            FinalOp::PopLast => {
                let from_btree = btree.pop_last();
                if let Some(value) = from_btree {
                    remove_sorted(&mut sorted_values, value);
                }
                let from_tree = tree.pop_last();

                assert_eq!(from_btree, from_tree, "FinalOp #{op_id}: {op:?}");
            }
        }

        tree.assert_invariants();
        assert_eq!(btree.len(), tree.len());
        assert!(btree.iter().eq(tree.iter()));
    }

    let mut post_order = Vec::with_capacity(tree.len());
    tree.post_order(|&value| post_order.push(value));
    assert_eq!(tree.into_elements(), post_order);
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum CursorOp {
    Next,
    Prev,
    PeekNext,
    PeekPrev,
    Remove,
    RemoveAndMovePrev,
}

impl CursorOp {
    const ALL: [CursorOp; 6] = [
        CursorOp::Next,
        CursorOp::Prev,
        CursorOp::PeekNext,
        CursorOp::PeekPrev,
        CursorOp::Remove,
        CursorOp::RemoveAndMovePrev,
    ];
}

pub fn cursor_op_strategy() -> impl Strategy<Value = CursorOp> {
    proptest::sample::select(CursorOp::ALL.to_vec())
}

#[derive(Clone, Debug, Arbitrary)]
pub struct CursorInput {
    pub values: Vec<u32>,
    pub ops: Vec<CursorOp>,
}

// The element after `at` in `model`, where `None` is the ghost position.
fn after(model: &BTreeSet<u32>, at: Option<u32>) -> Option<u32> {
    match at {
        Some(v) => model.range((Excluded(v), Unbounded)).next().copied(),
        None => model.first().copied(),
    }
}

fn before(model: &BTreeSet<u32>, at: Option<u32>) -> Option<u32> {
    match at {
        Some(v) => model.range(..v).next_back().copied(),
        None => model.last().copied(),
    }
}

/// Walks a `CursorMut` over a tree and a position over a `BTreeSet` in lockstep, checking that
/// both point at the same element after every operation.
///
/// Removing a node with two children must leave the cursor on that node, now holding the next
/// element. Any other removal must free the node the cursor was on.
pub fn run_cursor_equivalence(input: CursorInput) {
    let mut model: BTreeSet<u32> = input.values.iter().copied().collect();
    let mut tree: OrderedTree<u32> = input.values.into_iter().collect();

    let mut at = model.first().copied();
    let mut curs = tree.cursor_first_mut();

    for (op_id, op) in input.ops.into_iter().enumerate() {
        match op {
            CursorOp::Next => {
                at = after(&model, at);
                curs.move_next();
            }

            CursorOp::Prev => {
                at = before(&model, at);
                curs.move_prev();
            }

            CursorOp::PeekNext => {
                let peeked = curs.peek_next().copied();
                assert_eq!(peeked, after(&model, at), "CursorOp #{op_id}: {op:?}");
            }

            CursorOp::PeekPrev => {
                let peeked = curs.peek_prev().copied();
                assert_eq!(peeked, before(&model, at), "CursorOp #{op_id}: {op:?}");
            }

            CursorOp::Remove => {
                let node = curs.node();
                let two_children = node.map_or(false, |id| {
                    let node = &curs.tree().nodes[id];
                    node.left().is_some() && node.right().is_some()
                });

                let removed = curs.remove_current();
                assert_eq!(removed, at, "CursorOp #{op_id}: {op:?}");

                if let Some(v) = at {
                    at = after(&model, at);
                    model.remove(&v);
                }

                match node {
                    Some(_) if two_children => {
                        assert_eq!(curs.node(), node, "CursorOp #{op_id}: cursor left its node");
                    }
                    Some(id) => {
                        assert_eq!(curs.tree().get(id), None, "CursorOp #{op_id}: node not freed");
                    }
                    None => assert_eq!(curs.node(), None),
                }
            }

            CursorOp::RemoveAndMovePrev => {
                let removed = curs.remove_current_and_move_prev();
                assert_eq!(removed, at, "CursorOp #{op_id}: {op:?}");

                if let Some(v) = at {
                    at = before(&model, at);
                    model.remove(&v);
                }
            }
        }

        assert_eq!(curs.get().copied(), at, "CursorOp #{op_id}: {op:?}");
    }

    drop(curs);
    tree.assert_invariants();
    assert!(model.iter().eq(tree.iter()));
}

#[derive(Clone, Debug, Arbitrary)]
pub struct SetAlgebraInput {
    pub a: Vec<u16>,
    pub b: Vec<u16>,
}

/// Checks `BoundedSet`'s union and intersection against `BTreeSet`.
pub fn run_set_algebra_equivalence(input: SetAlgebraInput) {
    let model_a: BTreeSet<u16> = input.a.iter().copied().collect();
    let model_b: BTreeSet<u16> = input.b.iter().copied().collect();

    let a: BoundedSet<u16> = input.a.into_iter().collect();
    let b: BoundedSet<u16> = input.b.into_iter().collect();

    assert_eq!(a.len(), model_a.len());
    assert_eq!(b.len(), model_b.len());

    let union = a.union(&b);
    assert!(union.iter().eq(model_a.union(&model_b)));
    assert_eq!(union.len(), model_a.union(&model_b).count());

    let intersection = a.intersection(&b);
    assert!(intersection.iter().eq(model_a.intersection(&model_b)));
    assert_eq!(intersection.len(), model_a.intersection(&model_b).count());
}
