use ordtree::{BoundedSet, OrderedTree};

fn show(tree: &OrderedTree<u32>) {
    let mut pre = Vec::new();
    let mut post = Vec::new();
    tree.pre_order(|&e| pre.push(e));
    tree.post_order(|&e| post.push(e));

    println!(
        "in: {:?} pre: {pre:?} post: {post:?} height: {}",
        tree.materialize(),
        tree.height()
    );
}

fn main() {
    let mut tree: OrderedTree<u32> = OrderedTree::natural();

    for value in [50, 25, 75, 10, 30, 60] {
        tree.insert(value);
        tree.assert_invariants();
        show(&tree);
    }

    // Two children, then a leaf, then one child.
    for value in [25, 10, 75] {
        let removed = tree.remove(&value);
        assert_eq!(removed, Some(value));
        tree.assert_invariants();
        show(&tree);
    }

    let mut graph = String::new();
    if tree.dotgraph("demo", &mut graph).is_ok() {
        println!("{graph}");
    }

    let evens: BoundedSet<u32> = (0..20).step_by(2).collect();
    let threes: BoundedSet<u32> = (0..20).step_by(3).collect();
    println!("union: {:?}", evens.union(&threes));
    println!("intersection: {:?}", evens.intersection(&threes));

    println!("teardown: {:?}", tree.into_elements());
}
