use std::{collections::VecDeque, fmt};

use crate::{NodeId, OrderedTree};

impl<T, C> OrderedTree<T, C>
where
    T: fmt::Display,
{
    /// Writes the shape of the tree to `w` as a Graphviz digraph.
    ///
    /// Nodes are laid out one rank per tree level. Missing children are drawn as points so that
    /// left and right children can be told apart.
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
    {
        let root = match self.root {
            Some(r) => r,
            None => return write!(w, "digraph \"graph-{name}\" {{}}"),
        };

        enum Item {
            Node(NodeId),
            Missing(u32),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(root));

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        let mut missing = 0;
        let mut links = String::new();

        while !queue.is_empty() {
            use fmt::Write;
            let remaining = queue.len();

            write!(w, "{{rank=same; ")?;

            for item in queue.drain(..remaining).collect::<Vec<_>>() {
                let node = match item {
                    Item::Node(node) => node,
                    Item::Missing(id) => {
                        write!(w, "\"graph{name}-missing{id}\" [shape=point]; ")?;
                        continue;
                    }
                };

                let id = node.index();
                let element = &self.nodes[node].element;
                write!(w, "\"graph{name}-{id}\" [label=\"{element}\"]; ")?;

                for child in [self.nodes[node].left(), self.nodes[node].right()] {
                    match child {
                        Some(child) => {
                            queue.push_back(Item::Node(child));
                            writeln!(
                                links,
                                "\"graph{name}-{id}\" -> \"graph{name}-{}\";",
                                child.index()
                            )?;
                        }
                        None => {
                            queue.push_back(Item::Missing(missing));
                            writeln!(
                                links,
                                "\"graph{name}-{id}\" -> \"graph{name}-missing{missing}\";"
                            )?;
                            missing += 1;
                        }
                    }
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&links)?;

        w.write_str(" }\n}")
    }
}
