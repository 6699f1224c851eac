//! Graphviz output of a linked automaton.

use std::io::{self, Write};

use crate::trie::Trie;
use crate::ROOT_STATE_ID;

struct DotWriter<W> {
    wtr: W,
}

impl<W> DotWriter<W>
where
    W: Write,
{
    fn begin_digraph(&mut self) -> io::Result<()> {
        writeln!(self.wtr, "digraph {{")?;
        writeln!(self.wtr, "rankdir = \"LR\";")?;
        writeln!(self.wtr)?;
        writeln!(self.wtr, "graph [outputorder=nodesfirst];")?;
        writeln!(self.wtr)
    }

    fn begin_subgraph(&mut self, rank: usize) -> io::Result<()> {
        writeln!(self.wtr, "subgraph rank_{rank} {{")?;
        writeln!(self.wtr, "rank = same;")
    }

    fn end_block(&mut self) -> io::Result<()> {
        write!(self.wtr, "\n}}\n\n")
    }

    fn declare_node(&mut self, node_id: usize, path: &[u8], accepting: bool) -> io::Result<()> {
        let shape = if accepting { "doublecircle" } else { "oval" };
        writeln!(
            self.wtr,
            "{node_id} [label = \"{}\", shape={shape}];",
            path.escape_ascii()
        )
    }

    fn bind_nodes(
        &mut self,
        parent: usize,
        child: usize,
        label: &[u8],
        color: &str,
        constraint: bool,
    ) -> io::Result<()> {
        write!(
            self.wtr,
            "{parent} -> {child} [label = \"{}\", color = \"{color}\"",
            label.escape_ascii()
        )?;
        if !constraint {
            write!(self.wtr, ", constraint=false")?;
        }
        writeln!(self.wtr, "];")
    }
}

/// Writes `trie` as a digraph with one subgraph per depth.
pub fn write_dot<W>(trie: &Trie, wtr: W) -> io::Result<()>
where
    W: Write,
{
    let mut dot = DotWriter { wtr };
    dot.begin_digraph()?;

    let mut rank = None;
    for node_id in trie.breadth_first_order() {
        let node = trie.node(node_id);
        if rank != Some(node.depth) {
            if rank.is_some() {
                dot.end_block()?;
            }
            dot.begin_subgraph(node.depth)?;
            rank = Some(node.depth);
        }
        dot.declare_node(node_id, &trie.path(node_id), node.is_accepting())?;
    }
    dot.end_block()?;

    for (node_id, node) in trie.nodes().iter().enumerate() {
        for (&c, &child_id) in &node.edges {
            dot.bind_nodes(node_id, child_id, &[c], "black", true)?;
        }
        if let Some(fail_id) = node.fail.filter(|&id| id != ROOT_STATE_ID) {
            dot.bind_nodes(node_id, fail_id, b"", "red", false)?;
        }
        if let Some(output_id) = node.output.filter(|&id| id != ROOT_STATE_ID) {
            dot.bind_nodes(node_id, output_id, b"", "blue", false)?;
        }
    }

    dot.end_block()
}
