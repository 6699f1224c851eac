//! Construction of the automaton: pattern insertion and link computation.

#[cfg(feature = "std")]
use std::io::{self, Write};

use alloc::vec::Vec;

use crate::errors::Result;
use crate::searcher::Searcher;
use crate::trie::Trie;
use crate::ROOT_STATE_ID;

/// Builder of an Aho-Corasick automaton.
///
/// Patterns are added with [`AutomatonBuilder::insert`]. Once all of them are in,
/// [`AutomatonBuilder::compute_links`] consumes the builder and returns a
/// [`LinkedAutomaton`], which is the only thing that can be compiled into a [`Searcher`].
/// Adding patterns after the links are computed, or computing them twice, is therefore
/// impossible.
///
/// # Examples
///
/// ```
/// use ahoscan::AutomatonBuilder;
///
/// let mut builder = AutomatonBuilder::new();
/// builder.insert("he");
/// builder.insert("she");
///
/// let searcher = builder.compute_links().compile().unwrap();
/// let result = searcher.scan("ushe");
///
/// assert_eq!(result[b"he".as_slice()], vec![2]);
/// assert_eq!(result[b"she".as_slice()], vec![1]);
/// ```
#[derive(Clone, Debug)]
pub struct AutomatonBuilder {
    trie: Trie,
    patterns: Vec<Vec<u8>>,
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomatonBuilder {
    /// Creates a new [`AutomatonBuilder`] holding only the root state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            patterns: Vec::new(),
        }
    }

    /// Adds a pattern.
    ///
    /// An empty pattern is ignored and will never match. Inserting a pattern that was already
    /// inserted leaves the automaton unchanged.
    ///
    /// # Arguments
    ///
    /// * `pattern` - Pattern to add.
    pub fn insert<P>(&mut self, pattern: P)
    where
        P: AsRef<[u8]>,
    {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            return;
        }

        let mut node_id = ROOT_STATE_ID;
        for &c in pattern {
            node_id = self.trie.child_or_insert(node_id, c);
        }

        let node = self.trie.node_mut(node_id);
        if node.pattern.is_none() {
            node.pattern = Some(self.patterns.len());
            self.patterns.push(pattern.to_vec());
        }
    }

    /// Adds all the given patterns, which is equivalent to calling
    /// [`AutomatonBuilder::insert`] for each of them.
    ///
    /// # Arguments
    ///
    /// * `patterns` - List of patterns.
    pub fn insert_all<I, P>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        for pattern in patterns {
            self.insert(pattern);
        }
    }

    /// Returns the number of distinct patterns added so far.
    #[must_use]
    pub fn num_patterns(&self) -> usize {
        self.patterns.len()
    }

    /// Returns the number of trie states, including the root.
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.trie.len()
    }

    /// Computes failure and output links for every state.
    ///
    /// States are visited in breadth-first order so that the links of every shallower state,
    /// in particular the parent's failure link, are already resolved when a state is reached.
    #[must_use]
    pub fn compute_links(self) -> LinkedAutomaton {
        let Self { mut trie, patterns } = self;

        let order = trie.breadth_first_order();
        debug_assert_eq!(order.first(), Some(&ROOT_STATE_ID));

        for &node_id in order.iter().skip(1) {
            let node = trie.node(node_id);
            let (parent_id, c) = (node.parent, node.label);

            let fail_id = if node.depth == 1 {
                ROOT_STATE_ID
            } else {
                let mut suffix_id = trie.resolved_fail(parent_id);
                loop {
                    if let Some(child_id) = trie.child(suffix_id, c) {
                        break child_id;
                    }
                    if suffix_id == ROOT_STATE_ID {
                        break ROOT_STATE_ID;
                    }
                    suffix_id = trie.resolved_fail(suffix_id);
                }
            };

            let fail = trie.node(fail_id);
            let output = if fail.is_accepting() {
                Some(fail_id)
            } else {
                fail.output
            };

            let node = trie.node_mut(node_id);
            node.fail = Some(fail_id);
            node.output = output;
        }

        // States without an accepting suffix end their output chain at the root.
        for node in trie.nodes_mut() {
            if node.output.is_none() {
                node.output = Some(ROOT_STATE_ID);
            }
        }

        debug_assert!(trie
            .nodes()
            .iter()
            .all(|node| node.fail.is_some() && node.output.is_some()));

        LinkedAutomaton { trie, patterns }
    }
}

impl<P> Extend<P> for AutomatonBuilder
where
    P: AsRef<[u8]>,
{
    fn extend<I>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = P>,
    {
        self.insert_all(patterns);
    }
}

impl<P> FromIterator<P> for AutomatonBuilder
where
    P: AsRef<[u8]>,
{
    fn from_iter<I>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
    {
        let mut builder = Self::new();
        builder.insert_all(patterns);
        builder
    }
}

/// An automaton whose failure and output links are all resolved.
///
/// Created by [`AutomatonBuilder::compute_links`].
#[derive(Clone, Debug)]
pub struct LinkedAutomaton {
    trie: Trie,
    patterns: Vec<Vec<u8>>,
}

impl LinkedAutomaton {
    /// Flattens the automaton into a [`Searcher`].
    ///
    /// # Errors
    ///
    /// [`AhoscanError`](crate::errors::AhoscanError) is returned when the automaton has more
    /// than [`MAX_NUM_STATES`](crate::MAX_NUM_STATES) states.
    pub fn compile(self) -> Result<Searcher> {
        Searcher::compile(&self.trie, self.patterns)
    }

    /// Returns the number of states, including the root.
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.trie.len()
    }

    /// Returns the number of distinct patterns.
    #[must_use]
    pub fn num_patterns(&self) -> usize {
        self.patterns.len()
    }

    /// Returns the id of the state whose path string is `path`, if there is one.
    ///
    /// The empty path is the root, whose id is always 0.
    pub fn find_state<P>(&self, path: P) -> Option<usize>
    where
        P: AsRef<[u8]>,
    {
        self.trie.find(path.as_ref())
    }

    /// Returns the state representing the longest proper suffix of `state_id`'s path that is
    /// also in the trie. The root links to itself.
    #[must_use]
    pub fn failure_link(&self, state_id: usize) -> Option<usize> {
        self.trie.nodes().get(state_id)?.fail
    }

    /// Returns the nearest accepting state on `state_id`'s failure chain, excluding the state
    /// itself, or the root when there is none.
    #[must_use]
    pub fn output_link(&self, state_id: usize) -> Option<usize> {
        self.trie.nodes().get(state_id)?.output
    }

    /// Checks if `state_id` terminates an inserted pattern.
    #[must_use]
    pub fn is_accepting(&self, state_id: usize) -> bool {
        self.trie
            .nodes()
            .get(state_id)
            .map_or(false, |node| node.is_accepting())
    }

    /// Writes the automaton as a Graphviz digraph.
    ///
    /// Accepting states are drawn with double circles. Trie edges are black, failure links
    /// red and output links blue; links to the root are omitted.
    ///
    /// # Errors
    ///
    /// [`io::Error`] is returned when writing to `wtr` fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use ahoscan::AutomatonBuilder;
    ///
    /// let automaton = AutomatonBuilder::from_iter(["ab"]).compute_links();
    ///
    /// let mut dot = vec![];
    /// automaton.dump(&mut dot).unwrap();
    ///
    /// let dot = String::from_utf8(dot).unwrap();
    /// assert!(dot.starts_with("digraph {"));
    /// assert!(dot.contains("1 -> 2 [label = \"b\", color = \"black\"];"));
    /// ```
    #[cfg(feature = "std")]
    pub fn dump<W>(&self, wtr: W) -> io::Result<()>
    where
        W: Write,
    {
        crate::dump::write_dot(&self.trie, wtr)
    }
}
