//! Arena-backed pattern trie used while the automaton is being built.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use crate::ROOT_STATE_ID;

/// Mapping edge labels to child ids using `BTreeMap`.
type EdgeMap = BTreeMap<u8, usize>;

/// Node of [`Trie`].
///
/// The path string of a node is not stored; it is recovered from `parent` and `label` when
/// needed.
#[derive(Clone, Debug)]
pub struct TrieNode {
    pub(crate) edges: EdgeMap,
    pub(crate) parent: usize,
    pub(crate) label: u8,
    pub(crate) depth: usize,
    pub(crate) fail: Option<usize>,
    pub(crate) output: Option<usize>,
    pub(crate) pattern: Option<usize>,
}

impl TrieNode {
    fn new(parent: usize, label: u8, depth: usize) -> Self {
        Self {
            edges: EdgeMap::new(),
            parent,
            label,
            depth,
            fail: None,
            output: None,
            pattern: None,
        }
    }

    #[inline(always)]
    pub const fn is_accepting(&self) -> bool {
        self.pattern.is_some()
    }
}

/// Rooted trie whose node ids are indices into a flat arena.
///
/// Ids are assigned sequentially on creation and id 0 is the root.
#[derive(Clone, Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Trie {
    pub fn new() -> Self {
        let mut root = TrieNode::new(ROOT_STATE_ID, 0, 0);
        // The root is its own failure link.
        root.fail = Some(ROOT_STATE_ID);
        Self { nodes: vec![root] }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn nodes(&self) -> &[TrieNode] {
        &self.nodes
    }

    #[inline(always)]
    pub fn nodes_mut(&mut self) -> &mut [TrieNode] {
        &mut self.nodes
    }

    #[inline(always)]
    pub fn node(&self, node_id: usize) -> &TrieNode {
        &self.nodes[node_id]
    }

    #[inline(always)]
    pub fn node_mut(&mut self, node_id: usize) -> &mut TrieNode {
        &mut self.nodes[node_id]
    }

    #[inline(always)]
    pub fn child(&self, node_id: usize, c: u8) -> Option<usize> {
        self.nodes[node_id].edges.get(&c).copied()
    }

    /// Returns the child of `node_id` labeled with `c`, creating it if it does not exist.
    pub fn child_or_insert(&mut self, node_id: usize, c: u8) -> usize {
        if let Some(child_id) = self.child(node_id, c) {
            return child_id;
        }
        let child_id = self.nodes.len();
        let depth = self.nodes[node_id].depth + 1;
        self.nodes.push(TrieNode::new(node_id, c, depth));
        self.nodes[node_id].edges.insert(c, child_id);
        child_id
    }

    /// Finds the node whose path string is `path`.
    pub fn find(&self, path: &[u8]) -> Option<usize> {
        let mut node_id = ROOT_STATE_ID;
        for &c in path {
            node_id = self.child(node_id, c)?;
        }
        Some(node_id)
    }

    /// Concatenates the edge labels from the root to `node_id`.
    pub fn path(&self, mut node_id: usize) -> Vec<u8> {
        let mut path = Vec::with_capacity(self.nodes[node_id].depth);
        while node_id != ROOT_STATE_ID {
            let node = &self.nodes[node_id];
            path.push(node.label);
            node_id = node.parent;
        }
        path.reverse();
        path
    }

    /// Returns all node ids in breadth-first order starting from the root.
    ///
    /// Nodes of the same depth are ordered by their parents' positions and then by label.
    pub fn breadth_first_order(&self) -> Vec<usize> {
        let mut q = Vec::with_capacity(self.nodes.len());
        q.push(ROOT_STATE_ID);
        let mut qi = 0;
        while qi < q.len() {
            let node_id = q[qi];
            qi += 1;
            q.extend(self.nodes[node_id].edges.values().copied());
        }
        q
    }

    /// Failure link of a node that the breadth-first pass has already visited.
    #[inline(always)]
    pub fn resolved_fail(&self, node_id: usize) -> usize {
        let fail = self.nodes[node_id].fail;
        debug_assert!(fail.is_some(), "failure link of state {node_id} is unresolved");
        fail.unwrap_or(ROOT_STATE_ID)
    }

    /// Output link of a node after the links have been normalized.
    #[inline(always)]
    pub fn resolved_output(&self, node_id: usize) -> usize {
        let output = self.nodes[node_id].output;
        debug_assert!(output.is_some(), "output link of state {node_id} is unresolved");
        output.unwrap_or(ROOT_STATE_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(patterns: &[&str]) -> Trie {
        let mut trie = Trie::new();
        for pattern in patterns {
            let mut node_id = ROOT_STATE_ID;
            for &c in pattern.as_bytes() {
                node_id = trie.child_or_insert(node_id, c);
            }
        }
        trie
    }

    #[test]
    fn test_sequential_ids() {
        /*
         *   a--> 1 --b--> 2
         *  /
         * 0 --b--> 3 --c--> 4
         */
        let trie = build(&["ab", "bc", "a"]);

        assert_eq!(5, trie.len());
        assert_eq!(Some(1), trie.child(0, b'a'));
        assert_eq!(Some(2), trie.child(1, b'b'));
        assert_eq!(Some(3), trie.child(0, b'b'));
        assert_eq!(Some(4), trie.child(3, b'c'));
        assert_eq!(None, trie.child(0, b'c'));
    }

    #[test]
    fn test_tree_shape() {
        let trie = build(&["abc", "abd", "b"]);

        // Every non-root node has exactly one incoming edge.
        let mut incoming = vec![0; trie.len()];
        for node in trie.nodes() {
            for &child_id in node.edges.values() {
                incoming[child_id] += 1;
            }
        }
        assert_eq!(0, incoming[ROOT_STATE_ID]);
        assert!(incoming[1..].iter().all(|&n| n == 1));
    }

    #[test]
    fn test_path_and_find() {
        let trie = build(&["she", "his"]);

        let node_id = trie.find(b"sh").unwrap();
        assert_eq!(b"sh".to_vec(), trie.path(node_id));
        assert_eq!(2, trie.node(node_id).depth);
        assert_eq!(Some(ROOT_STATE_ID), trie.find(b""));
        assert_eq!(None, trie.find(b"he"));
        assert!(trie.path(ROOT_STATE_ID).is_empty());
    }

    #[test]
    fn test_breadth_first_order() {
        let trie = build(&["bca", "ab", "c"]);
        let order = trie.breadth_first_order();

        assert_eq!(trie.len(), order.len());
        assert_eq!(ROOT_STATE_ID, order[0]);
        let depths: Vec<_> = order.iter().map(|&id| trie.node(id).depth).collect();
        assert!(depths.windows(2).all(|w| w[0] <= w[1]));

        let paths: Vec<_> = order.iter().map(|&id| trie.path(id)).collect();
        assert_eq!(
            vec![
                b"".to_vec(),
                b"a".to_vec(),
                b"b".to_vec(),
                b"c".to_vec(),
                b"ab".to_vec(),
                b"bc".to_vec(),
                b"bca".to_vec(),
            ],
            paths
        );
    }

    #[test]
    fn test_root_self_loop() {
        let trie = Trie::new();
        assert_eq!(ROOT_STATE_ID, trie.resolved_fail(ROOT_STATE_ID));
        assert!(!trie.node(ROOT_STATE_ID).is_accepting());
    }
}
