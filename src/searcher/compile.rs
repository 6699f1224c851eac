use alloc::vec;
use alloc::vec::Vec;

use crate::alphabet::ByteMapper;
use crate::errors::{AhoscanError, Result};
use crate::searcher::{Searcher, State, ROOT_STATE_IDX};
use crate::trie::Trie;
use crate::MAX_NUM_STATES;

#[inline(always)]
fn to_state_idx(node_id: usize) -> Result<u16> {
    u16::try_from(node_id).map_err(|_| AhoscanError::automaton_scale("num_states", MAX_NUM_STATES))
}

impl Searcher {
    /// Flattens a linked trie.
    ///
    /// Every state gets a row of `alphabet_size` transitions defaulting to the root, then the
    /// trie edges are written over the defaults.
    pub(crate) fn compile(trie: &Trie, patterns: Vec<Vec<u8>>) -> Result<Self> {
        // Edge labels visited in id order give the same first-seen order as scanning the
        // path strings, since every prefix of a path has a smaller id.
        let mapper = ByteMapper::new(trie.nodes().iter().skip(1).map(|node| node.label));

        if trie.len() > MAX_NUM_STATES {
            return Err(AhoscanError::automaton_scale("num_states", MAX_NUM_STATES));
        }

        let alphabet_size = usize::from(mapper.alphabet_size());
        let mut states = Vec::with_capacity(trie.len());
        let mut children = vec![ROOT_STATE_IDX; trie.len() * alphabet_size];

        for (node_id, node) in trie.nodes().iter().enumerate() {
            let row = node_id * alphabet_size;
            for (&c, &child_id) in &node.edges {
                debug_assert_ne!(child_id, 0);
                let code = usize::from(mapper.code(c));
                debug_assert!(code < alphabet_size);
                children[row + code] = to_state_idx(child_id)?;
            }

            let pattern = match node.pattern {
                Some(pattern) => Some(to_state_idx(pattern)?),
                None => None,
            };
            states.push(State {
                fail: to_state_idx(trie.resolved_fail(node_id))?,
                output: to_state_idx(trie.resolved_output(node_id))?,
                pattern,
            });
        }

        Ok(Self {
            states,
            children,
            mapper,
            patterns,
        })
    }
}
