//! # ahoscan
//!
//! Multi-pattern exact string matching with the Aho-Corasick algorithm.
//!
//! Patterns are inserted into a trie, failure and output links are computed in one
//! breadth-first pass, and the linked trie is flattened into dense transition tables over a
//! compact alphabet. The resulting [`Searcher`] reports every occurrence of every pattern,
//! overlapping ones included, in a single left-to-right pass over the haystack.
//!
//! ## Examples
//!
//! ```
//! use ahoscan::AutomatonBuilder;
//!
//! let mut builder = AutomatonBuilder::new();
//! builder.insert_all(["rac", "barak", "ab"]);
//! let searcher = builder.compute_links().compile().unwrap();
//!
//! let result = searcher.scan("abracadabra");
//!
//! assert_eq!(result[b"ab".as_slice()], vec![0, 7]);
//! assert_eq!(result[b"rac".as_slice()], vec![2]);
//! assert!(result[b"barak".as_slice()].is_empty());
//! ```
//!
//! Matches can also be visited one by one:
//!
//! ```
//! use ahoscan::Searcher;
//!
//! let searcher = Searcher::new(["he", "she", "hers"]).unwrap();
//!
//! let mut it = searcher.find_overlapping_iter("ushers");
//!
//! let m = it.next().unwrap();
//! assert_eq!((2, 4, 0), (m.start(), m.end(), m.pattern()));
//!
//! let m = it.next().unwrap();
//! assert_eq!((1, 4, 1), (m.start(), m.end(), m.pattern()));
//!
//! let m = it.next().unwrap();
//! assert_eq!((2, 6, 2), (m.start(), m.end(), m.pattern()));
//!
//! assert_eq!(None, it.next());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

extern crate alloc;

mod alphabet;
pub mod builder;
#[cfg(feature = "std")]
mod dump;
pub mod errors;
pub mod searcher;
mod trie;


pub use builder::{AutomatonBuilder, LinkedAutomaton};
pub use searcher::{ScanResult, Searcher};

// The root state id. It is never reassigned and is never the target of a trie edge.
pub(crate) const ROOT_STATE_ID: usize = 0;

/// The maximum number of states a [`Searcher`] can hold, bounded by its 16-bit state ids.
pub const MAX_NUM_STATES: usize = 1 << 16;

/// Match result.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Match {
    length: usize,
    end: usize,
    pattern: usize,
}

impl Match {
    /// Starting position of the match.
    #[inline(always)]
    #[must_use]
    pub const fn start(&self) -> usize {
        self.end - self.length
    }

    /// Ending position of the match.
    #[inline(always)]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Pattern id, assigned in first-insertion order.
    #[inline(always)]
    #[must_use]
    pub const fn pattern(&self) -> usize {
        self.pattern
    }
}
