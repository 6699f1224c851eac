//! The compiled, immutable searcher.

mod compile;
pub mod iter;

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use crate::alphabet::ByteMapper;
use crate::builder::AutomatonBuilder;
use crate::errors::Result;
use crate::Match;
use iter::FindOverlappingIterator;

// The root state id in the flattened tables.
const ROOT_STATE_IDX: u16 = 0;

/// Result of [`Searcher::scan`]: every distinct pattern mapped to the ascending starting
/// positions of its occurrences.
pub type ScanResult = BTreeMap<Vec<u8>, Vec<usize>>;

/// State of the flattened automaton.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct State {
    pub(crate) fail: u16,
    pub(crate) output: u16,
    pub(crate) pattern: Option<u16>,
}

impl State {
    #[inline(always)]
    pub(crate) const fn is_accepting(&self) -> bool {
        self.pattern.is_some()
    }
}

/// Multiple pattern match automaton flattened into dense transition tables.
///
/// Every state owns one row of `alphabet_size()` transitions, indexed by the compact code of
/// an input byte. A zero entry means that the state has no explicit transition; since the root
/// is never the target of a trie edge, it cannot be confused with a real one.
///
/// A [`Searcher`] is immutable, so a single instance can be shared by any number of threads
/// scanning concurrently.
///
/// # Limitations
///
/// The number of states is limited to [`MAX_NUM_STATES`](crate::MAX_NUM_STATES).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Searcher {
    pub(crate) states: Vec<State>,
    pub(crate) children: Vec<u16>,
    pub(crate) mapper: ByteMapper,
    pub(crate) patterns: Vec<Vec<u8>>,
}

impl Searcher {
    /// Creates a new [`Searcher`] from input patterns. Ids are assigned to distinct non-empty
    /// patterns in their input order.
    ///
    /// # Arguments
    ///
    /// * `patterns` - List of patterns.
    ///
    /// # Errors
    ///
    /// [`AhoscanError`](crate::errors::AhoscanError) is returned when the resulting automaton
    /// has too many states.
    ///
    /// # Examples
    ///
    /// ```
    /// use ahoscan::Searcher;
    ///
    /// let searcher = Searcher::new(["bcd", "ab", "a"]).unwrap();
    ///
    /// assert_eq!(Some(0), searcher.find_pattern_id("bcd"));
    /// assert_eq!(Some(2), searcher.find_pattern_id("a"));
    /// assert_eq!(None, searcher.find_pattern_id("bc"));
    /// ```
    pub fn new<I, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        AutomatonBuilder::from_iter(patterns)
            .compute_links()
            .compile()
    }

    /// Finds all occurrences of all patterns, overlapping ones included.
    ///
    /// Every pattern is a key of the returned map, with an empty list if it does not occur.
    /// Starting positions are listed in ascending order.
    ///
    /// # Arguments
    ///
    /// * `haystack` - String to search for.
    ///
    /// # Examples
    ///
    /// ```
    /// use ahoscan::Searcher;
    ///
    /// let searcher = Searcher::new(["i", "in", "tin", "sting"]).unwrap();
    /// let result = searcher.scan("sting");
    ///
    /// assert_eq!(result[b"i".as_slice()], vec![2]);
    /// assert_eq!(result[b"in".as_slice()], vec![2]);
    /// assert_eq!(result[b"tin".as_slice()], vec![1]);
    /// assert_eq!(result[b"sting".as_slice()], vec![0]);
    /// ```
    #[must_use]
    pub fn scan<P>(&self, haystack: P) -> ScanResult
    where
        P: AsRef<[u8]>,
    {
        let mut occurrences = vec![vec![]; self.patterns.len()];
        for m in self.find_overlapping_iter(haystack) {
            occurrences[m.pattern()].push(m.start());
        }
        self.patterns.iter().cloned().zip(occurrences).collect()
    }

    /// Returns an iterator of overlapping matches in the given haystack.
    ///
    /// Matches are reported in order of their ending positions. Among matches ending at the
    /// same position, those found along the output links, longest first, come before the one of
    /// the current state.
    ///
    /// # Arguments
    ///
    /// * `haystack` - String to search for.
    ///
    /// # Examples
    ///
    /// ```
    /// use ahoscan::Searcher;
    ///
    /// let searcher = Searcher::new(["bcd", "ab", "a"]).unwrap();
    ///
    /// let mut it = searcher.find_overlapping_iter("abcd");
    ///
    /// let m = it.next().unwrap();
    /// assert_eq!((0, 1, 2), (m.start(), m.end(), m.pattern()));
    ///
    /// let m = it.next().unwrap();
    /// assert_eq!((0, 2, 1), (m.start(), m.end(), m.pattern()));
    ///
    /// let m = it.next().unwrap();
    /// assert_eq!((1, 4, 0), (m.start(), m.end(), m.pattern()));
    ///
    /// assert_eq!(None, it.next());
    /// ```
    pub fn find_overlapping_iter<P>(&self, haystack: P) -> FindOverlappingIterator<'_, P>
    where
        P: AsRef<[u8]>,
    {
        FindOverlappingIterator::new(self, haystack)
    }

    /// Returns the id of the given pattern if it exists.
    ///
    /// # Arguments
    ///
    /// * `pattern` - Pattern to search for.
    pub fn find_pattern_id<P>(&self, pattern: P) -> Option<usize>
    where
        P: AsRef<[u8]>,
    {
        let mut state_id = ROOT_STATE_IDX;
        for &c in pattern.as_ref() {
            let code = self.mapper.get(c)?;
            state_id = self.child_index(state_id, code);
            if state_id == ROOT_STATE_IDX {
                return None;
            }
        }
        self.states[usize::from(state_id)].pattern.map(usize::from)
    }

    /// Returns the pattern associated with `pattern_id`.
    #[must_use]
    pub fn pattern(&self, pattern_id: usize) -> Option<&[u8]> {
        self.patterns.get(pattern_id).map(Vec::as_slice)
    }

    /// Returns the number of distinct patterns.
    #[must_use]
    pub fn num_patterns(&self) -> usize {
        self.patterns.len()
    }

    /// Returns the number of states, including the root.
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of distinct bytes occurring in the patterns.
    #[must_use]
    pub fn alphabet_size(&self) -> usize {
        usize::from(self.mapper.alphabet_size())
    }

    /// Returns the total amount of heap used by this automaton in bytes.
    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        self.states.len() * core::mem::size_of::<State>()
            + self.children.len() * core::mem::size_of::<u16>()
            + self.patterns.len() * core::mem::size_of::<Vec<u8>>()
            + self.patterns.iter().map(Vec::len).sum::<usize>()
    }

    /// Returns the explicit transition of `state_id` for `code`, or the root when there is
    /// none.
    #[inline(always)]
    pub(crate) fn child_index(&self, state_id: u16, code: u16) -> u16 {
        let alphabet_size = usize::from(self.mapper.alphabet_size());
        self.children[usize::from(state_id) * alphabet_size + usize::from(code)]
    }

    /// Goto function with fallback along failure links.
    #[inline(always)]
    fn next_state_id(&self, mut state_id: u16, c: u8) -> u16 {
        let Some(code) = self.mapper.get(c) else {
            // No pattern continues through a byte that labels no edge.
            return ROOT_STATE_IDX;
        };
        loop {
            let child_id = self.child_index(state_id, code);
            if child_id != ROOT_STATE_IDX || state_id == ROOT_STATE_IDX {
                return child_id;
            }
            state_id = self.states[usize::from(state_id)].fail;
        }
    }

    #[inline(always)]
    fn state(&self, state_id: u16) -> &State {
        &self.states[usize::from(state_id)]
    }

    /// Creates the match of the pattern accepted by `state_id`, ending at `end`.
    #[inline(always)]
    fn match_at(&self, state_id: u16, end: usize) -> Option<Match> {
        let pattern = usize::from(self.state(state_id).pattern?);
        Some(Match {
            length: self.patterns[pattern].len(),
            end,
            pattern,
        })
    }
}
