//! Iterators for [`Searcher`].

use crate::searcher::{Searcher, ROOT_STATE_IDX};
use crate::Match;

/// Iterator created by [`Searcher::find_overlapping_iter()`].
pub struct FindOverlappingIterator<'a, P> {
    searcher: &'a Searcher,
    haystack: P,
    pos: usize,
    state_id: u16,
    // Next state on the output chain to report.
    output_id: u16,
    // Whether the current state still has to be reported.
    pending: bool,
}

impl<'a, P> FindOverlappingIterator<'a, P> {
    pub(crate) const fn new(searcher: &'a Searcher, haystack: P) -> Self {
        Self {
            searcher,
            haystack,
            pos: 0,
            state_id: ROOT_STATE_IDX,
            output_id: ROOT_STATE_IDX,
            pending: false,
        }
    }
}

impl<'a, P> Iterator for FindOverlappingIterator<'a, P>
where
    P: AsRef<[u8]>,
{
    type Item = Match;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while self.output_id != ROOT_STATE_IDX {
                let output_id = self.output_id;
                let state = self.searcher.state(output_id);
                debug_assert!(state.is_accepting(), "output link to a non-accepting state");
                self.output_id = state.output;
                if let Some(m) = self.searcher.match_at(output_id, self.pos) {
                    return Some(m);
                }
            }
            if self.pending {
                self.pending = false;
                if let Some(m) = self.searcher.match_at(self.state_id, self.pos) {
                    return Some(m);
                }
            }

            let c = *self.haystack.as_ref().get(self.pos)?;
            self.pos += 1;
            self.state_id = self.searcher.next_state_id(self.state_id, c);
            let state = self.searcher.state(self.state_id);
            self.output_id = state.output;
            self.pending = state.is_accepting();
        }
    }
}
