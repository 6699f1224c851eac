//! Remapping of input bytes to a compact alphabet.

/// Maps each byte to a dense code in `0..alphabet_size`, or to `alphabet_size` itself for
/// bytes that never label a trie edge.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ByteMapper {
    table: [u16; 256],
    alphabet_size: u16,
}

impl ByteMapper {
    /// Assigns codes to `labels` in first-seen order.
    pub fn new<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let mut table = [u16::MAX; 256];
        let mut alphabet_size = 0;
        for c in labels {
            let code = &mut table[usize::from(c)];
            if *code == u16::MAX {
                *code = alphabet_size;
                alphabet_size += 1;
            }
        }
        for code in &mut table {
            if *code == u16::MAX {
                *code = alphabet_size;
            }
        }
        Self {
            table,
            alphabet_size,
        }
    }

    /// Returns the code of `c`, which equals [`Self::none_code`] for unused bytes.
    #[inline(always)]
    pub const fn code(&self, c: u8) -> u16 {
        self.table[c as usize]
    }

    #[inline(always)]
    pub fn get(&self, c: u8) -> Option<u16> {
        Some(self.code(c)).filter(|&code| code != self.none_code())
    }

    #[inline(always)]
    pub const fn none_code(&self) -> u16 {
        self.alphabet_size
    }

    #[inline(always)]
    pub const fn alphabet_size(&self) -> u16 {
        self.alphabet_size
    }
}
