//! Component A: a sliding 32-bit-wide window over a little-endian word
//! array.
//!
//! `BitReader` only supplies fresh words and tracks how many remain; the
//! working window (the partially-consumed current word and its bit count)
//! is owned by whoever is driving it — `HeaderDecoder` for the Golomb/delta
//! header, `HuffmanDecoder` for the symbol stream — matching spec.md §4.A.

use crate::errors::DecodeError;
use crate::hash::IntegrityHasher;

pub struct BitReader<'a> {
    words: &'a [u8],
    /// Index, in 4-byte words, of the next word to load.
    next_word: usize,
    hasher: IntegrityHasher,
}

impl<'a> BitReader<'a> {
    /// `words` must have a length that is a multiple of 4; any trailing
    /// partial word is simply never reachable via `load`.
    pub fn new(words: &'a [u8], hash_seed: u32) -> Self {
        Self {
            words,
            next_word: 0,
            hasher: IntegrityHasher::new(hash_seed),
        }
    }

    /// Number of whole 32-bit words not yet loaded.
    pub fn words_left(&self) -> usize {
        (self.words.len() / 4).saturating_sub(self.next_word)
    }

    /// Load the next little-endian word, absorbing it into the integrity
    /// hash at the moment it leaves the reader. Underflow is fatal.
    pub fn load(&mut self) -> Result<u32, DecodeError> {
        if self.words_left() == 0 {
            return Err(DecodeError::Truncated);
        }
        let offset = self.next_word * 4;
        let word = u32::from_le_bytes(self.words[offset..offset + 4].try_into().unwrap());
        self.next_word += 1;
        self.hasher.hash_word(word);
        Ok(word)
    }

    /// Finalize and return the accumulated integrity digest. Consumes the
    /// reader since no further words should be absorbed after the trailer
    /// is checked.
    pub fn finish_hash(self) -> u32 {
        self.hasher.finish()
    }
}
