//! Sidecar integrity hash (component B).
//!
//! Absorbs every word the bit reader loads, in stream order, and produces a
//! digest comparable against a trailer value. The original decoder pairs
//! this with a MurmurHash3-family stream hash seeded with a shared constant;
//! no such crate exists in the dependency stack available here, so the
//! incremental 32-bit variant is implemented directly. It is a pure
//! mix-and-fold over 4-byte blocks, which is exactly the granularity the bit
//! reader already operates at.

const C1: u32 = 0xcc9e2d51;
const C2: u32 = 0x1b873593;

/// Keyed, incremental stream hash. `hash_word` is called once per word as it
/// enters the bit reader's working window; `finish` folds in the total
/// length and returns the final digest.
#[derive(Debug, Clone, Copy)]
pub struct IntegrityHasher {
    state: u32,
    words_absorbed: u32,
}

impl IntegrityHasher {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed,
            words_absorbed: 0,
        }
    }

    #[inline]
    pub fn hash_word(&mut self, word: u32) {
        let mut k1 = word.wrapping_mul(C1);
        k1 = k1.rotate_left(15);
        k1 = k1.wrapping_mul(C2);

        self.state ^= k1;
        self.state = self.state.rotate_left(13);
        self.state = self.state.wrapping_mul(5).wrapping_add(0xe6546b64);

        self.words_absorbed += 1;
    }

    pub fn finish(self) -> u32 {
        let mut h1 = self.state ^ (self.words_absorbed.wrapping_mul(4));
        h1 ^= h1 >> 16;
        h1 = h1.wrapping_mul(0x85ebca6b);
        h1 ^= h1 >> 13;
        h1 = h1.wrapping_mul(0xc2b2ae35);
        h1 ^= h1 >> 16;
        h1
    }
}
