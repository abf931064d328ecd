//! Component C: rebuilds the 256-entry code-length table from its Golomb +
//! delta-predictor encoding.
//!
//! Grounded on `HuffmanDecoder::init`'s Golomb/delta loop in
//! `original_source/HuffmanDecoder.cpp`. The original reads bits straight out
//! of a raw pointer; here the same `bit = word & 1; word >>= 1` discipline is
//! kept but driven off the `BitReader` for refills, with `Result` returns in
//! place of undefined behaviour on underflow.

use crate::bitstream::BitReader;
use crate::constants::NUM_SYMS;
use crate::errors::DecodeError;

const INITIAL_LAG: i32 = 3;

/// The 256 reconstructed code lengths, plus the bit-window state the
/// Huffman decoder should continue consuming from.
pub struct HeaderResult {
    pub code_lengths: [u8; NUM_SYMS],
    /// Bits not yet consumed out of the word the header finished in,
    /// right-aligned: bit 0 is the next bit a header-style reader would
    /// take.
    pub leftover_word: u32,
    pub leftover_bits: u32,
}

pub struct HeaderDecoder;

impl HeaderDecoder {
    /// Reads `pivot` from the low 3 bits of the first word, then decodes 256
    /// Golomb-Rice + zig-zag + delta-predicted lengths.
    pub fn decode(reader: &mut BitReader) -> Result<HeaderResult, DecodeError> {
        let mut word = reader.load()?;
        let pivot = word & 0b111;
        word >>= 3;
        let mut bits_left = 29u32;
        let pivot_mask = if pivot > 0 { (1u32 << pivot) - 1 } else { 0 };

        let mut lag0 = INITIAL_LAG;
        let mut lag1 = INITIAL_LAG;
        let mut code_lengths = [0u8; NUM_SYMS];

        for i in 0..NUM_SYMS {
            let mut quotient: u32 = 0;
            loop {
                if bits_left == 0 {
                    word = reader.load()?;
                    bits_left = 32;
                }
                let bit = word & 1;
                word >>= 1;
                bits_left -= 1;
                if bit == 0 {
                    break;
                }
                quotient += 1;
            }

            let remainder = if pivot == 0 {
                0
            } else if bits_left >= pivot {
                let r = word & pivot_mask;
                word >>= pivot;
                bits_left -= pivot;
                r
            } else {
                let low_bits = bits_left;
                let mut r = word;
                word = reader.load()?;
                let need = pivot - low_bits;
                r |= (word & ((1u32 << need) - 1)) << low_bits;
                word >>= need;
                bits_left = 32 - need;
                r & pivot_mask
            };

            let value = (quotient << pivot) | remainder;
            let delta = if value & 1 != 0 {
                -((value >> 1) as i32)
            } else {
                (value >> 1) as i32
            };

            let pred = if i < 16 { lag0 } else { lag1 };
            let code_len = pred + delta;
            if code_len < 0 || code_len > 16 {
                return Err(DecodeError::MalformedHeader(format!(
                    "reconstructed code length {code_len} for symbol {i} outside 0..=16"
                )));
            }
            lag1 = lag0;
            lag0 = code_len;
            code_lengths[i] = code_len as u8;
        }

        Ok(HeaderResult {
            code_lengths,
            leftover_word: word,
            leftover_bits: bits_left,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Golomb-encode a stream of non-negative values with the given pivot,
    /// matching the bit order `HeaderDecoder::decode` expects to read:
    /// unary quotient of `1`s terminated by a `0`, then `pivot` remainder
    /// bits, all packed LSB-first into little-endian words.
    struct BitWriter {
        words: Vec<u32>,
        cur: u32,
        filled: u32,
    }

    impl BitWriter {
        fn new() -> Self {
            Self {
                words: Vec::new(),
                cur: 0,
                filled: 0,
            }
        }

        fn push_bit(&mut self, bit: u32) {
            self.cur |= (bit & 1) << self.filled;
            self.filled += 1;
            if self.filled == 32 {
                self.words.push(self.cur);
                self.cur = 0;
                self.filled = 0;
            }
        }

        fn push_bits(&mut self, value: u32, count: u32) {
            for i in 0..count {
                self.push_bit((value >> i) & 1);
            }
        }

        fn finish(mut self) -> Vec<u8> {
            if self.filled > 0 {
                self.words.push(self.cur);
            }
            let mut bytes = Vec::with_capacity(self.words.len() * 4);
            for w in self.words {
                bytes.extend_from_slice(&w.to_le_bytes());
            }
            bytes
        }
    }

    fn encode_golomb(writer: &mut BitWriter, pivot: u32, value: u32) {
        let quotient = value >> pivot;
        let remainder = value & (1u32 << pivot).wrapping_sub(1);
        for _ in 0..quotient {
            writer.push_bit(1);
        }
        writer.push_bit(0);
        if pivot > 0 {
            writer.push_bits(remainder, pivot);
        }
    }

    #[test]
    fn header_roundtrip_all_eights() {
        // lag0 = lag1 = 3 initially; target code length 8 for every symbol.
        // First delta (sym 0) is 8 - 3 = 5 -> zig-zag value 10. After that,
        // lag0 becomes 8 so every later delta relative to lag0 is 0 -> value
        // 0, except the transition at symbol 16 where lag1 is still 3 and
        // needs the same +5 delta once before it also settles on 8.
        let pivot = 0u32;
        let mut writer = BitWriter::new();
        let mut lag0 = INITIAL_LAG;
        let mut lag1 = INITIAL_LAG;
        let mut expected = [0u8; NUM_SYMS];
        for i in 0..NUM_SYMS {
            let pred = if i < 16 { lag0 } else { lag1 };
            let delta = 8 - pred;
            let zigzag = if delta < 0 {
                ((-delta) as u32) * 2 - 1
            } else {
                (delta as u32) * 2
            };
            encode_golomb(&mut writer, pivot, zigzag);
            lag1 = lag0;
            lag0 = 8;
            expected[i] = 8;
        }
        let bytes = writer.finish();
        let mut reader = BitReader::new(&bytes, 0);
        let result = HeaderDecoder::decode(&mut reader).unwrap();
        assert_eq!(&result.code_lengths[..], &expected[..]);
    }

    #[test]
    fn out_of_range_length_is_malformed() {
        // A quotient large enough to push the first delta (against lag0 = 3)
        // past 16 must be rejected.
        let mut writer = BitWriter::new();
        encode_golomb(&mut writer, 0, 200);
        for _ in 1..NUM_SYMS {
            encode_golomb(&mut writer, 0, 0);
        }
        let bytes = writer.finish();
        let mut reader = BitReader::new(&bytes, 0);
        assert!(matches!(
            HeaderDecoder::decode(&mut reader),
            Err(DecodeError::MalformedHeader(_))
        ));
    }
}
