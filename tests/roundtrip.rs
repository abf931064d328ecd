//! Integration coverage for the public `decode_mask` entry point, the way
//! the pack's `SludgePhD-zune-jpeg` keeps a `tests/` directory for
//! whole-decoder coverage rather than only unit tests per module.

use gcif_mask_rs::decode_mask;

const NUM_SYMS: usize = 256;

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

    fn push_word(&mut self, word: u32) {
        for i in 0..32 {
            self.push_bit((word >> i) & 1);
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

fn encode_golomb(writer: &mut BitWriter, value: u32) {
    for _ in 0..value {
        writer.push_bit(1);
    }
    writer.push_bit(0);
}

/// Encodes a header (pivot 0) giving `symbol` length 1 and every other
/// symbol length 0, followed by `payload_words` zero words — plenty of
/// bits for a single-symbol alphabet, which accepts any bit pattern.
fn single_symbol_stream(symbol: u8, payload_words: usize) -> Vec<u8> {
    let mut writer = BitWriter::new();
    writer.push_bit(0);
    writer.push_bit(0);
    writer.push_bit(0);
    let mut lag0 = 3i32;
    let mut lag1 = 3i32;
    for i in 0..NUM_SYMS {
        let target = if i == symbol as usize { 1 } else { 0 };
        let pred = if i < 16 { lag0 } else { lag1 };
        let delta = target - pred;
        let zigzag = if delta < 0 {
            ((-delta) as u32) * 2 - 1
        } else {
            (delta as u32) * 2
        };
        encode_golomb(&mut writer, zigzag);
        lag1 = lag0;
        lag0 = target;
    }
    for _ in 0..payload_words {
        writer.push_word(0);
    }
    writer.finish()
}

#[test]
fn decodes_an_all_empty_row_image_to_all_ones() {
    // Every decoded symbol is 0 (single-symbol alphabet, symbol 0): each
    // row declares rowLeft = 0, which means "copy the previous row" (or,
    // for row 0, "fill with ones").
    let bytes = single_symbol_stream(0, 16);
    let image = decode_mask(&bytes, 32, 8, None).unwrap();
    for row in 0..8 {
        assert_eq!(image.row(row), &[0xFFFF_FFFFu32]);
    }
}

#[test]
fn integrity_mismatch_is_reported_not_silently_ignored() {
    let bytes = single_symbol_stream(0, 16);
    let err = decode_mask(&bytes, 32, 8, Some(0xDEAD_BEEF)).unwrap_err();
    assert!(matches!(
        err,
        gcif_mask_rs::DecodeError::IntegrityMismatch { expected: 0xDEAD_BEEF, .. }
    ));
}

#[test]
fn truncated_input_is_reported_not_panicked() {
    // No payload words at all: decoding 64 rows needs at least 64 symbol
    // decodes, far more than the header's leftover bits (at most 31) can
    // ever supply on their own.
    let bytes = single_symbol_stream(0, 0);
    let err = decode_mask(&bytes, 32, 64, None).unwrap_err();
    assert_eq!(err, gcif_mask_rs::DecodeError::Truncated);
}
