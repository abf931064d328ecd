//! Component E: decodes one symbol per call from the bit reader using tables
//! built by [`super::tables::HuffmanTables`].
//!
//! Grounded on `HuffmanDecoder::next` in
//! `original_source/HuffmanDecoder.cpp` for the fast/slow path split and the
//! `+1`-biased comparison. The refill loop there is an empty TODO; this
//! implements the policy spec.md §4.E infers from the `cBitBufSize - 8`
//! threshold comment, keeping at least 24 bits buffered whenever a symbol
//! decode begins.
//!
//! One framing wrinkle the header doesn't share: the header consumes bits
//! LSB-first (`bit = word & 1; word >>= 1`) while this decoder compares
//! against the top 16 bits of a window and consumes via `window <<= len`
//! (MSB-first). Both walk the same underlying bit order — word 0's bit 0,
//! then bit 1, … then word 1's bit 0, and so on — so bridging the two is a
//! matter of bit-reversing each loaded word before it joins the MSB-first
//! window, not a different bit order. `u32::reverse_bits` does that; a small
//! carry (`pending`/`pending_bits`) holds whatever doesn't fit in the
//! window's remaining 32 bits until the next refill, mirroring the
//! teacher's `inbits_offset` carry in `bitstream.rs`.

use crate::bitstream::BitReader;
use crate::errors::DecodeError;

use super::tables::HuffmanTables;

/// `cBitBufSize - 8` from the original source's threshold comment.
const REFILL_THRESHOLD: u32 = 24;

pub struct HuffmanDecoder<'t, 'r, 'w> {
    tables: &'t HuffmanTables,
    reader: &'r mut BitReader<'w>,
    /// Top `bits_left` bits are valid input, MSB-first.
    window: u32,
    bits_left: u32,
    /// Bits already bit-reversed and MSB-aligned but not yet room for in
    /// `window`.
    pending: u32,
    pending_bits: u32,
}

impl<'t, 'r, 'w> HuffmanDecoder<'t, 'r, 'w> {
    /// `leftover_word`/`leftover_bits` are the header's unconsumed tail, in
    /// the header's own LSB-first convention (bit 0 is the next bit due).
    pub fn new(
        tables: &'t HuffmanTables,
        reader: &'r mut BitReader<'w>,
        leftover_word: u32,
        leftover_bits: u32,
    ) -> Result<Self, DecodeError> {
        let mut decoder = Self {
            tables,
            reader,
            window: 0,
            bits_left: 0,
            pending: 0,
            pending_bits: 0,
        };
        decoder.push(leftover_word.reverse_bits(), leftover_bits);
        decoder.refill()?;
        Ok(decoder)
    }

    /// Merge up to 32 MSB-aligned `chunk_bits` into the window, stashing
    /// whatever overflows into `pending`.
    fn push(&mut self, chunk: u32, chunk_bits: u32) {
        if chunk_bits == 0 {
            return;
        }
        let room = 32 - self.bits_left;
        if chunk_bits <= room {
            self.window |= chunk >> self.bits_left;
            self.bits_left += chunk_bits;
        } else {
            self.window |= chunk >> self.bits_left;
            self.pending = chunk.wrapping_shl(room);
            self.pending_bits = chunk_bits - room;
            self.bits_left = 32;
        }
    }

    fn refill(&mut self) -> Result<(), DecodeError> {
        while self.bits_left < REFILL_THRESHOLD {
            if self.pending_bits > 0 {
                let (chunk, bits) = (self.pending, self.pending_bits);
                self.pending = 0;
                self.pending_bits = 0;
                self.push(chunk, bits);
                continue;
            }
            if self.reader.words_left() == 0 {
                break;
            }
            let word = self.reader.load()?;
            self.push(word.reverse_bits(), 32);
        }
        Ok(())
    }

    /// Decodes one symbol. Callers needing more input than remains in the
    /// stream get `DecodeError::Truncated` only once the window itself runs
    /// dry mid-symbol; a short final word is tolerated since the format has
    /// no explicit end marker.
    pub fn next_symbol(&mut self) -> Result<u8, DecodeError> {
        self.refill()?;

        if let Some((sym, len)) = self.tables.single_symbol() {
            if len > self.bits_left {
                return Err(DecodeError::Truncated);
            }
            self.window = self.window.wrapping_shl(len);
            self.bits_left -= len;
            return Ok(sym);
        }

        let code = self.window;
        let k = (code >> 16).wrapping_add(1);

        let (sym, len) = if k <= self.tables.table_max_code() {
            let entry = self.tables.lookup_entry(code >> self.tables.table_shift());
            (entry & 0xFFFF, entry >> 16)
        } else {
            let mut len = self.tables.decode_start_code_size();
            while k > self.tables.max_code(len) {
                len += 1;
            }
            let val_ptr = self.tables.val_ptr(len) + (code >> (32 - len)) as i64;
            if val_ptr < 0 || val_ptr as usize >= self.tables.num_syms() {
                return Err(DecodeError::CorruptSymbolStream);
            }
            (self.tables.sorted_symbol(val_ptr as usize) as u32, len)
        };

        if len > self.bits_left {
            return Err(DecodeError::Truncated);
        }
        self.window = self.window.wrapping_shl(len);
        self.bits_left -= len;
        Ok(sym as u8)
    }
}
