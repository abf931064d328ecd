//! Component F: the run-length / XOR-delta row decoder.
//!
//! Grounded on `Converter::decodeRLE` in `original_source/gcif.cpp`. The
//! first-row (absolute) and subsequent-row (XOR) branches are kept separate
//! exactly as spec.md §9 requires — they are structurally similar but not
//! unifiable without losing the `lastSum` zero-run merge, which only applies
//! to XOR rows.

use crate::errors::DecodeError;

use super::image::MaskImage;

pub struct MaskRowDecoder {
    width: u32,
    height: u32,
    stride: u32,
    write_row: u32,
    sum: u32,
    row_started: bool,
    row_left: u32,
    bit_offset: u32,
    bit_on: bool,
    last_sum: u32,
    done: bool,
}

impl MaskRowDecoder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stride: width / 32,
            write_row: 0,
            sum: 0,
            row_started: false,
            row_left: 0,
            bit_offset: 0,
            bit_on: false,
            last_sum: 0,
            done: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feeds one byte of the 7-bit-continuation symbol stream. Returns
    /// `true` exactly once, on the call that finalizes the last row.
    pub fn feed(&mut self, image: &mut MaskImage, byte: u8) -> Result<bool, DecodeError> {
        self.sum = (self.sum << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 != 0 {
            return Ok(false);
        }
        let value = self.sum;
        self.sum = 0;
        self.commit(image, value)
    }

    fn commit(&mut self, image: &mut MaskImage, r: u32) -> Result<bool, DecodeError> {
        if !self.row_started {
            return self.start_row(image, r);
        }

        let bit_offset = self.bit_offset;
        let new_bit_offset = bit_offset + r;
        if new_bit_offset >= self.width {
            return Err(DecodeError::ImageOverrun);
        }
        let word_offset = bit_offset >> 5;
        let new_offset = new_bit_offset >> 5;
        let shift = 31 - (new_bit_offset & 31);

        if self.write_row == 0 {
            self.apply_first_row_flip(image, word_offset, new_offset, shift, bit_offset);
        } else {
            self.apply_subsequent_row_flip(image, r, word_offset, new_offset, shift, bit_offset);
        }

        self.bit_offset = new_bit_offset + 1;
        self.row_left -= 1;
        if self.row_left == 0 {
            self.finish_row(image);
            if self.write_row >= self.height {
                self.done = true;
                return Ok(true);
            }
            self.row_started = false;
        }
        Ok(false)
    }

    fn start_row(&mut self, image: &mut MaskImage, r: u32) -> Result<bool, DecodeError> {
        self.row_left = r;
        if r == 0 {
            if self.write_row > 0 {
                image.copy_row_from_previous(self.write_row);
            } else {
                image.fill_row(self.write_row, 0xFFFF_FFFF);
            }
            self.write_row += 1;
            if self.write_row >= self.height {
                self.done = true;
                return Ok(true);
            }
            return Ok(false);
        }

        self.row_started = true;
        self.bit_on = false;
        self.bit_offset = 0;
        self.last_sum = 0;
        if self.write_row > 0 {
            image.copy_row_from_previous(self.write_row);
        } else {
            image.set_word(self.write_row, 0, 0);
        }
        Ok(false)
    }

    fn apply_first_row_flip(
        &mut self,
        image: &mut MaskImage,
        word_offset: u32,
        new_offset: u32,
        shift: u32,
        bit_offset: u32,
    ) {
        self.bit_on = !self.bit_on;
        if self.bit_on {
            for w in (word_offset + 1)..new_offset {
                image.set_word(self.write_row, w, 0);
            }
            image.set_word(self.write_row, new_offset, 1u32 << shift);
        } else {
            let bits_used_mask = 0xFFFF_FFFFu32 >> (bit_offset & 31);
            if new_offset <= word_offset {
                let cur = image.word(self.write_row, new_offset);
                image.set_word(
                    self.write_row,
                    new_offset,
                    cur | (bits_used_mask & (0xFFFF_FFFEu32 << shift)),
                );
            } else {
                let cur = image.word(self.write_row, word_offset);
                image.set_word(self.write_row, word_offset, cur | bits_used_mask);
                for w in (word_offset + 1)..new_offset {
                    image.set_word(self.write_row, w, 0xFFFF_FFFF);
                }
                image.set_word(self.write_row, new_offset, 0xFFFF_FFFEu32 << shift);
            }
        }
    }

    fn apply_subsequent_row_flip(
        &mut self,
        image: &mut MaskImage,
        r: u32,
        word_offset: u32,
        new_offset: u32,
        shift: u32,
        bit_offset: u32,
    ) {
        if self.bit_on {
            let bits_used_mask = 0xFFFF_FFFFu32 >> (bit_offset & 31);
            if new_offset <= word_offset {
                image.xor_word(
                    self.write_row,
                    new_offset,
                    bits_used_mask & (0xFFFF_FFFEu32 << shift),
                );
            } else {
                image.xor_word(self.write_row, word_offset, bits_used_mask);
                for w in (word_offset + 1)..new_offset {
                    image.xor_word(self.write_row, w, 0xFFFF_FFFF);
                }
                image.xor_word(self.write_row, new_offset, 0xFFFF_FFFEu32 << shift);
            }
            self.bit_on = false;
            self.last_sum = 0;
        } else {
            image.xor_word(self.write_row, new_offset, 1u32 << shift);
            if r == 0 && self.last_sum == 1 {
                self.bit_on = true;
            }
            self.last_sum = 1;
        }
    }

    fn finish_row(&mut self, image: &mut MaskImage) {
        let word_offset = self.bit_offset >> 5;
        if self.write_row > 0 {
            if self.bit_on && word_offset < self.stride {
                image.xor_word(
                    self.write_row,
                    word_offset,
                    0xFFFF_FFFFu32 >> (self.bit_offset & 31),
                );
                for w in (word_offset + 1)..self.stride {
                    image.xor_word(self.write_row, w, 0xFFFF_FFFF);
                }
            }
        } else if self.bit_on {
            if word_offset < self.stride {
                let cur = image.word(self.write_row, word_offset);
                image.set_word(
                    self.write_row,
                    word_offset,
                    cur | (0xFFFF_FFFFu32 >> (self.bit_offset & 31)),
                );
            }
            for w in (word_offset + 1)..self.stride {
                image.set_word(self.write_row, w, 0xFFFF_FFFF);
            }
        } else {
            for w in (word_offset + 1)..self.stride {
                image.set_word(self.write_row, w, 0);
            }
        }
        self.write_row += 1;
    }
}
