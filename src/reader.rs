//! The top-level orchestrator: header -> tables -> symbol decoder -> row
//! decoder, the way `ImageMaskReader::read` drives `decodeRLE` for the
//! original's `compress`/`decompress` pair.

use log::{debug, trace, warn};

use crate::bitstream::BitReader;
use crate::constants::GCIF_DATA_SEED;
use crate::errors::DecodeError;
use crate::huffman::{HeaderDecoder, HuffmanDecoder, HuffmanTables};
use crate::mask::{MaskImage, MaskRowDecoder};

/// Decodes a GCIF-mono mask stream.
///
/// `words` is the raw little-endian byte buffer (its length must be a
/// multiple of 4): a Golomb/delta-coded Huffman header, followed by the
/// Huffman-coded run-length symbol stream for `height` rows of `width`
/// bits each. `expected_hash`, when present, is checked against the
/// integrity digest accumulated over every word the bit reader loads.
pub fn read(
    words: &[u8],
    width: u32,
    height: u32,
    expected_hash: Option<u32>,
) -> Result<MaskImage, DecodeError> {
    let mut reader = BitReader::new(words, GCIF_DATA_SEED);

    let header = HeaderDecoder::decode(&mut reader)?;
    trace!("header decoded, {} leftover bits", header.leftover_bits);

    let tables = HuffmanTables::build(&header.code_lengths)?;
    debug!(
        "huffman tables built: {} used symbols, code sizes {}..={}",
        tables.total_used_syms(),
        tables.min_code_size(),
        tables.max_code_size()
    );

    let mut image = MaskImage::new(width, height)?;
    let mut row_decoder = MaskRowDecoder::new(width, height);

    {
        let mut huffman =
            HuffmanDecoder::new(&tables, &mut reader, header.leftover_word, header.leftover_bits)?;
        loop {
            let symbol = huffman.next_symbol()?;
            if row_decoder.feed(&mut image, symbol)? {
                break;
            }
        }
    }
    trace!("all {} rows decoded", height);

    let actual_hash = reader.finish_hash();
    if let Some(expected) = expected_hash {
        if expected != actual_hash {
            warn!("integrity mismatch: expected {expected:#010x}, got {actual_hash:#010x}");
            return Err(DecodeError::IntegrityMismatch {
                expected,
                actual: actual_hash,
            });
        }
    }

    Ok(image)
}
