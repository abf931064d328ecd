//! Decoder for the GCIF-mono monochrome mask codec: a canonical Huffman
//! decoder with a Golomb/delta-coded header, driving a run-length /
//! XOR-delta bit-plane row decoder.
//!
//! The public entry point is [`decode_mask`]; everything else is exposed
//! for testing and for the `gcifmask` binary.

pub mod bitstream;
pub mod constants;
pub mod errors;
pub mod hash;
pub mod huffman;
pub mod mask;
pub mod reader;

pub use errors::DecodeError;
pub use mask::MaskImage;

/// Decodes a GCIF-mono mask stream into a bit-plane image.
///
/// See [`reader::read`] for the full contract.
pub fn decode_mask(
    words: &[u8],
    width: u32,
    height: u32,
    expected_hash: Option<u32>,
) -> Result<MaskImage, DecodeError> {
    reader::read(words, width, height, expected_hash)
}
