//! The canonical Huffman decoder: a header reader (component C), a table
//! builder (component D) and the per-symbol decoder (component E).

pub mod decoder;
pub mod header;
pub mod tables;

pub use decoder::HuffmanDecoder;
pub use header::HeaderDecoder;
pub use tables::HuffmanTables;
