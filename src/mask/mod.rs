//! The mask bit-plane (component state for F) and its row decoder.

pub mod image;
pub mod row_decoder;

pub use image::MaskImage;
pub use row_decoder::MaskRowDecoder;
