use std::fmt;

/// Everything that can go wrong while decoding a GCIF-mono mask.
///
/// All variants are non-recoverable: the decoder stops and hands the error
/// back to its caller. There is no partial-output guarantee on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The bit reader ran out of words before the current stage finished.
    Truncated,
    /// A reconstructed code length fell outside `0..=16`, every symbol has
    /// length 0, or the code lengths are over-subscribed (Kraft sum exceeds
    /// what a depth-16 binary tree can hold).
    MalformedHeader(String),
    /// The Huffman slow path computed a `val_ptr` outside the symbol table.
    CorruptSymbolStream,
    /// The row decoder was asked to write past the end of a row, or more
    /// rows were produced than the image declares.
    ImageOverrun,
    /// The trailer's digest disagreed with the one accumulated while
    /// reading the stream.
    IntegrityMismatch { expected: u32, actual: u32 },
    /// Requested an operation this crate does not implement (encoding is an
    /// explicit non-goal of the mask codec).
    EncodingUnsupported,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "input word stream ended before decoding finished"),
            Self::MalformedHeader(reason) => write!(f, "malformed Huffman header: {reason}"),
            Self::CorruptSymbolStream => {
                write!(f, "Huffman symbol stream decoded to an out-of-range value")
            }
            Self::ImageOverrun => write!(f, "row decoder produced more data than the image allows"),
            Self::IntegrityMismatch { expected, actual } => write!(
                f,
                "integrity hash mismatch: expected {expected:#010x}, computed {actual:#010x}"
            ),
            Self::EncodingUnsupported => {
                write!(f, "encoding the GCIF-mono mask format is not implemented")
            }
        }
    }
}

impl std::error::Error for DecodeError {}
