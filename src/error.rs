//! Error handling for the huffcode library
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! [`HuffmanError`]. Errors are fail-fast: nothing is retried internally, since
//! all transforms are deterministic and would fail the same way again.

use crate::entropy::Symbol;
use thiserror::Error;

/// Main error type for the huffcode library
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// The symbol stream contained no symbols to analyze
    #[error("Empty input: no symbols to analyze")]
    EmptyInput,

    /// Tree construction produced a root that is itself a leaf
    #[error("Degenerate tree: root is a single leaf, no code can be assigned")]
    DegenerateTree,

    /// A symbol being encoded has no entry in the encoding table
    #[error("Unknown symbol: {symbol} has no entry in the encoding table")]
    UnknownSymbol {
        /// The symbol that could not be encoded
        symbol: Symbol,
    },

    /// An element handed to the bit packer was not a 0/1 value
    #[error("Invalid bit at index {index}: expected a 0 or 1 value")]
    InvalidBit {
        /// Position of the offending element in the input sequence
        index: usize,
    },

    /// The bit stream ended while the decoder was inside the tree
    #[error("Truncated stream: input ended after {consumed_bits} bits, {pending_depth} bits into a code")]
    TruncatedStream {
        /// Number of payload bits consumed before the stream ran out
        consumed_bits: usize,
        /// Depth of the decode cursor below the root when input ended
        pending_depth: usize,
    },

    /// Input symbol lies outside the configured alphabet
    #[error("Symbol out of range: {symbol} is not below alphabet size {alphabet_size}")]
    SymbolOutOfRange {
        /// The offending symbol
        symbol: Symbol,
        /// The configured alphabet size
        alphabet_size: u16,
    },

    /// A tree violates the strict binary shape (e.g. loaded from a damaged sidecar)
    #[error("Malformed tree: {message}")]
    MalformedTree {
        /// Description of the structural problem
        message: String,
    },

    /// Out-of-band tree or frequency data could not be (de)serialized
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message from the serializer
        message: String,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffmanError {
    /// Create an unknown symbol error
    pub fn unknown_symbol(symbol: Symbol) -> Self {
        Self::UnknownSymbol { symbol }
    }

    /// Create an invalid bit error
    pub fn invalid_bit(index: usize) -> Self {
        Self::InvalidBit { index }
    }

    /// Create a truncated stream error
    pub fn truncated_stream(consumed_bits: usize, pending_depth: usize) -> Self {
        Self::TruncatedStream {
            consumed_bits,
            pending_depth,
        }
    }

    /// Create a symbol out of range error
    pub fn symbol_out_of_range(symbol: Symbol, alphabet_size: u16) -> Self {
        Self::SymbolOutOfRange {
            symbol,
            alphabet_size,
        }
    }

    /// Create a malformed tree error
    pub fn malformed_tree<S: Into<String>>(message: S) -> Self {
        Self::MalformedTree {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error.
    ///
    /// Only I/O failures can succeed on a later attempt; everything else is a
    /// property of the input itself.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::EmptyInput => "input",
            Self::DegenerateTree => "tree",
            Self::UnknownSymbol { .. } => "encode",
            Self::InvalidBit { .. } => "pack",
            Self::TruncatedStream { .. } => "decode",
            Self::SymbolOutOfRange { .. } => "input",
            Self::MalformedTree { .. } => "tree",
            Self::Serialization { .. } => "serialization",
            Self::Configuration { .. } => "config",
            Self::Io(_) => "io",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HuffmanError>;
