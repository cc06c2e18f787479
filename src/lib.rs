//! # huffcode: Huffman coding with two-queue tree construction
//!
//! This crate derives a prefix-free code from symbol frequencies, packs encoded
//! streams into bytes behind a self-describing padding sentinel, and decodes them
//! back exactly.
//!
//! ## Key Features
//!
//! - **Deterministic trees**: frequency tables sorted by probability then symbol,
//!   merged with a linear-time two-queue algorithm whose tie-break always favors
//!   unmerged leaves
//! - **Headerless format**: the packed output carries its own padding length in the
//!   leading bits of the first byte
//! - **Reusable decoding**: the tree is read-only; decoders walk it with a local cursor
//! - **Out-of-band trees**: trees serialize to JSON so a decoder does not need the input
//!
//! ## Quick Start
//!
//! ```rust
//! use huffcode::{CodecConfig, HuffmanCodec};
//!
//! let input = b"aaabbc";
//! let codec = HuffmanCodec::from_symbols(input, &CodecConfig::default()).unwrap();
//!
//! let packed = codec.encode(input).unwrap();
//! assert_eq!(codec.decode(&packed).unwrap(), input.to_vec());
//!
//! // 'a' is the most frequent symbol, so its code is the shortest
//! let table = codec.encoding_table();
//! assert!(table.get(b'a').unwrap().len() < table.get(b'c').unwrap().len());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod entropy;
pub mod error;
pub mod io;

// Re-export core types
pub use config::{CodecConfig, Config};
pub use entropy::{
    build_tree, build_tree_with_config, decode, encode, pack_bits, unpack_bits, EncodingTable,
    FrequencyAnalyzer, FrequencyEntry, HuffmanCodec, HuffmanDecoder, HuffmanEncoder, HuffmanTree,
    SortedFrequencyList, Symbol, TreeBuilder, TreeNode,
};
pub use error::{HuffmanError, Result};
pub use io::{decode_file, encode_file, ReaderSymbolSource, SliceSymbolSource, SymbolSource};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently only logs the version)
pub fn init() {
    log::debug!("Initializing huffcode v{}", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        init();
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2);
    }

    #[test]
    fn test_re_exports() {
        let tree = build_tree(b"abc").unwrap();
        let table = EncodingTable::from_tree(&tree).unwrap();
        let packed = encode(b"cab", &table).unwrap();
        assert_eq!(decode(&packed, &tree).unwrap(), b"cab".to_vec());

        let _err = HuffmanError::EmptyInput;
        assert!(std::any::type_name::<Result<()>>().contains("HuffmanError"));
    }
}
