//! Huffman entropy coding
//!
//! The pipeline runs leaf-first through these modules:
//! [`frequency`] counts symbols into a sorted table, [`tree`] merges the table
//! into a prefix-free tree, [`table`] derives per-symbol codes, [`bit_pack`]
//! handles the sentinel-padded byte format and [`huffman`] ties them together
//! into an encoder and a decoder.

pub mod bit_pack;
pub mod frequency;
pub mod huffman;
pub mod table;
pub mod tree;

/// A symbol of the input alphabet: one 8-bit code point
pub type Symbol = u8;

// Re-export main types
pub use bit_pack::{
    bits_to_string, pack_bit_string, pack_bits, packed_len, padding_len, unpack_bits,
    unpack_reader, BitValue,
};
pub use frequency::{FrequencyAnalyzer, FrequencyEntry, SortedFrequencyList};
pub use huffman::{
    build_tree, build_tree_with_config, decode, encode, HuffmanCodec, HuffmanDecoder,
    HuffmanEncoder,
};
pub use table::EncodingTable;
pub use tree::{HuffmanTree, TreeBuilder, TreeNode};
