//! Huffman encoding and decoding
//!
//! [`HuffmanEncoder`] maps symbols through an [`EncodingTable`] and packs the
//! concatenated codes with the sentinel padding of [`bit_pack`](super::bit_pack).
//! [`HuffmanDecoder`] unpacks and walks a borrowed [`HuffmanTree`] with a local
//! cursor, so one tree can serve any number of decode calls.
//! [`HuffmanCodec`] bundles the frequency table, tree and encoding table derived
//! from one input.

use crate::config::CodecConfig;
use crate::entropy::bit_pack::{pack_bits, packed_len, unpack_bits};
use crate::entropy::frequency::{FrequencyAnalyzer, SortedFrequencyList};
use crate::entropy::table::EncodingTable;
use crate::entropy::tree::HuffmanTree;
use crate::entropy::Symbol;
use crate::error::{HuffmanError, Result};
use crate::io::SymbolSource;

/// Huffman encoder
#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    table: EncodingTable,
}

impl HuffmanEncoder {
    /// Create an encoder from an existing table
    pub fn new(table: EncodingTable) -> Self {
        Self { table }
    }

    /// Create an encoder for a tree
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        Ok(Self::new(EncodingTable::from_tree(tree)?))
    }

    /// Get the encoding table
    pub fn table(&self) -> &EncodingTable {
        &self.table
    }

    /// Concatenate the codes of `symbols` in stream order.
    ///
    /// Fails with [`HuffmanError::UnknownSymbol`] on the first symbol without a code.
    pub fn encode_bits(&self, symbols: &[Symbol]) -> Result<Vec<bool>> {
        concatenate_codes(symbols, &self.table)
    }

    /// Encode `symbols` into packed bytes
    pub fn encode(&self, symbols: &[Symbol]) -> Result<Vec<u8>> {
        let bits = self.encode_bits(symbols)?;
        pack_bits(&bits)
    }

    /// Packed size in bytes without building the output
    pub fn encoded_len(&self, symbols: &[Symbol]) -> Result<usize> {
        let mut bit_len = 0;
        for &symbol in symbols {
            bit_len += self
                .table
                .get(symbol)
                .ok_or_else(|| HuffmanError::unknown_symbol(symbol))?
                .len();
        }
        Ok(packed_len(bit_len))
    }
}

/// Huffman decoder over a borrowed, read-only tree
#[derive(Debug, Clone, Copy)]
pub struct HuffmanDecoder<'a> {
    tree: &'a HuffmanTree,
}

impl<'a> HuffmanDecoder<'a> {
    /// Create a decoder. A tree whose root is a leaf cannot decode anything and
    /// fails with [`HuffmanError::DegenerateTree`].
    pub fn new(tree: &'a HuffmanTree) -> Result<Self> {
        if tree.root().is_leaf() {
            return Err(HuffmanError::DegenerateTree);
        }
        Ok(Self { tree })
    }

    /// Get the tree
    pub fn tree(&self) -> &'a HuffmanTree {
        self.tree
    }

    /// Unpack `bytes` and decode the payload
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Symbol>> {
        let bits = unpack_bits(bytes);
        self.decode_bits(&bits)
    }

    /// Walk the tree bit by bit, emitting a symbol at every leaf.
    ///
    /// The input must end exactly on a symbol boundary, otherwise this fails with
    /// [`HuffmanError::TruncatedStream`].
    pub fn decode_bits(&self, bits: &[bool]) -> Result<Vec<Symbol>> {
        let root = self.tree.root();
        let mut symbols = Vec::with_capacity(bits.len() / self.tree.depth().max(1));
        let mut cursor = root;
        let mut depth = 0;

        for &bit in bits {
            cursor = cursor
                .child(bit)
                .ok_or_else(|| HuffmanError::malformed_tree("internal node without two children"))?;
            depth += 1;

            if let Some(symbol) = cursor.leaf_symbol() {
                symbols.push(symbol);
                cursor = root;
                depth = 0;
            }
        }

        if depth != 0 {
            return Err(HuffmanError::truncated_stream(bits.len(), depth));
        }

        log::debug!("Decoded {} bits into {} symbols", bits.len(), symbols.len());
        Ok(symbols)
    }
}

/// Frequency table, tree and encoding table derived from one symbol stream
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    frequencies: SortedFrequencyList,
    tree: HuffmanTree,
    encoder: HuffmanEncoder,
}

impl HuffmanCodec {
    /// Analyze `symbols`, build the tree and derive the encoding table
    pub fn from_symbols(symbols: &[Symbol], config: &CodecConfig) -> Result<Self> {
        let frequencies = FrequencyAnalyzer::new(config.clone()).analyze(symbols)?;
        Self::from_frequencies(frequencies)
    }

    /// Drain a symbol source and build a codec for what it produced
    pub fn from_source<S: SymbolSource>(source: &mut S, config: &CodecConfig) -> Result<Self> {
        let symbols = source.read_all()?;
        Self::from_symbols(&symbols, config)
    }

    /// Build the tree and encoding table for a frequency table
    pub fn from_frequencies(frequencies: SortedFrequencyList) -> Result<Self> {
        let tree = HuffmanTree::build(&frequencies)?;
        let encoder = HuffmanEncoder::from_tree(&tree)?;
        Ok(Self {
            frequencies,
            tree,
            encoder,
        })
    }

    /// The sorted frequency table
    pub fn sorted_frequencies(&self) -> &SortedFrequencyList {
        &self.frequencies
    }

    /// The Huffman tree
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// The encoding table
    pub fn encoding_table(&self) -> &EncodingTable {
        self.encoder.table()
    }

    /// Encode symbols into packed bytes
    pub fn encode(&self, symbols: &[Symbol]) -> Result<Vec<u8>> {
        self.encoder.encode(symbols)
    }

    /// Decode packed bytes. The tree is untouched and can be reused.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Symbol>> {
        HuffmanDecoder::new(&self.tree)?.decode(bytes)
    }

    /// Packed size divided by input size, one byte per input symbol
    pub fn compression_ratio(&self, symbols: &[Symbol]) -> Result<f64> {
        if symbols.is_empty() {
            return Ok(1.0);
        }
        let packed = self.encoder.encoded_len(symbols)?;
        Ok(packed as f64 / symbols.len() as f64)
    }
}

/// Build the Huffman tree for `symbols` with the default configuration
pub fn build_tree(symbols: &[Symbol]) -> Result<HuffmanTree> {
    build_tree_with_config(symbols, &CodecConfig::default())
}

/// Build the Huffman tree for `symbols`
pub fn build_tree_with_config(symbols: &[Symbol], config: &CodecConfig) -> Result<HuffmanTree> {
    HuffmanTree::from_symbols(symbols, config)
}

/// Encode `symbols` with `table` into packed bytes
pub fn encode(symbols: &[Symbol], table: &EncodingTable) -> Result<Vec<u8>> {
    let bits = concatenate_codes(symbols, table)?;
    pack_bits(&bits)
}

/// Decode packed bytes by walking `tree`
pub fn decode(bytes: &[u8], tree: &HuffmanTree) -> Result<Vec<Symbol>> {
    HuffmanDecoder::new(tree)?.decode(bytes)
}

fn concatenate_codes(symbols: &[Symbol], table: &EncodingTable) -> Result<Vec<bool>> {
    let mut bits = Vec::with_capacity(symbols.len() * table.max_code_length().max(1));
    for &symbol in symbols {
        let code = table
            .get(symbol)
            .ok_or_else(|| HuffmanError::unknown_symbol(symbol))?;
        bits.extend_from_slice(code);
    }
    Ok(bits)
}
