//! File-based encode and decode workflow
//!
//! Each helper opens its file, does the whole transfer and drops the handle on
//! every exit path. Nothing is kept between calls: the caller holds the
//! [`HuffmanCodec`] or [`HuffmanTree`] needed for the next step.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::CodecConfig;
use crate::entropy::{HuffmanCodec, HuffmanDecoder, HuffmanTree, Symbol};
use crate::error::Result;
use crate::io::symbol_source::{ReaderSymbolSource, SymbolSource};

/// Read every symbol of a file
pub fn read_symbols_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Symbol>> {
    let file = File::open(path)?;
    ReaderSymbolSource::new(file).read_all()
}

/// Write decoded symbols to a file
pub fn write_symbols_to_file<P: AsRef<Path>>(path: P, symbols: &[Symbol]) -> Result<()> {
    write_bytes(path.as_ref(), symbols)
}

/// Write packed bytes to a file, replacing its contents
pub fn write_packed_to_file<P: AsRef<Path>>(path: P, packed: &[u8]) -> Result<()> {
    write_bytes(path.as_ref(), packed)
}

/// Read a whole packed file
pub fn read_packed_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    Ok(std::fs::read(path)?)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}

/// Build a codec from the symbols of `input` and write their encoding to `encoded`.
///
/// The returned codec holds the tree needed to decode the file again.
pub fn encode_file<P, Q>(input: P, encoded: Q, config: &CodecConfig) -> Result<HuffmanCodec>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let symbols = read_symbols_from_file(&input)?;
    let codec = HuffmanCodec::from_symbols(&symbols, config)?;
    let packed = codec.encode(&symbols)?;
    write_packed_to_file(&encoded, &packed)?;

    log::debug!(
        "Encoded {} ({} symbols) into {} ({} bytes)",
        input.as_ref().display(),
        symbols.len(),
        encoded.as_ref().display(),
        packed.len()
    );
    Ok(codec)
}

/// Decode `encoded` with `tree` and write the symbols to `decoded`.
///
/// Nothing is written when decoding fails.
pub fn decode_file<P, Q>(tree: &HuffmanTree, encoded: P, decoded: Q) -> Result<usize>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let packed = read_packed_from_file(&encoded)?;
    let symbols = HuffmanDecoder::new(tree)?.decode(&packed)?;
    write_symbols_to_file(&decoded, &symbols)?;

    log::debug!(
        "Decoded {} into {} ({} symbols)",
        encoded.as_ref().display(),
        decoded.as_ref().display(),
        symbols.len()
    );
    Ok(symbols.len())
}
