//! Symbol sources and file I/O
//!
//! The coding core works on in-memory slices; this module supplies them from
//! readers and files and writes results back out.

pub mod file;
pub mod symbol_source;

// Re-export core types
pub use symbol_source::{ReaderSymbolSource, SliceSymbolSource, SymbolSource};

// Convenience functions
pub use file::{
    decode_file, encode_file, read_packed_from_file, read_symbols_from_file,
    write_packed_to_file, write_symbols_to_file,
};
