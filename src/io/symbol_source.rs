//! Sequential symbol sources
//!
//! The core only needs "is there another symbol" and "read the next symbol".
//! [`SliceSymbolSource`] serves an in-memory slice, [`ReaderSymbolSource`] any
//! byte reader, one byte per symbol.

use std::io::{BufRead, BufReader, Read};

use crate::entropy::Symbol;
use crate::error::{HuffmanError, Result};

/// Trait for reading symbols one at a time
pub trait SymbolSource {
    /// Check whether another symbol can be read
    fn has_next_symbol(&mut self) -> Result<bool>;

    /// Read the next symbol
    fn read_symbol(&mut self) -> Result<Symbol>;

    /// Read every remaining symbol
    fn read_all(&mut self) -> Result<Vec<Symbol>> {
        let mut symbols = Vec::new();
        while self.has_next_symbol()? {
            symbols.push(self.read_symbol()?);
        }
        Ok(symbols)
    }
}

/// SymbolSource over a borrowed slice
pub struct SliceSymbolSource<'a> {
    data: &'a [Symbol],
    position: usize,
}

impl<'a> SliceSymbolSource<'a> {
    /// Create a new source over `data`
    pub fn new(data: &'a [Symbol]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get the number of unread symbols
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }
}

impl<'a> SymbolSource for SliceSymbolSource<'a> {
    fn has_next_symbol(&mut self) -> Result<bool> {
        Ok(self.position < self.data.len())
    }

    fn read_symbol(&mut self) -> Result<Symbol> {
        let symbol = *self.data.get(self.position).ok_or_else(|| {
            HuffmanError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "Unexpected end of symbols",
            ))
        })?;
        self.position += 1;
        Ok(symbol)
    }

    fn read_all(&mut self) -> Result<Vec<Symbol>> {
        let rest = self.data[self.position..].to_vec();
        self.position = self.data.len();
        Ok(rest)
    }
}

/// SymbolSource over any reader, buffered
pub struct ReaderSymbolSource<R> {
    reader: BufReader<R>,
    symbols_read: u64,
}

impl<R: Read> ReaderSymbolSource<R> {
    /// Create a new source over `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            symbols_read: 0,
        }
    }

    /// Number of symbols read so far
    pub fn symbols_read(&self) -> u64 {
        self.symbols_read
    }

    /// Get the underlying reader back
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R: Read> SymbolSource for ReaderSymbolSource<R> {
    fn has_next_symbol(&mut self) -> Result<bool> {
        Ok(!self.reader.fill_buf()?.is_empty())
    }

    fn read_symbol(&mut self) -> Result<Symbol> {
        let mut buf = [0u8; 1];
        self.reader.read_exact(&mut buf)?;
        self.symbols_read += 1;
        Ok(buf[0])
    }

    fn read_all(&mut self) -> Result<Vec<Symbol>> {
        let mut symbols = Vec::new();
        let count = self.reader.read_to_end(&mut symbols)?;
        self.symbols_read += count as u64;
        Ok(symbols)
    }
}
