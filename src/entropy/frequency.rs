//! Symbol frequency analysis
//!
//! Counts every symbol of a fully materialized stream and produces a
//! [`SortedFrequencyList`]: entries ascending by probability, ties broken by
//! ascending symbol. When the input has a single distinct symbol a synthetic
//! companion with probability 0 is added so that the tree always has two leaves.

use crate::config::{CodecConfig, Config};
use crate::entropy::Symbol;
use crate::error::{HuffmanError, Result};
use crate::io::SymbolSource;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Symbol counts indexed by code point
type SymbolCounts = [u64; 256];

/// Shard size for parallel counting
#[cfg(feature = "parallel")]
const PARALLEL_CHUNK_SIZE: usize = 64 * 1024;

/// One row of the frequency table, also the payload of every tree node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    /// Code point, absent for merged internal-node aggregates
    pub symbol: Option<Symbol>,
    /// Share of the input taken by this entry, in `[0, 1]`
    pub probability: f64,
}

impl FrequencyEntry {
    /// Entry for a concrete symbol
    pub fn new(symbol: Symbol, probability: f64) -> Self {
        Self {
            symbol: Some(symbol),
            probability,
        }
    }

    /// Symbol-less aggregate used by internal tree nodes
    pub fn aggregate(probability: f64) -> Self {
        Self {
            symbol: None,
            probability,
        }
    }

    /// Ordering used by the frequency table: probability, then symbol
    fn table_order(&self, other: &Self) -> Ordering {
        self.probability
            .total_cmp(&other.probability)
            .then_with(|| self.symbol.cmp(&other.symbol))
    }
}

/// Frequency table sorted ascending by probability, ties by ascending symbol.
///
/// Only [`FrequencyAnalyzer::analyze`] and [`SortedFrequencyList::from_entries`]
/// construct it, so the ordering always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedFrequencyList {
    entries: Vec<FrequencyEntry>,
    companion: Option<Symbol>,
}

impl SortedFrequencyList {
    /// Build a list from arbitrary entries, sorting them into table order.
    ///
    /// No companion is recorded; this is the entry point for tables that were
    /// transmitted out of band.
    pub fn from_entries(mut entries: Vec<FrequencyEntry>) -> Self {
        entries.sort_by(FrequencyEntry::table_order);
        Self {
            entries,
            companion: None,
        }
    }

    /// Entries in ascending order
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// Iterate over entries in ascending order
    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyEntry> {
        self.entries.iter()
    }

    /// Number of entries, including a companion if present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The synthetic companion symbol added for single-symbol inputs
    pub fn companion(&self) -> Option<Symbol> {
        self.companion
    }

    /// Sum of probabilities over the entries that came from the input,
    /// which is 1.0 up to floating point error
    pub fn probability_sum(&self) -> f64 {
        self.entries
            .iter()
            .filter(|entry| entry.symbol != self.companion)
            .map(|entry| entry.probability)
            .sum()
    }

    /// Look up the probability of a symbol
    pub fn probability_of(&self, symbol: Symbol) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.symbol == Some(symbol))
            .map(|entry| entry.probability)
    }
}

impl<'a> IntoIterator for &'a SortedFrequencyList {
    type Item = &'a FrequencyEntry;
    type IntoIter = std::slice::Iter<'a, FrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Scans symbol streams and builds sorted frequency tables
#[derive(Debug, Clone, Default)]
pub struct FrequencyAnalyzer {
    config: CodecConfig,
}

impl FrequencyAnalyzer {
    /// Create an analyzer for the given code space
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Drain a symbol source and analyze everything it produced
    pub fn analyze_source<S: SymbolSource>(&self, source: &mut S) -> Result<SortedFrequencyList> {
        let symbols = source.read_all()?;
        self.analyze(&symbols)
    }

    /// Count, normalize and sort the symbols of `symbols`.
    ///
    /// Fails with [`HuffmanError::Configuration`] for an invalid config, with
    /// [`HuffmanError::EmptyInput`] when there is nothing to count and with
    /// [`HuffmanError::SymbolOutOfRange`] when a symbol lies outside the
    /// configured alphabet.
    pub fn analyze(&self, symbols: &[Symbol]) -> Result<SortedFrequencyList> {
        self.config.validate()?;
        if symbols.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let counts = self.count(symbols);
        let total = symbols.len() as f64;

        let mut entries = Vec::new();
        for (code_point, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let symbol = code_point as Symbol;
            if !self.config.contains_symbol(symbol) {
                return Err(HuffmanError::symbol_out_of_range(symbol, self.config.alphabet_size));
            }
            entries.push(FrequencyEntry::new(symbol, count as f64 / total));
        }

        let single = match entries.as_slice() {
            [only] => only.symbol,
            _ => None,
        };
        let mut companion = None;
        if let Some(symbol) = single {
            let partner = self.companion_for(symbol);
            log::warn!(
                "Single distinct symbol {} in input, adding companion {} with probability 0",
                symbol,
                partner
            );
            entries.push(FrequencyEntry::new(partner, 0.0));
            companion = Some(partner);
        }

        entries.sort_by(FrequencyEntry::table_order);

        log::debug!(
            "Frequency analysis: {} symbols, {} distinct entries",
            symbols.len(),
            entries.len()
        );

        Ok(SortedFrequencyList { entries, companion })
    }

    /// Next code point after `symbol`, wrapping at the end of the alphabet
    fn companion_for(&self, symbol: Symbol) -> Symbol {
        ((u16::from(symbol) + 1) % self.config.alphabet_size) as Symbol
    }

    fn count(&self, symbols: &[Symbol]) -> SymbolCounts {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel_counting && symbols.len() >= self.config.parallel_threshold {
                return count_parallel(symbols);
            }
        }
        count_sequential(symbols)
    }
}

fn count_sequential(symbols: &[Symbol]) -> SymbolCounts {
    let mut counts = [0u64; 256];
    for &symbol in symbols {
        counts[symbol as usize] += 1;
    }
    counts
}

#[cfg(feature = "parallel")]
fn count_parallel(symbols: &[Symbol]) -> SymbolCounts {
    use rayon::prelude::*;

    symbols
        .par_chunks(PARALLEL_CHUNK_SIZE)
        .map(count_sequential)
        .reduce(
            || [0u64; 256],
            |mut acc, shard| {
                for (total, count) in acc.iter_mut().zip(shard.iter()) {
                    *total += count;
                }
                acc
            },
        )
}
