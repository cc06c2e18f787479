//! Symbol to bitstring table derived from a Huffman tree

use crate::entropy::tree::{HuffmanTree, TreeNode};
use crate::entropy::Symbol;
use crate::error::{HuffmanError, Result};
use std::collections::BTreeMap;

/// Immutable mapping from each leaf symbol to its code.
///
/// Codes are bit sequences, `false` for a left branch and `true` for a right one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodingTable {
    codes: BTreeMap<Symbol, Vec<bool>>,
    max_code_length: usize,
}

impl EncodingTable {
    /// Walk the tree depth-first and record the path to every leaf.
    ///
    /// Fails with [`HuffmanError::DegenerateTree`] when the root is a leaf, since
    /// such a tree would assign the empty code.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let root = tree.root();
        if root.is_leaf() {
            return Err(HuffmanError::DegenerateTree);
        }

        let mut table = Self::default();
        let mut path = Vec::with_capacity(tree.depth());
        table.collect_codes(root, &mut path)?;

        log::debug!(
            "Encoding table: {} codes, lengths {}..={}",
            table.len(),
            table.min_code_length(),
            table.max_code_length
        );
        Ok(table)
    }

    fn collect_codes(&mut self, node: &TreeNode, path: &mut Vec<bool>) -> Result<()> {
        if let Some(symbol) = node.leaf_symbol() {
            self.max_code_length = self.max_code_length.max(path.len());
            if self.codes.insert(symbol, path.clone()).is_some() {
                return Err(HuffmanError::malformed_tree(format!(
                    "symbol {} reached by more than one code",
                    symbol
                )));
            }
            return Ok(());
        }

        match (node.left(), node.right()) {
            (Some(left), Some(right)) => {
                path.push(false);
                self.collect_codes(left, path)?;
                path.pop();

                path.push(true);
                self.collect_codes(right, path)?;
                path.pop();
                Ok(())
            }
            _ => Err(HuffmanError::malformed_tree(
                "internal node without two children",
            )),
        }
    }

    /// Code for a symbol
    pub fn get(&self, symbol: Symbol) -> Option<&[bool]> {
        self.codes.get(&symbol).map(Vec::as_slice)
    }

    /// Whether the symbol has a code
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.codes.contains_key(&symbol)
    }

    /// Code for a symbol as a string of `0` and `1` characters
    pub fn code_string(&self, symbol: Symbol) -> Option<String> {
        self.get(symbol)
            .map(|code| code.iter().map(|&bit| if bit { '1' } else { '0' }).collect())
    }

    /// Iterate over `(symbol, code)` pairs in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &[bool])> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code.as_slice()))
    }

    /// Number of symbols with a code
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Length of the longest code
    pub fn max_code_length(&self) -> usize {
        self.max_code_length
    }

    /// Length of the shortest code
    pub fn min_code_length(&self) -> usize {
        self.codes.values().map(Vec::len).min().unwrap_or(0)
    }

    /// Check that no code is a proper prefix of another
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Vec<bool>> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(a.as_slice()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodecConfig;
    use crate::entropy::frequency::{FrequencyEntry, SortedFrequencyList};

    fn table_for(symbols: &[u8]) -> EncodingTable {
        let tree = HuffmanTree::from_symbols(symbols, &CodecConfig::default()).unwrap();
        EncodingTable::from_tree(&tree).unwrap()
    }

    #[test]
    fn test_left_is_zero_right_is_one() {
        // Tree: root(c, (a, b)) as shown in the tree tests
        let list = SortedFrequencyList::from_entries(vec![
            FrequencyEntry::new(b'a', 0.25),
            FrequencyEntry::new(b'b', 0.25),
            FrequencyEntry::new(b'c', 0.5),
        ]);
        let tree = HuffmanTree::build(&list).unwrap();
        let table = EncodingTable::from_tree(&tree).unwrap();

        assert_eq!(table.code_string(b'c').as_deref(), Some("0"));
        assert_eq!(table.code_string(b'a').as_deref(), Some("10"));
        assert_eq!(table.code_string(b'b').as_deref(), Some("11"));
        assert_eq!(table.get(b'b'), Some(&[true, true][..]));
        assert_eq!(table.max_code_length(), 2);
        assert_eq!(table.min_code_length(), 1);
    }

    #[test]
    fn test_frequent_symbol_gets_shorter_code() {
        let table = table_for(b"aaabbc");
        assert!(table.get(b'a').unwrap().len() < table.get(b'c').unwrap().len());
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_only_present_symbols() {
        let table = table_for(b"hello");
        assert_eq!(table.len(), 4);
        assert!(table.contains(b'l'));
        assert!(!table.contains(b'z'));
        assert_eq!(table.code_string(b'z'), None);

        let symbols: Vec<_> = table.iter().map(|(symbol, _)| symbol).collect();
        assert_eq!(symbols, b"ehlo".to_vec());
    }

    #[test]
    fn test_single_symbol_has_one_bit_code() {
        let table = table_for(b"zzzz");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b'z').unwrap().len(), 1);
        assert_eq!(table.get(b'{').unwrap().len(), 1);
    }

    #[test]
    fn test_leaf_root_is_degenerate() {
        let list = SortedFrequencyList::from_entries(vec![FrequencyEntry::new(b'q', 1.0)]);
        let tree = HuffmanTree::build(&list).unwrap();
        assert!(matches!(
            EncodingTable::from_tree(&tree),
            Err(HuffmanError::DegenerateTree)
        ));
    }

    #[test]
    fn test_prefix_free_on_wide_alphabet() {
        let data: Vec<u8> = (0u32..2000).map(|i| ((i * i + 7 * i) % 120) as u8).collect();
        let table = table_for(&data);
        assert!(table.is_prefix_free());
        assert!(table.max_code_length() >= table.min_code_length());
    }
}
