//! Huffman tree and two-queue construction
//!
//! [`TreeBuilder`] turns a [`SortedFrequencyList`] into a strict binary tree in
//! linear time. Leaves are seeded into a `source` queue in ascending order; merged
//! nodes are appended to a `target` queue, which stays ascending because every
//! merge is at least as heavy as the previous one. Each step pops two nodes with
//! the same merge-step rule: compare only the two queue fronts, the strictly
//! lighter front wins, ties go to `source`, an empty queue never wins.

use crate::config::CodecConfig;
use crate::entropy::frequency::{FrequencyAnalyzer, FrequencyEntry, SortedFrequencyList};
use crate::entropy::Symbol;
use crate::error::{HuffmanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::path::Path;

/// Node in the Huffman tree. Internal nodes own both children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Symbol and probability; internal nodes carry no symbol
    pub data: FrequencyEntry,
    /// Subtree reached with bit `0`
    pub left: Option<Box<TreeNode>>,
    /// Subtree reached with bit `1`
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    /// Create a leaf for a frequency table entry
    pub fn leaf(data: FrequencyEntry) -> Self {
        Self {
            data,
            left: None,
            right: None,
        }
    }

    /// Merge two subtrees under a new internal node
    pub fn internal(left: TreeNode, right: TreeNode) -> Self {
        let probability = left.probability() + right.probability();
        Self {
            data: FrequencyEntry::aggregate(probability),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// A leaf has a symbol and no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.data.symbol.is_some() && self.left.is_none() && self.right.is_none()
    }

    /// Symbol of this node if it is a leaf
    #[inline]
    pub fn leaf_symbol(&self) -> Option<Symbol> {
        if self.is_leaf() {
            self.data.symbol
        } else {
            None
        }
    }

    /// Probability of this subtree
    #[inline]
    pub fn probability(&self) -> f64 {
        self.data.probability
    }

    /// Left child
    pub fn left(&self) -> Option<&TreeNode> {
        self.left.as_deref()
    }

    /// Right child
    pub fn right(&self) -> Option<&TreeNode> {
        self.right.as_deref()
    }

    /// Child selected by a code bit: `false` is left, `true` is right
    #[inline]
    pub fn child(&self, bit: bool) -> Option<&TreeNode> {
        if bit {
            self.right()
        } else {
            self.left()
        }
    }

    fn count_leaves(&self) -> usize {
        match (self.left(), self.right()) {
            (Some(left), Some(right)) => left.count_leaves() + right.count_leaves(),
            _ => 1,
        }
    }

    fn max_depth(&self) -> usize {
        match (self.left(), self.right()) {
            (Some(left), Some(right)) => 1 + left.max_depth().max(right.max_depth()),
            _ => 0,
        }
    }

    /// Check the strict binary shape of this subtree and that no symbol
    /// appears on more than one leaf
    fn validate(&self) -> Result<()> {
        self.validate_into(&mut BTreeSet::new())
    }

    fn validate_into(&self, seen: &mut BTreeSet<Symbol>) -> Result<()> {
        match (self.left(), self.right(), self.data.symbol) {
            (None, None, Some(symbol)) => {
                if seen.insert(symbol) {
                    Ok(())
                } else {
                    Err(HuffmanError::malformed_tree(format!(
                        "symbol {} appears on more than one leaf",
                        symbol
                    )))
                }
            }
            (None, None, None) => Err(HuffmanError::malformed_tree("leaf without a symbol")),
            (Some(left), Some(right), None) => {
                left.validate_into(seen)?;
                right.validate_into(seen)
            }
            (Some(_), Some(_), Some(symbol)) => Err(HuffmanError::malformed_tree(format!(
                "internal node carries symbol {}",
                symbol
            ))),
            _ => Err(HuffmanError::malformed_tree("internal node with a single child")),
        }
    }
}

/// A complete Huffman tree, read-only once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuffmanTree {
    root: TreeNode,
}

impl HuffmanTree {
    /// Build the tree for a sorted frequency table
    pub fn build(frequencies: &SortedFrequencyList) -> Result<Self> {
        TreeBuilder::build(frequencies)
    }

    /// Analyze `symbols` and build their tree
    pub fn from_symbols(symbols: &[Symbol], config: &CodecConfig) -> Result<Self> {
        let frequencies = FrequencyAnalyzer::new(config.clone()).analyze(symbols)?;
        Self::build(&frequencies)
    }

    /// Wrap an existing root after checking its shape
    pub fn from_root(root: TreeNode) -> Result<Self> {
        root.validate()?;
        Ok(Self { root })
    }

    /// The root node
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Number of leaves (symbols with a code)
    pub fn leaf_count(&self) -> usize {
        self.root.count_leaves()
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        self.root.max_depth()
    }

    /// Serialize the tree as JSON for out-of-band transport
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| HuffmanError::serialization(format!("Failed to serialize tree: {}", e)))
    }

    /// Parse a tree from JSON and check its shape
    pub fn from_json(json: &str) -> Result<Self> {
        let tree: Self = serde_json::from_str(json)
            .map_err(|e| HuffmanError::serialization(format!("Failed to parse tree: {}", e)))?;
        tree.root.validate()?;
        Ok(tree)
    }

    /// Write the tree to a JSON sidecar file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a tree from a JSON sidecar file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Linear-time two-queue Huffman tree construction
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    /// Merge the entries of `frequencies` into a single tree.
    ///
    /// A one-entry table yields a single-leaf tree, which the encoding table
    /// and decoder reject as degenerate. A symbol listed twice fails with
    /// [`HuffmanError::MalformedTree`].
    pub fn build(frequencies: &SortedFrequencyList) -> Result<HuffmanTree> {
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut seen = BTreeSet::new();
        for symbol in frequencies.iter().filter_map(|entry| entry.symbol) {
            if !seen.insert(symbol) {
                return Err(HuffmanError::malformed_tree(format!(
                    "symbol {} listed more than once in the frequency table",
                    symbol
                )));
            }
        }

        let mut source: VecDeque<TreeNode> = frequencies.iter().copied().map(TreeNode::leaf).collect();
        let mut target: VecDeque<TreeNode> = VecDeque::with_capacity(frequencies.len());

        while source.len() + target.len() > 1 {
            let first = Self::pop_lightest(&mut source, &mut target)?;
            let second = Self::pop_lightest(&mut source, &mut target)?;
            log::trace!(
                "Merging {:?} ({}) with {:?} ({})",
                first.data.symbol,
                first.probability(),
                second.data.symbol,
                second.probability()
            );
            target.push_back(TreeNode::internal(first, second));
        }

        let root = source
            .pop_front()
            .or_else(|| target.pop_front())
            .ok_or(HuffmanError::EmptyInput)?;

        let tree = HuffmanTree { root };
        log::debug!(
            "Built Huffman tree: {} leaves, depth {}",
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }

    /// Pop the lighter of the two queue fronts. Ties favor `source`.
    fn pop_lightest(
        source: &mut VecDeque<TreeNode>,
        target: &mut VecDeque<TreeNode>,
    ) -> Result<TreeNode> {
        let take_target = match (source.front(), target.front()) {
            (Some(s), Some(t)) => t.probability() < s.probability(),
            (Some(_), None) => false,
            (None, _) => true,
        };
        let node = if take_target {
            target.pop_front()
        } else {
            source.pop_front()
        };
        node.ok_or_else(|| HuffmanError::malformed_tree("merge queues exhausted"))
    }
}
