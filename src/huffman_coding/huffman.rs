use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::bitstream::bitbuffer::MAX_CODE_BITS;
use crate::error::{CodecError, Result};
use crate::tools::freq_count::FrequencyTable;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Leaves sort by byte value among equal weights. Internal nodes are numbered from here on up in
/// the order they are created, so they sort after every leaf and after older internal nodes.
const FIRST_INTERNAL_ORDER: u32 = 256;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub weight: u64,
    /// Tie-break key for nodes of equal weight.
    pub order: u32,
    pub node_data: NodeData,
}

impl Node {
    /// Create a leaf for a byte value
    pub fn leaf(byte: u8, weight: u32) -> Node {
        Node {
            weight: weight as u64,
            order: byte as u32,
            node_data: NodeData::Leaf(byte),
        }
    }

    /// Create a parent node. The left child takes the 0 edge.
    pub fn join(order: u32, left: Node, right: Node) -> Node {
        Node {
            weight: left.weight + right.weight,
            order,
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }
}

// Nodes are compared by (weight, order) only. Orders are unique within one tree.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.order == other.order
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    /// Sort Nodes by increasing weight and then increasing order key
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.order.cmp(&other.order))
    }
}

/// Build the Huffman tree for a frequency table. Returns None when no byte occurs at all. When
/// exactly one byte occurs the tree is that single leaf.
pub fn build_tree(freqs: &FrequencyTable) -> Option<Node> {
    // Min-heap of every byte that occurs
    let mut heap: BinaryHeap<Reverse<Node>> = freqs
        .present()
        .map(|(byte, freq)| Reverse(Node::leaf(byte, freq)))
        .collect();

    // ...then pare it down to one single node with child nodes.
    let mut order = FIRST_INTERNAL_ORDER;
    while heap.len() > 1 {
        let (Some(Reverse(left)), Some(Reverse(right))) = (heap.pop(), heap.pop()) else {
            break;
        };
        trace!(
            "Joining weights {} and {} as node {}",
            left.weight,
            right.weight,
            order
        );
        heap.push(Reverse(Node::join(order, left, right)));
        order += 1;
    }
    heap.pop().map(|Reverse(root)| root)
}

/// A single prefix code: the `depth` low bits of `bits`, most significant first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub depth: u8,
}

impl Code {
    /// The code as a string of '0' and '1' characters.
    pub fn to_bit_string(self) -> String {
        (0..self.depth)
            .rev()
            .map(|pos| if (self.bits >> pos) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}

/// Byte to code mapping, plus the reverse lookup the decoder matches against.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
    lookup: FxHashMap<(u8, u64), u8>,
    max_depth: u8,
}

impl CodeTable {
    /// Build the tree for a frequency table and derive its codes. Compressor and decompressor
    /// both come through here, so both always see the same codes for the same frequencies.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Result<Self> {
        let tree = build_tree(freqs);
        let table = Self::from_tree(tree.as_ref())?;
        debug!(
            "Built {} Huffman codes, longest is {} bits",
            table.len(),
            table.max_depth
        );
        Ok(table)
    }

    /// Walk a tree depth first (left edge 0, right edge 1) to collect the codes. A tree that is
    /// a lone leaf gets the one bit code "0".
    pub fn from_tree(root: Option<&Node>) -> Result<Self> {
        let mut table = CodeTable {
            codes: [None; 256],
            lookup: FxHashMap::default(),
            max_depth: 0,
        };
        match root {
            None => {}
            Some(Node {
                node_data: NodeData::Leaf(byte),
                ..
            }) => table.insert(*byte, Code { bits: 0, depth: 1 }),
            Some(node) => table.walk(node, 0, 0)?,
        }
        Ok(table)
    }

    /// Recursively walk the tree and record the path to every leaf.
    fn walk(&mut self, node: &Node, bits: u64, depth: u8) -> Result<()> {
        match &node.node_data {
            NodeData::Kids(left, right) => {
                if depth >= MAX_CODE_BITS {
                    return Err(CodecError::InvalidInput(format!(
                        "Huffman code longer than {} bits",
                        MAX_CODE_BITS
                    )));
                }
                self.walk(left, bits << 1, depth + 1)?;
                self.walk(right, (bits << 1) | 1, depth + 1)
            }
            NodeData::Leaf(byte) => {
                self.insert(*byte, Code { bits, depth });
                Ok(())
            }
        }
    }

    fn insert(&mut self, byte: u8, code: Code) {
        self.codes[byte as usize] = Some(code);
        self.lookup.insert((code.depth, code.bits), byte);
        self.max_depth = self.max_depth.max(code.depth);
    }

    pub fn get(&self, byte: u8) -> Option<Code> {
        self.codes[byte as usize]
    }

    /// Find the byte whose code is exactly the `depth` low bits of `bits`.
    pub fn lookup(&self, bits: u64, depth: u8) -> Option<u8> {
        self.lookup.get(&(depth, bits)).copied()
    }

    /// Length of the longest code.
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Number of bytes that have a code.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Total payload bits needed to encode an input with these frequencies.
    pub fn total_bits(&self, freqs: &FrequencyTable) -> u64 {
        freqs
            .present()
            .map(|(byte, freq)| self.get(byte).map_or(0, |c| c.depth as u64) * freq as u64)
            .sum()
    }

    /// Zero bits needed after the payload to reach a byte boundary.
    pub fn padding_bits(&self, freqs: &FrequencyTable) -> u8 {
        ((8 - self.total_bits(freqs) % 8) % 8) as u8
    }
}
