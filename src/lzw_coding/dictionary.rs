use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{CodecError, Result};

/// Codes 0-255 are the single byte strings every dictionary starts with.
pub const SEED_CODES: u32 = 256;

/// Default dictionary memory budget, in characters.
pub const DEFAULT_BUDGET: usize = 100_000;

/// Counts the characters held by a dictionary. The seeds count as 256 characters. A new entry is
/// allowed only while the count is below the limit, and then adds its own length to the count.
/// Encoder and decoder charge identical lengths in identical order, so they freeze together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBudget {
    used: usize,
    limit: usize,
}

impl MemoryBudget {
    pub fn new(limit: usize) -> Self {
        Self {
            used: SEED_CODES as usize,
            limit,
        }
    }

    pub fn allows_growth(&self) -> bool {
        self.used < self.limit
    }

    fn charge(&mut self, len: usize) {
        self.used += len;
    }

    pub fn used(&self) -> usize {
        self.used
    }
}

/// Compression side: string -> code. A string is keyed by the code of its prefix plus its last
/// byte, which is all greedy matching ever asks for.
#[derive(Debug)]
pub struct EncodeDictionary {
    map: FxHashMap<(u32, u8), u32>,
    next_code: u32,
    budget: MemoryBudget,
}

impl EncodeDictionary {
    pub fn new(limit: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            next_code: SEED_CODES,
            budget: MemoryBudget::new(limit),
        }
    }

    /// Code of the string `code(prefix) + byte`, if it has one.
    pub fn lookup(&self, prefix: u32, byte: u8) -> Option<u32> {
        self.map.get(&(prefix, byte)).copied()
    }

    /// Add `code(prefix) + byte` (which is `len` characters long) at the next code, unless the
    /// budget is spent. Returns true if the entry was added. Running out of 32 bit codes is an
    /// InvalidInput error.
    pub fn insert(&mut self, prefix: u32, byte: u8, len: usize) -> Result<bool> {
        if !self.budget.allows_growth() {
            return Ok(false);
        }
        let next = self.next_code.checked_add(1).ok_or_else(|| {
            CodecError::InvalidInput(format!(
                "dictionary outgrew {} codes, use a smaller dictionary budget",
                u32::MAX
            ))
        })?;
        self.map.insert((prefix, byte), self.next_code);
        self.next_code = next;
        self.budget.charge(len);
        if !self.budget.allows_growth() {
            debug!(
                "Dictionary froze at {} codes ({} characters).",
                self.next_code,
                self.budget.used()
            );
        }
        Ok(true)
    }

    /// The code the next insert would be assigned, which is also the number of codes in use.
    pub fn next_code(&self) -> u32 {
        self.next_code
    }
}

/// Decompression side: code -> string.
#[derive(Debug)]
pub struct DecodeDictionary {
    entries: Vec<Vec<u8>>,
    budget: MemoryBudget,
}

impl DecodeDictionary {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: (0..SEED_CODES).map(|b| vec![b as u8]).collect(),
            budget: MemoryBudget::new(limit),
        }
    }

    pub fn get(&self, code: u32) -> Option<&[u8]> {
        self.entries.get(code as usize).map(|e| e.as_slice())
    }

    /// The code the next insert would be assigned.
    pub fn next_code(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Still under budget, and the next code still fits in 32 bits.
    pub fn can_grow(&self) -> bool {
        self.budget.allows_growth() && self.entries.len() < u32::MAX as usize
    }

    /// Add an entry at the next code, unless the budget is spent. Returns true if it was added.
    pub fn insert(&mut self, entry: Vec<u8>) -> bool {
        if !self.can_grow() {
            return false;
        }
        self.budget.charge(entry.len());
        self.entries.push(entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Bits needed to write every code of a dictionary holding `size` codes: ceil(log2(size)),
/// never less than 1.
pub fn code_width(size: usize) -> u32 {
    if size <= 2 {
        return 1;
    }
    usize::BITS - (size - 1).leading_zeros()
}
