use crate::error::Result;

use super::dictionary::EncodeDictionary;

/// The longest dictionary string matched so far.
#[derive(Clone, Copy, Debug)]
struct Match {
    code: u32,
    len: usize,
}

/// Greedy LZW matcher. Bytes go in one at a time, codes come out whenever the current match can
/// not be extended any further. The scan pass and the encode pass both run through this, so the
/// dictionary grows the same way in both.
#[derive(Debug)]
pub struct Matcher {
    dict: EncodeDictionary,
    current: Option<Match>,
    bytes_in: u64,
    codes_out: u64,
}

impl Matcher {
    pub fn new(budget: usize) -> Self {
        Self {
            dict: EncodeDictionary::new(budget),
            current: None,
            bytes_in: 0,
            codes_out: 0,
        }
    }

    /// Feed one byte. Returns the code of the previous match when `byte` ends it.
    pub fn push(&mut self, byte: u8) -> Result<Option<u32>> {
        self.bytes_in += 1;
        let Some(m) = self.current else {
            self.current = Some(Match {
                code: byte as u32,
                len: 1,
            });
            return Ok(None);
        };
        if let Some(code) = self.dict.lookup(m.code, byte) {
            self.current = Some(Match {
                code,
                len: m.len + 1,
            });
            return Ok(None);
        }
        // w + c is new: emit w, learn w + c (if there is room) and restart from c
        self.dict.insert(m.code, byte, m.len + 1)?;
        self.current = Some(Match {
            code: byte as u32,
            len: 1,
        });
        self.codes_out += 1;
        Ok(Some(m.code))
    }

    /// End of input. Returns the code of whatever is still matched.
    pub fn finish(&mut self) -> Option<u32> {
        let m = self.current.take()?;
        self.codes_out += 1;
        Some(m.code)
    }

    /// Codes in the dictionary so far, seeds included.
    pub fn dictionary_size(&self) -> usize {
        self.dict.next_code() as usize
    }

    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    pub fn codes_out(&self) -> u64 {
        self.codes_out
    }
}
