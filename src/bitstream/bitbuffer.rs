//! BitBuffer: the bit packing primitive shared by the Huffman and LZW codecs.
//!
//! Bits are kept packed most significant bit first in a byte vector. The writing side appends
//! codes and flushes every complete byte to a sink. The reading side appends whole payload bytes
//! and then peeks/consumes codes off the front.

use std::io::{self, Write};

/// Peek and append work on at most this many bits at a time.
pub const MAX_CODE_BITS: u8 = 64;

/// Ordered queue of pending bits.
#[derive(Debug, Default)]
pub struct BitBuffer {
    /// Packed bits. The first pending bit is at bit index `head`.
    bytes: Vec<u8>,
    /// Bit index of the first pending bit.
    head: usize,
    /// Bit index one past the last pending bit.
    tail: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a BitBuffer that can hold `size` bytes before it needs to reallocate.
    pub fn with_capacity(size: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(size),
            head: 0,
            tail: 0,
        }
    }

    /// Number of bits waiting in the buffer.
    pub fn available(&self) -> usize {
        self.tail - self.head
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Append the `depth` least significant bits of `code`, most significant of those first.
    pub fn append(&mut self, code: u64, depth: u8) {
        debug_assert!(depth <= MAX_CODE_BITS);
        let mut left = depth as u32;
        while left > 0 {
            // Start a fresh byte when the last one is full
            let offset = (self.tail % 8) as u32;
            if offset == 0 {
                self.bytes.push(0);
            }
            // Fill as much of the last byte as we can
            let room = 8 - offset;
            let take = room.min(left);
            let chunk = ((code >> (left - take)) & ((1_u64 << take) - 1)) as u8;
            let idx = self.bytes.len() - 1;
            self.bytes[idx] |= chunk << (room - take);
            self.tail += take as usize;
            left -= take;
        }
    }

    /// Append all 8 bits of a byte.
    pub fn push_byte(&mut self, byte: u8) {
        self.append(byte as u64, 8);
    }

    /// Return the next `n` bits as the low bits of a u64 without consuming them, or None if fewer
    /// than `n` bits are buffered.
    pub fn peek(&self, n: u8) -> Option<u64> {
        if n > MAX_CODE_BITS || (n as usize) > self.available() {
            return None;
        }
        let mut value = 0_u64;
        let mut pos = self.head;
        let mut left = n as u32;
        while left > 0 {
            let offset = (pos % 8) as u32;
            let room = 8 - offset;
            let take = room.min(left);
            let chunk = (self.bytes[pos / 8] as u64 >> (room - take)) & ((1_u64 << take) - 1);
            value = (value << take) | chunk;
            pos += take as usize;
            left -= take;
        }
        Some(value)
    }

    /// Drop the next `n` bits (or everything, if fewer are buffered).
    pub fn consume(&mut self, n: usize) {
        self.head += n.min(self.available());
        self.compact();
    }

    /// Write out every complete 8 bit group and remove it from the buffer. Returns the number of
    /// bytes written.
    pub fn flush_whole_bytes<W: Write>(&mut self, sink: &mut W) -> io::Result<usize> {
        let whole = self.available() / 8;
        if whole == 0 {
            return Ok(0);
        }
        if self.head % 8 == 0 {
            // Byte aligned, so the packed bytes can go out as they are
            let start = self.head / 8;
            sink.write_all(&self.bytes[start..start + whole])?;
            self.head += whole * 8;
        } else {
            let mut out = Vec::with_capacity(whole);
            for _ in 0..whole {
                // peek(8) can not fail here, we counted the whole bytes above
                out.push(self.peek(8).unwrap_or(0) as u8);
                self.head += 8;
            }
            sink.write_all(&out)?;
        }
        self.compact();
        Ok(whole)
    }

    /// Append zero bits until the buffered length is a multiple of 8. Returns how many were added.
    pub fn pad_to_byte_boundary(&mut self) -> u8 {
        let padding = ((8 - self.available() % 8) % 8) as u8;
        self.append(0, padding);
        padding
    }

    /// Drop whole bytes that have already been consumed.
    fn compact(&mut self) {
        let done = self.head / 8;
        if done == 0 {
            return;
        }
        if self.head == self.tail {
            self.bytes.clear();
            self.head = 0;
            self.tail = 0;
        } else if done * 2 >= self.bytes.len() {
            self.bytes.drain(..done);
            self.head -= done * 8;
            self.tail -= done * 8;
        }
    }
}

#[cfg(test)]
mod test {
    use super::BitBuffer;

    #[test]
    fn append_flush_test() {
        let mut bb = BitBuffer::new();
        bb.append(0b0010_0001, 8);
        bb.append(0b0010_0000, 8);
        let mut out = Vec::new();
        assert_eq!(bb.flush_whole_bytes(&mut out).unwrap(), 2);
        assert_eq!(out, "! ".as_bytes());
        assert!(bb.is_empty());
    }

    #[test]
    fn odd_width_test() {
        let mut bb = BitBuffer::new();
        bb.append(0b101, 3);
        bb.append(0b11, 2);
        bb.append(0b0001, 4);
        assert_eq!(bb.available(), 9);
        let mut out = Vec::new();
        bb.flush_whole_bytes(&mut out).unwrap();
        assert_eq!(out, vec![0b1011_1000]);
        assert_eq!(bb.available(), 1);
        assert_eq!(bb.pad_to_byte_boundary(), 7);
        bb.flush_whole_bytes(&mut out).unwrap();
        assert_eq!(out, vec![0b1011_1000, 0b1000_0000]);
    }

    #[test]
    fn pad_aligned_test() {
        let mut bb = BitBuffer::new();
        bb.push_byte(0xff);
        assert_eq!(bb.pad_to_byte_boundary(), 0);
        assert_eq!(bb.available(), 8);
    }

    #[test]
    fn peek_insufficient_test() {
        let mut bb = BitBuffer::new();
        bb.append(0b11, 2);
        assert_eq!(bb.peek(3), None);
        assert_eq!(bb.peek(2), Some(0b11));
        assert_eq!(bb.peek(1), Some(1));
    }

    #[test]
    fn peek_consume_test() {
        let mut bb = BitBuffer::new();
        bb.push_byte(0b0001_1011);
        assert_eq!(bb.peek(5), Some(3));
        bb.consume(5);
        assert_eq!(bb.peek(1), Some(0));
        bb.consume(1);
        assert_eq!(bb.peek(2), Some(3));
        bb.consume(2);
        assert!(bb.is_empty());
    }

    #[test]
    fn peek_across_bytes_test() {
        let mut bb = BitBuffer::new();
        bb.push_byte(0b0000_0001);
        bb.push_byte(0b1000_0000);
        bb.consume(7);
        assert_eq!(bb.peek(2), Some(0b11));
    }

    #[test]
    fn wide_code_test() {
        let mut bb = BitBuffer::new();
        let code = 0xdead_beef_0123_4567_u64;
        bb.append(1, 3);
        bb.append(code, 64);
        bb.consume(3);
        assert_eq!(bb.peek(64), Some(code));
    }

    #[test]
    fn unaligned_flush_test() {
        let mut bb = BitBuffer::new();
        bb.push_byte(0b1111_0000);
        bb.push_byte(0b1010_1010);
        bb.consume(4);
        let mut out = Vec::new();
        assert_eq!(bb.flush_whole_bytes(&mut out).unwrap(), 1);
        assert_eq!(out, vec![0b0000_1010]);
        assert_eq!(bb.available(), 4);
        assert_eq!(bb.peek(4), Some(0b1010));
    }

    #[test]
    fn long_stream_test() {
        // Many codes through a buffer that is flushed as it goes
        let mut bb = BitBuffer::new();
        let mut out = Vec::new();
        for i in 0..1000_u64 {
            bb.append(i % 512, 9);
            bb.flush_whole_bytes(&mut out).unwrap();
        }
        bb.pad_to_byte_boundary();
        bb.flush_whole_bytes(&mut out).unwrap();
        assert_eq!(out.len(), (1000 * 9 + 7) / 8);

        let mut rb = BitBuffer::new();
        out.iter().for_each(|&b| rb.push_byte(b));
        for i in 0..1000_u64 {
            assert_eq!(rb.peek(9), Some(i % 512));
            rb.consume(9);
        }
        assert!(rb.available() < 8);
    }
}
