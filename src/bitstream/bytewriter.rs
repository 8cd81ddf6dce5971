//! ByteWriter: buffered byte sink for the codecs.
//!
//! Supplies the writeByte / writeU32 primitives. Output is queued in a buffer and handed to the
//! sink in large writes.

use std::io::{self, Write};

const BUFFER_SIZE: usize = 64 * 1024;

/// Writes bytes to a sink, counting how many went out.
pub struct ByteWriter<W: Write> {
    /// Output buffer, written to the sink once it fills.
    output: Vec<u8>,
    /// Handle to the output stream
    writer: W,
    /// Total bytes accepted so far (written or still buffered).
    written: u64,
}

impl<W: Write> ByteWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(BUFFER_SIZE),
            writer,
            written: 0,
        }
    }

    /// Put a single byte on the stream.
    pub fn u8(&mut self, data: u8) -> io::Result<()> {
        self.output.push(data);
        self.written += 1;
        self.push_queue()
    }

    /// Put a big-endian u32 on the stream.
    pub fn u32(&mut self, data: u32) -> io::Result<()> {
        self.bytes(&data.to_be_bytes())
    }

    /// Put a slice of bytes on the stream.
    pub fn bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.output.extend_from_slice(data);
        self.written += data.len() as u64;
        self.push_queue()
    }

    /// Hand the buffer to the sink once it is full.
    fn push_queue(&mut self) -> io::Result<()> {
        if self.output.len() >= BUFFER_SIZE {
            self.writer.write_all(&self.output)?;
            self.output.clear();
        }
        Ok(())
    }

    /// Write out everything still buffered. Flush MUST be called before the sink is used again
    /// or data may be left in the buffer.
    pub fn flush(&mut self) -> io::Result<()> {
        if !self.output.is_empty() {
            self.writer.write_all(&self.output)?;
            self.output.clear();
        }
        self.writer.flush()
    }

    /// Count of bytes put on the stream so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl<W: Write> Write for ByteWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        ByteWriter::flush(self)
    }
}
