//! Error taxonomy shared by both codecs.
//!
//! Header and format errors abort the job they occur in. I/O errors from the byte source or sink
//! are carried through unchanged.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// The input cannot be compressed by the selected algorithm (eg. an empty file for LZW).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A container header field is missing or out of its declared range.
    #[error("Corrupt header: {0}")]
    CorruptHeader(String),
    /// The payload no longer lines up with the code table or dictionary.
    #[error("Decoder out of sync: {0}")]
    Desync(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Turn an early end of file inside a header into a CorruptHeader error. Anything else that
    /// went wrong with the source stays an I/O error.
    pub fn from_header_read(e: io::Error, field: &str) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            CodecError::CorruptHeader(format!("truncated while reading {}", field))
        } else {
            CodecError::Io(e)
        }
    }

    /// Input the encoder would have refused, found while rebuilding from a header, means the
    /// header is bad.
    pub fn into_corrupt_header(self) -> Self {
        match self {
            CodecError::InvalidInput(msg) => CodecError::CorruptHeader(msg),
            other => other,
        }
    }
}
