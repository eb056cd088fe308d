use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure mode raised by NBT decoding or region-file reading.
#[derive(Error, Debug)]
pub enum Error {
    /// The first byte of a document was not tag id 10 (Compound).
    #[error("expected root compound tag (id 10), found tag id {0}")]
    BadRootTag(u8),

    /// A tag id outside 0..=12 was encountered.
    #[error("unknown tag id {0}")]
    UnknownTag(u8),

    /// The input ended mid-field, or a length prefix was negative.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A String tag's bytes were not valid UTF-8.
    #[error("string field is not valid UTF-8")]
    BadUtf8,

    /// Compound/List nesting exceeded the decoder's configured maximum depth.
    #[error("exceeded maximum nesting depth of {0}")]
    DepthExceeded(usize),

    /// A chunk's compression byte was not 2 (zlib).
    #[error("unsupported chunk compression scheme {0}, only zlib (2) is supported")]
    BadCompression(u8),

    /// A chunk's zlib-compressed payload could not be inflated.
    #[error("failed to inflate compressed chunk data: {0}")]
    Inflate(io::Error),

    /// Propagated I/O failure from the underlying file or stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(_: std::string::FromUtf8Error) -> Self {
        Error::BadUtf8
    }
}
