use std::io;

use byteorder::ReadBytesExt;

use crate::error::{Error, Result};

pub(crate) fn map_io_err(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::UnexpectedEof
    } else {
        Error::Io(err)
    }
}

// Generates big-endian readers for multi-byte number types; a single byte
// has no endianness so `read_i8`/`read_u8` are written out separately below.
macro_rules! read_number_types {
    ($($typ:ident),+) => {
        paste::item! {
            $(pub(crate) fn [<read_ $typ>](&mut self) -> Result<$typ> {
                self.inner.[<read_ $typ>]::<byteorder::BigEndian>().map_err(map_io_err)
            })*
        }
    };
}

/// Thin big-endian byte reader NBT decoding is built on top of.
pub(crate) struct ByteReader<R: io::Read> {
    inner: R,
}

impl<R: io::Read> ByteReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner }
    }

    read_number_types!(i16, i32, i64, f32, f64);

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        self.inner.read_u8().map_err(map_io_err)
    }

    pub(crate) fn read_i8(&mut self) -> Result<i8> {
        self.inner.read_i8().map_err(map_io_err)
    }

    pub(crate) fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.read_exact(buf).map_err(map_io_err)
    }

    /// Reads a length-prefixed (`u16` big-endian) UTF-8 string.
    pub(crate) fn read_string(&mut self) -> Result<String> {
        let len = self.inner.read_u16::<byteorder::BigEndian>().map_err(map_io_err)?;
        let mut buffer = vec![0u8; len as usize];
        self.read_exact(&mut buffer)?;
        String::from_utf8(buffer).map_err(Error::from)
    }

    /// Reads a signed 32-bit big-endian length prefix, rejecting negative values.
    pub(crate) fn read_length(&mut self) -> Result<usize> {
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| Error::UnexpectedEof)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reads_big_endian_scalars() {
        let mut reader = ByteReader::new(Cursor::new(vec![0x00, 0x2a]));
        assert_eq!(reader.read_i16().unwrap(), 42);
    }

    #[test]
    fn reads_string_with_length_prefix() {
        let mut bytes = vec![0x00, 0x03];
        bytes.extend_from_slice(b"abc");
        let mut reader = ByteReader::new(Cursor::new(bytes));
        assert_eq!(reader.read_string().unwrap(), "abc");
    }

    #[test]
    fn zero_length_string_is_empty_not_panic() {
        let mut reader = ByteReader::new(Cursor::new(vec![0x00, 0x00]));
        assert_eq!(reader.read_string().unwrap(), "");
    }

    #[test]
    fn truncated_input_is_unexpected_eof() {
        let mut reader = ByteReader::new(Cursor::new(vec![0x00]));
        match reader.read_i16() {
            Err(Error::UnexpectedEof) => {}
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
    }

    #[test]
    fn negative_length_is_unexpected_eof() {
        let mut reader = ByteReader::new(Cursor::new(vec![0xff, 0xff, 0xff, 0xff]));
        match reader.read_length() {
            Err(Error::UnexpectedEof) => {}
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_string_is_bad_utf8() {
        let bytes = vec![0x00, 0x01, 0xff];
        let mut reader = ByteReader::new(Cursor::new(bytes));
        match reader.read_string() {
            Err(Error::BadUtf8) => {}
            other => panic!("expected BadUtf8, got {other:?}"),
        }
    }
}
