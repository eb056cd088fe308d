use std::fmt::{self, Display};

use crate::error::Error;

/// The 1-byte tag id that identifies an [`crate::value::NbtValue`] variant on the wire.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NbtKind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TryFrom<u8> for NbtKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => NbtKind::End,
            1 => NbtKind::Byte,
            2 => NbtKind::Short,
            3 => NbtKind::Int,
            4 => NbtKind::Long,
            5 => NbtKind::Float,
            6 => NbtKind::Double,
            7 => NbtKind::ByteArray,
            8 => NbtKind::String,
            9 => NbtKind::List,
            10 => NbtKind::Compound,
            11 => NbtKind::IntArray,
            12 => NbtKind::LongArray,
            other => return Err(Error::UnknownTag(other)),
        })
    }
}

impl Display for NbtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{self:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_valid_id() {
        for id in 0u8..=12 {
            assert!(NbtKind::try_from(id).is_ok());
        }
    }

    #[test]
    fn rejects_out_of_range_id() {
        match NbtKind::try_from(13) {
            Err(Error::UnknownTag(13)) => {}
            other => panic!("expected UnknownTag(13), got {other:?}"),
        }
        match NbtKind::try_from(255) {
            Err(Error::UnknownTag(255)) => {}
            other => panic!("expected UnknownTag(255), got {other:?}"),
        }
    }
}
