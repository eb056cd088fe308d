use std::io;

use crate::error::{Error, Result};
use crate::kind::NbtKind;
use crate::reader::ByteReader;
use crate::value::{Compound, NbtValue};

/// Recursive-descent decoder for the NBT tag-tree wire format.
///
/// A decoder instance holds no state across documents beyond its configured
/// depth limit; each call to [`NbtDecoder::decode`] is an independent parse.
pub struct NbtDecoder<R: io::Read> {
    reader: ByteReader<R>,
    max_depth: usize,
}

impl<R: io::Read> NbtDecoder<R> {
    /// Default cap on Compound/List nesting. Untrusted NBT input can be
    /// crafted to nest arbitrarily deep purely to exhaust the call stack;
    /// the reference decoder this is modeled on has no such guard.
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn new(reader: R) -> Self {
        Self::with_max_depth(reader, Self::DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(reader: R, max_depth: usize) -> Self {
        Self {
            reader: ByteReader::new(reader),
            max_depth,
        }
    }

    /// Decodes one top-level document: a root Compound tag plus its name.
    ///
    /// An empty root name (a zero-length string read) is reported as `None`,
    /// matching the reference decoder's null-collapsing convention for the
    /// root name specifically.
    pub fn decode(&mut self) -> Result<(Option<String>, Compound)> {
        let root_id = self.reader.read_u8()?;
        if root_id != NbtKind::Compound as u8 {
            return Err(Error::BadRootTag(root_id));
        }

        let name = self.reader.read_string()?;
        let name = if name.is_empty() {
            log::trace!("root NBT document has an empty name; reporting as absent");
            None
        } else {
            Some(name)
        };

        let root = self.decode_compound(0)?;
        Ok((name, root))
    }

    fn decode_compound(&mut self, depth: usize) -> Result<Compound> {
        self.check_depth(depth)?;
        let mut map = Compound::new();
        loop {
            let tag_id = self.reader.read_u8()?;
            if tag_id == NbtKind::End as u8 {
                break;
            }
            let kind = NbtKind::try_from(tag_id)?;
            let name = self.reader.read_string()?;
            let value = self.decode_payload(kind, depth)?;
            log::trace!("compound entry: {name:?} -> tag {kind}");
            // Duplicate keys: last write wins.
            map.insert(name, value);
        }
        Ok(map)
    }

    fn decode_list(&mut self, depth: usize) -> Result<Vec<NbtValue>> {
        self.check_depth(depth)?;
        let element_id = self.reader.read_u8()?;
        let length = self.reader.read_length()?;

        // A length of 0 produces an empty sequence regardless of the
        // element tag id, including an element id of 0 (End) — no bytes
        // for the (nonexistent) elements are consumed.
        if length == 0 {
            return Ok(Vec::new());
        }
        let element_kind = NbtKind::try_from(element_id)?;

        let mut values = Vec::with_capacity(length);
        for _ in 0..length {
            values.push(self.decode_payload(element_kind, depth + 1)?);
        }
        Ok(values)
    }

    fn decode_payload(&mut self, kind: NbtKind, depth: usize) -> Result<NbtValue> {
        Ok(match kind {
            NbtKind::End => {
                // Only reachable for a zero-length list of End elements;
                // decode_list short-circuits before calling us in that case.
                NbtValue::Compound(Compound::new())
            }
            NbtKind::Byte => NbtValue::Byte(self.reader.read_i8()?),
            NbtKind::Short => NbtValue::Short(self.reader.read_i16()?),
            NbtKind::Int => NbtValue::Int(self.reader.read_i32()?),
            NbtKind::Long => NbtValue::Long(self.reader.read_i64()?),
            NbtKind::Float => NbtValue::Float(self.reader.read_f32()?),
            NbtKind::Double => NbtValue::Double(self.reader.read_f64()?),
            NbtKind::ByteArray => {
                let length = self.reader.read_length()?;
                let mut bytes = Vec::with_capacity(length);
                for _ in 0..length {
                    bytes.push(self.reader.read_i8()?);
                }
                NbtValue::ByteArray(bytes)
            }
            NbtKind::String => NbtValue::String(self.reader.read_string()?),
            NbtKind::List => NbtValue::List(self.decode_list(depth + 1)?),
            NbtKind::Compound => NbtValue::Compound(self.decode_compound(depth + 1)?),
            NbtKind::IntArray => {
                let length = self.reader.read_length()?;
                let mut ints = Vec::with_capacity(length);
                for _ in 0..length {
                    ints.push(self.reader.read_i32()?);
                }
                NbtValue::IntArray(ints)
            }
            NbtKind::LongArray => {
                let length = self.reader.read_length()?;
                let mut longs = Vec::with_capacity(length);
                for _ in 0..length {
                    longs.push(self.reader.read_i64()?);
                }
                NbtValue::LongArray(longs)
            }
        })
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            Err(Error::DepthExceeded(self.max_depth))
        } else {
            Ok(())
        }
    }
}
