//! A reader for Named Binary Tag (NBT) documents and the region (`.mca`)
//! container files that pack them, as used by a popular voxel sandbox game.
//!
//! The core is [`decoder::NbtDecoder`], a recursive-descent parser producing
//! a [`value::NbtValue`] tree, and [`region::RegionReader`], which locates
//! and decompresses the NBT payload for a chunk inside a region file.
//! Encoding, mutation of decoded trees, and game-semantic validation are out
//! of scope; see `DESIGN.md` for the full grounding and scope notes.

mod decoder;
mod kind;
mod reader;

pub mod error;
pub mod region;
pub mod value;

use std::io::{self, Cursor};

pub use decoder::NbtDecoder;
pub use error::{Error, Result};
pub use kind::NbtKind;
pub use region::{Chunk, RegionReader};
pub use value::{Compound, NbtValue};

/// Decodes one NBT document from an `impl io::Read` stream.
///
/// Equivalent to constructing an [`NbtDecoder`] directly; provided as the
/// conventional top-level entry point.
pub fn load<R: io::Read>(stream: R) -> Result<(Option<String>, Compound)> {
    NbtDecoder::new(stream).decode()
}

/// Decodes one NBT document from an in-memory byte slice.
pub fn unpack(bytes: &[u8]) -> Result<(Option<String>, Compound)> {
    load(Cursor::new(bytes))
}

/// Alias of [`unpack`], for callers used to a `loads`/`dumps`-style naming
/// convention from other serializer libraries.
pub fn loads(bytes: &[u8]) -> Result<(Option<String>, Compound)> {
    unpack(bytes)
}
