use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use flate2::read::ZlibDecoder;

use crate::decoder::NbtDecoder;
use crate::error::{Error, Result};
use crate::reader::map_io_err;
use crate::value::Compound;

const SECTOR_SIZE: usize = 4096;
const SECTOR_COUNT: usize = 1024;
const ZLIB_COMPRESSION: u8 = 2;

/// One decoded chunk, with the region/slot metadata the reference merges
/// into the same mapping as the chunk's own NBT entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// The `(rx, rz)` region coordinates this chunk's region file reported.
    pub location: (i32, i32),
    /// Seconds-since-epoch of the chunk's last modification, from the sector table.
    pub timestamp: i32,
    pub x: u8,
    pub z: u8,
    /// The decoded root compound's entries.
    pub nbt: Compound,
}

/// Indexes a region (`.mca`-style) file and extracts/decodes individual chunks.
///
/// Seeking is stateful, so a single `RegionReader` is not safe to drive from
/// multiple threads concurrently; distinct readers opened on the same path
/// are independent.
pub struct RegionReader {
    file: File,
    location: (i32, i32),
    locations: [i32; SECTOR_COUNT],
    timestamps: [i32; SECTOR_COUNT],
}

impl RegionReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let location = derive_region_coords(path);

        let mut file = File::open(path)?;
        let mut header = [0u8; SECTOR_SIZE];

        file.read_exact(&mut header).map_err(map_io_err)?;
        let mut locations = [0i32; SECTOR_COUNT];
        BigEndian::read_i32_into(&header, &mut locations);

        file.read_exact(&mut header).map_err(map_io_err)?;
        let mut timestamps = [0i32; SECTOR_COUNT];
        BigEndian::read_i32_into(&header, &mut timestamps);

        log::debug!(
            "opened region file {path:?} at region coordinates {location:?}"
        );

        Ok(Self {
            file,
            location,
            locations,
            timestamps,
        })
    }

    /// Returns the decoded chunk at in-region coordinates `(x, z)`, or
    /// `None` if the sector table has no entry for that slot.
    pub fn chunk(&mut self, x: u8, z: u8) -> Result<Option<Chunk>> {
        let index = slot_index(x, z);
        let location = self.locations[index];
        if location == 0 {
            return Ok(None);
        }

        let sector_offset = (location >> 8) as u64;
        let offset = sector_offset * SECTOR_SIZE as u64;
        log::debug!("chunk ({x}, {z}) -> slot {index}, sector offset {sector_offset} (byte {offset})");

        self.file.seek(SeekFrom::Start(offset)).map_err(map_io_err)?;
        let mut header = [0u8; 5];
        self.file.read_exact(&mut header).map_err(map_io_err)?;
        let length = BigEndian::read_u32(&header[0..4]) as usize;
        let compression = header[4];

        if compression != ZLIB_COMPRESSION {
            log::warn!("chunk ({x}, {z}) uses unsupported compression scheme {compression}");
            return Err(Error::BadCompression(compression));
        }

        let data_len = length.checked_sub(1).ok_or(Error::UnexpectedEof)?;
        let mut compressed = vec![0u8; data_len];
        self.file.read_exact(&mut compressed).map_err(map_io_err)?;

        let mut inflated = Vec::new();
        ZlibDecoder::new(compressed.as_slice())
            .read_to_end(&mut inflated)
            .map_err(Error::Inflate)?;

        let mut decoder = NbtDecoder::new(Cursor::new(inflated));
        let (_, nbt) = decoder.decode()?;

        Ok(Some(Chunk {
            location: self.location,
            timestamp: self.timestamps[index],
            x,
            z,
            nbt,
        }))
    }

    /// Iterates every present chunk, `cx` outer / `cz` inner, matching the
    /// reference's `for cx in 0..32 { for cz in 0..32 { ... } }` order.
    pub fn chunks(&mut self) -> Chunks<'_> {
        Chunks {
            region: self,
            cx: 0,
            cz: 0,
        }
    }
}

fn slot_index(x: u8, z: u8) -> usize {
    (x as usize % 32) + (z as usize % 32) * 32
}

/// Extracts `(rx, rz)` from a `<prefix>.<rx>.<rz>.<ext>` filename and shifts
/// each field right by 5, preserving the reference's (likely accidental, but
/// faithfully reproduced) coarser grouping. See `DESIGN.md` for why this is
/// kept rather than "fixed".
fn derive_region_coords(path: &Path) -> (i32, i32) {
    let name = path.file_name().and_then(|f| f.to_str());
    if let Some(name) = name {
        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() >= 3 {
            if let (Ok(rx), Ok(rz)) = (parts[1].parse::<i32>(), parts[2].parse::<i32>()) {
                return (rx >> 5, rz >> 5);
            }
        }
    }
    log::warn!("could not derive region coordinates from filename {path:?}; defaulting to (0, 0)");
    (0, 0)
}

/// Lazy iterator over every present chunk in a [`RegionReader`].
pub struct Chunks<'a> {
    region: &'a mut RegionReader,
    cx: u16,
    cz: u16,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cx < 32 {
            while self.cz < 32 {
                let (x, z) = (self.cx as u8, self.cz as u8);
                self.cz += 1;
                match self.region.chunk(x, z) {
                    Ok(Some(chunk)) => return Some(Ok(chunk)),
                    Ok(None) => continue,
                    Err(e) => return Some(Err(e)),
                }
            }
            self.cz = 0;
            self.cx += 1;
        }
        None
    }
}
