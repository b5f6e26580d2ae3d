//! Base types for structure of DAT file.

use binrw::{BinRead, BinWrite};

/// Magic bytes every DAT archive starts with
pub const MAGIC: [u8; 4] = *b"ADAT";

/// Size of [`DatHeader`] on disk, magic included
pub const HEADER_SIZE: usize = 16;

/// Size of the fixed width name field inside a [`DatRecord`]
pub const NAME_SIZE: usize = 128;

/// Size of a single [`DatRecord`] on disk
pub const RECORD_SIZE: usize = NAME_SIZE + 4 * 4;

/// The only format version shipped with the game
pub const FORMAT_VERSION: u32 = 9;

/// DAT file header
///
/// Defines the header of the DAT file which always starts with "ADAT" and points at the index
/// stored at the end of the archive. All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(magic = b"ADAT", little)]
pub struct DatHeader {
    /// The offset from the beginning of the file where the index starts
    pub index_offset: u32,

    /// The size of the index in bytes, always a multiple of [`RECORD_SIZE`]
    pub index_length: u32,

    /// Format version, [`FORMAT_VERSION`] in every known archive
    pub version: u32,
}

impl DatHeader {
    /// Number of records described by the index
    pub fn entry_count(&self) -> usize {
        self.index_length as usize / RECORD_SIZE
    }
}

impl Default for DatHeader {
    fn default() -> Self {
        Self {
            index_offset: HEADER_SIZE as u32,
            index_length: Default::default(),
            version: FORMAT_VERSION,
        }
    }
}

/// DAT index record
///
/// Defines an entry in the DAT file
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct DatRecord {
    /// ASCII name of the entry, padded with nulls or garbage
    pub name: [u8; NAME_SIZE],

    /// The offset to the data for this record from the start of the file
    pub start_offset: u32,

    /// The size of the data for this record once extracted
    pub uncompressed_length: u32,

    /// The size of this record's data after compression, `0` when stored as is
    pub compressed_length: u32,

    /// Unknown checksum, never validated
    pub checksum: u32,
}

impl Default for DatRecord {
    fn default() -> Self {
        Self {
            name: [0; NAME_SIZE],
            start_offset: Default::default(),
            uncompressed_length: Default::default(),
            compressed_length: Default::default(),
            checksum: Default::default(),
        }
    }
}
