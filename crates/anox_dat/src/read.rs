//! Types for reading DAT archives

use binrw::BinRead;
use indexmap::IndexMap;
use std::{io::Cursor, path::Path};
use tracing::{debug, instrument, warn};

use crate::{
    compression::{region, StorageMethod},
    error::{Error, FileNotFoundError, Result},
    extract::materialize,
    types::{DatHeader, DatRecord, FORMAT_VERSION, HEADER_SIZE, MAGIC, RECORD_SIZE},
};

/// Structure representing a DAT file entry.
///
/// Entries only describe where their bytes live, the data itself stays in the archive buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatEntry {
    /// Name of the file, relative to the archive
    pub name: Box<str>,
    /// Raw name field. To be used when name was incorrectly decoded.
    pub name_raw: Box<[u8]>,
    /// Specifies where the data of the file starts
    pub start_offset: u32,
    /// Size of the file when extracted
    pub uncompressed_length: u32,
    /// Size of the file in the archive, `0` when stored as is
    pub compressed_length: u32,
    /// Unknown checksum carried over from the index
    pub checksum: u32,
}

impl DatEntry {
    /// Get the storage method used for this file
    pub fn storage_method(&self) -> StorageMethod {
        StorageMethod::from_compressed_length(self.compressed_length)
    }

    /// Whether the entry is stored as a zlib stream
    pub fn is_compressed(&self) -> bool {
        self.storage_method() == StorageMethod::Zlib
    }

    /// Number of bytes the entry occupies inside the archive
    pub fn stored_length(&self) -> u32 {
        match self.storage_method() {
            StorageMethod::None => self.uncompressed_length,
            StorageMethod::Zlib => self.compressed_length,
        }
    }
}

impl From<DatRecord> for DatEntry {
    fn from(record: DatRecord) -> Self {
        DatEntry {
            name: decode_name(&record.name).into(),
            name_raw: record.name.into(),
            start_offset: record.start_offset,
            uncompressed_length: record.uncompressed_length,
            compressed_length: record.compressed_length,
            checksum: record.checksum,
        }
    }
}

/// Decode a fixed width name field.
///
/// Non-ASCII bytes are dropped, then any trailing run of nulls and whitespace is trimmed along
/// with leading whitespace.
pub fn decode_name(raw: &[u8]) -> String {
    let ascii: String = raw
        .iter()
        .filter(|b| b.is_ascii())
        .map(|&b| b as char)
        .collect();

    ascii
        .trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
        .trim_start()
        .to_owned()
}

/// Decode the 16 byte header at the start of `bytes`
pub fn parse_header(bytes: &[u8]) -> Result<DatHeader> {
    if bytes.len() < HEADER_SIZE {
        return Err(Error::Truncated {
            needed: HEADER_SIZE,
            available: bytes.len(),
        });
    }

    let mut magic = [0; 4];
    magic.copy_from_slice(&bytes[..4]);
    if magic != MAGIC {
        return Err(Error::InvalidMagic(magic));
    }

    Ok(DatHeader::read(&mut Cursor::new(&bytes[..HEADER_SIZE]))?)
}

/// Decode every record of the index described by `header`, in on-disk order
pub fn decode_index(bytes: &[u8], header: &DatHeader) -> Result<Vec<DatEntry>> {
    if header.index_length as usize % RECORD_SIZE != 0 {
        return Err(Error::MisalignedIndex(header.index_length));
    }

    let index = region(
        bytes,
        header.index_offset as u64,
        header.index_length as u64,
    )?;

    index
        .chunks_exact(RECORD_SIZE)
        .map(|chunk| -> Result<DatEntry> {
            let entry = DatEntry::from(DatRecord::read(&mut Cursor::new(chunk))?);
            debug!(
                name = %entry.name,
                start = entry.start_offset,
                size = entry.uncompressed_length,
                compressed = entry.compressed_length,
                checksum = entry.checksum,
                "decoded record"
            );
            Ok(entry)
        })
        .collect()
}

/// DAT archive reader
///
/// The whole archive is held in memory, entries are materialized from that buffer on demand.
///
/// ```no_run
/// fn list_dat_contents(path: &std::path::Path) -> anox_dat::error::Result<()> {
///     let dat = anox_dat::DatArchive::open(path)?;
///
///     for entry in dat.entries() {
///         println!("{}: {} bytes", entry.name, entry.uncompressed_length);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct DatArchive {
    buffer: Vec<u8>,
    header: DatHeader,
    files: IndexMap<Box<str>, DatEntry>,
}

impl DatArchive {
    /// Read a DAT archive from a file on disk
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<DatArchive> {
        Self::new(std::fs::read(path.as_ref())?)
    }

    /// Parse an in-memory DAT archive collecting the files it contains.
    pub fn new(buffer: Vec<u8>) -> Result<DatArchive> {
        let header = parse_header(&buffer)?;
        debug!(?header, "parsed header");
        if header.version != FORMAT_VERSION {
            warn!(version = header.version, "unexpected format version");
        }

        let records = decode_index(&buffer, &header)?;

        let mut files = IndexMap::with_capacity(records.len());
        for entry in records {
            if let Some(previous) = files.insert(entry.name.clone(), entry) {
                warn!(name = %previous.name, "duplicate entry name, keeping the last one");
            }
        }

        Ok(DatArchive {
            buffer,
            header,
            files,
        })
    }

    /// The decoded archive header
    pub fn header(&self) -> &DatHeader {
        &self.header
    }

    /// The raw archive bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of entries contained in this DAT.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether this DAT archive contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over all the file names in this archive, in index order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_ref())
    }

    /// Returns an iterator over all the entries in this archive, in index order.
    pub fn entries(&self) -> impl Iterator<Item = &DatEntry> {
        self.files.values()
    }

    /// Total size of the files in the archive once extracted
    pub fn decompressed_size(&self) -> u64 {
        self.files
            .values()
            .map(|f| f.uncompressed_length as u64)
            .sum()
    }

    /// Get the index of a file entry by name, if it's present.
    #[inline(always)]
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.files.get_index_of(name)
    }

    /// Search for a file entry by name
    pub fn by_name(&self, name: &str) -> Result<&DatEntry> {
        self.files
            .get(name)
            .ok_or_else(|| Error::FileNotFound(FileNotFoundError::Name(name.to_owned())))
    }

    /// Get a contained file by index
    pub fn by_index(&self, file_number: usize) -> Result<&DatEntry> {
        self.files
            .get_index(file_number)
            .map(|(_, data)| data)
            .ok_or(Error::FileNotFound(FileNotFoundError::Index(file_number)))
    }

    /// Read the final contents of an entry, decompressing it if needed
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        materialize(&self.buffer, self.by_name(name)?)
    }

    /// Unwrap and return the archive bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}
