//! Entry storage and decompression handling.

use std::io::{self, Read};

use flate2::read::ZlibDecoder;
use tracing::instrument;

use crate::error::{Error, Result};

/// Identifies how an entry's bytes are stored inside the DAT file
///
/// The format has no explicit field for this. An entry with a compressed length of `0` is stored
/// as is, anything else is a zlib stream of exactly that many bytes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum StorageMethod {
    /// Stores the data as it is
    #[default]
    None,

    /// Compress the data using Zlib
    Zlib,
}

impl StorageMethod {
    /// Derive the storage method from a record's compressed length
    pub fn from_compressed_length(compressed_length: u32) -> Self {
        match compressed_length {
            0 => StorageMethod::None,
            _ => StorageMethod::Zlib,
        }
    }
}

/// Borrow `length` bytes starting at `start` out of the archive buffer
pub(crate) fn region(buffer: &[u8], start: u64, length: u64) -> Result<&[u8]> {
    let out_of_range = || Error::OutOfRange {
        offset: start,
        length,
        size: buffer.len(),
    };

    let end = start.checked_add(length).ok_or_else(out_of_range)?;
    if end > buffer.len() as u64 {
        return Err(out_of_range());
    }

    Ok(&buffer[start as usize..end as usize])
}

pub(crate) enum DatBlockReader<'a> {
    Raw(&'a [u8]),
    Compressed(Box<ZlibDecoder<&'a [u8]>>),
}

impl<'a> DatBlockReader<'a> {
    #[instrument(skip(buffer), level = "trace")]
    pub fn new(buffer: &'a [u8], start: u64, limit: u64, storage: StorageMethod) -> Result<Self> {
        let block = region(buffer, start, limit)?;

        Ok(match storage {
            StorageMethod::None => DatBlockReader::Raw(block),
            StorageMethod::Zlib => DatBlockReader::Compressed(Box::new(ZlibDecoder::new(block))),
        })
    }

    /// Read the remainder of the block, mapping inflate failures to [`Error::Decompression`]
    pub fn read_all(mut self, capacity: usize) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(capacity);
        match self.read_to_end(&mut data) {
            Ok(_) => Ok(data),
            Err(e) if matches!(self, DatBlockReader::Compressed(_)) => Err(Error::Decompression(e)),
            Err(e) => Err(e.into()),
        }
    }
}

impl Read for DatBlockReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            DatBlockReader::Raw(r) => r.read(buf),
            DatBlockReader::Compressed(r) => r.read(buf),
        }
    }

    fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        match self {
            DatBlockReader::Raw(r) => r.read_to_end(buf),
            DatBlockReader::Compressed(r) => r.read_to_end(buf),
        }
    }
}
