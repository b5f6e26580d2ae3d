//! Builds synthetic DAT archives for tests

#![allow(dead_code)]

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::{write::ZlibEncoder, Compression};

pub const RECORD_SIZE: usize = 144;

struct PendingEntry {
    name: Vec<u8>,
    start_offset: u32,
    uncompressed_length: u32,
    compressed_length: u32,
    checksum: u32,
}

/// Lays out `ADAT` header, payloads, then the index, the way the game's archives are laid out
#[derive(Default)]
pub struct ArchiveBuilder {
    payload: Vec<u8>,
    entries: Vec<PendingEntry>,
    version: Option<u32>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    /// Store `data` as is
    pub fn raw(self, name: &str, data: &[u8]) -> Self {
        self.raw_name(name.as_bytes(), data)
    }

    /// Store `data` as is under a name given as raw bytes
    pub fn raw_name(mut self, name: &[u8], data: &[u8]) -> Self {
        let start_offset = (16 + self.payload.len()) as u32;
        self.payload.extend_from_slice(data);
        self.entries.push(PendingEntry {
            name: name.to_vec(),
            start_offset,
            uncompressed_length: data.len() as u32,
            compressed_length: 0,
            checksum: 0,
        });
        self
    }

    /// Store `data` as a zlib stream
    pub fn compressed(mut self, name: &str, data: &[u8]) -> Self {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        let stream = encoder.finish().unwrap();

        let start_offset = (16 + self.payload.len()) as u32;
        self.payload.extend_from_slice(&stream);
        self.entries.push(PendingEntry {
            name: name.as_bytes().to_vec(),
            start_offset,
            uncompressed_length: data.len() as u32,
            compressed_length: stream.len() as u32,
            checksum: 0x1234_5678,
        });
        self
    }

    /// Add a record whose bytes are arbitrary, for corrupt archives
    pub fn record(
        mut self,
        name: &str,
        start_offset: u32,
        uncompressed_length: u32,
        compressed_length: u32,
    ) -> Self {
        self.entries.push(PendingEntry {
            name: name.as_bytes().to_vec(),
            start_offset,
            uncompressed_length,
            compressed_length,
            checksum: 0,
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let index_offset = 16 + self.payload.len() as u32;
        let index_length = (self.entries.len() * RECORD_SIZE) as u32;

        let mut out = Vec::new();
        out.write_all(b"ADAT").unwrap();
        out.write_u32::<LittleEndian>(index_offset).unwrap();
        out.write_u32::<LittleEndian>(index_length).unwrap();
        out.write_u32::<LittleEndian>(self.version.unwrap_or(9)).unwrap();
        out.write_all(&self.payload).unwrap();

        for entry in self.entries {
            out.write_all(&encode_name(&entry.name)).unwrap();
            out.write_u32::<LittleEndian>(entry.start_offset).unwrap();
            out.write_u32::<LittleEndian>(entry.uncompressed_length)
                .unwrap();
            out.write_u32::<LittleEndian>(entry.compressed_length).unwrap();
            out.write_u32::<LittleEndian>(entry.checksum).unwrap();
        }

        out
    }
}

/// Null pad a name into the fixed 128 byte field
pub fn encode_name(name: &[u8]) -> [u8; 128] {
    let mut field = [0u8; 128];
    field[..name.len()].copy_from_slice(name);
    field
}
