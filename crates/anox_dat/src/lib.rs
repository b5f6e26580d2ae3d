//! This library handles reading from and extracting **DAT** files used by *Anachronox*.
//!
//! # DAT Archive Format Documentation
//!
//! This crate provides utilities to read and extract data from the **DAT** archive format used by
//! the game *Anachronox*. The DAT format is a custom binary format that stores various game assets
//! within a single file. DAT files are typically identified with the `.dat` extension.
//!
//! ## File Structure
//!
//! A DAT file consists of a header, followed by the data blocks and an index describing every
//! entry. The index is usually at the end of the file.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "ADAT"                                            |
//! | 0x0004         | Index Offset           | 4 bytes: Offset to the index                               |
//! | 0x0008         | Index Length           | 4 bytes: Size of the index in bytes                        |
//! | 0x000C         | Version                | 4 bytes: Always 9                                          |
//!
//! ### Header
//!
//! - **Magic Number**: A 4-byte identifier set to the ASCII characters "ADAT".
//! - **Index Offset**: A 4-byte unsigned integer specifying the offset to the start of the index
//!   from the beginning of the file.
//! - **Index Length**: A 4-byte unsigned integer holding the size of the index. It is always a
//!   multiple of the 144 byte record size, dividing by 144 gives the number of entries.
//! - **Version**: A 4-byte unsigned integer. Every known archive uses `9`.
//!
//! ### Data Blocks
//!
//! After the header come the data blocks of each entry, stored either as is or as a zlib stream.
//! Their location is only known through the index.
//!
//! ### Index
//!
//! The index is a list of fixed size records, one per entry:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Name                   | 128 bytes: ASCII path, padded with nulls or garbage     |
//! | 0x0080         | Data Offset            | 4 bytes: Offset to the start of the entry data          |
//! | 0x0084         | Uncompressed Size      | 4 bytes: Size of the data when uncompressed             |
//! | 0x0088         | Compressed Size        | 4 bytes: Size of the zlib stream, `0` if stored as is   |
//! | 0x008C         | Checksum               | 4 bytes: Unknown algorithm, not validated               |
//!
//! ## Additional Information
//!
//! - **File Extension**: `.dat`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Storage Methods**:
//!   - Compressed size `0`: stored as is, read `Uncompressed Size` bytes
//!   - Compressed size `> 0`: zlib, read `Compressed Size` bytes and inflate them
//!

pub mod compression;
pub mod error;
pub mod extract;
pub mod read;
pub mod session;
pub mod types;

pub use compression::StorageMethod;
pub use read::{DatArchive, DatEntry};
pub use session::{load_archive, EntrySummary, Session};
