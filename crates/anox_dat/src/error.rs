//! Error types that can be emitted from this library

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file is not a dat archive
    #[error("file is not a dat archive, found magic {0:?}")]
    #[diagnostic(help("dat archives start with the bytes \"ADAT\""))]
    InvalidMagic([u8; 4]),

    /// index length is not a whole number of records
    #[error("index length {0} is not a multiple of the 144 byte record size")]
    MisalignedIndex(u32),

    /// not enough bytes to read a required region
    #[error("archive is truncated, needed {needed} bytes but only {available} are available")]
    Truncated {
        /// bytes required by the region being read
        needed: usize,
        /// bytes actually present
        available: usize,
    },

    /// a region points outside of the archive
    #[error("region at offset {offset} with length {length} lies outside the {size} byte archive")]
    OutOfRange {
        /// start of the region
        offset: u64,
        /// length of the region
        length: u64,
        /// size of the loaded archive
        size: usize,
    },

    /// a compressed entry could not be inflated
    #[error("unable to decompress entry data")]
    Decompression(#[source] std::io::Error),

    /// unable to find requested file
    #[error("unable to find requested file")]
    FileNotFound(#[from] FileNotFoundError),

    /// no archive has been loaded into the session
    #[error("no archive is loaded")]
    NotLoaded,

    /// an entry name would escape the extraction directory
    #[error("entry name {0:?} is not a safe relative path")]
    UnsafePath(String),

    /// unable to write an extracted file
    #[error("unable to write {}", .path.display())]
    Write {
        /// destination that failed
        path: PathBuf,
        /// underlying cause
        #[source]
        source: std::io::Error,
    },

    /// a bulk extraction stopped at this entry
    #[error("extraction stopped at entry {name:?}")]
    Entry {
        /// name of the entry that failed
        name: String,
        /// why it failed
        #[source]
        source: Box<Error>,
    },
}

/// Error type to provide further information when a file has not been found
#[derive(Error, Diagnostic, Debug)]
#[error("unable to find requested file")]
pub enum FileNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
