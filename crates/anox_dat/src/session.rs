//! Session handling for front ends
//!
//! A [`Session`] is either unloaded or holds exactly one archive. Loading a different archive
//! replaces the current one, and a load that fails leaves the session unloaded.
//!
//! ```no_run
//! # fn doit() -> anox_dat::error::Result<()> {
//! let session = anox_dat::load_archive("anoxdata/models.dat")?;
//!
//! for entry in session.list_entries()? {
//!     println!("{} ({} bytes)", entry.name, entry.uncompressed_length);
//! }
//!
//! session.extract_all(std::path::Path::new("extracted"))?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    error::{Error, Result},
    extract::archive_basename,
    read::{DatArchive, DatEntry},
};

/// Listing information for a single entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    /// Name of the entry
    pub name: String,
    /// Size of the entry once extracted
    pub uncompressed_length: u32,
    /// Whether the entry is stored compressed
    pub is_compressed: bool,
}

impl From<&DatEntry> for EntrySummary {
    fn from(entry: &DatEntry) -> Self {
        EntrySummary {
            name: entry.name.to_string(),
            uncompressed_length: entry.uncompressed_length,
            is_compressed: entry.is_compressed(),
        }
    }
}

#[derive(Debug)]
struct Loaded {
    archive: DatArchive,
    basename: String,
}

/// The archive currently opened by a front end
#[derive(Debug, Default)]
pub struct Session {
    loaded: Option<Loaded>,
}

/// Open a new session with the archive at `path` loaded
pub fn load_archive(path: impl AsRef<Path>) -> Result<Session> {
    let mut session = Session::new();
    session.load(path)?;
    Ok(session)
}

impl Session {
    /// Create an unloaded session
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the archive at `path`, replacing any archive already loaded
    #[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.loaded = None;

        let path = path.as_ref();
        let archive = DatArchive::open(path)?;
        info!("loaded {} entries", archive.len());

        self.loaded = Some(Loaded {
            archive,
            basename: archive_basename(path),
        });
        Ok(())
    }

    /// Load an archive that is already in memory, extracting it under `basename`
    pub fn load_bytes(&mut self, buffer: Vec<u8>, basename: &str) -> Result<()> {
        self.loaded = None;

        let archive = DatArchive::new(buffer)?;
        self.loaded = Some(Loaded {
            archive,
            basename: basename.to_lowercase(),
        });
        Ok(())
    }

    /// Drop the loaded archive, if any
    pub fn close(&mut self) {
        self.loaded = None;
    }

    /// Whether an archive is currently loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn loaded(&self) -> Result<&Loaded> {
        self.loaded.as_ref().ok_or(Error::NotLoaded)
    }

    /// The loaded archive
    pub fn archive(&self) -> Result<&DatArchive> {
        Ok(&self.loaded()?.archive)
    }

    /// Folder name extracted files are nested under
    pub fn basename(&self) -> Result<&str> {
        Ok(&self.loaded()?.basename)
    }

    /// Every entry of the loaded archive, in index order
    pub fn list_entries(&self) -> Result<Vec<EntrySummary>> {
        Ok(self
            .loaded()?
            .archive
            .entries()
            .map(EntrySummary::from)
            .collect())
    }

    /// Extract one entry by name below `destination_root`
    pub fn extract_one(&self, name: &str, destination_root: &Path) -> Result<PathBuf> {
        let loaded = self.loaded()?;
        loaded
            .archive
            .extract_one(name, destination_root, &loaded.basename)
    }

    /// Extract every entry below `destination_root`, stopping at the first failure
    pub fn extract_all(&self, destination_root: &Path) -> Result<Vec<PathBuf>> {
        let loaded = self.loaded()?;
        loaded
            .archive
            .extract_all(destination_root, &loaded.basename)
    }
}
