//! Materializing entries and writing them to disk
//!
//! Extracted files are laid out as `<root>/<archive basename>/<entry name>`. Entry names are only
//! unique within their own archive, so every archive gets its own folder named after the archive
//! file, lower-cased and without its extension.

use std::{
    fs::{self, File},
    io::Write,
    path::{Component, Path, PathBuf},
};

use tracing::{info, instrument, warn};

use crate::{
    compression::DatBlockReader,
    error::{Error, Result},
    read::{DatArchive, DatEntry},
};

/// Upper bound on the buffer reserved up front from an entry's declared size
const MAX_PREALLOCATION: usize = 16 * 1024 * 1024;

/// Produce the final bytes of an entry, inflating it when it is stored compressed.
///
/// The declared uncompressed length is only used to size the output buffer. A compressed entry
/// that inflates to a different length is logged and returned as is.
pub fn materialize(buffer: &[u8], entry: &DatEntry) -> Result<Vec<u8>> {
    let expected = entry.uncompressed_length as usize;
    let data = DatBlockReader::new(
        buffer,
        entry.start_offset as u64,
        entry.stored_length() as u64,
        entry.storage_method(),
    )?
    .read_all(expected.min(MAX_PREALLOCATION))?;

    if data.len() != expected {
        warn!(
            name = %entry.name,
            expected,
            actual = data.len(),
            "decompressed length does not match the index"
        );
    }

    Ok(data)
}

/// Folder name used for an archive's extracted contents: the file stem, lower-cased
pub fn archive_basename(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn sanitize(value: &str) -> String {
    value.chars().filter(|c| !c.is_control()).collect()
}

/// Compute where an entry is written to.
///
/// Control characters picked up from garbage in the name field are dropped. Both `/` and `\` are
/// treated as separators. Names that are empty or that would leave the archive folder are rejected.
pub fn destination_path(
    destination_root: impl AsRef<Path>,
    archive_basename: &str,
    name: &str,
) -> Result<PathBuf> {
    let mut path = destination_root.as_ref().join(sanitize(archive_basename));
    let mut depth = 0;

    for part in name.split(['/', '\\']).map(sanitize) {
        if part.is_empty() || part == "." {
            continue;
        }

        let mut components = Path::new(&part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {
                path.push(&part);
                depth += 1;
            }
            _ => return Err(Error::UnsafePath(name.to_owned())),
        }
    }

    if depth == 0 {
        return Err(Error::UnsafePath(name.to_owned()));
    }

    Ok(path)
}

/// Write a single entry below `destination_root`, returning the path written.
///
/// Missing parent directories are created and an existing file is truncated.
#[instrument(skip(buffer, entry), fields(name = %entry.name), err)]
pub fn extract_to(
    buffer: &[u8],
    entry: &DatEntry,
    destination_root: &Path,
    archive_basename: &str,
) -> Result<PathBuf> {
    let path = destination_path(destination_root, archive_basename, &entry.name)?;
    let data = materialize(buffer, entry)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_owned(),
            source,
        })?;
    }

    info!("writing {}", path.display());
    File::create(&path)
        .and_then(|mut out| out.write_all(&data))
        .map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

/// Write every entry in order, stopping at the first failure.
///
/// Files written before the failure are left on disk. The error names the entry that failed.
pub fn extract_all<'a>(
    buffer: &[u8],
    entries: impl IntoIterator<Item = &'a DatEntry>,
    destination_root: &Path,
    archive_basename: &str,
) -> Result<Vec<PathBuf>> {
    entries
        .into_iter()
        .map(|entry| {
            extract_to(buffer, entry, destination_root, archive_basename).map_err(|e| {
                Error::Entry {
                    name: entry.name.to_string(),
                    source: Box::new(e),
                }
            })
        })
        .collect()
}

impl DatArchive {
    /// Extract a single entry by name
    pub fn extract_one(
        &self,
        name: &str,
        destination_root: &Path,
        archive_basename: &str,
    ) -> Result<PathBuf> {
        let entry = self.by_name(name)?;
        extract_to(self.as_bytes(), entry, destination_root, archive_basename)
    }

    /// Extract every entry of the archive
    pub fn extract_all(&self, destination_root: &Path, archive_basename: &str) -> Result<Vec<PathBuf>> {
        extract_all(
            self.as_bytes(),
            self.entries(),
            destination_root,
            archive_basename,
        )
    }
}
