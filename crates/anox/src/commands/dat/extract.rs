use anox_dat::load_archive;
use clap::Args;
use miette::{miette, Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input DAT file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory, files are written to a subfolder named after the archive
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Only extract the entry with this name
    #[arg(short, long, value_name = "NAME")]
    entry: Option<String>,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        if !self.directory.is_dir() {
            return Err(miette!(
                help = "create the directory first",
                "output directory {} does not exist",
                self.directory.display()
            ));
        }

        let session =
            load_archive(&self.file).context(format!("path: {}", &self.file.display()))?;

        match &self.entry {
            Some(name) => {
                let path = session
                    .extract_one(name, &self.directory)
                    .context(format!("extracting {}", name))?;
                info!("extracted {}", path.display());
            }
            None => {
                let written = session
                    .extract_all(&self.directory)
                    .context(format!("extracting {}", &self.file.display()))?;
                info!("extracted {} files", written.len());
            }
        }

        Ok(())
    }
}
