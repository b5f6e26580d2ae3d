use anox_dat::{load_archive, EntrySummary};
use clap::Args;
use itertools::Itertools;
use miette::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use std::path::PathBuf;

#[derive(Args)]
pub struct ListArgs {
    /// An input DAT file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

fn format_entry(entry: &EntrySummary, width: usize) -> String {
    let storage = if entry.is_compressed {
        format!(
            "{}",
            "zlib".if_supports_color(Stream::Stdout, |t| t.yellow())
        )
    } else {
        format!(
            "{}",
            "raw ".if_supports_color(Stream::Stdout, |t| t.dimmed())
        )
    };

    format!(
        "{:>width$} {} {}",
        entry.uncompressed_length, storage, entry.name
    )
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let session =
            load_archive(&self.file).context(format!("path: {}", &self.file.display()))?;
        let entries = session.list_entries()?;

        let width = entries
            .iter()
            .map(|e| e.uncompressed_length.to_string().len())
            .max()
            .unwrap_or(1);

        println!("{}", entries.iter().map(|e| format_entry(e, width)).join("\n"));

        Ok(())
    }
}
