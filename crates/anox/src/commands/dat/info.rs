use anox_dat::DatArchive;
use clap::Args;
use miette::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// An input DAT file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let dat = DatArchive::open(&self.file).context(format!("path: {}", &self.file.display()))?;
        let header = dat.header();
        let compressed = dat.entries().filter(|e| e.is_compressed()).count();

        println!(
            "{}",
            self.file
                .display()
                .if_supports_color(Stream::Stdout, |t| t.bold())
        );
        println!("  version:           {}", header.version);
        println!("  index offset:      {}", header.index_offset);
        println!("  index length:      {}", header.index_length);
        println!("  records:           {}", header.entry_count());
        println!(
            "  entries:           {} ({} compressed)",
            dat.len(),
            compressed
        );
        println!("  archive size:      {}", dat.as_bytes().len());
        println!("  decompressed size: {}", dat.decompressed_size());

        Ok(())
    }
}
