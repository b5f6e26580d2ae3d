pub mod extract;
pub mod info;
pub mod list;

#[derive(clap::Subcommand)]
pub enum DatCommands {
    /// Show the header of a DAT file
    Info(info::InfoArgs),
    /// List the entries of a DAT file
    List(list::ListArgs),
    /// Extract a DAT file into a directory
    Extract(extract::ExtractArgs),
}

impl DatCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            DatCommands::Info(info) => info.handle(),
            DatCommands::List(list) => list.handle(),
            DatCommands::Extract(extract) => extract.handle(),
        }
    }
}
