use bumoapp::model::Collection;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bumo",
    bin_name = "bumo",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Manage the BUMO content store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data root holding data.json and uploads/ (defaults to $BUMO_DATA or the OS data dir)
    #[arg(long = "data-dir", global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Financial reports
    #[command(alias = "laporan")]
    Reports(RecordArgs),

    /// Articles
    #[command(alias = "artikel")]
    Articles(RecordArgs),

    /// Documentation entries (with image)
    #[command(alias = "dokumentasi")]
    Documentation(RecordArgs),

    /// Alumni profiles (with photo)
    Alumni(RecordArgs),

    /// Organization structure members (with photo)
    #[command(alias = "struktur")]
    Structure(RecordArgs),

    /// Remove unreferenced uploads and report missing ones
    Doctor,

    /// Show the resolved configuration
    Config,
}

impl Commands {
    /// The collection a record command targets, if any.
    pub fn collection(&self) -> Option<(Collection, &RecordAction)> {
        match self {
            Commands::Reports(args) => Some((Collection::Reports, &args.action)),
            Commands::Articles(args) => Some((Collection::Articles, &args.action)),
            Commands::Documentation(args) => Some((Collection::Documentation, &args.action)),
            Commands::Alumni(args) => Some((Collection::Alumni, &args.action)),
            Commands::Structure(args) => Some((Collection::Structure, &args.action)),
            Commands::Doctor | Commands::Config => None,
        }
    }
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    #[command(subcommand)]
    pub action: RecordAction,
}

#[derive(Subcommand, Debug)]
pub enum RecordAction {
    /// List records in stored order
    #[command(alias = "ls")]
    List,

    /// Show one record
    Get { id: String },

    /// Create a record
    Create(FieldArgs),

    /// Merge fields into a record
    Update {
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a record and its upload
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Field to set, as key=value (repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Image to attach (documentation, alumni, structure)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}
