//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use datsmith_dat::{CatalogFormat, ReplaceField};

use crate::settings::KeyChoice;

#[derive(Parser)]
#[command(name = "datsmith")]
#[command(about = "Merge, diff, split and repair ROM catalog (DAT) files", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Bucketing key: crc, md5, sha1, sha256, sha384, sha512, spamsum, machine or auto
    #[arg(short, long, global = true)]
    pub key: Option<KeyChoice>,

    /// Compare machine names case-sensitively
    #[arg(long, global = true)]
    pub case_sensitive: bool,

    /// Deduplicate buckets on all cores
    #[arg(long, global = true)]
    pub parallel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and how result catalogs are written.
#[derive(Args, Clone)]
pub(crate) struct OutputArgs {
    /// Output format (xml or json)
    #[arg(short, long, default_value = "xml")]
    pub format: CatalogFormat,

    /// Output directory (defaults to the settings file, then the current directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Two or more input catalogs, in priority order.
#[derive(Args, Clone)]
pub(crate) struct InputsArgs {
    /// Catalog files; order decides which copy of a shared item survives
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Combine catalogs into one, collapsing duplicates
    Merge {
        #[command(flatten)]
        inputs: InputsArgs,

        /// Name of the merged catalog
        #[arg(long, default_value = "merged")]
        name: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Collapse duplicates within each catalog
    Dedup {
        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare catalogs against each other
    Diff {
        #[command(subcommand)]
        mode: DiffMode,
    },

    /// Copy fields from matching items in base catalogs
    Replace {
        /// Let the last matching base win instead of the first
        #[arg(long)]
        reverse: bool,

        /// Base catalogs, searched in order
        #[arg(long, required = true)]
        base: Vec<PathBuf>,

        /// Fields to copy (e.g., name,digests,description)
        #[arg(long, required = true, value_delimiter = ',')]
        fields: Vec<ReplaceField>,

        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Partition each catalog into several
    Split {
        #[command(subcommand)]
        mode: SplitMode,
    },

    /// Print counts for each catalog
    Stats {
        #[command(flatten)]
        inputs: InputsArgs,

        /// Write CSV to stdout instead of a summary
        #[arg(long)]
        csv: bool,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum DiffMode {
    /// Items present in more than one catalog
    Dupes {
        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Items present in exactly one catalog
    NoDupes {
        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Items unique to each catalog, one output per input
    Individuals {
        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Each catalog minus everything in the catalogs before it
    Cascade {
        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Each catalog minus everything in the catalogs after it
    ReverseCascade {
        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Each catalog minus everything in one base catalog
    Against {
        /// Base catalog
        #[arg(long)]
        base: PathBuf,

        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand)]
pub(crate) enum SplitMode {
    /// By item extension into two lists plus everything else
    Extension {
        /// Extensions for the first output (e.g., bin,iso)
        #[arg(long, required = true, value_delimiter = ',')]
        a: Vec<String>,

        /// Extensions for the second output
        #[arg(long, required = true, value_delimiter = ',')]
        b: Vec<String>,

        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// By the strongest digest each item carries
    Hash {
        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// By the directory part of machine names
    Level {
        /// Rename machines to the last path segment
        #[arg(long)]
        short: bool,

        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// ROMs, disks and everything else
    Type {
        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Below and at-or-above a size in bytes
    Size {
        /// Size boundary in bytes
        #[arg(long)]
        radix: u64,

        #[command(flatten)]
        inputs: InputsArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,
}
