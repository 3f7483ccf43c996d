use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use procmodules::PROC_MODULES;

/// lsmod - show the kernel modules listed in /proc/modules
#[derive(Debug, Parser)]
#[command(name = "lsmod", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Module list to read instead of the live kernel list.
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "PROCMODULES_SOURCE",
        default_value = PROC_MODULES
    )]
    pub source: PathBuf,

    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List loaded modules (the default when no subcommand is given).
    List {
        /// Sort order of the listing.
        #[arg(long, value_enum, default_value_t = SortKey::Name)]
        sort: SortKey,

        /// Only show modules that taint the kernel.
        #[arg(long)]
        tainted: bool,
    },

    /// Show every column of one module and the modules that list it.
    Show {
        /// Module name.
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Summarize the taint flags reported by all modules.
    Tainted,

    /// Decode a taint value, either letters like "(OE)" or a mask like 0x3000.
    DecodeTaint {
        /// Parenthesized letters, or a decimal / 0x-prefixed hex bitmask.
        #[arg(value_name = "VALUE")]
        value: String,
    },
}

/// Sort order for `lsmod list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Alphabetical by module name.
    Name,
    /// Largest memory footprint first.
    Size,
    /// Most instances first.
    Instances,
}
