mod app;
mod commands;
mod output;

use clap::Parser;

use crate::app::{Cli, Command, SortKey};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Show procmodules info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("procmodules", level)
            .filter_module("lsmod", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        None => commands::list::run(SortKey::Name, false, &cli.global),
        Some(Command::List { sort, tainted }) => commands::list::run(*sort, *tainted, &cli.global),
        Some(Command::Show { name }) => commands::show::run(name, &cli.global),
        Some(Command::Tainted) => commands::tainted::run(&cli.global),
        Some(Command::DecodeTaint { value }) => commands::decode::run(value, &cli.global),
    }
}
