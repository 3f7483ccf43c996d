use procmodules::{tainted_union, ModuleMap, TAINT_FLAGS};
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::load_modules,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct TaintedOutput {
    tainted: String,
    mask: u32,
    flags: Vec<FlagUsage>,
}

#[derive(Debug, Serialize)]
struct FlagUsage {
    letter: char,
    description: &'static str,
    modules: Vec<String>,
}

/// For every taint flag set by at least one module, the sorted names of those modules.
fn flag_usage(modules: &ModuleMap) -> Vec<FlagUsage> {
    TAINT_FLAGS
        .iter()
        .filter_map(|row| {
            let mut names: Vec<String> = modules
                .values()
                .filter(|record| record.tainted.contains(row.flag))
                .map(|record| record.name.clone())
                .collect();
            if names.is_empty() {
                return None;
            }
            names.sort();
            Some(FlagUsage {
                letter: row.letter,
                description: row.description,
                modules: names,
            })
        })
        .collect()
}

pub fn run(opts: &GlobalOptions) -> anyhow::Result<()> {
    let modules = load_modules(&opts.source)?;
    let union = tainted_union(&modules);

    let output = TaintedOutput {
        tainted: union.to_string(),
        mask: union.bits(),
        flags: flag_usage(&modules),
    };

    print_output(&output, opts, |output| {
        if output.flags.is_empty() {
            println!("No module taints the kernel.");
            return;
        }

        println!("Tainted: {} (mask {})", output.tainted, output.mask);
        println!();
        let mut tw = TabWriter::new(vec![
            ("Flag", Align::Left),
            ("Modules", Align::Right),
            ("Meaning", Align::Left),
        ]);
        for usage in &output.flags {
            tw.row(vec![
                usage.letter.to_string(),
                usage.modules.len().to_string(),
                usage.description.to_string(),
            ]);
        }
        tw.print();
    })
}
