use anyhow::bail;
use procmodules::dependents_of;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::{load_modules, ModuleEntry},
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct ShowOutput {
    #[serde(flatten)]
    module: ModuleEntry,
    taint_flags: Vec<TaintEntry>,
    listed_by: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TaintEntry {
    letter: char,
    description: &'static str,
}

pub fn run(name: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let modules = load_modules(&opts.source)?;
    let Some(record) = modules.get(name) else {
        bail!("module {name} is not loaded ({})", opts.source.display());
    };

    let output = ShowOutput {
        module: ModuleEntry::from(record),
        taint_flags: record
            .tainted
            .entries()
            .map(|row| TaintEntry {
                letter: row.letter,
                description: row.description,
            })
            .collect(),
        listed_by: dependents_of(&modules, name)
            .into_iter()
            .map(|r| r.name.clone())
            .collect(),
    };

    print_output(&output, opts, |output| {
        let module = &output.module;
        println!("Module:       {}", module.name);
        println!("Size:         {}", module.size);
        println!("Instances:    {}", module.instances);
        if module.dependencies.is_empty() {
            println!("Dependencies: -");
        } else {
            println!("Dependencies: {}", module.dependencies.join(", "));
        }
        println!("State:        {}", module.state);
        println!("Offset:       {}", module.offset);
        println!("Tainted:      {}", module.tainted);

        if !output.taint_flags.is_empty() {
            println!("\nTaint flags:");
            let mut tw = TabWriter::new(vec![("Flag", Align::Left), ("Meaning", Align::Left)])
                .indent("  ");
            for flag in &output.taint_flags {
                tw.row(vec![flag.letter.to_string(), flag.description.to_string()]);
            }
            tw.print();
        }

        if !output.listed_by.is_empty() {
            println!("\nListed by:    {}", output.listed_by.join(", "));
        }
    })
}
