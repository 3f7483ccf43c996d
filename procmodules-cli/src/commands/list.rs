use std::cmp::Reverse;

use procmodules::ModuleRecord;
use serde::Serialize;

use crate::{
    app::{GlobalOptions, SortKey},
    commands::common::{load_modules, used_by, ModuleEntry},
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct ListOutput {
    count: usize,
    total_size: u64,
    modules: Vec<ModuleEntry>,
}

fn sort_records(records: &mut [&ModuleRecord], sort: SortKey) {
    match sort {
        SortKey::Name => records.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Size => records.sort_by_key(|r| (Reverse(r.mem_size), r.name.clone())),
        SortKey::Instances => records.sort_by_key(|r| (Reverse(r.instances), r.name.clone())),
    }
}

pub fn run(sort: SortKey, tainted_only: bool, opts: &GlobalOptions) -> anyhow::Result<()> {
    let modules = load_modules(&opts.source)?;

    let mut records: Vec<&ModuleRecord> = modules
        .values()
        .filter(|record| !tainted_only || record.is_tainted())
        .collect();
    sort_records(&mut records, sort);
    log::debug!("listing {} of {} modules", records.len(), modules.len());

    let output = ListOutput {
        count: records.len(),
        total_size: records
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.mem_size)),
        modules: records.iter().copied().map(ModuleEntry::from).collect(),
    };

    print_output(&output, opts, |output| {
        let mut tw = TabWriter::new(vec![
            ("Module", Align::Left),
            ("Size", Align::Right),
            ("Used by", Align::Left),
            ("State", Align::Left),
            ("Taint", Align::Left),
        ]);
        for record in &records {
            let taint = if record.is_tainted() {
                record.tainted.to_string()
            } else {
                String::new()
            };
            tw.row(vec![
                record.name.clone(),
                record.mem_size.to_string(),
                used_by(record),
                record.state.to_string(),
                taint,
            ]);
        }
        tw.print();
        log::info!("{} modules, {} bytes", output.count, output.total_size);
    })
}
