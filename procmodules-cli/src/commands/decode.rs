use anyhow::{bail, Context};
use procmodules::Tainted;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct DecodeOutput {
    tainted: String,
    mask: u32,
    flags: Vec<FlagEntry>,
}

#[derive(Debug, Serialize)]
struct FlagEntry {
    letter: char,
    bit: u32,
    description: &'static str,
}

/// Accept either the letter form `(OE)` or a numeric mask (decimal or `0x` hex).
fn parse_taint(value: &str) -> anyhow::Result<Tainted> {
    let value = value.trim();
    if value.starts_with('(') {
        return Tainted::decode(value).with_context(|| format!("invalid taint value {value:?}"));
    }

    let mask = match value.strip_prefix("0x") {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => value.parse::<u32>(),
    }
    .with_context(|| format!("invalid taint mask {value:?}"))?;

    match Tainted::from_bits(mask) {
        Some(tainted) => Ok(tainted),
        None => bail!(
            "taint mask 0x{mask:x} has unknown bits 0x{:x}",
            mask & !Tainted::all().bits()
        ),
    }
}

pub fn run(value: &str, opts: &GlobalOptions) -> anyhow::Result<()> {
    let tainted = parse_taint(value)?;

    let output = DecodeOutput {
        tainted: tainted.to_string(),
        mask: tainted.bits(),
        flags: tainted
            .entries()
            .map(|row| FlagEntry {
                letter: row.letter,
                bit: row.flag.bits().trailing_zeros(),
                description: row.description,
            })
            .collect(),
    };

    print_output(&output, opts, |output| {
        println!("{} = {} (0x{:x})", output.tainted, output.mask, output.mask);
        if output.flags.is_empty() {
            return;
        }
        println!();
        let mut tw = TabWriter::new(vec![
            ("Flag", Align::Left),
            ("Bit", Align::Right),
            ("Meaning", Align::Left),
        ]);
        for flag in &output.flags {
            tw.row(vec![
                flag.letter.to_string(),
                flag.bit.to_string(),
                flag.description.to_string(),
            ]);
        }
        tw.print();
    })
}
