//! Integration tests for reading module lists from files.
//!
//! The fixtures under `tests/samples/` are captured `/proc/modules` contents: one from an
//! unprivileged reader (offsets hidden as zero, tainted proprietary drivers) and one from
//! root (real offsets). Malformed fixtures check that errors carry the source and line.

use std::{io::Write, path::Path};

use procmodules::{
    dependents_of, read_modules_from, tainted_union, total_memory, Error, Field, LoadState,
    Tainted, PROC_MODULES,
};

fn sample(name: &str) -> String {
    format!("{}/tests/samples/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn desktop_fixture() {
    let modules = read_modules_from(sample("modules_desktop.txt")).unwrap();
    assert_eq!(modules.len(), 14);

    let nvidia = &modules["nvidia"];
    assert_eq!(nvidia.mem_size, 56_582_144);
    assert_eq!(nvidia.instances, 878);
    assert_eq!(nvidia.dependencies, vec!["nvidia_uvm", "nvidia_modeset"]);
    assert_eq!(
        nvidia.tainted,
        Tainted::PROPRIETARY_MODULE | Tainted::OOT_MODULE | Tainted::UNSIGNED_MODULE
    );
    assert_eq!(nvidia.tainted.to_string(), "(POE)");

    let usbcore = &modules["usbcore"];
    assert_eq!(usbcore.mem_size, 155_648);
    assert_eq!(usbcore.instances, 6);
    assert_eq!(usbcore.dependencies, vec!["ehci_hcd", "xhci_hcd"]);
    assert_eq!(usbcore.state, LoadState::Live);
    assert_eq!(usbcore.offset, 0);
    assert_eq!(usbcore.tainted, Tainted::OOT_MODULE);

    assert_eq!(modules["vboxdrv"].state, LoadState::Loading);
    assert_eq!(modules["loop"].state, LoadState::Unloading);
    assert!(modules["snd_hda_intel"].dependencies.is_empty());
    assert!(!modules["snd_hda_intel"].is_tainted());
}

#[test]
fn desktop_fixture_summaries() {
    let modules = read_modules_from(sample("modules_desktop.txt")).unwrap();

    assert_eq!(
        tainted_union(&modules),
        Tainted::PROPRIETARY_MODULE | Tainted::OOT_MODULE | Tainted::UNSIGNED_MODULE
    );
    assert_eq!(tainted_union(&modules).to_string(), "(POE)");

    let users: Vec<&str> = dependents_of(&modules, "snd_hda_intel")
        .into_iter()
        .map(|record| record.name.as_str())
        .collect();
    assert_eq!(users, vec!["snd", "snd_hda_codec", "snd_pcm"]);

    let expected: u64 = modules.values().map(|record| record.mem_size).sum();
    assert_eq!(total_memory(&modules), expected);
}

#[test]
fn root_fixture_offsets() {
    let modules = read_modules_from(sample("modules_root.txt")).unwrap();

    assert_eq!(modules.len(), 3);
    assert_eq!(modules["kvm"].offset, 0xffff_ffff_c0a0_0000);
    assert_eq!(modules["irqbypass"].dependencies, vec!["kvm"]);
    assert_eq!(tainted_union(&modules), Tainted::empty());
}

#[test]
fn fixture_lines_render_back_unchanged() {
    let path = sample("modules_desktop.txt");
    let text = std::fs::read_to_string(&path).unwrap();
    let modules = read_modules_from(&path).unwrap();

    for line in text.lines() {
        let name = line.split_whitespace().next().unwrap();
        assert_eq!(modules[name].to_string(), line);
    }
}

#[test]
fn bad_state_reports_source_and_line() {
    let path = sample("modules_bad_state.txt");
    let error = read_modules_from(&path).unwrap_err();

    match &error {
        Error::Line {
            source_name,
            line_number,
            line,
            ..
        } => {
            assert_eq!(source_name, &path);
            assert_eq!(*line_number, 2);
            assert!(line.starts_with("kvm "));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(matches!(error.root(), Error::UnknownState(state) if state == "Going"));
    assert_eq!(error.field(), Some(Field::State));
    assert!(!error.to_string().contains("kvm_intel 380928"));
}

#[test]
fn unknown_taint_letter() {
    let error = read_modules_from(sample("modules_unknown_taint.txt")).unwrap_err();

    assert!(matches!(error.root(), Error::UnknownTaintedFlag('Z')));
    assert_eq!(error.line_number(), Some(2));
    assert_eq!(error.field(), Some(Field::Tainted));
}

#[test]
fn temporary_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "nonexistent 0 0 - Live 0x0").unwrap();
    writeln!(file, "usbcore 0x26000 6 ehci_hcd,xhci_hcd Live 0x1a (O)").unwrap();
    file.flush().unwrap();

    let modules = read_modules_from(file.path()).unwrap();
    assert_eq!(modules["nonexistent"].tainted, Tainted::empty());
    assert_eq!(modules["usbcore"].mem_size, 155_648);
    assert_eq!(modules["usbcore"].offset, 26);
    assert_eq!(modules["usbcore"].dependencies, vec!["ehci_hcd", "xhci_hcd"]);
}

#[test]
fn trailing_malformed_line_discards_everything() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "good 1 0 - Live 0x0").unwrap();
    writeln!(file, "bad 1 0 - Live 0x0 (O) extra").unwrap();
    file.flush().unwrap();

    let error = read_modules_from(file.path()).unwrap_err();
    assert!(matches!(error.root(), Error::InvalidLine { fields: 8, .. }));
    assert_eq!(error.line_number(), Some(2));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let error = read_modules_from(dir.path().join("modules")).unwrap_err();
    assert!(matches!(error, Error::SourceOpen { .. }));
}

#[test]
fn live_proc_modules() {
    if !Path::new(PROC_MODULES).exists() {
        return;
    }

    match read_modules_from(PROC_MODULES) {
        Ok(modules) => {
            for (name, record) in &modules {
                assert_eq!(name, &record.name);
            }
        }
        // Some sandboxes expose the file but refuse to open it
        Err(Error::SourceOpen { .. }) => {}
        Err(error) => panic!("failed to parse {PROC_MODULES}: {error}"),
    }
}
