use std::path::Path;

use anyhow::Context;
use procmodules::{read_modules_from, ModuleMap, ModuleRecord};
use serde::Serialize;

/// Read and parse the module list at `path`.
pub fn load_modules(path: &Path) -> anyhow::Result<ModuleMap> {
    read_modules_from(path)
        .with_context(|| format!("failed to read module list: {}", path.display()))
}

/// Serializable view of one module record.
#[derive(Debug, Serialize)]
pub struct ModuleEntry {
    pub name: String,
    pub size: u64,
    pub instances: u64,
    pub dependencies: Vec<String>,
    pub state: String,
    pub offset: String,
    pub tainted: String,
}

impl From<&ModuleRecord> for ModuleEntry {
    fn from(record: &ModuleRecord) -> Self {
        Self {
            name: record.name.clone(),
            size: record.mem_size,
            instances: record.instances,
            dependencies: record.dependencies.clone(),
            state: record.state.to_string(),
            offset: format!("0x{:016x}", record.offset),
            tainted: record.tainted.to_string(),
        }
    }
}

/// The lsmod "Used by" column: instance count followed by the dependency list.
pub fn used_by(record: &ModuleRecord) -> String {
    if record.dependencies.is_empty() {
        record.instances.to_string()
    } else {
        format!("{} {}", record.instances, record.dependencies.join(","))
    }
}
