use std::collections::HashMap;

use crate::{modules::ModuleRecord, Tainted};

/// Parsed module list keyed by module name.
pub type ModuleMap = HashMap<String, ModuleRecord>;

/// Sum of the memory footprint of every module.
#[must_use]
pub fn total_memory(modules: &ModuleMap) -> u64 {
    modules
        .values()
        .fold(0u64, |total, record| total.saturating_add(record.mem_size))
}

/// Union of the taint flags reported by all modules.
#[must_use]
pub fn tainted_union(modules: &ModuleMap) -> Tainted {
    modules
        .values()
        .fold(Tainted::empty(), |union, record| union | record.tainted)
}

/// Records whose dependency column names `name`, sorted by module name.
#[must_use]
pub fn dependents_of<'a>(modules: &'a ModuleMap, name: &str) -> Vec<&'a ModuleRecord> {
    let mut dependents: Vec<&ModuleRecord> = modules
        .values()
        .filter(|record| record.depends_on(name))
        .collect();
    dependents.sort_by(|a, b| a.name.cmp(&b.name));
    dependents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::sample_modules;

    #[test]
    fn test_total_memory() {
        let modules = sample_modules();
        assert_eq!(total_memory(&modules), 155_648 + 65_536 + 69_632 + 40_960);
    }

    #[test]
    fn test_total_memory_saturates() {
        let mut modules = ModuleMap::new();
        for (name, size) in [("a", u64::MAX), ("b", 1)] {
            let record =
                ModuleRecord::parse_line(&format!("{name} {size} 0 - Live 0x0")).unwrap();
            modules.insert(record.name.clone(), record);
        }
        assert_eq!(total_memory(&modules), u64::MAX);
    }

    #[test]
    fn test_tainted_union() {
        let modules = sample_modules();
        assert_eq!(
            tainted_union(&modules),
            Tainted::OOT_MODULE | Tainted::UNSIGNED_MODULE
        );
        assert_eq!(tainted_union(&ModuleMap::new()), Tainted::empty());
    }

    #[test]
    fn test_dependents_of() {
        let modules = sample_modules();
        let names: Vec<&str> = dependents_of(&modules, "ehci_hcd")
            .into_iter()
            .map(|record| record.name.as_str())
            .collect();
        assert_eq!(names, vec!["usb_storage", "usbcore"]);
        assert!(dependents_of(&modules, "loop").is_empty());
    }
}
