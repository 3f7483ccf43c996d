//! Parsing of the kernel's loaded module list.
//!
//! This module turns the line oriented `/proc/modules` pseudo-file into a [`ModuleMap`] of
//! [`ModuleRecord`]s keyed by module name.
//!
//! # Key Components
//!
//! - [`crate::modules::ModuleRecord`] - One decoded line
//! - [`crate::modules::LoadState`] - `Live`, `Loading` or `Unloading`
//! - [`crate::modules::Field`] - Column identifiers used in error reporting
//! - [`crate::modules::parse_modules`] - Parse any [`std::io::BufRead`] supplier
//! - [`crate::modules::read_modules_from`] - Open a path and parse it
//!
//! # Examples
//!
//! ```rust,no_run
//! use procmodules::modules::{read_modules, tainted_union};
//!
//! let modules = read_modules()?;
//! println!("{} modules loaded, kernel taint {}", modules.len(), tainted_union(&modules));
//! # Ok::<(), procmodules::Error>(())
//! ```

mod field;
mod map;
mod parser;
mod record;
mod source;
mod state;

pub use field::Field;
pub use map::{dependents_of, tainted_union, total_memory, ModuleMap};
pub use parser::parse_modules;
pub use record::ModuleRecord;
pub use source::{read_modules, read_modules_from, PROC_MODULES};
pub use state::LoadState;
