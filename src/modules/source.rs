use std::{fs::File, io::BufReader, path::Path};

use crate::{
    modules::{parse_modules, ModuleMap},
    Error, Result,
};

/// Path of the live kernel module list.
pub const PROC_MODULES: &str = "/proc/modules";

/// Read and parse the live module list from [`PROC_MODULES`].
///
/// # Errors
/// See [`read_modules_from`].
pub fn read_modules() -> Result<ModuleMap> {
    read_modules_from(PROC_MODULES)
}

/// Read and parse a module list from any path, e.g. a saved copy of `/proc/modules`.
///
/// The file is opened for the duration of this call only and is closed on every return path.
///
/// # Errors
/// Returns [`Error::SourceOpen`] if the file cannot be opened, [`Error::SourceRead`] if
/// reading fails, or the first line-level error wrapped in [`Error::Line`].
///
/// # Examples
///
/// ```rust,no_run
/// use procmodules::read_modules_from;
///
/// let modules = read_modules_from("/proc/modules")?;
/// for (name, record) in &modules {
///     println!("{name}: {} bytes, state {}", record.mem_size, record.state);
/// }
/// # Ok::<(), procmodules::Error>(())
/// ```
pub fn read_modules_from(path: impl AsRef<Path>) -> Result<ModuleMap> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::SourceOpen {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("reading module list from {}", path.display());
    parse_modules(BufReader::new(file), &path.display().to_string())
}
