//! # procmodules Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and functions
//! of the library. Import it to get quick access to everything needed for reading the kernel
//! module list.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all procmodules operations
pub use crate::Error;

/// The result type used throughout procmodules
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Read the live module list, a saved copy of it, or any buffered reader
pub use crate::modules::{parse_modules, read_modules, read_modules_from, PROC_MODULES};

// ================================================================================================
// Records
// ================================================================================================

/// A decoded module line, its map and column identifiers
pub use crate::modules::{Field, LoadState, ModuleMap, ModuleRecord};

/// Summaries over a whole module map
pub use crate::modules::{dependents_of, tainted_union, total_memory};

/// Taint flags and their letter table
pub use crate::tainted::{TaintFlag, Tainted, TAINT_FLAGS};
