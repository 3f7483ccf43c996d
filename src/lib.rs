// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # procmodules
//!
//! Parser for the Linux kernel's loaded module list, `/proc/modules`.
//!
//! Every line of the pseudo-file describes one loaded module:
//!
//! ```text
//! usbcore 155648 6 ehci_hcd,xhci_hcd, Live 0x0000000000000000 (O)
//! ```
//!
//! `procmodules` decodes each line into a [`ModuleRecord`] (name, memory size, instance count,
//! dependency list, [`LoadState`], offset and [`Tainted`] flags) and collects them into a
//! [`ModuleMap`] keyed by module name.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use procmodules::prelude::*;
//!
//! let modules = read_modules()?;
//! for (name, record) in &modules {
//!     if record.is_tainted() {
//!         println!("{name} taints the kernel: {}", record.tainted);
//!     }
//! }
//! # Ok::<(), procmodules::Error>(())
//! ```
//!
//! ### Parsing from Memory
//!
//! Any [`std::io::BufRead`] can serve as the source, which is how saved copies and test
//! fixtures are handled:
//!
//! ```rust
//! use procmodules::{parse_modules, LoadState};
//!
//! let modules = parse_modules("loop 40960 0 - Unloading 0x0\n".as_bytes(), "inline")?;
//! assert_eq!(modules["loop"].state, LoadState::Unloading);
//! # Ok::<(), procmodules::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`tainted`] - The 18 kernel taint flags and the `(LETTERS)` codec
//! - [`modules`] - Line parser, record builder and source handling
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! Parsing is fail-fast. The caller receives either the complete map or the first error,
//! never a truncated result:
//!
//! ```rust
//! use procmodules::{parse_modules, Error, Field};
//!
//! let input = "snd 1024 0 - Live 0x0\nsnd_pcm 0x1g 0 - Live 0x0\n";
//! match parse_modules(input.as_bytes(), "inline") {
//!     Err(error) => {
//!         assert_eq!(error.line_number(), Some(2));
//!         assert_eq!(error.field(), Some(Field::MemorySize));
//!         assert!(matches!(error.root(), Error::InvalidField { .. }));
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade. Nothing is printed unless
//! the application installs a logger.

pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and functions.
pub mod prelude;

/// Kernel taint flags and their textual encoding.
pub mod tainted;

/// Parsing of `/proc/modules` into module records.
pub mod modules;

/// `procmodules` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for all operations of this crate.
pub use error::Error;

pub use modules::{
    dependents_of, parse_modules, read_modules, read_modules_from, tainted_union, total_memory,
    Field, LoadState, ModuleMap, ModuleRecord, PROC_MODULES,
};
pub use tainted::{TaintFlag, Tainted, TAINT_FLAGS};
