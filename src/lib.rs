// Copyright 2025 bakri (tidynest@proton.me)
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

//! kvparse
//!
//! A parser for flat, line-oriented `key:value` configuration files that
//! never gives up on a buffer: every line is classified as a record, a
//! comment or an invalid line, and every defect becomes a diagnostic.
//!
//! # Format
//!
//! ```text
//! # comment (the marker must be in the first column)
//! host:localhost
//! key\:with\#reserved:value: may contain : and # freely
//! ```
//!
//! - **Blank lines** are empty comments
//! - **Indented `#`** is an invalid line, not a comment
//! - **Escapes** (`\x`) apply to keys only; values are verbatim
//! - **Duplicate keys** keep the first value and raise a diagnostic
//!
//! # Architecture
//!
//! - **`core`:** Types, line normalisation, classifier, record storage
//! - **`loader`:** File reading with UTF-8/GBK decoding, sample fixture, watcher
//! - **`report`:** Coloured text and JSON rendering
//!
//! # Examples
//!
//! ## Parsing a buffer
//!
//! ```
//! use kvparse::core::KvParser;
//!
//! let result = KvParser::new().parse_content("database:host1\ndatabase:host2");
//! assert_eq!(result.records.get("database"), Some("host1"));
//! assert_eq!(result.errors.len(), 1);
//! ```
//!
//! ## Parsing a file
//!
//! ```no_run
//! use kvparse::loader::load_file;
//!
//! let result = load_file("/tmp/settings.kv");
//! if result.has_errors() {
//!     for error in &result.errors {
//!         eprintln!("{error}");
//!     }
//! }
//! ```

pub mod core;
pub mod loader;
pub mod report;

// Re-export commonly used types for convenience
pub use crate::core::{Classification, KvParser, LineError, ParseResult, Records, Syntax};
pub use crate::loader::{load_file, LoadError};
