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

//! src/core/mod.rs
//!
//! Core parsing logic
//!
//! This module contains the data structures and algorithms of the format:
//! - Type definitions for classifications, diagnostics and results
//! - Line-ending normalisation and line splitting
//! - The line classifier and key/value extractor
//! - Ordered record storage with first-wins duplicate handling
//!
//! Nothing here touches the file system, so all of it is unit tested
//! on in-memory buffers.

pub mod normalizer;
pub mod parser;
pub mod records;
pub mod types;

pub use parser::{parse_content, KvParser};
pub use records::Records;
pub use types::*;

#[cfg(test)]
mod tests;
