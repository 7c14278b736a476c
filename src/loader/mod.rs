// Copyright 2025 Eric Jingryd (tidynest@proton.me)
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

//! File loading with encoding fallback.
//!
//! This module sits between the file system and the parser:
//!
//! - **Decoding**: UTF-8 first (a leading BOM is dropped), then GBK
//! - **Terminal failures**: unreadable or undecodable files become a
//!   `ParseResult` with empty buckets and a single error
//! - **Sample fixture**: atomic write of a file covering every edge case
//! - **Watching**: blocking wait for modify events on a file
//!
//! # Example
//!
//! ```no_run
//! use kvparse::loader::load_file;
//!
//! let result = load_file("settings.kv");
//! for (key, value) in result.records.iter() {
//!     println!("{key} = {value}");
//! }
//! ```

use encoding_rs::{Encoding, GBK, UTF_8};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::{KvParser, ParseResult};

mod error;
pub mod sample;
pub mod watcher;

pub use error::LoadError;
pub use sample::{write_sample, SAMPLE_CONTENT};
pub use watcher::FileWatcher;

/// Text decoded from a file, plus the encoding that succeeded.
#[derive(Debug)]
pub struct Decoded {
    pub text: String,
    pub encoding: &'static Encoding,
}

/// Decodes raw bytes, trying UTF-8 and then GBK.
///
/// Returns `None` when neither encoding accepts the input. Malformed
/// sequences are never replaced with U+FFFD.
pub fn decode_bytes(bytes: &[u8]) -> Option<Decoded> {
    let without_bom = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(without_bom) {
        return Some(Decoded {
            text: text.to_string(),
            encoding: UTF_8,
        });
    }

    warn!("content is not valid UTF-8, retrying as GBK");
    GBK.decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| Decoded {
            text: text.into_owned(),
            encoding: GBK,
        })
}

/// Reads and decodes a file.
///
/// The file is read in one call, so the handle is released before
/// decoding starts, whatever the outcome.
///
/// # Errors
///
/// Returns `LoadError::Read` if the file cannot be read and
/// `LoadError::Decode` if it is neither UTF-8 nor GBK.
pub fn read_decoded(path: impl AsRef<Path>) -> Result<Decoded, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = decode_bytes(&bytes).ok_or_else(|| LoadError::Decode {
        path: path.to_path_buf(),
    })?;

    info!(
        path = %path.display(),
        encoding = decoded.encoding.name(),
        bytes = bytes.len(),
        "loaded file"
    );
    Ok(decoded)
}

/// Loads and parses a file with the default syntax.
pub fn load_file(path: impl AsRef<Path>) -> ParseResult {
    load_file_with(&KvParser::new(), path)
}

/// Loads and parses a file with the given parser
///
/// Read and decode failures do not panic or propagate: they produce a
/// terminal result whose only content is the error message.
pub fn load_file_with(parser: &KvParser, path: impl AsRef<Path>) -> ParseResult {
    match read_decoded(path) {
        Ok(decoded) => parser.parse_content(&decoded.text),
        Err(e) => {
            warn!(error = %e, "load failed");
            ParseResult::failed(e)
        }
    }
}

#[cfg(test)]
mod tests;
