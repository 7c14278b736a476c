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

//! src/core/types.rs
//!
//! Core type definitions for key/value parsing
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Syntax`: The three reserved characters (escape, comment, separator)
//! - `LineError`: Why a single line was rejected
//! - `Classification`: What one line turned out to be
//! - `InvalidLine`: A rejected line with its number
//! - `ParseResult`: Everything collected from one buffer
//!
//! All result types implement `Serialize` so callers can persist a report.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::core::records::Records;

/// Reserved characters of the format
///
/// The defaults are `\` (escape), `#` (comment marker) and `:` (separator).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Syntax {
    /// Escapes the next character inside a key
    pub escape: char,
    /// Introduces a comment, only when it is the very first character
    pub comment: char,
    /// Divides key from value when unescaped
    pub separator: char,
}

impl Syntax {
    /// Returns true if `c` has to be escaped to appear literally in a key.
    pub fn is_reserved(&self, c: char) -> bool {
        c == self.escape || c == self.comment || c == self.separator
    }

    /// Escapes every reserved character in `key`
    ///
    /// The output re-parses to `key` when followed by the separator.
    /// A key starting with the comment marker gets escaped as well, so
    /// the rendered line is never mistaken for a comment.
    pub fn escape_key(&self, key: &str) -> String {
        let mut out = String::with_capacity(key.len());
        for c in key.chars() {
            if self.is_reserved(c) {
                out.push(self.escape);
            }
            out.push(c);
        }
        out
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            escape: '\\',
            comment: '#',
            separator: ':',
        }
    }
}

/// Structural defects of a single line
///
/// The `Display` output is the diagnostic text stored in
/// `ParseResult::errors`.
#[derive(Clone, Debug, Eq, Error, PartialEq, Serialize)]
pub enum LineError {
    #[error("line {line}: missing key/value separator")]
    MissingSeparator { line: usize },

    #[error("line {line}: empty value")]
    EmptyValue { line: usize },

    #[error("line {line}: comment marker preceded by whitespace")]
    IndentedComment { line: usize },
}

impl LineError {
    /// Line number the defect was found on (1-based)
    pub fn line(&self) -> usize {
        match self {
            LineError::MissingSeparator { line }
            | LineError::EmptyValue { line }
            | LineError::IndentedComment { line } => *line,
        }
    }
}

/// Result of classifying one line
///
/// Every line maps to exactly one variant. The payload is fixed per
/// variant so a record can never carry comment text or vice versa.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Classification {
    /// A key/value record. The value is verbatim, whitespace included.
    Kv { key: String, value: String },
    /// A comment (trimmed, marker included) or `""` for a blank line
    Comment(String),
    /// A rejected line: the raw text and the reason
    Invalid { raw: String, reason: LineError },
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Kv { key, value } => write!(f, "record: key='{}', value='{}'", key, value),
            Classification::Comment(text) => write!(f, "comment: {}", text),
            Classification::Invalid { raw, reason } => write!(f, "invalid: {} ({})", raw, reason),
        }
    }
}

/// A line that failed classification
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct InvalidLine {
    /// 1-based line number
    pub line: usize,
    /// The original, unmodified text of the line
    pub raw: String,
}

/// Everything collected from one buffer
///
/// `comments`, `invalid_lines` and the lines counted by `kv_lines`
/// together account for every line of the input exactly once.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ParseResult {
    /// Accepted records, in order of first definition
    pub records: Records,
    /// Comment texts in source order (blank lines are `""`)
    pub comments: Vec<String>,
    /// Rejected lines in source order
    pub invalid_lines: Vec<InvalidLine>,
    /// Diagnostics in the order they were raised
    pub errors: Vec<String>,
    /// Lines classified as records, duplicates included
    pub kv_lines: usize,
}

impl ParseResult {
    /// Builds the terminal result for a buffer that could not be read.
    pub fn failed(error: impl fmt::Display) -> Self {
        Self {
            errors: vec![error.to_string()],
            ..Self::default()
        }
    }

    /// Number of input lines this result accounts for
    pub fn line_count(&self) -> usize {
        self.comments.len() + self.invalid_lines.len() + self.kv_lines
    }

    /// Returns true if any diagnostic was raised.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
