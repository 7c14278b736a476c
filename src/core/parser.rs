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

//! src/core/parser.rs
//!
//! Key/value configuration parser
//!
//! This module turns a text buffer into a `ParseResult`. It handles:
//! - Line-ending normalisation (CRLF, CR)
//! - Comments (`#` in the very first column only) and blank lines
//! - Escaped characters inside keys (`\:`, `\#`, `\\`)
//! - Duplicate keys (first definition wins)
//! - Line numbers for every diagnostic
//!
//! # Architecture
//! Each line is classified independently by `classify_line` and folded
//! into the result. The only cross-line state is the set of keys already
//! accepted, used for duplicate detection.
//!
//! The parser holds nothing but its `Syntax`; results and diagnostics are
//! built per call, so one parser can be shared between threads.

use tracing::debug;

use crate::core::normalizer::{normalize_line_endings, split_lines};
use crate::core::types::{Classification, InvalidLine, LineError, ParseResult, Syntax};

/// Scanner state while splitting a line into key and value
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ScanMode {
    /// Accumulating the key; escapes are honoured
    Key,
    /// Separator found; the value starts at this byte offset
    Value { start: usize },
}

/// Line-oriented key/value parser
#[derive(Clone, Copy, Debug, Default)]
pub struct KvParser {
    syntax: Syntax,
}

impl KvParser {
    /// Creates a parser using the default `\`, `#`, `:` syntax.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom reserved characters.
    pub fn with_syntax(syntax: Syntax) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Parse a complete text buffer
    ///
    /// Every line ends up in exactly one of `records` (or counted as a
    /// duplicate), `comments` or `invalid_lines`. Defects never abort the
    /// parse; they are appended to `errors` in the order found.
    ///
    /// # Example
    /// ```
    /// use kvparse::core::KvParser;
    ///
    /// let result = KvParser::new().parse_content("# db\nhost:localhost\n");
    /// assert_eq!(result.records.get("host"), Some("localhost"));
    /// assert_eq!(result.comments, vec!["# db".to_string(), String::new()]);
    /// ```
    pub fn parse_content(&self, content: &str) -> ParseResult {
        let normalized = normalize_line_endings(content);
        let mut result = ParseResult::default();

        for (line_num, line) in split_lines(&normalized) {
            let classification = self.classify_line(line, line_num);
            debug!(line = line_num, %classification, "classified line");

            match classification {
                Classification::Kv { key, value } => {
                    result.kv_lines += 1;
                    if result.records.insert_first(key.clone(), value).is_err() {
                        result.errors.push(format!(
                            "duplicate key '{}' at line {}, first value retained",
                            key, line_num
                        ));
                    }
                }
                Classification::Comment(text) => result.comments.push(text),
                Classification::Invalid { raw, reason } => {
                    result.errors.push(reason.to_string());
                    result.invalid_lines.push(InvalidLine { line: line_num, raw });
                }
            }
        }

        result
    }

    /// Classify a single line
    ///
    /// Comment detection looks at the first character of the *untrimmed*
    /// line: `#` there is a comment, `#` after leading whitespace is an
    /// invalid line. Blank lines are empty comments.
    pub fn classify_line(&self, line: &str, line_num: usize) -> Classification {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Classification::Comment(String::new());
        }

        if line.starts_with(self.syntax.comment) {
            return Classification::Comment(trimmed.to_string());
        }

        if trimmed.starts_with(self.syntax.comment) {
            return Classification::Invalid {
                raw: line.to_string(),
                reason: LineError::IndentedComment { line: line_num },
            };
        }

        match self.extract_key_value(line, line_num) {
            Ok((key, value)) => Classification::Kv { key, value },
            Err(reason) => Classification::Invalid {
                raw: line.to_string(),
                reason,
            },
        }
    }

    /// Split one line into key and value
    ///
    /// Scans left to right in key mode. An escape character consumes the
    /// following character literally; an escape at the very end of the
    /// line has nothing to consume and is kept as a literal key character.
    /// The first unescaped separator switches to value mode, and the value
    /// is the rest of the line verbatim.
    ///
    /// # Errors
    /// - `MissingSeparator` if no unescaped separator exists
    /// - `EmptyValue` if the value is empty or whitespace only
    pub fn extract_key_value(
        &self,
        line: &str,
        line_num: usize,
    ) -> Result<(String, String), LineError> {
        let mut key = String::new();
        let mut mode = ScanMode::Key;
        let mut chars = line.char_indices();

        while let ScanMode::Key = mode {
            let Some((i, c)) = chars.next() else {
                break;
            };

            if c == self.syntax.escape {
                match chars.next() {
                    Some((_, escaped)) => key.push(escaped),
                    None => key.push(c),
                }
            } else if c == self.syntax.separator {
                mode = ScanMode::Value {
                    start: i + c.len_utf8(),
                };
            } else {
                key.push(c);
            }
        }

        let ScanMode::Value { start } = mode else {
            return Err(LineError::MissingSeparator { line: line_num });
        };

        let value = &line[start..];
        if value.trim().is_empty() {
            return Err(LineError::EmptyValue { line: line_num });
        }

        Ok((key, value.to_string()))
    }
}

/// Parse a buffer with the default syntax
///
/// Shorthand for `KvParser::new().parse_content(content)`.
pub fn parse_content(content: &str) -> ParseResult {
    KvParser::new().parse_content(content)
}
