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

//! Human-readable and JSON rendering of parse results
//!
//! Records are printed as `KEY:VALUE` with reserved characters in the key
//! escaped, so a printed record line parses back to the same key.

use colored::*;
use std::fmt;

use crate::core::{ParseResult, Syntax};

/// Coloured multi-section report of a `ParseResult`
pub struct TextReport<'a> {
    result: &'a ParseResult,
    syntax: &'a Syntax,
}

impl<'a> TextReport<'a> {
    pub fn new(result: &'a ParseResult, syntax: &'a Syntax) -> Self {
        Self { result, syntax }
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str, count: usize) -> fmt::Result {
    writeln!(f, "\n{} ({})", title.bold(), count)
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;

        heading(f, "Records", result.records.len())?;
        for (key, value) in result.records.iter() {
            writeln!(
                f,
                "  {}{}{}",
                self.syntax.escape_key(key).cyan(),
                self.syntax.separator,
                value.green()
            )?;
        }

        heading(f, "Comments", result.comments.len())?;
        for comment in &result.comments {
            writeln!(f, "  {}", comment.dimmed())?;
        }

        heading(f, "Invalid lines", result.invalid_lines.len())?;
        for invalid in &result.invalid_lines {
            writeln!(
                f,
                "  {} {}",
                format!("line {}:", invalid.line).yellow(),
                invalid.raw
            )?;
        }

        heading(f, "Errors", result.errors.len())?;
        for error in &result.errors {
            writeln!(f, "  {} {}", "✗".red(), error)?;
        }

        Ok(())
    }
}

/// Renders the result as pretty-printed JSON.
///
/// Records keep their definition order as object members.
pub fn render_json(result: &ParseResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// One-line description of a single parsed input line
///
/// Used by the interactive loop, where every buffer is exactly one line.
pub fn describe_line(result: &ParseResult) -> String {
    if let Some((key, value)) = result.records.iter().next() {
        format!("{} key='{}', value='{}'", "record:".green(), key, value)
    } else if let Some(invalid) = result.invalid_lines.first() {
        let reason = result.errors.first().map(String::as_str).unwrap_or("");
        format!("{} {} ({})", "invalid:".red(), invalid.raw, reason)
    } else if let Some(comment) = result.comments.first() {
        format!("{} {}", "comment:".dimmed(), comment)
    } else {
        "nothing parsed".to_string()
    }
}
