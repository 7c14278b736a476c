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

//! src/core/normalizer.rs
//!
//! Line-ending normalisation and positional line splitting

use std::borrow::Cow;

/// Rewrites CRLF and bare CR to LF
///
/// Returns the input unchanged (borrowed) when it contains no CR.
pub fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if !content.contains('\r') {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            // CRLF collapses to a single LF
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Splits normalised content into `(line_number, line)` pairs
///
/// Line numbers start at 1. Nothing is dropped: an empty buffer is one
/// empty line, and a trailing LF produces a trailing empty line.
pub fn split_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .collect()
}
