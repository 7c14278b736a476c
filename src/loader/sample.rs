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

//! Sample file covering every classification rule
//!
//! Written atomically so a half-written fixture never exists on disk.

use atomic_write_file::AtomicWriteFile;
use std::{io::Write, path::Path};
use tracing::info;

use crate::loader::LoadError;

/// Fixture content: comments, escapes, duplicates, empty values,
/// look-alike keys and indented comment markers.
pub const SAMPLE_CONTENT: &str = "# normal comment
a:name
A:name
# the next comment is indented and therefore invalid
 # this comment has leading whitespace
路径:/home/test
adr:C:\\\\User\\\\admin

# escapes
key\\:with:colon:value1
key\\\\with:backslash:value2
key\\#with:hash:value3

# duplicate keys
database:host1
database:host2

# empty values are invalid
empty_value:
whitespace_value:\x20\x20\x20

# look-alike keys
server\\:port:8080
server:port:9090

# mixed
normal:value
#normal:commented_value
 # spaced:comment:illegal
";

/// Writes `SAMPLE_CONTENT` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns `LoadError::WriteFailed` if the atomic write cannot be
/// opened, written or committed.
pub fn write_sample(path: impl AsRef<Path>) -> Result<(), LoadError> {
    let path = path.as_ref();
    let fail = |message: String| LoadError::WriteFailed {
        path: path.to_path_buf(),
        message,
    };

    let mut file = AtomicWriteFile::options()
        .open(path)
        .map_err(|e| fail(format!("Failed to open for atomic write: {}", e)))?;

    file.write_all(SAMPLE_CONTENT.as_bytes())
        .map_err(|e| fail(format!("Failed to write content: {}", e)))?;

    file.commit()
        .map_err(|e| fail(format!("Failed to commit atomic write: {}", e)))?;

    info!(path = %path.display(), "sample written");
    Ok(())
}
