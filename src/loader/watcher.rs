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

//! File system watcher for re-parsing on modification
//!
//! Uses OS-level file watching (Linux inotify) via the notify crate.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    path::Path,
    sync::mpsc::{channel, Receiver},
};
use tracing::debug;

use crate::loader::LoadError;

/// Watches one file and reports modify events
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
}

impl FileWatcher {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let watch_error = |source| LoadError::Watch {
            path: path.to_path_buf(),
            source,
        };
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )
        .map_err(watch_error)?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(watch_error)?;

        Ok(FileWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Checks for file modification events (non-blocking)
    pub fn check_for_changes(&self) -> bool {
        let mut modified = false;
        while let Ok(event_result) = self.rx.try_recv() {
            if let Ok(event) = event_result {
                modified |= is_modification(&event);
            }
        }
        modified
    }

    /// Blocks until the file is modified.
    ///
    /// Events queued behind the first modification are drained so one
    /// save triggers one re-parse.
    pub fn wait_for_change(&self) -> Result<(), LoadError> {
        loop {
            match self.rx.recv() {
                Ok(Ok(event)) if is_modification(&event) => {
                    debug!(?event.kind, "file modified");
                    self.check_for_changes();
                    return Ok(());
                }
                Ok(_) => continue,
                Err(_) => return Err(LoadError::WatcherDisconnected),
            }
        }
    }
}

fn is_modification(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
}
