//! Sequential identifier allocation with cross-run persistence
//!
//! Every record-producing path shares one allocator, so ids stay unique
//! within a run. Allocation is in-memory; the counter is written to disk
//! only at batch boundaries, which bounds I/O during long traversals. A
//! crash between persists re-issues at most one batch's worth of ids on the
//! next run, which is acceptable because ids only need to be unique within
//! a single merged document.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted counter state
#[derive(Debug, Serialize, Deserialize)]
struct AllocatorState {
    next_id: u64,
}

/// Monotonic sequential id allocator backed by a small JSON state file
#[derive(Debug)]
pub struct IdAllocator {
    next_id: u64,
    state_path: PathBuf,
}

impl IdAllocator {
    /// Opens an allocator backed by the given state file
    ///
    /// A missing state file means a first run and starts the counter at 1.
    /// A corrupt or non-positive stored value also falls back to 1, with a
    /// warning; losing the counter degrades numbering, never the run.
    pub fn open(state_path: &Path) -> Self {
        let next_id = match std::fs::read_to_string(state_path) {
            Ok(content) => match serde_json::from_str::<AllocatorState>(&content) {
                Ok(state) if state.next_id >= 1 => state.next_id,
                Ok(state) => {
                    tracing::warn!(
                        "Persisted id counter {} is not positive; starting from 1",
                        state.next_id
                    );
                    1
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not parse id state at {}: {}; starting from 1",
                        state_path.display(),
                        e
                    );
                    1
                }
            },
            Err(_) => 1,
        };

        Self {
            next_id,
            state_path: state_path.to_path_buf(),
        }
    }

    /// Returns the current counter value and advances it by one
    pub fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Overrides the counter to `n`
    ///
    /// Values below 1 are ignored: an invalid override means "no override
    /// requested", not an error.
    pub fn set_start(&mut self, n: i64) {
        if n >= 1 {
            self.next_id = n as u64;
        }
    }

    /// The value the next `allocate` call will return
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Best-effort durable write of the counter
    ///
    /// Failure to persist is logged and swallowed: a lost counter degrades
    /// future runs but must never abort an in-progress fetch.
    pub fn persist(&self) {
        let state = AllocatorState {
            next_id: self.next_id,
        };
        let json = match serde_json::to_string_pretty(&state) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Could not serialize id state: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.state_path, json) {
            tracing::warn!(
                "Could not persist id counter to {}: {}",
                self.state_path.display(),
                e
            );
        }
    }
}
