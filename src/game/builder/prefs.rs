//! Persisted Tool State
//!
//! A single integer flag that survives between sessions: whether a building
//! was in progress when the tool last ran.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::BuildError;

/// Build lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ToolState {
    #[default]
    NoBuild = 0,
    BuildInitiated = 1,
}

impl ToolState {
    /// Decode a stored flag. Unknown values read as [`ToolState::NoBuild`].
    pub fn from_flag(flag: i32) -> Self {
        match flag {
            1 => ToolState::BuildInitiated,
            _ => ToolState::NoBuild,
        }
    }

    pub fn flag(self) -> i32 {
        self as i32
    }
}

/// Storage for the persisted flag.
pub trait ToolStateStore {
    /// The stored flag, or `None` if nothing was saved yet.
    fn load(&self) -> Option<i32>;

    fn save(&mut self, flag: i32) -> Result<(), BuildError>;
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// after giving one to the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    slot: Rc<Cell<Option<i32>>>,
}

impl MemoryPrefs {
    pub fn with_flag(flag: i32) -> Self {
        Self {
            slot: Rc::new(Cell::new(Some(flag))),
        }
    }

    pub fn get(&self) -> Option<i32> {
        self.slot.get()
    }
}

impl ToolStateStore for MemoryPrefs {
    fn load(&self) -> Option<i32> {
        self.slot.get()
    }

    fn save(&mut self, flag: i32) -> Result<(), BuildError> {
        self.slot.set(Some(flag));
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(rename = "BuildState")]
    build_state: i32,
}

/// JSON file store, `{ "BuildState": 1 }`.
#[derive(Debug, Clone)]
pub struct JsonPrefs {
    path: PathBuf,
}

impl JsonPrefs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ToolStateStore for JsonPrefs {
    fn load(&self) -> Option<i32> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no saved tool state");
                return None;
            }
        };
        match serde_json::from_str::<PrefsFile>(&data) {
            Ok(file) => Some(file.build_state),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "unreadable tool state");
                None
            }
        }
    }

    fn save(&mut self, flag: i32) -> Result<(), BuildError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&PrefsFile { build_state: flag })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
