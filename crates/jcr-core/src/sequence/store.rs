//! Persistence for the monthly counter.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::counter::CounterState;
use crate::error::CounterError;

/// Load/store seam for [`CounterState`].
///
/// The counter is read once at batch start and written once at batch end.
/// Implementations do no locking; concurrent batches race on the store.
pub trait CounterStore {
    /// Load the stored state, `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<CounterState>, CounterError>;

    /// Replace the stored state.
    fn save(&self, state: &CounterState) -> Result<(), CounterError>;
}

/// Counter stored as a JSON object in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CounterError {
        CounterError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl CounterStore for JsonFileStore {
    fn load(&self) -> Result<Option<CounterState>, CounterError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No counter file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let state = serde_json::from_str(&content).map_err(|e| CounterError::Malformed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(state))
    }

    fn save(&self, state: &CounterState) -> Result<(), CounterError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string(state).map_err(|e| CounterError::Malformed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        fs::write(&self.path, content).map_err(|e| self.io_error(e))?;

        debug!("Saved counter to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store that counts writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RefCell<Option<CounterState>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new(state: Option<CounterState>) -> Self {
        Self {
            state: RefCell::new(state),
            writes: Cell::new(0),
        }
    }

    /// Current stored state.
    pub fn state(&self) -> Option<CounterState> {
        self.state.borrow().clone()
    }

    /// Number of completed `save` calls.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl CounterStore for MemoryStore {
    fn load(&self) -> Result<Option<CounterState>, CounterError> {
        Ok(self.state())
    }

    fn save(&self, state: &CounterState) -> Result<(), CounterError> {
        *self.state.borrow_mut() = Some(state.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
