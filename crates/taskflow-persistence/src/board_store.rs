//! Board store: one JSON blob per collection.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use taskflow_models::{Event, Notification, Project, TaskColumn, TeamMember};
use tracing::{debug, warn};

use crate::atomic::{atomic_write_json, read_optional};
use crate::columns::{Columns, ColumnsRef};
use crate::error::{PersistenceError, Result};

/// Version written into every blob envelope.
pub const SCHEMA_VERSION: u32 = 1;

/// Independently persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Tasks,
    Projects,
    Team,
    Events,
    Notifications,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Tasks,
        Collection::Projects,
        Collection::Team,
        Collection::Events,
        Collection::Notifications,
    ];

    /// Storage key of this collection.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Tasks => "tasks",
            Collection::Projects => "projects",
            Collection::Team => "team",
            Collection::Events => "events",
            Collection::Notifications => "notifications",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

/// Accepts both the versioned envelope and bare legacy documents.
#[derive(Deserialize)]
#[serde(untagged)]
enum Stored<T> {
    Versioned { version: u32, data: T },
    Legacy(T),
}

/// Everything read back from disk at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedBoard {
    pub columns: Vec<TaskColumn>,
    pub projects: Vec<Project>,
    pub team: Vec<TeamMember>,
    pub events: Vec<Event>,
    pub notifications: Vec<Notification>,
}

/// Manages persistence of board state.
///
/// Each collection is a single JSON document under the base path:
/// ```text
/// base_path/
/// ├── tasks.json          # {"To Do": [...], ...} keys in column order
/// ├── projects.json
/// ├── team.json
/// ├── events.json
/// └── notifications.json
/// ```
#[derive(Debug, Clone)]
pub struct BoardStore {
    base_path: PathBuf,
}

impl BoardStore {
    /// Creates a new BoardStore with the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the path of a collection's blob.
    pub fn path(&self, collection: Collection) -> PathBuf {
        self.base_path.join(format!("{}.json", collection.key()))
    }

    /// Reads a collection strictly.
    ///
    /// Returns `Ok(None)` when the blob does not exist and an error when it
    /// cannot be read, parsed, or carries an unknown version.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Option<T>> {
        let path = self.path(collection);
        let Some(raw) = read_optional(&path)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Stored<T>>(&raw)? {
            Stored::Versioned { version, data } if version == SCHEMA_VERSION => Ok(Some(data)),
            Stored::Versioned { version, .. } => Err(PersistenceError::UnsupportedVersion {
                path,
                found: version,
                expected: SCHEMA_VERSION,
            }),
            Stored::Legacy(data) => {
                debug!(collection = %collection, "read unversioned blob");
                Ok(Some(data))
            }
        }
    }

    /// Reads a collection, falling back to `default` on any problem.
    ///
    /// Never fails: missing blobs are silent, corrupt ones are logged.
    pub fn load_or_else<T, F>(&self, collection: Collection, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.load(collection) {
            Ok(Some(value)) => value,
            Ok(None) => default(),
            Err(e) => {
                warn!(collection = %collection, error = %e, "discarding unreadable blob");
                default()
            }
        }
    }

    /// Writes a collection atomically inside a versioned envelope.
    pub fn save<T: Serialize>(&self, collection: Collection, value: &T) -> Result<()> {
        let envelope = EnvelopeRef {
            version: SCHEMA_VERSION,
            data: value,
        };
        atomic_write_json(&self.path(collection), &envelope)?;
        debug!(collection = %collection, "saved blob");
        Ok(())
    }

    /// Writes the board columns as an object keyed by column name.
    pub fn save_columns(&self, columns: &[TaskColumn]) -> Result<()> {
        self.save(Collection::Tasks, &ColumnsRef(columns))
    }

    /// Reads the board columns strictly, in stored order.
    pub fn load_columns(&self) -> Result<Option<Vec<TaskColumn>>> {
        Ok(self.load::<Columns>(Collection::Tasks)?.map(|Columns(columns)| columns))
    }

    /// Loads every collection, using the default board and empty lists for
    /// anything missing or unreadable.
    pub fn load_board(&self) -> LoadedBoard {
        LoadedBoard {
            columns: self
                .load_or_else(Collection::Tasks, || Columns(TaskColumn::default_board()))
                .0,
            projects: self.load_or_else(Collection::Projects, Vec::new),
            team: self.load_or_else(Collection::Team, Vec::new),
            events: self.load_or_else(Collection::Events, Vec::new),
            notifications: self.load_or_else(Collection::Notifications, Vec::new),
        }
    }
}
