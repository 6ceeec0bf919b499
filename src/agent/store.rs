//! The utility and visit-count tables, and their on-disk form.
//!
//! Each table is written wholesale to its own JSON file, as a list of `[key, value]` pairs.

use std::collections::HashMap;
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::agent::key::StateActionKey;
use crate::error::StoreError;

/// Where the two tables are stored
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorePaths {
    pub utilities: PathBuf,
    pub visits: PathBuf,
}

impl Default for StorePaths {
    fn default() -> Self {
        StorePaths {
            utilities: PathBuf::from("q_values.json"),
            visits: PathBuf::from("visit_counts.json"),
        }
    }
}

impl StorePaths {
    /// The default file names, placed in `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let default = Self::default();
        StorePaths {
            utilities: dir.as_ref().join(default.utilities),
            visits: dir.as_ref().join(default.visits),
        }
    }
}

/// Learned utilities and visit counts for state-action pairs.
/// Missing entries read as 0.0 and 0 respectively.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LearningStore {
    utilities: HashMap<StateActionKey, f64>,
    visits: HashMap<StateActionKey, u32>,
}

impl LearningStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utility(&self, key: &StateActionKey) -> f64 {
        self.get_utility(key).unwrap_or(0.0)
    }

    pub fn get_utility(&self, key: &StateActionKey) -> Option<f64> {
        self.utilities.get(key).copied()
    }

    pub fn set_utility(&mut self, key: StateActionKey, utility: f64) {
        self.utilities.insert(key, utility);
    }

    pub fn visits(&self, key: &StateActionKey) -> u32 {
        self.visits.get(key).copied().unwrap_or(0)
    }

    pub fn set_visits(&mut self, key: StateActionKey, visits: u32) {
        self.visits.insert(key, visits);
    }

    /// Counts one more visit to `key`, returning the new count
    pub fn increment_visits(&mut self, key: StateActionKey) -> u32 {
        let visits = self.visits.entry(key).or_insert(0);
        *visits += 1;
        *visits
    }

    /// Stand-in utility for pairs that have never been visited: the mean of every utility in the table.
    /// This ignores which state the utilities belong to.
    pub fn utility_estimate(&self) -> f64 {
        if self.utilities.is_empty() {
            0.0
        } else {
            self.utilities.values().sum::<f64>() / self.utilities.len() as f64
        }
    }

    pub fn num_utilities(&self) -> usize {
        self.utilities.len()
    }

    pub fn num_visited(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utilities.is_empty() && self.visits.is_empty()
    }

    pub fn utilities(&self) -> impl Iterator<Item = (&StateActionKey, f64)> {
        self.utilities.iter().map(|(key, utility)| (key, *utility))
    }

    pub fn visit_counts(&self) -> impl Iterator<Item = (&StateActionKey, u32)> {
        self.visits.iter().map(|(key, visits)| (key, *visits))
    }

    pub fn load(paths: &StorePaths) -> Result<Self, StoreError> {
        let store = LearningStore {
            utilities: read_table(&paths.utilities)?,
            visits: read_table(&paths.visits)?,
        };
        info!(
            "Loaded {} utilities and {} visit counts from {} and {}",
            store.utilities.len(),
            store.visits.len(),
            paths.utilities.display(),
            paths.visits.display()
        );
        Ok(store)
    }

    pub fn save(&self, paths: &StorePaths) -> Result<(), StoreError> {
        write_table(&paths.utilities, &self.utilities)?;
        write_table(&paths.visits, &self.visits)?;
        info!(
            "Saved {} utilities and {} visit counts",
            self.utilities.len(),
            self.visits.len()
        );
        Ok(())
    }
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn format_error(path: &Path, source: serde_json::Error) -> StoreError {
    StoreError::Format {
        path: path.display().to_string(),
        source,
    }
}

fn read_table<V: DeserializeOwned>(path: &Path) -> Result<HashMap<StateActionKey, V>, StoreError> {
    let file = fs::File::open(path).map_err(|err| io_error(path, err))?;
    let entries: Vec<(StateActionKey, V)> =
        serde_json::from_reader(BufReader::new(file)).map_err(|err| format_error(path, err))?;
    Ok(entries.into_iter().collect())
}

fn write_table<V: Serialize>(
    path: &Path,
    table: &HashMap<StateActionKey, V>,
) -> Result<(), StoreError> {
    let file = fs::File::create(path).map_err(|err| io_error(path, err))?;
    let mut writer = BufWriter::new(file);
    let entries: Vec<(&StateActionKey, &V)> = table.iter().collect();
    serde_json::to_writer(&mut writer, &entries).map_err(|err| format_error(path, err))?;
    writer.flush().map_err(|err| io_error(path, err))
}
