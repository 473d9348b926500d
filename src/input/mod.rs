use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

pub mod events;
pub mod reader;

pub use events::{CaloParticleEvent, LayerClusterEvent};
use reader::open_maybe_gz;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing event \"{0}\" in event mapping")]
    MissingEvent(String),
    #[error("event {event}: {field} has {found} entries, expected {expected}")]
    ShapeMismatch {
        event: String,
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Per-event records keyed by 1-based stringified event index.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct EventMap<T> {
    events: BTreeMap<String, T>,
}

impl<T> EventMap<T> {
    pub fn new() -> Self {
        Self {
            events: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn insert(&mut self, index: usize, record: T) {
        self.events.insert(event_key(index), record);
    }

    pub fn get(&self, key: &str) -> Result<&T, InputError> {
        self.events
            .get(key)
            .ok_or_else(|| InputError::MissingEvent(key.to_string()))
    }

    /// Walks events `"1"..="len"` in numeric order. The map's own key order
    /// is lexicographic ("10" before "2") and is never used for iteration.
    pub fn iter_ordered(&self) -> impl Iterator<Item = Result<(String, &T), InputError>> + '_ {
        (1..=self.events.len()).map(move |index| {
            let key = event_key(index);
            self.get(&key).map(|record| (key, record))
        })
    }
}

impl<T> Default for EventMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for EventMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut map = Self::new();
        for (i, record) in iter.into_iter().enumerate() {
            map.insert(i + 1, record);
        }
        map
    }
}

pub fn event_key(index: usize) -> String {
    index.to_string()
}

pub type ParticleEvents = EventMap<CaloParticleEvent>;
pub type ClusterEvents = EventMap<LayerClusterEvent>;

pub fn load_event_map<T: DeserializeOwned>(path: &Path) -> Result<EventMap<T>, InputError> {
    let reader = open_maybe_gz(path)?;
    let map: EventMap<T> = serde_json::from_reader(reader).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), events = map.len(), "loaded event mapping");
    Ok(map)
}

pub fn load_particles(path: &Path) -> Result<ParticleEvents, InputError> {
    let map: ParticleEvents = load_event_map(path)?;
    for entry in map.iter_ordered() {
        let (key, event) = entry?;
        event.validate(&key)?;
    }
    Ok(map)
}

pub fn load_clusters(path: &Path) -> Result<ClusterEvents, InputError> {
    let map: ClusterEvents = load_event_map(path)?;
    let keys = map
        .events
        .values()
        .flat_map(|e| e.fields.keys().map(String::as_str))
        .collect::<BTreeSet<_>>();
    tracing::debug!(path = %path.display(), ?keys, "layer-cluster payload fields");
    Ok(map)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
