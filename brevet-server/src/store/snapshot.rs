//! JSON snapshot of the brevet store on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Brevet, BrevetId};

use super::error::StoreError;

/// A brevet together with its id, as listed by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBrevet {
    pub id: BrevetId,
    #[serde(flatten)]
    pub brevet: Brevet,
}

/// Contents of the store: the brevets and the id the next insert gets.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Contents {
    pub next_id: BrevetId,
    pub brevets: BTreeMap<BrevetId, Brevet>,
}

impl Default for Contents {
    fn default() -> Self {
        Self {
            next_id: BrevetId::new(1),
            brevets: BTreeMap::new(),
        }
    }
}

/// On-disk layout.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    next_id: BrevetId,
    brevets: Vec<StoredBrevet>,
}

/// Snapshot file location.
#[derive(Debug, Clone)]
pub(super) struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot.
    ///
    /// A missing file is an empty store; an unreadable one is an error, so
    /// that a corrupt file is never silently replaced.
    pub fn load(&self) -> Result<Contents, StoreError> {
        if !self.path.exists() {
            return Ok(Contents::default());
        }

        let json = std::fs::read_to_string(&self.path).map_err(|e| StoreError::Snapshot {
            message: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let file: SnapshotFile = serde_json::from_str(&json).map_err(|e| StoreError::Snapshot {
            message: format!("failed to parse {}: {}", self.path.display(), e),
        })?;

        let brevets: BTreeMap<BrevetId, Brevet> = file
            .brevets
            .into_iter()
            .map(|stored| (stored.id, stored.brevet))
            .collect();

        // Never hand out an id that is already taken.
        let next_id = match brevets.last_key_value() {
            Some((&max_id, _)) => file.next_id.max(max_id.next()),
            None => file.next_id,
        };

        Ok(Contents { next_id, brevets })
    }

    /// Write the snapshot, creating parent directories if needed.
    pub fn save(&self, contents: &Contents) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Snapshot {
                message: format!("failed to create snapshot directory: {}", e),
            })?;
        }

        let file = SnapshotFile {
            next_id: contents.next_id,
            brevets: contents
                .brevets
                .iter()
                .map(|(id, brevet)| StoredBrevet {
                    id: *id,
                    brevet: brevet.clone(),
                })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&file).map_err(|e| StoreError::Snapshot {
            message: format!("failed to serialize snapshot: {}", e),
        })?;

        std::fs::write(&self.path, json).map_err(|e| StoreError::Snapshot {
            message: format!("failed to write {}: {}", self.path.display(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Checkpoint;
    use tempfile::tempdir;

    fn sample() -> Contents {
        let mut brevets = BTreeMap::new();
        brevets.insert(
            BrevetId::new(3),
            Brevet {
                length: 200.0,
                start_time: "2021-01-01T00:00".into(),
                checkpoints: vec![Checkpoint {
                    km: 120.0,
                    open: "2021-01-01T03:32".into(),
                    close: "2021-01-01T08:00".into(),
                    location: Some("Corvallis".into()),
                }],
            },
        );
        Contents {
            next_id: BrevetId::new(4),
            brevets,
        }
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let snapshot = Snapshot::new(dir.path().join("brevets.json"));

        snapshot.save(&sample()).unwrap();
        assert_eq!(snapshot.load().unwrap(), sample());
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let snapshot = Snapshot::new(dir.path().join("absent.json"));
        assert_eq!(snapshot.load().unwrap(), Contents::default());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("brevets.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Snapshot::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Snapshot { .. }));
    }

    #[test]
    fn stale_next_id_skips_stored_ids() {
        let dir = tempdir().unwrap();
        let snapshot = Snapshot::new(dir.path().join("brevets.json"));
        let mut contents = sample();
        contents.next_id = BrevetId::new(2);
        snapshot.save(&contents).unwrap();

        let loaded = snapshot.load().unwrap();
        assert_eq!(loaded.next_id, BrevetId::new(4));
        assert_eq!(loaded.brevets, sample().brevets);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("brevets.json");
        Snapshot::new(&path).save(&sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn stored_brevet_is_flat_json() {
        let contents = sample();
        let (id, brevet) = contents.brevets.iter().next().unwrap();
        let stored = StoredBrevet {
            id: *id,
            brevet: brevet.clone(),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["length"], 200.0);
        assert_eq!(json["checkpoints"][0]["location"], "Corvallis");
    }
}
