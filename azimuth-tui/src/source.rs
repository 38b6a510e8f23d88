//! Asynchronous dataset loading.
//!
//! Each request is tagged with a generation number. Only the result of the
//! most recent request is ever applied; anything older is dropped on arrival.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use azimuth_filters::error::FilterError;
use azimuth_filters::option::{FilterOption, options_from_value};
use azimuth_filters::query::FilterGroupKind;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors raised while loading a dataset file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("dataset is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Filter options of every group in a dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub groups: HashMap<FilterGroupKind, Vec<FilterOption>>,
}

impl Snapshot {
    /// Options of one group, if the dataset provides it.
    pub fn options(&self, kind: FilterGroupKind) -> Option<&[FilterOption]> {
        self.groups.get(&kind).map(Vec::as_slice)
    }
}

/// Parse a dataset document: `{"label": [options...], "smartTag": [...], ...}`.
pub fn parse_snapshot(json: &str) -> Result<Snapshot, SourceError> {
    let document: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
    let mut groups = HashMap::with_capacity(document.len());
    for (key, value) in document {
        let kind: FilterGroupKind = key.parse()?;
        groups.insert(kind, options_from_value(value)?);
    }
    Ok(Snapshot { groups })
}

/// Read and parse a dataset file.
pub async fn load_snapshot(path: &Path) -> Result<Snapshot, SourceError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_snapshot(&text)
}

/// Outcome of one load request.
#[derive(Debug)]
pub struct Loaded {
    pub generation: u64,
    pub result: Result<Snapshot, SourceError>,
}

/// Issues load requests and filters out superseded results.
pub struct DatasetSource {
    path: PathBuf,
    /// Generation of the newest request
    latest: u64,
    /// Generation of the newest applied result
    resolved: u64,
    tx: mpsc::UnboundedSender<Loaded>,
    rx: mpsc::UnboundedReceiver<Loaded>,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            path: path.into(),
            latest: 0,
            resolved: 0,
            tx,
            rx,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start loading the dataset. Returns the request's generation.
    pub fn request(&mut self) -> u64 {
        self.latest += 1;
        let generation = self.latest;
        let path = self.path.clone();
        let tx = self.tx.clone();
        log::debug!("loading {} (generation {generation})", path.display());
        tokio::spawn(async move {
            let result = load_snapshot(&path).await;
            // the receiver lives as long as the source; a closed channel means shutdown
            let _ = tx.send(Loaded { generation, result });
        });
        generation
    }

    /// Whether a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.resolved != self.latest
    }

    /// Wait for the next load result, stale or not.
    pub async fn recv(&mut self) -> Option<Loaded> {
        self.rx.recv().await
    }

    /// Accept a result if it answers the newest request.
    pub fn accept(&mut self, loaded: Loaded) -> Option<Result<Snapshot, SourceError>> {
        if loaded.generation != self.latest {
            log::debug!(
                "dropping stale dataset result (generation {}, latest {})",
                loaded.generation,
                self.latest
            );
            return None;
        }
        self.resolved = loaded.generation;
        Some(loaded.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "label": [
            { "filterValue": "cat", "utteranceCount": 4, "outcomeCount": { "CorrectAndPredicted": 4 } },
            { "filterValue": "dog", "utteranceCount": 1, "outcomeCount": { "IncorrectAndPredicted": 1 } }
        ],
        "smartTag": []
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = parse_snapshot(DATASET).unwrap();
        let labels = snapshot.options(FilterGroupKind::Label).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].value, "cat");
        assert_eq!(snapshot.options(FilterGroupKind::SmartTag), Some(&[][..]));
        assert!(snapshot.options(FilterGroupKind::Outcome).is_none());
    }

    #[test]
    fn test_unknown_group_is_rejected() {
        let err = parse_snapshot(r#"{"colour": []}"#).unwrap_err();
        assert!(matches!(err, SourceError::Filter(FilterError::UnknownGroup(_))));
    }

    #[tokio::test]
    async fn test_only_latest_result_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(&path, DATASET).unwrap();

        let mut source = DatasetSource::new(&path);
        let first = source.request();
        let second = source.request();
        assert!(first < second);
        assert!(source.is_loading());

        let mut applied = Vec::new();
        for _ in 0..2 {
            let loaded = source.recv().await.unwrap();
            let generation = loaded.generation;
            if let Some(result) = source.accept(loaded) {
                assert!(result.is_ok());
                applied.push(generation);
            }
        }

        assert_eq!(applied, [second]);
        assert!(!source.is_loading());
    }

    #[tokio::test]
    async fn test_missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = DatasetSource::new(dir.path().join("absent.json"));
        source.request();
        let loaded = source.recv().await.unwrap();
        let result = source.accept(loaded).unwrap();
        assert!(matches!(result, Err(SourceError::Io { .. })));
        assert!(!source.is_loading());
    }
}
