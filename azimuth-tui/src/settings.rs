//! User settings, read from a JSON file.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use azimuth_filters::pagination::PaginationPolicy;
use azimuth_filters::pipeline::{Operator, SearchMode};
use azimuth_filters::query::FilterGroupKind;
use azimuth_filters::selector::RenderOptions;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: LevelFilter,
    pub search_mode: SearchMode,
    pub pagination: PaginationPolicy,
    pub label_width: usize,
    pub bar_width: u16,
    /// Operator per filter group. Groups not listed combine with `OR`.
    pub operators: HashMap<FilterGroupKind, Operator>,
    /// Selection cap hint per filter group.
    pub max_selectable: HashMap<FilterGroupKind, usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Debug,
            search_mode: SearchMode::default(),
            pagination: PaginationPolicy::default(),
            label_width: 24,
            bar_width: 20,
            operators: HashMap::new(),
            max_selectable: HashMap::new(),
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Operator configured for a group.
    pub fn operator(&self, kind: FilterGroupKind) -> Operator {
        self.operators.get(&kind).copied().unwrap_or_default()
    }

    /// Selection cap hint configured for a group.
    pub fn max_selectable(&self, kind: FilterGroupKind) -> usize {
        self.max_selectable.get(&kind).copied().unwrap_or(0)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            label_width: self.label_width,
            bar_width: self.bar_width,
        }
    }
}
