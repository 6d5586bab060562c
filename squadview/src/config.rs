//! Component configuration.
//!
//! Every field has a default matching the stock club pages, so a config file
//! only needs to name what it overrides.
//!
//! # Example
//!
//! ```
//! use squadview::config::{MissingCellPolicy, ViewConfig};
//!
//! let config = ViewConfig::from_json(r#"{ "sorting": { "missing_cell": "fail" } }"#).unwrap();
//! assert_eq!(config.sorting.missing_cell, MissingCellPolicy::Fail);
//! assert_eq!(config.sorting.position_column, "position");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::table::PositionRanks;

/// What to do with a row that has no cell at the sorted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCellPolicy {
    /// Keep the row, after all sorted rows, in its original relative order.
    #[default]
    Skip,
    /// Abort the sort before touching the table.
    Fail,
}

/// How rows whose primary position codes tie are ordered further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryTieBreak {
    /// Only the primary code matters.
    None,
    /// Compare secondary codes. A row without one orders before a row with one.
    #[default]
    WhenPresent,
    /// Compare secondary codes, using a row's own primary code when it has none.
    OwnPrimary,
}

/// Configuration for [`TableSorter`](crate::table::TableSorter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Marker class of clickable headers.
    ///
    /// Default: `sortable`
    pub sortable_class: String,

    /// `data-column` value that switches a column to position ordering.
    ///
    /// Default: `position`
    pub position_column: String,

    /// Precedence of each position code.
    ///
    /// Default: `GK=1, DF=2, MF=3, FW=4`
    pub position_ranks: PositionRanks,

    pub missing_cell: MissingCellPolicy,

    pub secondary_tie_break: SecondaryTieBreak,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            sortable_class: "sortable".to_string(),
            position_column: "position".to_string(),
            position_ranks: PositionRanks::default(),
            missing_cell: MissingCellPolicy::default(),
            secondary_tie_break: SecondaryTieBreak::default(),
        }
    }
}

impl SortConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sortable_class(mut self, class: impl Into<String>) -> Self {
        self.sortable_class = class.into();
        self
    }

    pub fn with_position_column(mut self, column: impl Into<String>) -> Self {
        self.position_column = column.into();
        self
    }

    pub fn with_position_ranks(mut self, ranks: PositionRanks) -> Self {
        self.position_ranks = ranks;
        self
    }

    pub fn with_missing_cell(mut self, policy: MissingCellPolicy) -> Self {
        self.missing_cell = policy;
        self
    }

    pub fn with_secondary_tie_break(mut self, tie_break: SecondaryTieBreak) -> Self {
        self.secondary_tie_break = tie_break;
        self
    }
}

/// Configuration for [`ColorClassifier`](crate::color::ColorClassifier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Luminance above which a color counts as light.
    ///
    /// Default: 0.7
    pub light_threshold: f64,

    /// Amount added to (or taken from) each channel by lighten / darken.
    ///
    /// Default: 60
    pub shift: u8,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light_threshold: 0.7,
            shift: 60,
        }
    }
}

impl ColorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_light_threshold(mut self, threshold: f64) -> Self {
        self.light_threshold = threshold;
        self
    }

    pub fn with_shift(mut self, shift: u8) -> Self {
        self.shift = shift;
        self
    }
}

/// Top-level configuration of the page helpers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub sorting: SortConfig,
    pub colors: ColorConfig,
}

impl ViewConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::debug!("loaded view config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sorting.sortable_class.trim().is_empty() {
            return Err(ConfigError::Invalid("sortable_class must not be empty".into()));
        }
        let threshold = self.colors.light_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "light_threshold must be within 0..=1, got {threshold}"
            )));
        }
        Ok(())
    }
}
