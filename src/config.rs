//! Run configuration for the `dedup` command.
//!
//! Settings come from an optional YAML file and are then overridden by
//! whatever flags were passed on the command line:
//!
//! ```yaml
//! threshold: 0.6
//! strict: true
//! normalize: true
//! images_dir: data/images
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dedup::{check_threshold, ResolveOptions, DEFAULT_IOU_THRESHOLD};
use crate::error::DedupError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DedupConfig {
    /// Minimum IoU for two boxes to count as duplicates.
    pub threshold: f64,

    /// Reject reversed or non-finite boxes.
    pub strict: bool,

    /// Write kept boxes divided by image width/height.
    pub normalize: bool,

    /// Where to look up image sizes missing from the detection file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_dir: Option<PathBuf>,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_IOU_THRESHOLD,
            strict: false,
            normalize: false,
            images_dir: None,
        }
    }
}

impl DedupConfig {
    /// Loads and validates a YAML config file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, DedupError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content).map_err(|source| DedupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn validate(&self) -> Result<(), DedupError> {
        check_threshold(self.threshold)
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            threshold: self.threshold,
            strict: self.strict,
        }
    }
}
