//! Parameter files.
//!
//! A parameter file is YAML (or JSON, picked by the `.json` extension) with
//! the same camelCase keys as the library's `Parameters`, plus an optional
//! noise `seed`. Missing keys take their defaults:
//!
//! ```yaml
//! numLines: 40
//! numSegments: 50
//! chaosX: 0.5
//! chaosY: 0.95
//! vpadding: 0.9
//! strokeWidth: 0.2
//! lineColor: black
//! seed: 42
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use zagline::Parameters;

/// Contents of a parameter file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternFile {
    #[serde(flatten)]
    pub params: Parameters,

    /// Noise seed; omitted means "pick one at random"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl PatternFile {
    /// Load a parameter file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read parameter file {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse parameter JSON {}", path.display()))
        } else {
            Self::from_yaml(&content)
                .with_context(|| format!("failed to parse parameter YAML {}", path.display()))
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Execute the defaults command: print the default parameter file.
pub fn cmd_defaults() -> Result<()> {
    print!("{}", PatternFile::default().to_yaml()?);
    Ok(())
}
