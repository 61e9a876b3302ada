use std::path::{Path, PathBuf};

use hog_core::HogConfig;
use serde::{Deserialize, Serialize};

use crate::{RunError, RunResult};

/// A complete batch job: inputs, output and histogram layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Destination text file, replaced on success
    pub output_path: PathBuf,
    /// Input images, processed and written in this order
    pub image_paths: Vec<PathBuf>,
    pub hog: HogConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("./output.txt"),
            image_paths: (1..=6).map(|i| PathBuf::from(format!("./{i}.png"))).collect(),
            hog: HogConfig::default(),
        }
    }
}

impl RunConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> RunResult<()> {
        self.hog.validate()?;
        if self.image_paths.is_empty() {
            return Err(RunError::NoImages);
        }
        Ok(())
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "RunConfig: {} images -> {}, {}",
            self.image_paths.len(),
            self.output_path.display(),
            self.hog.summary()
        )
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> RunResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Deserialize from TOML string
    pub fn from_toml(toml_str: &str) -> RunResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> RunResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> RunResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json` file, or TOML for any other extension
    pub fn load<P: AsRef<Path>>(path: P) -> RunResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RunError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if is_json(path) {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Save to a `.json` file, or TOML for any other extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RunResult<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            self.to_json()?
        } else {
            self.to_toml()?
        };
        std::fs::write(path, content).map_err(|source| RunError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
