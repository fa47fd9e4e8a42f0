/// Configuration loading for user-supplied triggers
use crate::error::{TriggerError, TriggerResult};
use crate::matcher::PreparedTriggers;
use crate::table::TriggerSpecTable;
use crate::trigger::TRIGGER_REGEX_PREFIX;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// User trigger configuration
///
/// ```yaml
/// triggers:
///   "cpp,objcpp": ["->", "re!\\bstd::"]
/// filetypes: [c, cpp]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerConfig {
    /// Extra triggers layered over the built-in table
    #[serde(default)]
    pub triggers: TriggerSpecTable,
    /// Restrict the session to these filetypes; empty means unrestricted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filetypes: Option<Vec<String>>,
}

impl TriggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile into a ready-to-query trigger set
    pub fn prepare(&self) -> TriggerResult<PreparedTriggers> {
        PreparedTriggers::from_config(self)
    }

    /// Fold `other` into `self`: trigger lists concatenate per key, filters union
    pub fn merge(&mut self, other: TriggerConfig) {
        for (key, specs) in other.triggers {
            self.triggers.entry(key).or_default().extend(specs);
        }

        if let Some(filetypes) = other.filetypes {
            let merged: BTreeSet<String> = self
                .filetypes
                .take()
                .unwrap_or_default()
                .into_iter()
                .chain(filetypes)
                .collect();
            self.filetypes = Some(merged.into_iter().collect());
        }
    }
}

/// Trigger configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load trigger configuration from a YAML file
    pub fn load_from_yaml(path: &Path) -> TriggerResult<TriggerConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: TriggerConfig = serde_yaml::from_str(&content)?;
        Self::validate_config(&config)?;
        debug!("Loaded trigger config from {}", path.display());
        Ok(config)
    }

    /// Load trigger configuration from a JSON file
    pub fn load_from_json(path: &Path) -> TriggerResult<TriggerConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: TriggerConfig = serde_json::from_str(&content)?;
        Self::validate_config(&config)?;
        debug!("Loaded trigger config from {}", path.display());
        Ok(config)
    }

    /// Load trigger configuration from a string
    pub fn load_from_string(content: &str, format: ConfigFormat) -> TriggerResult<TriggerConfig> {
        let config: TriggerConfig = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Load and merge every `.yaml`, `.yml` and `.json` file in `dir`
    ///
    /// Files are read in file-name order. Other files are skipped.
    pub fn load_from_directory(dir: &Path) -> TriggerResult<TriggerConfig> {
        if !dir.is_dir() {
            return Err(TriggerError::Config(format!(
                "Configuration directory not found: {}",
                dir.display()
            )));
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut merged = TriggerConfig::new();
        for path in paths {
            let config = match ConfigFormat::from_path(&path) {
                Some(ConfigFormat::Yaml) => Self::load_from_yaml(&path)?,
                Some(ConfigFormat::Json) => Self::load_from_json(&path)?,
                None => continue,
            };
            merged.merge(config);
        }

        Ok(merged)
    }

    /// Validate trigger configuration
    ///
    /// Pattern compilation is left to [`TriggerConfig::prepare`].
    fn validate_config(config: &TriggerConfig) -> TriggerResult<()> {
        for (key, specs) in &config.triggers {
            for spec in specs {
                if spec.is_empty() {
                    return Err(TriggerError::Config(format!(
                        "Empty trigger for filetypes '{}'",
                        key
                    )));
                }
                if spec == TRIGGER_REGEX_PREFIX {
                    return Err(TriggerError::Config(format!(
                        "Regex trigger without a pattern for filetypes '{}'",
                        key
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Some(ConfigFormat::Yaml),
            Some("json") => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}
