use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use radioprog_lib::RadioModel;
use radioprog_lib::models::builtin_models;
use serde::{Deserialize, Serialize};

/// Default configuration values
pub struct Defaults;

impl Defaults {
    pub const CONFIG_FILE: &'static str = "config.json";
    pub const IMAGE_EXTENSION: &'static str = radioprog_lib::images::DEFAULT_EXTENSION;
}

/// A radio model entry in the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub id: String,
}

/// Root of the JSON configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioProgConfig {
    /// Directory holding memory image files
    pub images_path: PathBuf,
    /// The chirpc executable
    pub chirpc_path: PathBuf,
    #[serde(default = "default_models")]
    pub models: Vec<ModelConfig>,
    #[serde(default = "default_image_extension")]
    pub image_extension: String,
}

fn default_models() -> Vec<ModelConfig> {
    builtin_models()
        .into_iter()
        .map(|m| ModelConfig {
            name: m.name,
            id: m.id,
        })
        .collect()
}

fn default_image_extension() -> String {
    Defaults::IMAGE_EXTENSION.to_string()
}

impl RadioProgConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: RadioProgConfig = serde_json::from_str(content)?;
        Ok(config)
    }

    pub fn radio_models(&self) -> Vec<RadioModel> {
        self.models
            .iter()
            .map(|m| RadioModel::new(m.name.clone(), m.id.clone()))
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.images_path.as_os_str().is_empty() {
            return Err("imagesPath must not be empty".to_string());
        }
        if self.chirpc_path.as_os_str().is_empty() {
            return Err("chirpcPath must not be empty".to_string());
        }
        if self.models.is_empty() {
            return Err("models must list at least one radio model".to_string());
        }
        if let Some(model) = self.models.iter().find(|m| m.id.trim().is_empty()) {
            return Err(format!("model '{}' has an empty id", model.name));
        }
        if self.image_extension.trim_start_matches('.').is_empty() {
            return Err("imageExtension must not be empty".to_string());
        }
        Ok(())
    }
}
