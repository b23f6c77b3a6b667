// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Viewer configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. YAML and JSON are both accepted, chosen by file extension.

use crate::error::ConfigError;
use crate::io::frame_index::FolderLayout;
use crate::models::annotation::CategoryAliases;
use crate::render::overlay::OverlayStyle;
use crate::render::scene::ScenePreset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "LABELSCOPE_CONFIG";
/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "labelscope.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub layout: FolderLayout,
    pub overlay: OverlayStyle,
    pub scene: ScenePreset,
    /// Re-draw the 2D overlay every time the frame changes.
    pub overlay_after_switch: bool,
    pub category_aliases: CategoryAliases,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            layout: FolderLayout::default(),
            overlay: OverlayStyle::default(),
            scene: ScenePreset::default(),
            overlay_after_switch: true,
            category_aliases: CategoryAliases::default(),
        }
    }
}

impl ViewerConfig {
    /// Read a config file; `.json` is parsed as JSON, anything else as YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Config from [`CONFIG_ENV`], else [`DEFAULT_CONFIG_FILE`] if present,
    /// else defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !local.exists() {
                    log::debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
                local
            }
        };

        let config = Self::from_file(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
