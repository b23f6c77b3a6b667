// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label file loading.
//!
//! Frames without annotated objects often ship empty or truncated label
//! files, so anything that is not valid JSON for the expected schema loads
//! as [`LabelLoad::Empty`]. Only real I/O failures are errors.

use crate::error::LabelError;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::Path;

/// Outcome of reading one label file.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelLoad<T> {
    Content(T),
    /// File absent, empty, or not parseable as the expected schema.
    Empty,
}

impl<T> LabelLoad<T> {
    pub fn content(&self) -> Option<&T> {
        match self {
            LabelLoad::Content(content) => Some(content),
            LabelLoad::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LabelLoad::Empty)
    }
}

/// Load and parse a JSON label file.
pub fn load_labels<T: DeserializeOwned>(path: &Path) -> Result<LabelLoad<T>, LabelError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("Label file {} not found", path.display());
            return Ok(LabelLoad::Empty);
        }
        Err(source) => {
            return Err(LabelError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        log::info!("No content in label file {}", path.display());
        return Ok(LabelLoad::Empty);
    }

    match serde_json::from_slice(&bytes) {
        Ok(content) => Ok(LabelLoad::Content(content)),
        Err(e) => {
            log::warn!("Unreadable label file {}: {}", path.display(), e);
            Ok(LabelLoad::Empty)
        }
    }
}

/// Like [`load_labels`], treating an unresolved path as no annotations.
pub fn load_optional<T: DeserializeOwned>(path: Option<&Path>) -> Result<LabelLoad<T>, LabelError> {
    match path {
        Some(path) => load_labels(path),
        None => Ok(LabelLoad::Empty),
    }
}
