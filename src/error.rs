// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the viewer components.
//!
//! Expected misses (absent label file, no matching point cloud) are not
//! errors; they are modelled as empty results by the components themselves.

use std::path::PathBuf;
use thiserror::Error;

/// An annotation category string with no known class.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown annotation category: {0:?}")]
pub struct CategoryError(pub String);

/// Failure while building the frame index for a dataset folder.
#[derive(Error, Debug)]
pub enum FrameIndexError {
    #[error("cannot list {kind} directory {path}: {source}")]
    Directory {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("none of the image directories exist under {root}")]
    NoImageDirectory { root: PathBuf },
}

/// Rejected navigation request. The current frame is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("frame {requested} out of range (0..={last})")]
    OutOfRange { requested: usize, last: usize },

    #[error("no frames loaded")]
    NoFrames,

    #[error("invalid frame number: {0:?}")]
    InvalidNumber(String),
}

/// I/O failure while reading a label file.
#[derive(Error, Debug)]
pub enum LabelError {
    #[error("cannot read label file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure decoding an image or point cloud.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("cannot decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot read point cloud {path}: {message}")]
    PointCloud { path: PathBuf, message: String },

    #[error("point cloud {path} has no x/y/z fields")]
    MissingCoordinates { path: PathBuf },
}

/// Any failure of a session-level operation (folder load, navigation, manual load).
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Index(#[from] FrameIndexError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(transparent)]
    Media(#[from] MediaError),
}

/// Failure loading the viewer configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid JSON config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
