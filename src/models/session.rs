// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Viewer session state.
//!
//! A [`Session`] owns the frame index, the current position and the
//! buffers of the current frame. Every operation builds a new session and
//! leaves `self` untouched, so a failed load keeps the previous state.

use crate::error::{CategoryError, NavigationError, SessionError};
use crate::io::annotations::{load_optional, LabelLoad};
use crate::io::frame_index::{FolderLayout, FrameIndex, FrameSet};
use crate::io::media::{load_image, load_point_cloud};
use crate::models::annotation::{CategoryAliases, CloudLabels, ImageLabels};
use crate::render::overlay::{render_overlay, Overlay, OverlayStyle};
use crate::render::scene::{build_scene, Scene, ScenePreset};
use image::RgbImage;
use nalgebra::Point3;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Position within the frame list, `0..count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameCursor {
    pub current: usize,
    pub count: usize,
}

impl FrameCursor {
    pub fn new(count: usize) -> Self {
        Self { current: 0, count }
    }

    /// Next frame; stays put on the last one.
    pub fn step_up(self) -> Self {
        if self.current + 1 < self.count {
            Self {
                current: self.current + 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Previous frame; stays put on the first one.
    pub fn step_down(self) -> Self {
        Self {
            current: self.current.saturating_sub(1),
            ..self
        }
    }

    pub fn jump_to(self, frame: usize) -> Result<Self, NavigationError> {
        if self.count == 0 {
            return Err(NavigationError::NoFrames);
        }
        if frame >= self.count {
            return Err(NavigationError::OutOfRange {
                requested: frame,
                last: self.count - 1,
            });
        }
        Ok(Self {
            current: frame,
            ..self
        })
    }

    /// Jump to a typed frame number, either `"n"` or the displayed `"n / last"`.
    pub fn jump_to_entry(self, text: &str) -> Result<Self, NavigationError> {
        let number = text.split('/').next().unwrap_or_default().trim();
        let frame = number
            .parse::<usize>()
            .map_err(|_| NavigationError::InvalidNumber(text.to_string()))?;
        self.jump_to(frame)
    }

    /// `"<current> / <last>"`, the text shown in the frame number field.
    pub fn display(&self) -> String {
        format!("{} / {}", self.current, self.count.saturating_sub(1))
    }
}

/// A navigation request from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    StepUp,
    StepDown,
    JumpTo(usize),
    /// Raw text typed into the frame number field.
    Entry(String),
}

/// Decoded buffers and labels of the frame being viewed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFrame {
    pub files: Option<FrameSet>,
    pub image_path: Option<PathBuf>,
    /// Pristine decoded image; overlays are drawn on copies.
    pub image: Option<Arc<RgbImage>>,
    pub point_cloud_path: Option<PathBuf>,
    pub points: Option<Arc<Vec<Point3<f32>>>>,
    pub image_labels: LabelLoad<ImageLabels>,
    pub cloud_labels: LabelLoad<CloudLabels>,
}

impl Default for LoadedFrame {
    fn default() -> Self {
        Self {
            files: None,
            image_path: None,
            image: None,
            point_cloud_path: None,
            points: None,
            image_labels: LabelLoad::Empty,
            cloud_labels: LabelLoad::Empty,
        }
    }
}

impl LoadedFrame {
    /// Decode the image, point cloud and labels of a resolved frame.
    pub fn load(files: FrameSet) -> Result<Self, SessionError> {
        let image = load_image(&files.image)?;
        let points = files
            .point_cloud
            .as_deref()
            .map(load_point_cloud)
            .transpose()?;
        let image_labels = load_optional(files.image_label.as_deref())?;
        let cloud_labels = load_optional(files.cloud_label.as_deref())?;

        log::info!("Loaded frame {} (number {:?})", files.index, files.identifier);

        Ok(Self {
            image_path: Some(files.image.clone()),
            image: Some(Arc::new(image)),
            point_cloud_path: files.point_cloud.clone(),
            points: points.map(Arc::new),
            image_labels,
            cloud_labels,
            files: Some(files),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub index: FrameIndex,
    pub cursor: FrameCursor,
    pub frame: LoadedFrame,
}

impl Session {
    /// Index a dataset folder and load its first frame.
    pub fn open(root: &Path, layout: &FolderLayout) -> Result<Self, SessionError> {
        let index = FrameIndex::load(root, layout)?;
        let cursor = FrameCursor::new(index.len());

        let frame = match index.resolve(cursor.current) {
            Some(files) => LoadedFrame::load(files)?,
            None => LoadedFrame::default(),
        };
        if index.is_empty() {
            log::warn!("No images in {}", index.image_dir.display());
        }

        Ok(Self { index, cursor, frame })
    }

    /// Move to another frame. Boundary steps return an unchanged session.
    pub fn navigate(&self, navigation: &Navigation) -> Result<Self, SessionError> {
        let cursor = match navigation {
            Navigation::StepUp => self.cursor.step_up(),
            Navigation::StepDown => self.cursor.step_down(),
            Navigation::JumpTo(frame) => self.cursor.jump_to(*frame)?,
            Navigation::Entry(text) => self.cursor.jump_to_entry(text)?,
        };

        if cursor == self.cursor && self.frame.files.is_some() {
            return Ok(self.clone());
        }

        let files = self.index.resolve(cursor.current).ok_or(NavigationError::NoFrames)?;
        Ok(Self {
            index: self.index.clone(),
            cursor,
            frame: LoadedFrame::load(files)?,
        })
    }

    /// Replace only the image buffer with a file picked by hand.
    pub fn with_image(&self, path: &Path) -> Result<Self, SessionError> {
        let image = load_image(path)?;
        let mut next = self.clone();
        next.frame.image_path = Some(path.to_path_buf());
        next.frame.image = Some(Arc::new(image));
        Ok(next)
    }

    /// Replace only the point cloud buffer with a file picked by hand.
    pub fn with_point_cloud(&self, path: &Path) -> Result<Self, SessionError> {
        let points = load_point_cloud(path)?;
        let mut next = self.clone();
        next.frame.point_cloud_path = Some(path.to_path_buf());
        next.frame.points = Some(Arc::new(points));
        Ok(next)
    }

    /// Draw the current camera labels over a copy of the current image.
    ///
    /// `None` when no image is loaded. A frame without labels yields the
    /// plain image.
    pub fn overlay(&self, style: &OverlayStyle, aliases: &CategoryAliases) -> Option<Result<Overlay, CategoryError>> {
        let image = self.frame.image.as_deref()?;
        let shapes = self
            .frame
            .image_labels
            .content()
            .map(|labels| labels.shapes.as_slice())
            .unwrap_or_default();
        Some(render_overlay(image, shapes, style, aliases))
    }

    /// Build the 3D scene of the current point cloud and its labels.
    ///
    /// `None` when no point cloud is loaded.
    pub fn scene(&self, preset: &ScenePreset, aliases: &CategoryAliases) -> Option<Result<Scene, CategoryError>> {
        let points = self.frame.points.clone()?;
        let labels = self
            .frame
            .cloud_labels
            .content()
            .map(|labels| labels.labels.as_slice())
            .unwrap_or_default();
        Some(build_scene(points, labels, preset, aliases))
    }
}
