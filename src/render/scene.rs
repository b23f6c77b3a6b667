// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! 3D scene assembly: a uniformly colored point cloud plus one colored
//! oriented box per annotated object, viewed from a fixed camera preset.

use super::camera::CameraPreset;
use crate::error::CategoryError;
use crate::models::annotation::{Box3DLabel, Category, CategoryAliases};
use crate::util::obb::OrientedBox;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Box color per category, RGB in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenePalette {
    pub ship: [f32; 3],
    pub buoy: [f32; 3],
    pub other: [f32; 3],
}

impl Default for ScenePalette {
    fn default() -> Self {
        Self {
            ship: [0.0, 1.0, 0.0],
            buoy: [1.0, 0.8, 0.0],
            other: [1.0, 0.0, 0.0],
        }
    }
}

impl ScenePalette {
    pub fn color(&self, category: Category) -> [f32; 3] {
        match category {
            Category::Ship => self.ship,
            Category::Buoy => self.buoy,
            Category::Other => self.other,
        }
    }
}

/// Everything about the scene's look that is not data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenePreset {
    pub cloud_color: [f32; 3],
    pub palette: ScenePalette,
    pub camera: CameraPreset,
    pub point_size: f32,
    pub line_width: f32,
}

impl Default for ScenePreset {
    fn default() -> Self {
        Self {
            cloud_color: [0.0, 0.0, 1.0],
            palette: ScenePalette::default(),
            camera: CameraPreset::default(),
            point_size: 3.0,
            line_width: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneBox {
    pub category: Category,
    pub bbox: OrientedBox,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub points: Arc<Vec<Point3<f32>>>,
    pub cloud_color: [f32; 3],
    pub boxes: Vec<SceneBox>,
    pub camera: CameraPreset,
    pub point_size: f32,
    pub line_width: f32,
}

impl Scene {
    /// Largest side of the axis-aligned bounds of the points and box corners.
    pub fn max_extent(&self) -> f64 {
        let cloud = self
            .points
            .iter()
            .map(|p| Point3::new(p.x as f64, p.y as f64, p.z as f64));
        let corners = self.boxes.iter().flat_map(|b| b.bbox.corners());

        let mut all = cloud.chain(corners);
        let Some(first) = all.next() else {
            return 0.0;
        };
        let (min, max) = all.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));
        (max - min).max()
    }
}

/// Build the scene for one frame.
///
/// Boxes with non-finite parameters are skipped with a warning; an
/// unknown category fails the whole build.
pub fn build_scene(
    points: Arc<Vec<Point3<f32>>>,
    labels: &[Box3DLabel],
    preset: &ScenePreset,
    aliases: &CategoryAliases,
) -> Result<Scene, CategoryError> {
    let mut boxes = Vec::with_capacity(labels.len());

    for label in labels {
        let category = aliases.resolve(&label.category)?;
        if !label.box3d.is_finite() {
            log::warn!("Skipping {} box with non-finite parameters", label.category);
            continue;
        }
        let Some(bbox) = OrientedBox::from_points(&label.box3d.corners()) else {
            continue;
        };
        log::debug!("{} box at {:?}, volume {:.2} m^3", category, bbox.center, bbox.volume());
        boxes.push(SceneBox {
            category,
            bbox,
            color: preset.palette.color(category),
        });
    }

    log::info!("Built scene with {} points and {} boxes", points.len(), boxes.len());

    Ok(Scene {
        points,
        cloud_color: preset.cloud_color,
        boxes,
        camera: preset.camera,
        point_size: preset.point_size,
        line_width: preset.line_width,
    })
}
