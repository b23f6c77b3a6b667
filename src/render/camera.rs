// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fixed viewpoint for the 3D scene.
//!
//! The preset follows the usual point-cloud viewer convention: `front`
//! points from the look-at target toward the eye, and the eye distance is
//! `zoom` times the scene's largest extent, seen through a 60 degree field
//! of view.

use nalgebra::{Matrix4, Perspective3, Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

const FIELD_OF_VIEW_DEG: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPreset {
    pub front: [f64; 3],
    pub lookat: [f64; 3],
    pub up: [f64; 3],
    pub zoom: f64,
}

impl Default for CameraPreset {
    fn default() -> Self {
        // Behind the sensor, looking forward and slightly down
        Self {
            front: [-10.0, 0.0, 2.62068021233921933],
            lookat: [2.4615, 2.1331, 1.338],
            up: [4.1781, 0.0, 90.0],
            zoom: 0.16,
        }
    }
}

/// World-to-viewport projection derived from a [`CameraPreset`].
#[derive(Debug, Clone)]
pub struct Projector {
    view_projection: Matrix4<f64>,
    view: Matrix4<f64>,
}

impl Projector {
    /// Build the projection for a scene whose largest extent is `max_extent`.
    pub fn new(preset: &CameraPreset, max_extent: f64, aspect: f64) -> Self {
        let fov = FIELD_OF_VIEW_DEG.to_radians();
        let distance = (preset.zoom * max_extent.max(1e-3)) / (fov / 2.0).tan();

        let target = Point3::from(preset.lookat);
        let front = Vector3::from(preset.front).normalize();
        let eye = target + front * distance;

        let view = Matrix4::look_at_rh(&eye, &target, &Vector3::from(preset.up));
        let near = (distance * 1e-3).max(1e-3);
        let far = distance + max_extent * 4.0 + 1.0;
        let projection = Perspective3::new(aspect.max(1e-3), fov, near, far);

        Self {
            view_projection: projection.as_matrix() * view,
            view,
        }
    }

    /// Normalized device coordinates (x right, y up, both in [-1, 1] when
    /// visible), or `None` for points behind the eye.
    pub fn project(&self, point: &Point3<f64>) -> Option<Point2<f64>> {
        let in_view = self.view.transform_point(point);
        if in_view.z >= 0.0 {
            return None;
        }
        let ndc = self.view_projection.transform_point(point);
        Some(Point2::new(ndc.x, ndc.y))
    }
}
