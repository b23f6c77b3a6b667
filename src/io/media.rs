// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading (camera images and point clouds).
//!
//! Images are decoded to RGB8. Point clouds keep only their x/y/z
//! coordinates; other per-point fields are dropped.

use crate::error::MediaError;
use image::RgbImage;
use nalgebra::Point3;
use std::path::Path;

/// Decode an image file into an RGB8 buffer.
pub fn load_image(path: &Path) -> Result<RgbImage, MediaError> {
    let image = image::open(path).map_err(|source| MediaError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    let image = image.to_rgb8();
    log::info!("Loaded image: {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

/// Read the point coordinates of a PCD file.
pub fn load_point_cloud(path: &Path) -> Result<Vec<Point3<f32>>, MediaError> {
    let to_error = |e: &dyn std::fmt::Display| MediaError::PointCloud {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let reader = pcd_rs::DynReader::open(path).map_err(|e| to_error(&e))?;

    let mut points = Vec::new();
    for record in reader {
        let record = record.map_err(|e| to_error(&e))?;
        let [x, y, z] = record
            .to_xyz::<f32>()
            .ok_or_else(|| MediaError::MissingCoordinates {
                path: path.to_path_buf(),
            })?;
        points.push(Point3::new(x, y, z));
    }

    log::info!("Loaded point cloud: {} ({} points)", path.display(), points.len());
    Ok(points)
}
