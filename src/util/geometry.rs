// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module turns compact box annotations into corner points and maps
//! image pixel coordinates onto the on-screen image rectangle.

use nalgebra::{Point3, Rotation3, Vector3};

/// Box annotation parameters: dimensions in meters, center, yaw in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxParams {
    pub height: f64,
    pub width: f64,
    pub length: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
}

/// Compute the 8 world-space corners of an annotated box.
///
/// Label files store the horizontal extents swapped: the local X half-extent
/// is `width / 2` and the local Y half-extent is `length / 2`. Corners are
/// ordered top face first, then bottom face, each counter-clockwise from
/// (-X, -Y). Yaw rotates about +Z and is not normalized.
pub fn box_corners(params: &BoxParams) -> [Point3<f64>; 8] {
    let hx = params.width / 2.0;
    let hy = params.length / 2.0;
    let hz = params.height / 2.0;

    let offsets = [
        Vector3::new(-hx, -hy, hz),
        Vector3::new(hx, -hy, hz),
        Vector3::new(hx, hy, hz),
        Vector3::new(-hx, hy, hz),
        Vector3::new(-hx, -hy, -hz),
        Vector3::new(hx, -hy, -hz),
        Vector3::new(hx, hy, -hz),
        Vector3::new(-hx, hy, -hz),
    ];

    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), params.yaw);
    let center = Point3::new(params.x, params.y, params.z);

    offsets.map(|offset| center + rotation * offset)
}

/// Integer pixel rectangle spanned by the first and last point of a shape.
///
/// Coordinates are truncated toward zero and returned as `(min, max)`
/// corners. Returns `None` for a shape without points.
pub fn shape_rect(points: &[[f64; 2]]) -> Option<((i32, i32), (i32, i32))> {
    let first = points.first()?;
    let last = points.last()?;

    let (x1, y1) = (first[0] as i32, first[1] as i32);
    let (x2, y2) = (last[0] as i32, last[1] as i32);

    Some(((x1.min(x2), y1.min(y2)), (x1.max(x2), y1.max(y2))))
}

/// Convert image pixel coordinates to normalized coordinates (0.0 to 1.0).
pub fn normalize_coordinates(pixel_x: f32, pixel_y: f32, width: u32, height: u32) -> (f32, f32) {
    (pixel_x / width as f32, pixel_y / height as f32)
}

/// Map image pixel coordinates into a display rectangle showing the whole image.
pub fn image_to_screen(
    pixel_x: f32,
    pixel_y: f32,
    image_size: (u32, u32),
    image_rect: &egui::Rect,
) -> egui::Pos2 {
    let (nx, ny) = normalize_coordinates(pixel_x, pixel_y, image_size.0, image_size.1);
    egui::pos2(
        image_rect.min.x + nx * image_rect.width(),
        image_rect.min.y + ny * image_rect.height(),
    )
}

/// Largest rectangle with the image's aspect ratio that fits, centered, in `available`.
pub fn fit_rect(image_size: (u32, u32), available: egui::Rect) -> egui::Rect {
    let img_aspect = image_size.0 as f32 / image_size.1.max(1) as f32;
    let available_aspect = available.width() / available.height().max(1.0);

    let size = if img_aspect > available_aspect {
        // Image is wider - fit to width
        egui::vec2(available.width(), available.width() / img_aspect)
    } else {
        // Image is taller - fit to height
        egui::vec2(available.height() * img_aspect, available.height())
    };

    egui::Rect::from_center_size(available.center(), size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn params(height: f64, width: f64, length: f64, yaw: f64) -> BoxParams {
        BoxParams {
            height,
            width,
            length,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            yaw,
        }
    }

    fn sorted(corners: [Point3<f64>; 8]) -> Vec<Point3<f64>> {
        let mut v = corners.to_vec();
        v.sort_by(|a, b| {
            a.x.partial_cmp(&b.x)
                .unwrap()
                .then(a.y.partial_cmp(&b.y).unwrap())
                .then(a.z.partial_cmp(&b.z).unwrap())
        });
        v
    }

    #[test]
    fn test_axis_aligned_extents_use_swapped_width_and_length() {
        let corners = box_corners(&params(2.0, 4.0, 10.0, 0.0));

        for c in &corners {
            assert_relative_eq!(c.x.abs(), 2.0);
            assert_relative_eq!(c.y.abs(), 5.0);
            assert_relative_eq!(c.z.abs(), 1.0);
        }
        // Top face first
        assert!(corners[..4].iter().all(|c| c.z > 0.0));
        assert!(corners[4..].iter().all(|c| c.z < 0.0));
    }

    #[test]
    fn test_corners_distinct_and_centered() {
        let p = BoxParams {
            height: 1.7,
            width: 3.1,
            length: 9.4,
            x: 12.5,
            y: -4.0,
            z: 0.75,
            yaw: 0.83,
        };
        let corners = box_corners(&p);

        for i in 0..8 {
            for j in (i + 1)..8 {
                assert!((corners[i] - corners[j]).norm() > 1e-6);
            }
        }

        let sum = corners.iter().fold(Vector3::zeros(), |acc, c| acc + c.coords);
        let centroid = sum / 8.0;
        assert_relative_eq!(centroid.x, 12.5, epsilon = 1e-9);
        assert_relative_eq!(centroid.y, -4.0, epsilon = 1e-9);
        assert_relative_eq!(centroid.z, 0.75, epsilon = 1e-9);
    }

    #[test]
    fn test_yaw_is_periodic() {
        let a = sorted(box_corners(&params(1.0, 2.0, 3.0, 0.4)));
        let b = sorted(box_corners(&params(1.0, 2.0, 3.0, 0.4 + 2.0 * PI)));

        for (pa, pb) in a.iter().zip(&b) {
            assert_relative_eq!(pa.x, pb.x, epsilon = 1e-9);
            assert_relative_eq!(pa.y, pb.y, epsilon = 1e-9);
            assert_relative_eq!(pa.z, pb.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_quarter_turn_swaps_horizontal_extents() {
        let corners = box_corners(&params(2.0, 4.0, 10.0, FRAC_PI_2));

        for c in &corners {
            assert_relative_eq!(c.x.abs(), 5.0, epsilon = 1e-9);
            assert_relative_eq!(c.y.abs(), 2.0, epsilon = 1e-9);
        }
        // (+hx, -hy) rotates to (+hy, +hx)
        assert_relative_eq!(corners[1].x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(corners[1].y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_size_box_is_degenerate() {
        let corners = box_corners(&BoxParams {
            x: 1.0,
            y: 2.0,
            z: 3.0,
            ..params(0.0, 0.0, 0.0, 1.0)
        });

        for c in &corners {
            assert_relative_eq!(c.x, 1.0);
            assert_relative_eq!(c.y, 2.0);
            assert_relative_eq!(c.z, 3.0);
        }
    }

    #[test]
    fn test_shape_rect_uses_first_and_last_point() {
        let points = [[40.9, 12.2], [99.0, 99.0], [10.0, 50.7]];
        assert_eq!(shape_rect(&points), Some(((10, 12), (40, 50))));
        assert_eq!(shape_rect(&[]), None);
    }

    #[test]
    fn test_image_to_screen_corners() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(960.0, 540.0));

        let tl = image_to_screen(0.0, 0.0, (1920, 1080), &rect);
        assert_eq!(tl, egui::pos2(10.0, 20.0));

        let br = image_to_screen(1920.0, 1080.0, (1920, 1080), &rect);
        assert_eq!(br, egui::pos2(970.0, 560.0));
    }

    #[test]
    fn test_fit_rect_preserves_aspect() {
        let available = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1000.0, 1000.0));
        let fitted = fit_rect((1920, 1080), available);

        assert_eq!(fitted.width(), 1000.0);
        assert!((fitted.height() - 562.5).abs() < 0.01);
        assert_eq!(fitted.center(), available.center());
    }
}
