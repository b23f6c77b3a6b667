// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! 3D view window.
//!
//! Paints the point cloud and the annotated boxes through the scene's
//! fixed camera preset. While the window is open the rest of the viewer
//! is disabled, and closing it hands control back.

use crate::render::camera::Projector;
use crate::render::scene::Scene;
use crate::util::obb::BOX_EDGES;
use nalgebra::{Point2, Point3};

fn color(rgb: [f32; 3]) -> egui::Color32 {
    egui::Rgba::from_rgb(rgb[0], rgb[1], rgb[2]).into()
}

/// Map normalized device coordinates into `rect`.
fn to_screen(ndc: Point2<f64>, rect: &egui::Rect) -> egui::Pos2 {
    egui::pos2(
        rect.center().x + ndc.x as f32 * rect.width() / 2.0,
        rect.center().y - ndc.y as f32 * rect.height() / 2.0,
    )
}

/// Show the scene window; `open` is cleared when the user closes it.
pub fn show(ctx: &egui::Context, scene: &Scene, open: &mut bool) {
    egui::Window::new("3D View")
        .open(open)
        .default_size([960.0, 640.0])
        .resizable(true)
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            painter.rect_filled(rect, 0.0, egui::Color32::WHITE);

            let aspect = (rect.width() / rect.height().max(1.0)) as f64;
            let projector = Projector::new(&scene.camera, scene.max_extent(), aspect);

            let point_color = color(scene.cloud_color);
            let radius = scene.point_size / 2.0;
            for point in scene.points.iter() {
                let world = Point3::new(point.x as f64, point.y as f64, point.z as f64);
                if let Some(ndc) = projector.project(&world) {
                    let pos = to_screen(ndc, &rect);
                    if rect.contains(pos) {
                        painter.circle_filled(pos, radius, point_color);
                    }
                }
            }

            for scene_box in &scene.boxes {
                let corners = scene_box.bbox.corners();
                let stroke = egui::Stroke::new(scene.line_width, color(scene_box.color));
                for (a, b) in BOX_EDGES {
                    if let (Some(pa), Some(pb)) = (projector.project(&corners[a]), projector.project(&corners[b])) {
                        painter.line_segment([to_screen(pa, &rect), to_screen(pb, &rect)], stroke);
                    }
                }
            }

            painter.text(
                rect.left_top() + egui::vec2(8.0, 8.0),
                egui::Align2::LEFT_TOP,
                format!("{} points, {} boxes", scene.points.len(), scene.boxes.len()),
                egui::FontId::proportional(14.0),
                egui::Color32::DARK_GRAY,
            );
        });
}
