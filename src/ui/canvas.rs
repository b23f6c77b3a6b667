// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Camera image display.
//!
//! This module shows the current (possibly annotated) camera image scaled
//! to fit the panel, with category captions painted over the boxes.

use crate::render::overlay::LabelPlacement;
use crate::util::geometry::{fit_rect, image_to_screen};

/// Display the camera image and its captions.
pub fn show(
    ui: &mut egui::Ui,
    image_texture: &Option<egui::TextureHandle>,
    image_size: Option<(u32, u32)>,
    labels: &[LabelPlacement],
) {
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(texture), Some(size)) = (image_texture, image_size) else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Camera Image Here")
                        .size(16.0)
                        .color(egui::Color32::from_gray(180)),
                );
            });
            return;
        };

        let image_rect = fit_rect(size, ui.max_rect());
        let painter = ui.painter();

        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        // Scale captions with the displayed image
        let scale = image_rect.width() / size.0 as f32;
        for label in labels {
            let [r, g, b] = label.color.0;
            let pos = image_to_screen(label.x as f32, label.y as f32, size, &image_rect);
            painter.text(
                pos,
                egui::Align2::LEFT_TOP,
                &label.text,
                egui::FontId::proportional((label.height as f32 * scale).max(8.0)),
                egui::Color32::from_rgb(r, g, b),
            );
        }
    });
}
