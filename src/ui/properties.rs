// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame information panel.
//!
//! Shows which files make up the current frame and what their labels
//! contain, so a missing or empty label file is visible at a glance.

use crate::io::annotations::LabelLoad;
use crate::models::session::Session;
use std::path::Path;

/// Display the side panel for the current session.
pub fn show(ui: &mut egui::Ui, session: &Session, status: Option<&str>) {
    ui.heading("Frame");
    ui.separator();

    if session.cursor.count == 0 {
        ui.label(egui::RichText::new("No folder loaded").weak());
    } else {
        if let Some(folder) = session.index.root.file_name() {
            ui.label(format!("Folder: {}", folder.to_string_lossy()));
        }
        ui.label(format!("Frame {}", session.cursor.display()));
        if let Some(files) = &session.frame.files {
            ui.label(format!("Number: {}", files.identifier));
            if !files.is_complete() {
                ui.label(egui::RichText::new("Image only, no matching point cloud").weak());
            }
        }
    }

    ui.add_space(8.0);
    egui::Grid::new("frame_files").num_columns(2).striped(true).show(ui, |ui| {
        file_row(ui, "Image", session.frame.image_path.as_deref());
        file_row(ui, "Point cloud", session.frame.point_cloud_path.as_deref());
        let files = session.frame.files.as_ref();
        file_row(ui, "Camera label", files.and_then(|f| f.image_label.as_deref()));
        file_row(ui, "Cloud label", files.and_then(|f| f.cloud_label.as_deref()));
    });

    ui.add_space(8.0);
    ui.label(match &session.frame.image_labels {
        LabelLoad::Content(labels) => format!("{} image shapes", labels.shapes.len()),
        LabelLoad::Empty => "No image annotations".to_string(),
    });
    ui.label(match &session.frame.cloud_labels {
        LabelLoad::Content(labels) => format!("{} 3D boxes", labels.labels.len()),
        LabelLoad::Empty => "No point cloud annotations".to_string(),
    });
    if let Some(points) = &session.frame.points {
        ui.label(format!("{} points", points.len()));
    }

    if let Some(status) = status {
        ui.separator();
        ui.label(egui::RichText::new(status).color(egui::Color32::LIGHT_RED));
    }
}

fn file_row(ui: &mut egui::Ui, name: &str, path: Option<&Path>) {
    ui.label(name);
    match path.and_then(|p| p.file_name()) {
        Some(file) => ui.label(file.to_string_lossy()),
        None => ui.label(egui::RichText::new("-").weak()),
    };
    ui.end_row();
}
