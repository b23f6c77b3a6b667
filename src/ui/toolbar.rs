// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Navigation toolbar.
//!
//! This module provides the buttons for loading a dataset folder, stepping
//! through frames, jumping to a frame number, and opening single files.

use crate::models::session::FrameCursor;

/// Action requested from the toolbar this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    LoadFolder,
    StepUp,
    StepDown,
    /// Text typed into the frame number field.
    JumpTo(String),
    LoadImage,
    LoadPointCloud,
    ApplyOverlay,
    ShowScene,
}

/// Display the toolbar. `frame_entry` is the editable frame number text.
pub fn show(ui: &mut egui::Ui, frame_entry: &mut String, cursor: FrameCursor) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("📂 Load Folder").clicked() {
            action = ToolbarAction::LoadFolder;
        }

        ui.separator();

        let has_frames = cursor.count > 0;
        if ui
            .add_enabled(has_frames && cursor.current > 0, egui::Button::new("⬇ Down"))
            .clicked()
        {
            action = ToolbarAction::StepDown;
        }
        if ui
            .add_enabled(has_frames && cursor.current + 1 < cursor.count, egui::Button::new("⬆ Up"))
            .clicked()
        {
            action = ToolbarAction::StepUp;
        }

        let response = ui.add(
            egui::TextEdit::singleline(frame_entry)
                .hint_text("File Number")
                .desired_width(90.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            action = ToolbarAction::JumpTo(frame_entry.clone());
        }

        ui.separator();

        if ui.button("Load Camera Image").clicked() {
            action = ToolbarAction::LoadImage;
        }
        if ui.button("Load Point Cloud").clicked() {
            action = ToolbarAction::LoadPointCloud;
        }

        ui.separator();

        if ui.button("▭ Overlay Bounding Box").clicked() {
            action = ToolbarAction::ApplyOverlay;
        }
        if ui.button("🧊 Show 3D View").clicked() {
            action = ToolbarAction::ShowScene;
        }
    });

    action
}
