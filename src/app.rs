// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires toolbar actions to the viewer [`Session`], keeps the
//! displayed image texture in sync with it, and hosts the 3D view.

use crate::config::ViewerConfig;
use crate::models::session::{Navigation, Session};
use crate::render::overlay::LabelPlacement;
use crate::render::scene::Scene;
use crate::ui::{canvas, properties, scene_view, toolbar};
use anyhow::{Context, Result};
use image::RgbImage;
use std::path::PathBuf;

/// Main application state.
pub struct ViewerApp {
    config: ViewerConfig,

    /// Folder, position and buffers of the frame being viewed
    session: Session,

    /// Editable frame number text
    frame_entry: String,

    /// Texture of the displayed (possibly annotated) camera image
    image_texture: Option<egui::TextureHandle>,

    /// Displayed image dimensions (width, height)
    image_size: Option<(u32, u32)>,

    /// Captions belonging to the displayed overlay
    labels: Vec<LabelPlacement>,

    /// Scene shown in the 3D view while it is open
    scene: Option<Scene>,
    scene_open: bool,

    /// Last error, shown in the side panel
    status: Option<String>,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            session: Session::default(),
            frame_entry: String::new(),
            image_texture: None,
            image_size: None,
            labels: Vec::new(),
            scene: None,
            scene_open: false,
            status: None,
        }
    }

    fn handle(&mut self, action: toolbar::ToolbarAction, ctx: &egui::Context) -> Result<()> {
        use toolbar::ToolbarAction as A;

        match action {
            A::None => {}
            A::LoadFolder => {
                if let Some(folder) = rfd::FileDialog::new().set_title("Select Folder").pick_folder() {
                    self.load_folder(folder, ctx)?;
                }
            }
            A::StepUp => self.navigate(Navigation::StepUp, ctx)?,
            A::StepDown => self.navigate(Navigation::StepDown, ctx)?,
            A::JumpTo(text) => {
                let result = self.navigate(Navigation::Entry(text), ctx);
                if result.is_err() {
                    // Restore the current frame number in the entry field
                    self.frame_entry = self.session.cursor.display();
                }
                result?;
            }
            A::LoadImage => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &["png", "jpg", "bmp"])
                    .pick_file()
                {
                    let session = self
                        .session
                        .with_image(&path)
                        .with_context(|| format!("Failed to load image {}", path.display()))?;
                    self.replace_session(session, ctx)?;
                }
            }
            A::LoadPointCloud => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Point Cloud Files", &["pcd"])
                    .pick_file()
                {
                    let session = self
                        .session
                        .with_point_cloud(&path)
                        .with_context(|| format!("Failed to load point cloud {}", path.display()))?;
                    self.replace_session(session, ctx)?;
                }
            }
            A::ApplyOverlay => self.show_overlay(ctx)?,
            A::ShowScene => self.open_scene()?,
        }

        Ok(())
    }

    fn load_folder(&mut self, folder: PathBuf, ctx: &egui::Context) -> Result<()> {
        let session = Session::open(&folder, &self.config.layout)
            .with_context(|| format!("Failed to load folder {}", folder.display()))?;
        self.replace_session(session, ctx)
    }

    fn navigate(&mut self, navigation: Navigation, ctx: &egui::Context) -> Result<()> {
        let session = self
            .session
            .navigate(&navigation)
            .with_context(|| format!("Cannot go to frame ({:?})", navigation))?;
        self.replace_session(session, ctx)
    }

    /// Install a new session and refresh everything derived from it.
    fn replace_session(&mut self, session: Session, ctx: &egui::Context) -> Result<()> {
        self.session = session;
        self.frame_entry = if self.session.cursor.count > 0 {
            self.session.cursor.display()
        } else {
            String::new()
        };
        self.status = None;

        if self.config.overlay_after_switch {
            self.show_overlay(ctx)
        } else {
            self.show_plain_image(ctx);
            Ok(())
        }
    }

    /// Display the current image with its camera labels burned in.
    fn show_overlay(&mut self, ctx: &egui::Context) -> Result<()> {
        let Some(overlay) = self.session.overlay(&self.config.overlay, &self.config.category_aliases) else {
            return Ok(());
        };

        match overlay {
            Ok(overlay) => {
                self.upload(&overlay.image, ctx);
                self.labels = overlay.labels;
                Ok(())
            }
            Err(e) => {
                // Keep showing the frame, just without boxes
                self.show_plain_image(ctx);
                Err(e).context("Cannot draw camera labels")
            }
        }
    }

    fn show_plain_image(&mut self, ctx: &egui::Context) {
        self.labels.clear();
        match self.session.frame.image.clone() {
            Some(image) => self.upload(&image, ctx),
            None => {
                self.image_texture = None;
                self.image_size = None;
            }
        }
    }

    fn upload(&mut self, image: &RgbImage, ctx: &egui::Context) {
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgb(size, image.as_raw());
        self.image_texture = Some(ctx.load_texture("camera_image", color_image, egui::TextureOptions::LINEAR));
        self.image_size = Some(image.dimensions());
    }

    fn open_scene(&mut self) -> Result<()> {
        let Some(scene) = self.session.scene(&self.config.scene, &self.config.category_aliases) else {
            log::warn!("No point cloud loaded");
            return Ok(());
        };

        self.scene = Some(scene.context("Cannot build 3D view")?);
        self.scene_open = true;
        Ok(())
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Toolbar, disabled while the 3D view is open
        let action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                ui.add_enabled_ui(!self.scene_open, |ui| {
                    toolbar::show(ui, &mut self.frame_entry, self.session.cursor)
                })
                .inner
            })
            .inner;

        if let Err(e) = self.handle(action, ctx) {
            log::error!("{:#}", e);
            self.status = Some(format!("{:#}", e));
        }

        // Frame info panel (right side)
        egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| {
                properties::show(ui, &self.session, self.status.as_deref());
            });

        // Camera image (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            canvas::show(ui, &self.image_texture, self.image_size, &self.labels);
        });

        if self.scene_open {
            if let Some(scene) = &self.scene {
                scene_view::show(ctx, scene, &mut self.scene_open);
            }
            if !self.scene_open {
                self.scene = None;
            }
        }
    }
}
