// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Burned-in 2D box overlay for camera images.
//!
//! Every pass starts from a copy of the pristine decoded image, so
//! rendering the same shapes twice yields identical pixels.

use crate::error::CategoryError;
use crate::models::annotation::{Category, CategoryAliases, Shape2D};
use crate::util::geometry::shape_rect;
use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, text_size};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Caption font, taken from the fonts bundled with egui.
const LABEL_FONT: &str = "Ubuntu-Light";

/// Caption pixel height at font scale 1.0.
const LABEL_FONT_PX: f32 = 30.0;

/// Outline color per category, RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayPalette {
    pub ship: [u8; 3],
    pub buoy: [u8; 3],
    pub other: [u8; 3],
}

impl Default for OverlayPalette {
    fn default() -> Self {
        Self {
            ship: [0, 255, 0],
            buoy: [255, 0, 0],
            other: [0, 0, 255],
        }
    }
}

impl OverlayPalette {
    pub fn color(&self, category: Category) -> Rgb<u8> {
        match category {
            Category::Ship => Rgb(self.ship),
            Category::Buoy => Rgb(self.buoy),
            Category::Other => Rgb(self.other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub palette: OverlayPalette,
    /// Outline width in pixels.
    pub thickness: u32,
    pub font_scale: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            palette: OverlayPalette::default(),
            thickness: 2,
            font_scale: 0.6,
        }
    }
}

/// Where a category caption goes, in image pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    pub text: String,
    /// Top-left corner of the caption box.
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: Rgb<u8>,
}

/// An annotated copy of a camera image.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub image: RgbImage,
    pub labels: Vec<LabelPlacement>,
}

fn label_font() -> Option<&'static FontRef<'static>> {
    static FONT: OnceLock<Option<FontRef<'static>>> = OnceLock::new();

    FONT.get_or_init(|| {
        let fonts = egui::FontDefinitions::default();
        match fonts.font_data.get(LABEL_FONT).map(|data| &data.font) {
            Some(&Cow::Borrowed(bytes)) => FontRef::try_from_slice(bytes)
                .map_err(|e| log::warn!("Cannot parse caption font {}: {}", LABEL_FONT, e))
                .ok(),
            _ => {
                log::warn!("Caption font {} is not bundled", LABEL_FONT);
                None
            }
        }
    })
    .as_ref()
}

/// Rendered size of `text` at `font_scale`, in pixels.
///
/// Without the caption font, every glyph is taken as half as wide as it is tall.
pub fn label_extent(text: &str, font_scale: f32) -> (u32, u32) {
    let px = LABEL_FONT_PX * font_scale;
    match label_font() {
        Some(font) => text_size(PxScale::from(px), font, text),
        None => {
            let chars = text.chars().count() as f32;
            ((chars * px / 2.0).round() as u32, px.round() as u32)
        }
    }
}

/// Draw every shape as a rectangle outline on a copy of `original`.
///
/// Fails on the first shape whose label is not a known category.
pub fn render_overlay(
    original: &RgbImage,
    shapes: &[Shape2D],
    style: &OverlayStyle,
    aliases: &CategoryAliases,
) -> Result<Overlay, CategoryError> {
    let mut image = original.clone();
    let mut labels = Vec::with_capacity(shapes.len());

    for shape in shapes {
        let category = aliases.resolve(&shape.label)?;
        let Some(((x1, y1), (x2, y2))) = shape_rect(&shape.points) else {
            log::warn!("Skipping {} shape without points", shape.label);
            continue;
        };
        let color = style.palette.color(category);

        draw_outline(&mut image, (x1, y1), (x2, y2), style.thickness, color);

        let (width, height) = label_extent(&shape.label, style.font_scale);
        let thickness = style.thickness as i32;
        let above = y1.saturating_sub(height as i32).saturating_sub(thickness);
        labels.push(LabelPlacement {
            text: shape.label.clone(),
            x: x1,
            y: if above >= 0 { above } else { y1.saturating_add(thickness) },
            width,
            height,
            color,
        });
    }

    Ok(Overlay { image, labels })
}

/// Rectangle outline `thickness` pixels wide, centered on the box edges.
///
/// Edges are first clamped to a `thickness` wide band around the image, so
/// an edge beyond the band stays invisible and the drawing work is bounded
/// by the image size.
fn draw_outline(image: &mut RgbImage, min: (i32, i32), max: (i32, i32), thickness: u32, color: Rgb<u8>) {
    let (image_width, image_height) = image.dimensions();
    let margin = i64::from(thickness);
    let clamp_x = |v: i32| i64::from(v).clamp(-margin, i64::from(image_width) + margin);
    let clamp_y = |v: i32| i64::from(v).clamp(-margin, i64::from(image_height) + margin);

    let (left, top) = (clamp_x(min.0), clamp_y(min.1));
    let (right, bottom) = (clamp_x(max.0), clamp_y(max.1));

    for ring in 0..margin {
        let grow = margin / 2 - ring;
        let width = (right - left + 1 + 2 * grow).max(1);
        let height = (bottom - top + 1 + 2 * grow).max(1);
        let rect = Rect::at((left - grow) as i32, (top - grow) as i32).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(image, rect, color);
    }
}
