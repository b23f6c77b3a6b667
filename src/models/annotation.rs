// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the on-disk label schemas for camera images (2D
//! shapes) and point clouds (3D boxes), and the closed set of object
//! categories they refer to.

use crate::error::CategoryError;
use crate::util::geometry::{box_corners, BoxParams};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Object class of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ship,
    Buoy,
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Ship, Category::Buoy, Category::Other];

    /// The exact spelling used in label files.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Ship => "ship",
            Category::Buoy => "buoy",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CategoryError(s.to_string()))
    }
}

/// Explicit extra spellings accepted for a category.
///
/// Empty by default: a label spelled differently from [`Category::as_str`]
/// is reported as unknown unless an alias for it has been configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAliases(pub BTreeMap<String, Category>);

impl CategoryAliases {
    /// Resolve a label string to a category, exact spelling first.
    pub fn resolve(&self, label: &str) -> Result<Category, CategoryError> {
        label
            .parse::<Category>()
            .or_else(|err| self.0.get(label).copied().ok_or(err))
    }
}

/// A labelled shape drawn on a camera image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape2D {
    pub label: String,
    /// Pixel coordinates; the first and last points are opposite rectangle corners.
    pub points: Vec<[f64; 2]>,
}

/// Contents of a camera label file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageLabels {
    #[serde(default)]
    pub shapes: Vec<Shape2D>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub height: f64,
    pub width: f64,
    pub length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    #[serde(rename = "rotationYaw")]
    pub rotation_yaw: f64,
}

/// Center/size/yaw description of a 3D box in the sensor frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3D {
    pub dimension: Dimension,
    pub location: Location,
    pub orientation: Orientation,
}

impl Box3D {
    pub fn params(&self) -> BoxParams {
        BoxParams {
            height: self.dimension.height,
            width: self.dimension.width,
            length: self.dimension.length,
            x: self.location.x,
            y: self.location.y,
            z: self.location.z,
            yaw: self.orientation.rotation_yaw,
        }
    }

    /// The eight world-space corners of this box.
    pub fn corners(&self) -> [Point3<f64>; 8] {
        box_corners(&self.params())
    }

    /// All seven parameters are finite numbers.
    pub fn is_finite(&self) -> bool {
        let p = self.params();
        [p.height, p.width, p.length, p.x, p.y, p.z, p.yaw]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// A labelled 3D box on a point cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Box3DLabel {
    pub category: String,
    pub box3d: Box3D,
}

/// Contents of a point-cloud label file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudLabels {
    #[serde(default)]
    pub labels: Vec<Box3DLabel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_exact_spelling() {
        assert_eq!("ship".parse::<Category>(), Ok(Category::Ship));
        assert_eq!("buoy".parse::<Category>(), Ok(Category::Buoy));
        assert_eq!("other".parse::<Category>(), Ok(Category::Other));
        assert_eq!("Ship".parse::<Category>(), Err(CategoryError("Ship".into())));
    }

    #[test]
    fn test_plural_other_is_unknown_without_alias() {
        let aliases = CategoryAliases::default();
        assert_eq!(
            aliases.resolve("others"),
            Err(CategoryError("others".to_string()))
        );
    }

    #[test]
    fn test_alias_resolves_configured_spelling() {
        let mut map = BTreeMap::new();
        map.insert("others".to_string(), Category::Other);
        let aliases = CategoryAliases(map);

        assert_eq!(aliases.resolve("others"), Ok(Category::Other));
        assert_eq!(aliases.resolve("ship"), Ok(Category::Ship));
        assert!(aliases.resolve("kayak").is_err());
    }

    #[test]
    fn test_cloud_label_schema() {
        let json = r#"{"labels": [{"category": "buoy", "box3d": {
            "dimension": {"height": 1.5, "width": 0.8, "length": 0.8},
            "location": {"x": 12.0, "y": -3.0, "z": 0.4},
            "orientation": {"rotationYaw": 0.25}}}]}"#;
        let labels: CloudLabels = serde_json::from_str(json).unwrap();

        assert_eq!(labels.labels.len(), 1);
        let label = &labels.labels[0];
        assert_eq!(label.category, "buoy");
        assert_eq!(label.box3d.dimension.height, 1.5);
        assert_eq!(label.box3d.location.y, -3.0);
        assert_eq!(label.box3d.orientation.rotation_yaw, 0.25);
        assert!(label.box3d.is_finite());
    }

    #[test]
    fn test_image_label_schema_keeps_unknown_category() {
        let json = r#"{"shapes": [{"label": "kayak", "points": [[1, 2], [30.5, 40]]}]}"#;
        let labels: ImageLabels = serde_json::from_str(json).unwrap();

        assert_eq!(labels.shapes[0].label, "kayak");
        assert_eq!(labels.shapes[0].points, vec![[1.0, 2.0], [30.5, 40.0]]);
    }
}
