// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dataset folder indexing.
//!
//! A dataset folder holds four independently listed collections (camera
//! images, camera labels, point clouds, point-cloud labels). Frames are
//! paired by the digits embedded in the image filename: the other three
//! files are the first, in sorted order, whose name contains those digits.
//!
//! Lists are sorted lexicographically, which matches frame order only for
//! zero-padded frame numbers.

use crate::error::FrameIndexError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "bmp"];
pub const LABEL_EXTENSIONS: &[&str] = &["json"];
pub const POINT_CLOUD_EXTENSIONS: &[&str] = &["pcd"];

/// Sub-folder names of a dataset folder, relative to its root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderLayout {
    /// Image folder candidates, tried in order until one exists.
    pub image_dirs: Vec<PathBuf>,
    pub point_cloud_dir: PathBuf,
    pub image_label_dir: PathBuf,
    pub cloud_label_dir: PathBuf,
}

impl Default for FolderLayout {
    fn default() -> Self {
        Self {
            image_dirs: vec![
                PathBuf::from("undist_images/CAM_FRONT"),
                PathBuf::from("rect_images/CAM_FRONT"),
            ],
            point_cloud_dir: PathBuf::from("point_clouds"),
            image_label_dir: PathBuf::from("camera_label"),
            cloud_label_dir: PathBuf::from("annotations"),
        }
    }
}

/// The files belonging to one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet {
    pub index: usize,
    /// Digits extracted from the image filename.
    pub identifier: String,
    pub image: PathBuf,
    pub image_label: Option<PathBuf>,
    pub point_cloud: Option<PathBuf>,
    pub cloud_label: Option<PathBuf>,
}

impl FrameSet {
    /// Both the image and its point cloud were found.
    pub fn is_complete(&self) -> bool {
        self.point_cloud.is_some()
    }
}

/// Sorted file listings of a dataset folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameIndex {
    pub root: PathBuf,
    pub image_dir: PathBuf,
    pub point_cloud_dir: PathBuf,
    pub image_label_dir: PathBuf,
    pub cloud_label_dir: PathBuf,
    pub images: Vec<String>,
    pub image_labels: Vec<String>,
    pub point_clouds: Vec<String>,
    pub cloud_labels: Vec<String>,
}

impl FrameIndex {
    /// List all four collections under `root`.
    ///
    /// Fails if no image folder candidate exists or any required folder
    /// cannot be listed.
    pub fn load(root: &Path, layout: &FolderLayout) -> Result<Self, FrameIndexError> {
        let (image_dir, images) = list_image_dir(root, layout)?;

        let point_cloud_dir = root.join(&layout.point_cloud_dir);
        let image_label_dir = root.join(&layout.image_label_dir);
        let cloud_label_dir = root.join(&layout.cloud_label_dir);

        let image_labels = list_files(&image_label_dir, LABEL_EXTENSIONS, "camera label")?;
        let point_clouds = list_files(&point_cloud_dir, POINT_CLOUD_EXTENSIONS, "point cloud")?;
        let cloud_labels = list_files(&cloud_label_dir, LABEL_EXTENSIONS, "point cloud label")?;

        log::info!("Loaded folder: {}", root.display());
        log::info!("Image files {}: {}", image_dir.display(), images.len());
        log::info!("LiDAR files {}: {}", point_cloud_dir.display(), point_clouds.len());

        Ok(Self {
            root: root.to_path_buf(),
            image_dir,
            point_cloud_dir,
            image_label_dir,
            cloud_label_dir,
            images,
            image_labels,
            point_clouds,
            cloud_labels,
        })
    }

    /// Number of frames, one per image.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Resolve the files of frame `index`, or `None` past the last image.
    ///
    /// An image filename without digits resolves with no point cloud and no labels.
    pub fn resolve(&self, index: usize) -> Option<FrameSet> {
        let image = self.images.get(index)?;
        let identifier = frame_identifier(image);

        let point_cloud = find_matching(&self.point_clouds, &identifier);
        if point_cloud.is_none() {
            log::warn!("No matching point cloud for frame number {:?}", identifier);
        }
        let image_label = find_matching(&self.image_labels, &identifier);
        if image_label.is_none() {
            log::warn!("No camera label for frame number {:?}", identifier);
        }
        let cloud_label = find_matching(&self.cloud_labels, &identifier);
        if cloud_label.is_none() {
            log::warn!("No point cloud label for frame number {:?}", identifier);
        }

        Some(FrameSet {
            index,
            image: self.image_dir.join(image),
            image_label: image_label.map(|f| self.image_label_dir.join(f)),
            point_cloud: point_cloud.map(|f| self.point_cloud_dir.join(f)),
            cloud_label: cloud_label.map(|f| self.cloud_label_dir.join(f)),
            identifier,
        })
    }
}

/// All ASCII digits of a filename, concatenated in order.
pub fn frame_identifier(file_name: &str) -> String {
    file_name.chars().filter(char::is_ascii_digit).collect()
}

/// First name containing `identifier`. A filename without digits matches nothing.
fn find_matching<'a>(names: &'a [String], identifier: &str) -> Option<&'a String> {
    if identifier.is_empty() {
        return None;
    }
    names.iter().find(|name| name.contains(identifier))
}

fn list_image_dir(root: &Path, layout: &FolderLayout) -> Result<(PathBuf, Vec<String>), FrameIndexError> {
    for candidate in &layout.image_dirs {
        let dir = root.join(candidate);
        match list_files(&dir, IMAGE_EXTENSIONS, "image") {
            Ok(images) => return Ok((dir, images)),
            Err(FrameIndexError::Directory { source, .. }) if source.kind() == ErrorKind::NotFound => {
                log::info!("Image folder {} not found, trying next candidate", dir.display());
            }
            Err(e) => return Err(e),
        }
    }

    Err(FrameIndexError::NoImageDirectory {
        root: root.to_path_buf(),
    })
}

/// Sorted names of the files in `dir` with one of `extensions` (case-insensitive).
pub fn list_files(dir: &Path, extensions: &[&str], kind: &'static str) -> Result<Vec<String>, FrameIndexError> {
    let to_error = |source: std::io::Error| FrameIndexError::Directory {
        kind,
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(to_error)? {
        let entry = entry.map_err(to_error)?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            log::warn!("Skipping non UTF-8 file name in {}", dir.display());
            continue;
        };
        if has_extension(&name, extensions) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    let lower = name.to_ascii_lowercase();
    extensions.iter().any(|ext| {
        lower
            .strip_suffix(*ext)
            .is_some_and(|stem| stem.ends_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn index_of(images: &[&str], point_clouds: &[&str]) -> FrameIndex {
        FrameIndex {
            image_dir: PathBuf::from("img"),
            point_cloud_dir: PathBuf::from("pc"),
            images: images.iter().map(|s| s.to_string()).collect(),
            point_clouds: point_clouds.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Create a dataset folder with the given files (paths relative to root).
    fn dataset(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, b"").unwrap();
        }
        dir
    }

    #[test]
    fn test_frame_identifier() {
        assert_eq!(frame_identifier("0001.png"), "0001");
        assert_eq!(frame_identifier("cam_front_000123.jpg"), "000123");
        assert_eq!(frame_identifier("image.png"), "");
    }

    #[test]
    fn test_resolve_matches_by_number() {
        let index = index_of(&["0001.png", "0002.png"], &["pc_0001.pcd", "pc_0002.pcd"]);

        let frame = index.resolve(0).unwrap();
        assert_eq!(frame.identifier, "0001");
        assert_eq!(frame.image, PathBuf::from("img/0001.png"));
        assert_eq!(frame.point_cloud, Some(PathBuf::from("pc/pc_0001.pcd")));

        let frame = index.resolve(1).unwrap();
        assert_eq!(frame.point_cloud, Some(PathBuf::from("pc/pc_0002.pcd")));

        assert!(index.resolve(2).is_none());
    }

    #[test]
    fn test_missing_point_cloud_leaves_slot_empty() {
        let index = index_of(&["0001.png", "0002.png"], &["pc_0001.pcd"]);

        let frame = index.resolve(1).unwrap();
        assert_eq!(frame.point_cloud, None);
        assert!(!frame.is_complete());
        assert_eq!(frame.image_label, None);
        assert_eq!(frame.cloud_label, None);
    }

    #[test]
    fn test_image_without_digits_matches_nothing() {
        let index = index_of(&["front.png"], &["pc_0001.pcd"]);
        assert_eq!(index.resolve(0).unwrap().point_cloud, None);
    }

    #[test]
    fn test_extension_filter_is_case_insensitive() {
        assert!(has_extension("0001.PNG", IMAGE_EXTENSIONS));
        assert!(has_extension("0001.bmp", IMAGE_EXTENSIONS));
        assert!(!has_extension("0001.jpeg", IMAGE_EXTENSIONS));
        assert!(!has_extension("png", IMAGE_EXTENSIONS));
        assert!(!has_extension("0001.pcd.bak", POINT_CLOUD_EXTENSIONS));
    }

    #[test]
    fn test_load_lists_and_sorts_folders() {
        let root = dataset(&[
            "undist_images/CAM_FRONT/0002.png",
            "undist_images/CAM_FRONT/0001.png",
            "undist_images/CAM_FRONT/notes.txt",
            "point_clouds/0001.pcd",
            "point_clouds/0002.pcd",
            "camera_label/0001.json",
            "annotations/0002.json",
        ]);

        let index = FrameIndex::load(root.path(), &FolderLayout::default()).unwrap();
        assert_eq!(index.images, vec!["0001.png", "0002.png"]);
        assert_eq!(index.point_clouds, vec!["0001.pcd", "0002.pcd"]);
        assert_eq!(index.len(), 2);

        let frame = index.resolve(0).unwrap();
        assert_eq!(frame.image_label, Some(root.path().join("camera_label/0001.json")));
        assert_eq!(frame.cloud_label, None);
    }

    #[test]
    fn test_load_falls_back_to_rectified_images() {
        let root = dataset(&[
            "rect_images/CAM_FRONT/0001.png",
            "point_clouds/0001.pcd",
            "camera_label/0001.json",
            "annotations/0001.json",
        ]);

        let index = FrameIndex::load(root.path(), &FolderLayout::default()).unwrap();
        assert_eq!(index.image_dir, root.path().join("rect_images/CAM_FRONT"));
        assert_eq!(index.images, vec!["0001.png"]);
    }

    #[test]
    fn test_load_without_image_folder_fails() {
        let root = dataset(&["point_clouds/0001.pcd", "camera_label/0001.json", "annotations/0001.json"]);

        let result = FrameIndex::load(root.path(), &FolderLayout::default());
        assert!(matches!(result, Err(FrameIndexError::NoImageDirectory { .. })));
    }

    #[test]
    fn test_load_without_point_cloud_folder_fails() {
        let root = dataset(&[
            "undist_images/CAM_FRONT/0001.png",
            "camera_label/0001.json",
            "annotations/0001.json",
        ]);

        let result = FrameIndex::load(root.path(), &FolderLayout::default());
        match result {
            Err(FrameIndexError::Directory { kind, .. }) => assert_eq!(kind, "point cloud"),
            other => panic!("expected directory error, got {:?}", other),
        }
    }
}
