// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for dataset folders, label files and media.

pub mod annotations;
pub mod frame_index;
pub mod media;
