// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometry helpers shared by the renderers and the UI.

pub mod geometry;
pub mod obb;
