// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Turning loaded frames into something to look at.

pub mod camera;
pub mod overlay;
pub mod scene;
