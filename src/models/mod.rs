// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: label schemas and viewer session state.

pub mod annotation;
pub mod session;
