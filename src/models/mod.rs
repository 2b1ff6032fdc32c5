// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: scenes and project state.

pub mod project;
pub mod scene;
