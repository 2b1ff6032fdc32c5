// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for scene, project and output files.

pub mod builder;
pub mod scene_store;
pub mod serialization;
