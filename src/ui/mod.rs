// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Outline and pane layout descriptions consumed by the editor.

pub mod layout;
pub mod outline;
