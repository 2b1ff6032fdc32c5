// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Snowflake - grow a one-line summary into an ordered set of scene files.
//!
//! The project keeps four fixed summary documents (one line, one paragraph,
//! one page, synopsis) and an ordered list of scenes, each backed by its own
//! reStructuredText file, and builds them into merged output documents.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod manager;
pub mod models;
pub mod project;
pub mod ui;

pub use error::{Result, SnowflakeError};
