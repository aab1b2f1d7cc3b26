// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Viewer for a single tabular artifact.
//!
//! A run is one pass: [`loader::load`] reads and decodes the artifact at the
//! configured path, then [`render::render`] turns the result into a
//! [`render::Page`] that the `html` or `text` presenter serialises. A missing
//! or undecodable artifact halts the pass with an error page instead.
//!
//! ## Usage
//!
//! ```bash
//! frame-viewer serve --artifact cars.parquet --listen 0.0.0.0:8501
//! frame-viewer render --artifact cars.parquet --format text
//! ```

pub mod artifact;
pub mod config;
pub mod error;
pub mod html;
pub mod loader;
pub mod object;
pub mod render;
pub mod server;
pub mod stats;
pub mod text;

pub use config::ViewerConfig;
pub use error::{ArtifactError, LoadError};
pub use loader::load;
pub use object::{LoadedObject, OpaqueObject, TabularData};
pub use render::{Block, Page, TableView, render, render_halt, render_outcome};
