// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a load pass halts. Either one stops the run before anything but
/// the error notice is rendered.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Error: The file '{}' was not found.", path.display())]
    MissingArtifact { path: PathBuf },

    #[error("An error occurred while loading the artifact: {source}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: ArtifactError,
    },
}

impl LoadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::MissingArtifact { path } | LoadError::Deserialization { path, .. } => path,
        }
    }
}

/// Decode failures for an artifact that exists on disk.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Unsupported artifact version: found {found}, max supported {max_supported}")]
    UnsupportedVersion { found: u8, max_supported: u8 },

    #[error("unrecognized artifact format (expected a Parquet file or a frame-viewer envelope)")]
    UnrecognizedFormat,
}
