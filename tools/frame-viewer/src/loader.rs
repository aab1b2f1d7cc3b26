// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use bytes::Bytes;
use tracing::{info, warn};

use crate::artifact;
use crate::error::{ArtifactError, LoadError};
use crate::object::LoadedObject;

/// Load the artifact at `path` and resolve it to a [`LoadedObject`].
///
/// A missing file and a file that cannot be decoded are both terminal for the
/// current pass; no partial object is ever returned.
pub fn load(path: &Path) -> Result<LoadedObject, LoadError> {
    info!(path = %path.display(), "loading artifact");

    let result = read_and_decode(path);
    match &result {
        Ok(LoadedObject::Tabular(table)) => info!(
            path = %path.display(),
            rows = table.num_rows(),
            columns = table.num_columns(),
            "loaded tabular artifact"
        ),
        Ok(object) => info!(
            path = %path.display(),
            type_name = object.type_name(),
            "loaded non-tabular artifact"
        ),
        Err(e) => warn!(path = %path.display(), "{e}"),
    }
    result
}

fn read_and_decode(path: &Path) -> Result<LoadedObject, LoadError> {
    if !path.exists() {
        return Err(missing(path));
    }

    let bytes = read_all(path).map_err(|e| match e.kind() {
        // Removed between the existence check and the open.
        ErrorKind::NotFound => missing(path),
        _ => deserialization(path, e.into()),
    })?;

    artifact::decode(bytes).map_err(|e| deserialization(path, e))
}

/// The handle is dropped before decoding starts.
fn read_all(path: &Path) -> std::io::Result<Bytes> {
    let mut file = File::open(path)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(Bytes::from(buf))
}

fn missing(path: &Path) -> LoadError {
    LoadError::MissingArtifact {
        path: path.to_path_buf(),
    }
}

fn deserialization(path: &Path, source: ArtifactError) -> LoadError {
    LoadError::Deserialization {
        path: path.to_path_buf(),
        source,
    }
}
