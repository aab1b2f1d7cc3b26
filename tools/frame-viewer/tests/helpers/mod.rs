// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use frame_viewer::artifact::{ArtifactEnvelope, ColumnValues, ObjectValue, TableArtifact};
use parquet::arrow::ArrowWriter;

/// `speed`/`weight` table with two rows.
pub fn cars() -> TableArtifact {
    TableArtifact::new()
        .with_column("speed", ColumnValues::Int64(vec![Some(30), Some(45)]))
        .with_column("weight", ColumnValues::Int64(vec![Some(1200), Some(1500)]))
}

pub fn empty_cars() -> TableArtifact {
    TableArtifact::new()
        .with_column("speed", ColumnValues::Int64(vec![]))
        .with_column("weight", ColumnValues::Int64(vec![]))
}

pub fn settings() -> ObjectValue {
    ObjectValue::Mapping(vec![
        ("max_depth".to_string(), ObjectValue::Int(4)),
        ("criterion".to_string(), ObjectValue::Text("gini".to_string())),
    ])
}

pub fn write_table(dir: &Path, name: &str, table: TableArtifact) -> PathBuf {
    let path = dir.join(name);
    ArtifactEnvelope::table(table).write(&path).unwrap();
    path
}

pub fn write_value(dir: &Path, name: &str, value: ObjectValue) -> PathBuf {
    let path = dir.join(name);
    ArtifactEnvelope::value(value).write(&path).unwrap();
    path
}

pub fn write_parquet(dir: &Path, name: &str, table: TableArtifact) -> PathBuf {
    let path = dir.join(name);
    let batch = table.into_record_batch().unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    path
}

pub fn write_bytes(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
