// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! In-memory shapes a decoded artifact resolves to.
//!
//! The decision between tabular and opaque is made once, right after decode,
//! so rendering is a plain match over [`LoadedObject`].

use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, SchemaRef};
use arrow::record_batch::RecordBatch;

/// A decoded artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedObject {
    Tabular(TabularData),
    Opaque(OpaqueObject),
}

impl LoadedObject {
    /// Runtime type name used in logs and the non-tabular fallback.
    pub fn type_name(&self) -> &str {
        match self {
            LoadedObject::Tabular(_) => "table",
            LoadedObject::Opaque(opaque) => &opaque.type_name,
        }
    }
}

/// Rectangular data: ordered named columns with one declared type each.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularData {
    batch: RecordBatch,
}

impl TabularData {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Column name paired with its declared type, in column order.
    pub fn column_types(&self) -> Vec<(&str, &DataType)> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| (f.name().as_str(), f.data_type()))
            .collect()
    }

    /// `(name, type, values)` for every column, in order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &DataType, &ArrayRef)> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .zip(self.batch.columns())
            .map(|(field, array)| (field.name().as_str(), field.data_type(), array))
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }
}

/// Anything that is not tabular. Only the runtime type is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueObject {
    pub type_name: String,
}

impl OpaqueObject {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, Int64Array};
    use arrow::datatypes::{Field, Schema};
    use std::sync::Arc;

    fn sample() -> TabularData {
        let schema = Arc::new(Schema::new(vec![
            Field::new("speed", DataType::Int64, true),
            Field::new("ratio", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![30, 45])),
                Arc::new(Float64Array::from(vec![0.5, 0.25])),
            ],
        )
        .unwrap();
        TabularData::new(batch)
    }

    #[test]
    fn test_column_order_and_types() {
        let table = sample();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.column_names(), vec!["speed", "ratio"]);
        assert_eq!(
            table.column_types(),
            vec![("speed", &DataType::Int64), ("ratio", &DataType::Float64)]
        );
    }

    #[test]
    fn test_type_name() {
        assert_eq!(LoadedObject::Tabular(sample()).type_name(), "table");
        assert_eq!(
            LoadedObject::Opaque(OpaqueObject::new("mapping")).type_name(),
            "mapping"
        );
    }
}
