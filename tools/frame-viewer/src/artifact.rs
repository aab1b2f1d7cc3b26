// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! On-disk artifact formats.
//!
//! Two encodings are accepted, told apart by their leading magic bytes rather
//! than by file extension:
//!
//! - **Parquet** (`PAR1`): always tabular, the Arrow schema carries the
//!   declared column types.
//! - **Envelope** (`FVAR`): a bincode-serialized [`ArtifactEnvelope`] holding
//!   either a columnar table or an arbitrary non-tabular value.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::compute::concat_batches;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use bincode::Options;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::de::{self, DeserializeSeed, EnumAccess, SeqAccess, VariantAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ArtifactError;
use crate::object::{LoadedObject, OpaqueObject, TabularData};

/// Leading bytes of every Parquet file.
pub const PARQUET_MAGIC: &[u8; 4] = b"PAR1";

/// Leading bytes of an envelope artifact.
pub const ENVELOPE_MAGIC: &[u8; 4] = b"FVAR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Parquet,
    Envelope,
}

impl ArtifactFormat {
    /// Detect the format from the first bytes of the file.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PARQUET_MAGIC) {
            Some(ArtifactFormat::Parquet)
        } else if bytes.starts_with(ENVELOPE_MAGIC) {
            Some(ArtifactFormat::Envelope)
        } else {
            None
        }
    }
}

/// Decode the full contents of an artifact and resolve its shape.
pub fn decode(bytes: Bytes) -> Result<LoadedObject, ArtifactError> {
    match ArtifactFormat::sniff(&bytes) {
        Some(ArtifactFormat::Parquet) => decode_parquet(bytes).map(LoadedObject::Tabular),
        Some(ArtifactFormat::Envelope) => {
            ArtifactEnvelope::decode(&bytes[ENVELOPE_MAGIC.len()..])?.into_object()
        }
        None => Err(ArtifactError::UnrecognizedFormat),
    }
}

/// Read every row group into a single batch.
fn decode_parquet(bytes: Bytes) -> Result<TabularData, ArtifactError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader.collect::<Result<Vec<_>, ArrowError>>()?;
    let batch = concat_batches(&schema, &batches)?;

    Ok(TabularData::new(batch))
}

/// Envelope contents: version tag plus payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactEnvelope {
    /// Version for forward compatibility
    pub version: u8,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Table(TableArtifact),
    Value(ObjectValue),
}

impl ArtifactEnvelope {
    /// Current envelope format version
    pub const VERSION: u8 = 1;

    pub fn new(payload: Payload) -> Self {
        Self {
            version: Self::VERSION,
            payload,
        }
    }

    pub fn table(table: TableArtifact) -> Self {
        Self::new(Payload::Table(table))
    }

    pub fn value(value: ObjectValue) -> Self {
        Self::new(Payload::Value(value))
    }

    /// Magic bytes followed by the bincode body.
    pub fn encode(&self) -> Result<Vec<u8>, ArtifactError> {
        let body = bincode::serialize(self)?;
        let mut bytes = Vec::with_capacity(ENVELOPE_MAGIC.len() + body.len());
        bytes.extend_from_slice(ENVELOPE_MAGIC);
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Write the envelope to `path`, replacing it atomically.
    pub fn write(&self, path: &Path) -> Result<(), ArtifactError> {
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, self.encode()?)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Decode the bincode body (magic already stripped). The body must be
    /// consumed exactly; trailing bytes are a decode failure.
    pub fn decode(body: &[u8]) -> Result<Self, ArtifactError> {
        let envelope: Self = bincode::options()
            .with_fixint_encoding()
            .with_limit(body.len() as u64)
            .reject_trailing_bytes()
            .deserialize(body)?;

        if envelope.version > Self::VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: envelope.version,
                max_supported: Self::VERSION,
            });
        }

        Ok(envelope)
    }

    pub fn into_object(self) -> Result<LoadedObject, ArtifactError> {
        match self.payload {
            Payload::Table(table) => Ok(LoadedObject::Tabular(TabularData::new(
                table.into_record_batch()?,
            ))),
            Payload::Value(value) => Ok(LoadedObject::Opaque(OpaqueObject::new(
                value.type_name(),
            ))),
        }
    }
}

/// Columnar table with a declared schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableArtifact {
    pub columns: Vec<ColumnArtifact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnArtifact {
    pub name: String,
    pub values: ColumnValues,
}

/// Column values; the variant is the declared type. `None` is a null cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValues {
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    Utf8(Vec<Option<String>>),
    Boolean(Vec<Option<bool>>),
}

impl ColumnValues {
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnValues::Int64(_) => DataType::Int64,
            ColumnValues::Float64(_) => DataType::Float64,
            ColumnValues::Utf8(_) => DataType::Utf8,
            ColumnValues::Boolean(_) => DataType::Boolean,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Int64(v) => v.len(),
            ColumnValues::Float64(v) => v.len(),
            ColumnValues::Utf8(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn into_array(self) -> ArrayRef {
        match self {
            ColumnValues::Int64(v) => Arc::new(Int64Array::from(v)),
            ColumnValues::Float64(v) => Arc::new(Float64Array::from(v)),
            ColumnValues::Utf8(v) => Arc::new(StringArray::from(v)),
            ColumnValues::Boolean(v) => Arc::new(BooleanArray::from(v)),
        }
    }
}

impl TableArtifact {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, name: impl Into<String>, values: ColumnValues) -> Self {
        self.columns.push(ColumnArtifact {
            name: name.into(),
            values,
        });
        self
    }

    /// Build the Arrow batch. Columns of unequal length are rejected.
    pub fn into_record_batch(self) -> Result<RecordBatch, ArrowError> {
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|c| Field::new(&c.name, c.values.data_type(), true))
            .collect();
        let schema = Arc::new(Schema::new(fields));

        if self.columns.is_empty() {
            return RecordBatch::try_new_with_options(
                schema,
                Vec::new(),
                &RecordBatchOptions::new().with_row_count(Some(0)),
            );
        }

        let arrays = self
            .columns
            .into_iter()
            .map(|c| c.values.into_array())
            .collect();
        RecordBatch::try_new(schema, arrays)
    }
}

/// Deepest `List`/`Mapping` nesting accepted when decoding a value.
pub const MAX_VALUE_DEPTH: usize = 128;

/// Non-tabular value carried by an envelope.
///
/// Decoding goes through [`ValueSeed`] so that nesting is bounded by
/// [`MAX_VALUE_DEPTH`] instead of by the thread's stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObjectValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ObjectValue>),
    Mapping(Vec<(String, ObjectValue)>),
}

impl ObjectValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectValue::Null => "null",
            ObjectValue::Bool(_) => "boolean",
            ObjectValue::Int(_) => "integer",
            ObjectValue::Float(_) => "float",
            ObjectValue::Text(_) => "string",
            ObjectValue::List(_) => "list",
            ObjectValue::Mapping(_) => "mapping",
        }
    }
}

impl<'de> Deserialize<'de> for ObjectValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ValueSeed { depth: 0 }.deserialize(deserializer)
    }
}

const VALUE_VARIANTS: &[&str] = &["Null", "Bool", "Int", "Float", "Text", "List", "Mapping"];

#[derive(Deserialize)]
#[serde(variant_identifier)]
enum ValueTag {
    Null,
    Bool,
    Int,
    Float,
    Text,
    List,
    Mapping,
}

/// Decodes one `ObjectValue` found `depth` containers below the top level.
#[derive(Clone, Copy)]
struct ValueSeed {
    depth: usize,
}

impl ValueSeed {
    fn child(self) -> Self {
        Self {
            depth: self.depth + 1,
        }
    }
}

impl<'de> DeserializeSeed<'de> for ValueSeed {
    type Value = ObjectValue;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        if self.depth > MAX_VALUE_DEPTH {
            return Err(de::Error::custom(format!(
                "value nesting exceeds {MAX_VALUE_DEPTH} levels"
            )));
        }
        deserializer.deserialize_enum("ObjectValue", VALUE_VARIANTS, self)
    }
}

impl<'de> Visitor<'de> for ValueSeed {
    type Value = ObjectValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an ObjectValue")
    }

    fn visit_enum<A>(self, data: A) -> Result<Self::Value, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (tag, variant) = data.variant::<ValueTag>()?;
        match tag {
            ValueTag::Null => variant.unit_variant().map(|()| ObjectValue::Null),
            ValueTag::Bool => variant.newtype_variant().map(ObjectValue::Bool),
            ValueTag::Int => variant.newtype_variant().map(ObjectValue::Int),
            ValueTag::Float => variant.newtype_variant().map(ObjectValue::Float),
            ValueTag::Text => variant.newtype_variant().map(ObjectValue::Text),
            ValueTag::List => variant
                .newtype_variant_seed(ListSeed(self.child()))
                .map(ObjectValue::List),
            ValueTag::Mapping => variant
                .newtype_variant_seed(MappingSeed(self.child()))
                .map(ObjectValue::Mapping),
        }
    }
}

/// Caps preallocation; a corrupt length prefix must not reserve gigabytes.
fn cautious_capacity(hint: Option<usize>) -> usize {
    hint.unwrap_or(0).min(4096)
}

struct ListSeed(ValueSeed);

impl<'de> DeserializeSeed<'de> for ListSeed {
    type Value = Vec<ObjectValue>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for ListSeed {
    type Value = Vec<ObjectValue>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of ObjectValue")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(cautious_capacity(seq.size_hint()));
        while let Some(item) = seq.next_element_seed(self.0)? {
            items.push(item);
        }
        Ok(items)
    }
}

struct MappingSeed(ValueSeed);

impl<'de> DeserializeSeed<'de> for MappingSeed {
    type Value = Vec<(String, ObjectValue)>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for MappingSeed {
    type Value = Vec<(String, ObjectValue)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of (String, ObjectValue) entries")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut entries = Vec::with_capacity(cautious_capacity(seq.size_hint()));
        while let Some(entry) = seq.next_element_seed(EntrySeed(self.0))? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

struct EntrySeed(ValueSeed);

impl<'de> DeserializeSeed<'de> for EntrySeed {
    type Value = (String, ObjectValue);

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_tuple(2, self)
    }
}

impl<'de> Visitor<'de> for EntrySeed {
    type Value = (String, ObjectValue);

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a (String, ObjectValue) entry")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let key: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let value = seq
            .next_element_seed(self.0)?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        Ok((key, value))
    }
}
