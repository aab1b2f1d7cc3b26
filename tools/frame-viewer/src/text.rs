// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Plain-text presenter for a [`Page`], used by `frame-viewer render`.
//!
//! Tables go through Arrow's pretty printer: each [`TableView`] becomes a
//! batch of Utf8 columns holding the already-formatted cells.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow::util::pretty::pretty_format_batches;

use crate::render::{Block, Page, TableView};

pub fn to_text(page: &Page) -> Result<String, ArrowError> {
    let mut out = String::new();
    for block in &page.blocks {
        match block {
            Block::Title(text) => {
                out.push_str(&format!("{text}\n{}\n", "=".repeat(text.chars().count())));
            }
            Block::Divider => out.push_str("----\n"),
            Block::Header(text) => {
                out.push_str(&format!("\n{text}\n{}\n", "-".repeat(text.chars().count())));
            }
            Block::Subheader(text) => out.push_str(&format!("\n{text}\n")),
            Block::Caption(text) => out.push_str(&format!("{text}\n")),
            Block::Error(text) => out.push_str(&format!("ERROR: {text}\n")),
            Block::Warning(text) => out.push_str(&format!("WARNING: {text}\n")),
            Block::Code(text) => out.push_str(&format!("    {text}\n")),
            Block::Table(table) => out.push_str(&format!("{}\n", format_table(table)?)),
        }
    }
    Ok(out)
}

fn format_table(table: &TableView) -> Result<String, ArrowError> {
    let batch = to_batch(table)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}

/// One Utf8 column per header, cells copied as-is.
fn to_batch(table: &TableView) -> Result<RecordBatch, ArrowError> {
    let fields: Vec<Field> = table
        .headers
        .iter()
        .map(|h| Field::new(h, DataType::Utf8, false))
        .collect();
    let columns: Vec<ArrayRef> = (0..table.num_columns())
        .map(|idx| {
            let cells: Vec<&str> = table.rows.iter().map(|row| row[idx].as_str()).collect();
            Arc::new(StringArray::from(cells)) as ArrayRef
        })
        .collect();

    RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        columns,
        &RecordBatchOptions::new().with_row_count(Some(table.num_rows())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_layout() {
        let table = TableView {
            headers: vec!["speed".to_string(), "w".to_string()],
            rows: vec![vec!["30".to_string(), "1200".to_string()]],
        };
        let out = format_table(&table).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "+-------+------+");
        assert_eq!(lines[1], "| speed | w    |");
        assert_eq!(lines[3], "| 30    | 1200 |");
        assert_eq!(lines[4], lines[0]);
    }

    #[test]
    fn test_empty_table_keeps_headers() {
        let table = TableView {
            headers: vec!["speed".to_string()],
            rows: Vec::new(),
        };
        let out = format_table(&table).unwrap();

        assert!(out.contains("| speed |"), "got:\n{out}");
        assert!(!out.lines().any(|l| l.starts_with("| ") && !l.contains("speed")));
    }

    #[test]
    fn test_blank_header_column() {
        let table = TableView {
            headers: vec![String::new(), "speed".to_string()],
            rows: vec![vec!["count".to_string(), "2".to_string()]],
        };
        let out = format_table(&table).unwrap();

        assert!(out.contains("| count | 2     |"), "got:\n{out}");
    }

    #[test]
    fn test_warning_and_code() {
        let page = Page {
            title: "Viewer".to_string(),
            blocks: vec![
                Block::Title("Viewer".to_string()),
                Block::Divider,
                Block::Warning("not tabular".to_string()),
                Block::Code("mapping".to_string()),
            ],
        };

        assert_eq!(
            to_text(&page).unwrap(),
            "Viewer\n======\n----\nWARNING: not tabular\n    mapping\n"
        );
    }
}
