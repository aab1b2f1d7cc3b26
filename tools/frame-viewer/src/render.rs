// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Turns a load outcome into a [`Page`]: an ordered list of display blocks.
//!
//! A page knows nothing about markup. The `html` and `text` modules are the
//! presenters that serialise it.

use arrow::util::display::{ArrayFormatter, FormatOptions};
use serde::Serialize;
use tracing::warn;

use crate::error::LoadError;
use crate::object::{LoadedObject, OpaqueObject, TabularData};
use crate::stats::{self, CATEGORICAL_LABELS, NUMERIC_LABELS, Summary};

pub const TABLE_HEADER: &str = "Loaded Table";
pub const STATS_SUBHEADER: &str = "Descriptive Statistics";
pub const INFO_SUBHEADER: &str = "Data Information";
pub const NOT_TABULAR_WARNING: &str = "The loaded object is not tabular. Its type is:";

/// Grid of pre-formatted cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// Cell in `column` for every row.
    pub fn column(&self, column: &str) -> Option<Vec<&str>> {
        let idx = self.headers.iter().position(|h| h == column)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Block {
    Title(String),
    Divider,
    Header(String),
    Subheader(String),
    Caption(String),
    Error(String),
    Warning(String),
    Table(TableView),
    Code(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Page {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            blocks: vec![Block::Title(title.to_string()), Block::Divider],
        }
    }

    /// Chrome followed by a single error notice.
    pub fn halted(title: &str, message: &str) -> Self {
        let mut page = Self::new(title);
        page.push(Block::Error(message.to_string()));
        page
    }

    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// All table blocks, in display order.
    pub fn tables(&self) -> Vec<&TableView> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn is_halted(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b, Block::Error(_)))
    }
}

/// Render a loaded object. Total over its input.
pub fn render(object: &LoadedObject, title: &str) -> Page {
    let mut page = Page::new(title);
    match object {
        LoadedObject::Tabular(table) => render_table(&mut page, table),
        LoadedObject::Opaque(opaque) => render_opaque(&mut page, opaque),
    }
    page
}

/// Render the page for a halted load: chrome plus the error notice only.
pub fn render_halt(err: &LoadError, title: &str) -> Page {
    Page::halted(title, &err.to_string())
}

/// Render whichever outcome a load produced.
pub fn render_outcome(outcome: &Result<LoadedObject, LoadError>, title: &str) -> Page {
    match outcome {
        Ok(object) => render(object, title),
        Err(err) => render_halt(err, title),
    }
}

fn render_table(page: &mut Page, table: &TabularData) {
    page.push(Block::Header(TABLE_HEADER.to_string()));
    page.push(Block::Caption(format!(
        "Showing the first {} rows of the table.",
        table.num_rows()
    )));
    page.push(Block::Table(data_view(table)));

    page.push(Block::Subheader(STATS_SUBHEADER.to_string()));
    page.push(Block::Table(summary_view(&stats::describe(table))));

    page.push(Block::Subheader(INFO_SUBHEADER.to_string()));
    page.push(Block::Table(info_view(table)));
}

fn render_opaque(page: &mut Page, opaque: &OpaqueObject) {
    page.push(Block::Warning(NOT_TABULAR_WARNING.to_string()));
    page.push(Block::Code(opaque.type_name.clone()));
}

fn data_view(table: &TabularData) -> TableView {
    let options = FormatOptions::default();
    let formatters: Vec<Option<ArrayFormatter<'_>>> = table
        .columns()
        .map(|(name, _, array)| match ArrayFormatter::try_new(array.as_ref(), &options) {
            Ok(formatter) => Some(formatter),
            Err(e) => {
                warn!(column = name, "cannot format column, cells left empty: {e}");
                None
            }
        })
        .collect();

    let rows = (0..table.num_rows())
        .map(|row| {
            formatters
                .iter()
                .map(|f| f.as_ref().map_or_else(String::new, |f| f.value(row).to_string()))
                .collect()
        })
        .collect();

    TableView {
        headers: table.column_names().iter().map(|s| s.to_string()).collect(),
        rows,
    }
}

/// Statistics with one row per figure and one column per summarised column.
fn summary_view(summary: &Summary) -> TableView {
    let mut headers = vec![String::new()];
    headers.extend(summary.column_names().iter().map(|s| s.to_string()));

    let rows = match summary {
        Summary::Numeric(cols) => NUMERIC_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let mut row = vec![label.to_string()];
                row.extend(cols.iter().map(|c| {
                    if i == 0 {
                        c.count.to_string()
                    } else {
                        format_figure(c.figures()[i])
                    }
                }));
                row
            })
            .collect(),
        Summary::Categorical(cols) => CATEGORICAL_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let mut row = vec![label.to_string()];
                row.extend(cols.iter().map(|c| match i {
                    0 => c.count.to_string(),
                    1 => c.unique.to_string(),
                    2 => c.top.clone().unwrap_or_else(|| "NaN".to_string()),
                    _ if c.count == 0 => "NaN".to_string(),
                    _ => c.freq.to_string(),
                }));
                row
            })
            .collect(),
    };

    TableView { headers, rows }
}

fn info_view(table: &TabularData) -> TableView {
    TableView {
        headers: vec!["Feature".to_string(), "Data Type".to_string()],
        rows: table
            .column_types()
            .into_iter()
            .map(|(name, data_type)| vec![name.to_string(), data_type.to_string()])
            .collect(),
    }
}

fn format_figure(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.6}")
    }
}
