// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Descriptive statistics over a table, shaped like pandas `describe()`.
//!
//! Numeric columns get `count, mean, std, min, 25%, 50%, 75%, max`. When a
//! table has no numeric column at all, every column is summarised as
//! categorical data instead: `count, unique, top, freq`.

use std::collections::HashMap;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use tracing::warn;

use crate::object::TabularData;

pub const NUMERIC_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
pub const CATEGORICAL_LABELS: [&str; 4] = ["count", "unique", "top", "freq"];

#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Numeric(Vec<NumericSummary>),
    Categorical(Vec<CategoricalSummary>),
}

impl Summary {
    pub fn column_names(&self) -> Vec<&str> {
        match self {
            Summary::Numeric(cols) => cols.iter().map(|c| c.name.as_str()).collect(),
            Summary::Categorical(cols) => cols.iter().map(|c| c.name.as_str()).collect(),
        }
    }

    pub fn counts(&self) -> Vec<usize> {
        match self {
            Summary::Numeric(cols) => cols.iter().map(|c| c.count).collect(),
            Summary::Categorical(cols) => cols.iter().map(|c| c.count).collect(),
        }
    }
}

/// Summary of one numeric column. Figures are NaN when undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    fn from_values(name: &str, mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        let count = values.len();

        if count == 0 {
            return Self {
                name: name.to_string(),
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                q50: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = if count < 2 {
            f64::NAN
        } else {
            let sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sq / (n - 1.0)).sqrt()
        };

        Self {
            name: name.to_string(),
            count,
            mean,
            std,
            min: values[0],
            q25: quantile(&values, 0.25),
            q50: quantile(&values, 0.5),
            q75: quantile(&values, 0.75),
            max: values[count - 1],
        }
    }

    /// Figures in [`NUMERIC_LABELS`] order, count included.
    pub fn figures(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.q50,
            self.q75,
            self.max,
        ]
    }
}

/// Summary of one non-numeric column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalSummary {
    pub name: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

/// Linear interpolation between the closest ranks of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

pub fn describe(table: &TabularData) -> Summary {
    let numeric: Vec<NumericSummary> = table
        .columns()
        .filter(|(_, data_type, _)| data_type.is_numeric())
        .map(|(name, _, array)| NumericSummary::from_values(name, numeric_values(name, array)))
        .collect();

    if !numeric.is_empty() || table.num_columns() == 0 {
        return Summary::Numeric(numeric);
    }

    Summary::Categorical(
        table
            .columns()
            .map(|(name, _, array)| categorical(name, array))
            .collect(),
    )
}

/// Non-null, non-NaN values of a numeric column as `f64`.
fn numeric_values(name: &str, array: &ArrayRef) -> Vec<f64> {
    let floats = match cast(array, &DataType::Float64) {
        Ok(floats) => floats,
        Err(e) => {
            warn!(column = name, "cannot summarise column: {e}");
            return Vec::new();
        }
    };

    floats
        .as_primitive::<Float64Type>()
        .iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect()
}

fn categorical(name: &str, array: &ArrayRef) -> CategoricalSummary {
    let options = FormatOptions::default();
    let mut freq: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut count = 0;

    match ArrayFormatter::try_new(array.as_ref(), &options) {
        Ok(formatter) => {
            for idx in 0..array.len() {
                if array.is_null(idx) {
                    continue;
                }
                count += 1;
                let value = formatter.value(idx).to_string();
                let seen = freq.entry(value.clone()).or_insert(0);
                if *seen == 0 {
                    order.push(value);
                }
                *seen += 1;
            }
        }
        Err(e) => warn!(column = name, "cannot summarise column: {e}"),
    }

    // First value to reach the highest frequency wins ties.
    let mut top: Option<(&String, usize)> = None;
    for value in &order {
        let n = freq[value];
        if top.is_none_or(|(_, best)| n > best) {
            top = Some((value, n));
        }
    }

    CategoricalSummary {
        name: name.to_string(),
        count,
        unique: order.len(),
        top: top.map(|(v, _)| v.clone()),
        freq: top.map_or(0, |(_, n)| n),
    }
}
