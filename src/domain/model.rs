use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 單一儲存格的值
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Null,
    /// Booleans and nested JSON, kept as they arrived.
    Other(serde_json::Value),
}

impl CellValue {
    /// Numeric view of the cell: real numbers, or text that parses cleanly.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(text) => parse_number(text),
            CellValue::Null | CellValue::Other(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    pub fn to_label(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(text) => text.clone(),
            CellValue::Null => String::new(),
            CellValue::Other(serde_json::Value::Bool(b)) => b.to_string(),
            CellValue::Other(value) => value.to_string(),
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::String(text) => CellValue::Text(text),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => CellValue::Number(f),
                None => CellValue::Other(serde_json::Value::Number(n)),
            },
            other => CellValue::Other(other),
        }
    }
}

/// Parses trimmed, non-empty text into a finite number.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// One row of normalized data. Column order is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value of an existing column in place, otherwise appends.
    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        let column = column.into();
        match self.fields.iter().position(|(name, _)| *name == column) {
            Some(index) => self.fields[index].1 = value,
            None => self.fields.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub source: SourceFormat,
    pub records: Vec<Record>,
}

impl ParsedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names as seen on the first record.
    pub fn columns(&self) -> Vec<&str> {
        self.records
            .first()
            .map(|record| record.columns().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Doughnut,
    Radar,
    Bubble,
    Scatter,
    #[cfg_attr(feature = "cli", value(name = "polarArea", alias = "polar-area"))]
    PolarArea,
}

impl ChartKind {
    pub const ALL: [ChartKind; 8] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Doughnut,
        ChartKind::Radar,
        ChartKind::Bubble,
        ChartKind::Scatter,
        ChartKind::PolarArea,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Radar => "radar",
            ChartKind::Bubble => "bubble",
            ChartKind::Scatter => "scatter",
            ChartKind::PolarArea => "polarArea",
        }
    }

    /// Radial kinds are drawn without x/y axes.
    pub fn has_axes(&self) -> bool {
        !matches!(
            self,
            ChartKind::Pie | ChartKind::Doughnut | ChartKind::Radar | ChartKind::PolarArea
        )
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ChartKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = ChartKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("Unknown chart type '{}'. Valid types: {}", s, names.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// A finished, standalone HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    html: String,
}

impl GeneratedDocument {
    pub const FILE_NAME: &'static str = "chart.html";
    pub const MIME_TYPE: &'static str = "text/html";

    pub fn new(html: String) -> Self {
        Self { html }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.html.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.html.len()
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    pub fn file_name(&self) -> &'static str {
        Self::FILE_NAME
    }

    pub fn mime_type(&self) -> &'static str {
        Self::MIME_TYPE
    }
}
