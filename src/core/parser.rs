use crate::domain::model::{parse_number, CellValue, ParsedTable, Record, SourceFormat};
use crate::utils::error::{ChartError, Result};

/// Parses pasted text as a JSON array of objects, falling back to CSV.
pub fn parse_input(raw: &str) -> Result<ParsedTable> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ChartError::input("no data was provided"));
    }

    if let Some(table) = try_parse_json(text) {
        tracing::debug!("Input parsed as JSON with {} records", table.len());
        return Ok(table);
    }

    let table = parse_csv(text)?;
    tracing::debug!(
        "Input parsed as CSV with {} columns and {} records",
        table.columns().len(),
        table.len()
    );
    Ok(table)
}

/// Any parse failure or unexpected shape yields `None` so CSV gets a turn.
fn try_parse_json(text: &str) -> Option<ParsedTable> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        _ => return None,
    };

    if !items.first().map(|first| first.is_object()).unwrap_or(false) {
        tracing::debug!("JSON is not a non-empty array of objects, trying CSV");
        return None;
    }

    let records = items
        .into_iter()
        .map(|item| match item {
            serde_json::Value::Object(obj) => obj
                .into_iter()
                .map(|(key, value)| (key, CellValue::from(value)))
                .collect::<Record>(),
            // 非物件元素視為沒有欄位的記錄
            _ => Record::new(),
        })
        .collect();

    Some(ParsedTable {
        source: SourceFormat::Json,
        records,
    })
}

pub fn parse_csv(text: &str) -> Result<ParsedTable> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();

    if lines.len() < 2 {
        return Err(ChartError::input(
            "CSV needs a header line and at least one data line",
        ));
    }

    let headers = parse_csv_line(lines[0]);

    let records = lines[1..]
        .iter()
        .map(|line| {
            let mut cells = parse_csv_line(line).into_iter();
            headers
                .iter()
                .map(|header| {
                    let cell = cells.next().unwrap_or_default();
                    (header.clone(), coerce_cell(cell))
                })
                .collect::<Record>()
        })
        .collect();

    Ok(ParsedTable {
        source: SourceFormat::Csv,
        records,
    })
}

/// Splits one CSV line on commas outside double quotes.
///
/// A `"` only toggles quoted mode and is never kept; doubled quotes are not
/// an escape. Every field is trimmed.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Numbers become `Number`; anything else, the empty string included, stays text.
pub fn coerce_cell(cell: String) -> CellValue {
    match parse_number(&cell) {
        Some(n) => CellValue::Number(n),
        None => CellValue::Text(cell),
    }
}
