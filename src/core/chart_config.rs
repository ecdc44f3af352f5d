use crate::core::palette;
use crate::domain::model::{CellValue, ChartConfig, ChartKind, Dataset, ParsedTable};
use crate::utils::error::{ChartError, Result};

/// Derives labels and numeric series from a parsed table.
///
/// The first column of the first record supplies labels; every later column
/// holding at least one number becomes a dataset.
pub fn build_chart_config(table: &ParsedTable, kind: ChartKind, title: &str) -> Result<ChartConfig> {
    if table.is_empty() {
        return Err(ChartError::data("the table has no rows"));
    }

    let columns = table.columns();
    if columns.len() < 2 {
        return Err(ChartError::data(format!(
            "need a label column and at least one value column, found {} column(s)",
            columns.len()
        )));
    }

    let label_column = columns[0];
    let labels: Vec<String> = table
        .records
        .iter()
        .map(|record| {
            record
                .get(label_column)
                .map(CellValue::to_label)
                .unwrap_or_default()
        })
        .collect();

    let numeric_columns: Vec<&str> = columns[1..]
        .iter()
        .copied()
        .filter(|column| {
            table
                .records
                .iter()
                .any(|record| record.get(column).map(CellValue::is_numeric).unwrap_or(false))
        })
        .collect();

    if numeric_columns.is_empty() {
        return Err(ChartError::data(format!(
            "none of the columns after '{}' contain numbers",
            label_column
        )));
    }

    let datasets = numeric_columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let data = table
                .records
                .iter()
                .map(|record| {
                    record
                        .get(column)
                        .and_then(CellValue::as_number)
                        .unwrap_or(0.0)
                })
                .collect();
            let colors = palette::color_for(index);

            Dataset {
                label: column.to_string(),
                data,
                background_color: colors.background,
                border_color: colors.border,
                border_width: 1,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        "Label column '{}', {} dataset(s): {}",
        label_column,
        datasets.len(),
        numeric_columns.join(", ")
    );

    Ok(ChartConfig {
        kind,
        title: title.to_string(),
        labels,
        datasets,
    })
}
