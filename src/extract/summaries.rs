use crate::extract::cells::{parse_summary_date, value_tokens};
use crate::extract::error::ExtractError;
use crate::extract::history_table::HistoryTable;
use crate::types::daily_summary::DailySummary;
use chrono::NaiveDate;
use log::warn;

/// Reads every well-formed row of a daily summary table.
///
/// The first cell of a row is its date. The remaining cells are flattened into their
/// values in table order, whether the site puts one value or a High/Avg/Low triple
/// in each cell, and must add up to [`DailySummary::VALUE_COUNT`]. Other rows are
/// skipped with a warning.
pub(crate) fn extract_rows(
    table: &HistoryTable,
    date: NaiveDate,
) -> Result<Vec<DailySummary>, ExtractError> {
    let mut summaries = Vec::with_capacity(table.rows().len());

    for (index, row) in table.rows().iter().enumerate() {
        let Some((date_cell, value_cells)) = row.split_first() else {
            continue;
        };
        let Some(day) = parse_summary_date(date_cell, date) else {
            warn!(
                "Skipping summary row {} for {}: unreadable date '{}'",
                index, date, date_cell
            );
            continue;
        };
        let values: Vec<Option<f64>> = value_cells
            .iter()
            .flat_map(|cell| value_tokens(cell))
            .collect();
        match DailySummary::from_values(day, &values) {
            Some(summary) => summaries.push(summary),
            None => warn!(
                "Skipping summary row {} for {}: expected {} values, found {}",
                index,
                day,
                DailySummary::VALUE_COUNT,
                values.len()
            ),
        }
    }

    Ok(summaries)
}
