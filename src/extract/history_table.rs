//! Locates the history table in rendered page markup and flattens it into header
//! and row text.

use crate::extract::error::ExtractError;
use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};

/// Selectors tried in order to find the history table. The site renders a desktop
/// and a mobile variant of the same table inside `lib-history-table`.
const TABLE_SELECTORS: [&str; 3] = [
    "lib-history-table table.desktop-table",
    "lib-history-table table",
    "table.history-table",
];

/// The text content of a located history table.
///
/// The site renders its table in one of two layouts: one `tr` per observation with
/// the time and value cells side by side, or a first `tbody` holding only the times
/// (or dates) and a second `tbody` holding the value rows. Both are read into rows
/// that start with the time or date cell.
///
/// Cell text has its whitespace collapsed, so a cell rendered as
/// `<span>45.3</span><span>&nbsp;</span><span>°F</span>` reads `45.3 °F`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn cell_text(cell: ElementRef) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn row_cells(row: ElementRef) -> Vec<ElementRef> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .collect()
}

fn is_in_thead(row: ElementRef) -> bool {
    row.parent()
        .and_then(ElementRef::wrap)
        .is_some_and(|parent| parent.value().name() == "thead")
}

impl HistoryTable {
    /// Parses page markup and reads the history table out of it.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::TableNotFound`] when the page has no table at all, and
    /// [`ExtractError::AmbiguousTable`] when it has several tables none of which is
    /// marked as the history table.
    pub fn parse(html: &str) -> Result<Self, ExtractError> {
        let document = Html::parse_document(html);
        let table = Self::locate(&document)?;
        Self::read(table)
    }

    fn locate(document: &Html) -> Result<ElementRef<'_>, ExtractError> {
        for css in TABLE_SELECTORS {
            if let Some(table) = document.select(&selector(css)?).next() {
                debug!("Located history table with selector '{}'", css);
                return Ok(table);
            }
        }

        let tables: Vec<ElementRef> = document.select(&selector("table")?).collect();
        match tables.as_slice() {
            [] => Err(ExtractError::TableNotFound),
            [table] => Ok(*table),
            many => Err(ExtractError::AmbiguousTable { count: many.len() }),
        }
    }

    fn read(table: ElementRef) -> Result<Self, ExtractError> {
        let row_selector = selector("tr")?;
        let mut headers: Option<Vec<String>> = None;
        let mut rows = Vec::new();

        for row in table.select(&row_selector) {
            let cells = row_cells(row);
            if cells.is_empty() {
                continue;
            }
            let has_data_cells = cells.iter().any(|cell| cell.value().name() == "td");
            let in_thead = is_in_thead(row);

            if headers.is_none() && (in_thead || !has_data_cells) {
                headers = Some(cells.into_iter().map(cell_text).collect());
                continue;
            }
            // Sub-header rows (e.g. High/Avg/Low) carry no data.
            if in_thead || !has_data_cells {
                continue;
            }
            rows.push(cells.into_iter().map(cell_text).collect());
        }

        let bodies: Vec<ElementRef> = table
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "tbody")
            .collect();
        if let [labels, values, ..] = bodies.as_slice() {
            rows = Self::join_bodies(*labels, *values, &row_selector);
        }

        Ok(Self {
            headers: headers.unwrap_or_default(),
            rows,
        })
    }

    /// Joins a table split into a `tbody` of row labels (times or dates, one per row)
    /// and a `tbody` of value rows into rows of label followed by values.
    fn join_bodies(
        labels: ElementRef,
        values: ElementRef,
        row_selector: &Selector,
    ) -> Vec<Vec<String>> {
        let labels: Vec<String> = labels
            .select(row_selector)
            .map(cell_text)
            .filter(|label| !label.is_empty())
            .collect();
        let values: Vec<Vec<String>> = values
            .select(row_selector)
            .map(row_cells)
            .filter(|cells| !cells.is_empty())
            .map(|cells| cells.into_iter().map(cell_text).collect())
            .collect();

        if labels.len() != values.len() {
            warn!(
                "History table has {} label rows but {} value rows, keeping the first {}",
                labels.len(),
                values.len(),
                labels.len().min(values.len())
            );
        }
        debug!("Joining {} split history table rows", labels.len().min(values.len()));

        labels
            .into_iter()
            .zip(values)
            .map(|(label, cells)| std::iter::once(label).chain(cells).collect())
            .collect()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_desktop_table() -> Result<(), ExtractError> {
        let table = HistoryTable::parse(include_str!("../../tests/fixtures/observations_daily.html"))?;
        assert_eq!(table.headers().len(), 12);
        assert_eq!(table.headers()[0], "Time");
        assert_eq!(table.headers()[8], "Precip. Rate.");
        assert_eq!(table.rows().len(), 6);
        assert_eq!(table.rows()[0][0], "12:04 AM");
        assert_eq!(table.rows()[0][1], "61.2 °F");
        Ok(())
    }

    #[test]
    fn test_falls_back_to_single_table() -> Result<(), ExtractError> {
        let table = HistoryTable::parse(include_str!("../../tests/fixtures/three_rows.html"))?;
        assert_eq!(table.headers(), ["Time", "Temperature", "Humidity", "Pressure"]);
        assert_eq!(table.rows().len(), 3);
        Ok(())
    }

    #[test]
    fn test_joins_split_bodies() -> Result<(), ExtractError> {
        let table = HistoryTable::parse(include_str!("../../tests/fixtures/split_observations.html"))?;
        assert_eq!(table.headers().len(), 12);
        assert_eq!(table.rows().len(), 3);
        assert!(table.rows().iter().all(|row| row.len() == 12));
        assert_eq!(table.rows()[0][0], "12:04 AM");
        assert_eq!(table.rows()[0][1], "61.2 °F");
        assert_eq!(table.rows()[2][2], "--");
        assert_eq!(table.rows()[2][4], "SW");
        Ok(())
    }

    #[test]
    fn test_split_bodies_of_different_length() -> Result<(), ExtractError> {
        let html = "<table><thead><tr><th>Time</th><th>Temperature</th></tr></thead>\
                    <tbody><tr><td>1:00 PM</td></tr><tr><td>1:05 PM</td></tr></tbody>\
                    <tbody><tr><td>70 °F</td></tr></tbody></table>";
        let table = HistoryTable::parse(html)?;
        assert_eq!(table.rows(), [vec!["1:00 PM".to_string(), "70 °F".to_string()]]);
        Ok(())
    }

    #[test]
    fn test_header_without_thead() -> Result<(), ExtractError> {
        let html = "<table><tr><th>Time</th><th>Temperature</th></tr>\
                    <tr><td>1:00 PM</td><td>70 °F</td></tr></table>";
        let table = HistoryTable::parse(html)?;
        assert_eq!(table.headers(), ["Time", "Temperature"]);
        assert_eq!(table.rows(), [vec!["1:00 PM".to_string(), "70 °F".to_string()]]);
        Ok(())
    }

    #[test]
    fn test_sub_header_rows_are_not_data() -> Result<(), ExtractError> {
        let table = HistoryTable::parse(include_str!("../../tests/fixtures/daily_summary.html"))?;
        assert_eq!(table.headers()[0], "Date");
        assert_eq!(table.rows().len(), 3);
        Ok(())
    }

    #[test]
    fn test_missing_table() {
        let result = HistoryTable::parse("<html><body><p>Loading...</p></body></html>");
        assert!(matches!(result, Err(ExtractError::TableNotFound)));
    }

    #[test]
    fn test_ambiguous_tables() {
        let html = "<table><tr><td>a</td></tr></table><table><tr><td>b</td></tr></table>";
        let result = HistoryTable::parse(html);
        assert!(matches!(result, Err(ExtractError::AmbiguousTable { count: 2 })));
    }
}
