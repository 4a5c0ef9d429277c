use crate::types::traits::types::{DateRange, Month, Year};
use chrono::NaiveDate;

/// Anything that resolves to an inclusive range of days: a single date, a month,
/// a year, or a string in one of the forms `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub trait AnyDate {
    fn get_date_range(self) -> Option<DateRange>;
}

impl AnyDate for NaiveDate {
    fn get_date_range(self) -> Option<DateRange> {
        Some(DateRange::single(self))
    }
}

impl AnyDate for DateRange {
    fn get_date_range(self) -> Option<DateRange> {
        Some(self)
    }
}

impl AnyDate for &str {
    fn get_date_range(self) -> Option<DateRange> {
        let trimmed = self.trim();
        if let Ok(naive_date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return naive_date.get_date_range();
        }
        let parts: Vec<&str> = trimmed.split('-').collect();
        match parts.as_slice() {
            [year, month] if year.len() == 4 => {
                let year = year.parse().ok()?;
                let month = month.parse().ok()?;
                Month::new(year, month)?.get_date_range()
            }
            [year] if year.len() == 4 => Year(year.parse().ok()?).get_date_range(),
            _ => None,
        }
    }
}

impl AnyDate for String {
    fn get_date_range(self) -> Option<DateRange> {
        self.as_str().get_date_range()
    }
}

impl AnyDate for Year {
    fn get_date_range(self) -> Option<DateRange> {
        Some(DateRange {
            start: self.first_day()?,
            end: self.last_day()?,
        })
    }
}

impl AnyDate for Month {
    fn get_date_range(self) -> Option<DateRange> {
        Some(DateRange {
            start: self.first_day()?,
            end: self.last_day()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_string() {
        let range = "2021-07-28".get_date_range().unwrap();
        assert_eq!(range, DateRange::single(date(2021, 7, 28)));
    }

    #[test]
    fn test_month_string_covers_whole_month() {
        let range = "2024-02".get_date_range().unwrap();
        assert_eq!(range.start, date(2024, 2, 1));
        assert_eq!(range.end, date(2024, 2, 29));
        assert_eq!(range.days().count(), 29);
    }

    #[test]
    fn test_year_string_covers_whole_year() {
        let range = String::from("2023").get_date_range().unwrap();
        assert_eq!(range.start, date(2023, 1, 1));
        assert_eq!(range.end, date(2023, 12, 31));
        assert_eq!(range.len_days(), 365);
    }

    #[test]
    fn test_invalid_strings() {
        assert!("2023-13".get_date_range().is_none());
        assert!("07/28/2021".get_date_range().is_none());
        assert!("".get_date_range().is_none());
    }
}
