use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

use super::series::Point;

/// Shape checks separating transaction rows from headers and summaries.
#[derive(Debug, Clone)]
pub struct RowRules {
    pub min_fields: usize,
    pub id_column: usize,
    pub date_column: usize,
    pub date_formats: Vec<String>,
}

/// Field access over one parsed row.
pub trait RowFields {
    fn field_count(&self) -> usize;
    fn field(&self, index: usize) -> Option<&str>;
}

/// Fields that are not valid UTF-8 read as absent.
impl RowFields for csv_async::ByteRecord {
    fn field_count(&self) -> usize {
        self.len()
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.get(index)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

impl<T: AsRef<str>> RowFields for Vec<T> {
    fn field_count(&self) -> usize {
        self.len()
    }

    fn field(&self, index: usize) -> Option<&str> {
        self.get(index).map(|field| field.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyCounts {
    pub points: Vec<Point>,
    pub max_count: u64,
    pub accepted_rows: usize,
    pub skipped_dates: usize,
}

pub fn is_canonical_non_negative_integer(value: &str) -> bool {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if value.len() > 1 && value.starts_with('0') {
        return false;
    }
    value.parse::<u64>().is_ok()
}

pub fn parse_day_of_month(raw: &str, formats: &[String]) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let zoned = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"));
    if let Ok(timestamp) = zoned {
        return Some(timestamp.with_timezone(&Local).day());
    }

    formats.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(raw, format)
            .map(|timestamp| timestamp.day())
            .or_else(|_| NaiveDate::parse_from_str(raw, format).map(|date| date.day()))
            .ok()
    })
}

pub fn aggregate_rows<'a, R, I>(rows: I, rules: &RowRules) -> DailyCounts
where
    R: RowFields + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut by_day: BTreeMap<u32, u64> = BTreeMap::new();
    let mut accepted_rows = 0;
    let mut skipped_dates = 0;

    let transactions = rows
        .into_iter()
        .filter(|row| row.field_count() >= rules.min_fields)
        .filter(|row| {
            row.field(rules.id_column)
                .is_some_and(is_canonical_non_negative_integer)
        });

    for row in transactions {
        let raw_date = row.field(rules.date_column).unwrap_or_default();
        let Some(day) = parse_day_of_month(raw_date, &rules.date_formats) else {
            tracing::debug!(raw_date, "skipping row with unparseable date");
            skipped_dates += 1;
            continue;
        };

        accepted_rows += 1;
        *by_day.entry(day).or_insert(0) += 1;
    }

    let max_count = by_day.values().copied().max().unwrap_or(0);
    let points = by_day
        .into_iter()
        .map(|(day, count)| Point::new(day, count))
        .collect();

    DailyCounts {
        points,
        max_count,
        accepted_rows,
        skipped_dates,
    }
}
