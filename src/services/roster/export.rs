use super::{calendar::DateRange, calendar::DATE_FORMAT, AssignmentRecord};
use chrono::Datelike;
use std::borrow::Cow;

pub const CSV_HEADER: [&str; 4] = ["Date", "Day", "Employee", "Shift"];

/// 下載檔名，例如 roster_2025_03.csv
pub fn file_name(year: i32, month: u32) -> String {
    format!("roster_{}_{:02}.csv", year, month)
}

/// 用期間第一天的年月命名
pub fn file_name_for(period: &DateRange) -> Option<String> {
    period
        .first()
        .map(|day| file_name(day.date.year(), day.date.month()))
}

pub fn to_csv(records: &[AssignmentRecord]) -> String {
    let mut csv = CSV_HEADER.join(",");
    csv.push('\n');

    for record in records {
        let date = record.date.format(DATE_FORMAT).to_string();
        let row = [
            escape(&date),
            escape(record.day),
            escape(&record.employee),
            escape(&record.shift),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
