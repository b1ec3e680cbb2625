use super::{off_day::OffDaySpec, Employee};
use crate::errors::RequestError;

pub const NAME_COLUMN: &str = "Name";
pub const OFF_DAYS_COLUMN: &str = "OffDays";

/// 解析上傳的員工 CSV，需要 Name 與 OffDays 兩個欄位，OffDays 是每月隨機休假天數
pub fn parse_employees(csv: &str) -> Result<Vec<Employee>, RequestError> {
    let mut records = split_records(csv.trim_start_matches('\u{feff}'))?.into_iter();

    let (_, header) = records
        .next()
        .ok_or(RequestError::MissingColumn(NAME_COLUMN))?;

    let name_index = column_index(&header, NAME_COLUMN)?;
    let off_days_index = column_index(&header, OFF_DAYS_COLUMN)?;

    records
        .map(|(line, fields)| -> Result<Employee, RequestError> {
            let name = fields
                .get(name_index)
                .map(|name| name.trim().to_string())
                .ok_or_else(|| RequestError::InvalidCsvRow {
                    line,
                    reason: format!("缺少 {}", NAME_COLUMN),
                })?;

            let off_days = fields
                .get(off_days_index)
                .map(|value| value.trim())
                .ok_or_else(|| RequestError::InvalidCsvRow {
                    line,
                    reason: format!("缺少 {}", OFF_DAYS_COLUMN),
                })?
                .parse::<usize>()
                .map_err(|err| RequestError::InvalidCsvRow {
                    line,
                    reason: format!("{} 不是整數: {}", OFF_DAYS_COLUMN, err),
                })?;

            Ok(Employee::new(name, OffDaySpec::FixedCount(off_days)))
        })
        .collect()
}

fn column_index(header: &[String], column: &'static str) -> Result<usize, RequestError> {
    header
        .iter()
        .position(|field| field.trim() == column)
        .ok_or(RequestError::MissingColumn(column))
}

/// 逗號分隔，支援雙引號包住的欄位與 "" 跳脫，引號內可以換行。
/// 回傳 (起始行號, 欄位)，空白列略過。
fn split_records(csv: &str) -> Result<Vec<(usize, Vec<String>)>, RequestError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = csv.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            '\r' if !quoted && chars.peek() == Some(&'\n') => {}
            '\n' if !quoted => {
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            '\n' => {
                field.push(c);
                line += 1;
            }
            _ => field.push(c),
        }
    }

    if quoted {
        return Err(RequestError::InvalidCsvRow {
            line: record_line,
            reason: "引號沒有結束".to_string(),
        });
    }

    fields.push(field);
    push_record(&mut records, record_line, fields);

    Ok(records)
}

fn push_record(records: &mut Vec<(usize, Vec<String>)>, line: usize, fields: Vec<String>) {
    if fields.iter().any(|field| !field.trim().is_empty()) {
        records.push((line, fields));
    }
}
