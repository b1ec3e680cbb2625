use crate::errors::RosterError;
use chrono::{Datelike, NaiveDate, Weekday};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
}

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            weekday: date.weekday(),
        }
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// 排班期間，日期一律遞增且不重複
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    days: Vec<CalendarDay>,
}

impl DateRange {
    /// 整個月份，例如 2025 年 2 月會有 28 天
    pub fn month(year: i32, month: u32) -> Result<Self, RosterError> {
        let first =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(RosterError::InvalidMonth { year, month })?;

        let days = first
            .iter_days()
            .take_while(|date| date.month() == month)
            .map(CalendarDay::new)
            .collect();

        Ok(Self { days })
    }

    /// 包含頭尾的區間
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, RosterError> {
        if start > end {
            return Err(RosterError::StartAfterEnd {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }

        let days = start
            .iter_days()
            .take_while(|date| *date <= end)
            .map(CalendarDay::new)
            .collect();

        Ok(Self { days })
    }

    /// 區間天數（含頭尾），不用先把日期展開；start 晚於 end 時為 0
    pub fn span_len(start: NaiveDate, end: NaiveDate) -> usize {
        if start > end {
            return 0;
        }

        usize::try_from((end - start).num_days() + 1).unwrap_or(usize::MAX)
    }

    /// 任意日期集合，排序並去除重複
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
        dates.sort_unstable();
        dates.dedup();

        Self {
            days: dates.into_iter().map(CalendarDay::new).collect(),
        }
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().map(|day| day.date)
    }

    pub fn first(&self) -> Option<&CalendarDay> {
        self.days.first()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate, RosterError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| RosterError::MalformedDate(input.to_string()))
}

/// 接受 "Mon" 或 "Monday"，不分大小寫
pub fn parse_weekday(input: &str) -> Result<Weekday, RosterError> {
    input
        .trim()
        .parse::<Weekday>()
        .map_err(|_| RosterError::MalformedWeekday(input.to_string()))
}
