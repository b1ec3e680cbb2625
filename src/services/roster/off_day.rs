use super::calendar::DateRange;
use chrono::{Datelike, NaiveDate, Weekday};
use rand::{seq::SliceRandom, Rng};
use std::collections::BTreeSet;

/// 每位員工的休假設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OffDaySpec {
    #[default]
    None,
    /// 從整個期間隨機抽 n 天，超過期間天數時以期間天數為上限
    FixedCount(usize),
    /// 每週固定某一天
    WeeklyRecurring(Weekday),
    /// 指定日期，期間外的日期不影響結果
    ExplicitDates(BTreeSet<NaiveDate>),
}

/// 由 OffDaySpec 在排班開始時解析出來的結果，整個排班期間不再變動
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffDayPolicy {
    Never,
    Weekly(Weekday),
    Dates(BTreeSet<NaiveDate>),
}

impl OffDayPolicy {
    pub fn resolve<R: Rng + ?Sized>(spec: &OffDaySpec, period: &DateRange, rng: &mut R) -> Self {
        match spec {
            OffDaySpec::None => OffDayPolicy::Never,
            OffDaySpec::FixedCount(count) => {
                let dates: Vec<NaiveDate> = period.dates().collect();
                let amount = (*count).min(dates.len());

                OffDayPolicy::Dates(dates.choose_multiple(rng, amount).copied().collect())
            }
            OffDaySpec::WeeklyRecurring(weekday) => OffDayPolicy::Weekly(*weekday),
            OffDaySpec::ExplicitDates(dates) => OffDayPolicy::Dates(dates.clone()),
        }
    }

    pub fn is_off(&self, date: NaiveDate) -> bool {
        match self {
            OffDayPolicy::Never => false,
            OffDayPolicy::Weekly(weekday) => date.weekday() == *weekday,
            OffDayPolicy::Dates(dates) => dates.contains(&date),
        }
    }
}
