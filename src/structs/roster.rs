use crate::{
    errors::{AppError, RequestError, RosterError},
    services::roster::{
        calendar::{parse_date, parse_weekday, DateRange},
        export, import,
        off_day::OffDaySpec,
        shift::{parse_labels, ShiftCatalog, TransitionRule},
        AssignmentRecord, Employee, EmployeeSummary, Roster,
    },
    state::RosterSettings,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct RosterRequest {
    pub employees: Vec<EmployeeInput>,
    #[serde(default)]
    pub shifts: Option<ShiftsInput>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// 不連續的日期清單，會排序並去除重複
    pub dates: Option<Vec<String>>,
    pub seed: Option<u64>,
    #[serde(default)]
    pub transition: TransitionInput,
}

/// 班別可以是陣列，也可以是 "Morning, Evening, Night" 字串
#[derive(Deserialize)]
#[serde(untagged)]
pub enum ShiftsInput {
    List(Vec<String>),
    Text(String),
}

impl ShiftsInput {
    fn into_labels(self) -> Vec<String> {
        match self {
            ShiftsInput::List(labels) => labels
                .into_iter()
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty())
                .collect(),
            ShiftsInput::Text(text) => parse_labels(&text),
        }
    }
}

#[derive(Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    #[serde(default)]
    pub off_days: OffDaysInput,
}

#[derive(Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OffDaysInput {
    #[default]
    None,
    FixedCount {
        count: usize,
    },
    Weekly {
        weekday: String,
    },
    Explicit {
        dates: Vec<String>,
    },
}

impl TryFrom<OffDaysInput> for OffDaySpec {
    type Error = RosterError;

    fn try_from(input: OffDaysInput) -> Result<Self, Self::Error> {
        Ok(match input {
            OffDaysInput::None => OffDaySpec::None,
            OffDaysInput::FixedCount { count } => OffDaySpec::FixedCount(count),
            OffDaysInput::Weekly { weekday } => OffDaySpec::WeeklyRecurring(parse_weekday(&weekday)?),
            OffDaysInput::Explicit { dates } => OffDaySpec::ExplicitDates(
                dates
                    .iter()
                    .map(|date| parse_date(date))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

/// 沒給的欄位沿用伺服器設定
#[derive(Deserialize, Default)]
pub struct TransitionInput {
    pub night: Option<String>,
    pub morning: Option<String>,
    pub fallback: Option<String>,
}

impl TransitionInput {
    fn merge(self, defaults: &TransitionRule) -> TransitionRule {
        TransitionRule {
            night: self.night.unwrap_or_else(|| defaults.night.clone()),
            morning: self.morning.unwrap_or_else(|| defaults.morning.clone()),
            fallback: self.fallback.unwrap_or_else(|| defaults.fallback.clone()),
        }
    }
}

/// 驗證完成、可以直接排班的輸入
#[derive(Debug)]
pub struct RosterPlan {
    pub employees: Vec<Employee>,
    pub shifts: ShiftCatalog,
    pub period: DateRange,
    pub seed: u64,
    pub file_name: Option<String>,
}

impl RosterPlan {
    pub fn new(
        employees: Vec<Employee>,
        shifts: Option<Vec<String>>,
        period: Period,
        seed: Option<u64>,
        transition: TransitionRule,
        settings: &RosterSettings,
    ) -> Result<Self, RosterError> {
        let labels = shifts.unwrap_or_else(|| settings.default_shifts.clone());
        let shifts = ShiftCatalog::new(labels, transition)?;

        let (period, file_name) = match period {
            Period::Month { year, month } => {
                (DateRange::month(year, month)?, Some(export::file_name(year, month)))
            }
            Period::Between { start, end } => {
                let (start, end) = (parse_date(&start)?, parse_date(&end)?);
                // 確認天數沒超過上限才展開日期
                let days = DateRange::span_len(start, end);
                if days > settings.max_days {
                    return Err(RosterError::RangeTooLong {
                        days,
                        max: settings.max_days,
                    });
                }

                let period = DateRange::between(start, end)?;
                let file_name = export::file_name_for(&period);
                (period, file_name)
            }
            Period::Dates(dates) => {
                let dates = dates
                    .iter()
                    .map(|date| parse_date(date))
                    .collect::<Result<Vec<_>, _>>()?;
                let period = DateRange::from_dates(dates);
                let file_name = export::file_name_for(&period);
                (period, file_name)
            }
        };

        if period.len() > settings.max_days {
            return Err(RosterError::RangeTooLong {
                days: period.len(),
                max: settings.max_days,
            });
        }

        Ok(Self {
            employees,
            shifts,
            period,
            // 沒指定 seed 就隨機產生，回應中帶回去讓呼叫端可以重現
            seed: seed.unwrap_or_else(rand::random),
            file_name,
        })
    }

    pub fn run(&self) -> Result<Roster, RosterError> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        crate::services::roster::generate(&self.employees, &self.shifts, &self.period, &mut rng)
    }
}

pub enum Period {
    Month { year: i32, month: u32 },
    Between { start: String, end: String },
    Dates(Vec<String>),
}

impl Period {
    /// 優先順序：year + month、start + end、dates
    pub fn resolve(
        year: Option<i32>,
        month: Option<u32>,
        start: Option<String>,
        end: Option<String>,
        dates: Option<Vec<String>>,
    ) -> Result<Self, RosterError> {
        match (year, month, start, end, dates) {
            (Some(year), Some(month), ..) => Ok(Period::Month { year, month }),
            (_, _, Some(start), Some(end), _) => Ok(Period::Between { start, end }),
            (.., Some(dates)) => Ok(Period::Dates(dates)),
            _ => Err(RosterError::MissingPeriod),
        }
    }
}

impl RosterRequest {
    pub fn into_plan(self, settings: &RosterSettings) -> Result<RosterPlan, RosterError> {
        let employees = self
            .employees
            .into_iter()
            .map(|employee| -> Result<Employee, RosterError> {
                Ok(Employee::new(
                    employee.name.trim(),
                    OffDaySpec::try_from(employee.off_days)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        RosterPlan::new(
            employees,
            self.shifts.map(ShiftsInput::into_labels),
            Period::resolve(self.year, self.month, self.start, self.end, self.dates)?,
            self.seed,
            self.transition.merge(&settings.transition),
            settings,
        )
    }
}

/// 回應格式，上傳表單用 format 欄位指定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    Csv,
}

/// multipart 上傳表單：file 是 Name,OffDays 的 CSV
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub shifts: Option<String>,
    pub seed: Option<String>,
    pub format: Option<String>,
}

impl UploadForm {
    pub fn set(&mut self, name: &str, value: String) {
        match name {
            "file" => self.file = Some(value),
            "year" => self.year = Some(value),
            "month" => self.month = Some(value),
            "shifts" => self.shifts = Some(value),
            "seed" => self.seed = Some(value),
            "format" => self.format = Some(value),
            _ => tracing::warn!("忽略未知的上傳欄位: {}", name),
        }
    }

    pub fn response_format(&self) -> Result<ResponseFormat, RequestError> {
        match self.format.as_deref().map(str::trim) {
            None | Some("") | Some("json") => Ok(ResponseFormat::Json),
            Some("csv") => Ok(ResponseFormat::Csv),
            Some(other) => Err(RequestError::InvalidContent(format!(
                "不支援的格式: {}",
                other
            ))),
        }
    }

    pub fn into_plan(self, settings: &RosterSettings) -> Result<RosterPlan, AppError> {
        let file = self.file.ok_or(RequestError::MissingField("file"))?;
        let year = parse_field::<i32>(self.year, "year")?;
        let month = parse_field::<u32>(self.month, "month")?;
        let seed = match self.seed.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(seed) => Some(seed.parse::<u64>().map_err(|err| {
                RequestError::InvalidContent(format!("seed 不是整數: {}", err))
            })?),
        };

        let employees = import::parse_employees(&file)?;

        Ok(RosterPlan::new(
            employees,
            self.shifts.as_deref().map(parse_labels),
            Period::Month { year, month },
            seed,
            settings.transition.clone(),
            settings,
        )?)
    }
}

fn parse_field<T: std::str::FromStr>(
    value: Option<String>,
    name: &'static str,
) -> Result<T, RequestError>
where
    T::Err: std::fmt::Display,
{
    value
        .ok_or(RequestError::MissingField(name))?
        .trim()
        .parse::<T>()
        .map_err(|err| RequestError::InvalidContent(format!("{} 格式錯誤: {}", name, err)))
}

#[derive(Serialize)]
pub struct RosterResponse {
    pub status: String,
    pub run_id: Uuid,
    pub seed: u64,
    pub file_name: Option<String>,
    pub shifts: Vec<String>,
    pub transition: TransitionRule,
    pub records: Vec<AssignmentRecord>,
    pub summary: Vec<EmployeeSummary>,
}

impl RosterResponse {
    pub fn new(plan: &RosterPlan, roster: Roster) -> Self {
        let summary = roster.summary(&plan.employees, &plan.shifts);

        Self {
            status: "success".to_string(),
            run_id: Uuid::new_v4(),
            seed: plan.seed,
            file_name: plan.file_name.clone(),
            shifts: plan.shifts.labels().to_vec(),
            transition: plan.shifts.rule().clone(),
            records: roster.records,
            summary,
        }
    }
}
