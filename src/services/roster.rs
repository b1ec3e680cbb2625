pub mod calendar;
pub mod daily;
pub mod export;
pub mod import;
pub mod ledger;
pub mod off_day;
pub mod shift;

use crate::errors::RosterError;
use calendar::DateRange;
use chrono::NaiveDate;
use ledger::FairnessLedger;
use off_day::{OffDayPolicy, OffDaySpec};
use rand::Rng;
use serde::Serialize;
use shift::ShiftCatalog;

/// 同名員工視為不同的人，以在名單中的位置區分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub name: String,
    pub off_days: OffDaySpec,
}

impl Employee {
    pub fn new(name: impl Into<String>, off_days: OffDaySpec) -> Self {
        Self {
            name: name.into(),
            off_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentRecord {
    pub date: NaiveDate,
    pub day: &'static str,
    pub employee: String,
    pub shift: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftCount {
    pub shift: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSummary {
    pub employee: String,
    pub total: u32,
    pub counts: Vec<ShiftCount>,
}

#[derive(Debug, Clone)]
pub struct Roster {
    /// 以日期為主、員工為次排序，每人每天一筆
    pub records: Vec<AssignmentRecord>,
    pub ledger: FairnessLedger,
}

impl Roster {
    /// 每位員工各班別的累計次數
    pub fn summary(&self, employees: &[Employee], shifts: &ShiftCatalog) -> Vec<EmployeeSummary> {
        employees
            .iter()
            .enumerate()
            .map(|(index, employee)| EmployeeSummary {
                employee: employee.name.clone(),
                total: self.ledger.load(index),
                counts: shifts
                    .labels()
                    .iter()
                    .zip(self.ledger.counts(index))
                    .map(|(label, count)| ShiftCount {
                        shift: label.clone(),
                        count: *count,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// 依日期順序逐日排班，整個期間共用同一本公平性帳本
pub fn generate<R: Rng + ?Sized>(
    employees: &[Employee],
    shifts: &ShiftCatalog,
    period: &DateRange,
    rng: &mut R,
) -> Result<Roster, RosterError> {
    if employees.is_empty() {
        return Err(RosterError::EmptyEmployees);
    }
    if shifts.is_empty() {
        return Err(RosterError::EmptyShifts);
    }
    if period.is_empty() {
        return Err(RosterError::EmptyDateRange);
    }

    // 休假日在排班開始前就全部決定好
    let policies: Vec<OffDayPolicy> = employees
        .iter()
        .map(|employee| OffDayPolicy::resolve(&employee.off_days, period, &mut *rng))
        .collect();

    let mut ledger = FairnessLedger::new(employees.len(), shifts.len());
    let mut records = Vec::with_capacity(employees.len() * period.len());

    for day in period.days() {
        let assignments = daily::assign_day(day.date, &policies, shifts, &mut ledger, rng);

        records.extend(
            employees
                .iter()
                .zip(assignments)
                .map(|(employee, assignment)| AssignmentRecord {
                    date: day.date,
                    day: day.weekday_name(),
                    employee: employee.name.clone(),
                    shift: shifts.label(assignment).to_string(),
                }),
        );
    }

    tracing::debug!(
        employees = employees.len(),
        days = period.len(),
        records = records.len(),
        "roster generated"
    );

    Ok(Roster { records, ledger })
}

#[cfg(test)]
mod tests {
    use super::shift::{TransitionRule, OFF_LABEL};
    use super::*;
    use chrono::Weekday;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::BTreeSet;

    fn catalog(labels: &[&str]) -> ShiftCatalog {
        ShiftCatalog::new(
            labels.iter().map(|label| label.to_string()).collect(),
            TransitionRule::default(),
        )
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn staff(names: &[&str]) -> Vec<Employee> {
        names
            .iter()
            .map(|name| Employee::new(*name, OffDaySpec::None))
            .collect()
    }

    fn records_of<'a>(
        roster: &'a Roster,
        employee: &'a str,
    ) -> impl Iterator<Item = &'a AssignmentRecord> + 'a {
        roster
            .records
            .iter()
            .filter(move |record| record.employee == employee)
    }

    fn assert_no_morning_after_night(roster: &Roster, employees: &[Employee]) {
        let per_day = employees.len();
        for (index, _) in employees.iter().enumerate() {
            let shifts: Vec<&str> = roster
                .records
                .iter()
                .skip(index)
                .step_by(per_day)
                .map(|record| record.shift.as_str())
                .collect();

            for pair in shifts.windows(2) {
                assert!(
                    !(pair[0] == "Night" && pair[1] == "Morning"),
                    "Night -> Morning for employee {index}"
                );
            }
        }
    }

    #[test]
    fn rejects_empty_inputs_before_any_work() {
        let shifts = catalog(&["Morning"]);
        let period = DateRange::month(2025, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            generate(&[], &shifts, &period, &mut rng).unwrap_err(),
            RosterError::EmptyEmployees
        );
        assert_eq!(
            generate(
                &staff(&["Alice"]),
                &shifts,
                &DateRange::from_dates(std::iter::empty()),
                &mut rng
            )
            .unwrap_err(),
            RosterError::EmptyDateRange
        );
    }

    #[test]
    fn one_record_per_employee_per_day_in_date_major_order() {
        let employees = staff(&["Alice", "Bob", "Carol", "Dave"]);
        let shifts = catalog(&["Morning", "Evening", "Night"]);
        let period = DateRange::month(2025, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let roster = generate(&employees, &shifts, &period, &mut rng).unwrap();

        assert_eq!(roster.records.len(), 4 * 28);
        for (day_index, chunk) in roster.records.chunks(4).enumerate() {
            let expected_date = period.days()[day_index].date;
            assert!(chunk.iter().all(|record| record.date == expected_date));
            let names: Vec<_> = chunk.iter().map(|record| record.employee.as_str()).collect();
            assert_eq!(names, vec!["Alice", "Bob", "Carol", "Dave"]);
        }
    }

    #[test]
    fn three_people_three_shifts_is_a_daily_bijection() {
        let employees = staff(&["Alice", "Bob", "Carol"]);
        let shifts = catalog(&["Morning", "Evening", "Night"]);
        let period = DateRange::between(date(2025, 5, 1), date(2025, 5, 3)).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);

        let roster = generate(&employees, &shifts, &period, &mut rng).unwrap();

        // 前一天夜班的人分數最高、排最後，又拿到夜班，所以每天都是一人一班
        for chunk in roster.records.chunks(3) {
            let labels: BTreeSet<_> = chunk.iter().map(|record| record.shift.as_str()).collect();
            assert_eq!(labels.len(), 3);
            assert!(!labels.contains(OFF_LABEL));
        }
        assert_no_morning_after_night(&roster, &employees);
    }

    #[test]
    fn employee_off_every_day_only_gets_off() {
        let period = DateRange::between(date(2025, 5, 1), date(2025, 5, 10)).unwrap();
        let employees = vec![Employee::new(
            "Alice",
            OffDaySpec::ExplicitDates(period.dates().collect()),
        )];
        let shifts = catalog(&["Morning", "Evening", "Night"]);
        let mut rng = StdRng::seed_from_u64(1);

        let roster = generate(&employees, &shifts, &period, &mut rng).unwrap();

        assert_eq!(roster.records.len(), 10);
        assert!(roster.records.iter().all(|record| record.shift == OFF_LABEL));
        assert_eq!(roster.ledger.load(0), 0);
    }

    #[test]
    fn loads_stay_within_one_under_even_distribution() {
        let employees = staff(&["A", "B", "C", "D", "E"]);
        let shifts = catalog(&["Morning", "Evening"]);
        let period = DateRange::between(date(2025, 5, 1), date(2025, 5, 5)).unwrap();
        let mut rng = StdRng::seed_from_u64(77);

        let roster = generate(&employees, &shifts, &period, &mut rng).unwrap();

        let loads: Vec<u32> = (0..employees.len()).map(|e| roster.ledger.load(e)).collect();
        let max = loads.iter().max().unwrap();
        let min = loads.iter().min().unwrap();
        assert!(max - min <= 1, "loads {loads:?}");
    }

    #[test]
    fn fixed_count_larger_than_period_means_always_off() {
        let period = DateRange::between(date(2025, 5, 1), date(2025, 5, 7)).unwrap();
        let employees = vec![
            Employee::new("Alice", OffDaySpec::FixedCount(30)),
            Employee::new("Bob", OffDaySpec::None),
        ];
        let shifts = catalog(&["Morning", "Evening", "Night"]);
        let mut rng = StdRng::seed_from_u64(5);

        let roster = generate(&employees, &shifts, &period, &mut rng).unwrap();

        assert!(records_of(&roster, "Alice").all(|record| record.shift == OFF_LABEL));
        assert!(records_of(&roster, "Bob").all(|record| record.shift != OFF_LABEL));
    }

    #[test]
    fn weekly_off_days_are_enforced() {
        let period = DateRange::month(2025, 6).unwrap();
        let employees = vec![
            Employee::new("Alice", OffDaySpec::WeeklyRecurring(Weekday::Sat)),
            Employee::new("Bob", OffDaySpec::FixedCount(8)),
            Employee::new("Carol", OffDaySpec::None),
        ];
        let shifts = catalog(&["Morning", "Evening", "Night"]);
        let mut rng = StdRng::seed_from_u64(31);

        let roster = generate(&employees, &shifts, &period, &mut rng).unwrap();

        assert!(records_of(&roster, "Alice")
            .filter(|record| record.day == "Saturday")
            .all(|record| record.shift == OFF_LABEL));
        assert_eq!(
            records_of(&roster, "Bob")
                .filter(|record| record.shift == OFF_LABEL)
                .count(),
            8
        );
        assert_no_morning_after_night(&roster, &employees);
    }

    #[test]
    fn same_seed_reproduces_the_same_roster() {
        let employees = vec![
            Employee::new("Alice", OffDaySpec::FixedCount(6)),
            Employee::new("Bob", OffDaySpec::WeeklyRecurring(Weekday::Mon)),
            Employee::new("Carol", OffDaySpec::FixedCount(3)),
            Employee::new("Dave", OffDaySpec::None),
            Employee::new("Eve", OffDaySpec::None),
        ];
        let shifts = catalog(&["Morning", "Evening", "Night"]);
        let period = DateRange::month(2025, 7).unwrap();

        let first = generate(&employees, &shifts, &period, &mut StdRng::seed_from_u64(99)).unwrap();
        let second = generate(&employees, &shifts, &period, &mut StdRng::seed_from_u64(99)).unwrap();

        assert_eq!(first.records, second.records);
    }

    #[test]
    fn ledger_load_matches_worked_records() {
        let employees = vec![
            Employee::new("Alice", OffDaySpec::FixedCount(10)),
            Employee::new("Bob", OffDaySpec::None),
            Employee::new("Bob", OffDaySpec::WeeklyRecurring(Weekday::Wed)),
        ];
        let shifts = catalog(&["Morning", "Night"]);
        let period = DateRange::month(2025, 8).unwrap();
        let mut rng = StdRng::seed_from_u64(12);

        let roster = generate(&employees, &shifts, &period, &mut rng).unwrap();

        for index in 0..employees.len() {
            let worked = roster
                .records
                .iter()
                .skip(index)
                .step_by(employees.len())
                .filter(|record| record.shift != OFF_LABEL)
                .count() as u32;
            assert_eq!(roster.ledger.load(index), worked);
        }
        assert_no_morning_after_night(&roster, &employees);
    }

    #[test]
    fn summary_reports_counts_per_label() {
        let employees = staff(&["Alice", "Bob"]);
        let shifts = catalog(&["Morning", "Evening", "Night"]);
        let period = DateRange::between(date(2025, 5, 1), date(2025, 5, 6)).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        let roster = generate(&employees, &shifts, &period, &mut rng).unwrap();
        let summary = roster.summary(&employees, &shifts);

        assert_eq!(summary.len(), 2);
        for entry in &summary {
            let labels: Vec<_> = entry.counts.iter().map(|count| count.shift.as_str()).collect();
            assert_eq!(labels, vec!["Morning", "Evening", "Night"]);
            assert_eq!(
                entry.total,
                entry.counts.iter().map(|count| count.count).sum::<u32>()
            );
        }
        assert_eq!(summary.iter().map(|entry| entry.total).sum::<u32>(), 12);
    }
}
