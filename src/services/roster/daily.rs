use super::{
    ledger::FairnessLedger,
    off_day::OffDayPolicy,
    shift::{Assignment, ShiftCatalog},
};
use chrono::NaiveDate;
use rand::{seq::SliceRandom, Rng};

/// 前一天上夜班的人往後排，避免隔天拿到早班
pub const NIGHT_PENALTY: u32 = 100;

pub fn penalty(shifts: &ShiftCatalog, ledger: &FairnessLedger, employee: usize) -> u32 {
    let night = if shifts.is_night(ledger.last_shift(employee)) {
        NIGHT_PENALTY
    } else {
        0
    };

    night + ledger.load(employee)
}

/// 排定單日的班表，回傳值依員工順序排列，排完後寫回帳本
pub fn assign_day<R: Rng + ?Sized>(
    date: NaiveDate,
    policies: &[OffDayPolicy],
    shifts: &ShiftCatalog,
    ledger: &mut FairnessLedger,
    rng: &mut R,
) -> Vec<Assignment> {
    let mut available: Vec<usize> = policies
        .iter()
        .enumerate()
        .filter(|(_, policy)| !policy.is_off(date))
        .map(|(employee, _)| employee)
        .collect();

    // 每天重新洗牌，同分時才不會老是同一個人先排
    available.shuffle(rng);
    available.sort_by_key(|&employee| penalty(shifts, ledger, employee));

    let mut day = vec![Assignment::Off; policies.len()];
    for (position, &employee) in available.iter().enumerate() {
        let candidate = shifts.round_robin(position);
        day[employee] = shifts.guard(ledger.last_shift(employee), candidate);
    }

    for (employee, assignment) in day.iter().enumerate() {
        ledger.record(employee, *assignment);
    }

    tracing::trace!(%date, available = available.len(), "day assigned");

    day
}
