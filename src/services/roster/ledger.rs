use super::shift::Assignment;

#[derive(Debug, Clone)]
struct EmployeeLedger {
    counts: Vec<u32>,
    last_shift: Option<Assignment>,
}

/// 整次排班共用的公平性帳本，只記錄已經排完的日子
#[derive(Debug, Clone)]
pub struct FairnessLedger {
    entries: Vec<EmployeeLedger>,
}

impl FairnessLedger {
    pub fn new(employees: usize, shift_types: usize) -> Self {
        Self {
            entries: vec![
                EmployeeLedger {
                    counts: vec![0; shift_types],
                    last_shift: None,
                };
                employees
            ],
        }
    }

    /// 休假只更新 last_shift，不計入工作量
    pub fn record(&mut self, employee: usize, assignment: Assignment) {
        let entry = &mut self.entries[employee];

        if let Assignment::Shift(index) = assignment {
            entry.counts[index] += 1;
        }
        entry.last_shift = Some(assignment);
    }

    /// 到目前為止上過的班數（不分班別）
    pub fn load(&self, employee: usize) -> u32 {
        self.entries[employee].counts.iter().sum()
    }

    pub fn last_shift(&self, employee: usize) -> Option<Assignment> {
        self.entries[employee].last_shift
    }

    pub fn counts(&self, employee: usize) -> &[u32] {
        &self.entries[employee].counts
    }
}
