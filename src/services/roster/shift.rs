use crate::errors::RosterError;
use serde::Serialize;

pub const OFF_LABEL: &str = "OFF";

pub const DEFAULT_NIGHT_LABEL: &str = "Night";
pub const DEFAULT_MORNING_LABEL: &str = "Morning";
pub const DEFAULT_FALLBACK_LABEL: &str = "Evening";

/// 單日的排班結果，Shift 存的是班別在 ShiftCatalog 中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assignment {
    Shift(usize),
    Off,
}

/// 夜班後隔天不可排早班，改排 fallback（不在班別清單內就休假）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRule {
    pub night: String,
    pub morning: String,
    pub fallback: String,
}

impl Default for TransitionRule {
    fn default() -> Self {
        Self {
            night: DEFAULT_NIGHT_LABEL.to_string(),
            morning: DEFAULT_MORNING_LABEL.to_string(),
            fallback: DEFAULT_FALLBACK_LABEL.to_string(),
        }
    }
}

/// "Morning, Evening, Night" 這種逗號分隔的輸入，去掉空白與空字串
pub fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCatalog {
    labels: Vec<String>,
    rule: TransitionRule,
    fallback: Option<usize>,
}

impl ShiftCatalog {
    pub fn new(labels: Vec<String>, rule: TransitionRule) -> Result<Self, RosterError> {
        if labels.is_empty() {
            return Err(RosterError::EmptyShifts);
        }

        let fallback = labels.iter().position(|label| *label == rule.fallback);

        Ok(Self {
            labels,
            rule,
            fallback,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rule(&self) -> &TransitionRule {
        &self.rule
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, assignment: Assignment) -> &str {
        match assignment {
            Assignment::Shift(index) => &self.labels[index],
            Assignment::Off => OFF_LABEL,
        }
    }

    /// 排序後第 position 位拿到的班別，不設人數上限，直接繞回清單開頭
    pub fn round_robin(&self, position: usize) -> usize {
        position % self.labels.len()
    }

    pub fn is_night(&self, assignment: Option<Assignment>) -> bool {
        matches!(assignment, Some(Assignment::Shift(index)) if self.labels[index] == self.rule.night)
    }

    fn is_morning(&self, index: usize) -> bool {
        self.labels[index] == self.rule.morning
    }

    /// 套用夜班接早班的限制，只換掉這個人的班，其他人不受影響
    pub fn guard(&self, last_shift: Option<Assignment>, candidate: usize) -> Assignment {
        if self.is_night(last_shift) && self.is_morning(candidate) {
            return self.fallback.map_or(Assignment::Off, Assignment::Shift);
        }

        Assignment::Shift(candidate)
    }
}
