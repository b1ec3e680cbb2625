use crate::services::roster::shift::{
    parse_labels, TransitionRule, DEFAULT_FALLBACK_LABEL, DEFAULT_MORNING_LABEL,
    DEFAULT_NIGHT_LABEL,
};
use std::{env::var, sync::Arc};

pub const DEFAULT_SHIFTS: &str = "Morning, Evening, Night";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
pub const DEFAULT_MAX_DAYS: usize = 366;

/// 排班服務的設定，啟動時從環境變數讀取
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSettings {
    pub default_shifts: Vec<String>,
    pub transition: TransitionRule,
    pub cors_origins: Vec<String>,
    pub max_days: usize,
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            default_shifts: parse_labels(DEFAULT_SHIFTS),
            transition: TransitionRule::default(),
            cors_origins: parse_labels(DEFAULT_CORS_ORIGINS),
            max_days: DEFAULT_MAX_DAYS,
        }
    }
}

impl RosterSettings {
    pub fn from_env() -> Self {
        let default_shifts = var("ROSTER_DEFAULT_SHIFTS")
            .map(|value| parse_labels(&value))
            .ok()
            .filter(|labels| !labels.is_empty())
            .unwrap_or_else(|| parse_labels(DEFAULT_SHIFTS));

        let cors_origins = var("ROSTER_CORS_ORIGINS")
            .map(|value| parse_labels(&value))
            .unwrap_or_else(|_| parse_labels(DEFAULT_CORS_ORIGINS));

        let max_days = match var("ROSTER_MAX_DAYS").map(|value| value.parse::<usize>()) {
            Ok(Ok(max_days)) => max_days,
            Ok(Err(err)) => {
                tracing::warn!("ROSTER_MAX_DAYS 無法解析，使用預設值 {}: {}", DEFAULT_MAX_DAYS, err);
                DEFAULT_MAX_DAYS
            }
            Err(_) => DEFAULT_MAX_DAYS,
        };

        Self {
            default_shifts,
            transition: TransitionRule {
                night: label_from_env("ROSTER_NIGHT_LABEL", DEFAULT_NIGHT_LABEL),
                morning: label_from_env("ROSTER_MORNING_LABEL", DEFAULT_MORNING_LABEL),
                fallback: label_from_env("ROSTER_FALLBACK_LABEL", DEFAULT_FALLBACK_LABEL),
            },
            cors_origins,
            max_days,
        }
    }
}

fn label_from_env(key: &str, default: &str) -> String {
    var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Clone)]
pub struct AppStateV2 {
    settings: Arc<RosterSettings>,
}

impl AppStateV2 {
    pub fn new(settings: RosterSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    pub fn get_settings(&self) -> &RosterSettings {
        &self.settings
    }
}
