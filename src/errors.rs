use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    RosterError(#[from] RosterError),
    #[error(transparent)]
    RequestError(#[from] RequestError),
}

/// 排班輸入驗證失敗，一定在開始排班前回報
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RosterError {
    #[error("員工名單不可為空")]
    EmptyEmployees,
    #[error("班別清單不可為空")]
    EmptyShifts,
    #[error("日期區間不可為空")]
    EmptyDateRange,
    #[error("無效的日期格式: {0}")]
    MalformedDate(String),
    #[error("無效的星期名稱: {0}")]
    MalformedWeekday(String),
    #[error("無效的年月: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("起始日 {start} 晚於結束日 {end}")]
    StartAfterEnd { start: String, end: String },
    #[error("日期區間 {days} 天超過上限 {max} 天")]
    RangeTooLong { days: usize, max: usize },
    #[error("必須指定 year + month 或 start + end")]
    MissingPeriod,
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("multipart 讀取失敗: {0}")]
    MultipartError(#[from] MultipartError),
    #[error("multipart 缺少欄位: {0}")]
    MissingField(&'static str),
    #[error("CSV 缺少欄位: {0}")]
    MissingColumn(&'static str),
    #[error("CSV 第 {line} 行格式錯誤: {reason}")]
    InvalidCsvRow { line: usize, reason: String },
    #[error("無效的內容: {0}")]
    InvalidContent(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AppError::RosterError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RequestError(RequestError::MultipartError(err)) => err.status(),
            AppError::RequestError(_) => StatusCode::BAD_REQUEST,
        };

        let error_message = self.to_string();
        (status_code, error_message).into_response()
    }
}
