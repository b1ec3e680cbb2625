use crate::errors::{AppError, RequestError};
use crate::services::roster::export;
use crate::state::AppStateV2;
use crate::structs::roster::{ResponseFormat, RosterPlan, RosterRequest, RosterResponse, UploadForm};
use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

pub fn new() -> Router<AppStateV2> {
    Router::new()
        .route("/", post(calculate_roster))
        .route("/csv", post(download_roster))
        .route("/upload", post(upload_roster))
}

// 依 JSON 輸入排班，回傳每人每天的班別與統計
pub async fn calculate_roster(
    State(state): State<AppStateV2>,
    Json(payload): Json<RosterRequest>,
) -> Result<Json<RosterResponse>, AppError> {
    let plan = payload.into_plan(state.get_settings())?;

    Ok(Json(run_json(&plan)?))
}

// 同樣的輸入，直接下載 CSV
pub async fn download_roster(
    State(state): State<AppStateV2>,
    Json(payload): Json<RosterRequest>,
) -> Result<Response, AppError> {
    let plan = payload.into_plan(state.get_settings())?;

    run_csv(&plan)
}

// 上傳 Name,OffDays 的 CSV 排整個月
pub async fn upload_roster(
    State(state): State<AppStateV2>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(RequestError::from)? {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await.map_err(RequestError::from)?;

        form.set(&name, value);
    }

    let format = form.response_format()?;
    let plan = form.into_plan(state.get_settings())?;

    match format {
        ResponseFormat::Json => Ok(Json(run_json(&plan)?).into_response()),
        ResponseFormat::Csv => run_csv(&plan),
    }
}

fn run_json(plan: &RosterPlan) -> Result<RosterResponse, AppError> {
    let roster = plan.run()?;
    let response = RosterResponse::new(plan, roster);

    tracing::info!(
        run_id = %response.run_id,
        seed = plan.seed,
        employees = plan.employees.len(),
        days = plan.period.len(),
        "排班完成"
    );

    Ok(response)
}

fn run_csv(plan: &RosterPlan) -> Result<Response, AppError> {
    let roster = plan.run()?;
    let file_name = plan
        .file_name
        .clone()
        .unwrap_or_else(|| "roster.csv".to_string());

    tracing::info!(
        seed = plan.seed,
        employees = plan.employees.len(),
        days = plan.period.len(),
        "排班完成，輸出 {}",
        file_name
    );

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ),
        (header::HeaderName::from_static("x-roster-seed"), plan.seed.to_string()),
    ];

    Ok((headers, export::to_csv(&roster.records)).into_response())
}
