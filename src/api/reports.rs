use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dataset::{self, DatasetError};
use crate::engine::grid::DuplicatePolicy;
use crate::engine::{classifier, dashboard, grid, ranking, summary};
use crate::model::dashboard::{DailyBreakdown, DashboardMetrics};
use crate::model::grid::CalendarGrid;
use crate::model::ranking::RankingEntry;
use crate::model::record::{AttendanceRecord, AttendanceRow, ClassifiedRecord};
use crate::model::summary::EmployeeSummary;

#[derive(Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    pub records: Vec<AttendanceRow>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportQuery {
    /// Tie-break for duplicate same-day records; defaults to first_wins.
    pub strategy: Option<DuplicatePolicy>,
}

#[derive(Serialize, ToSchema)]
pub struct ReportMeta {
    #[schema(example = "3b2c2a4e-7d9f-4a7c-b2cb-1af1c9d4f4a2")]
    pub run_id: String,
    #[schema(value_type = String, format = "date-time")]
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub employee_count: usize,
    pub date_count: usize,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardReport {
    pub metrics: DashboardMetrics,
    pub daily: Vec<DailyBreakdown>,
}

#[derive(Serialize, ToSchema)]
pub struct FullReport {
    pub meta: ReportMeta,
    /// Input rows with their derived status column.
    pub classified: Vec<ClassifiedRecord>,
    pub calendar: CalendarGrid,
    pub summaries: Vec<EmployeeSummary>,
    pub ranking: Vec<RankingEntry>,
    pub dashboard: DashboardReport,
}

/// Run the whole pipeline over one normalized batch.
fn full_report(records: Vec<AttendanceRecord>, policy: DuplicatePolicy) -> FullReport {
    let classified = classifier::classify_batch(records);
    let calendar = grid::build_grid(&classified, policy);
    let summaries = summary::build_summaries(&classified);
    let ranking = ranking::build_ranking(&classified);
    let metrics = dashboard::aggregate(&summaries);
    let daily = dashboard::daily_breakdown(&classified);

    let meta = ReportMeta {
        run_id: Uuid::new_v4().to_string(),
        generated_at: Utc::now(),
        record_count: classified.len(),
        employee_count: calendar.rows.len(),
        date_count: calendar.dates.len(),
    };

    FullReport {
        meta,
        classified,
        calendar,
        summaries,
        ranking,
        dashboard: DashboardReport { metrics, daily },
    }
}

fn rejected(err: DatasetError) -> HttpResponse {
    warn!(error = %err, "Rejected dataset");
    HttpResponse::BadRequest().json(json!({
        "message": err.to_string()
    }))
}

/// Full report over a JSON batch
#[utoipa::path(
    post,
    path = "/api/v1/reports",
    request_body = AnalyzeRequest,
    params(
        ("strategy", Query, description = "Duplicate tie-break: first_wins (default) or last_wins")
    ),
    responses(
        (status = 200, description = "Classified records plus every aggregate view", body = FullReport),
        (status = 400, description = "Dataset rejected", body = Object, example = json!({
            "message": "missing required column(s): start_diff_meters"
        }))
    ),
    tag = "Reports"
)]
#[instrument(
    name = "analyze_report",
    skip(payload, query),
    fields(records = payload.records.len())
)]
pub async fn analyze(
    payload: web::Json<AnalyzeRequest>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    match dataset::from_rows(payload.into_inner().records) {
        Ok(records) => {
            let report = full_report(records, query.strategy.unwrap_or_default());
            info!(
                run_id = %report.meta.run_id,
                employees = report.meta.employee_count,
                dates = report.meta.date_count,
                "Report generated"
            );
            Ok(HttpResponse::Ok().json(report))
        }
        Err(err) => Ok(rejected(err)),
    }
}

/// Full report over a CSV payload
#[utoipa::path(
    post,
    path = "/api/v1/reports/csv",
    request_body(content = String, content_type = "text/csv"),
    params(
        ("strategy", Query, description = "Duplicate tie-break: first_wins (default) or last_wins")
    ),
    responses(
        (status = 200, description = "Classified records plus every aggregate view", body = FullReport),
        (status = 400, description = "Dataset rejected", body = Object, example = json!({
            "message": "missing required column(s): reason_start, reason_end"
        }))
    ),
    tag = "Reports"
)]
pub async fn analyze_csv(
    body: web::Bytes,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    match dataset::from_csv(body.as_ref()) {
        Ok(records) => {
            let report = full_report(records, query.strategy.unwrap_or_default());
            info!(
                run_id = %report.meta.run_id,
                records = report.meta.record_count,
                "CSV report generated"
            );
            Ok(HttpResponse::Ok().json(report))
        }
        Err(err) => Ok(rejected(err)),
    }
}

/// Calendar grid only
#[utoipa::path(
    post,
    path = "/api/v1/reports/calendar",
    request_body = AnalyzeRequest,
    params(
        ("strategy", Query, description = "Duplicate tie-break: first_wins (default) or last_wins")
    ),
    responses(
        (status = 200, description = "Employee × date matrix with absent fill", body = CalendarGrid),
        (status = 400, description = "Dataset rejected")
    ),
    tag = "Reports"
)]
pub async fn calendar(
    payload: web::Json<AnalyzeRequest>,
    query: web::Query<ReportQuery>,
) -> actix_web::Result<impl Responder> {
    match dataset::from_rows(payload.into_inner().records) {
        Ok(records) => {
            let classified = classifier::classify_batch(records);
            let grid = grid::build_grid(&classified, query.strategy.unwrap_or_default());
            Ok(HttpResponse::Ok().json(grid))
        }
        Err(err) => Ok(rejected(err)),
    }
}

/// Per-employee summaries only
#[utoipa::path(
    post,
    path = "/api/v1/reports/summary",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "One aggregate row per employee", body = Vec<EmployeeSummary>),
        (status = 400, description = "Dataset rejected")
    ),
    tag = "Reports"
)]
pub async fn summaries(payload: web::Json<AnalyzeRequest>) -> actix_web::Result<impl Responder> {
    match dataset::from_rows(payload.into_inner().records) {
        Ok(records) => {
            let classified = classifier::classify_batch(records);
            Ok(HttpResponse::Ok().json(summary::build_summaries(&classified)))
        }
        Err(err) => Ok(rejected(err)),
    }
}

/// Total-present leaderboard only
#[utoipa::path(
    post,
    path = "/api/v1/reports/ranking",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Employees sorted by total present days", body = Vec<RankingEntry>),
        (status = 400, description = "Dataset rejected")
    ),
    tag = "Reports"
)]
pub async fn leaderboard(payload: web::Json<AnalyzeRequest>) -> actix_web::Result<impl Responder> {
    match dataset::from_rows(payload.into_inner().records) {
        Ok(records) => {
            let classified = classifier::classify_batch(records);
            Ok(HttpResponse::Ok().json(ranking::build_ranking(&classified)))
        }
        Err(err) => Ok(rejected(err)),
    }
}

/// Dashboard metrics plus daily breakdown
#[utoipa::path(
    post,
    path = "/api/v1/reports/dashboard",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Dashboard-wide totals, rate, histogram and daily trend", body = DashboardReport),
        (status = 400, description = "Dataset rejected")
    ),
    tag = "Reports"
)]
pub async fn dashboard_metrics(
    payload: web::Json<AnalyzeRequest>,
) -> actix_web::Result<impl Responder> {
    match dataset::from_rows(payload.into_inner().records) {
        Ok(records) => {
            let classified = classifier::classify_batch(records);
            let summaries = summary::build_summaries(&classified);
            let report = DashboardReport {
                metrics: dashboard::aggregate(&summaries),
                daily: dashboard::daily_breakdown(&classified),
            };
            Ok(HttpResponse::Ok().json(report))
        }
        Err(err) => Ok(rejected(err)),
    }
}
