use crate::api::reports::{
    AnalyzeRequest, DashboardReport, FullReport, ReportMeta, ReportQuery,
};
use crate::engine::grid::DuplicatePolicy;
use crate::model::dashboard::{CategoryCount, DailyBreakdown, DashboardMetrics, StatusCounts};
use crate::model::grid::{CalendarGrid, CalendarRow};
use crate::model::ranking::RankingEntry;
use crate::model::record::{AttendanceRecord, AttendanceRow, ClassifiedRecord};
use crate::model::status::{AttendanceStatus, PerformanceCategory};
use crate::model::summary::EmployeeSummary;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Analytics API",
        version = "1.0.0",
        description = r#"
## Attendance Classification & Analytics

This API classifies raw daily attendance events and rolls them up into
report-ready aggregates.

### 🔹 Classification Rules
- **present**: start time ≤ 9:15 AM AND start meter < 200
- **outstation_present**: present + outstation reason
- **late**: start time > 9:15 AM OR start meter ≥ 200 (also the fail-closed
  default for malformed records)
- **outstation_late**: late + outstation reason
- **absent**: no record for an employee on an observed date

### 🔹 Reports
- **Classified Records**
  - Input rows plus the derived status column
- **Calendar Grid**
  - Employee × date matrix over every observed date
- **Employee Summary**
  - Counts, attendance % and performance category
- **Ranking**
  - Leaderboard by total present days
- **Dashboard**
  - Totals, overall rate, category histogram, daily trend

### 📦 Usage
Each request carries one batch (JSON rows or CSV with a header row) and is
processed statelessly; nothing is persisted between calls. Datasets missing
required columns are rejected upfront with the offending column names.

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::reports::analyze,
        crate::api::reports::analyze_csv,
        crate::api::reports::calendar,
        crate::api::reports::summaries,
        crate::api::reports::leaderboard,
        crate::api::reports::dashboard_metrics
    ),
    components(
        schemas(
            AnalyzeRequest,
            ReportQuery,
            ReportMeta,
            FullReport,
            DashboardReport,
            AttendanceRow,
            AttendanceRecord,
            ClassifiedRecord,
            AttendanceStatus,
            PerformanceCategory,
            DuplicatePolicy,
            CalendarGrid,
            CalendarRow,
            EmployeeSummary,
            RankingEntry,
            DashboardMetrics,
            CategoryCount,
            StatusCounts,
            DailyBreakdown
        )
    ),
    tags(
        (name = "Reports", description = "Attendance classification and aggregate reports"),
    )
)]
pub struct ApiDoc;
