//! Admin handlers for scheduled jobs.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use regsuite_core::batch::BatchReport;
use regsuite_worker::{Job, JobContext, Recurrence};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobInfo {
    pub name: &'static str,
    pub recurrence: Recurrence,
}

#[derive(Debug, Serialize)]
pub struct JobRun {
    pub job: &'static str,
    #[serde(flatten)]
    pub report: BatchReport,
}

/// GET /api/v1/admin/jobs
pub async fn list_jobs(RequireAdmin(_admin): RequireAdmin) -> AppResult<impl IntoResponse> {
    let jobs: Vec<JobInfo> = Job::ALL
        .iter()
        .map(|job| JobInfo {
            name: job.name(),
            recurrence: job.recurrence(),
        })
        .collect();

    Ok(Json(DataResponse { data: jobs }))
}

/// POST /api/v1/admin/jobs/{name}/run
///
/// Run a job now, outside the worker's schedule. Runs are idempotent per
/// period, so a manual run followed by the scheduled one creates nothing
/// twice.
pub async fn run_job(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let job = Job::from_name(&name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown job '{name}'")))?;
    let ctx = JobContext::new(Utc::now(), &state.config.jobs);

    tracing::info!(job = job.name(), user_id = admin.user_id, "Manual job run started");
    let report = job.run(&state.pool, &ctx).await?;
    tracing::info!(
        job = job.name(),
        affected = report.affected,
        skipped = report.skipped,
        failed = report.failed,
        "Manual job run finished",
    );

    Ok(Json(DataResponse {
        data: JobRun {
            job: job.name(),
            report,
        },
    }))
}
