use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::profile::PageSubmission;
use super::report::to_json_pretty;
use super::service::{OptimizerService, OptimizerServiceError};
use super::storage::ArtifactStore;

/// Router builder exposing analysis, export and synthesis endpoints.
pub fn optimizer_router<S>(service: Arc<OptimizerService<S>>) -> Router
where
    S: ArtifactStore + 'static,
{
    Router::new()
        .route("/api/v1/analyses", post(analyze_handler::<S>))
        .route("/api/v1/analyses/sample", get(sample_handler::<S>))
        .route("/api/v1/reports", post(export_handler::<S>))
        .route("/api/v1/templates", post(template_handler::<S>))
        .route("/api/v1/comparisons", post(comparison_handler::<S>))
        .with_state(service)
}

pub(crate) async fn analyze_handler<S>(
    State(service): State<Arc<OptimizerService<S>>>,
    axum::Json(submission): axum::Json<PageSubmission>,
) -> Response
where
    S: ArtifactStore + 'static,
{
    let analysis = service.analyze(submission);
    let payload = json!({ "report": analysis.report });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn sample_handler<S>(State(service): State<Arc<OptimizerService<S>>>) -> Response
where
    S: ArtifactStore + 'static,
{
    let analysis = service.sample_analysis();
    let payload = json!({ "report": analysis.report });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn export_handler<S>(
    State(service): State<Arc<OptimizerService<S>>>,
    axum::Json(submission): axum::Json<PageSubmission>,
) -> Response
where
    S: ArtifactStore + 'static,
{
    let (analysis, artifact) = match service.export_report(submission) {
        Ok(exported) => exported,
        Err(error) => return service_error(error),
    };
    let body = match to_json_pretty(&analysis.report) {
        Ok(body) => body,
        Err(error) => return internal_error(error.to_string()),
    };
    let file_name = artifact.primary_file().unwrap_or("report.json");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}

pub(crate) async fn template_handler<S>(
    State(service): State<Arc<OptimizerService<S>>>,
    axum::Json(submission): axum::Json<PageSubmission>,
) -> Response
where
    S: ArtifactStore + 'static,
{
    let (_, page) = service.synthesize(submission);
    let payload = json!({
        "injected_rules": page.injected_rule_ids(),
        "injected": page.injected,
        "html": page.html,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn comparison_handler<S>(
    State(service): State<Arc<OptimizerService<S>>>,
    axum::Json(submission): axum::Json<PageSubmission>,
) -> Response
where
    S: ArtifactStore + 'static,
{
    match service.compare(submission) {
        Ok(comparison) => {
            let payload = json!({
                "location": comparison.artifact.location,
                "files": comparison.artifact.files,
                "injected_rules": comparison.page.injected_rule_ids(),
                "aggregate_improvement": comparison.analysis.report.aggregate_improvement,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => service_error(error),
    }
}

fn service_error(error: OptimizerServiceError) -> Response {
    tracing::warn!(%error, "optimizer request failed");
    match error {
        OptimizerServiceError::Storage(error) => internal_error(error.to_string()),
    }
}

fn internal_error(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
