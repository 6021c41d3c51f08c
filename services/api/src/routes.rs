use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use patch_tracker::directory::{DirectoryPage, FilterCriteria, Selection};
use patch_tracker::registry::{registry_router, ModerationQueue, RegistryService, SubmissionRepository};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Query-string form of the directory criteria. Absent parameters and the
/// literal `all` both mean "no constraint", matching the filter controls.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DirectoryQuery {
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[serde(default)]
    pub(crate) vendor: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) year: Option<String>,
}

impl DirectoryQuery {
    pub(crate) fn into_criteria(self) -> FilterCriteria {
        fn selection(raw: Option<String>) -> Selection {
            match raw {
                None => Selection::All,
                Some(value) => Selection::from(value.as_str()),
            }
        }

        FilterCriteria {
            search_text: self.search.unwrap_or_default(),
            vendor: selection(self.vendor),
            status: selection(self.status),
            year: selection(self.year),
        }
    }
}

pub(crate) fn with_directory_routes<R, Q>(service: Arc<RegistryService<R, Q>>) -> axum::Router
where
    R: SubmissionRepository + 'static,
    Q: ModerationQueue + 'static,
{
    registry_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/directory/systems",
            axum::routing::get(directory_endpoint),
        )
        .route(
            "/api/v1/directory/facets",
            axum::routing::get(facets_endpoint),
        )
        .route(
            "/api/v1/directory/export",
            axum::routing::get(export_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn directory_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> Json<DirectoryPage> {
    let criteria = query.into_criteria();
    Json(state.catalog.query(&criteria))
}

pub(crate) async fn facets_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    Json((*state.catalog.facets()).clone())
}

pub(crate) async fn export_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> impl IntoResponse {
    let criteria = query.into_criteria();
    let page = state.catalog.query(&criteria);

    match render_csv(&page) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"directory.csv\"".to_string(),
                ),
            ],
            body,
        )
            .into_response(),
        Err(error) => {
            let payload = json!({ "error": format!("export failed: {error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn render_csv(page: &DirectoryPage) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "name",
        "vendor",
        "installation_year",
        "platform",
        "purpose",
        "last_patch",
        "known_issues",
        "fix_count",
        "status",
        "institution",
    ])?;

    for record in &page.records {
        writer.write_record([
            record.id.0.as_str(),
            record.name.as_str(),
            record.vendor.as_str(),
            &record.installation_year.to_string(),
            record.platform.as_str(),
            record.purpose.as_str(),
            &record.last_patch.to_string(),
            &record.known_issues.join("; "),
            &record.fix_count.to_string(),
            record.status.label(),
            record.institution.as_str(),
        ])?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().expect("csv buffer flushed");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{seed_records, InMemoryModerationQueue, InMemorySubmissionRepository};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use patch_tracker::directory::SystemCatalog;
    use std::sync::atomic::AtomicBool;
    use tower::util::ServiceExt;

    fn app() -> axum::Router {
        let catalog = Arc::new(SystemCatalog::new(seed_records()));
        let service = Arc::new(RegistryService::new(
            catalog.clone(),
            Arc::new(InMemorySubmissionRepository::default()),
            Arc::new(InMemoryModerationQueue::default()),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(
                PrometheusBuilder::new()
                    .build_recorder()
                    .handle(),
            ),
            catalog,
        };
        with_directory_routes(service).layer(Extension(state))
    }

    async fn get_json(uri: &str) -> serde_json::Value {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn directory_without_parameters_returns_everything() {
        let body = get_json("/api/v1/directory/systems").await;
        assert_eq!(body["matched"], 5);
        assert_eq!(body["total"], 5);
        assert_eq!(body["records"].as_array().expect("records").len(), 5);
    }

    #[tokio::test]
    async fn directory_applies_combined_query_parameters() {
        let body =
            get_json("/api/v1/directory/systems?vendor=Greenstone&status=critical").await;
        assert_eq!(body["matched"], 1);
        assert_eq!(body["records"][0]["id"], "sys-001");
    }

    #[tokio::test]
    async fn directory_treats_all_as_no_constraint() {
        let body = get_json("/api/v1/directory/systems?vendor=all&status=all&year=all").await;
        assert_eq!(body["matched"], 5);
    }

    #[tokio::test]
    async fn over_constrained_directory_query_is_empty_not_an_error() {
        let body = get_json("/api/v1/directory/systems?year=1999").await;
        assert_eq!(body["matched"], 0);
        assert_eq!(body["total"], 5);
        assert!(body["records"].as_array().expect("records").is_empty());
    }

    #[tokio::test]
    async fn facets_endpoint_lists_sorted_vendor_and_year_values() {
        let body = get_json("/api/v1/directory/facets").await;
        let vendors = body["vendors"].as_array().expect("vendors");
        assert_eq!(vendors.first().expect("first vendor"), "Custom Development");
        let years = body["years"].as_array().expect("years");
        assert_eq!(years.first().expect("first year"), "2020");
        assert_eq!(years.last().expect("last year"), "2015");
    }

    #[tokio::test]
    async fn export_produces_csv_with_header_and_filtered_rows() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/directory/export?status=critical")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .expect("content type")
            .to_str()
            .expect("ascii");
        assert_eq!(content_type, "text/csv");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let text = String::from_utf8(bytes.to_vec()).expect("utf8 csv");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3, "header plus the two critical systems");
        assert!(lines[0].starts_with("id,name,vendor"));
        assert!(lines.iter().skip(1).all(|line| line.contains("critical")));
    }

    #[tokio::test]
    async fn health_and_ready_report_ok() {
        let body = get_json("/health").await;
        assert_eq!(body["status"], "ok");
        let body = get_json("/ready").await;
        assert_eq!(body["status"], "ready");
    }
}
