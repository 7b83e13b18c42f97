use crate::prelude::*;
use crate::trivia::categories::CategoriesOutput;
use crate::trivia::list::ListOutput;
use crate::trivia::{categories_data, chart_data, list_data};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use triviaviz_core::chart::{ChartKind, ChartOutput};
use triviaviz_core::error::SourceError;
use triviaviz_core::opentdb::ResponseCode;
use triviaviz_core::sorting::SortingOptions;

use super::ServeState;

/// `GET /api/chart` parameters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChartQuery {
    pub kind: Option<String>,
    pub sort_type: Option<String>,
    pub sort_order: Option<String>,
    pub category: Option<String>,
    pub amount: Option<u32>,
}

/// `GET /api/categories` and `GET /api/questions` parameters
#[derive(Debug, Default, Deserialize)]
pub struct BatchQuery {
    pub category: Option<String>,
    pub amount: Option<u32>,
}

/// A failed request, rendered as `{"error": ...}` with a matching status
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<color_eyre::eyre::Report> for ApiError {
    fn from(report: color_eyre::eyre::Report) -> Self {
        Self {
            status: status_for(&report),
            message: report.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::warn!("{} {}", self.status, self.message);
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// HTTP status for a failed fetch or chart request
///
/// Caller mistakes are 400, an upstream rate limit is passed through as 429,
/// and anything else the question source got wrong is a 502.
fn status_for(report: &color_eyre::eyre::Report) -> StatusCode {
    match report.downcast_ref::<Error>() {
        Some(Error::InvalidChart(_)) => StatusCode::BAD_REQUEST,
        Some(Error::Source(SourceError::InvalidRequestAmount(_))) => StatusCode::BAD_REQUEST,
        Some(Error::Source(SourceError::Rejected(ResponseCode::RateLimit))) => {
            StatusCode::TOO_MANY_REQUESTS
        }
        Some(Error::Source(_)) => StatusCode::BAD_GATEWAY,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub async fn chart(
    State(state): State<Arc<ServeState>>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartOutput>, ApiError> {
    let kind = match query.kind.as_deref() {
        Some(kind) => kind.parse::<ChartKind>().map_err(ApiError::bad_request)?,
        None => ChartKind::default(),
    };
    // Unknown sort values fall back to name/asc, like the chart page does.
    let sort = SortingOptions::sanitize(query.sort_type.as_deref(), query.sort_order.as_deref());
    let amount = query.amount.unwrap_or(state.default_amount);

    let output = chart_data(&state.global, amount, kind, query.category, sort).await?;
    Ok(Json(output))
}

pub async fn categories(
    State(state): State<Arc<ServeState>>,
    Query(query): Query<BatchQuery>,
) -> Result<Json<CategoriesOutput>, ApiError> {
    let amount = query.amount.unwrap_or(state.default_amount);
    Ok(Json(categories_data(&state.global, amount).await?))
}

pub async fn questions(
    State(state): State<Arc<ServeState>>,
    Query(query): Query<BatchQuery>,
) -> Result<Json<ListOutput>, ApiError> {
    let amount = query.amount.unwrap_or(state.default_amount);
    Ok(Json(list_data(&state.global, amount, query.category).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serve::router;
    use crate::trivia::tests::{create_test_global, spawn_question_source, SAMPLE_BODY};
    use serde_json::Value;

    async fn spawn_app(api_url: &str) -> String {
        let app = router(ServeState {
            global: create_test_global(api_url),
            default_amount: 3,
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn get_json(url: &str) -> (StatusCode, Value) {
        let response = reqwest::get(url).await.unwrap();
        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        let body = response.json::<Value>().await.unwrap();
        (status, body)
    }

    #[test]
    fn test_status_for_source_errors() {
        let status = |err: Error| status_for(&err.into());

        assert_eq!(
            status(Error::InvalidChart("nope".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(Error::Source(SourceError::InvalidRequestAmount(0))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(Error::Source(SourceError::Rejected(ResponseCode::RateLimit))),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status(Error::Source(SourceError::Rejected(ResponseCode::NoResults))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(Error::Source(SourceError::SourceUnavailable { status: 503 })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&eyre!("client build failed")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_chart_sorted_by_count() {
        let source = spawn_question_source(StatusCode::OK, SAMPLE_BODY).await;
        let app = spawn_app(&source).await;

        let (status, body) = get_json(&format!(
            "{app}/api/chart?kind=category&sort-type=count&sort-order=desc"
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_fetched"], 3);
        assert_eq!(body["chart"]["kind"], "category");
        assert_eq!(body["chart"]["groupings"][0]["category"], "History");
        assert_eq!(body["chart"]["groupings"][0]["count"], 2);
    }

    #[tokio::test]
    async fn test_chart_unknown_sort_falls_back_to_name() {
        let source = spawn_question_source(StatusCode::OK, SAMPLE_BODY).await;
        let app = spawn_app(&source).await;

        let (status, body) = get_json(&format!(
            "{app}/api/chart?kind=category&sort-type=rating&sort-order=sideways"
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chart"]["sort"]["field"], "name");
        assert_eq!(body["chart"]["sort"]["order"], "asc");
        assert_eq!(body["chart"]["groupings"][0]["category"], "History");
    }

    #[tokio::test]
    async fn test_chart_defaults_to_difficulty() {
        let source = spawn_question_source(StatusCode::OK, SAMPLE_BODY).await;
        let app = spawn_app(&source).await;

        let (status, body) = get_json(&format!("{app}/api/chart?category=History")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chart"]["kind"], "difficulty");
        assert_eq!(body["total_questions"], 2);
        assert_eq!(body["chart"]["groupings"][1]["count"], 0);
    }

    #[tokio::test]
    async fn test_chart_rejects_unknown_kind() {
        let app = spawn_app("http://127.0.0.1:9").await;

        let (status, body) = get_json(&format!("{app}/api/chart?kind=pie")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid chart kind"));
    }

    #[tokio::test]
    async fn test_chart_rejects_category_chart_with_filter() {
        let app = spawn_app("http://127.0.0.1:9").await;

        let (status, body) =
            get_json(&format!("{app}/api/chart?kind=category&category=History")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Cannot group by category"));
    }

    #[tokio::test]
    async fn test_rate_limit_is_passed_through() {
        let source =
            spawn_question_source(StatusCode::OK, r#"{"response_code":5,"results":[]}"#).await;
        let app = spawn_app(&source).await;

        let (status, body) = get_json(&format!("{app}/api/categories")).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(body["error"].as_str().unwrap().contains("Too many requests"));
    }

    #[tokio::test]
    async fn test_unavailable_source_is_bad_gateway() {
        let source = spawn_question_source(StatusCode::SERVICE_UNAVAILABLE, "down").await;
        let app = spawn_app(&source).await;

        let (status, body) = get_json(&format!("{app}/api/questions")).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "An error occurred. Status code 503");
    }

    #[tokio::test]
    async fn test_questions_filtered_by_category() {
        let source = spawn_question_source(StatusCode::OK, SAMPLE_BODY).await;
        let app = spawn_app(&source).await;

        let (status, body) = get_json(&format!("{app}/api/questions?category=History")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_fetched"], 3);
        assert_eq!(body["questions"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_categories_lists_batch() {
        let source = spawn_question_source(StatusCode::OK, SAMPLE_BODY).await;
        let app = spawn_app(&source).await;

        let (status, body) = get_json(&format!("{app}/api/categories")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_questions"], 3);
        assert_eq!(body["categories"][0], "History");
        assert_eq!(body["groupings"][0]["category"], "Science & Nature");
    }
}
