//! HTTP routes: `GET /{family}/{company}`

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fin_core::{ChartKind, Company};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::fixtures::{self, Issuer};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unknown chart family: {0}")]
    UnknownFamily(String),
    #[error("unknown company: {0}")]
    UnknownCompany(String),
    #[error("failed to encode fixture: {0}")]
    Encode(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::UnknownFamily(_) | Self::UnknownCompany(_) => StatusCode::NOT_FOUND,
            Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/companies", get(companies))
        .route("/:family/:company", get(dataset))
        .layer(CorsLayer::permissive())
}

async fn companies() -> Json<Vec<&'static str>> {
    Json(Issuer::ALL.iter().map(Issuer::name).collect())
}

async fn dataset(Path((family, company)): Path<(String, String)>) -> Result<Json<Value>, ApiError> {
    let kind = ChartKind::from_endpoint(&family).ok_or_else(|| {
        tracing::warn!(%family, "unknown chart family");
        ApiError::UnknownFamily(family.clone())
    })?;
    let issuer = Issuer::resolve(&Company::new(company.as_str())).ok_or_else(|| {
        tracing::warn!(%company, "unknown company");
        ApiError::UnknownCompany(company.clone())
    })?;

    tracing::info!(company = issuer.name(), ?kind, "serving fixture");
    Ok(Json(fixtures::document(issuer, kind)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use fin_core::Dataset;
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_serves_prices() {
        let (status, body) = get_json("/prices/Microsoft").await;
        assert_eq!(status, StatusCode::OK);

        let Dataset::Prices(points) = Dataset::from_value(ChartKind::Prices, body).unwrap() else {
            panic!("expected price series");
        };
        assert_eq!(points.len(), 11);
        assert_eq!(points[10].price, 417.528);
    }

    #[tokio::test]
    async fn test_company_is_case_insensitive() {
        let (status, body) = get_json("/ratio/pepsico").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payoutRatio"], 0.7729);
    }

    #[tokio::test]
    async fn test_unknown_company_is_not_found() {
        let (status, body) = get_json("/key/Apple").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "unknown company: Apple");
    }

    #[tokio::test]
    async fn test_unknown_family_is_not_found() {
        let (status, _) = get_json("/balance/Microsoft").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_lists_companies() {
        let (status, body) = get_json("/companies").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["Microsoft", "PepsiCo", "BlackRock"]));
    }
}
