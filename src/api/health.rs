//! Health check and diagnostics endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::{ApiError, Json};
use crate::domain::StoreProbe;

use super::state::AppState;

/// Health response with optional component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Store diagnostics report
///
/// Built from the probe only; the key table is never read.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database_url_configured: bool,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    pub latency_ms: u64,
}

/// Ping the store and describe the outcome
pub async fn run_diagnostics(probe: &dyn StoreProbe, database_url_configured: bool) -> DiagnosticsReport {
    let start = Instant::now();
    let result = probe.ping().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let (success, error, error_kind) = match result {
        Ok(()) => (true, None, None),
        Err(e) => {
            let api_error = ApiError::from(e);
            (
                false,
                Some(api_error.response.error.message),
                Some(api_error.response.error.error_type.to_string()),
            )
        }
    };

    DiagnosticsReport {
        backend: probe.backend().to_string(),
        database_url_configured,
        success,
        error,
        error_kind,
        latency_ms,
    }
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check, pings the key store
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let store_check = check_key_store(state.store_probe.as_ref()).await;
    let overall_status = store_check.status;

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![store_check]),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match overall_status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Liveness check - simple check to verify the service is running
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /api/diagnostics
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    Json(run_diagnostics(state.store_probe.as_ref(), state.database_url_configured).await)
}

async fn check_key_store(probe: &dyn StoreProbe) -> HealthCheck {
    let start = Instant::now();
    let result = probe.ping().await;
    let latency_ms = Some(start.elapsed().as_millis() as u64);
    let name = format!("key_store:{}", probe.backend());

    match result {
        Ok(()) => HealthCheck {
            name,
            status: HealthStatus::Healthy,
            message: None,
            latency_ms,
        },
        Err(e) => HealthCheck {
            name,
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            latency_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use async_trait::async_trait;

    struct FailingProbe;

    #[async_trait]
    impl StoreProbe for FailingProbe {
        fn backend(&self) -> &'static str {
            "postgres"
        }

        async fn ping(&self) -> Result<(), DomainError> {
            Err(DomainError::transport("connection refused"))
        }
    }

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "1.0.0".to_string(),
            checks: None,
            latency_ms: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"version\":\"1.0.0\""));
        assert!(!json.contains("checks"));
    }

    #[tokio::test]
    async fn test_diagnostics_failure() {
        let report = run_diagnostics(&FailingProbe, true).await;

        assert_eq!(report.backend, "postgres");
        assert!(report.database_url_configured);
        assert!(!report.success);
        assert_eq!(report.error.as_deref(), Some("connection refused"));
        assert_eq!(report.error_kind.as_deref(), Some("transport_error"));
    }

    #[tokio::test]
    async fn test_unhealthy_store_check() {
        let check = check_key_store(&FailingProbe).await;

        assert_eq!(check.status, HealthStatus::Unhealthy);
        assert_eq!(check.name, "key_store:postgres");
        assert!(check.message.unwrap().contains("connection refused"));
    }
}
