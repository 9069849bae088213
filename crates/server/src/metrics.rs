use axum::http::StatusCode;
use models::ResourceKind;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::resources::OperationError;

// Prometheus metrics (default registry)
pub static RESOURCE_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "resource_requests_total",
        "Resource operations by resource, operation and outcome",
        &["resource", "operation", "outcome"]
    )
    .expect("register resource_requests_total")
});

pub fn outcome_label<T>(res: &Result<T, OperationError>) -> &'static str {
    match res {
        Ok(_) => "success",
        Err(OperationError::NotFound(_)) => "not_found",
        Err(OperationError::StorageFault(_)) => "storage_fault",
    }
}

/// Count one finished resource operation.
pub fn observe<T>(kind: ResourceKind, operation: &str, res: &Result<T, OperationError>) {
    RESOURCE_REQUESTS_TOTAL
        .with_label_values(&[kind.collection, operation, outcome_label(res)])
        .inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
