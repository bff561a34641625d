use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static MUTATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "checkout_banners_mutations_total",
        "Successful banner writes by operation",
        &["op"]
    )
    .expect("register mutations_total")
});

pub static ACTIVE_READS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "checkout_banners_active_reads_total",
        "Public active banner reads by outcome",
        &["outcome"]
    )
    .expect("register active_reads_total")
});

pub fn record_mutation(op: &str) {
    MUTATIONS_TOTAL.with_label_values(&[op]).inc();
}

pub fn record_active_read(outcome: &str) {
    ACTIVE_READS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    into_text(buffer)
}

fn into_text(buffer: Vec<u8>) -> (axum::http::StatusCode, String) {
    match String::from_utf8(buffer) {
        Ok(text) => (axum::http::StatusCode::OK, text),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        ),
    }
}
