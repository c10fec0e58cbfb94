//! Metrics collection.
//!
//! Prometheus-compatible metrics with label cardinality protection and
//! typed helpers for recording measurements. All helpers silently no-op
//! when no recorder is installed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::ServerError;

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Label used for anything outside the known sets.
pub const UNKNOWN_LABEL: &str = "__unknown__";

/// HTTP methods accepted as label values.
const KNOWN_METHODS: [&str; 7] = ["GET", "HEAD", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"];

/// Sanitizes an HTTP method for use as a metrics label.
#[must_use]
pub fn sanitize_method_label(method: &str) -> &str {
    if KNOWN_METHODS.contains(&method) {
        method
    } else {
        UNKNOWN_LABEL
    }
}

/// Route label: the matched route template, or [`UNKNOWN_LABEL`] for
/// requests that matched nothing. Raw request paths never become labels.
#[must_use]
pub fn route_label(matched: Option<&str>) -> &str {
    matched.unwrap_or(UNKNOWN_LABEL)
}

/// Initializes the global metrics recorder.
///
/// When `port` is `Some`, a Prometheus HTTP listener is started on
/// `127.0.0.1:<port>`. When `None`, the recorder is installed without an
/// HTTP endpoint.
///
/// # Errors
///
/// Returns [`ServerError::Metrics`] if the recorder or listener cannot be
/// installed (e.g. port already in use).
pub fn init_metrics(port: Option<u16>) -> Result<(), ServerError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| ServerError::Metrics(e.to_string()))?;

    describe_metrics();
    Ok(())
}

/// Registers metric descriptions with the global recorder.
fn describe_metrics() {
    describe_counter!(
        "folio_requests_total",
        "Total number of HTTP requests by route, method and status"
    );
    describe_histogram!(
        "folio_request_duration_ms",
        "Request processing duration in milliseconds"
    );
    describe_counter!(
        "folio_content_writes_total",
        "Content document saves by section"
    );
    describe_counter!("folio_logins_total", "Login attempts by outcome");
    describe_counter!("folio_uploads_total", "Images accepted by the upload endpoint");
    describe_counter!("folio_upload_bytes_total", "Bytes written by the upload endpoint");
}

/// Records a completed HTTP request.
pub fn record_request(route: Option<&str>, method: &str, status: u16) {
    counter!(
        "folio_requests_total",
        "route" => route_label(route).to_owned(),
        "method" => sanitize_method_label(method).to_owned(),
        "status" => status.to_string(),
    )
    .increment(1);
}

/// Records request processing duration.
pub fn record_request_duration(route: Option<&str>, duration: Duration) {
    histogram!("folio_request_duration_ms", "route" => route_label(route).to_owned())
        .record(duration.as_secs_f64() * 1000.0);
}

/// Records a saved section. Section keys are a closed set.
pub fn record_content_write(section: &'static str) {
    counter!("folio_content_writes_total", "section" => section).increment(1);
}

/// Records a login attempt.
pub fn record_login(success: bool) {
    let outcome = if success { "success" } else { "rejected" };
    counter!("folio_logins_total", "outcome" => outcome).increment(1);
}

/// Records an accepted upload.
pub fn record_upload(bytes: u64) {
    counter!("folio_uploads_total").increment(1);
    counter!("folio_upload_bytes_total").increment(bytes);
}
