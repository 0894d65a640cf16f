//! # Prometheus Metrics
//!
//! Operational metrics for the gateway. Scraped by Prometheus at the
//! `/metrics` HTTP endpoint on the configured metrics port.
//!
//! All metrics are registered in a dedicated [`prometheus::Registry`] under
//! the `keyforge` namespace so they do not collide with any default global
//! registry consumers.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the gateway.
///
/// Clone-friendly (prometheus handles are `Arc`s internally) so it can be
/// shared across request handlers.
#[derive(Clone)]
pub struct GatewayMetrics {
    registry: Registry,
    /// Predetermined wallets successfully derived.
    pub wallets_derived_total: IntCounter,
    /// Private keys successfully imported.
    pub keys_imported_total: IntCounter,
    /// Failed requests, labelled by route and error kind.
    pub request_failures_total: IntCounterVec,
    /// Time spent inside the core derivation, in seconds.
    pub derivation_latency_seconds: Histogram,
}

impl GatewayMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("keyforge".into()), None)?;

        let wallets_derived_total = IntCounter::new(
            "wallets_derived_total",
            "Total number of predetermined wallets derived",
        )?;
        registry.register(Box::new(wallets_derived_total.clone()))?;

        let keys_imported_total = IntCounter::new(
            "keys_imported_total",
            "Total number of private keys imported",
        )?;
        registry.register(Box::new(keys_imported_total.clone()))?;

        let request_failures_total = IntCounterVec::new(
            Opts::new(
                "request_failures_total",
                "Total number of failed requests by route and error kind",
            ),
            &["route", "kind"],
        )?;
        registry.register(Box::new(request_failures_total.clone()))?;

        // Derivation is two hashes and a scalar mult; anything past 10ms is
        // a starved runtime.
        let derivation_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "derivation_latency_seconds",
                "Core wallet derivation latency in seconds",
            )
            .buckets(vec![
                0.00001, 0.000025, 0.00005, 0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.01,
            ]),
        )?;
        registry.register(Box::new(derivation_latency_seconds.clone()))?;

        Ok(Self {
            registry,
            wallets_derived_total,
            keys_imported_total,
            request_failures_total,
            derivation_latency_seconds,
        })
    }

    /// Record a failed request.
    pub fn record_failure(&self, route: &str, kind: &str) {
        self.request_failures_total
            .with_label_values(&[route, kind])
            .inc();
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<GatewayMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
///
/// Returns HTTP 500 if encoding fails (should never happen in practice).
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
