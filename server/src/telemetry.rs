//! Logging setup and per-request database query counting.
//!
//! Console logging is always on. When an OTLP collector is configured and
//! reachable, traces and logs are exported to it as well.

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};
use std::time::Duration;
use tracing::span::{Attributes, Id};
use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::Context, EnvFilter, Layer};

use crate::config::Config;

pub const QUERY_COUNT_HEADER: &str = "x-db-query-count";

tokio::task_local! {
    /// Task-local counter for database queries in the current request.
    static DB_QUERY_COUNTER: Arc<AtomicU32>;
}

/// Initialize tracing. Must be called once, before the server starts.
pub fn init_telemetry(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(DbQueryCountingLayer);

    let Some(endpoint) = config.otlp_endpoint.as_deref() else {
        registry.init();
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only");
        return;
    };

    if !collector_reachable(endpoint) {
        registry.init();
        tracing::info!(
            "OpenTelemetry endpoint {} not reachable, using console logging only",
            endpoint
        );
        return;
    }

    match otlp_providers(endpoint, &config.service_name) {
        Ok((trace_provider, log_provider)) => {
            let tracer = trace_provider.tracer(config.service_name.clone());
            opentelemetry::global::set_tracer_provider(trace_provider);

            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .with(OpenTelemetryTracingBridge::new(&log_provider))
                .init();

            tracing::info!(
                "OpenTelemetry enabled, exporting traces and logs to {} as {}",
                endpoint,
                config.service_name
            );
        }
        Err(e) => {
            registry.init();
            tracing::warn!(error = %e, "failed to set up OpenTelemetry export, using console logging only");
        }
    }
}

/// Quick TCP check so a missing collector doesn't stall exports.
fn collector_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://")
        .trim_end_matches('/');

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false)
}

fn otlp_providers(
    endpoint: &str,
    service_name: &str,
) -> anyhow::Result<(SdkTracerProvider, SdkLoggerProvider)> {
    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;
    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;
    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    Ok((trace_provider, log_provider))
}

/// Name of the span every repository call opens.
pub const DB_QUERY_SPAN: &str = "db.query";

/// Environment switch for the [`QUERY_COUNT_HEADER`] response header.
pub const TRACK_QUERY_COUNT_VAR: &str = "TRACK_DB_QUERY_COUNT";

/// Database queries issued so far by the current request, if one is in scope.
pub fn get_query_count() -> Option<u32> {
    DB_QUERY_COUNTER
        .try_with(|counter| counter.load(Ordering::Relaxed))
        .ok()
}

/// Counts [`DB_QUERY_SPAN`] spans into the request's task-local counter.
///
/// Repository calls run synchronously on the request task, so the counter
/// set by [`query_counting_middleware`] is in scope when their spans open.
pub struct DbQueryCountingLayer;

impl<S: Subscriber> Layer<S> for DbQueryCountingLayer {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        if attrs.metadata().name() != DB_QUERY_SPAN {
            return;
        }
        let _ = DB_QUERY_COUNTER.try_with(|counter| counter.fetch_add(1, Ordering::Relaxed));
    }
}

/// Scopes a fresh query counter around the rest of the stack.
pub async fn query_counting_middleware(request: Request<Body>, next: Next) -> Response {
    DB_QUERY_COUNTER
        .scope(Arc::new(AtomicU32::new(0)), next.run(request))
        .await
}

/// Reports the request's query count in [`QUERY_COUNT_HEADER`] when
/// `TRACK_DB_QUERY_COUNT=1`.
pub async fn db_query_count_header_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    let tracking = std::env::var(TRACK_QUERY_COUNT_VAR).is_ok_and(|value| value == "1");
    if let Some(count) = get_query_count().filter(|_| tracking) {
        response
            .headers_mut()
            .insert(QUERY_COUNT_HEADER, HeaderValue::from(count));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_only_db_query_spans() {
        let counter = Arc::new(AtomicU32::new(0));
        let subscriber = tracing_subscriber::registry().with(DbQueryCountingLayer);

        DB_QUERY_COUNTER.sync_scope(counter.clone(), || {
            tracing::subscriber::with_default(subscriber, || {
                let _a = tracing::info_span!("db.query", table = "recipe").entered();
                let _b = tracing::info_span!("db.query", table = "ingredient").entered();
                let _c = tracing::info_span!("http_request").entered();
            });
            assert_eq!(get_query_count(), Some(2));
        });

        assert_eq!(counter.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_no_count_outside_request() {
        assert_eq!(get_query_count(), None);
    }

    #[test]
    fn test_unreachable_collector() {
        assert!(!collector_reachable("http://"));
    }
}
