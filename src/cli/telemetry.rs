//! Log output for the console and optional OTLP trace export.
//!
//! Logs always go to stderr so that stdout carries only command output. When
//! `OTEL_EXPORTER_OTLP_ENDPOINT` is set, spans are also exported over gRPC;
//! [`shutdown_tracer`] flushes them before the process exits.

use anyhow::{Result, anyhow};
use once_cell::sync::OnceCell;
use opentelemetry::{KeyValue, global, trace::TracerProvider as _};
use opentelemetry_otlp::{Compression, WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{
    Resource,
    trace::{SdkTracerProvider, Tracer},
};
use std::{env::var, io, time::Duration};
use tonic::{
    metadata::{Ascii, MetadataKey, MetadataMap, MetadataValue},
    transport::ClientTlsConfig,
};
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};
use ulid::Ulid;

const ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
const HEADERS_ENV: &str = "OTEL_EXPORTER_OTLP_HEADERS";
const EXPORT_TIMEOUT: Duration = Duration::from_secs(3);

static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

/// Builds gRPC metadata from `key=value,key=value`. Pairs without `=` are
/// skipped.
fn export_metadata(headers: &str) -> Result<MetadataMap> {
    let mut meta = MetadataMap::new();
    for (key, value) in headers.split(',').filter_map(|pair| pair.split_once('=')) {
        let key = key.trim().to_ascii_lowercase();
        let name = MetadataKey::<Ascii>::from_bytes(key.as_bytes())
            .map_err(|e| anyhow!("invalid OTLP header name {key}: {e}"))?;
        let value: MetadataValue<Ascii> = value
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid OTLP header value for {key}: {e}"))?;
        meta.insert(name, value);
    }
    Ok(meta)
}

/// Bare `host:port` endpoints are treated as TLS collectors.
fn collector_url(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint.trim_end_matches('/'))
    }
}

fn init_tracer(endpoint: &str) -> Result<Tracer> {
    let endpoint = collector_url(endpoint);

    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .with_compression(Compression::Gzip)
        .with_timeout(EXPORT_TIMEOUT);

    if endpoint.starts_with("https://") {
        builder = builder.with_tls_config(ClientTlsConfig::new().with_native_roots());
    }
    if let Ok(headers) = var(HEADERS_ENV) {
        builder = builder.with_metadata(export_metadata(&headers)?);
    }

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(builder.build()?)
        .with_resource(
            Resource::builder_empty()
                .with_attributes([
                    KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
                    KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                    KeyValue::new("service.instance.id", Ulid::new().to_string()),
                ])
                .build(),
        )
        .build();

    let _ = TRACER_PROVIDER.set(provider.clone());
    global::set_tracer_provider(provider.clone());
    debug!(%endpoint, "OTLP trace export enabled");

    Ok(provider.tracer(env!("CARGO_PKG_NAME")))
}

/// Installs the global subscriber. `RUST_LOG` directives override the
/// verbosity level.
///
/// # Errors
///
/// Returns an error if the exporter or the subscriber cannot be installed
pub fn init(verbosity_level: Option<Level>) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.unwrap_or(Level::ERROR).into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("opentelemetry_sdk=warn".parse()?);

    let registry = Registry::default().with(fmt_layer).with(filter);
    match var(ENDPOINT_ENV) {
        Ok(endpoint) if !endpoint.trim().is_empty() => {
            let otel_layer = tracing_opentelemetry::layer().with_tracer(init_tracer(&endpoint)?);
            tracing::subscriber::set_global_default(registry.with(otel_layer))?;
        }
        _ => tracing::subscriber::set_global_default(registry)?,
    }

    Ok(())
}

/// Flushes pending spans; a no-op when export was never enabled.
pub fn shutdown_tracer() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(err) = provider.shutdown() {
            debug!("tracer shutdown: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_skips_pairs_without_value() -> Result<()> {
        let meta = export_metadata("Authorization = Bearer abc ,malformed, x-tenant=a=b")?;
        assert_eq!(meta.len(), 2);
        assert_eq!(
            meta.get("authorization").and_then(|v| v.to_str().ok()),
            Some("Bearer abc")
        );
        assert_eq!(meta.get("x-tenant").and_then(|v| v.to_str().ok()), Some("a=b"));
        Ok(())
    }

    #[test]
    fn metadata_rejects_bad_names() {
        let err = export_metadata("bad header=1").err().map(|e| e.to_string());
        assert!(err.is_some_and(|message| message.contains("invalid OTLP header name")));
    }

    #[test]
    fn collector_url_defaults_to_tls() {
        assert_eq!(collector_url("http://localhost:4317"), "http://localhost:4317");
        assert_eq!(
            collector_url("collector.school.tld:4317/"),
            "https://collector.school.tld:4317"
        );
    }

    #[test]
    fn shutdown_without_provider() {
        shutdown_tracer();
    }
}
