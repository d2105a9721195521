//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the configured level. With the `telemetry`
//! feature, spans are also exported to stdout through OpenTelemetry.

use crate::LoggingSettings;
use tokentally_error::{ConfigError, TallyResult};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `verbose` forces the `debug` level when `RUST_LOG` is unset.
///
/// # Errors
///
/// Returns an error if the level directive is invalid or a global subscriber
/// is already installed.
pub fn init_observability(settings: &LoggingSettings, verbose: bool) -> TallyResult<()> {
    let level = if verbose { "debug" } else { settings.level.as_str() };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| ConfigError::new(format!("Invalid log level {}: {}", level, e)))?;

    let fmt_layer = if settings.json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    let registry = tracing_subscriber::registry().with(env_filter).with(fmt_layer);

    #[cfg(feature = "telemetry")]
    let registry = registry.with(telemetry::layer());

    registry
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install tracing subscriber: {}", e)))?;
    Ok(())
}

/// Flush pending spans. Call before exit.
pub fn shutdown_observability() {
    #[cfg(feature = "telemetry")]
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(feature = "telemetry")]
mod telemetry {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_sdk::{
        Resource,
        trace::{RandomIdGenerator, Sampler, Tracer, TracerProvider},
    };
    use opentelemetry_stdout::SpanExporter;
    use tracing_opentelemetry::OpenTelemetryLayer;

    /// OpenTelemetry layer exporting spans to stdout.
    pub fn layer<S>() -> OpenTelemetryLayer<S, Tracer>
    where
        S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
    {
        let provider = TracerProvider::builder()
            .with_simple_exporter(SpanExporter::default())
            .with_id_generator(RandomIdGenerator::default())
            .with_sampler(Sampler::AlwaysOn)
            .with_resource(Resource::default())
            .build();
        let tracer = provider.tracer("tokentally");
        opentelemetry::global::set_tracer_provider(provider);
        tracing_opentelemetry::layer().with_tracer(tracer)
    }
}
