//! Write-path instrumentation for encrypted columns.
//!
//! With the `metrics` feature, [`METRICS`] counts encrypted and pass-through
//! writes and collaborator failures, and exports them through a Prometheus
//! registry. With the `tracing` feature, [`tracing_helpers`] provides the
//! spans wrapped around collaborator calls. Neither ever records a value.

#[cfg(feature = "metrics")]
pub use self::prometheus_metrics::{ColumnMetrics, METRICS};

#[cfg(feature = "metrics")]
mod prometheus_metrics {
    use once_cell::sync::Lazy;
    use opentelemetry::metrics::{Counter, Histogram, MeterProvider as _};
    use opentelemetry_sdk::metrics::SdkMeterProvider;
    use prometheus::{Encoder, Registry, TextEncoder};

    /// Global write-path instruments.
    ///
    /// # Panics
    ///
    /// Initialised on first use, which is the first write through an
    /// encrypted column. Panics there if the Prometheus exporter cannot be built.
    pub static METRICS: Lazy<ColumnMetrics> = Lazy::new(ColumnMetrics::init);

    pub struct ColumnMetrics {
        pub registry: Registry,
        pub encrypted_writes: Counter<u64>,
        pub passthrough_writes: Counter<u64>,
        pub encryption_failures: Counter<u64>,
        pub encrypt_duration: Histogram<f64>,
        _provider: SdkMeterProvider,
    }

    impl ColumnMetrics {
        pub fn init() -> Self {
            let registry = Registry::new();
            let exporter = opentelemetry_prometheus::exporter()
                .with_registry(registry.clone())
                .build()
                .expect("failed to build prometheus exporter");
            let provider = SdkMeterProvider::builder().with_reader(exporter).build();
            let meter = provider.meter("encrypted_column");

            let encrypted_writes = meter
                .u64_counter("encrypted_column_writes")
                .with_description("Values encrypted before being written")
                .build();

            let passthrough_writes = meter
                .u64_counter("encrypted_column_passthrough_writes")
                .with_description("NULL or empty values written without encryption")
                .build();

            let encryption_failures = meter
                .u64_counter("encrypted_column_encryption_failures")
                .with_description("Writes aborted because the collaborator failed")
                .build();

            let encrypt_duration = meter
                .f64_histogram("encrypted_column_encrypt_duration_seconds")
                .with_description("Time spent in the encryption collaborator")
                .build();

            Self {
                registry,
                encrypted_writes,
                passthrough_writes,
                encryption_failures,
                encrypt_duration,
                _provider: provider,
            }
        }

        pub fn record_encrypted(&self, elapsed: std::time::Duration) {
            self.encrypted_writes.add(1, &[]);
            self.encrypt_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_passthrough(&self) {
            self.passthrough_writes.add(1, &[]);
        }

        pub fn record_failure(&self) {
            self.encryption_failures.add(1, &[]);
        }

        /// Render the registry in the Prometheus text exposition format.
        pub fn render(&self) -> Result<String, prometheus::Error> {
            let mut buffer = Vec::new();
            TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
            String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
        }
    }
}

/// Spans wrapped around collaborator calls.
#[cfg(feature = "tracing")]
pub mod tracing_helpers {
    use tracing::Span;

    /// Span for a single value encryption.
    pub fn encrypt_span() -> Span {
        tracing::debug_span!("encrypted_column.encrypt")
    }

    /// Span for a batch of writes, e.g. a multi-row insert.
    ///
    /// `rows` is recorded once the batch has been converted.
    pub fn encrypt_batch_span() -> Span {
        tracing::debug_span!("encrypted_column.encrypt_batch", rows = tracing::field::Empty)
    }
}
