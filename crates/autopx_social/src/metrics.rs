//! Metrics for publish calls.

use autopx_core::PublishPlatform;
use autopx_error::ErrorCategory;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<PublishMetrics> = OnceLock::new();

/// Publish attempts, failures and latency, labelled by platform.
#[derive(Clone)]
pub struct PublishMetrics {
    _meter: Meter,
    /// Publish calls made
    pub attempts: Counter<u64>,
    /// Publish calls that failed, labelled with the error category
    pub failures: Counter<u64>,
    /// Publish call duration in seconds
    pub duration: Histogram<f64>,
}

impl PublishMetrics {
    fn init() -> Self {
        let meter = global::meter("autopx_publish");

        Self {
            _meter: meter.clone(),
            attempts: meter
                .u64_counter("publish.attempts")
                .with_description("Publish calls made")
                .build(),
            failures: meter
                .u64_counter("publish.failures")
                .with_description("Publish calls that failed")
                .build(),
            duration: meter
                .f64_histogram("publish.duration")
                .with_unit("seconds")
                .with_description("Publish call duration")
                .build(),
        }
    }

    /// Get the global publish metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a finished publish call.
    pub fn record(
        &self,
        platform: PublishPlatform,
        duration_secs: f64,
        failure: Option<ErrorCategory>,
    ) {
        let labels = [KeyValue::new("platform", platform.to_string())];
        self.attempts.add(1, &labels);
        self.duration.record(duration_secs, &labels);
        if let Some(category) = failure {
            self.failures.add(
                1,
                &[
                    KeyValue::new("platform", platform.to_string()),
                    KeyValue::new("category", category.as_str()),
                ],
            );
        }
    }
}
