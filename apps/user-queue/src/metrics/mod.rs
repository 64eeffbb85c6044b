use prometheus::{Counter, CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use std::sync::Arc;

pub struct Metrics {
    pub users_written_total: Counter,
    pub users_read_total: Counter,
    pub operations_failed_total: CounterVec,
    pub operation_duration_seconds: HistogramVec,
    pub registry: Registry,
}

impl Metrics {
    pub fn new() -> Result<Arc<Self>, prometheus::Error> {
        let registry = Registry::new();

        let users_written_total = Counter::new(
            "user_queue_users_written_total",
            "Total number of users published to the queue",
        )?;

        let users_read_total = Counter::new(
            "user_queue_users_read_total",
            "Total number of users drained from the queue",
        )?;

        let operations_failed_total = CounterVec::new(
            Opts::new(
                "user_queue_operations_failed_total",
                "Total number of write or read operations that failed",
            ),
            &["operation", "error_type"],
        )?;

        let operation_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "user_queue_operation_duration_seconds",
                "Time taken by a write or read operation, including connection setup",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["operation", "status"],
        )?;

        registry.register(Box::new(users_written_total.clone()))?;
        registry.register(Box::new(users_read_total.clone()))?;
        registry.register(Box::new(operations_failed_total.clone()))?;
        registry.register(Box::new(operation_duration_seconds.clone()))?;

        Ok(Arc::new(Self {
            users_written_total,
            users_read_total,
            operations_failed_total,
            operation_duration_seconds,
            registry,
        }))
    }

    pub fn record_failure(&self, operation: &str, error_type: &str, duration: f64) {
        self.operations_failed_total
            .with_label_values(&[operation, error_type])
            .inc();
        self.operation_duration_seconds
            .with_label_values(&[operation, "error"])
            .observe(duration);
    }

    pub fn record_success(&self, operation: &str, duration: f64) {
        self.operation_duration_seconds
            .with_label_values(&[operation, "success"])
            .observe(duration);
    }
}
