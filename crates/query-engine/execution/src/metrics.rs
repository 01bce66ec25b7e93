//! Metrics setup and update for query execution.

use prometheus::core::{AtomicU64, GenericCounter};

/// The collection of all metrics exposed through the `/metrics` endpoint.
#[derive(Debug, Clone)]
pub struct Metrics {
    query_total: GenericCounter<AtomicU64>,
    query_error_total: GenericCounter<AtomicU64>,
    rows_total: GenericCounter<AtomicU64>,
}

impl Metrics {
    /// Set up counters used to produce Prometheus metrics
    pub fn initialize(metrics_registry: &mut prometheus::Registry) -> Result<Self, prometheus::Error> {
        let query_total = add_int_counter_metric(
            metrics_registry,
            "druid_sql_query_total",
            "Total successful queries.",
        )?;

        let query_error_total = add_int_counter_metric(
            metrics_registry,
            "druid_sql_query_error_total",
            "Total queries that failed to translate, send or parse.",
        )?;

        let rows_total = add_int_counter_metric(
            metrics_registry,
            "druid_sql_rows_total",
            "Total rows materialized from query responses.",
        )?;

        Ok(Self {
            query_total,
            query_error_total,
            rows_total,
        })
    }

    pub fn record_successful_query(&self, rows: usize) {
        self.query_total.inc();
        self.rows_total.inc_by(rows as u64);
    }

    pub fn record_failed_query(&self) {
        self.query_error_total.inc();
    }

    pub fn query_total(&self) -> u64 {
        self.query_total.get()
    }

    pub fn query_error_total(&self) -> u64 {
        self.query_error_total.get()
    }

    pub fn rows_total(&self) -> u64 {
        self.rows_total.get()
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericCounter<AtomicU64>, prometheus::Error> {
    let int_counter =
        prometheus::IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}
