use crate::core::aggregate::CostAggregator;
use crate::domain::ports::{ReportSink, WorkbookSource};
use crate::utils::error::Result;

/// Runs one request end to end: source -> aggregator -> sink. Fully
/// synchronous; nothing here outlives a single `run` call.
pub struct ReportEngine<S: WorkbookSource, K: ReportSink> {
    source: S,
    sink: K,
    aggregator: CostAggregator,
}

impl<S: WorkbookSource, K: ReportSink> ReportEngine<S, K> {
    pub fn new(source: S, sink: K, aggregator: CostAggregator) -> Self {
        Self {
            source,
            sink,
            aggregator,
        }
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Loading workbook data");
        let data = self.source.load()?;
        tracing::info!(
            items = data.items.len(),
            pfr_codes = data.pfr.len(),
            apc_codes = data.apc.len(),
            "Workbook loaded"
        );

        tracing::info!("Aggregating costs");
        let report = self
            .aggregator
            .aggregate(&data.items, &data.pfr, &data.apc, &data.patient)?;
        for warning in &report.warnings {
            tracing::warn!("{}", warning);
        }
        tracing::info!(
            items = report.results.len(),
            categories = report.categories.len(),
            grand_total = %report.totals.grand_total,
            "Costs aggregated"
        );

        tracing::info!("Writing report");
        let output = self.sink.write(&data.patient, &report)?;
        tracing::info!("Report written to: {}", output);

        Ok(output)
    }
}
