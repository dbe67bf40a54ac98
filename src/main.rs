use anyhow::Context;
use clap::Parser;
use lcp_costing::utils::error::ErrorSeverity;
use lcp_costing::utils::{logger, validation::Validate};
use lcp_costing::{
    CliConfig, CostAggregator, FileReportSink, FrequencyConfig, FrequencyNormalizer, ReportEngine,
    XlsxWorkbookSource,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting lcp-costing");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let frequency_config = match &config.frequency_config {
        Some(path) => FrequencyConfig::from_file(path)
            .with_context(|| format!("loading frequency config from {}", path.display()))?,
        None => FrequencyConfig::default(),
    };

    let source = XlsxWorkbookSource::new(config.workbook.clone());
    let sink = FileReportSink::new(config.output_dir.clone(), config.format.clone());
    let aggregator = CostAggregator::new(FrequencyNormalizer::new(frequency_config));
    let engine = ReportEngine::new(source, sink, aggregator);

    match engine.run() {
        Ok(output_path) => {
            tracing::info!("Report generated successfully");
            println!("✅ Report generated successfully!");
            println!("📁 Output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Report generation failed: {} (Severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
