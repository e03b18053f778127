use clap::Parser;
use delivery_etl::adapters::build_notifier;
use delivery_etl::domain::model::RunSummary;
use delivery_etl::utils::{logger, validation::Validate};
use delivery_etl::{CliConfig, DeliveryPipeline, EtlEngine, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting delivery-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let notifier = build_notifier(
        config.webhook_url.as_deref(),
        &config.sender,
        config.api_token.as_deref(),
    );
    let pipeline = DeliveryPipeline::new(LocalStorage::default(), config, notifier);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => print_summary(&summary),
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("✅ ETL process completed successfully!");
    println!("📁 Output saved to: {}", summary.output_path);
    println!(
        "📦 {} records read, {} kept, {} returned",
        summary.extracted, summary.processed, summary.dropped
    );
    println!();
    println!("Reporte Resumen:");
    println!("{}", summary.report);

    if !summary.dispatch.failed.is_empty() {
        println!();
        println!("⚠️ Notifications that could not be delivered:");
        for (recipient, reason) in &summary.dispatch.failed {
            println!("  - {}: {}", recipient, reason);
        }
    }
}
