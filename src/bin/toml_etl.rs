use clap::Parser;
use delivery_etl::adapters::build_notifier;
use delivery_etl::config::toml_config::{LogFormat, TomlConfig};
use delivery_etl::core::dispatch::compose;
use delivery_etl::core::{ConfigProvider, Pipeline};
use delivery_etl::utils::{logger, validation::Validate};
use delivery_etl::{DeliveryPipeline, EtlEngine, LocalStorage, LogNotifier};

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Delivery ETL driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "delivery-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the notifications switch from config
    #[arg(long)]
    notify: Option<bool>,

    /// Dry run - normalize and summarize without writing files or sending messages
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    match config.log_format() {
        LogFormat::Compact => logger::init_cli_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(args.verbose),
    }
    tracing::info!("🚀 Starting TOML-based delivery ETL");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(notify) = args.notify {
        config.notifications.enabled = notify;
        tracing::info!("🔧 Notifications overridden to: {}", notify);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written or sent");
        if let Err(e) = perform_dry_run(config).await {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code().max(1));
        }
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let notifier = build_notifier(
        config.notifications.webhook_url.as_deref(),
        &config.notifications.sender,
        config.notifications.api_token.as_deref(),
    );
    let pipeline = DeliveryPipeline::new(LocalStorage::default(), config, notifier);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ ETL process completed successfully!");
            println!("✅ ETL process completed successfully!");
            println!("📁 Output saved to: {}", summary.output_path);
            println!();
            println!("{}", summary.report);
            for (recipient, reason) in &summary.dispatch.failed {
                println!("⚠️ Not delivered to {}: {}", recipient, reason);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name, config.pipeline.version
    );
    println!("  Input: {}", config.input_file());
    println!("  Output: {}", config.output_path());
    println!(
        "  Files: {}, {}",
        config.processed_filename(),
        config.report_filename()
    );
    if let Some(archive) = config.archive_filename() {
        println!("  Archive: {} (ZIP)", archive);
    }
    println!(
        "  Native date formats: {}",
        config.native_date_formats().join(" | ")
    );
    println!(
        "  Notifications: {} via {}",
        if config.notifications_enabled() { "on" } else { "off" },
        config
            .notifications
            .webhook_url
            .as_deref()
            .unwrap_or("log only")
    );

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: TomlConfig) -> delivery_etl::Result<()> {
    let pipeline = DeliveryPipeline::new(LocalStorage::default(), config, Box::new(LogNotifier));

    let records = pipeline.extract().await?;
    let extracted = records.len();
    let result = pipeline.transform(records).await?;

    let planned = result
        .records
        .iter()
        .filter(|record| compose(record, pipeline.config().templates()).is_some())
        .count();

    println!("🔍 Dry Run Analysis:");
    println!("  Records read: {}", extracted);
    println!("  Records kept: {} ({} returned)", result.records.len(), result.dropped);
    if pipeline.config().notifications_enabled() {
        println!("  Notifications that would be sent: {}", planned);
    }
    println!();
    println!("{}", result.report);
    println!();
    println!("✅ Dry run complete. Every date and amount normalized cleanly.");

    Ok(())
}
