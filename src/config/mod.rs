pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::dataset::default_native_date_formats;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::MessageTemplates;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Input extensions the dataset reader understands.
pub const INPUT_EXTENSIONS: [&str; 2] = ["csv", "json"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "delivery-etl")]
#[command(about = "Cleans a delivery-tracking dataset, notifies customers and writes a summary report")]
pub struct CliConfig {
    #[arg(long, default_value = "entregas_pendientes.csv")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "entregas_procesadas.csv")]
    pub processed_file: String,

    #[arg(long, default_value = "reporte.txt")]
    pub report_file: String,

    #[arg(long, help = "Also bundle every output into this ZIP file")]
    pub archive: Option<String>,

    #[arg(
        long = "native-date-format",
        default_values_t = default_native_date_formats(),
        help = "chrono layout of spreadsheet datetime cells (repeatable)"
    )]
    pub native_date_formats: Vec<String>,

    #[arg(long, default_value = "entregas@example.com")]
    pub sender: String,

    #[arg(long, help = "Mail relay endpoint; messages are only logged when absent")]
    pub webhook_url: Option<String>,

    #[arg(long)]
    pub api_token: Option<String>,

    #[arg(long, help = "Do not notify customers")]
    pub no_notify: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per stage")]
    pub monitor: bool,

    #[arg(skip)]
    #[serde(default)]
    pub templates: MessageTemplates,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_file(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn processed_filename(&self) -> &str {
        &self.processed_file
    }

    fn report_filename(&self) -> &str {
        &self.report_file
    }

    fn archive_filename(&self) -> Option<&str> {
        self.archive.as_deref()
    }

    fn native_date_formats(&self) -> &[String] {
        &self.native_date_formats
    }

    fn notifications_enabled(&self) -> bool {
        !self.no_notify
    }

    fn templates(&self) -> &MessageTemplates {
        &self.templates
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extensions(
            "input",
            std::slice::from_ref(&self.input),
            &INPUT_EXTENSIONS,
        )?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_file_name("processed_file", &self.processed_file)?;
        validation::validate_file_name("report_file", &self.report_file)?;
        if let Some(archive) = &self.archive {
            validation::validate_file_name("archive", archive)?;
        }
        validation::validate_date_formats("native_date_format", &self.native_date_formats)?;
        if let Some(url) = &self.webhook_url {
            validation::validate_url("webhook_url", url)?;
        }
        validation::validate_non_empty_string("sender", &self.sender)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["delivery-etl"]);

        assert_eq!(config.input_file(), "entregas_pendientes.csv");
        assert_eq!(config.report_filename(), "reporte.txt");
        assert_eq!(config.native_date_formats(), default_native_date_formats().as_slice());
        assert!(config.notifications_enabled());
        assert!(config.archive_filename().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_flags() {
        let config = CliConfig::parse_from([
            "delivery-etl",
            "--input",
            "data/entregas.json",
            "--archive",
            "bundle.zip",
            "--native-date-format",
            "%d.%m.%Y",
            "--no-notify",
        ]);

        assert_eq!(config.native_date_formats, vec!["%d.%m.%Y".to_string()]);
        assert_eq!(config.archive_filename(), Some("bundle.zip"));
        assert!(!config.notifications_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_spreadsheet_input_and_bad_url() {
        let config = CliConfig::parse_from(["delivery-etl", "--input", "entregas.xlsx"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["delivery-etl", "--webhook-url", "smtp://gmail"]);
        assert!(config.validate().is_err());
    }
}
