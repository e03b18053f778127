use crate::adapters::dataset::default_native_date_formats;
use crate::config::INPUT_EXTENSIONS;
use crate::core::ConfigProvider;
use crate::domain::model::MessageTemplates;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub load: LoadConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_file: String,
    #[serde(default = "default_native_date_formats")]
    pub native_date_formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    #[serde(default = "default_processed_file")]
    pub processed_file: String,
    #[serde(default = "default_report_file")]
    pub report_file: String,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_sender")]
    pub sender: String,
    pub webhook_url: Option<String>,
    pub api_token: Option<String>,
    #[serde(default)]
    pub templates: MessageTemplates,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sender: default_sender(),
            webhook_url: None,
            api_token: None,
            templates: MessageTemplates::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_processed_file() -> String {
    "entregas_procesadas.csv".to_string()
}

fn default_report_file() -> String {
    "reporte.txt".to_string()
}

fn default_sender() -> String {
    "entregas@example.com".to_string()
}

fn default_true() -> bool {
    true
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAIL_API_TOKEN})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("source.input_file", &self.source.input_file)?;
        validation::validate_file_extensions(
            "source.input_file",
            std::slice::from_ref(&self.source.input_file),
            &INPUT_EXTENSIONS,
        )?;
        validation::validate_date_formats(
            "source.native_date_formats",
            &self.source.native_date_formats,
        )?;

        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_file_name("load.processed_file", &self.load.processed_file)?;
        validation::validate_file_name("load.report_file", &self.load.report_file)?;
        if let Some(compression) = self.load.compression.as_ref().filter(|c| c.enabled) {
            validation::validate_file_name("load.compression.filename", &compression.filename)?;
        }

        let notifications = &self.notifications;
        validation::validate_non_empty_string("notifications.sender", &notifications.sender)?;
        if let Some(url) = &notifications.webhook_url {
            validation::validate_url("notifications.webhook_url", url)?;
        }
        if let Some(token) = &notifications.api_token {
            validation::validate_required_field(
                "notifications.webhook_url",
                &notifications.webhook_url,
            )?;
            if token.contains("${") {
                return Err(EtlError::ConfigValidationError {
                    field: "notifications.api_token".to_string(),
                    message: format!("Unresolved environment variable in '{}'", token),
                });
            }
        }

        Ok(())
    }

    pub fn output_path(&self) -> &str {
        &self.load.output_path
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        self.monitoring
            .as_ref()
            .map(|m| m.log_format)
            .unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn input_file(&self) -> &str {
        &self.source.input_file
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn processed_filename(&self) -> &str {
        &self.load.processed_file
    }

    fn report_filename(&self) -> &str {
        &self.load.report_file
    }

    fn archive_filename(&self) -> Option<&str> {
        self.load
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_str())
    }

    fn native_date_formats(&self) -> &[String] {
        &self.source.native_date_formats
    }

    fn notifications_enabled(&self) -> bool {
        self.notifications.enabled
    }

    fn templates(&self) -> &MessageTemplates {
        &self.notifications.templates
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
