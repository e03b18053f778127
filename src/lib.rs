pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use adapters::{LogNotifier, WebhookNotifier};
pub use core::{etl::EtlEngine, pipeline::DeliveryPipeline};
pub use utils::error::{EtlError, Result};
