// Adapters layer: concrete implementations for the dataset formats and the notification transport.

pub mod dataset;
pub mod notifier;

pub use dataset::{default_native_date_formats, write_csv, DatasetReader};
pub use notifier::{build_notifier, LogNotifier, WebhookNotifier};
