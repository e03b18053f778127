pub mod amount_normalizer;
pub mod date_normalizer;
pub mod dispatch;
pub mod etl;
pub mod pipeline;
pub mod record_pipeline;
pub mod report;

pub use crate::domain::model::{CleanedRecord, Record, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Notifier, Pipeline, Storage};
pub use crate::utils::error::Result;
