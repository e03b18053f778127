use crate::domain::model::{
    DispatchSummary, MessageTemplates, Notification, Record, TransformResult,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn processed_filename(&self) -> &str;
    fn report_filename(&self) -> &str;
    /// ZIP bundle name, when bundling is enabled.
    fn archive_filename(&self) -> Option<&str>;
    fn native_date_formats(&self) -> &[String];
    fn notifications_enabled(&self) -> bool;
    fn templates(&self) -> &MessageTemplates;
}

/// Outbound message transport.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult>;
    async fn load(&self, result: &TransformResult) -> Result<String>;
    async fn notify(&self, result: &TransformResult) -> Result<DispatchSummary>;
}
