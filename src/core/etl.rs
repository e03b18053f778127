use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting delivery ETL run");
        self.monitor.log_stats("Start");

        let raw_data = self.pipeline.extract().await?;
        let extracted = raw_data.len();
        tracing::info!("Extracted {} records", extracted);
        self.monitor.log_stats("Extract");

        let result = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Transformed {} records ({} dropped)",
            result.records.len(),
            result.dropped
        );
        self.monitor.log_stats("Transform");

        let output_path = self.pipeline.load(&result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        let dispatch = self.pipeline.notify(&result).await?;
        tracing::info!(
            "Notifications: {} sent, {} failed, {} skipped",
            dispatch.sent.len(),
            dispatch.failed.len(),
            dispatch.skipped.len()
        );
        self.monitor.log_final_stats();

        Ok(RunSummary {
            output_path,
            extracted,
            processed: result.records.len(),
            dropped: result.dropped,
            report: result.report,
            dispatch,
        })
    }
}
