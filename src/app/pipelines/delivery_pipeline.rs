use crate::adapters::dataset::{write_csv, DatasetReader};
use crate::core::dispatch::dispatch_all;
use crate::core::record_pipeline::RecordPipeline;
use crate::core::report::ReportSummarizer;
use crate::core::{ConfigProvider, Notifier, Pipeline, Record, Storage, TransformResult};
use crate::domain::model::DispatchSummary;
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const SUMMARY_JSON: &str = "summary.json";

pub struct DeliveryPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) notifier: Box<dyn Notifier>,
}

impl<S: Storage, C: ConfigProvider> DeliveryPipeline<S, C> {
    pub fn new(storage: S, config: C, notifier: Box<dyn Notifier>) -> Self {
        Self {
            storage,
            config,
            notifier,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    fn bundle(&self, entries: &[(&str, &[u8])]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for (name, data) in entries {
            zip.start_file(*name, SimpleFileOptions::default())?;
            zip.write_all(data)?;
        }
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DeliveryPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let input = self.config.input_file();
        tracing::debug!("Reading dataset from: {}", input);

        let data = self.storage.read_file(input).await?;
        DatasetReader::new(self.config.native_date_formats()).read(input, &data)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let total = data.len();
        let records = RecordPipeline::process(data)?;
        let report = ReportSummarizer::summarize(&records);

        Ok(TransformResult {
            dropped: total - records.len(),
            records,
            report,
        })
    }

    async fn load(&self, result: &TransformResult) -> Result<String> {
        let csv_data = write_csv(&result.records)?;
        let report_text = result.report.to_string();

        let processed_path = self.output_file(self.config.processed_filename());
        self.storage.write_file(&processed_path, &csv_data).await?;
        tracing::info!("Processed file saved to {}", processed_path);

        let report_path = self.output_file(self.config.report_filename());
        self.storage
            .write_file(&report_path, report_text.as_bytes())
            .await?;
        tracing::info!("Report saved to {}", report_path);

        let Some(archive) = self.config.archive_filename() else {
            return Ok(processed_path);
        };

        // 打包 CSV、報表與 JSON 摘要
        let summary_json = serde_json::to_vec_pretty(&result.report)?;
        let zip_data = self.bundle(&[
            (self.config.processed_filename(), csv_data.as_slice()),
            (self.config.report_filename(), report_text.as_bytes()),
            (SUMMARY_JSON, summary_json.as_slice()),
        ])?;

        let archive_path = self.output_file(archive);
        tracing::debug!("Writing ZIP file ({} bytes) to {}", zip_data.len(), archive_path);
        self.storage.write_file(&archive_path, &zip_data).await?;
        Ok(archive_path)
    }

    async fn notify(&self, result: &TransformResult) -> Result<DispatchSummary> {
        if !self.config.notifications_enabled() {
            tracing::info!("Notifications disabled, skipping dispatch");
            return Ok(DispatchSummary::default());
        }

        Ok(dispatch_all(self.notifier.as_ref(), &result.records, self.config.templates()).await)
    }
}
