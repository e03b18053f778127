use crate::core::amount_normalizer::AmountNormalizer;
use crate::core::date_normalizer::DateNormalizer;
use crate::domain::model::{CleanedRecord, DeliveryStatus, Record};
use crate::utils::error::Result;

pub struct RecordPipeline;

impl RecordPipeline {
    /// Normalizes every record, then drops the returned ones. Input order is kept.
    ///
    /// Dates are normalized for the whole dataset before any amount, and returned
    /// rows are normalized too, so the first failing cell aborts the run no matter
    /// which rows the filter would have removed.
    pub fn process(records: Vec<Record>) -> Result<Vec<CleanedRecord>> {
        let dates = records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                DateNormalizer::normalize(&record.order_date).map_err(|e| e.at_row(idx + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!("Normalized {} order dates", dates.len());

        let amounts = records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                AmountNormalizer::normalize(&record.amount).map_err(|e| e.at_row(idx + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!("Normalized {} amounts", amounts.len());

        let total = records.len();
        let cleaned: Vec<CleanedRecord> = records
            .into_iter()
            .zip(dates)
            .zip(amounts)
            .filter_map(|((record, order_date), amount)| {
                if record.status() == DeliveryStatus::Returned {
                    tracing::debug!("Dropping returned order {}", record.order_id);
                    return None;
                }
                Some(CleanedRecord {
                    order_id: record.order_id,
                    customer_name: record.customer_name.trim().to_string(),
                    customer_contact: record.customer_contact,
                    order_date,
                    amount,
                    delivery_status: record.delivery_status,
                    city: record.city,
                })
            })
            .collect();

        tracing::info!(
            "Cleaned {} of {} records ({} returned)",
            cleaned.len(),
            total,
            total - cleaned.len()
        );
        Ok(cleaned)
    }
}
