use crate::core::amount_normalizer::round_cents;
use crate::domain::model::{CityCount, CleanedRecord, DeliveryStatus, Report};
use std::collections::HashMap;
use std::fmt;

pub struct ReportSummarizer;

impl ReportSummarizer {
    pub fn summarize(records: &[CleanedRecord]) -> Report {
        let mut pending: HashMap<&str, usize> = HashMap::new();
        let mut delivered_total = 0.0;

        for record in records {
            match record.status() {
                DeliveryStatus::Pending => *pending.entry(record.city.as_str()).or_default() += 1,
                DeliveryStatus::Delivered => delivered_total += record.amount,
                DeliveryStatus::Returned | DeliveryStatus::Other(_) => {}
            }
        }

        let mut pending_by_city: Vec<CityCount> = pending
            .into_iter()
            .map(|(city, count)| CityCount {
                city: city.to_string(),
                count,
            })
            .collect();
        // 數量多的在前，同數量依城市名稱
        pending_by_city.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.city.cmp(&b.city)));

        Report {
            total: records.len(),
            pending_by_city,
            delivered_total: round_cents(delivered_total),
        }
    }
}

impl Report {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.pending_by_city.len() + 3);
        lines.push(format!("Total de entregas procesadas: {}", self.total));
        lines.push("Ciudades con más entregas pendientes:".to_string());
        for entry in &self.pending_by_city {
            lines.push(format!("- {}: {}", entry.city, entry.count));
        }
        lines.push(format!(
            "Monto total de entregas realizadas: {:.2}",
            self.delivered_total
        ));
        lines
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(status: &str, amount: f64, city: &str) -> CleanedRecord {
        CleanedRecord {
            order_id: "1".to_string(),
            customer_name: "Ana".to_string(),
            customer_contact: "ana@example.com".to_string(),
            order_date: "2023-03-15".to_string(),
            amount,
            delivery_status: status.to_string(),
            city: city.to_string(),
        }
    }

    #[test]
    fn test_summarize_counts_and_totals() {
        let records = vec![
            cleaned("Entregado", 10.0, "X"),
            cleaned("Pendiente", 5.0, "X"),
            cleaned("Pendiente", 7.0, "Y"),
        ];

        let report = ReportSummarizer::summarize(&records);

        assert_eq!(report.total, 3);
        assert_eq!(report.delivered_total, 10.0);
        let mut pending: Vec<(&str, usize)> = report
            .pending_by_city
            .iter()
            .map(|c| (c.city.as_str(), c.count))
            .collect();
        pending.sort();
        assert_eq!(pending, vec![("X", 1), ("Y", 1)]);
    }

    #[test]
    fn test_pending_ordered_by_descending_count() {
        let records = vec![
            cleaned("Pendiente", 1.0, "Cali"),
            cleaned(" pendiente", 1.0, "Medellín"),
            cleaned("PENDIENTE", 1.0, "Medellín"),
            cleaned("Entregado", 1.0, "Cali"),
        ];

        let report = ReportSummarizer::summarize(&records);
        assert_eq!(report.pending_by_city[0].city, "Medellín");
        assert_eq!(report.pending_by_city[0].count, 2);
        assert_eq!(report.pending_by_city[1].city, "Cali");
    }

    #[test]
    fn test_delivered_total_sums_only_delivered() {
        let records = vec![
            cleaned("Entregado", 10.1, "X"),
            cleaned("entregado ", 0.2, "X"),
            cleaned("En bodega", 99.0, "X"),
        ];

        let report = ReportSummarizer::summarize(&records);
        assert_eq!(report.delivered_total, 10.3);
        assert!(report.pending_by_city.is_empty());
    }

    #[test]
    fn test_render_report_text() {
        let report = Report {
            total: 3,
            pending_by_city: vec![CityCount {
                city: "Lima".to_string(),
                count: 2,
            }],
            delivered_total: 10.0,
        };

        assert_eq!(
            report.to_string(),
            "Total de entregas procesadas: 3\n\
             Ciudades con más entregas pendientes:\n\
             - Lima: 2\n\
             Monto total de entregas realizadas: 10.00"
        );
    }
}
