use crate::domain::model::{
    CleanedRecord, DeliveryStatus, DispatchSummary, MessageTemplates, Notification,
};
use crate::domain::ports::Notifier;

fn fill(template: &str, record: &CleanedRecord) -> String {
    template
        .replace("{customer}", &record.customer_name)
        .replace("{order_id}", &record.order_id)
}

/// The message a record's status calls for, if any.
pub fn compose(record: &CleanedRecord, templates: &MessageTemplates) -> Option<Notification> {
    let (subject, body) = match record.status() {
        DeliveryStatus::Pending => (&templates.pending_subject, &templates.pending_body),
        DeliveryStatus::Delivered => (&templates.delivered_subject, &templates.delivered_body),
        DeliveryStatus::Returned | DeliveryStatus::Other(_) => return None,
    };

    Some(Notification {
        recipient: record.customer_contact.clone(),
        subject: fill(subject, record),
        body: fill(body, record),
    })
}

/// Sends one message per eligible record. A failed send is logged and recorded;
/// the rest of the batch still goes out.
pub async fn dispatch_all(
    notifier: &dyn Notifier,
    records: &[CleanedRecord],
    templates: &MessageTemplates,
) -> DispatchSummary {
    let mut summary = DispatchSummary::default();

    for record in records {
        let Some(notification) = compose(record, templates) else {
            tracing::info!(
                "Order {} gets no notification (status '{}')",
                record.order_id,
                record.delivery_status
            );
            summary.skipped.push(record.order_id.clone());
            continue;
        };

        match notifier.send(&notification).await {
            Ok(()) => {
                tracing::info!("📧 Notification sent to {}", notification.recipient);
                summary.sent.push(notification.recipient);
            }
            Err(e) => {
                tracing::warn!("❌ Notification to {} failed: {}", notification.recipient, e);
                summary.failed.push((notification.recipient, e.to_string()));
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{EtlError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
        fail_for: Option<String>,
    }

    impl RecordingNotifier {
        fn new(fail_for: Option<&str>) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_for: fail_for.map(str::to_string),
            }
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, notification: &Notification) -> Result<()> {
            if self.fail_for.as_deref() == Some(notification.recipient.as_str()) {
                return Err(EtlError::NotificationError {
                    recipient: notification.recipient.clone(),
                    message: "mailbox unavailable".to_string(),
                });
            }
            self.sent.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    fn cleaned(id: &str, status: &str) -> CleanedRecord {
        CleanedRecord {
            order_id: id.to_string(),
            customer_name: format!("Cliente {}", id),
            customer_contact: format!("{}@example.com", id),
            order_date: "2023-03-15".to_string(),
            amount: 10.0,
            delivery_status: status.to_string(),
            city: "Quito".to_string(),
        }
    }

    #[test]
    fn test_compose_by_status() {
        let templates = MessageTemplates::default();

        let pending = compose(&cleaned("P1", "Pendiente"), &templates).unwrap();
        assert_eq!(pending.recipient, "P1@example.com");
        assert_eq!(pending.subject, "Tu pedido está en camino 🚚");
        assert!(pending.body.starts_with("Hola Cliente P1,"));
        assert!(pending.body.contains("ID P1 está en camino"));

        let delivered = compose(&cleaned("D1", " entregado"), &templates).unwrap();
        assert_eq!(delivered.subject, "Tu pedido ha sido entregado 🎉");

        assert!(compose(&cleaned("O1", "Extraviado"), &templates).is_none());
    }

    #[tokio::test]
    async fn test_dispatch_continues_after_failure() {
        let notifier = RecordingNotifier::new(Some("A2@example.com"));
        let records = vec![
            cleaned("A1", "Pendiente"),
            cleaned("A2", "Entregado"),
            cleaned("A3", "Otro"),
            cleaned("A4", "Entregado"),
        ];

        let summary = dispatch_all(&notifier, &records, &MessageTemplates::default()).await;

        assert_eq!(summary.sent, vec!["A1@example.com", "A4@example.com"]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "A2@example.com");
        assert!(summary.failed[0].1.contains("mailbox unavailable"));
        assert_eq!(summary.skipped, vec!["A3"]);
        assert_eq!(notifier.sent.lock().unwrap().len(), 2);
    }
}
