use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 上游試算表的欄位名稱
pub mod columns {
    pub const ORDER_ID: &str = "ID_Entrega";
    pub const CUSTOMER_NAME: &str = "Cliente";
    pub const CUSTOMER_CONTACT: &str = "Correo_Cliente";
    pub const ORDER_DATE: &str = "Fecha_Pedido";
    pub const AMOUNT: &str = "Valor";
    pub const DELIVERY_STATUS: &str = "Estado_Entrega";
    pub const CITY: &str = "Ciudad";
}

/// A date cell as it arrives from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDate {
    Native(NaiveDateTime),
    Text(String),
}

impl From<NaiveDate> for RawDate {
    fn from(date: NaiveDate) -> Self {
        RawDate::Native(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for RawDate {
    fn from(value: NaiveDateTime) -> Self {
        RawDate::Native(value)
    }
}

impl From<&str> for RawDate {
    fn from(value: &str) -> Self {
        RawDate::Text(value.to_string())
    }
}

impl std::fmt::Display for RawDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawDate::Native(value) => write!(f, "{}", value),
            RawDate::Text(text) => f.write_str(text),
        }
    }
}

/// An amount cell as it arrives from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAmount {
    Native(f64),
    Text(String),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Native(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl std::fmt::Display for RawAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawAmount::Native(value) => write!(f, "{}", value),
            RawAmount::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    Pending,
    Delivered,
    Returned,
    Other(String),
}

impl DeliveryStatus {
    /// Case and surrounding whitespace are ignored.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pendiente" => DeliveryStatus::Pending,
            "entregado" => DeliveryStatus::Delivered,
            "devuelto" => DeliveryStatus::Returned,
            _ => DeliveryStatus::Other(raw.to_string()),
        }
    }
}

/// One delivery entry before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub order_id: String,
    pub customer_name: String,
    pub customer_contact: String,
    pub order_date: RawDate,
    pub amount: RawAmount,
    pub delivery_status: String,
    pub city: String,
}

impl Record {
    pub fn status(&self) -> DeliveryStatus {
        DeliveryStatus::parse(&self.delivery_status)
    }
}

/// A normalized record that survived the returned-status filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    #[serde(rename = "ID_Entrega")]
    pub order_id: String,
    #[serde(rename = "Cliente")]
    pub customer_name: String,
    #[serde(rename = "Correo_Cliente")]
    pub customer_contact: String,
    #[serde(rename = "Fecha_Pedido")]
    pub order_date: String,
    #[serde(rename = "Valor")]
    pub amount: f64,
    #[serde(rename = "Estado_Entrega")]
    pub delivery_status: String,
    #[serde(rename = "Ciudad")]
    pub city: String,
}

impl CleanedRecord {
    pub fn status(&self) -> DeliveryStatus {
        DeliveryStatus::parse(&self.delivery_status)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total: usize,
    pub pending_by_city: Vec<CityCount>,
    pub delivered_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Subject and body templates; `{customer}` and `{order_id}` are substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    pub pending_subject: String,
    pub pending_body: String,
    pub delivered_subject: String,
    pub delivered_body: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            pending_subject: "Tu pedido está en camino 🚚".to_string(),
            pending_body: "Hola {customer},\n\n\
                Tu pedido con ID {order_id} está en camino y será entregado pronto.\n\n\
                Gracias por confiar en nosotros."
                .to_string(),
            delivered_subject: "Tu pedido ha sido entregado 🎉".to_string(),
            delivered_body: "Hola {customer},\n\n\
                Tu pedido con ID {order_id} ha sido entregado con éxito.\n\n\
                Gracias por confiar en nosotros."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DispatchSummary {
    pub sent: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<CleanedRecord>,
    pub report: Report,
    pub dropped: usize,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub extracted: usize,
    pub processed: usize,
    pub dropped: usize,
    pub report: Report,
    pub dispatch: DispatchSummary,
}
