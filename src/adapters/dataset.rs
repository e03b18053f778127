use crate::domain::model::{columns, CleanedRecord, RawAmount, RawDate, Record};
use crate::utils::error::{EtlError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "ID_Entrega")]
    order_id: String,
    #[serde(rename = "Cliente")]
    customer_name: String,
    #[serde(rename = "Correo_Cliente")]
    customer_contact: String,
    #[serde(rename = "Fecha_Pedido")]
    order_date: String,
    #[serde(rename = "Valor")]
    amount: String,
    #[serde(rename = "Estado_Entrega")]
    delivery_status: String,
    #[serde(rename = "Ciudad")]
    city: String,
}

/// Decodes dataset bytes into raw records.
#[derive(Debug, Clone)]
pub struct DatasetReader {
    native_date_formats: Vec<String>,
}

impl DatasetReader {
    /// `native_date_formats` are the chrono layouts a spreadsheet uses for real
    /// date cells; matching cells skip the textual date rules.
    pub fn new(native_date_formats: &[String]) -> Self {
        Self {
            native_date_formats: native_date_formats.to_vec(),
        }
    }

    pub fn read(&self, path: &str, data: &[u8]) -> Result<Vec<Record>> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => self.read_csv(data),
            Some("json") => self.read_json(data),
            _ => Err(EtlError::ValidationError {
                message: format!("Unsupported dataset format: {}", path),
            }),
        }
    }

    pub fn read_csv(&self, data: &[u8]) -> Result<Vec<Record>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::None)
            .from_reader(data);

        let mut records = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            let row = row?;
            records.push(Record {
                order_id: row.order_id,
                customer_name: row.customer_name,
                customer_contact: row.customer_contact,
                order_date: self.raw_date(&row.order_date),
                amount: RawAmount::Text(row.amount),
                delivery_status: row.delivery_status,
                city: row.city,
            });
        }

        tracing::debug!("Decoded {} CSV rows", records.len());
        Ok(records)
    }

    /// An array of objects keyed by the spreadsheet column names.
    pub fn read_json(&self, data: &[u8]) -> Result<Vec<Record>> {
        let rows: Vec<Value> = serde_json::from_slice(data)?;

        let records = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.json_record(idx + 1, row))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Decoded {} JSON rows", records.len());
        Ok(records)
    }

    fn json_record(&self, position: usize, row: &Value) -> Result<Record> {
        let obj = row.as_object().ok_or_else(|| EtlError::ValidationError {
            message: format!("record {} is not a JSON object", position),
        })?;
        let field = |name: &str| required(obj, name, position);

        let order_date = match field(columns::ORDER_DATE)? {
            Value::String(text) => self.raw_date(text),
            other => {
                return Err(EtlError::DateFormatError {
                    field: columns::ORDER_DATE.to_string(),
                    value: other.to_string(),
                    row: Some(position),
                })
            }
        };

        let amount = match field(columns::AMOUNT)? {
            Value::Number(n) => RawAmount::Native(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(text) => RawAmount::Text(text.clone()),
            other => {
                return Err(EtlError::ValueConversionError {
                    field: columns::AMOUNT.to_string(),
                    value: other.to_string(),
                    row: Some(position),
                })
            }
        };

        Ok(Record {
            order_id: json_text(field(columns::ORDER_ID)?),
            customer_name: json_text(field(columns::CUSTOMER_NAME)?),
            customer_contact: json_text(field(columns::CUSTOMER_CONTACT)?),
            order_date,
            amount,
            delivery_status: json_text(field(columns::DELIVERY_STATUS)?),
            city: json_text(field(columns::CITY)?),
        })
    }

    fn raw_date(&self, cell: &str) -> RawDate {
        let trimmed = cell.trim();
        for format in &self.native_date_formats {
            if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
                return RawDate::Native(value);
            }
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return RawDate::from(date);
            }
        }
        RawDate::Text(cell.to_string())
    }
}

fn required<'a>(obj: &'a Map<String, Value>, name: &str, position: usize) -> Result<&'a Value> {
    obj.get(name)
        .filter(|v| !v.is_null())
        .ok_or_else(|| EtlError::ValidationError {
            message: format!("record {} is missing '{}'", position, name),
        })
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn default_native_date_formats() -> Vec<String> {
    vec![
        "%Y-%m-%d %H:%M:%S".to_string(),
        "%Y-%m-%dT%H:%M:%S".to_string(),
    ]
}

/// Cleaned records as CSV with the spreadsheet headers.
pub fn write_csv(records: &[CleanedRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if records.is_empty() {
        writer.write_record([
            columns::ORDER_ID,
            columns::CUSTOMER_NAME,
            columns::CUSTOMER_CONTACT,
            columns::ORDER_DATE,
            columns::AMOUNT,
            columns::DELIVERY_STATUS,
            columns::CITY,
        ])?;
    }
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}
