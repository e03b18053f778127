use delivery_etl::core::amount_normalizer::AmountNormalizer;
use delivery_etl::core::date_normalizer::DateNormalizer;
use delivery_etl::core::record_pipeline::RecordPipeline;
use delivery_etl::core::report::ReportSummarizer;
use delivery_etl::core::Pipeline;
use delivery_etl::domain::model::{RawAmount, RawDate, Record};
use delivery_etl::{CliConfig, DeliveryPipeline, EtlError, LocalStorage, LogNotifier};

fn record(id: &str, date: &str, amount: &str, status: &str, city: &str) -> Record {
    Record {
        order_id: id.to_string(),
        customer_name: format!("Cliente {}", id),
        customer_contact: format!("cliente{}@example.com", id),
        order_date: RawDate::from(date),
        amount: RawAmount::Text(amount.to_string()),
        delivery_status: status.to_string(),
        city: city.to_string(),
    }
}

#[test]
fn test_every_accepted_spelling_lands_on_iso() {
    let cases = [
        ("15 Marzo 2023", "2023-03-15"),
        ("15-marzo-2023", "2023-03-15"),
        ("15, MARZO, 2023", "2023-03-15"),
        ("2023/03/15", "2023-03-15"),
        ("15/03/2023", "2023-03-15"),
        ("  1 enero 2024  ", "2024-01-01"),
        ("3 Septiembre 2022", "2022-09-03"),
        ("25/12/2021", "2021-12-25"),
    ];

    for (input, expected) in cases {
        let normalized = DateNormalizer::normalize(&RawDate::from(input))
            .unwrap_or_else(|e| panic!("'{}' failed: {}", input, e));
        assert_eq!(normalized, expected, "input: '{}'", input);
    }
}

#[test]
fn test_normalized_output_is_stable_when_year_month_is_unambiguous() {
    for input in ["2023-03-15", "2024-12-31", "2022-01-20"] {
        let once = DateNormalizer::normalize(&RawDate::from(input)).unwrap();
        assert_eq!(once, input);
    }
}

#[test]
fn test_rejected_dates_name_the_value() {
    for input in ["ayer", "15 Marzo 23", "30 Febrero 2023", ""] {
        match DateNormalizer::normalize(&RawDate::from(input)) {
            Err(EtlError::DateFormatError { value, .. }) => assert_eq!(value, input),
            other => panic!("'{}' should be rejected, got {:?}", input, other),
        }
    }
}

#[test]
fn test_amounts_use_comma_decimals_and_dot_thousands() {
    let cases = [
        ("1.234,56", 1234.56),
        ("0,99", 0.99),
        ("12.000", 12000.0),
        (" 42 ", 42.0),
        ("3,14159", 3.14),
    ];

    for (input, expected) in cases {
        let value = AmountNormalizer::normalize(&RawAmount::Text(input.to_string())).unwrap();
        assert_eq!(value, expected, "input: '{}'", input);
    }

    assert!(matches!(
        AmountNormalizer::normalize(&RawAmount::Text("doce".to_string())),
        Err(EtlError::ValueConversionError { .. })
    ));
}

#[test]
fn test_returned_rows_are_removed_after_normalizing() {
    let records = vec![
        record("1", "15 Marzo 2023", "10,00", "Pendiente", "Lima"),
        record("2", "16 Marzo 2023", "20,00", " DEVUELTO ", "Lima"),
        record("3", "17 Marzo 2023", "30,00", "Entregado", "Cusco"),
    ];

    let cleaned = RecordPipeline::process(records).unwrap();
    let ids: Vec<&str> = cleaned.iter().map(|r| r.order_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn test_returned_rows_still_need_valid_dates() {
    let records = vec![
        record("1", "15 Marzo 2023", "10,00", "Pendiente", "Lima"),
        record("2", "sin fecha", "20,00", "Devuelto", "Lima"),
    ];

    let err = RecordPipeline::process(records).unwrap_err();
    assert!(matches!(err, EtlError::DateFormatError { row: Some(2), .. }));
}

#[test]
fn test_report_orders_busiest_city_first() {
    let records = vec![
        record("1", "15 Marzo 2023", "10,00", "Pendiente", "Trujillo"),
        record("2", "15 Marzo 2023", "10,00", "Pendiente", "Cusco"),
        record("3", "15 Marzo 2023", "10,00", "Pendiente", "Arequipa"),
        record("4", "15 Marzo 2023", "10,00", "Pendiente", "Cusco"),
        record("5", "15 Marzo 2023", "0,10", "Entregado", "Lima"),
        record("6", "15 Marzo 2023", "0,20", "Entregado", "Lima"),
    ];

    let report = ReportSummarizer::summarize(&RecordPipeline::process(records).unwrap());
    let cities: Vec<(&str, usize)> = report
        .pending_by_city
        .iter()
        .map(|c| (c.city.as_str(), c.count))
        .collect();

    assert_eq!(report.total, 6);
    assert_eq!(cities, vec![("Cusco", 2), ("Arequipa", 1), ("Trujillo", 1)]);
    assert_eq!(report.delivered_total, 0.3);
}

#[test]
fn test_pipeline_transform_counts_dropped_rows() {
    use clap::Parser;

    let config = CliConfig::parse_from(["delivery-etl", "--no-notify"]);
    let pipeline = DeliveryPipeline::new(LocalStorage::default(), config, Box::new(LogNotifier));

    let records = vec![
        record("1", "15 Marzo 2023", "10,00", "Devuelto", "Lima"),
        record("2", "15 Marzo 2023", "10,00", "Devuelto", "Lima"),
        record("3", "15 Marzo 2023", "10,00", "En almacén", "Lima"),
    ];

    let result = tokio_test::block_on(pipeline.transform(records)).unwrap();
    assert_eq!(result.dropped, 2);
    assert_eq!(result.report.total, 1);
    assert!(result.report.pending_by_city.is_empty());
    assert_eq!(result.report.delivered_total, 0.0);
}
