use crate::domain::model::{columns, RawAmount};
use crate::utils::error::{EtlError, Result};

pub struct AmountNormalizer;

impl AmountNormalizer {
    /// Parses `1.234,56`-style text (or a native number) and rounds to cents.
    pub fn normalize(raw: &RawAmount) -> Result<f64> {
        let value = match raw {
            RawAmount::Native(value) => *value,
            RawAmount::Text(text) => Self::delocalize(text)
                .trim()
                .parse::<f64>()
                .map_err(|_| Self::conversion_error(raw))?,
        };

        if !value.is_finite() {
            return Err(Self::conversion_error(raw));
        }

        Ok(round_cents(value))
    }

    /// `.` 是千分位，`,` 是小數點
    pub fn delocalize(text: &str) -> String {
        text.replace('.', "").replace(',', ".")
    }

    fn conversion_error(raw: &RawAmount) -> EtlError {
        EtlError::ValueConversionError {
            field: columns::AMOUNT.to_string(),
            value: raw.to_string(),
            row: None,
        }
    }
}

/// 依二進位實值四捨五入到分，剛好一半時取偶數
pub fn round_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawAmount {
        RawAmount::Text(s.to_string())
    }

    #[test]
    fn test_thousands_and_decimal_separators() {
        assert_eq!(AmountNormalizer::normalize(&text("1.234,56")).unwrap(), 1234.56);
        assert_eq!(AmountNormalizer::normalize(&text("1.234.567,8")).unwrap(), 1234567.8);
    }

    #[test]
    fn test_decimal_comma_only() {
        assert_eq!(AmountNormalizer::normalize(&text("10,5")).unwrap(), 10.5);
        assert_eq!(AmountNormalizer::normalize(&text(" 42 ")).unwrap(), 42.0);
    }

    #[test]
    fn test_rounds_to_two_places() {
        assert_eq!(AmountNormalizer::normalize(&text("3,14159")).unwrap(), 3.14);
        assert_eq!(AmountNormalizer::normalize(&RawAmount::Native(7.128)).unwrap(), 7.13);
    }

    #[test]
    fn test_rounding_follows_the_exact_binary_value() {
        assert_eq!(AmountNormalizer::normalize(&text("0,015")).unwrap(), 0.01);
        assert_eq!(AmountNormalizer::normalize(&text("0,125")).unwrap(), 0.12);
        assert_eq!(AmountNormalizer::normalize(&text("0,375")).unwrap(), 0.38);
        assert_eq!(AmountNormalizer::normalize(&text("2,675")).unwrap(), 2.67);
    }

    #[test]
    fn test_huge_amounts_stay_finite() {
        let native = AmountNormalizer::normalize(&RawAmount::Native(1e307)).unwrap();
        assert!(native.is_finite());
        assert_eq!(native, 1e307);

        let parsed = AmountNormalizer::normalize(&text("1e307")).unwrap();
        assert!(parsed.is_finite());
        assert_eq!(parsed, 1e307);

        assert_eq!(round_cents(f64::MAX), f64::MAX);
    }

    #[test]
    fn test_native_number_is_used_as_is() {
        assert_eq!(AmountNormalizer::normalize(&RawAmount::Native(10.5)).unwrap(), 10.5);
    }

    #[test]
    fn test_dot_in_text_is_a_thousands_separator() {
        assert_eq!(AmountNormalizer::normalize(&text("10.5")).unwrap(), 105.0);
    }

    #[test]
    fn test_non_numeric_fails_with_raw_value() {
        let err = AmountNormalizer::normalize(&text("abc")).unwrap_err();
        assert!(matches!(
            err,
            EtlError::ValueConversionError { ref value, ref field, .. }
                if value == "abc" && field == "Valor"
        ));
        assert!(err.to_string().contains("'abc'"));
    }

    #[test]
    fn test_empty_and_non_finite_fail() {
        assert!(AmountNormalizer::normalize(&text("")).is_err());
        assert!(AmountNormalizer::normalize(&text("NaN")).is_err());
        assert!(AmountNormalizer::normalize(&RawAmount::Native(f64::INFINITY)).is_err());
    }
}
