use crate::domain::model::{columns, RawDate};
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Spanish month names, January first.
const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

static SEPARATORS: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"[\s,/-]+"));

/// Component orders tried against a year-first date, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    YearDayMonth,
    YearMonthDay,
}

impl DateLayout {
    pub const CANDIDATES: [DateLayout; 2] = [DateLayout::YearDayMonth, DateLayout::YearMonthDay];

    /// Strict match of `YYYY/x/y`: four-digit year, one or two digit day and month.
    pub fn parse(self, joined: &str) -> Option<NaiveDate> {
        let parts: Vec<&str> = joined.split('/').collect();
        let [year, second, third] = parts.as_slice() else {
            return None;
        };

        if year.len() != 4 || !is_digits(year) {
            return None;
        }
        let year: i32 = year.parse().ok()?;
        let second = parse_short(second)?;
        let third = parse_short(third)?;

        let (month, day) = match self {
            DateLayout::YearDayMonth => (third, second),
            DateLayout::YearMonthDay => (second, third),
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_short(s: &str) -> Option<u32> {
    if s.len() > 2 || !is_digits(s) {
        return None;
    }
    s.parse().ok()
}

fn month_number(component: &str) -> Option<String> {
    MONTH_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(component))
        .map(|idx| format!("{:02}", idx + 1))
}

pub struct DateNormalizer;

impl DateNormalizer {
    /// Canonical `YYYY-MM-DD` for a native or textual date.
    pub fn normalize(raw: &RawDate) -> Result<String> {
        match raw {
            RawDate::Native(value) => Ok(value.format("%Y-%m-%d").to_string()),
            RawDate::Text(text) => Self::normalize_text(text),
        }
    }

    fn normalize_text(text: &str) -> Result<String> {
        let joined = Self::reorder_components(text)?;

        DateLayout::CANDIDATES
            .iter()
            .find_map(|layout| layout.parse(&joined))
            .map(|date| date.format("%Y-%m-%d").to_string())
            .ok_or_else(|| {
                tracing::debug!("No date layout matched '{}' (from '{}')", joined, text);
                EtlError::DateFormatError {
                    field: columns::ORDER_DATE.to_string(),
                    value: text.to_string(),
                    row: None,
                }
            })
    }

    /// 月份名稱換成數字，四字元的元件 (年份) 移到最前面，再以 `/` 串接
    pub fn reorder_components(text: &str) -> Result<String> {
        let separators = SEPARATORS
            .as_ref()
            .map_err(|e| EtlError::ProcessingError {
                message: format!("date separator pattern: {}", e),
            })?;

        let mut components: Vec<String> = separators
            .split(text.trim())
            .map(|c| month_number(c).unwrap_or_else(|| c.to_string()))
            .collect();

        // 多個候選時取第一個
        if let Some(pos) = components.iter().position(|c| c.chars().count() == 4) {
            let year = components.remove(pos);
            components.insert(0, year);
        }

        Ok(components.join("/"))
    }
}
