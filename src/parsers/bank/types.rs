use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::TrackerResult, types::TransactionDate};

/// Column layout of the bank statement export.
///
/// The defaults describe the supported bank format:
///
/// ```text
/// No, Fecha, Ref., Lugar, Detalle, Secuencial, (+/-), Valor, Saldo Disponible, ...
/// ```
///
/// preceded by seven lines of account metadata and column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementLayout {
    /// Lines skipped unconditionally before data rows start
    pub preamble_lines: usize,
    /// Rows with fewer fields are dropped
    pub min_fields: usize,
    pub date_column: usize,
    pub place_column: usize,
    pub detail_column: usize,
    pub sign_column: usize,
    pub amount_column: usize,
    /// Sign field value marking a credit; anything else is a debit
    pub income_marker: String,
    /// Description used when both detail and place are blank
    pub fallback_description: String,
}

impl Default for StatementLayout {
    fn default() -> Self {
        StatementLayout {
            preamble_lines: 7,
            min_fields: 8,
            date_column: 1,
            place_column: 3,
            detail_column: 4,
            sign_column: 6,
            amount_column: 7,
            income_marker: "(+)".to_string(),
            fallback_description: "Transaction without description".to_string(),
        }
    }
}

impl StatementLayout {
    /// Loads a layout from JSON. Missing keys keep their default value.
    pub fn from_json(json: &str) -> TrackerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// `DD/MM/YYYY` becomes `YYYY-MM-DD` with day and month padded to two
/// digits. Anything that does not split into exactly three parts on `/`
/// is returned unchanged.
pub(crate) fn normalize_date(raw: &str) -> TransactionDate {
    let parts: Vec<&str> = raw.split('/').collect();
    match parts.as_slice() {
        [day, month, year] => format!("{}-{:0>2}-{:0>2}", year, month, day).into(),
        _ => raw.into(),
    }
}

/// Strips thousands separators and returns the magnitude of the leading
/// number. Trailing text such as `4.50-` or `4.50 USD` is ignored; a value
/// with no leading digits is an error.
pub(crate) fn normalize_amount(raw: &str) -> Result<Decimal, String> {
    let cleaned = raw.replace(',', "");
    let (mantissa, exponent) =
        leading_number(cleaned.trim()).ok_or_else(|| format!("Invalid amount '{}': no number", raw))?;

    let parsed = match exponent {
        Some(exponent) => Decimal::from_scientific(&format!("{}e{}", mantissa, exponent)),
        None => Decimal::from_str(mantissa),
    };
    parsed.map_err(|e| format!("Invalid amount '{}': {}", raw, e))
}

/// Unsigned mantissa and optional exponent of the number `text` starts
/// with. The sign is skipped since only the magnitude is kept.
fn leading_number(text: &str) -> Option<(&str, Option<&str>)> {
    let digits_from = |start: usize| {
        text[start..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count()
    };

    let start = usize::from(text.starts_with(['+', '-']));
    let int_digits = digits_from(start);
    let mut end = start + int_digits;

    if text[end..].starts_with('.') {
        let frac_digits = digits_from(end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if end == start {
        return None;
    }
    let mantissa = &text[start..end];

    let mut exponent = None;
    if text[end..].starts_with(['e', 'E']) {
        let exp_start = end + 1;
        let sign = usize::from(text[exp_start..].starts_with(['+', '-']));
        let exp_digits = digits_from(exp_start + sign);
        if exp_digits > 0 {
            exponent = Some(&text[exp_start..exp_start + sign + exp_digits]);
        }
    }

    Some((mantissa, exponent))
}
