//! Monetary amount parsing and formatting.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount is a `rust_decimal::Decimal`. Text coming from form inputs
//! or loosely typed backend payloads is parsed leniently: the leading numeric
//! prefix is kept and anything unparseable becomes zero, so a malformed value
//! never blocks the form.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount as it arrives at the boundary, before coercion.
///
/// Backend payloads and form inputs carry amounts as JSON numbers, as text,
/// or not at all.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, kept in its textual form (serde_json `arbitrary_precision`).
    Number(serde_json::Number),
    /// Free text typed by a user or sent as a string.
    Text(String),
    /// No amount supplied (`null` or absent).
    #[default]
    Missing,
    /// An already exact decimal.
    Exact(Decimal),
}

impl AmountInput {
    /// Coerces the input to a non-negative decimal.
    ///
    /// Unparseable, missing, and negative inputs all become zero.
    #[must_use]
    pub fn coerce(&self) -> Decimal {
        let parsed = match self {
            Self::Number(number) => parse_amount(&number.to_string()),
            Self::Text(text) => parse_amount(text),
            Self::Missing => None,
            Self::Exact(value) => Some(*value),
        };

        match parsed {
            Some(value) if value > Decimal::ZERO => value,
            _ => Decimal::ZERO,
        }
    }
}

impl From<&str> for AmountInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        Self::Exact(value)
    }
}

/// Parses the leading numeric prefix of `input`.
///
/// Accepts an optional sign, digits, one decimal separator (`.` or `,`) and
/// an optional exponent. Trailing garbage is ignored (`"12abc"` is 12).
/// Returns `None` when no digits lead the text or the value does not fit a
/// `Decimal`.
#[must_use]
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let text = input.trim();
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut mantissa = String::new();

    if let Some(&sign) = bytes.first() {
        if sign == b'+' || sign == b'-' {
            if sign == b'-' {
                mantissa.push('-');
            }
            pos += 1;
        }
    }

    let int_start = pos;
    pos = skip_digits(bytes, pos);
    let int_digits = &text[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && (bytes[pos] == b'.' || bytes[pos] == b',') {
        let frac_end = skip_digits(bytes, pos + 1);
        if frac_end > pos + 1 {
            frac_digits = &text[pos + 1..frac_end];
            pos = frac_end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    mantissa.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        mantissa.push('.');
        mantissa.push_str(frac_digits);
    }

    match exponent_at(text, pos) {
        Some(exponent) => Decimal::from_scientific(&format!("{mantissa}e{exponent}")).ok(),
        None => Decimal::from_str(&mantissa).ok(),
    }
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

/// Returns the signed exponent digits following `pos`, if well formed.
fn exponent_at(text: &str, pos: usize) -> Option<String> {
    let bytes = text.as_bytes();
    if pos >= bytes.len() || !(bytes[pos] == b'e' || bytes[pos] == b'E') {
        return None;
    }

    let mut start = pos + 1;
    let mut exponent = String::new();
    if start < bytes.len() && (bytes[start] == b'+' || bytes[start] == b'-') {
        if bytes[start] == b'-' {
            exponent.push('-');
        }
        start += 1;
    }

    let end = skip_digits(bytes, start);
    if end == start {
        return None;
    }
    exponent.push_str(&text[start..end]);
    Some(exponent)
}

/// Formats an amount with exactly `scale` decimal places.
///
/// Uses Banker's Rounding when the amount carries more precision.
#[must_use]
pub fn format_amount(amount: Decimal, scale: u32) -> String {
    let mut rounded = amount.round_dp(scale);
    rounded.rescale(scale);
    rounded.to_string()
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
