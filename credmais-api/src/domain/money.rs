use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::{ApiError, ApiResult};

/// Formats an amount in the Brazilian display locale: `R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }

    if negative {
        format!("R$ -{grouped},{frac_part}")
    } else {
        format!("R$ {grouped},{frac_part}")
    }
}

/// Largest whole part a stored amount can carry: `NUMERIC(14, 2)` leaves 12 integer digits.
const MAX_INTEGER_DIGITS: u32 = 12;

/// Parses a monetary amount typed into a form.
///
/// Blank input is zero. Both `1234.56` and the display form `1.234,56` are accepted.
/// Negative amounts, fractions of a cent and amounts with more than 12 integer digits
/// are rejected.
pub fn parse_amount(raw: &str) -> ApiResult<Decimal> {
    let trimmed = raw.trim().trim_start_matches("R$").trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let normalized = match (trimmed.rfind(','), trimmed.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => trimmed.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => trimmed.replace(',', ""),
        (Some(_), None) => trimmed.replace(',', "."),
        _ => trimmed.to_string(),
    };

    let amount = Decimal::from_str(&normalized)
        .map_err(|_| ApiError::ValidationError(format!("Invalid amount: {raw}")))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ApiError::ValidationError(
            "Amount must not be negative".to_string(),
        ));
    }
    if amount.normalize().scale() > 2 {
        return Err(ApiError::ValidationError(
            "Amount must have at most 2 decimal places".to_string(),
        ));
    }
    if amount.trunc() >= Decimal::from(10i64.pow(MAX_INTEGER_DIGITS)) {
        return Err(ApiError::ValidationError(format!(
            "Amount must have at most {MAX_INTEGER_DIGITS} integer digits"
        )));
    }
    Ok(amount.round_dp(2))
}
