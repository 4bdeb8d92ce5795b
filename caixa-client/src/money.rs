//! Money parsing and formatting using rust_decimal
//!
//! Amounts typed into the dialog are parsed leniently: the longest numeric
//! prefix is taken and anything unparseable counts as zero.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Round to cents
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse user input the way a browser `parseFloat` would, with zero on failure
///
/// Leading whitespace is skipped; an optional sign, digits and a single
/// decimal point are accepted; parsing stops at the first other character.
/// Magnitudes beyond the `Decimal` range saturate to `Decimal::MAX`/`MIN`.
pub fn parse_amount(input: &str) -> Decimal {
    let text = input.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_point = false;

    for (idx, ch) in text.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }

    if !seen_digit {
        return Decimal::ZERO;
    }

    let number = text[..end].trim_end_matches('.');
    let number = number.strip_prefix('+').unwrap_or(number);
    let (negative, digits) = match number.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, number),
    };

    let parsed = if digits.starts_with('.') {
        Decimal::from_str(&format!("0{}", digits))
    } else {
        Decimal::from_str(digits)
    };

    match parsed {
        Ok(value) if value.is_zero() => Decimal::ZERO,
        Ok(value) if negative => -value,
        Ok(value) => value,
        // Only digits and one point remain, so this is an overflow
        Err(_) if negative => Decimal::MIN,
        Err(_) => Decimal::MAX,
    }
}

/// Two fractional digits, no currency symbol (`"37.50"`)
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Change display text (`"R$ 12.50"`)
pub fn format_change(value: Decimal) -> String {
    format!("R$ {}", format_amount(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_amount("37.50"), dec("37.50"));
        assert_eq!(parse_amount("  100"), dec("100"));
        assert_eq!(parse_amount("-2.5"), dec("-2.5"));
        assert_eq!(parse_amount("+3"), dec("3"));
        assert_eq!(parse_amount(".5"), dec("0.5"));
        assert_eq!(parse_amount("5."), dec("5"));
    }

    #[test]
    fn test_parse_stops_at_garbage() {
        assert_eq!(parse_amount("12abc"), dec("12"));
        assert_eq!(parse_amount("1.2.3"), dec("1.2"));
        // comma is not a decimal separator for parseFloat
        assert_eq!(parse_amount("12,50"), dec("12"));
    }

    #[test]
    fn test_parse_non_numeric_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("-"), Decimal::ZERO);
        assert_eq!(parse_amount("."), Decimal::ZERO);
    }

    #[test]
    fn test_parse_saturates_out_of_range() {
        assert_eq!(parse_amount("100000000000000000000000000000"), Decimal::MAX);
        assert_eq!(parse_amount("-100000000000000000000000000000"), Decimal::MIN);
    }

    #[test]
    fn test_format_two_digits() {
        assert_eq!(format_amount(dec("37.5")), "37.50");
        assert_eq!(format_amount(dec("0")), "0.00");
        assert_eq!(format_amount(dec("2.345")), "2.35");
        assert_eq!(format_amount(dec("-2.5")), "-2.50");
        assert_eq!(format_change(dec("12.5")), "R$ 12.50");
    }
}
