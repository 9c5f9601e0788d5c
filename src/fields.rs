//! Positional field helpers.
//!
//! Exports have no quoting or escaping, so a row is simply split on commas.
//! Numbers are read leniently from the start of a field the way the mobile
//! tool's consumers always have: `"7.5h"` is 7.5, `"1e1"` is 10, `"abc"` is
//! nothing.

use rust_decimal::Decimal;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

/// Split a row into trimmed fields.
pub fn split_row(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Field at `index`, empty when the row is shorter.
pub fn field<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).copied().unwrap_or("")
}

/// Non-empty field at `index`.
pub fn optional_field(fields: &[&str], index: usize) -> Option<String> {
    let value = field(fields, index);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Leading integer of a field, if it is a positive line number.
pub fn leading_line_number(value: &str) -> Option<u32> {
    let value = value.trim_start();
    let digits: String = value
        .strip_prefix('+')
        .unwrap_or(value)
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

/// Leading decimal number of a field, zero when there is none.
///
/// An `e`/`E` exponent is read when at least one digit follows it. Values
/// outside the `Decimal` range read as zero.
pub fn leading_decimal(value: &str) -> Decimal {
    let value = value.trim_start();
    let mut chars = value.chars().peekable();
    let mut number = String::new();

    if let Some(&sign) = chars.peek() {
        if sign == '-' || sign == '+' {
            if sign == '-' {
                number.push('-');
            }
            chars.next();
        }
    }

    let mut int_digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        int_digits.push(c);
        chars.next();
    }

    let mut frac_digits = String::new();
    if chars.peek() == Some(&'.') {
        chars.next();
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            frac_digits.push(c);
            chars.next();
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return Decimal::ZERO;
    }

    number.push_str(if int_digits.is_empty() { "0" } else { &int_digits });
    if !frac_digits.is_empty() {
        number.push('.');
        number.push_str(&frac_digits);
    }

    let parsed = match exponent(&mut chars) {
        Some(exp) => Decimal::from_scientific(&format!("{}e{}", number, exp)),
        None => Decimal::from_str(&number),
    };
    parsed.unwrap_or(Decimal::ZERO)
}

/// Consume an exponent suffix such as `e3` or `E-2`, leaving `chars`
/// untouched when there is none.
fn exponent(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut ahead = chars.clone();
    if !matches!(ahead.next(), Some('e' | 'E')) {
        return None;
    }

    let mut exp = String::new();
    if let Some(&sign) = ahead.peek() {
        if sign == '-' || sign == '+' {
            if sign == '-' {
                exp.push('-');
            }
            ahead.next();
        }
    }

    let digits: String = ahead.by_ref().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    exp.push_str(&digits);
    *chars = ahead;
    Some(exp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_row_trims() {
        assert_eq!(split_row(" 1, Taster ,\r"), vec!["1", "Taster", ""]);
    }

    #[test]
    fn test_field_out_of_range() {
        let fields = split_row("a,b");
        assert_eq!(field(&fields, 5), "");
        assert_eq!(optional_field(&fields, 1), Some("b".to_string()));
        assert_eq!(optional_field(&split_row("a,,c"), 1), None);
    }

    #[test]
    fn test_leading_line_number() {
        assert_eq!(leading_line_number("3"), Some(3));
        assert_eq!(leading_line_number(" 12a"), Some(12));
        assert_eq!(leading_line_number("0"), None);
        assert_eq!(leading_line_number("-2"), None);
        assert_eq!(leading_line_number("x"), None);
    }

    #[test]
    fn test_leading_decimal() {
        assert_eq!(leading_decimal("7.5").to_string(), "7.5");
        assert_eq!(leading_decimal("2h").to_string(), "2");
        assert_eq!(leading_decimal(".5").to_string(), "0.5");
        assert_eq!(leading_decimal("-1.25").to_string(), "-1.25");
        assert_eq!(leading_decimal("abc"), Decimal::ZERO);
        assert_eq!(leading_decimal(""), Decimal::ZERO);
        assert_eq!(leading_decimal("3.").to_string(), "3");
    }

    #[test]
    fn test_leading_decimal_exponent() {
        assert_eq!(leading_decimal("1e1"), Decimal::from(10));
        assert_eq!(leading_decimal("2.5E-1"), Decimal::from_str("0.25").unwrap());
        assert_eq!(leading_decimal("1.5e+2h"), Decimal::from(150));
        assert_eq!(leading_decimal("-4e0"), Decimal::from(-4));
        // no exponent digits
        assert_eq!(leading_decimal("3e"), Decimal::from(3));
        assert_eq!(leading_decimal("3e-"), Decimal::from(3));
        assert_eq!(leading_decimal("3 e2"), Decimal::from(3));
        // out of range
        assert_eq!(leading_decimal("1e40"), Decimal::ZERO);
    }
}
