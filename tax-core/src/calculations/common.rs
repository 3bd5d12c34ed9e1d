//! Common utility functions for tax calculations.
//!
//! Number formatting shared by the bracket labels and the deduction-limit
//! error messages.

use rust_decimal::Decimal;

/// Formats the whole-unit part of a value with comma thousands separators.
///
/// Any fractional part is truncated.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::format_thousands;
///
/// assert_eq!(format_thousands(dec!(0)), "0");
/// assert_eq!(format_thousands(dec!(150001)), "150,001");
/// assert_eq!(format_thousands(dec!(2000000.75)), "2,000,000");
/// ```
pub fn format_thousands(value: Decimal) -> String {
    let whole = value.trunc();
    let digits = whole.abs().normalize().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole.is_sign_negative() && !whole.is_zero() {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
