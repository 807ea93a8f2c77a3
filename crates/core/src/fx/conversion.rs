//! Native/fiat conversions at a given exchange rate.

use rust_decimal::Decimal;

use super::fx_model::ExchangeRate;
use crate::constants::{DISPLAY_DECIMAL_PRECISION, NATIVE_DECIMALS};
use crate::errors::{Result, ValidationError};

/// `native * fiat_per_native`, exactly as computed.
pub fn native_to_fiat(native: Decimal, rate: &ExchangeRate) -> Result<Decimal> {
    rate.validate()?;
    native.checked_mul(rate.fiat_per_native).ok_or_else(|| {
        ValidationError::InvalidAmount(format!(
            "{} {} overflows at rate {}",
            native,
            rate.base_currency,
            rate.fiat_per_native
        ))
        .into()
    })
}

/// `fiat / fiat_per_native`, rounded to the ledger's 18 decimal places.
///
/// A zero or negative rate fails with `InvalidRate`; it is never coerced to zero.
pub fn fiat_to_native(fiat: Decimal, rate: &ExchangeRate) -> Result<Decimal> {
    rate.validate()?;
    fiat.checked_div(rate.fiat_per_native)
        .map(|native| native.round_dp(NATIVE_DECIMALS))
        .ok_or_else(|| {
            ValidationError::InvalidAmount(format!(
                "{} {} cannot be converted at rate {}",
                fiat,
                rate.quote_currency,
                rate.fiat_per_native
            ))
            .into()
        })
}

/// Formats a fiat amount for display: two decimals with thousands separators.
///
/// ```
/// use fundhub_core::fx::format_fiat;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_fiat(Decimal::new(123456789, 3)), "123,456.79");
/// ```
pub fn format_fiat(amount: Decimal) -> String {
    let rounded = amount.round_dp(DISPLAY_DECIMAL_PRECISION);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::testing::rate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_native_to_fiat_scenario() {
        let fiat = native_to_fiat(dec!(1.5), &rate(dec!(2000))).unwrap();
        assert_eq!(fiat, dec!(3000.00));
        assert_eq!(format_fiat(fiat), "3,000.00");
    }

    #[test]
    fn test_fiat_to_native() {
        assert_eq!(
            fiat_to_native(dec!(50), &rate(dec!(2000))).unwrap(),
            dec!(0.025)
        );
        assert_eq!(
            fiat_to_native(dec!(10), &rate(dec!(3))).unwrap(),
            dec!(3.333333333333333333)
        );
    }

    #[test]
    fn test_zero_rate_is_invalid() {
        let mut zero = rate(dec!(1));
        zero.fiat_per_native = Decimal::ZERO;
        assert!(matches!(
            fiat_to_native(dec!(10), &zero).unwrap_err(),
            Error::InvalidRate(_)
        ));
        assert!(matches!(
            native_to_fiat(dec!(10), &zero).unwrap_err(),
            Error::InvalidRate(_)
        ));
    }

    #[test]
    fn test_format_fiat() {
        assert_eq!(format_fiat(dec!(0)), "0.00");
        assert_eq!(format_fiat(dec!(5.5)), "5.50");
        assert_eq!(format_fiat(dec!(999.999)), "1,000.00");
        assert_eq!(format_fiat(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(format_fiat(dec!(-1234.5)), "-1,234.50");
    }
}
