//! Conversions between wei (the ledger's integer unit) and native-currency decimals.

use rust_decimal::Decimal;

use crate::constants::NATIVE_DECIMALS;
use crate::errors::{Error, Result, ValidationError};

/// Decodes a wei amount read from the ledger.
///
/// Fails with `Decoding` if the amount exceeds what a `Decimal` can hold.
pub fn wei_to_native(wei: u128) -> Result<Decimal> {
    let mantissa = i128::try_from(wei)
        .map_err(|_| Error::Decoding(format!("wei amount {} out of range", wei)))?;
    Decimal::try_from_i128_with_scale(mantissa, NATIVE_DECIMALS)
        .map(|d| d.normalize())
        .map_err(|_| Error::Decoding(format!("wei amount {} out of range", wei)))
}

/// Encodes a native amount as wei, rounding to the ledger's 18 decimal places.
pub fn native_to_wei(amount: Decimal) -> Result<u128> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::InvalidAmount(format!("negative amount {}", amount)).into());
    }

    let rounded = amount.round_dp(NATIVE_DECIMALS);
    let factor = 10u128.pow(NATIVE_DECIMALS - rounded.scale());
    (rounded.mantissa() as u128)
        .checked_mul(factor)
        .ok_or_else(|| ValidationError::InvalidAmount(format!("amount {} too large", amount)).into())
}
