//! Conversion between decimal display amounts and integer smallest units.

use alloy::primitives::U256;

/// Maximum decimals a U256 amount can carry meaningfully.
pub const MAX_DECIMALS: u8 = 77;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitsError {
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("amount {amount} has more than {decimals} fractional digits")]
    TooPrecise { amount: String, decimals: u8 },

    #[error("amount {0} does not fit in 256 bits")]
    Overflow(String),

    #[error("decimals must be at most {MAX_DECIMALS}, got {0}")]
    InvalidDecimals(u8),
}

fn scale(decimals: u8) -> Result<U256, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::InvalidDecimals(decimals));
    }
    Ok(U256::from(10u64).pow(U256::from(decimals)))
}

/// Parse a non-negative decimal string (e.g. `"1.5"`) into smallest units.
pub fn to_smallest_unit(amount: &str, decimals: u8) -> Result<U256, UnitsError> {
    let amount = amount.trim();
    let invalid = || UnitsError::InvalidAmount(amount.to_string());

    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.len() > decimals as usize {
        return Err(UnitsError::TooPrecise {
            amount: amount.to_string(),
            decimals,
        });
    }

    let overflow = || UnitsError::Overflow(amount.to_string());
    let int_value = if int_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(int_part, 10).map_err(|_| overflow())?
    };
    let frac_value = if frac_part.is_empty() {
        U256::ZERO
    } else {
        let padded = format!("{:0<width$}", frac_part, width = decimals as usize);
        U256::from_str_radix(&padded, 10).map_err(|_| overflow())?
    };

    int_value
        .checked_mul(scale(decimals)?)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(overflow)
}

/// Render smallest units as a decimal string without trailing zeros.
pub fn from_smallest_unit(value: U256, decimals: u8) -> Result<String, UnitsError> {
    let scale = scale(decimals)?;
    let int_part = value / scale;
    let frac_part = value % scale;

    if frac_part.is_zero() {
        return Ok(int_part.to_string());
    }

    let frac = format!("{:0>width$}", frac_part.to_string(), width = decimals as usize);
    Ok(format!("{}.{}", int_part, frac.trim_end_matches('0')))
}
