use anchor_lang::prelude::*;

use crate::errors::RicoError;

/// `10^exp` as u128.
pub fn pow10(exp: u8) -> Result<u128> {
    10u128
        .checked_pow(exp as u32)
        .ok_or_else(|| error!(RicoError::MathOverflow))
}

/// `value * numerator / denominator`, rounded down, computed in u128.
pub fn mul_div_floor(value: u64, numerator: u128, denominator: u128) -> Result<u64> {
    require!(denominator != 0, RicoError::MathOverflow);
    let product = (value as u128)
        .checked_mul(numerator)
        .ok_or_else(|| error!(RicoError::MathOverflow))?;
    u64::try_from(product / denominator).map_err(|_| error!(RicoError::MathOverflow))
}

pub fn add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or_else(|| error!(RicoError::MathOverflow))
}

pub fn sub(a: u64, b: u64) -> Result<u64> {
    a.checked_sub(b).ok_or_else(|| error!(RicoError::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_rounds_down() {
        assert_eq!(mul_div_floor(10, 1, 3).unwrap(), 3);
        assert_eq!(mul_div_floor(u64::MAX, 2, 2).unwrap(), u64::MAX);
    }

    #[test]
    fn mul_div_rejects_results_above_u64() {
        assert!(mul_div_floor(u64::MAX, 2, 1).is_err());
        assert!(mul_div_floor(1, 1, 0).is_err());
    }

    #[test]
    fn checked_helpers_fail_instead_of_wrapping() {
        assert!(sub(1, 2).is_err());
        assert!(add(u64::MAX, 1).is_err());
        assert_eq!(pow10(9).unwrap(), 1_000_000_000);
        assert!(pow10(39).is_err());
    }
}
