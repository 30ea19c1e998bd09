//! Locked fraction of reversible positions over the distribution window.
//!
//! The ratio is always the *locked* share: `10^precision` before the window
//! opens, falling linearly to `0` at its last slot.

use anchor_lang::prelude::*;
use solana_program::clock::Slot;

use crate::errors::RicoError;
use crate::math::{mul_div_floor, pow10};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnlockWindow {
    pub start_slot: Slot,
    pub end_slot: Slot,
}

impl UnlockWindow {
    pub fn locked_ratio(&self, slot: Slot, precision: u8) -> Result<u128> {
        locked_ratio(slot, self.start_slot, self.end_slot, precision)
    }

    pub fn locked_amount(&self, slot: Slot, precision: u8, total: u64) -> Result<u64> {
        locked_amount(slot, self.start_slot, self.end_slot, precision, total)
    }
}

/// Locked fraction as a numerator over `10^precision`, rounded down.
pub fn locked_ratio(slot: Slot, start: Slot, end: Slot, precision: u8) -> Result<u128> {
    let full = pow10(precision)?;
    if slot >= end {
        return Ok(0);
    }
    if slot < start {
        return Ok(full);
    }
    let remaining = (end - slot) as u128;
    let span = (end - start) as u128;
    full.checked_mul(remaining)
        .map(|n| n / span)
        .ok_or_else(|| error!(RicoError::MathOverflow))
}

/// Share of `total` that is still locked at `slot`, rounded down.
pub fn locked_amount(slot: Slot, start: Slot, end: Slot, precision: u8, total: u64) -> Result<u64> {
    if slot >= end {
        return Ok(0);
    }
    if slot < start {
        return Ok(total);
    }
    let ratio = locked_ratio(slot, start, end, precision)?;
    mul_div_floor(total, ratio, pow10(precision)?)
}
