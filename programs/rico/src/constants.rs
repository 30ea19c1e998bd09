use anchor_lang::prelude::*;

#[constant]
pub const SEED_RICO: &[u8] = b"rico";
#[constant]
pub const SEED_PARTICIPANT: &[u8] = b"participant";
#[constant]
pub const SEED_VAULT: &[u8] = b"vault";

/// Commit stage plus up to 15 distribution stages.
pub const MAX_STAGES: usize = 16;

/// Returned by the stage views when a slot falls outside the schedule.
#[constant]
pub const NO_STAGE: u8 = 255;

/// Upper bound for the locked ratio precision (10^18 keeps u64 * ratio inside u128).
pub const MAX_RATIO_PRECISION: u8 = 18;
