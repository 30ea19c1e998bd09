use anchor_lang::prelude::*;

#[error_code]
pub enum RicoError {
    #[msg("Sale settings have not been initialized")]
    NotInitialized,
    #[msg("Sale settings are already initialized")]
    AlreadyInitialized,
    #[msg("Caller is not allowed to perform this operation")]
    Unauthorized,
    #[msg("Slot is outside the sale window")]
    OutOfPhase,
    #[msg("Requested amount exceeds the unlocked project balance")]
    InsufficientUnlocked,
    #[msg("Withdraw not possible: participant has no locked tokens")]
    NoLockedTokens,
    #[msg("Participant has no pending contributions to cancel")]
    NothingToCancel,
    #[msg("Unknown whitelist decision")]
    InvalidMode,
    #[msg("Invalid sale configuration")]
    ConfigError,
    #[msg("Stage index is outside the schedule")]
    InvalidStage,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Contribution is too small to buy a single token unit")]
    ZeroTokenAmount,
    #[msg("Not enough unsold tokens in the vault")]
    InsufficientTokenSupply,
    #[msg("Arithmetic overflow")]
    MathOverflow,
    #[msg("Transfer recipient does not match the settled account")]
    InvalidRecipient,
    #[msg("Ledger totals no longer balance")]
    LedgerImbalance,
}
