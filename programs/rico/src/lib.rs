use anchor_lang::prelude::*;
use solana_program::clock::Slot;

pub mod constants;
pub mod effects;
pub mod engine;
pub mod errors;
pub mod instructions;
pub mod math;
pub mod schedule;
pub mod state;
pub mod unlock;

pub use constants::*;
pub use errors::*;
pub use instructions::*;
pub use state::*;

use effects::TransferKind;
use engine::CancelModes;

declare_id!("7mRZFcVqBfeUv2hrb2kzUTNZCmqX1BqXV6Lvy2qGSc9x");

#[program]
pub mod rico {
    use super::*;

    /// Creates the sale account and records the caller as deployer.
    /// Nothing else can happen until `init` is called.
    pub fn deploy(ctx: Context<Deploy>) -> Result<()> {
        instructions::deploy::deploy(ctx)
    }

    /// One-shot configuration by the deployer.
    ///
    /// - Builds the stage schedule: stage 0 is the commit phase, stages
    ///   1..=`stage_count` the distribution phase, priced upwards by
    ///   `stage_price_increase`
    /// - Pins the whitelist controller and the project wallet
    /// - Creates the token vault PDA for `token_mint`
    pub fn init(ctx: Context<Init>, params: InitParams) -> Result<()> {
        instructions::init::init(ctx, params)
    }

    pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
        instructions::deposit_tokens::deposit_tokens(ctx, amount)
    }

    /// Contributes `amount` lamports at the current stage price.
    ///
    /// Whitelisted participants get their tokens immediately. Others wait in
    /// pending until the whitelist controller decides. A non-whitelisted
    /// commit below `min_contribution` pulls nothing and instead refunds all
    /// pending contributions.
    pub fn commit(ctx: Context<Commit>, amount: u64) -> Result<()> {
        instructions::commit::commit(ctx, amount)
    }

    pub fn cancel(ctx: Context<Cancel>) -> Result<()> {
        instructions::cancel::cancel(ctx)
    }

    pub fn whitelist(ctx: Context<Whitelist>, decision: u8) -> Result<()> {
        instructions::whitelist::whitelist(ctx, decision)
    }

    /// Reverses part of an accepted position.
    ///
    /// # Refund Math
    ///
    /// Per stage `s`, latest stage first:
    ///
    /// ```text
    /// locked_s   = lockable_s * locked_ratio(slot)
    /// returned_s = min(remaining, locked_s)
    /// refund_s   = returned_s * committed_s / lockable_s      (floor)
    /// ```
    ///
    /// Each stage releases the same fraction (`returned_s / locked_s`) of its
    /// position. The already unlocked part stays with the participant as
    /// tokens and becomes project funds.
    pub fn return_tokens(ctx: Context<ReturnTokens>, amount: u64) -> Result<()> {
        instructions::return_tokens::return_tokens(ctx, amount)
    }

    /// Pays the project wallet out of the unlocked share of committed funds.
    pub fn project_withdraw(ctx: Context<ProjectWithdraw>, amount: u64) -> Result<()> {
        instructions::project_withdraw::project_withdraw(ctx, amount)
    }

    pub fn get_current_stage(ctx: Context<ReadSale>) -> Result<u8> {
        instructions::views::get_current_stage(ctx)
    }

    pub fn get_stage_at_slot(ctx: Context<ReadSale>, slot: Slot) -> Result<u8> {
        instructions::views::get_stage_at_slot(ctx, slot)
    }

    pub fn get_current_price(ctx: Context<ReadSale>) -> Result<u64> {
        instructions::views::get_current_price(ctx)
    }

    pub fn get_price_at_slot(ctx: Context<ReadSale>, slot: Slot) -> Result<u64> {
        instructions::views::get_price_at_slot(ctx, slot)
    }

    pub fn get_token_amount_for_eth_at_stage(
        ctx: Context<ReadSale>,
        eth: u64,
        stage: u8,
    ) -> Result<u64> {
        instructions::views::get_token_amount_for_eth_at_stage(ctx, eth, stage)
    }

    pub fn get_current_locked_ratio(ctx: Context<ReadSale>) -> Result<u128> {
        instructions::views::get_current_locked_ratio(ctx)
    }

    pub fn get_locked_token_amount(ctx: Context<ReadParticipant>) -> Result<u64> {
        instructions::views::get_locked_token_amount(ctx)
    }

    pub fn get_available_project_eth(ctx: Context<ReadSale>) -> Result<u64> {
        instructions::views::get_available_project_eth(ctx)
    }

    pub fn get_cancel_mode_states(ctx: Context<ReadParticipant>) -> Result<CancelModes> {
        instructions::views::get_cancel_mode_states(ctx)
    }
}

// ============================================================================
// EVENTS
// ============================================================================

#[event]
pub struct RicoDeployed {
    pub rico: Pubkey,
    pub deployer: Pubkey,
}

#[event]
pub struct RicoInitialized {
    pub token_mint: Pubkey,
    pub whitelist_controller: Pubkey,
    pub project_wallet: Pubkey,
    pub start_slot: u64,
    pub end_slot: u64,
    pub stage_count: u8,
    pub commit_phase_price: u64,
}

#[event]
pub struct TokensDeposited {
    pub project_wallet: Pubkey,
    pub amount: u64,
    pub token_supply: u64,
}

#[event]
pub struct ContributionReceived {
    pub participant: Pubkey,
    pub amount: u64,
    pub slot: u64,
    pub accepted: bool,
    pub tokens_awarded: u64,
}

#[event]
pub struct ContributionsAccepted {
    pub participant: Pubkey,
    pub amount: u64,
    pub tokens: u64,
}

#[event]
pub struct ContributionsCancelled {
    pub participant: Pubkey,
    pub amount: u64,
    pub kind: TransferKind,
}

#[event]
pub struct TokensReturned {
    pub participant: Pubkey,
    pub tokens: u64,
    pub refund: u64,
    pub slot: u64,
    pub remaining_lockable: u64,
}

#[event]
pub struct ProjectWithdrawal {
    pub project_wallet: Pubkey,
    pub amount: u64,
    pub slot: u64,
    pub total_withdrawn: u64,
    pub still_available: u64,
}
