use anchor_lang::prelude::*;
use solana_program::clock::Slot;
use crate::constants::*;
use crate::engine::{self, CancelModes};
use crate::state::*;

pub fn get_current_stage(ctx: Context<ReadSale>) -> Result<u8> {
    get_stage_at_slot(ctx, Clock::get()?.slot)
}

/// `NO_STAGE` when the slot is outside the schedule.
pub fn get_stage_at_slot(ctx: Context<ReadSale>, slot: Slot) -> Result<u8> {
    Ok(ctx.accounts.rico.schedule.stage_at(slot).unwrap_or(NO_STAGE))
}

pub fn get_current_price(ctx: Context<ReadSale>) -> Result<u64> {
    get_price_at_slot(ctx, Clock::get()?.slot)
}

pub fn get_price_at_slot(ctx: Context<ReadSale>, slot: Slot) -> Result<u64> {
    Ok(ctx.accounts.rico.schedule.price_at(slot))
}

pub fn get_token_amount_for_eth_at_stage(ctx: Context<ReadSale>, eth: u64, stage: u8) -> Result<u64> {
    let rico = &ctx.accounts.rico;
    rico.ensure_initialized()?;
    rico.schedule
        .tokens_for_eth_at_stage(eth, stage, rico.token_decimals)
}

/// Locked share over `10^ratio_precision`.
pub fn get_current_locked_ratio(ctx: Context<ReadSale>) -> Result<u128> {
    let rico = &ctx.accounts.rico;
    rico.ensure_initialized()?;
    rico.locked_ratio(Clock::get()?.slot)
}

pub fn get_available_project_eth(ctx: Context<ReadSale>) -> Result<u64> {
    let rico = &ctx.accounts.rico;
    rico.ensure_initialized()?;
    rico.available_project_eth(Clock::get()?.slot)
}

pub fn get_locked_token_amount(ctx: Context<ReadParticipant>) -> Result<u64> {
    let rico = &ctx.accounts.rico;
    rico.ensure_initialized()?;
    ctx.accounts.participant.locked_tokens(
        &rico.unlock_window(),
        Clock::get()?.slot,
        rico.ratio_precision,
    )
}

pub fn get_cancel_mode_states(ctx: Context<ReadParticipant>) -> Result<CancelModes> {
    engine::cancel_modes(&ctx.accounts.rico, &ctx.accounts.participant, Clock::get()?.slot)
}

#[derive(Accounts)]
pub struct ReadSale<'info> {
    #[account(seeds = [SEED_RICO], bump = rico.bump)]
    pub rico: Box<Account<'info, Rico>>,
}

#[derive(Accounts)]
pub struct ReadParticipant<'info> {
    #[account(seeds = [SEED_RICO], bump = rico.bump)]
    pub rico: Box<Account<'info, Rico>>,
    #[account(seeds = [SEED_PARTICIPANT, participant.owner.as_ref()], bump = participant.bump)]
    pub participant: Box<Account<'info, Participant>>,
}
