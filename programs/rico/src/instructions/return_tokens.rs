use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::*;
use crate::engine;
use crate::errors::RicoError;
use crate::instructions::utils::{Settlement, TokenRoute};
use crate::state::*;

/// Sends locked tokens back to the vault for a refund at the participant's
/// average price. Anything above the currently locked amount stays with the
/// participant.
pub fn return_tokens(ctx: Context<ReturnTokens>, amount: u64) -> Result<()> {
    let slot = Clock::get()?.slot;
    let effects = engine::return_tokens(&mut ctx.accounts.rico, &mut ctx.accounts.participant, amount, slot)?;
    let tokens = effects.tokens_collected();
    let refund = effects.lamports_paid();

    let settlement = Settlement {
        rico: ctx.accounts.rico.to_account_info(),
        counterparty: ctx.accounts.owner.to_account_info(),
        system_program: None,
        tokens: Some(TokenRoute {
            vault: ctx.accounts.token_vault.to_account_info(),
            vault_bump: ctx.accounts.rico.vault_bump,
            holder: ctx.accounts.owner_token_account.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
        }),
    };
    settlement.flush(effects)?;

    emit!(crate::TokensReturned {
        participant: ctx.accounts.owner.key(),
        tokens,
        refund,
        slot,
        remaining_lockable: ctx.accounts.participant.totals.lockable_tokens,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ReturnTokens<'info> {
    #[account(mut, seeds = [SEED_RICO], bump = rico.bump)]
    pub rico: Box<Account<'info, Rico>>,
    #[account(
        mut,
        seeds = [SEED_PARTICIPANT, owner.key().as_ref()],
        bump = participant.bump,
        has_one = owner,
    )]
    pub participant: Box<Account<'info, Participant>>,
    #[account(mut)]
    pub owner: Signer<'info>,
    #[account(
        mut,
        constraint = owner_token_account.owner == owner.key() @ RicoError::InvalidRecipient,
        constraint = owner_token_account.mint == rico.token_mint @ RicoError::InvalidRecipient,
    )]
    pub owner_token_account: Box<Account<'info, TokenAccount>>,
    #[account(mut, seeds = [SEED_VAULT, rico.key().as_ref()], bump = rico.vault_bump)]
    pub token_vault: Box<Account<'info, TokenAccount>>,
    pub token_program: Program<'info, Token>,
}
