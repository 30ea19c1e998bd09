use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::*;
use crate::errors::RicoError;
use crate::instructions::utils::{collect_tokens, TokenRoute};
use crate::state::*;

/// Funds the vault with tokens for sale. Only the project wallet may deposit.
pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
    let rico = &mut ctx.accounts.rico;
    rico.ensure_initialized()?;
    require_keys_eq!(
        ctx.accounts.project_wallet.key(),
        rico.project_wallet,
        RicoError::Unauthorized
    );
    require!(amount > 0, RicoError::ZeroAmount);

    rico.ledger.record_deposit(amount)?;
    let token_supply = rico.ledger.token_supply;

    let route = TokenRoute {
        vault: ctx.accounts.token_vault.to_account_info(),
        vault_bump: ctx.accounts.rico.vault_bump,
        holder: ctx.accounts.project_token_account.to_account_info(),
        token_program: ctx.accounts.token_program.to_account_info(),
    };
    collect_tokens(&route, &ctx.accounts.project_wallet.to_account_info(), amount)?;

    emit!(crate::TokensDeposited {
        project_wallet: ctx.accounts.project_wallet.key(),
        amount,
        token_supply,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct DepositTokens<'info> {
    #[account(mut, seeds = [SEED_RICO], bump = rico.bump)]
    pub rico: Box<Account<'info, Rico>>,
    pub project_wallet: Signer<'info>,
    #[account(
        mut,
        constraint = project_token_account.owner == project_wallet.key() @ RicoError::InvalidRecipient,
        constraint = project_token_account.mint == rico.token_mint @ RicoError::InvalidRecipient,
    )]
    pub project_token_account: Box<Account<'info, TokenAccount>>,
    #[account(mut, seeds = [SEED_VAULT, rico.key().as_ref()], bump = rico.vault_bump)]
    pub token_vault: Box<Account<'info, TokenAccount>>,
    pub token_program: Program<'info, Token>,
}
