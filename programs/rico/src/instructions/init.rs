use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::state::*;

/// Fixes the schedule, the two privileged wallets and the token mint.
/// Creates the vault token account, owned by its own PDA.
pub fn init(ctx: Context<Init>, params: InitParams) -> Result<()> {
    let mint = &ctx.accounts.token_mint;
    let rico = &mut ctx.accounts.rico;
    rico.configure(
        ctx.accounts.deployer.key(),
        &params,
        mint.key(),
        mint.decimals,
        ctx.bumps.token_vault,
    )?;

    emit!(crate::RicoInitialized {
        token_mint: rico.token_mint,
        whitelist_controller: rico.whitelist_controller,
        project_wallet: rico.project_wallet,
        start_slot: rico.schedule.start_slot(),
        end_slot: rico.schedule.end_slot(),
        stage_count: params.stage_count,
        commit_phase_price: params.commit_phase_price,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Init<'info> {
    #[account(mut, seeds = [SEED_RICO], bump = rico.bump)]
    pub rico: Box<Account<'info, Rico>>,
    #[account(mut)]
    pub deployer: Signer<'info>,
    pub token_mint: Box<Account<'info, Mint>>,
    #[account(
        init,
        payer = deployer,
        seeds = [SEED_VAULT, rico.key().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = token_vault,
    )]
    pub token_vault: Box<Account<'info, TokenAccount>>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
