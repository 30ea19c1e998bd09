use anchor_lang::prelude::*;
use crate::constants::*;
use crate::engine;
use crate::instructions::utils::Settlement;
use crate::state::*;

pub fn project_withdraw(ctx: Context<ProjectWithdraw>, amount: u64) -> Result<()> {
    let slot = Clock::get()?.slot;
    let caller = ctx.accounts.project_wallet.key();
    let effects = engine::project_withdraw(&mut ctx.accounts.rico, caller, amount, slot)?;

    let settlement = Settlement {
        rico: ctx.accounts.rico.to_account_info(),
        counterparty: ctx.accounts.project_wallet.to_account_info(),
        system_program: None,
        tokens: None,
    };
    settlement.flush(effects)?;

    emit!(crate::ProjectWithdrawal {
        project_wallet: caller,
        amount,
        slot,
        total_withdrawn: ctx.accounts.rico.ledger.project_withdrawn_eth,
        still_available: ctx.accounts.rico.available_project_eth(slot)?,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ProjectWithdraw<'info> {
    #[account(mut, seeds = [SEED_RICO], bump = rico.bump)]
    pub rico: Box<Account<'info, Rico>>,
    #[account(mut)]
    pub project_wallet: Signer<'info>,
}
