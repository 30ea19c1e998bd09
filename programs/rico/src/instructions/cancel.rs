use anchor_lang::prelude::*;
use crate::constants::*;
use crate::effects::TransferKind;
use crate::engine;
use crate::instructions::utils::Settlement;
use crate::state::*;

/// Returns every pending (not yet whitelisted) contribution to its sender.
pub fn cancel(ctx: Context<Cancel>) -> Result<()> {
    let effects = engine::cancel(&mut ctx.accounts.rico, &mut ctx.accounts.participant)?;
    let refunded = effects.lamports_paid();

    let settlement = Settlement {
        rico: ctx.accounts.rico.to_account_info(),
        counterparty: ctx.accounts.owner.to_account_info(),
        system_program: None,
        tokens: None,
    };
    settlement.flush(effects)?;

    emit!(crate::ContributionsCancelled {
        participant: ctx.accounts.owner.key(),
        amount: refunded,
        kind: TransferKind::ParticipantCancel,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Cancel<'info> {
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
}
