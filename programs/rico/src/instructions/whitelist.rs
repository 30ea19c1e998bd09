use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::effects::TransferKind;
use crate::engine::{self, WhitelistDecision};
use crate::errors::RicoError;
use crate::instructions::utils::{Settlement, TokenRoute};
use crate::state::*;

/// Whitelist controller's decision on a participant.
///
/// `decision` is `0` to accept or `1` to cancel. Accepting awards the tokens
/// of every pending contribution; cancelling refunds them. Repeating a
/// decision on a participant with nothing pending changes nothing.
///
/// A wallet can be accepted before its first commit; the controller then pays
/// for its participant account. The participant token account is only needed
/// when an acceptance has pending tokens to award, and `commit` has created
/// it by then.
pub fn whitelist(ctx: Context<Whitelist>, decision: u8) -> Result<()> {
    let decision = WhitelistDecision::try_from(decision)?;
    let controller = ctx.accounts.controller.key();
    let owner = ctx.accounts.participant_wallet.key();

    let participant = &mut ctx.accounts.participant;
    if participant.owner == Pubkey::default() {
        participant.owner = owner;
        participant.bump = ctx.bumps.participant;
    }
    let pending = participant.totals.pending_eth;

    let effects = engine::resolve_whitelist(&mut ctx.accounts.rico, participant, controller, decision)?;
    let awarded = effects.tokens_awarded();
    let refunded = effects.lamports_paid();

    ctx.accounts.settlement().flush(effects)?;

    match decision {
        WhitelistDecision::Accept if awarded > 0 => emit!(crate::ContributionsAccepted {
            participant: owner,
            amount: pending,
            tokens: awarded,
        }),
        WhitelistDecision::Cancel if refunded > 0 => emit!(crate::ContributionsCancelled {
            participant: owner,
            amount: refunded,
            kind: TransferKind::WhitelistReject,
        }),
        _ => msg!("No pending contributions for {}", owner),
    }

    Ok(())
}

#[derive(Accounts)]
pub struct Whitelist<'info> {
    #[account(mut, seeds = [SEED_RICO], bump = rico.bump)]
    pub rico: Box<Account<'info, Rico>>,
    #[account(mut)]
    pub controller: Signer<'info>,
    /// CHECK: only its key is used, to derive the participant account and to receive refunds
    #[account(mut)]
    pub participant_wallet: UncheckedAccount<'info>,
    #[account(
        init_if_needed,
        payer = controller,
        space = 8 + Participant::LEN,
        seeds = [SEED_PARTICIPANT, participant_wallet.key().as_ref()],
        bump
    )]
    pub participant: Box<Account<'info, Participant>>,
    #[account(address = rico.token_mint @ RicoError::InvalidRecipient)]
    pub token_mint: Box<Account<'info, Mint>>,
    #[account(mut, seeds = [SEED_VAULT, rico.key().as_ref()], bump = rico.vault_bump)]
    pub token_vault: Box<Account<'info, TokenAccount>>,
    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = participant_wallet,
    )]
    pub participant_token_account: Option<Account<'info, TokenAccount>>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> Whitelist<'info> {
    fn settlement(&self) -> Settlement<'info> {
        Settlement {
            rico: self.rico.to_account_info(),
            counterparty: self.participant_wallet.to_account_info(),
            system_program: None,
            tokens: self.participant_token_account.as_ref().map(|holder| TokenRoute {
                vault: self.token_vault.to_account_info(),
                vault_bump: self.rico.vault_bump,
                holder: holder.to_account_info(),
                token_program: self.token_program.to_account_info(),
            }),
        }
    }
}
