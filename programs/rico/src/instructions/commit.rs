use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::effects::TransferKind;
use crate::engine;
use crate::errors::RicoError;
use crate::instructions::utils::{Settlement, TokenRoute};
use crate::state::*;

pub fn commit(ctx: Context<Commit>, amount: u64) -> Result<()> {
    let slot = Clock::get()?.slot;
    let owner = ctx.accounts.owner.key();

    let participant = &mut ctx.accounts.participant;
    if participant.owner == Pubkey::default() {
        // First contribution from this wallet
        participant.owner = owner;
        participant.bump = ctx.bumps.participant;
    }

    let effects = engine::commit(&mut ctx.accounts.rico, participant, amount, slot)?;
    let refunded = effects.lamports_paid();
    let awarded = effects.tokens_awarded();
    let whitelisted = participant.whitelisted;

    ctx.accounts.settlement().flush(effects)?;

    if refunded > 0 {
        emit!(crate::ContributionsCancelled {
            participant: owner,
            amount: refunded,
            kind: TransferKind::ParticipantCancel,
        });
    } else {
        emit!(crate::ContributionReceived {
            participant: owner,
            amount,
            slot,
            accepted: whitelisted,
            tokens_awarded: awarded,
        });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct Commit<'info> {
    #[account(mut, seeds = [SEED_RICO], bump = rico.bump)]
    pub rico: Box<Account<'info, Rico>>,
    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + Participant::LEN,
        seeds = [SEED_PARTICIPANT, owner.key().as_ref()],
        bump
    )]
    pub participant: Box<Account<'info, Participant>>,
    #[account(mut)]
    pub owner: Signer<'info>,
    #[account(address = rico.token_mint @ RicoError::InvalidRecipient)]
    pub token_mint: Box<Account<'info, Mint>>,
    #[account(mut, seeds = [SEED_VAULT, rico.key().as_ref()], bump = rico.vault_bump)]
    pub token_vault: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = token_mint,
        associated_token::authority = owner,
    )]
    pub owner_token_account: Box<Account<'info, TokenAccount>>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Commit<'info> {
    fn settlement(&self) -> Settlement<'info> {
        Settlement {
            rico: self.rico.to_account_info(),
            counterparty: self.owner.to_account_info(),
            system_program: Some(self.system_program.to_account_info()),
            tokens: Some(TokenRoute {
                vault: self.token_vault.to_account_info(),
                vault_bump: self.rico.vault_bump,
                holder: self.owner_token_account.to_account_info(),
                token_program: self.token_program.to_account_info(),
            }),
        }
    }
}
