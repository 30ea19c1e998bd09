//! Contribution lifecycle: PENDING -> {ACCEPTED, RETURNED}, ACCEPTED -> WITHDRAWN.
//!
//! Every operation takes the slot the instruction sampled, updates the
//! participant and global ledgers, and returns the transfers to perform.

use anchor_lang::prelude::*;
use solana_program::clock::Slot;

use crate::effects::{Effect, Effects, TransferKind};
use crate::errors::RicoError;
use crate::state::{Participant, Rico};

/// Whitelist controller's verdict on a participant.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhitelistDecision {
    Accept,
    Cancel,
}

impl TryFrom<u8> for WhitelistDecision {
    type Error = anchor_lang::error::Error;

    fn try_from(mode: u8) -> Result<Self> {
        match mode {
            0 => Ok(WhitelistDecision::Accept),
            1 => Ok(WhitelistDecision::Cancel),
            _ => err!(RicoError::InvalidMode),
        }
    }
}

/// Which cancel paths are open to a participant right now.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CancelModes {
    /// Pending lamports can be reclaimed with `cancel` or a dust commit.
    pub by_eth: bool,
    /// Locked tokens can be returned for a refund.
    pub by_tokens: bool,
}

pub fn commit(rico: &mut Rico, participant: &mut Participant, value: u64, slot: Slot) -> Result<Effects> {
    rico.ensure_initialized()?;
    require!(value > 0, RicoError::ZeroAmount);

    if !participant.whitelisted && value < rico.min_contribution {
        msg!("Commit of {} below minimum contribution, cancelling pending", value);
        return cancel_pending(rico, participant, TransferKind::ParticipantCancel);
    }

    let stage = rico.schedule.stage_at(slot).ok_or(RicoError::OutOfPhase)?;
    let tokens = rico
        .schedule
        .tokens_for_eth_at_stage(value, stage, rico.token_decimals)?;
    require!(tokens > 0, RicoError::ZeroTokenAmount);
    require!(
        tokens <= rico.ledger.token_supply,
        RicoError::InsufficientTokenSupply
    );

    let accepted = participant.whitelisted;
    participant.record_contribution(stage, value, tokens, accepted)?;

    let mut effects = Effects::default();
    effects.push(Effect::CollectLamports { from: participant.owner, amount: value });
    if accepted {
        rico.ledger.record_accepted(value, tokens)?;
        effects.push(Effect::AwardTokens { to: participant.owner, amount: tokens });
    } else {
        rico.ledger.record_pending(value, tokens)?;
    }
    rico.ledger.ensure_balanced()?;
    Ok(effects)
}

pub fn cancel(rico: &mut Rico, participant: &mut Participant) -> Result<Effects> {
    rico.ensure_initialized()?;
    cancel_pending(rico, participant, TransferKind::ParticipantCancel)
}

pub fn resolve_whitelist(
    rico: &mut Rico,
    participant: &mut Participant,
    caller: Pubkey,
    decision: WhitelistDecision,
) -> Result<Effects> {
    rico.ensure_initialized()?;
    require_keys_eq!(caller, rico.whitelist_controller, RicoError::Unauthorized);

    match decision {
        WhitelistDecision::Accept => {
            participant.whitelisted = true;
            let (eth, tokens) = participant.accept_pending()?;
            let mut effects = Effects::default();
            if tokens > 0 {
                rico.ledger.accept_pending(eth, tokens)?;
                effects.push(Effect::AwardTokens { to: participant.owner, amount: tokens });
            }
            rico.ledger.ensure_balanced()?;
            Ok(effects)
        }
        WhitelistDecision::Cancel => {
            participant.whitelisted = false;
            if !participant.has_pending() {
                return Ok(Effects::default());
            }
            cancel_pending(rico, participant, TransferKind::WhitelistReject)
        }
    }
}

fn cancel_pending(rico: &mut Rico, participant: &mut Participant, kind: TransferKind) -> Result<Effects> {
    require!(participant.has_pending(), RicoError::NothingToCancel);
    let (eth, tokens) = participant.cancel_pending()?;
    rico.ledger.cancel_pending(eth, tokens)?;
    rico.ledger.ensure_balanced()?;

    let mut effects = Effects::default();
    effects.push(Effect::PayLamports { to: participant.owner, amount: eth, kind });
    Ok(effects)
}

/// Handles tokens sent back by a participant. At most the currently locked
/// amount is taken; the rest stays with the participant. Each stage's slice
/// is refunded at the price it was bought at, latest stage first.
pub fn return_tokens(rico: &mut Rico, participant: &mut Participant, amount: u64, slot: Slot) -> Result<Effects> {
    rico.ensure_initialized()?;
    require!(amount > 0, RicoError::ZeroAmount);

    let plan = participant.plan_withdrawal(amount, &rico.unlock_window(), slot, rico.ratio_precision)?;
    let withdrawal = plan.total;
    if withdrawal.tokens < amount {
        msg!("Token return capped at {} locked tokens", withdrawal.tokens);
    }
    participant.record_withdrawal(&plan)?;
    rico.ledger.record_withdrawal(&withdrawal)?;
    rico.ledger.ensure_balanced()?;

    let mut effects = Effects::default();
    effects.push(Effect::CollectTokens { from: participant.owner, amount: withdrawal.tokens });
    if withdrawal.refund > 0 {
        effects.push(Effect::PayLamports {
            to: participant.owner,
            amount: withdrawal.refund,
            kind: TransferKind::ParticipantWithdraw,
        });
    }
    Ok(effects)
}

pub fn project_withdraw(rico: &mut Rico, caller: Pubkey, amount: u64, slot: Slot) -> Result<Effects> {
    rico.ensure_initialized()?;
    require_keys_eq!(caller, rico.project_wallet, RicoError::Unauthorized);
    require!(amount > 0, RicoError::ZeroAmount);
    require!(
        amount <= rico.available_project_eth(slot)?,
        RicoError::InsufficientUnlocked
    );

    rico.ledger.record_project_withdrawal(amount)?;
    rico.ledger.ensure_balanced()?;

    let mut effects = Effects::default();
    effects.push(Effect::PayLamports {
        to: rico.project_wallet,
        amount,
        kind: TransferKind::ProjectWithdraw,
    });
    Ok(effects)
}

pub fn cancel_modes(rico: &Rico, participant: &Participant, slot: Slot) -> Result<CancelModes> {
    let locked = participant.locked_tokens(&rico.unlock_window(), slot, rico.ratio_precision)?;
    Ok(CancelModes {
        by_eth: !participant.whitelisted && participant.has_pending(),
        by_tokens: locked > 0,
    })
}
