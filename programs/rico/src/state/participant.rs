use anchor_lang::prelude::*;
use solana_program::clock::Slot;

use crate::constants::MAX_STAGES;
use crate::errors::RicoError;
use crate::math::{add, mul_div_floor, sub};
use crate::unlock::UnlockWindow;

/// Counters kept once per stage and once in aggregate.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParticipantTotals {
    pub received_eth: u64,
    /// Received but not yet accepted or returned.
    pub pending_eth: u64,
    pub accepted_eth: u64,
    /// Returned by cancellation (participant or whitelist controller).
    pub returned_eth: u64,
    /// Refunded against returned tokens.
    pub withdrawn_eth: u64,
    pub pending_tokens: u64,
    pub awarded_tokens: u64,
    pub returned_tokens: u64,
    /// Accepted lamports still backing the reversible position.
    pub committed_eth: u64,
    /// Tokens the locked ratio applies to.
    pub lockable_tokens: u64,
}

impl ParticipantTotals {
    // 10 x u64
    pub const LEN: usize = 8 * 10;
}

#[account]
#[derive(Default)]
pub struct Participant {
    pub owner: Pubkey,
    pub whitelisted: bool,
    pub contributions_count: u32,
    pub totals: ParticipantTotals,
    /// Indexed by the stage the contribution was made in.
    pub stages: [ParticipantTotals; MAX_STAGES],
    pub bump: u8,
}

impl Participant {
    // owner(32) + whitelisted(1) + contributions_count(4) + totals + stages + bump(1)
    pub const LEN: usize = 32 + 1 + 4 + ParticipantTotals::LEN * (1 + MAX_STAGES) + 1;

    /// Applies `update` to one stage and to the aggregate, keeping them in step.
    fn apply<F>(&mut self, stage: u8, mut update: F) -> Result<()>
    where
        F: FnMut(&mut ParticipantTotals) -> Result<()>,
    {
        let entry = self
            .stages
            .get_mut(stage as usize)
            .ok_or_else(|| error!(RicoError::InvalidStage))?;
        update(entry)?;
        update(&mut self.totals)
    }

    pub fn has_pending(&self) -> bool {
        self.totals.pending_eth > 0
    }

    pub fn record_contribution(&mut self, stage: u8, eth: u64, tokens: u64, accepted: bool) -> Result<()> {
        self.apply(stage, |t| {
            t.received_eth = add(t.received_eth, eth)?;
            if accepted {
                t.accepted_eth = add(t.accepted_eth, eth)?;
                t.awarded_tokens = add(t.awarded_tokens, tokens)?;
                t.committed_eth = add(t.committed_eth, eth)?;
                t.lockable_tokens = add(t.lockable_tokens, tokens)?;
            } else {
                t.pending_eth = add(t.pending_eth, eth)?;
                t.pending_tokens = add(t.pending_tokens, tokens)?;
            }
            Ok(())
        })?;
        self.contributions_count = self
            .contributions_count
            .checked_add(1)
            .ok_or_else(|| error!(RicoError::MathOverflow))?;
        Ok(())
    }

    /// Moves every stage's pending amounts into accepted. Returns `(eth, tokens)` moved.
    pub fn accept_pending(&mut self) -> Result<(u64, u64)> {
        let (mut eth, mut tokens) = (0u64, 0u64);
        for stage in 0..MAX_STAGES {
            let ParticipantTotals { pending_eth, pending_tokens, .. } = self.stages[stage];
            if pending_eth == 0 && pending_tokens == 0 {
                continue;
            }
            self.apply(stage as u8, |t| {
                t.pending_eth = sub(t.pending_eth, pending_eth)?;
                t.accepted_eth = add(t.accepted_eth, pending_eth)?;
                t.committed_eth = add(t.committed_eth, pending_eth)?;
                t.pending_tokens = sub(t.pending_tokens, pending_tokens)?;
                t.awarded_tokens = add(t.awarded_tokens, pending_tokens)?;
                t.lockable_tokens = add(t.lockable_tokens, pending_tokens)?;
                Ok(())
            })?;
            eth = add(eth, pending_eth)?;
            tokens = add(tokens, pending_tokens)?;
        }
        Ok((eth, tokens))
    }

    /// Moves every stage's pending amounts into returned. Returns `(eth, tokens)` released.
    pub fn cancel_pending(&mut self) -> Result<(u64, u64)> {
        let (mut eth, mut tokens) = (0u64, 0u64);
        for stage in 0..MAX_STAGES {
            let ParticipantTotals { pending_eth, pending_tokens, .. } = self.stages[stage];
            if pending_eth == 0 && pending_tokens == 0 {
                continue;
            }
            self.apply(stage as u8, |t| {
                t.pending_eth = sub(t.pending_eth, pending_eth)?;
                t.returned_eth = add(t.returned_eth, pending_eth)?;
                t.pending_tokens = sub(t.pending_tokens, pending_tokens)?;
                Ok(())
            })?;
            eth = add(eth, pending_eth)?;
            tokens = add(tokens, pending_tokens)?;
        }
        Ok((eth, tokens))
    }

    /// Sum of each stage's locked share, so it always matches what
    /// `plan_withdrawal` can take.
    pub fn locked_tokens(&self, window: &UnlockWindow, slot: Slot, precision: u8) -> Result<u64> {
        self.stages.iter().try_fold(0u64, |locked, entry| {
            add(locked, window.locked_amount(slot, precision, entry.lockable_tokens)?)
        })
    }

    /// Prices a token return of up to `amount` tokens.
    ///
    /// Tokens are taken from the latest stage first, and each stage's slice
    /// is refunded at that stage's own price. At most the locked share of
    /// each stage is taken; whatever is left of `amount` stays with the
    /// participant.
    pub fn plan_withdrawal(
        &self,
        amount: u64,
        window: &UnlockWindow,
        slot: Slot,
        precision: u8,
    ) -> Result<WithdrawalPlan> {
        let mut plan = WithdrawalPlan::default();
        let mut remaining = amount;
        for stage in (0..MAX_STAGES).rev() {
            if remaining == 0 {
                break;
            }
            let entry = &self.stages[stage];
            let locked = window.locked_amount(slot, precision, entry.lockable_tokens)?;
            if locked == 0 {
                continue;
            }
            let slice = release(entry, remaining.min(locked), locked)?;
            remaining = sub(remaining, slice.tokens)?;
            plan.total = plan.total.merge(&slice)?;
            plan.stages[stage] = slice;
        }
        require!(plan.total.tokens > 0, RicoError::NoLockedTokens);
        Ok(plan)
    }

    /// Books each slice against the stage it was bought in.
    pub fn record_withdrawal(&mut self, plan: &WithdrawalPlan) -> Result<()> {
        for (stage, slice) in plan.stages.iter().enumerate() {
            if slice.tokens == 0 {
                continue;
            }
            self.apply(stage as u8, |t| {
                t.withdrawn_eth = add(t.withdrawn_eth, slice.refund)?;
                t.returned_tokens = add(t.returned_tokens, slice.tokens)?;
                t.committed_eth = sub(t.committed_eth, slice.base_eth)?;
                t.lockable_tokens = sub(t.lockable_tokens, slice.base_tokens)?;
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Sum of every stage entry, for checking against `totals`.
    #[cfg(test)]
    pub fn stage_sum(&self) -> Result<ParticipantTotals> {
        self.stages.iter().try_fold(ParticipantTotals::default(), |acc, t| {
            Ok(ParticipantTotals {
                received_eth: add(acc.received_eth, t.received_eth)?,
                pending_eth: add(acc.pending_eth, t.pending_eth)?,
                accepted_eth: add(acc.accepted_eth, t.accepted_eth)?,
                returned_eth: add(acc.returned_eth, t.returned_eth)?,
                withdrawn_eth: add(acc.withdrawn_eth, t.withdrawn_eth)?,
                pending_tokens: add(acc.pending_tokens, t.pending_tokens)?,
                awarded_tokens: add(acc.awarded_tokens, t.awarded_tokens)?,
                returned_tokens: add(acc.returned_tokens, t.returned_tokens)?,
                committed_eth: add(acc.committed_eth, t.committed_eth)?,
                lockable_tokens: add(acc.lockable_tokens, t.lockable_tokens)?,
            })
        })
    }
}

/// Takes `tokens` of the `locked` tokens of one stage's position.
///
/// The refund is `tokens * committed / lockable`, which is the stage price up
/// to flooring. The same fraction (`tokens / locked`) of the stage's position
/// is released; its unlocked part stays with the participant as tokens and
/// with the project as lamports.
fn release(entry: &ParticipantTotals, tokens: u64, locked: u64) -> Result<Withdrawal> {
    let refund = if tokens == entry.lockable_tokens {
        entry.committed_eth
    } else {
        mul_div_floor(tokens, entry.committed_eth as u128, entry.lockable_tokens as u128)?
    };
    let (base_tokens, base_eth) = if tokens == locked {
        (entry.lockable_tokens, entry.committed_eth)
    } else {
        (
            mul_div_floor(entry.lockable_tokens, tokens as u128, locked as u128)?,
            mul_div_floor(entry.committed_eth, tokens as u128, locked as u128)?,
        )
    };
    Ok(Withdrawal { tokens, base_tokens, base_eth, refund })
}

/// Outcome of pricing a token return, for one stage or in total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Withdrawal {
    /// Tokens taken back into the vault.
    pub tokens: u64,
    /// Lockable tokens released from the position (`>= tokens`).
    pub base_tokens: u64,
    /// Committed lamports released from the position (`>= refund`).
    pub base_eth: u64,
    /// Lamports paid back to the participant.
    pub refund: u64,
}

impl Withdrawal {
    fn merge(&self, other: &Withdrawal) -> Result<Withdrawal> {
        Ok(Withdrawal {
            tokens: add(self.tokens, other.tokens)?,
            base_tokens: add(self.base_tokens, other.base_tokens)?,
            base_eth: add(self.base_eth, other.base_eth)?,
            refund: add(self.refund, other.refund)?,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WithdrawalPlan {
    pub total: Withdrawal,
    pub stages: [Withdrawal; MAX_STAGES],
}
