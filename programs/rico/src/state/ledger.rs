use anchor_lang::prelude::*;
use solana_program::clock::Slot;

use crate::errors::RicoError;
use crate::math::{add, sub};
use crate::state::participant::Withdrawal;
use crate::unlock::UnlockWindow;

/// Sale-wide aggregates. Amounts are lamports unless named `token*`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobalLedger {
    /// Every lamport ever accepted by `commit`.
    pub total_received_eth: u64,
    /// Sent back to participants, cancellations and withdrawals together.
    pub returned_eth: u64,
    /// The token-return subset of `returned_eth`.
    pub withdrawn_eth: u64,
    /// `total_received_eth - returned_eth`.
    pub committed_eth: u64,
    /// Received from non-whitelisted participants, not yet resolved.
    pub pending_eth: u64,
    /// Accepted funds still backing reversible (lockable) positions.
    pub contributors_eth: u64,
    /// Funds that can no longer be reclaimed by participants.
    pub project_eth: u64,
    pub project_withdrawn_eth: u64,
    /// Unsold tokens in the vault.
    pub token_supply: u64,
    /// Tokens held back for pending contributions.
    pub tokens_reserved: u64,
    /// Tokens out with participants under the reversible scheme.
    pub tokens_awarded: u64,
}

impl GlobalLedger {
    // 11 x u64
    pub const LEN: usize = 8 * 11;

    pub fn record_deposit(&mut self, tokens: u64) -> Result<()> {
        self.token_supply = add(self.token_supply, tokens)?;
        Ok(())
    }

    pub fn record_pending(&mut self, eth: u64, tokens: u64) -> Result<()> {
        self.total_received_eth = add(self.total_received_eth, eth)?;
        self.committed_eth = add(self.committed_eth, eth)?;
        self.pending_eth = add(self.pending_eth, eth)?;
        self.token_supply = sub(self.token_supply, tokens)?;
        self.tokens_reserved = add(self.tokens_reserved, tokens)?;
        Ok(())
    }

    pub fn record_accepted(&mut self, eth: u64, tokens: u64) -> Result<()> {
        self.total_received_eth = add(self.total_received_eth, eth)?;
        self.committed_eth = add(self.committed_eth, eth)?;
        self.contributors_eth = add(self.contributors_eth, eth)?;
        self.token_supply = sub(self.token_supply, tokens)?;
        self.tokens_awarded = add(self.tokens_awarded, tokens)?;
        Ok(())
    }

    pub fn accept_pending(&mut self, eth: u64, tokens: u64) -> Result<()> {
        self.pending_eth = sub(self.pending_eth, eth)?;
        self.contributors_eth = add(self.contributors_eth, eth)?;
        self.tokens_reserved = sub(self.tokens_reserved, tokens)?;
        self.tokens_awarded = add(self.tokens_awarded, tokens)?;
        Ok(())
    }

    pub fn cancel_pending(&mut self, eth: u64, tokens: u64) -> Result<()> {
        self.pending_eth = sub(self.pending_eth, eth)?;
        self.committed_eth = sub(self.committed_eth, eth)?;
        self.returned_eth = add(self.returned_eth, eth)?;
        self.tokens_reserved = sub(self.tokens_reserved, tokens)?;
        self.token_supply = add(self.token_supply, tokens)?;
        Ok(())
    }

    /// The unlocked part of the released base (`base_eth - refund`) becomes
    /// project funds for good.
    pub fn record_withdrawal(&mut self, withdrawal: &Withdrawal) -> Result<()> {
        let to_project = sub(withdrawal.base_eth, withdrawal.refund)?;
        self.contributors_eth = sub(self.contributors_eth, withdrawal.base_eth)?;
        self.project_eth = add(self.project_eth, to_project)?;
        self.committed_eth = sub(self.committed_eth, withdrawal.refund)?;
        self.returned_eth = add(self.returned_eth, withdrawal.refund)?;
        self.withdrawn_eth = add(self.withdrawn_eth, withdrawal.refund)?;
        self.tokens_awarded = sub(self.tokens_awarded, withdrawal.base_tokens)?;
        self.token_supply = add(self.token_supply, withdrawal.tokens)?;
        Ok(())
    }

    /// Unlocked share of the reversible base plus irrevocable project funds,
    /// minus what the project already took. Floored at zero.
    pub fn available_project_eth(
        &self,
        window: &UnlockWindow,
        slot: Slot,
        precision: u8,
    ) -> Result<u64> {
        let locked = window.locked_amount(slot, precision, self.contributors_eth)?;
        let unlocked = add(sub(self.contributors_eth, locked)?, self.project_eth)?;
        Ok(unlocked.saturating_sub(self.project_withdrawn_eth))
    }

    pub fn record_project_withdrawal(&mut self, amount: u64) -> Result<()> {
        self.project_withdrawn_eth = add(self.project_withdrawn_eth, amount)?;
        Ok(())
    }

    /// Lamports the sale account should be holding for participants and project.
    #[cfg(test)]
    pub fn held_eth(&self) -> u64 {
        self.committed_eth.saturating_sub(self.project_withdrawn_eth)
    }

    pub fn ensure_balanced(&self) -> Result<()> {
        require!(self.is_balanced(), RicoError::LedgerImbalance);
        Ok(())
    }

    pub fn is_balanced(&self) -> bool {
        let conserved = self.total_received_eth.checked_sub(self.returned_eth)
            == Some(self.committed_eth);
        let split = self
            .pending_eth
            .checked_add(self.contributors_eth)
            .and_then(|sum| sum.checked_add(self.project_eth))
            == Some(self.committed_eth);
        let withdrawn_subset = self.withdrawn_eth <= self.returned_eth;
        conserved && split && withdrawn_subset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL: u64 = 1_000_000_000;

    fn window() -> UnlockWindow {
        UnlockWindow { start_slot: 1_100, end_slot: 2_100 }
    }

    #[test]
    fn pending_then_cancel_returns_everything() {
        let mut ledger = GlobalLedger { token_supply: 1_000, ..Default::default() };
        ledger.record_pending(2 * SOL, 100).unwrap();
        assert!(ledger.is_balanced());
        ledger.cancel_pending(2 * SOL, 100).unwrap();
        assert!(ledger.is_balanced());
        assert_eq!(ledger.committed_eth, 0);
        assert_eq!(ledger.returned_eth, 2 * SOL);
        assert_eq!(ledger.token_supply, 1_000);
        assert_eq!(ledger.tokens_reserved, 0);
    }

    #[test]
    fn cannot_cancel_more_than_pending() {
        let mut ledger = GlobalLedger { token_supply: 1_000, ..Default::default() };
        ledger.record_pending(SOL, 10).unwrap();
        assert!(ledger.cancel_pending(2 * SOL, 10).is_err());
    }

    #[test]
    fn pending_funds_are_not_available_to_the_project() {
        let mut ledger = GlobalLedger { token_supply: 1_000, ..Default::default() };
        ledger.record_pending(100 * SOL, 10).unwrap();
        assert_eq!(ledger.available_project_eth(&window(), 2_100, 9).unwrap(), 0);
        ledger.accept_pending(100 * SOL, 10).unwrap();
        assert_eq!(ledger.available_project_eth(&window(), 2_100, 9).unwrap(), 100 * SOL);
        assert!(ledger.is_balanced());
    }

    #[test]
    fn imbalance_is_an_error() {
        let mut ledger = GlobalLedger { token_supply: 1_000, ..Default::default() };
        ledger.record_accepted(SOL, 10).unwrap();
        assert!(ledger.ensure_balanced().is_ok());
        ledger.project_eth = 1;
        assert_eq!(
            ledger.ensure_balanced().unwrap_err(),
            error!(RicoError::LedgerImbalance)
        );
    }

    #[test]
    fn availability_floors_at_zero() {
        let ledger = GlobalLedger {
            total_received_eth: 10,
            committed_eth: 10,
            contributors_eth: 10,
            project_withdrawn_eth: 20,
            ..Default::default()
        };
        assert_eq!(ledger.available_project_eth(&window(), 2_100, 9).unwrap(), 0);
    }
}
