//! Transfers produced by a state transition.
//!
//! Engine operations never move funds themselves. They mutate the ledgers and
//! queue what has to move; instructions flush the queue afterwards, so every
//! ledger write is committed before any outbound transfer runs.

use anchor_lang::prelude::*;

/// Why lamports leave the sale.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferKind {
    ParticipantCancel,
    WhitelistReject,
    ParticipantWithdraw,
    ProjectWithdraw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Lamports pulled from a participant into the sale account.
    CollectLamports { from: Pubkey, amount: u64 },
    /// Tokens pulled from a participant back into the vault.
    CollectTokens { from: Pubkey, amount: u64 },
    /// Tokens sent from the vault to a participant.
    AwardTokens { to: Pubkey, amount: u64 },
    /// Lamports sent from the sale account.
    PayLamports { to: Pubkey, amount: u64, kind: TransferKind },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Effects(Vec<Effect>);

impl Effects {
    pub fn push(&mut self, effect: Effect) {
        self.0.push(effect);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lamports_paid(&self) -> u64 {
        self.iter()
            .map(|effect| match effect {
                Effect::PayLamports { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }

    pub fn tokens_awarded(&self) -> u64 {
        self.iter()
            .map(|effect| match effect {
                Effect::AwardTokens { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }

    pub fn tokens_collected(&self) -> u64 {
        self.iter()
            .map(|effect| match effect {
                Effect::CollectTokens { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }
}

impl IntoIterator for Effects {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
