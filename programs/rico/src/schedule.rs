//! Stage schedule: contiguous slot ranges, each with a fixed token price.
//!
//! Stage 0 is the commit phase. Stages 1..=N make up the distribution (buy)
//! phase, over which locked tokens and funds are released.

use anchor_lang::prelude::*;
use solana_program::clock::Slot;

use crate::constants::MAX_STAGES;
use crate::errors::RicoError;
use crate::math::{mul_div_floor, pow10};
use crate::unlock::UnlockWindow;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stage {
    pub index: u8,
    pub start_slot: Slot,
    /// Inclusive.
    pub end_slot: Slot,
    /// Lamports per whole token.
    pub token_price: u64,
}

impl Stage {
    // index(1) + start_slot(8) + end_slot(8) + token_price(8)
    pub const LEN: usize = 1 + 8 + 8 + 8;

    pub fn contains(&self, slot: Slot) -> bool {
        self.start_slot <= slot && slot <= self.end_slot
    }
}

/// Parameters the schedule is derived from, taken verbatim from `init`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleParams {
    pub start_slot: Slot,
    pub commit_phase_slot_count: u64,
    pub commit_phase_price: u64,
    pub stage_count: u8,
    pub stage_slot_count: u64,
    pub stage_price_increase: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageSchedule {
    /// Number of used entries in `stages`, commit stage included.
    pub count: u8,
    pub stages: [Stage; MAX_STAGES],
}

impl StageSchedule {
    // count(1) + stages
    pub const LEN: usize = 1 + Stage::LEN * MAX_STAGES;

    pub fn build(params: &ScheduleParams) -> Result<Self> {
        require!(params.commit_phase_slot_count > 0, RicoError::ConfigError);
        require!(params.commit_phase_price > 0, RicoError::ConfigError);
        require!(params.stage_count > 0, RicoError::ConfigError);
        require!(params.stage_slot_count > 0, RicoError::ConfigError);
        require!(
            (params.stage_count as usize) < MAX_STAGES,
            RicoError::ConfigError
        );

        let mut schedule = StageSchedule {
            count: params.stage_count + 1,
            ..Default::default()
        };

        let commit_end = params
            .start_slot
            .checked_add(params.commit_phase_slot_count - 1)
            .ok_or_else(|| error!(RicoError::ConfigError))?;
        schedule.stages[0] = Stage {
            index: 0,
            start_slot: params.start_slot,
            end_slot: commit_end,
            token_price: params.commit_phase_price,
        };

        for i in 1..=params.stage_count {
            let previous = schedule.stages[i as usize - 1];
            let start_slot = previous
                .end_slot
                .checked_add(1)
                .ok_or_else(|| error!(RicoError::ConfigError))?;
            let end_slot = start_slot
                .checked_add(params.stage_slot_count - 1)
                .ok_or_else(|| error!(RicoError::ConfigError))?;
            let token_price = previous
                .token_price
                .checked_add(params.stage_price_increase)
                .ok_or_else(|| error!(RicoError::ConfigError))?;
            schedule.stages[i as usize] = Stage {
                index: i,
                start_slot,
                end_slot,
                token_price,
            };
        }

        Ok(schedule)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages[..self.count as usize]
    }

    pub fn stage(&self, index: u8) -> Result<&Stage> {
        self.stages()
            .get(index as usize)
            .ok_or_else(|| error!(RicoError::InvalidStage))
    }

    /// Stage containing `slot`; both range ends are inclusive.
    pub fn stage_at(&self, slot: Slot) -> Option<u8> {
        self.stages()
            .iter()
            .find(|stage| stage.contains(slot))
            .map(|stage| stage.index)
    }

    /// 0 outside the schedule.
    pub fn price_at(&self, slot: Slot) -> u64 {
        self.stage_at(slot)
            .map(|index| self.stages[index as usize].token_price)
            .unwrap_or(0)
    }

    /// `eth * 10^decimals / price`, rounded down. The shortfall from flooring
    /// stays with the sale, never with the participant.
    pub fn tokens_for_eth_at_stage(&self, eth: u64, stage: u8, decimals: u8) -> Result<u64> {
        let price = self.stage(stage)?.token_price;
        mul_div_floor(eth, pow10(decimals)?, price as u128)
    }

    pub fn start_slot(&self) -> Slot {
        self.stages[0].start_slot
    }

    pub fn end_slot(&self) -> Slot {
        self.stages[self.count.saturating_sub(1) as usize].end_slot
    }

    pub fn unlock_window(&self) -> UnlockWindow {
        UnlockWindow {
            start_slot: self.stages[1].start_slot,
            end_slot: self.end_slot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ScheduleParams {
        ScheduleParams {
            start_slot: 1_000,
            commit_phase_slot_count: 100,
            commit_phase_price: 2_000_000,
            stage_count: 7,
            stage_slot_count: 143,
            stage_price_increase: 100_000,
        }
    }

    #[test]
    fn stages_are_contiguous_and_priced_upwards() {
        let schedule = StageSchedule::build(&params()).unwrap();
        assert_eq!(schedule.stages().len(), 8);
        assert_eq!(schedule.stages[0].start_slot, 1_000);
        assert_eq!(schedule.stages[0].end_slot, 1_099);
        for pair in schedule.stages().windows(2) {
            assert_eq!(pair[0].end_slot + 1, pair[1].start_slot);
            assert!(pair[0].token_price < pair[1].token_price);
        }
        assert_eq!(schedule.stages[7].token_price, 2_700_000);
        assert_eq!(schedule.end_slot(), 2_100);
        assert_eq!(
            schedule.unlock_window(),
            UnlockWindow { start_slot: 1_100, end_slot: 2_100 }
        );
    }

    #[test]
    fn stage_lookup_is_inclusive_on_both_ends() {
        let schedule = StageSchedule::build(&params()).unwrap();
        assert_eq!(schedule.stage_at(999), None);
        assert_eq!(schedule.stage_at(1_000), Some(0));
        assert_eq!(schedule.stage_at(1_099), Some(0));
        assert_eq!(schedule.stage_at(1_100), Some(1));
        assert_eq!(schedule.stage_at(1_242), Some(1));
        assert_eq!(schedule.stage_at(1_243), Some(2));
        assert_eq!(schedule.stage_at(2_100), Some(7));
        assert_eq!(schedule.stage_at(2_101), None);
    }

    #[test]
    fn price_is_zero_outside_the_schedule() {
        let schedule = StageSchedule::build(&params()).unwrap();
        assert_eq!(schedule.price_at(999), 0);
        assert_eq!(schedule.price_at(1_050), 2_000_000);
        assert_eq!(schedule.price_at(1_243), 2_200_000);
        assert_eq!(schedule.price_at(2_101), 0);
    }

    #[test]
    fn token_amount_is_floored() {
        let schedule = StageSchedule::build(&params()).unwrap();
        // 1 SOL at 0.002 SOL per token, 9 decimals.
        assert_eq!(
            schedule.tokens_for_eth_at_stage(1_000_000_000, 0, 9).unwrap(),
            500 * 1_000_000_000
        );
        // 1 SOL at 0.0021: 476.190476190476... tokens.
        assert_eq!(
            schedule.tokens_for_eth_at_stage(1_000_000_000, 1, 9).unwrap(),
            476_190_476_190
        );
        assert!(schedule.tokens_for_eth_at_stage(1, 8, 9).is_err());
    }

    #[test]
    fn zero_counts_and_prices_are_rejected() {
        let mut bad = params();
        bad.commit_phase_price = 0;
        assert!(StageSchedule::build(&bad).is_err());

        let mut bad = params();
        bad.stage_count = 0;
        assert!(StageSchedule::build(&bad).is_err());

        let mut bad = params();
        bad.stage_slot_count = 0;
        assert!(StageSchedule::build(&bad).is_err());

        let mut bad = params();
        bad.commit_phase_slot_count = 0;
        assert!(StageSchedule::build(&bad).is_err());

        let mut bad = params();
        bad.stage_count = MAX_STAGES as u8;
        assert!(StageSchedule::build(&bad).is_err());
    }

    #[test]
    fn overflowing_ranges_are_rejected() {
        let mut bad = params();
        bad.start_slot = u64::MAX - 50;
        assert!(StageSchedule::build(&bad).is_err());

        let mut bad = params();
        bad.stage_price_increase = u64::MAX;
        assert!(StageSchedule::build(&bad).is_err());
    }
}
