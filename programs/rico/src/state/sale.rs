use anchor_lang::prelude::*;
use solana_program::clock::Slot;

use crate::constants::MAX_RATIO_PRECISION;
use crate::errors::RicoError;
use crate::schedule::{ScheduleParams, StageSchedule};
use crate::state::ledger::GlobalLedger;
use crate::unlock::UnlockWindow;

/// Settings supplied once through `init`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitParams {
    /// Signs whitelist decisions.
    pub whitelist_controller: Pubkey,
    /// Receives project withdrawals and funds the token vault.
    pub project_wallet: Pubkey,
    pub start_slot: Slot,
    pub commit_phase_slot_count: u64,
    /// Lamports per whole token during the commit phase.
    pub commit_phase_price: u64,
    pub stage_count: u8,
    pub stage_slot_count: u64,
    pub stage_price_increase: u64,
    /// Non-whitelisted commits below this are treated as a cancel request.
    pub min_contribution: u64,
    /// Decimal digits of the locked ratio.
    pub ratio_precision: u8,
}

impl InitParams {
    pub fn schedule_params(&self) -> ScheduleParams {
        ScheduleParams {
            start_slot: self.start_slot,
            commit_phase_slot_count: self.commit_phase_slot_count,
            commit_phase_price: self.commit_phase_price,
            stage_count: self.stage_count,
            stage_slot_count: self.stage_slot_count,
            stage_price_increase: self.stage_price_increase,
        }
    }
}

/// The sale. Holds the committed lamports; tokens sit in the vault PDA.
#[account]
#[derive(Default)]
pub struct Rico {
    pub deployer: Pubkey,
    pub initialized: bool,
    pub token_mint: Pubkey,
    pub whitelist_controller: Pubkey,
    pub project_wallet: Pubkey,
    pub token_decimals: u8,
    pub ratio_precision: u8,
    pub min_contribution: u64,
    pub schedule: StageSchedule,
    pub ledger: GlobalLedger,
    pub bump: u8,
    pub vault_bump: u8,
}

impl Rico {
    // deployer(32) + initialized(1) + token_mint(32) + whitelist_controller(32)
    // + project_wallet(32) + token_decimals(1) + ratio_precision(1)
    // + min_contribution(8) + schedule + ledger + bump(1) + vault_bump(1)
    pub const LEN: usize =
        32 + 1 + 32 + 32 + 32 + 1 + 1 + 8 + StageSchedule::LEN + GlobalLedger::LEN + 1 + 1;

    pub fn configure(
        &mut self,
        caller: Pubkey,
        params: &InitParams,
        token_mint: Pubkey,
        token_decimals: u8,
        vault_bump: u8,
    ) -> Result<()> {
        require_keys_eq!(caller, self.deployer, RicoError::Unauthorized);
        require!(!self.initialized, RicoError::AlreadyInitialized);
        require_keys_neq!(params.whitelist_controller, Pubkey::default(), RicoError::ConfigError);
        require_keys_neq!(params.project_wallet, Pubkey::default(), RicoError::ConfigError);
        require!(
            params.ratio_precision > 0 && params.ratio_precision <= MAX_RATIO_PRECISION,
            RicoError::ConfigError
        );
        require!(token_decimals <= MAX_RATIO_PRECISION, RicoError::ConfigError);

        self.schedule = StageSchedule::build(&params.schedule_params())?;
        self.token_mint = token_mint;
        self.token_decimals = token_decimals;
        self.whitelist_controller = params.whitelist_controller;
        self.project_wallet = params.project_wallet;
        self.min_contribution = params.min_contribution;
        self.ratio_precision = params.ratio_precision;
        self.vault_bump = vault_bump;
        self.initialized = true;
        Ok(())
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        require!(self.initialized, RicoError::NotInitialized);
        Ok(())
    }

    pub fn unlock_window(&self) -> UnlockWindow {
        self.schedule.unlock_window()
    }

    pub fn locked_ratio(&self, slot: Slot) -> Result<u128> {
        self.unlock_window().locked_ratio(slot, self.ratio_precision)
    }

    pub fn available_project_eth(&self, slot: Slot) -> Result<u64> {
        self.ledger
            .available_project_eth(&self.unlock_window(), slot, self.ratio_precision)
    }
}
