use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke, system_instruction};
use anchor_spl::token::{self, Transfer};

use crate::constants::SEED_VAULT;
use crate::effects::{Effect, Effects};
use crate::errors::RicoError;

/// Vault side of a token movement.
pub struct TokenRoute<'info> {
    pub vault: AccountInfo<'info>,
    pub vault_bump: u8,
    /// The counterparty's token account.
    pub holder: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

/// Accounts an instruction hands over to flush the engine's effects.
/// Every effect must name `counterparty` as its other side.
pub struct Settlement<'info> {
    pub rico: AccountInfo<'info>,
    pub counterparty: AccountInfo<'info>,
    pub system_program: Option<AccountInfo<'info>>,
    pub tokens: Option<TokenRoute<'info>>,
}

impl<'info> Settlement<'info> {
    pub fn flush(&self, effects: Effects) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::CollectLamports { from, amount } => {
                    self.check_counterparty(&from)?;
                    collect_lamports(&self.counterparty, &self.rico, self.system_program()?, amount)?;
                }
                Effect::PayLamports { to, amount, .. } => {
                    self.check_counterparty(&to)?;
                    pay_lamports(&self.rico, &self.counterparty, amount)?;
                }
                Effect::AwardTokens { to, amount } => {
                    self.check_counterparty(&to)?;
                    award_tokens(self.token_route()?, self.rico.key, amount)?;
                }
                Effect::CollectTokens { from, amount } => {
                    self.check_counterparty(&from)?;
                    collect_tokens(self.token_route()?, &self.counterparty, amount)?;
                }
            }
        }
        Ok(())
    }

    fn check_counterparty(&self, key: &Pubkey) -> Result<()> {
        require_keys_eq!(*key, *self.counterparty.key, RicoError::InvalidRecipient);
        Ok(())
    }

    fn system_program(&self) -> Result<&AccountInfo<'info>> {
        self.system_program
            .as_ref()
            .ok_or_else(|| error!(anchor_lang::error::ErrorCode::AccountNotEnoughKeys))
    }

    fn token_route(&self) -> Result<&TokenRoute<'info>> {
        self.tokens
            .as_ref()
            .ok_or_else(|| error!(anchor_lang::error::ErrorCode::AccountNotEnoughKeys))
    }
}

pub fn collect_lamports<'info>(
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let ix = system_instruction::transfer(from.key, to.key, amount);
    invoke(&ix, &[from.clone(), to.clone(), system_program.clone()])?;
    Ok(())
}

/// `from` is owned by this program, so its lamports are debited directly.
pub fn pay_lamports(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    let debited = from
        .lamports()
        .checked_sub(amount)
        .ok_or(RicoError::MathOverflow)?;
    let credited = to
        .lamports()
        .checked_add(amount)
        .ok_or(RicoError::MathOverflow)?;
    **from.try_borrow_mut_lamports()? = debited;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}

pub fn award_tokens(route: &TokenRoute, rico: &Pubkey, amount: u64) -> Result<()> {
    let seeds = &[SEED_VAULT, rico.as_ref(), &[route.vault_bump]];
    let signer = &[&seeds[..]];

    let cpi_ctx = CpiContext::new_with_signer(
        route.token_program.clone(),
        Transfer {
            from: route.vault.clone(),
            to: route.holder.clone(),
            authority: route.vault.clone(),
        },
        signer,
    );
    token::transfer(cpi_ctx, amount)
}

pub fn collect_tokens<'info>(route: &TokenRoute<'info>, authority: &AccountInfo<'info>, amount: u64) -> Result<()> {
    let cpi_ctx = CpiContext::new(
        route.token_program.clone(),
        Transfer {
            from: route.holder.clone(),
            to: route.vault.clone(),
            authority: authority.clone(),
        },
    );
    token::transfer(cpi_ctx, amount)
}
