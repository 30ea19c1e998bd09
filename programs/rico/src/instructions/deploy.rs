use anchor_lang::prelude::*;
use crate::constants::*;
use crate::state::*;

pub fn deploy(ctx: Context<Deploy>) -> Result<()> {
    let rico = &mut ctx.accounts.rico;
    rico.deployer = ctx.accounts.deployer.key();
    rico.bump = ctx.bumps.rico;

    emit!(crate::RicoDeployed {
        rico: rico.key(),
        deployer: rico.deployer,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Deploy<'info> {
    #[account(init, payer = deployer, space = 8 + Rico::LEN, seeds = [SEED_RICO], bump)]
    pub rico: Box<Account<'info, Rico>>,
    #[account(mut)]
    pub deployer: Signer<'info>,
    pub system_program: Program<'info, System>,
}
