use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenInterface};
use crate::state::{Config, DebtTotals};
use crate::utils::{STABLE_DECIMALS, STABLE_MINT_SEED};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = Config::DISCRIMINATOR.len() + Config::INIT_SPACE,
        seeds = [Config::SEED_PREFIX],
        bump
    )]
    pub config: Account<'info, Config>,

    /// Stable unit; only the config PDA can issue it
    #[account(
        init,
        payer = authority,
        seeds = [STABLE_MINT_SEED],
        bump,
        mint::decimals = STABLE_DECIMALS,
        mint::authority = config,
        mint::token_program = token_program,
    )]
    pub stable_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(&mut self, bumps: &InitializeBumps) -> Result<()> {
        self.config.set_inner(Config {
            authority: self.authority.key(),
            stable_mint: self.stable_mint.key(),
            collateral_assets: Vec::new(),
            totals: DebtTotals::default(),
            locked: false,
            bump: bumps.config,
            stable_mint_bump: bumps.stable_mint,
        });

        Ok(())
    }
}
