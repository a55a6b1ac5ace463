use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::errors::ProtocolError;
use crate::events::DebtMinted;
use crate::state::{Config, DebtPosition};
use crate::utils::{
    accrue_position, acquire_lock, assert_healthy, issue_stable, load_portfolio, release_lock,
};

#[derive(Accounts)]
pub struct MintDebt<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED_PREFIX],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        address = config.stable_mint,
        mint::token_program = token_program,
    )]
    pub stable_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = stable_mint,
        token::token_program = token_program,
    )]
    pub user_stable_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        space = DebtPosition::DISCRIMINATOR.len() + DebtPosition::INIT_SPACE,
        seeds = [DebtPosition::SEED_PREFIX, user.key().as_ref()],
        bump
    )]
    pub debt_position: Account<'info, DebtPosition>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> MintDebt<'info> {
    pub fn mint(
        &mut self,
        bumps: &MintDebtBumps,
        portfolio_accounts: &[AccountInfo<'info>],
        amount: u64,
    ) -> Result<()> {
        require!(amount > 0, ProtocolError::ZeroAmount);
        acquire_lock(&mut self.config)?;

        let user = self.user.key();
        let now = Clock::get()?.unix_timestamp;

        self.debt_position.init_if_unset(user, bumps.debt_position);
        accrue_position(&mut self.debt_position, &mut self.config.totals, now)?;

        let new_debt = self.debt_position.current_debt(now)?
            .checked_add(amount)
            .ok_or(ProtocolError::MathOverflow)?;
        let portfolio = load_portfolio(&self.config, &user, portfolio_accounts)?;
        assert_healthy(portfolio.health_factor(new_debt)?)?;

        self.debt_position.increase_principal(amount, &mut self.config.totals)?;

        issue_stable(
            &self.token_program,
            &self.stable_mint,
            &self.user_stable_account,
            &self.config,
            amount,
        )?;

        emit!(DebtMinted { user, amount });

        release_lock(&mut self.config);
        Ok(())
    }
}
