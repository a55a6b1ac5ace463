use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::errors::ProtocolError;
use crate::events::CollateralRedeemed;
use crate::state::{CollateralType, Config, DebtPosition, UserCollateral};
use crate::utils::{
    accrue_position, acquire_lock, assert_healthy, load_portfolio, release_lock,
    transfer_from_vault, VAULT_SEED,
};

#[derive(Accounts)]
pub struct RedeemCollateral<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED_PREFIX],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mint::token_program = token_program
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: registry entry for `mint`, read with `CollateralType::load`
    #[account(
        seeds = [CollateralType::SEED_PREFIX, mint.key().as_ref()],
        bump,
    )]
    pub collateral_type: UncheckedAccount<'info>,

    /// CHECK: token account created at registration under these seeds, owned by
    /// `config`; the token program validates it on transfer
    #[account(
        mut,
        seeds = [VAULT_SEED, mint.key().as_ref()],
        bump,
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = mint,
        token::token_program = token_program,
    )]
    pub user_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [UserCollateral::SEED_PREFIX, user.key().as_ref(), mint.key().as_ref()],
        bump = user_collateral.bump,
        constraint = user_collateral.owner == user.key() @ ProtocolError::InvalidOwner,
    )]
    pub user_collateral: Account<'info, UserCollateral>,

    #[account(
        mut,
        seeds = [DebtPosition::SEED_PREFIX, user.key().as_ref()],
        bump = debt_position.bump,
        constraint = debt_position.owner == user.key() @ ProtocolError::InvalidOwner,
    )]
    pub debt_position: Account<'info, DebtPosition>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> RedeemCollateral<'info> {
    /// Redeem `amount` of the caller's collateral. `portfolio_accounts` must
    /// describe the caller's full portfolio so the post-withdrawal health can
    /// be priced.
    pub fn redeem(&mut self, portfolio_accounts: &[AccountInfo<'info>], amount: u64) -> Result<()> {
        require!(amount > 0, ProtocolError::ZeroAmount);
        CollateralType::load(&self.collateral_type)?;
        acquire_lock(&mut self.config)?;

        let user = self.user.key();
        let mint = self.mint.key();
        let now = Clock::get()?.unix_timestamp;

        accrue_position(&mut self.debt_position, &mut self.config.totals, now)?;

        let remaining = self.user_collateral.balance_after_withdraw(amount)?;
        let mut portfolio = load_portfolio(&self.config, &user, portfolio_accounts)?;
        portfolio.set_balance(&mint, remaining)?;
        assert_healthy(portfolio.health_factor(self.debt_position.current_debt(now)?)?)?;

        self.user_collateral.withdraw(amount)?;

        transfer_from_vault(
            &self.token_program,
            &self.mint,
            &self.vault,
            &self.user_token_account,
            &self.config,
            amount,
        )?;

        emit!(CollateralRedeemed {
            from: user,
            to: self.user_token_account.owner,
            mint,
            amount,
        });

        release_lock(&mut self.config);
        Ok(())
    }
}
