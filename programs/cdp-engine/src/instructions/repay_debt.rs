use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::errors::ProtocolError;
use crate::events::{CollateralRedeemed, DebtBurned};
use crate::state::{CollateralType, Config, DebtPosition, UserCollateral};
use crate::utils::{
    accrue_position, acquire_lock, assert_healthy, load_portfolio, release_lock, retire_stable,
    transfer_from_vault, VAULT_SEED,
};

#[derive(Accounts)]
pub struct RepayDebt<'info> {
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
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_stable_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [DebtPosition::SEED_PREFIX, user.key().as_ref()],
        bump = debt_position.bump,
        constraint = debt_position.owner == user.key() @ ProtocolError::InvalidOwner,
    )]
    pub debt_position: Account<'info, DebtPosition>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> RepayDebt<'info> {
    pub fn repay(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, ProtocolError::ZeroAmount);
        acquire_lock(&mut self.config)?;

        let now = Clock::get()?.unix_timestamp;
        accrue_position(&mut self.debt_position, &mut self.config.totals, now)?;

        let split = self.debt_position.repayment_for(amount, now)?;
        self.debt_position.apply_repayment(split, &mut self.config.totals)?;

        retire_stable(
            &self.token_program,
            &self.stable_mint,
            &self.user_stable_account,
            &self.user,
            split.total(),
        )?;

        emit!(DebtBurned {
            user: self.user.key(),
            payer: self.user.key(),
            principal_repaid: split.principal,
            interest_repaid: split.interest,
        });

        release_lock(&mut self.config);
        Ok(())
    }
}

#[derive(Accounts)]
pub struct RepayAndRedeem<'info> {
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
        address = config.stable_mint,
        mint::token_program = token_program,
    )]
    pub stable_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = stable_mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_stable_account: Box<InterfaceAccount<'info, TokenAccount>>,

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

impl<'info> RepayAndRedeem<'info> {
    pub fn repay_and_redeem(
        &mut self,
        portfolio_accounts: &[AccountInfo<'info>],
        repay_amount: u64,
        redeem_amount: u64,
    ) -> Result<()> {
        require!(repay_amount > 0 && redeem_amount > 0, ProtocolError::ZeroAmount);
        CollateralType::load(&self.collateral_type)?;
        acquire_lock(&mut self.config)?;

        let user = self.user.key();
        let mint = self.mint.key();
        let now = Clock::get()?.unix_timestamp;

        accrue_position(&mut self.debt_position, &mut self.config.totals, now)?;

        let split = self.debt_position.repayment_for(repay_amount, now)?;
        self.debt_position.apply_repayment(split, &mut self.config.totals)?;

        let remaining = self.user_collateral.balance_after_withdraw(redeem_amount)?;
        let mut portfolio = load_portfolio(&self.config, &user, portfolio_accounts)?;
        portfolio.set_balance(&mint, remaining)?;
        assert_healthy(portfolio.health_factor(self.debt_position.current_debt(now)?)?)?;

        self.user_collateral.withdraw(redeem_amount)?;

        retire_stable(
            &self.token_program,
            &self.stable_mint,
            &self.user_stable_account,
            &self.user,
            split.total(),
        )?;
        transfer_from_vault(
            &self.token_program,
            &self.mint,
            &self.vault,
            &self.user_token_account,
            &self.config,
            redeem_amount,
        )?;

        emit!(DebtBurned {
            user,
            payer: user,
            principal_repaid: split.principal,
            interest_repaid: split.interest,
        });
        emit!(CollateralRedeemed {
            from: user,
            to: self.user_token_account.owner,
            mint,
            amount: redeem_amount,
        });

        release_lock(&mut self.config);
        Ok(())
    }
}
