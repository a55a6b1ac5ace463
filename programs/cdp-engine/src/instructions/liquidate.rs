use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::errors::ProtocolError;
use crate::events::{CollateralRedeemed, DebtBurned, Liquidated};
use crate::state::{CollateralType, Config, DebtPosition, UserCollateral};
use crate::utils::{
    accrue_position, acquire_lock, load_portfolio, plan_liquidation, release_lock, retire_stable,
    transfer_from_vault, VAULT_SEED,
};

#[derive(Accounts)]
pub struct Liquidate<'info> {
    #[account(mut)]
    pub liquidator: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED_PREFIX],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    /// CHECK: owner of the position being liquidated, only used as a PDA seed
    pub user: UncheckedAccount<'info>,

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

    /// Receives the seized collateral
    #[account(
        mut,
        token::mint = mint,
        token::token_program = token_program,
    )]
    pub liquidator_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

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

    #[account(
        mut,
        address = config.stable_mint,
        mint::token_program = token_program,
    )]
    pub stable_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Stable units burned to cover the debt
    #[account(
        mut,
        token::mint = stable_mint,
        token::authority = liquidator,
        token::token_program = token_program,
    )]
    pub liquidator_stable_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Liquidate<'info> {
    pub fn liquidate(
        &mut self,
        portfolio_accounts: &[AccountInfo<'info>],
        debt_to_cover: u64,
    ) -> Result<()> {
        CollateralType::load(&self.collateral_type)?;
        acquire_lock(&mut self.config)?;

        let user = self.user.key();
        let liquidator = self.liquidator.key();
        let mint = self.mint.key();
        let now = Clock::get()?.unix_timestamp;

        accrue_position(&mut self.debt_position, &mut self.config.totals, now)?;

        let mut portfolio = load_portfolio(&self.config, &user, portfolio_accounts)?;
        portfolio.set_balance(&mint, self.user_collateral.amount)?;
        let plan = plan_liquidation(&portfolio, &self.debt_position, &mint, debt_to_cover, now)?;

        self.user_collateral.withdraw(plan.collateral_seized)?;
        self.debt_position.apply_repayment(plan.repayment, &mut self.config.totals)?;

        if plan.collateral_seized > 0 {
            transfer_from_vault(
                &self.token_program,
                &self.mint,
                &self.vault,
                &self.liquidator_token_account,
                &self.config,
                plan.collateral_seized,
            )?;
        }
        retire_stable(
            &self.token_program,
            &self.stable_mint,
            &self.liquidator_stable_account,
            &self.liquidator,
            plan.repayment.total(),
        )?;

        emit!(CollateralRedeemed {
            from: user,
            to: self.liquidator_token_account.owner,
            mint,
            amount: plan.collateral_seized,
        });
        emit!(DebtBurned {
            user,
            payer: liquidator,
            principal_repaid: plan.repayment.principal,
            interest_repaid: plan.repayment.interest,
        });
        emit!(Liquidated {
            user,
            liquidator,
            mint,
            collateral_seized: plan.collateral_seized,
            debt_covered: plan.repayment.total(),
        });

        msg!(
            "Liquidated {}: seized {} collateral, covered {} debt, health factor {} -> {}",
            user,
            plan.collateral_seized,
            plan.repayment.total(),
            plan.starting_health_factor,
            plan.ending_health_factor
        );

        release_lock(&mut self.config);
        Ok(())
    }
}
