use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::errors::ProtocolError;
use crate::events::{CollateralDeposited, DebtMinted};
use crate::state::{CollateralType, Config, DebtPosition, UserCollateral};
use crate::utils::{
    accrue_position, acquire_lock, assert_healthy, issue_stable, load_portfolio, release_lock,
    transfer_to_vault, VAULT_SEED,
};

#[derive(Accounts)]
pub struct DepositCollateral<'info> {
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
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        space = UserCollateral::DISCRIMINATOR.len() + UserCollateral::INIT_SPACE,
        seeds = [UserCollateral::SEED_PREFIX, user.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub user_collateral: Account<'info, UserCollateral>,

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

impl<'info> DepositCollateral<'info> {
    pub fn deposit(&mut self, bumps: &DepositCollateralBumps, amount: u64) -> Result<()> {
        require!(amount > 0, ProtocolError::ZeroAmount);
        CollateralType::load(&self.collateral_type)?;
        acquire_lock(&mut self.config)?;

        let user = self.user.key();
        let mint = self.mint.key();
        let now = Clock::get()?.unix_timestamp;

        self.user_collateral.init_if_unset(user, mint, bumps.user_collateral);
        self.debt_position.init_if_unset(user, bumps.debt_position);
        accrue_position(&mut self.debt_position, &mut self.config.totals, now)?;

        self.user_collateral.deposit(amount)?;

        transfer_to_vault(
            &self.token_program,
            &self.mint,
            &self.user_token_account,
            &self.vault,
            &self.user,
            amount,
        )?;

        emit!(CollateralDeposited { user, mint, amount });

        release_lock(&mut self.config);
        Ok(())
    }
}

#[derive(Accounts)]
pub struct DepositAndMint<'info> {
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
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = config.stable_mint,
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
        init_if_needed,
        payer = user,
        space = UserCollateral::DISCRIMINATOR.len() + UserCollateral::INIT_SPACE,
        seeds = [UserCollateral::SEED_PREFIX, user.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub user_collateral: Account<'info, UserCollateral>,

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

impl<'info> DepositAndMint<'info> {
    pub fn deposit_and_mint(
        &mut self,
        bumps: &DepositAndMintBumps,
        portfolio_accounts: &[AccountInfo<'info>],
        collateral_amount: u64,
        mint_amount: u64,
    ) -> Result<()> {
        require!(collateral_amount > 0 && mint_amount > 0, ProtocolError::ZeroAmount);
        CollateralType::load(&self.collateral_type)?;
        acquire_lock(&mut self.config)?;

        let user = self.user.key();
        let mint = self.mint.key();
        let now = Clock::get()?.unix_timestamp;

        self.user_collateral.init_if_unset(user, mint, bumps.user_collateral);
        self.debt_position.init_if_unset(user, bumps.debt_position);
        accrue_position(&mut self.debt_position, &mut self.config.totals, now)?;

        let new_balance = self.user_collateral.amount
            .checked_add(collateral_amount)
            .ok_or(ProtocolError::MathOverflow)?;
        let new_debt = self.debt_position.current_debt(now)?
            .checked_add(mint_amount)
            .ok_or(ProtocolError::MathOverflow)?;

        let mut portfolio = load_portfolio(&self.config, &user, portfolio_accounts)?;
        portfolio.set_balance(&mint, new_balance)?;
        assert_healthy(portfolio.health_factor(new_debt)?)?;

        self.user_collateral.deposit(collateral_amount)?;
        self.debt_position.increase_principal(mint_amount, &mut self.config.totals)?;

        transfer_to_vault(
            &self.token_program,
            &self.mint,
            &self.user_token_account,
            &self.vault,
            &self.user,
            collateral_amount,
        )?;
        issue_stable(
            &self.token_program,
            &self.stable_mint,
            &self.user_stable_account,
            &self.config,
            mint_amount,
        )?;

        emit!(CollateralDeposited { user, mint, amount: collateral_amount });
        emit!(DebtMinted { user, amount: mint_amount });

        release_lock(&mut self.config);
        Ok(())
    }
}
