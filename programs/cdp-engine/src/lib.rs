#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

mod state;
mod instructions;
mod errors;
mod events;
mod utils;

use instructions::*;
use state::{CollateralTypeInfo, DebtTotals};

declare_id!("GoJ8e649rvdvuDzn8X96B97pMrtU87DVjsRAP8g85KbA");

#[program]
pub mod cdp_engine {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        ctx.accounts.initialize(&ctx.bumps)
    }

    /// Registers a new collateral mint or overwrites the pricing of a known one.
    pub fn register_or_update_collateral(
        ctx: Context<RegisterCollateral>,
        price_reference: Pubkey,
        asset_is_first_in_pool: bool,
        liquidation_threshold_bps: u16,
    ) -> Result<()> {
        ctx.accounts.register(
            &ctx.bumps,
            price_reference,
            asset_is_first_in_pool,
            liquidation_threshold_bps,
        )
    }

    pub fn update_liquidation_threshold(
        ctx: Context<UpdateCollateralConfig>,
        _mint: Pubkey,
        threshold_bps: u16,
    ) -> Result<()> {
        ctx.accounts.update_liquidation_threshold(threshold_bps)
    }

    pub fn deposit_collateral(ctx: Context<DepositCollateral>, amount: u64) -> Result<()> {
        ctx.accounts.deposit(&ctx.bumps, amount)
    }

    /// Remaining accounts: `[collateral_type, price_pool, user_collateral]` per
    /// registered asset, in registry order. Same for every instruction below
    /// that checks solvency.
    pub fn redeem_collateral<'info>(
        ctx: Context<'_, '_, 'info, 'info, RedeemCollateral<'info>>,
        amount: u64,
    ) -> Result<()> {
        ctx.accounts.redeem(ctx.remaining_accounts, amount)
    }

    pub fn deposit_and_mint<'info>(
        ctx: Context<'_, '_, 'info, 'info, DepositAndMint<'info>>,
        collateral_amount: u64,
        mint_amount: u64,
    ) -> Result<()> {
        ctx.accounts.deposit_and_mint(&ctx.bumps, ctx.remaining_accounts, collateral_amount, mint_amount)
    }

    pub fn mint_debt<'info>(
        ctx: Context<'_, '_, 'info, 'info, MintDebt<'info>>,
        amount: u64,
    ) -> Result<()> {
        ctx.accounts.mint(&ctx.bumps, ctx.remaining_accounts, amount)
    }

    pub fn repay_debt(ctx: Context<RepayDebt>, amount: u64) -> Result<()> {
        ctx.accounts.repay(amount)
    }

    pub fn repay_and_redeem<'info>(
        ctx: Context<'_, '_, 'info, 'info, RepayAndRedeem<'info>>,
        repay_amount: u64,
        redeem_amount: u64,
    ) -> Result<()> {
        ctx.accounts.repay_and_redeem(ctx.remaining_accounts, repay_amount, redeem_amount)
    }

    pub fn liquidate<'info>(
        ctx: Context<'_, '_, 'info, 'info, Liquidate<'info>>,
        debt_to_cover: u64,
    ) -> Result<()> {
        ctx.accounts.liquidate(ctx.remaining_accounts, debt_to_cover)
    }

    pub fn get_current_debt(ctx: Context<ViewPosition>) -> Result<u64> {
        ctx.accounts.get_current_debt()
    }

    pub fn get_user_debt_info(ctx: Context<ViewPosition>) -> Result<DebtInfo> {
        ctx.accounts.get_user_debt_info()
    }

    pub fn get_health_factor<'info>(
        ctx: Context<'_, '_, 'info, 'info, ViewPosition<'info>>,
    ) -> Result<u128> {
        ctx.accounts.get_health_factor(ctx.remaining_accounts)
    }

    pub fn get_user_collateral(ctx: Context<ViewUserCollateral>) -> Result<u64> {
        ctx.accounts.get_user_collateral()
    }

    pub fn get_known_collateral_assets(ctx: Context<ViewConfig>) -> Result<Vec<Pubkey>> {
        ctx.accounts.get_known_collateral_assets()
    }

    pub fn get_total_debt(ctx: Context<ViewConfig>) -> Result<DebtTotals> {
        ctx.accounts.get_total_debt()
    }

    pub fn get_annual_interest_rate(ctx: Context<ViewConfig>) -> Result<u128> {
        ctx.accounts.get_annual_interest_rate()
    }

    pub fn get_collateral_type_info(
        ctx: Context<ViewCollateralType>,
        _mint: Pubkey,
    ) -> Result<CollateralTypeInfo> {
        ctx.accounts.get_collateral_type_info()
    }

    pub fn get_token_price(ctx: Context<ViewTokenPrice>, _mint: Pubkey) -> Result<u128> {
        ctx.accounts.get_token_price()
    }

    pub fn initialize_price_pool(
        ctx: Context<InitializePricePool>,
        sqrt_price_x96: u128,
    ) -> Result<()> {
        ctx.accounts.initialize_price_pool(&ctx.bumps, sqrt_price_x96)
    }

    pub fn update_price_pool(
        ctx: Context<UpdatePricePool>,
        sqrt_price_x96: u128,
    ) -> Result<()> {
        ctx.accounts.update_price_pool(sqrt_price_x96)
    }
}
