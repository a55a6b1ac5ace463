use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::errors::ProtocolError;
use crate::events::CollateralRegistered;
use crate::state::{CollateralType, CollateralTypeInfo, Config};
use crate::utils::{acquire_lock, release_lock, VAULT_SEED};

#[derive(Accounts)]
pub struct RegisterCollateral<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED_PREFIX],
        bump = config.bump,
        constraint = config.authority == authority.key() @ ProtocolError::Unauthorized,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mint::token_program = token_program
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = authority,
        space = CollateralType::DISCRIMINATOR.len() + CollateralType::INIT_SPACE,
        seeds = [CollateralType::SEED_PREFIX, mint.key().as_ref()],
        bump
    )]
    pub collateral_type: Account<'info, CollateralType>,

    /// Custody for every user's deposits of this mint
    #[account(
        init_if_needed,
        payer = authority,
        token::mint = mint,
        token::authority = config,
        token::token_program = token_program,
        seeds = [VAULT_SEED, mint.key().as_ref()],
        bump
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> RegisterCollateral<'info> {
    pub fn register(
        &mut self,
        bumps: &RegisterCollateralBumps,
        price_reference: Pubkey,
        asset_is_first_in_pool: bool,
        liquidation_threshold_bps: u16,
    ) -> Result<()> {
        acquire_lock(&mut self.config)?;

        let info = CollateralTypeInfo {
            price_reference,
            asset_is_first_in_pool,
            liquidation_threshold_bps,
        };
        let mint = self.mint.key();

        let is_new = self.collateral_type.apply(mint, info, bumps.collateral_type)?;
        self.config.add_collateral_asset(mint)?;

        emit!(CollateralRegistered {
            mint,
            price_reference,
            asset_is_first_in_pool,
            liquidation_threshold_bps,
            is_new,
        });

        release_lock(&mut self.config);
        Ok(())
    }
}
