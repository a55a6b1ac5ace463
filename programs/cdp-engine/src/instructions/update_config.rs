use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::events::LiquidationThresholdUpdated;
use crate::state::{CollateralType, Config};
use crate::utils::{acquire_lock, release_lock};

#[derive(Accounts)]
#[instruction(mint: Pubkey)]
pub struct UpdateCollateralConfig<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED_PREFIX],
        bump = config.bump,
        constraint = config.authority == authority.key() @ ProtocolError::Unauthorized,
    )]
    pub config: Account<'info, Config>,

    /// CHECK: registry entry for `mint`, read with `CollateralType::load` and written back
    #[account(
        mut,
        seeds = [CollateralType::SEED_PREFIX, mint.as_ref()],
        bump,
    )]
    pub collateral_type: UncheckedAccount<'info>,
}

impl<'info> UpdateCollateralConfig<'info> {
    pub fn update_liquidation_threshold(&mut self, threshold_bps: u16) -> Result<()> {
        acquire_lock(&mut self.config)?;

        let mut collateral_type = CollateralType::load(&self.collateral_type)?;
        let previous = collateral_type.set_liquidation_threshold(threshold_bps)?;
        {
            let mut data = self.collateral_type.try_borrow_mut_data()?;
            collateral_type.try_serialize(&mut &mut data[..])?;
        }

        emit!(LiquidationThresholdUpdated {
            mint: collateral_type.mint,
            previous_threshold_bps: previous,
            threshold_bps,
        });

        release_lock(&mut self.config);
        Ok(())
    }
}
