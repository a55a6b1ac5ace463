use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::events::PricePoolUpdated;
use crate::state::{Config, PricePool};
use crate::utils::{acquire_lock, release_lock};

#[derive(Accounts)]
pub struct UpdatePricePool<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED_PREFIX],
        bump = config.bump,
        constraint = config.authority == authority.key() @ ProtocolError::Unauthorized,
    )]
    pub config: Account<'info, Config>,

    /// CHECK: used only as PDA seed
    pub pool_id: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [PricePool::SEED_PREFIX, pool_id.key().as_ref()],
        bump = price_pool.bump
    )]
    pub price_pool: Account<'info, PricePool>,
}

impl<'info> UpdatePricePool<'info> {
    /// A zero price is accepted here; readers reject it as unavailable.
    pub fn update_price_pool(&mut self, sqrt_price_x96: u128) -> Result<()> {
        acquire_lock(&mut self.config)?;

        let timestamp = Clock::get()?.unix_timestamp;
        self.price_pool.sqrt_price_x96 = sqrt_price_x96;
        self.price_pool.last_updated = timestamp;

        emit!(PricePoolUpdated {
            pool: self.price_pool.key(),
            sqrt_price_x96,
            timestamp,
        });

        release_lock(&mut self.config);
        Ok(())
    }
}
