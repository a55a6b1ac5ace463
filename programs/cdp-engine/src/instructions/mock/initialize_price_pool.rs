use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::events::PricePoolUpdated;
use crate::state::{Config, PricePool};
use crate::utils::{acquire_lock, release_lock};

#[derive(Accounts)]
pub struct InitializePricePool<'info> {
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
        init,
        payer = authority,
        space = PricePool::DISCRIMINATOR.len() + PricePool::INIT_SPACE,
        seeds = [PricePool::SEED_PREFIX, pool_id.key().as_ref()],
        bump
    )]
    pub price_pool: Account<'info, PricePool>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitializePricePool<'info> {
    pub fn initialize_price_pool(
        &mut self,
        bumps: &InitializePricePoolBumps,
        sqrt_price_x96: u128,
    ) -> Result<()> {
        acquire_lock(&mut self.config)?;

        let timestamp = Clock::get()?.unix_timestamp;
        self.price_pool.set_inner(PricePool {
            authority: self.authority.key(),
            sqrt_price_x96,
            last_updated: timestamp,
            bump: bumps.price_pool,
        });

        emit!(PricePoolUpdated {
            pool: self.price_pool.key(),
            sqrt_price_x96,
            timestamp,
        });

        release_lock(&mut self.config);
        Ok(())
    }
}
