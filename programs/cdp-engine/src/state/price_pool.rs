use anchor_lang::prelude::*;

/// Mock AMM pool quoting a square-root price (for local testing)
/// In production, the registry points at a real pool account instead.
#[account]
#[derive(InitSpace)]
pub struct PricePool {
    pub authority: Pubkey,

    /// sqrt(second asset / first asset) as a Q64.96 fixed-point number
    pub sqrt_price_x96: u128,

    pub last_updated: i64,
    pub bump: u8,
}

impl PricePool {
    pub const SEED_PREFIX: &'static [u8] = b"price_pool";
}
