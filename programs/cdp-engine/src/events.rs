use anchor_lang::prelude::*;

#[event]
pub struct CollateralRegistered {
    pub mint: Pubkey,
    pub price_reference: Pubkey,
    pub asset_is_first_in_pool: bool,
    pub liquidation_threshold_bps: u16,
    pub is_new: bool,
}

#[event]
pub struct LiquidationThresholdUpdated {
    pub mint: Pubkey,
    pub previous_threshold_bps: u16,
    pub threshold_bps: u16,
}

#[event]
pub struct CollateralDeposited {
    pub user: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct CollateralRedeemed {
    pub from: Pubkey,
    pub to: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct DebtMinted {
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
pub struct DebtBurned {
    pub user: Pubkey,
    pub payer: Pubkey,
    pub principal_repaid: u64,
    pub interest_repaid: u64,
}

#[event]
pub struct InterestAccrued {
    pub user: Pubkey,
    pub interest: u64,
    pub timestamp: i64,
}

#[event]
pub struct Liquidated {
    pub user: Pubkey,
    pub liquidator: Pubkey,
    pub mint: Pubkey,
    pub collateral_seized: u64,
    pub debt_covered: u64,
}

#[event]
pub struct PricePoolUpdated {
    pub pool: Pubkey,
    pub sqrt_price_x96: u128,
    pub timestamp: i64,
}
