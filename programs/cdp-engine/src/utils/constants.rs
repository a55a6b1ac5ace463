/// Fixed-point scale shared by prices, rates and health factors.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// A health factor below 1.0 can be liquidated.
pub const MIN_HEALTH_FACTOR: u128 = PRECISION;

/// Collateral must be worth 150% of the debt it backs.
pub const LIQUIDATION_THRESHOLD: u128 = 150;
pub const LIQUIDATION_PRECISION: u128 = 100;

/// Extra collateral a liquidator seizes, in percent of `LIQUIDATION_PRECISION`.
pub const LIQUIDATION_BONUS: u128 = 10;

/// 5% per year, scaled by `PRECISION`.
pub const ANNUAL_INTEREST_RATE: u128 = 50_000_000_000_000_000;
pub const SECONDS_PER_YEAR: u128 = 365 * 24 * 3600;

pub const BPS_DENOMINATOR: u16 = 10_000;

pub const MAX_COLLATERAL_TYPES: usize = 8;

/// Accounts per registered asset in a portfolio: collateral type, price pool, user balance.
pub const PORTFOLIO_ACCOUNTS_PER_ASSET: usize = 3;

pub const STABLE_DECIMALS: u8 = 6;

pub const VAULT_SEED: &[u8] = b"vault";
pub const STABLE_MINT_SEED: &[u8] = b"stable_mint";
