pub mod initialize;
pub mod register_collateral;
pub mod update_config;
pub mod deposit_collateral;
pub mod redeem_collateral;
pub mod mint_debt;
pub mod repay_debt;
pub mod liquidate;
pub mod views;
pub mod mock;

pub use initialize::*;
pub use register_collateral::*;
pub use update_config::*;
pub use deposit_collateral::*;
pub use redeem_collateral::*;
pub use mint_debt::*;
pub use repay_debt::*;
pub use liquidate::*;
pub use views::*;
pub use mock::*;
