use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::utils::constants::{
    LIQUIDATION_PRECISION, LIQUIDATION_THRESHOLD, MIN_HEALTH_FACTOR, PRECISION,
};
use crate::utils::math::{mul_div_u256, U256};
use crate::utils::oracle::{price_from_sqrt_price, usd_value};

/// Calculate health factor
/// Health Factor = (collateral_value * 100 / 150) / debt_value, scaled by PRECISION
/// HF >= 1.0 = healthy, HF < 1.0 = liquidatable
pub fn calculate_health_factor(collateral_value: u128, debt_value: u64) -> Result<u128> {
    if debt_value == 0 {
        // No debt = infinite health
        return Ok(u128::MAX);
    }

    let adjusted_collateral = collateral_value
        .checked_mul(LIQUIDATION_PRECISION)
        .ok_or(ProtocolError::MathOverflow)?
        / LIQUIDATION_THRESHOLD;

    let health_factor = mul_div_u256(
        U256::from(adjusted_collateral),
        U256::from(PRECISION),
        U256::from(debt_value),
    )?;

    Ok(u128::try_from(health_factor).unwrap_or(u128::MAX))
}

pub fn assert_healthy(health_factor: u128) -> Result<()> {
    if health_factor < MIN_HEALTH_FACTOR {
        msg!("Health factor broken: {}", health_factor);
        return err!(ProtocolError::HealthFactorBroken);
    }
    Ok(())
}

/// One registered collateral asset as seen from a single user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollateralHolding {
    pub mint: Pubkey,
    pub sqrt_price_x96: u128,
    pub asset_is_first_in_pool: bool,
    pub balance: u64,
}

impl CollateralHolding {
    pub fn price(&self) -> Result<u128> {
        price_from_sqrt_price(self.sqrt_price_x96, self.asset_is_first_in_pool)
    }

    pub fn usd_value(&self) -> Result<u128> {
        if self.balance == 0 {
            return Ok(0);
        }
        usd_value(self.balance, self.price()?)
    }
}

/// A user's balances across every registered collateral asset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Portfolio {
    pub holdings: Vec<CollateralHolding>,
}

impl Portfolio {
    pub fn new(holdings: Vec<CollateralHolding>) -> Self {
        Self { holdings }
    }

    pub fn holding(&self, mint: &Pubkey) -> Result<&CollateralHolding> {
        self.holdings
            .iter()
            .find(|holding| holding.mint == *mint)
            .ok_or_else(|| error!(ProtocolError::UnknownAsset))
    }

    pub fn balance_of(&self, mint: &Pubkey) -> Result<u64> {
        Ok(self.holding(mint)?.balance)
    }

    /// Replace one balance, used to evaluate a staged deposit or withdrawal.
    pub fn set_balance(&mut self, mint: &Pubkey, balance: u64) -> Result<()> {
        let holding = self.holdings
            .iter_mut()
            .find(|holding| holding.mint == *mint)
            .ok_or(ProtocolError::UnknownAsset)?;
        holding.balance = balance;
        Ok(())
    }

    pub fn collateral_value(&self) -> Result<u128> {
        self.holdings.iter().try_fold(0u128, |total, holding| {
            total
                .checked_add(holding.usd_value()?)
                .ok_or_else(|| error!(ProtocolError::MathOverflow))
        })
    }

    pub fn health_factor(&self, debt_value: u64) -> Result<u128> {
        if debt_value == 0 {
            return Ok(u128::MAX);
        }
        calculate_health_factor(self.collateral_value()?, debt_value)
    }
}
