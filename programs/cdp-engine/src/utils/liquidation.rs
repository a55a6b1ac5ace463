use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::state::{DebtPosition, RepaymentSplit};
use crate::utils::constants::{LIQUIDATION_BONUS, LIQUIDATION_PRECISION, MIN_HEALTH_FACTOR};
use crate::utils::health::Portfolio;
use crate::utils::math::to_u64;
use crate::utils::oracle::amount_from_usd;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidationPlan {
    /// Collateral moved to the liquidator, bonus included and capped at the balance
    pub collateral_seized: u64,
    pub repayment: RepaymentSplit,
    pub starting_health_factor: u128,
    pub ending_health_factor: u128,
}

/// Calculate liquidation bonus amount
pub fn calculate_liquidation_bonus(base_collateral: u128) -> Result<u128> {
    let bonus = base_collateral
        .checked_mul(LIQUIDATION_BONUS)
        .ok_or(ProtocolError::MathOverflow)?
        / LIQUIDATION_PRECISION;
    Ok(bonus)
}

/// Work out every effect of a liquidation without touching any account.
///
/// `position` must already be accrued to `now`. The plan is rejected when the
/// position is healthy or when the resulting health factor would not be strictly
/// higher than the starting one.
pub fn plan_liquidation(
    portfolio: &Portfolio,
    position: &DebtPosition,
    mint: &Pubkey,
    debt_to_cover: u64,
    now: i64,
) -> Result<LiquidationPlan> {
    require!(debt_to_cover > 0, ProtocolError::ZeroAmount);

    let current_debt = position.current_debt(now)?;
    let starting_health_factor = portfolio.health_factor(current_debt)?;
    require!(
        starting_health_factor < MIN_HEALTH_FACTOR,
        ProtocolError::HealthFactorOk
    );
    require!(
        debt_to_cover <= current_debt,
        ProtocolError::ExcessiveRepayment
    );

    let holding = portfolio.holding(mint)?;
    let base_collateral = amount_from_usd(debt_to_cover as u128, holding.price()?)?;
    let with_bonus = base_collateral
        .checked_add(calculate_liquidation_bonus(base_collateral)?)
        .ok_or(ProtocolError::MathOverflow)?;
    let collateral_seized = to_u64(with_bonus.min(holding.balance as u128))?;

    let repayment = position.split_repayment(debt_to_cover, now)?;
    let remaining_debt = current_debt
        .checked_sub(repayment.total())
        .ok_or(ProtocolError::MathUnderflow)?;

    let mut after = portfolio.clone();
    after.set_balance(mint, holding.balance - collateral_seized)?;
    let ending_health_factor = after.health_factor(remaining_debt)?;

    if ending_health_factor <= starting_health_factor {
        msg!(
            "Health factor not improved: start={}, end={}",
            starting_health_factor,
            ending_health_factor
        );
        return err!(ProtocolError::HealthFactorNotImproved);
    }

    Ok(LiquidationPlan {
        collateral_seized,
        repayment,
        starting_health_factor,
        ending_health_factor,
    })
}
