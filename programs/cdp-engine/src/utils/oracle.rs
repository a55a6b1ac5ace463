use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::state::{CollateralType, PricePool};
use crate::utils::constants::PRECISION;
use crate::utils::math::{mul_div, mul_div_u256, to_u128, U256};

/// Convert a Q64.96 square-root pool price into a unit price scaled by `PRECISION`.
///
/// The pool quotes `sqrt(token_b / token_a) * 2^96`. When the collateral is the
/// pool's first asset its price is the reciprocal of the squared ratio, otherwise
/// the squared ratio itself. Both branches truncate.
pub fn price_from_sqrt_price(sqrt_price_x96: u128, asset_is_first_in_pool: bool) -> Result<u128> {
    require!(sqrt_price_x96 != 0, ProtocolError::PriceUnavailable);

    let sqrt_price = U256::from(sqrt_price_x96);
    let price_x192 = sqrt_price * sqrt_price;
    let q192 = U256::one() << 192;
    let scale = U256::from(PRECISION);

    let price = if asset_is_first_in_pool {
        mul_div_u256(q192, scale, price_x192)?
    } else {
        mul_div_u256(price_x192, scale, q192)?
    };

    require!(!price.is_zero(), ProtocolError::PriceUnavailable);
    to_u128(price)
}

/// Value of `amount` collateral base units in stable base units.
pub fn usd_value(amount: u64, price: u128) -> Result<u128> {
    if amount == 0 {
        return Ok(0);
    }
    mul_div(amount as u128, price, PRECISION)
}

/// Collateral base units worth `usd_amount` stable base units.
pub fn amount_from_usd(usd_amount: u128, price: u128) -> Result<u128> {
    require!(price != 0, ProtocolError::PriceUnavailable);
    mul_div(usd_amount, PRECISION, price)
}

/// Read the raw square-root price from a pool account referenced by the registry.
pub fn read_sqrt_price(
    collateral_type: &CollateralType,
    pool_account: &AccountInfo,
) -> Result<u128> {
    require!(
        pool_account.key() == collateral_type.price_reference,
        ProtocolError::InvalidPriceReference
    );
    require!(
        pool_account.owner == &crate::ID,
        ProtocolError::InvalidPriceReference
    );

    let data = pool_account.try_borrow_data()?;
    let pool = PricePool::try_deserialize(&mut data.as_ref())?;
    Ok(pool.sqrt_price_x96)
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q96: u128 = 1 << 96;

    #[test]
    fn test_price_at_parity() {
        assert_eq!(price_from_sqrt_price(Q96, false).unwrap(), PRECISION);
        assert_eq!(price_from_sqrt_price(Q96, true).unwrap(), PRECISION);
    }

    #[test]
    fn test_price_depends_on_pool_position() {
        // sqrt ratio of 2 means the second asset trades at 4 per first asset
        let sqrt_price = 2 * Q96;
        assert_eq!(price_from_sqrt_price(sqrt_price, false).unwrap(), 4 * PRECISION);
        assert_eq!(price_from_sqrt_price(sqrt_price, true).unwrap(), PRECISION / 4);
    }

    #[test]
    fn test_zero_price_is_unavailable() {
        assert_eq!(
            price_from_sqrt_price(0, false).unwrap_err(),
            ProtocolError::PriceUnavailable.into()
        );
        // squares to less than one unit at 1e18 scale
        assert_eq!(
            price_from_sqrt_price(1, false).unwrap_err(),
            ProtocolError::PriceUnavailable.into()
        );
    }

    #[test]
    fn test_usd_value_and_inverse() {
        let price = 2 * PRECISION;
        assert_eq!(usd_value(10_000_000_000, price).unwrap(), 20_000_000_000);
        assert_eq!(amount_from_usd(20_000_000_000, price).unwrap(), 10_000_000_000);
    }

    #[test]
    fn test_usd_value_truncates_toward_zero() {
        // 3 units at 0.5 each is 1.5, truncated to 1
        assert_eq!(usd_value(3, PRECISION / 2).unwrap(), 1);
        assert_eq!(amount_from_usd(1, 3 * PRECISION).unwrap(), 0);
    }

    #[test]
    fn test_zero_amount_skips_price() {
        assert_eq!(usd_value(0, 0).unwrap(), 0);
    }
}
