use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::events::InterestAccrued;
use crate::state::{DebtPosition, DebtTotals};
use crate::utils::constants::{ANNUAL_INTEREST_RATE, PRECISION, SECONDS_PER_YEAR};
use crate::utils::math::{mul_div_u256, U256};

/// Simple (non-compounding) interest on `principal` over `elapsed_seconds`.
/// interest = principal * rate * elapsed / (seconds_per_year * PRECISION)
pub fn calculate_interest(principal: u64, elapsed_seconds: u64) -> Result<u64> {
    if principal == 0 || elapsed_seconds == 0 {
        return Ok(0);
    }

    let interest = mul_div_u256(
        U256::from(principal) * U256::from(elapsed_seconds),
        U256::from(ANNUAL_INTEREST_RATE),
        U256::from(SECONDS_PER_YEAR) * U256::from(PRECISION),
    )?;

    u64::try_from(interest).map_err(|_| error!(ProtocolError::MathOverflow))
}

/// Accrue a position to `now` and notify observers when interest was booked.
pub fn accrue_position(
    position: &mut DebtPosition,
    totals: &mut DebtTotals,
    now: i64,
) -> Result<u64> {
    let interest = position.accrue(now, totals)?;
    if interest > 0 {
        emit!(InterestAccrued {
            user: position.owner,
            interest,
            timestamp: now,
        });
    }
    Ok(interest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: u64 = SECONDS_PER_YEAR as u64;

    #[test]
    fn test_one_year_is_five_percent() {
        assert_eq!(calculate_interest(1_000_000_000, YEAR).unwrap(), 50_000_000);
    }

    #[test]
    fn test_interest_is_linear() {
        let half = calculate_interest(1_000_000_000, YEAR / 2).unwrap();
        let full = calculate_interest(1_000_000_000, YEAR).unwrap();
        assert_eq!(half, 25_000_000);
        assert_eq!(half * 2, full);

        let two_years = calculate_interest(1_000_000_000, 2 * YEAR).unwrap();
        assert_eq!(two_years, 100_000_000);
    }

    #[test]
    fn test_small_amounts_truncate() {
        // 100 * 5% * 1s / year rounds down to nothing
        assert_eq!(calculate_interest(100, 1).unwrap(), 0);
    }

    #[test]
    fn test_zero_inputs() {
        assert_eq!(calculate_interest(0, YEAR).unwrap(), 0);
        assert_eq!(calculate_interest(1_000, 0).unwrap(), 0);
    }

    #[test]
    fn test_large_principal_does_not_overflow() {
        let interest = calculate_interest(u64::MAX, YEAR).unwrap();
        assert_eq!(interest, u64::MAX / 20);
    }
}
