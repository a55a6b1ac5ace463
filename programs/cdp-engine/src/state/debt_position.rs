use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::state::DebtTotals;
use crate::utils::calculate_interest;

/// Portions of a repayment applied to accrued interest and to principal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepaymentSplit {
    pub interest: u64,
    pub principal: u64,
}

impl RepaymentSplit {
    pub fn total(&self) -> u64 {
        self.interest.saturating_add(self.principal)
    }
}

#[account]
#[derive(InitSpace)]
pub struct DebtPosition {
    pub owner: Pubkey,

    /// Minted stable units still owed, excluding interest
    pub principal: u64,

    /// Unix timestamp of the last accrual, 0 before the first touch
    pub last_accrual_timestamp: i64,

    pub bump: u8,
}

impl DebtPosition {
    pub const SEED_PREFIX: &'static [u8] = b"debt_position";

    pub fn init_if_unset(&mut self, owner: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.principal = 0;
            self.last_accrual_timestamp = 0;
            self.bump = bump;
        }
    }

    pub fn has_debt(&self) -> bool {
        self.principal > 0
    }

    fn elapsed(&self, now: i64) -> u64 {
        now.saturating_sub(self.last_accrual_timestamp).max(0) as u64
    }

    /// Interest since the last accrual, not yet booked anywhere.
    pub fn pending_interest(&self, now: i64) -> Result<u64> {
        if !self.has_debt() || self.last_accrual_timestamp == 0 {
            return Ok(0);
        }
        calculate_interest(self.principal, self.elapsed(now))
    }

    pub fn current_debt(&self, now: i64) -> Result<u64> {
        let debt = self.principal
            .checked_add(self.pending_interest(now)?)
            .ok_or(ProtocolError::MathOverflow)?;
        Ok(debt)
    }

    /// Book interest since the last accrual into the protocol aggregate and move
    /// the accrual point to `now`. Principal is left untouched.
    pub fn accrue(&mut self, now: i64, totals: &mut DebtTotals) -> Result<u64> {
        if !self.has_debt() || self.last_accrual_timestamp == 0 {
            self.last_accrual_timestamp = now;
            return Ok(0);
        }

        if self.elapsed(now) == 0 {
            return Ok(0);
        }

        let interest = self.pending_interest(now)?;
        totals.add_interest(interest)?;
        self.last_accrual_timestamp = now;
        Ok(interest)
    }

    pub fn increase_principal(&mut self, amount: u64, totals: &mut DebtTotals) -> Result<()> {
        self.principal = self.principal
            .checked_add(amount)
            .ok_or(ProtocolError::MathOverflow)?;
        totals.add_principal(amount)
    }

    /// Interest first, then principal; neither portion exceeds what is owed.
    pub fn split_repayment(&self, amount: u64, now: i64) -> Result<RepaymentSplit> {
        let accrued = self.current_debt(now)?.saturating_sub(self.principal);
        let interest = amount.min(accrued);
        let principal = (amount - interest).min(self.principal);
        Ok(RepaymentSplit { interest, principal })
    }

    /// Split for a user repayment, which may not exceed the current debt.
    pub fn repayment_for(&self, amount: u64, now: i64) -> Result<RepaymentSplit> {
        require!(
            amount <= self.current_debt(now)?,
            ProtocolError::ExcessiveRepayment
        );
        self.split_repayment(amount, now)
    }

    pub fn apply_repayment(&mut self, split: RepaymentSplit, totals: &mut DebtTotals) -> Result<()> {
        self.principal = self.principal
            .checked_sub(split.principal)
            .ok_or(ProtocolError::MathUnderflow)?;
        totals.sub_principal(split.principal)?;
        totals.sub_interest(split.interest)
    }
}

#[cfg(test)]
pub(crate) fn test_position(principal: u64, last_accrual_timestamp: i64) -> DebtPosition {
    DebtPosition {
        owner: Pubkey::new_unique(),
        principal,
        last_accrual_timestamp,
        bump: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::SECONDS_PER_YEAR;

    const T0: i64 = 1_700_000_000;
    const YEAR: i64 = SECONDS_PER_YEAR as i64;

    fn minted(principal: u64, totals: &mut DebtTotals) -> DebtPosition {
        let mut position = test_position(0, 0);
        position.accrue(T0, totals).unwrap();
        position.increase_principal(principal, totals).unwrap();
        position
    }

    #[test]
    fn test_first_touch_only_sets_timestamp() {
        let mut totals = DebtTotals::default();
        let mut position = test_position(0, 0);

        assert_eq!(position.accrue(T0, &mut totals).unwrap(), 0);
        assert_eq!(position.last_accrual_timestamp, T0);
        assert_eq!(totals, DebtTotals::default());
    }

    #[test]
    fn test_zero_principal_resets_timestamp() {
        let mut totals = DebtTotals::default();
        let mut position = test_position(0, T0);

        position.accrue(T0 + 500, &mut totals).unwrap();
        assert_eq!(position.last_accrual_timestamp, T0 + 500);
        assert_eq!(totals.total_interest_accrued, 0);
    }

    #[test]
    fn test_current_debt_matches_linear_formula() {
        let mut totals = DebtTotals::default();
        let position = minted(1_000_000_000, &mut totals);

        assert_eq!(position.current_debt(T0).unwrap(), 1_000_000_000);
        assert_eq!(position.current_debt(T0 + YEAR).unwrap(), 1_050_000_000);
        assert_eq!(position.current_debt(T0 + YEAR / 4).unwrap(), 1_012_500_000);
    }

    #[test]
    fn test_current_debt_is_monotonic() {
        let mut totals = DebtTotals::default();
        let position = minted(123_456_789, &mut totals);

        let mut previous = 0;
        for step in 0..50 {
            let debt = position.current_debt(T0 + step * 86_400 * 7).unwrap();
            assert!(debt >= previous);
            previous = debt;
        }
    }

    #[test]
    fn test_accrue_books_interest_globally() {
        let mut totals = DebtTotals::default();
        let mut position = minted(1_000_000_000, &mut totals);

        let interest = position.accrue(T0 + YEAR, &mut totals).unwrap();
        assert_eq!(interest, 50_000_000);
        assert_eq!(position.principal, 1_000_000_000);
        assert_eq!(position.last_accrual_timestamp, T0 + YEAR);
        assert_eq!(totals.total_interest_accrued, 50_000_000);
        assert_eq!(totals.total_principal, 1_000_000_000);

        // same timestamp again is a no-op
        assert_eq!(position.accrue(T0 + YEAR, &mut totals).unwrap(), 0);
        assert_eq!(totals.total_interest_accrued, 50_000_000);
    }

    #[test]
    fn test_split_interest_before_principal() {
        let mut totals = DebtTotals::default();
        let position = minted(1_000_000_000, &mut totals);
        let now = T0 + YEAR;

        let split = position.split_repayment(30_000_000, now).unwrap();
        assert_eq!(split, RepaymentSplit { interest: 30_000_000, principal: 0 });

        let split = position.split_repayment(150_000_000, now).unwrap();
        assert_eq!(split, RepaymentSplit { interest: 50_000_000, principal: 100_000_000 });
    }

    #[test]
    fn test_split_caps_at_principal() {
        let mut totals = DebtTotals::default();
        let position = minted(1_000, &mut totals);

        let split = position.split_repayment(5_000, T0).unwrap();
        assert_eq!(split, RepaymentSplit { interest: 0, principal: 1_000 });
        assert_eq!(split.total(), 1_000);
    }

    #[test]
    fn test_repayment_never_exceeds_debt() {
        let mut totals = DebtTotals::default();
        let mut position = minted(1_000, &mut totals);

        assert_eq!(
            position.repayment_for(5_000, T0).unwrap_err(),
            ProtocolError::ExcessiveRepayment.into()
        );

        let split = position.repayment_for(1_000, T0).unwrap();
        assert_eq!(split.total(), 1_000);
        position.apply_repayment(split, &mut totals).unwrap();
        assert!(!position.has_debt());
        assert_eq!(totals.total_principal, 0);
    }

    #[test]
    fn test_repayment_after_accrual_is_all_principal() {
        let mut totals = DebtTotals::default();
        let mut position = minted(1_000_000_000, &mut totals);
        let now = T0 + YEAR;

        position.accrue(now, &mut totals).unwrap();
        let split = position.repayment_for(100_000_000, now).unwrap();
        assert_eq!(split, RepaymentSplit { interest: 0, principal: 100_000_000 });
        assert_eq!(totals.total_interest_accrued, 50_000_000);
    }

    #[test]
    fn test_repayment_mirrors_totals() {
        let mut totals = DebtTotals::default();
        let mut position = minted(1_000_000_000, &mut totals);
        let mut other = minted(500_000_000, &mut totals);

        position.accrue(T0 + YEAR, &mut totals).unwrap();
        other.accrue(T0 + YEAR, &mut totals).unwrap();

        let split = position.split_repayment(400_000_000, T0 + YEAR).unwrap();
        position.apply_repayment(split, &mut totals).unwrap();

        assert_eq!(position.principal, 600_000_000);
        assert_eq!(
            totals.total_principal,
            (position.principal + other.principal) as u128
        );
        assert_eq!(totals.total_interest_accrued, 75_000_000 - split.interest as u128);
    }
}
