use anchor_lang::prelude::*;
use crate::errors::ProtocolError;

#[account]
#[derive(InitSpace)]
pub struct UserCollateral {
    pub owner: Pubkey,

    pub mint: Pubkey,

    /// Deposited amount (in native token units)
    pub amount: u64,

    pub bump: u8,
}

impl UserCollateral {
    pub const SEED_PREFIX: &'static [u8] = b"user_collateral";

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Fill in identity fields on an account created by `init_if_needed`.
    pub fn init_if_unset(&mut self, owner: Pubkey, mint: Pubkey, bump: u8) {
        if !self.is_initialized() {
            self.owner = owner;
            self.mint = mint;
            self.amount = 0;
            self.bump = bump;
        }
    }

    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        self.amount = self.amount
            .checked_add(amount)
            .ok_or(ProtocolError::MathOverflow)?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: u64) -> Result<()> {
        self.amount = self.balance_after_withdraw(amount)?;
        Ok(())
    }

    pub fn balance_after_withdraw(&self, amount: u64) -> Result<u64> {
        let remaining = self.amount
            .checked_sub(amount)
            .ok_or(ProtocolError::InsufficientCollateral)?;
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> UserCollateral {
        UserCollateral {
            owner: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            amount: 0,
            bump: 0,
        }
    }

    #[test]
    fn test_deposit_then_withdraw_restores_balance() {
        let mut balance = empty();
        balance.deposit(500).unwrap();
        balance.deposit(250).unwrap();
        balance.withdraw(750).unwrap();
        assert_eq!(balance.amount, 0);
    }

    #[test]
    fn test_withdraw_never_goes_negative() {
        let mut balance = empty();
        balance.deposit(100).unwrap();
        assert_eq!(
            balance.withdraw(101).unwrap_err(),
            ProtocolError::InsufficientCollateral.into()
        );
        assert_eq!(balance.amount, 100);
    }
}
