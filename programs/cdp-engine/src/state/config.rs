use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::utils::constants::MAX_COLLATERAL_TYPES;

/// Protocol-wide debt aggregates, kept in lockstep with every position update.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct DebtTotals {
    pub total_principal: u128,
    pub total_interest_accrued: u128,
}

impl DebtTotals {
    pub fn add_principal(&mut self, amount: u64) -> Result<()> {
        self.total_principal = self.total_principal
            .checked_add(amount as u128)
            .ok_or(ProtocolError::MathOverflow)?;
        Ok(())
    }

    pub fn sub_principal(&mut self, amount: u64) -> Result<()> {
        self.total_principal = self.total_principal
            .checked_sub(amount as u128)
            .ok_or(ProtocolError::MathUnderflow)?;
        Ok(())
    }

    pub fn add_interest(&mut self, amount: u64) -> Result<()> {
        self.total_interest_accrued = self.total_interest_accrued
            .checked_add(amount as u128)
            .ok_or(ProtocolError::MathOverflow)?;
        Ok(())
    }

    pub fn sub_interest(&mut self, amount: u64) -> Result<()> {
        self.total_interest_accrued = self.total_interest_accrued
            .checked_sub(amount as u128)
            .ok_or(ProtocolError::MathUnderflow)?;
        Ok(())
    }
}

#[account]
#[derive(InitSpace)]
pub struct Config {
    pub authority: Pubkey,

    /// Stable unit mint, a PDA whose mint authority is this account
    pub stable_mint: Pubkey,

    /// Every mint ever registered as collateral, in registration order
    #[max_len(MAX_COLLATERAL_TYPES)]
    pub collateral_assets: Vec<Pubkey>,

    pub totals: DebtTotals,

    /// Set while a state-mutating instruction is running
    pub locked: bool,

    pub bump: u8,
    pub stable_mint_bump: u8,
}

impl Config {
    pub const SEED_PREFIX: &'static [u8] = b"config";

    pub fn is_known_asset(&self, mint: &Pubkey) -> bool {
        self.collateral_assets.contains(mint)
    }

    /// Returns true when the mint was not known before.
    pub fn add_collateral_asset(&mut self, mint: Pubkey) -> Result<bool> {
        if self.is_known_asset(&mint) {
            return Ok(false);
        }
        require!(
            self.collateral_assets.len() < MAX_COLLATERAL_TYPES,
            ProtocolError::TooManyCollateralTypes
        );
        self.collateral_assets.push(mint);
        Ok(true)
    }

    pub fn enter(&mut self) -> Result<()> {
        require!(!self.locked, ProtocolError::Reentrancy);
        self.locked = true;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.locked = false;
    }

    pub fn signer_seeds(&self) -> [&[u8]; 2] {
        [Self::SEED_PREFIX, std::slice::from_ref(&self.bump)]
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        authority: Pubkey::new_unique(),
        stable_mint: Pubkey::new_unique(),
        collateral_assets: Vec::new(),
        totals: DebtTotals::default(),
        locked: false,
        bump: 255,
        stable_mint_bump: 254,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_collateral_asset_is_additive() {
        let mut config = test_config();
        let mint = Pubkey::new_unique();

        assert!(config.add_collateral_asset(mint).unwrap());
        assert!(!config.add_collateral_asset(mint).unwrap());
        assert_eq!(config.collateral_assets, vec![mint]);
    }

    #[test]
    fn test_registry_is_bounded() {
        let mut config = test_config();
        for _ in 0..MAX_COLLATERAL_TYPES {
            config.add_collateral_asset(Pubkey::new_unique()).unwrap();
        }
        assert_eq!(
            config.add_collateral_asset(Pubkey::new_unique()).unwrap_err(),
            ProtocolError::TooManyCollateralTypes.into()
        );
        // re-registering a known mint still succeeds when full
        let known = config.collateral_assets[0];
        assert!(!config.add_collateral_asset(known).unwrap());
    }

    #[test]
    fn test_lock_rejects_nested_entry() {
        let mut config = test_config();
        config.enter().unwrap();
        assert_eq!(config.enter().unwrap_err(), ProtocolError::Reentrancy.into());

        config.leave();
        assert!(config.enter().is_ok());
    }

    #[test]
    fn test_totals_underflow() {
        let mut totals = DebtTotals::default();
        totals.add_principal(10).unwrap();
        assert_eq!(totals.sub_principal(11).unwrap_err(), ProtocolError::MathUnderflow.into());
        assert_eq!(totals.sub_interest(1).unwrap_err(), ProtocolError::MathUnderflow.into());
    }
}
