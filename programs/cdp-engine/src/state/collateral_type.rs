use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::utils::constants::BPS_DENOMINATOR;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct CollateralTypeInfo {
    pub price_reference: Pubkey,
    pub asset_is_first_in_pool: bool,
    pub liquidation_threshold_bps: u16,
}

#[account]
#[derive(InitSpace, Debug)]
pub struct CollateralType {
    /// Collateral token mint
    pub mint: Pubkey,

    /// Price pool quoting this collateral. `Pubkey::default()` means never registered.
    pub price_reference: Pubkey,

    /// Whether the collateral is the first of the pool's two assets
    pub asset_is_first_in_pool: bool,

    /// Liquidation threshold (basis points, 15000 = 150%)
    pub liquidation_threshold_bps: u16,

    pub bump: u8,
}

impl CollateralType {
    pub const SEED_PREFIX: &'static [u8] = b"collateral_type";

    pub fn is_registered(&self) -> bool {
        self.price_reference != Pubkey::default()
    }

    /// Read the registry entry behind `info`. An account that was never created
    /// means the mint was never registered.
    pub fn load(info: &AccountInfo) -> Result<Self> {
        require!(
            !info.data_is_empty() && info.owner == &crate::ID,
            ProtocolError::UnknownAsset
        );
        let data = info.try_borrow_data()?;
        let collateral_type = Self::try_deserialize(&mut data.as_ref())?;
        require!(collateral_type.is_registered(), ProtocolError::UnknownAsset);
        Ok(collateral_type)
    }

    pub fn info(&self) -> Result<CollateralTypeInfo> {
        require!(self.is_registered(), ProtocolError::UnknownAsset);
        Ok(CollateralTypeInfo {
            price_reference: self.price_reference,
            asset_is_first_in_pool: self.asset_is_first_in_pool,
            liquidation_threshold_bps: self.liquidation_threshold_bps,
        })
    }

    /// Record or overwrite the pricing parameters. Returns true on first registration.
    pub fn apply(&mut self, mint: Pubkey, info: CollateralTypeInfo, bump: u8) -> Result<bool> {
        require!(
            info.price_reference != Pubkey::default(),
            ProtocolError::InvalidPriceReference
        );
        validate_threshold(info.liquidation_threshold_bps)?;

        let is_new = !self.is_registered();
        self.mint = mint;
        self.price_reference = info.price_reference;
        self.asset_is_first_in_pool = info.asset_is_first_in_pool;
        self.liquidation_threshold_bps = info.liquidation_threshold_bps;
        self.bump = bump;
        Ok(is_new)
    }

    pub fn set_liquidation_threshold(&mut self, threshold_bps: u16) -> Result<u16> {
        require!(self.is_registered(), ProtocolError::UnknownAsset);
        validate_threshold(threshold_bps)?;
        let previous = self.liquidation_threshold_bps;
        self.liquidation_threshold_bps = threshold_bps;
        Ok(previous)
    }
}

pub fn validate_threshold(threshold_bps: u16) -> Result<()> {
    require!(
        threshold_bps >= BPS_DENOMINATOR,
        ProtocolError::InvalidLiquidationThreshold
    );
    Ok(())
}
