use anchor_lang::prelude::*;

#[error_code]
pub enum ProtocolError {
    #[msg("Unauthorized: only protocol authority can perform this action")]
    Unauthorized,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Asset is not registered as collateral")]
    UnknownAsset,

    #[msg("Collateral registry is full")]
    TooManyCollateralTypes,

    #[msg("Price reference must be set")]
    InvalidPriceReference,

    #[msg("Liquidation threshold must be at least 100%")]
    InvalidLiquidationThreshold,

    #[msg("Price reference returned an invalid price")]
    PriceUnavailable,

    #[msg("Collateral balance is insufficient")]
    InsufficientCollateral,

    #[msg("Health factor is below the minimum")]
    HealthFactorBroken,

    #[msg("Position is still healthy and cannot be liquidated")]
    HealthFactorOk,

    #[msg("Liquidation did not improve the health factor")]
    HealthFactorNotImproved,

    #[msg("Amount to cover exceeds the outstanding debt")]
    ExcessiveRepayment,

    #[msg("Collateral transfer failed")]
    TransferFailed,

    #[msg("Stable unit issuance failed")]
    MintFailed,

    #[msg("Operation already in progress")]
    Reentrancy,

    #[msg("Expected three portfolio accounts per registered collateral")]
    AccountsLengthMismatch,

    #[msg("Portfolio account does not match the registry")]
    InvalidPortfolioAccount,

    #[msg("Position owner mismatch")]
    InvalidOwner,

    #[msg("Math overflow occurred")]
    MathOverflow,

    #[msg("Math underflow occurred")]
    MathUnderflow,
}
