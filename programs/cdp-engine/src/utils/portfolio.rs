use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::state::{CollateralType, Config, UserCollateral};
use crate::utils::constants::PORTFOLIO_ACCOUNTS_PER_ASSET;
use crate::utils::health::{CollateralHolding, Portfolio};
use crate::utils::oracle::read_sqrt_price;

/// Build a user's portfolio from `remaining_accounts`.
///
/// Expects `[collateral_type, price_pool, user_collateral]` for every registered
/// asset, in registry order. A user collateral PDA that was never created counts
/// as a zero balance.
pub fn load_portfolio(
    config: &Config,
    owner: &Pubkey,
    accounts: &[AccountInfo],
) -> Result<Portfolio> {
    require!(
        accounts.len() == config.collateral_assets.len() * PORTFOLIO_ACCOUNTS_PER_ASSET,
        ProtocolError::AccountsLengthMismatch
    );

    let holdings = config
        .collateral_assets
        .iter()
        .zip(accounts.chunks_exact(PORTFOLIO_ACCOUNTS_PER_ASSET))
        .map(|(mint, chunk)| load_holding(mint, owner, &chunk[0], &chunk[1], &chunk[2]))
        .collect::<Result<Vec<_>>>()?;

    Ok(Portfolio::new(holdings))
}

fn load_holding(
    mint: &Pubkey,
    owner: &Pubkey,
    collateral_type_info: &AccountInfo,
    price_pool_info: &AccountInfo,
    user_collateral_info: &AccountInfo,
) -> Result<CollateralHolding> {
    let (collateral_type_key, _) = Pubkey::find_program_address(
        &[CollateralType::SEED_PREFIX, mint.as_ref()],
        &crate::ID,
    );
    require!(
        collateral_type_info.key() == collateral_type_key
            && collateral_type_info.owner == &crate::ID,
        ProtocolError::InvalidPortfolioAccount
    );
    let collateral_type = CollateralType::load(collateral_type_info)?;

    let sqrt_price_x96 = read_sqrt_price(&collateral_type, price_pool_info)?;

    let (user_collateral_key, _) = Pubkey::find_program_address(
        &[UserCollateral::SEED_PREFIX, owner.as_ref(), mint.as_ref()],
        &crate::ID,
    );
    require!(
        user_collateral_info.key() == user_collateral_key,
        ProtocolError::InvalidPortfolioAccount
    );

    let balance = if user_collateral_info.data_is_empty() {
        0
    } else {
        require!(
            user_collateral_info.owner == &crate::ID,
            ProtocolError::InvalidPortfolioAccount
        );
        let data = user_collateral_info.try_borrow_data()?;
        if data.iter().take(8).all(|byte| *byte == 0) {
            // created earlier in this instruction, not serialized yet
            0
        } else {
            UserCollateral::try_deserialize(&mut data.as_ref())?.amount
        }
    };

    Ok(CollateralHolding {
        mint: *mint,
        sqrt_price_x96,
        asset_is_first_in_pool: collateral_type.asset_is_first_in_pool,
        balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::config::test_config;
    use crate::state::fixtures::TestAccount;
    use crate::state::PricePool;

    const Q96: u128 = 1 << 96;

    struct Asset {
        mint: Pubkey,
        collateral_type: TestAccount,
        price_pool: TestAccount,
        user_collateral: TestAccount,
    }

    fn user_collateral_key(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(
            &[UserCollateral::SEED_PREFIX, owner.as_ref(), mint.as_ref()],
            &crate::ID,
        )
        .0
    }

    fn asset(owner: &Pubkey, balance: Option<u64>) -> Asset {
        let mint = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let (collateral_type_key, bump) = Pubkey::find_program_address(
            &[CollateralType::SEED_PREFIX, mint.as_ref()],
            &crate::ID,
        );

        let collateral_type = CollateralType {
            mint,
            price_reference: pool,
            asset_is_first_in_pool: false,
            liquidation_threshold_bps: 15_000,
            bump,
        };
        let price_pool = PricePool {
            authority: Pubkey::new_unique(),
            sqrt_price_x96: Q96,
            last_updated: 0,
            bump: 0,
        };

        let user_collateral_key = user_collateral_key(owner, &mint);
        let user_collateral = match balance {
            Some(amount) => TestAccount::program(
                user_collateral_key,
                &UserCollateral { owner: *owner, mint, amount, bump: 0 },
            ),
            None => TestAccount::empty(user_collateral_key),
        };

        Asset {
            mint,
            collateral_type: TestAccount::program(collateral_type_key, &collateral_type),
            price_pool: TestAccount::program(pool, &price_pool),
            user_collateral,
        }
    }

    fn config_for(assets: &[Asset]) -> Config {
        let mut config = test_config();
        for asset in assets {
            config.add_collateral_asset(asset.mint).unwrap();
        }
        config
    }

    fn infos(assets: &mut [Asset]) -> Vec<AccountInfo<'_>> {
        let mut infos = Vec::new();
        for asset in assets.iter_mut() {
            infos.push(asset.collateral_type.info());
            infos.push(asset.price_pool.info());
            infos.push(asset.user_collateral.info());
        }
        infos
    }

    #[test]
    fn test_loads_balances_in_registry_order() {
        let owner = Pubkey::new_unique();
        let mut assets = vec![asset(&owner, Some(500)), asset(&owner, None)];
        let config = config_for(&assets);
        let mints: Vec<Pubkey> = assets.iter().map(|asset| asset.mint).collect();

        let portfolio = load_portfolio(&config, &owner, &infos(&mut assets)).unwrap();
        assert_eq!(portfolio.holdings.len(), 2);
        assert_eq!(portfolio.balance_of(&mints[0]).unwrap(), 500);
        assert_eq!(portfolio.balance_of(&mints[1]).unwrap(), 0);
        assert_eq!(portfolio.collateral_value().unwrap(), 500);
    }

    #[test]
    fn test_balance_created_in_same_instruction_is_zero() {
        let owner = Pubkey::new_unique();
        let mut assets = vec![asset(&owner, Some(500))];
        let key = assets[0].user_collateral.key;
        assets[0].user_collateral = TestAccount::zeroed(key, 8 + UserCollateral::INIT_SPACE);
        let config = config_for(&assets);
        let mint = assets[0].mint;

        let portfolio = load_portfolio(&config, &owner, &infos(&mut assets)).unwrap();
        assert_eq!(portfolio.balance_of(&mint).unwrap(), 0);
    }

    #[test]
    fn test_requires_three_accounts_per_asset() {
        let owner = Pubkey::new_unique();
        let mut assets = vec![asset(&owner, Some(1)), asset(&owner, Some(2))];
        let config = config_for(&assets);

        let accounts = infos(&mut assets);
        assert_eq!(
            load_portfolio(&config, &owner, &accounts[..5]).unwrap_err(),
            ProtocolError::AccountsLengthMismatch.into()
        );
    }

    #[test]
    fn test_rejects_foreign_collateral_type() {
        let owner = Pubkey::new_unique();
        let mut assets = vec![asset(&owner, Some(1))];
        assets[0].collateral_type.owner = Pubkey::new_unique();
        let config = config_for(&assets);

        assert_eq!(
            load_portfolio(&config, &owner, &infos(&mut assets)).unwrap_err(),
            ProtocolError::InvalidPortfolioAccount.into()
        );
    }

    #[test]
    fn test_rejects_foreign_price_pool() {
        let owner = Pubkey::new_unique();
        let mut assets = vec![asset(&owner, Some(1))];
        assets[0].price_pool.owner = Pubkey::new_unique();
        let config = config_for(&assets);

        assert_eq!(
            load_portfolio(&config, &owner, &infos(&mut assets)).unwrap_err(),
            ProtocolError::InvalidPriceReference.into()
        );
    }

    #[test]
    fn test_rejects_price_pool_other_than_reference() {
        let owner = Pubkey::new_unique();
        let mut assets = vec![asset(&owner, Some(1))];
        assets[0].price_pool.key = Pubkey::new_unique();
        let config = config_for(&assets);

        assert_eq!(
            load_portfolio(&config, &owner, &infos(&mut assets)).unwrap_err(),
            ProtocolError::InvalidPriceReference.into()
        );
    }

    #[test]
    fn test_rejects_another_users_balance() {
        let owner = Pubkey::new_unique();
        let mut assets = vec![asset(&owner, Some(1_000))];
        let config = config_for(&assets);

        assert_eq!(
            load_portfolio(&config, &Pubkey::new_unique(), &infos(&mut assets)).unwrap_err(),
            ProtocolError::InvalidPortfolioAccount.into()
        );
    }
}
