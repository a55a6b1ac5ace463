use anchor_lang::prelude::*;
use crate::state::{CollateralType, CollateralTypeInfo, Config, DebtPosition, DebtTotals, UserCollateral};
use crate::utils::{load_portfolio, price_from_sqrt_price, read_sqrt_price, ANNUAL_INTEREST_RATE};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebtInfo {
    pub principal: u64,
    pub pending_interest: u64,
    pub current_debt: u64,
    pub last_accrual_timestamp: i64,
}

/// Deserialize a program-owned account, or `None` if it was never created.
fn load_optional<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() || info.owner != &crate::ID {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    Ok(Some(T::try_deserialize(&mut data.as_ref())?))
}

#[derive(Accounts)]
pub struct ViewPosition<'info> {
    #[account(
        seeds = [Config::SEED_PREFIX],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// CHECK: position owner, only used as a PDA seed
    pub user: UncheckedAccount<'info>,

    /// CHECK: may not exist yet; deserialized only when program-owned
    #[account(
        seeds = [DebtPosition::SEED_PREFIX, user.key().as_ref()],
        bump,
    )]
    pub debt_position: UncheckedAccount<'info>,
}

impl<'info> ViewPosition<'info> {
    fn position(&self) -> Result<Option<DebtPosition>> {
        load_optional(&self.debt_position.to_account_info())
    }

    pub fn get_current_debt(&self) -> Result<u64> {
        let now = Clock::get()?.unix_timestamp;
        match self.position()? {
            Some(position) => position.current_debt(now),
            None => Ok(0),
        }
    }

    pub fn get_user_debt_info(&self) -> Result<DebtInfo> {
        let now = Clock::get()?.unix_timestamp;
        let Some(position) = self.position()? else {
            return Ok(DebtInfo::default());
        };
        Ok(DebtInfo {
            principal: position.principal,
            pending_interest: position.pending_interest(now)?,
            current_debt: position.current_debt(now)?,
            last_accrual_timestamp: position.last_accrual_timestamp,
        })
    }

    pub fn get_health_factor(&self, portfolio_accounts: &[AccountInfo<'info>]) -> Result<u128> {
        let debt = self.get_current_debt()?;
        let portfolio = load_portfolio(&self.config, &self.user.key(), portfolio_accounts)?;
        portfolio.health_factor(debt)
    }
}

#[derive(Accounts)]
pub struct ViewUserCollateral<'info> {
    /// CHECK: only used as a PDA seed
    pub user: UncheckedAccount<'info>,

    /// CHECK: only used as a PDA seed
    pub mint: UncheckedAccount<'info>,

    /// CHECK: may not exist yet; deserialized only when program-owned
    #[account(
        seeds = [UserCollateral::SEED_PREFIX, user.key().as_ref(), mint.key().as_ref()],
        bump,
    )]
    pub user_collateral: UncheckedAccount<'info>,
}

impl<'info> ViewUserCollateral<'info> {
    pub fn get_user_collateral(&self) -> Result<u64> {
        let balance = load_optional::<UserCollateral>(&self.user_collateral.to_account_info())?
            .map(|collateral| collateral.amount)
            .unwrap_or(0);
        Ok(balance)
    }
}

#[derive(Accounts)]
pub struct ViewConfig<'info> {
    #[account(
        seeds = [Config::SEED_PREFIX],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> ViewConfig<'info> {
    pub fn get_known_collateral_assets(&self) -> Result<Vec<Pubkey>> {
        Ok(self.config.collateral_assets.clone())
    }

    pub fn get_total_debt(&self) -> Result<DebtTotals> {
        Ok(self.config.totals)
    }

    pub fn get_annual_interest_rate(&self) -> Result<u128> {
        Ok(ANNUAL_INTEREST_RATE)
    }
}

#[derive(Accounts)]
#[instruction(mint: Pubkey)]
pub struct ViewCollateralType<'info> {
    /// CHECK: registry entry for `mint`, read with `CollateralType::load`
    #[account(
        seeds = [CollateralType::SEED_PREFIX, mint.as_ref()],
        bump,
    )]
    pub collateral_type: UncheckedAccount<'info>,
}

impl<'info> ViewCollateralType<'info> {
    pub fn get_collateral_type_info(&self) -> Result<CollateralTypeInfo> {
        CollateralType::load(&self.collateral_type)?.info()
    }
}

#[derive(Accounts)]
#[instruction(mint: Pubkey)]
pub struct ViewTokenPrice<'info> {
    /// CHECK: registry entry for `mint`, read with `CollateralType::load`
    #[account(
        seeds = [CollateralType::SEED_PREFIX, mint.as_ref()],
        bump,
    )]
    pub collateral_type: UncheckedAccount<'info>,

    /// CHECK: validated against the registered price reference
    pub price_pool: UncheckedAccount<'info>,
}

impl<'info> ViewTokenPrice<'info> {
    /// Unit price of one base unit of collateral, in stable base units scaled by 1e18.
    pub fn get_token_price(&self) -> Result<u128> {
        let collateral_type = CollateralType::load(&self.collateral_type)?;
        let sqrt_price_x96 = read_sqrt_price(&collateral_type, &self.price_pool)?;
        price_from_sqrt_price(sqrt_price_x96, collateral_type.asset_is_first_in_pool)
    }
}
