pub mod config;
pub mod collateral_type;
pub mod user_collateral;
pub mod debt_position;
pub mod price_pool;

pub use config::*;
pub use collateral_type::*;
pub use user_collateral::*;
pub use debt_position::*;
pub use price_pool::*;

#[cfg(test)]
pub(crate) mod fixtures {
    use anchor_lang::prelude::*;

    /// Owned backing storage for an `AccountInfo` in unit tests.
    pub struct TestAccount {
        pub key: Pubkey,
        pub owner: Pubkey,
        pub lamports: u64,
        pub data: Vec<u8>,
    }

    impl TestAccount {
        pub fn empty(key: Pubkey) -> Self {
            Self { key, owner: Pubkey::default(), lamports: 0, data: Vec::new() }
        }

        /// Allocated by this program but not serialized yet.
        pub fn zeroed(key: Pubkey, len: usize) -> Self {
            Self { key, owner: crate::ID, lamports: 1, data: vec![0; len] }
        }

        pub fn owned_by<T: AccountSerialize>(key: Pubkey, owner: Pubkey, account: &T) -> Self {
            let mut data = Vec::new();
            account.try_serialize(&mut data).unwrap();
            Self { key, owner, lamports: 1, data }
        }

        pub fn program<T: AccountSerialize>(key: Pubkey, account: &T) -> Self {
            Self::owned_by(key, crate::ID, account)
        }

        pub fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                false,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }
}
