use anchor_lang::prelude::*;
use crate::state::Config;

/// Take the operation lock and write it to account data before any CPI runs,
/// so a nested invocation of this program sees it.
pub fn acquire_lock(config: &mut Account<Config>) -> Result<()> {
    config.enter()?;
    config.exit(&crate::ID)
}

pub fn release_lock(config: &mut Account<Config>) {
    config.leave();
}
