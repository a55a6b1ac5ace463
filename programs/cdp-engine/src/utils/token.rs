use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    self, Burn, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
};
use crate::errors::ProtocolError;
use crate::state::Config;

/// Move collateral from the user into the per-mint vault.
pub fn transfer_to_vault<'info>(
    token_program: &Interface<'info, TokenInterface>,
    mint: &InterfaceAccount<'info, Mint>,
    from: &InterfaceAccount<'info, TokenAccount>,
    vault: &AccountInfo<'info>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    let transfer_accounts = TransferChecked {
        from: from.to_account_info(),
        mint: mint.to_account_info(),
        to: vault.clone(),
        authority: authority.to_account_info(),
    };

    let cpi_ctx = CpiContext::new(token_program.to_account_info(), transfer_accounts);

    token_interface::transfer_checked(cpi_ctx, amount, mint.decimals).map_err(|e| {
        msg!("Collateral deposit failed: {}", e);
        error!(ProtocolError::TransferFailed)
    })
}

/// Release collateral from the vault, signed by the config PDA.
pub fn transfer_from_vault<'info>(
    token_program: &Interface<'info, TokenInterface>,
    mint: &InterfaceAccount<'info, Mint>,
    vault: &AccountInfo<'info>,
    to: &InterfaceAccount<'info, TokenAccount>,
    config: &Account<'info, Config>,
    amount: u64,
) -> Result<()> {
    let seeds = config.signer_seeds();
    let signer_seeds: &[&[&[u8]]] = &[&seeds];

    let transfer_accounts = TransferChecked {
        from: vault.clone(),
        mint: mint.to_account_info(),
        to: to.to_account_info(),
        authority: config.to_account_info(),
    };

    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        transfer_accounts,
        signer_seeds,
    );

    token_interface::transfer_checked(cpi_ctx, amount, mint.decimals).map_err(|e| {
        msg!("Collateral withdrawal failed: {}", e);
        error!(ProtocolError::TransferFailed)
    })
}

/// Issue stable units to `to`. Only the config PDA can sign for the mint.
pub fn issue_stable<'info>(
    token_program: &Interface<'info, TokenInterface>,
    stable_mint: &InterfaceAccount<'info, Mint>,
    to: &InterfaceAccount<'info, TokenAccount>,
    config: &Account<'info, Config>,
    amount: u64,
) -> Result<()> {
    let seeds = config.signer_seeds();
    let signer_seeds: &[&[&[u8]]] = &[&seeds];

    let mint_accounts = MintTo {
        mint: stable_mint.to_account_info(),
        to: to.to_account_info(),
        authority: config.to_account_info(),
    };

    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        mint_accounts,
        signer_seeds,
    );

    token_interface::mint_to(cpi_ctx, amount).map_err(|e| {
        msg!("Stable issuance failed: {}", e);
        error!(ProtocolError::MintFailed)
    })
}

/// Pull stable units from `from` and retire them.
pub fn retire_stable<'info>(
    token_program: &Interface<'info, TokenInterface>,
    stable_mint: &InterfaceAccount<'info, Mint>,
    from: &InterfaceAccount<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    let burn_accounts = Burn {
        mint: stable_mint.to_account_info(),
        from: from.to_account_info(),
        authority: authority.to_account_info(),
    };

    let cpi_ctx = CpiContext::new(token_program.to_account_info(), burn_accounts);

    token_interface::burn(cpi_ctx, amount).map_err(|e| {
        msg!("Stable retirement failed: {}", e);
        error!(ProtocolError::TransferFailed)
    })
}
