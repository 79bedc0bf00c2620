use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    Mint, TokenAccount, TokenInterface, TransferChecked, transfer_checked,
};
use crate::errors::StorageError;
use crate::state::{FundsReleasedEvent, Store, STORE_SEED};

/// Move tokens out of the subscription vault
///
/// The store PDA signs as vault authority. Only the registered writer may
/// ask for this; how much and to whom is the logic program's decision.
pub fn release_funds(ctx: Context<ReleaseFunds>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    require!(
        ctx.accounts.vault.amount >= amount,
        StorageError::InsufficientVaultBalance
    );

    let store_bump = ctx.accounts.store.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[STORE_SEED, &[store_bump]]];

    let transfer_accounts = TransferChecked {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.recipient.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.store.to_account_info(),
    };
    let transfer_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        transfer_accounts,
        signer_seeds,
    );
    transfer_checked(transfer_ctx, amount, ctx.accounts.mint.decimals)?;

    emit!(FundsReleasedEvent {
        recipient: ctx.accounts.recipient.key(),
        amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ReleaseFunds<'info> {
    #[account(
        seeds = [STORE_SEED],
        bump = store.bump,
        has_one = mint,
        has_one = vault,
        constraint = store.is_writer(&writer.key()) @ StorageError::Unauthorized,
    )]
    pub store: Account<'info, Store>,

    /// Writer PDA of the active logic program
    pub writer: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mut, token::mint = mint)]
    pub recipient: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}
