use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::layout::LAYOUT_VERSION;
use crate::state::{Store, StoreInitializedEvent, STORE_SEED, VAULT_SEED};

/// Create the store authority and the subscription vault
///
/// The writer starts unset: no record can be written until the admin
/// registers a logic program with `set_writer`.
pub fn initialize_store(ctx: Context<InitializeStore>) -> Result<()> {
    let store = &mut ctx.accounts.store;
    let clock = Clock::get()?;

    store.admin = ctx.accounts.admin.key();
    store.writer = Pubkey::default();
    store.mint = ctx.accounts.mint.key();
    store.vault = ctx.accounts.vault.key();
    store.layout_version = LAYOUT_VERSION;
    store.writer_layout_version = 0;
    store.bump = ctx.bumps.store;
    store.vault_bump = ctx.bumps.vault;

    emit!(StoreInitializedEvent {
        admin: store.admin,
        mint: store.mint,
        vault: store.vault,
        layout_version: store.layout_version,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeStore<'info> {
    #[account(
        init,
        payer = admin,
        space = Store::SIZE,
        seeds = [STORE_SEED],
        bump
    )]
    pub store: Account<'info, Store>,

    /// Mint subscriptions are paid in
    pub mint: InterfaceAccount<'info, Mint>,

    /// Vault token account (store PDA is its authority)
    /// Seeds: ["vault"]
    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = store,
        token::token_program = token_program,
        seeds = [VAULT_SEED],
        bump
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}
