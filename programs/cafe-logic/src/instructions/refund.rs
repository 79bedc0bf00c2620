use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use cafe_storage::program::CafeStorage;
use cafe_storage::state::{Store, CUSTOMER_SEED, STORE_SEED};
use crate::instructions::store_access::{load_customer, StoreWriter};
use crate::rules;
use crate::state::{LogicConfig, RefundedEvent, CONFIG_SEED, WRITER_SEED};

/// Return a customer's whole subscription balance to the administrator
///
/// Only the subscription balance is zeroed. Payback balance and seat
/// assignment stay as they are. The record itself is never closed.
pub fn refund(ctx: Context<Refund>) -> Result<()> {
    let clock = Clock::get()?;
    let admin = ctx.accounts.admin.key();
    let customer = ctx.accounts.customer.key();

    let record = load_customer(&ctx.accounts.customer_record, &customer)?;
    let amount = rules::refund(&ctx.accounts.config, &admin, &record)?;

    let writer = ctx.accounts.store_writer();
    writer.release_funds(
        &ctx.accounts.mint.to_account_info(),
        &ctx.accounts.vault.to_account_info(),
        &ctx.accounts.admin_token_account.to_account_info(),
        &ctx.accounts.token_program.to_account_info(),
        amount,
    )?;
    writer.subscription_balance(
        &ctx.accounts.customer.to_account_info(),
        &ctx.accounts.customer_record.to_account_info(),
        0,
    )?;

    emit!(RefundedEvent {
        customer,
        recipient: admin,
        amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Refund<'info> {
    // ========== Caller ==========

    /// Must be the configured administrator (checked by the refund rule)
    #[account(mut)]
    pub admin: Signer<'info>,

    // ========== Logic State ==========

    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, LogicConfig>>,

    // ========== Store ==========

    /// Customer being refunded
    /// CHECK: Only the key is used, as the record seed
    pub customer: UncheckedAccount<'info>,

    /// CHECK: Owned by the storage program
    #[account(
        mut,
        seeds = [CUSTOMER_SEED, customer.key().as_ref()],
        bump,
        seeds::program = storage_program.key(),
    )]
    pub customer_record: UncheckedAccount<'info>,

    #[account(
        seeds = [STORE_SEED],
        bump = store.bump,
        seeds::program = storage_program.key(),
        has_one = mint,
        has_one = vault,
    )]
    pub store: Box<Account<'info, Store>>,

    /// CHECK: PDA signer for store writes
    #[account(seeds = [WRITER_SEED], bump = config.writer_bump)]
    pub writer: UncheckedAccount<'info>,

    // ========== Token Accounts ==========

    pub mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Administrator's token account (receives the refund)
    #[account(
        mut,
        token::mint = mint,
        token::authority = admin,
    )]
    pub admin_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    // ========== Programs ==========

    pub storage_program: Program<'info, CafeStorage>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> Refund<'info> {
    fn store_writer(&self) -> StoreWriter<'info> {
        StoreWriter::new(
            self.storage_program.to_account_info(),
            self.store.to_account_info(),
            self.writer.to_account_info(),
            self.admin.to_account_info(),
            self.system_program.to_account_info(),
            self.config.writer_bump,
        )
    }
}
