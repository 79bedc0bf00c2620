use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    Mint, TokenAccount, TokenInterface, TransferChecked, transfer_checked,
};
use cafe_storage::program::CafeStorage;
use cafe_storage::state::{Store, CUSTOMER_SEED, STORE_SEED};
use crate::instructions::store_access::{load_customer, StoreWriter};
use crate::rules;
use crate::state::{LogicConfig, SubscribedEvent, CONFIG_SEED, WRITER_SEED};

/// Pay one monthly fee into the vault
///
/// The payment must equal the configured fee exactly. Tokens move from the
/// customer to the vault first, then the store records the new balance;
/// either both happen or neither does.
pub fn subscribe(ctx: Context<Subscribe>, payment: u64) -> Result<()> {
    let clock = Clock::get()?;
    let customer = ctx.accounts.customer.key();

    let record = load_customer(&ctx.accounts.customer_record, &customer)?;
    let subscription_balance = rules::subscription(&ctx.accounts.config, &record, payment)?;

    let transfer_accounts = TransferChecked {
        from: ctx.accounts.customer_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        mint: ctx.accounts.mint.to_account_info(),
        authority: ctx.accounts.customer.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        transfer_accounts,
    );
    transfer_checked(cpi_ctx, payment, ctx.accounts.mint.decimals)?;

    ctx.accounts.store_writer().subscription_balance(
        &ctx.accounts.customer.to_account_info(),
        &ctx.accounts.customer_record.to_account_info(),
        subscription_balance,
    )?;

    emit!(SubscribedEvent {
        customer,
        payment,
        subscription_balance,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Subscribe<'info> {
    // ========== Caller ==========

    #[account(mut)]
    pub customer: Signer<'info>,

    // ========== Logic State ==========

    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Box<Account<'info, LogicConfig>>,

    // ========== Store ==========

    /// CHECK: Owned by the storage program, created on its first write
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

    #[account(
        mut,
        token::mint = mint,
        token::authority = customer,
    )]
    pub customer_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    // ========== Programs ==========

    pub storage_program: Program<'info, CafeStorage>,
    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> Subscribe<'info> {
    fn store_writer(&self) -> StoreWriter<'info> {
        StoreWriter::new(
            self.storage_program.to_account_info(),
            self.store.to_account_info(),
            self.writer.to_account_info(),
            self.customer.to_account_info(),
            self.system_program.to_account_info(),
            self.config.writer_bump,
        )
    }
}
