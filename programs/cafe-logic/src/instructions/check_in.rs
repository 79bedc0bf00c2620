use anchor_lang::prelude::*;
use cafe_storage::program::CafeStorage;
use cafe_storage::state::{Store, CUSTOMER_SEED, STORE_SEED};
use crate::instructions::store_access::{load_customer, StoreWriter};
use crate::rules;
use crate::state::{day_index, CheckedInEvent, LogicConfig, CONFIG_SEED, WRITER_SEED};

/// Record today's attendance and credit the streak reward
///
/// One check-in per day; a repeat on the same day fails with
/// `AlreadyCheckedIn` and leaves the record untouched.
pub fn check_in(ctx: Context<CheckIn>, at_location: bool) -> Result<()> {
    let clock = Clock::get()?;
    let customer = ctx.accounts.customer.key();
    let today = day_index(clock.unix_timestamp);

    let record = load_customer(&ctx.accounts.customer_record, &customer)?;
    let outcome = rules::check_in(&ctx.accounts.config, &record, at_location, today)?;

    let writer = ctx.accounts.store_writer();
    let customer_info = ctx.accounts.customer.to_account_info();
    let record_info = ctx.accounts.customer_record.to_account_info();

    writer.attendance(&customer_info, &record_info, outcome.streak, outcome.day)?;
    if outcome.reward > 0 {
        writer.payback_balance(&customer_info, &record_info, outcome.payback_balance)?;
    }

    emit!(CheckedInEvent {
        customer,
        day: outcome.day,
        continuous_attendance_days: outcome.streak,
        reward: outcome.reward,
        payback_balance: outcome.payback_balance,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CheckIn<'info> {
    #[account(mut)]
    pub customer: Signer<'info>,

    #[account(seeds = [CONFIG_SEED], bump = config.bump)]
    pub config: Account<'info, LogicConfig>,

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
    )]
    pub store: Account<'info, Store>,

    /// CHECK: PDA signer for store writes
    #[account(seeds = [WRITER_SEED], bump = config.writer_bump)]
    pub writer: UncheckedAccount<'info>,

    pub storage_program: Program<'info, CafeStorage>,
    pub system_program: Program<'info, System>,
}

impl<'info> CheckIn<'info> {
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
