use anchor_lang::prelude::*;
use crate::errors::StorageError;
use crate::state::{CustomerRecord, Store, CUSTOMER_SEED, STORE_SEED};

// Per-field setters on a customer record. None of them interpret the value
// they store; the active logic program owns every rule.

pub fn write_subscription_balance(ctx: Context<WriteCustomerField>, amount: u64) -> Result<()> {
    let record = ctx.accounts.claimed_record(ctx.bumps.customer_record);
    record.subscription_balance = amount;
    Ok(())
}

pub fn write_payback_balance(ctx: Context<WriteCustomerField>, amount: u64) -> Result<()> {
    let record = ctx.accounts.claimed_record(ctx.bumps.customer_record);
    record.payback_balance = amount;
    Ok(())
}

pub fn write_attendance(
    ctx: Context<WriteCustomerField>,
    continuous_days: u32,
    last_check_in_day: i64,
) -> Result<()> {
    let record = ctx.accounts.claimed_record(ctx.bumps.customer_record);
    record.continuous_attendance_days = continuous_days;
    record.last_check_in_day = last_check_in_day;
    Ok(())
}

pub fn write_assigned_seat(ctx: Context<WriteCustomerField>, seat_number: u32) -> Result<()> {
    let record = ctx.accounts.claimed_record(ctx.bumps.customer_record);
    record.assigned_seat = seat_number;
    Ok(())
}

#[derive(Accounts)]
pub struct WriteCustomerField<'info> {
    #[account(
        seeds = [STORE_SEED],
        bump = store.bump,
        constraint = store.is_writer(&writer.key()) @ StorageError::Unauthorized,
    )]
    pub store: Account<'info, Store>,

    /// Writer PDA of the active logic program
    pub writer: Signer<'info>,

    /// Customer the record belongs to
    /// CHECK: Only the key is used, as the record seed
    pub customer: UncheckedAccount<'info>,

    /// Created on the first write that touches this customer
    #[account(
        init_if_needed,
        payer = payer,
        space = CustomerRecord::SIZE,
        seeds = [CUSTOMER_SEED, customer.key().as_ref()],
        bump
    )]
    pub customer_record: Account<'info, CustomerRecord>,

    /// Pays rent if the record is created (the acting caller)
    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> WriteCustomerField<'info> {
    fn claimed_record(&mut self, bump: u8) -> &mut Account<'info, CustomerRecord> {
        let customer = self.customer.key();
        self.customer_record.claim(customer, bump);
        &mut self.customer_record
    }
}
