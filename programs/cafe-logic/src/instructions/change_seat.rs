use anchor_lang::prelude::*;
use cafe_storage::program::CafeStorage;
use cafe_storage::state::{SeatRecord, Store, CUSTOMER_SEED, NO_SEAT, SEAT_SEED, STORE_SEED};
use crate::errors::LogicError;
use crate::instructions::store_access::{load_customer, load_seat, StoreWriter};
use crate::rules;
use crate::state::{LogicConfig, SeatChangedEvent, CONFIG_SEED, WRITER_SEED};

/// Move a customer from their current seat to a free one
///
/// Releases the old seat, occupies the new one and repoints the customer in
/// one instruction. If any write fails the whole move is rolled back, so
/// nobody observes the customer holding zero or two seats.
pub fn change_seat(ctx: Context<ChangeSeat>, new_seat_number: u32) -> Result<()> {
    let clock = Clock::get()?;
    let customer = ctx.accounts.customer.key();

    let record = load_customer(&ctx.accounts.customer_record, &customer)?;

    // Current seat record is addressed by the stored assignment, not by an argument
    let current_seat = if record.has_seat() {
        let (expected, _) = SeatRecord::address(record.assigned_seat);
        require_keys_eq!(
            ctx.accounts.current_seat_record.key(),
            expected,
            LogicError::SeatRecordMismatch
        );
        load_seat(&ctx.accounts.current_seat_record, record.assigned_seat)?
    } else {
        SeatRecord::vacant(NO_SEAT)
    };
    let new_seat = load_seat(&ctx.accounts.new_seat_record, new_seat_number)?;

    let from_seat = rules::seat_change(&record, &current_seat, &new_seat, new_seat_number)?;

    let writer = ctx.accounts.store_writer();
    writer.seat_occupant(
        &ctx.accounts.current_seat_record.to_account_info(),
        from_seat,
        Pubkey::default(),
    )?;
    writer.seat_occupant(
        &ctx.accounts.new_seat_record.to_account_info(),
        new_seat_number,
        customer,
    )?;
    writer.assigned_seat(
        &ctx.accounts.customer.to_account_info(),
        &ctx.accounts.customer_record.to_account_info(),
        new_seat_number,
    )?;

    emit!(SeatChangedEvent {
        customer,
        from_seat,
        to_seat: new_seat_number,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(new_seat_number: u32)]
pub struct ChangeSeat<'info> {
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

    /// Seat the customer holds now
    /// CHECK: Address checked against the customer's assigned seat in the handler
    #[account(mut)]
    pub current_seat_record: UncheckedAccount<'info>,

    /// CHECK: Owned by the storage program, created on its first write
    #[account(
        mut,
        seeds = [SEAT_SEED, &new_seat_number.to_le_bytes()],
        bump,
        seeds::program = storage_program.key(),
    )]
    pub new_seat_record: UncheckedAccount<'info>,

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

impl<'info> ChangeSeat<'info> {
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
