use anchor_lang::prelude::*;
use cafe_storage::program::CafeStorage;
use cafe_storage::state::{Store, CUSTOMER_SEED, SEAT_SEED, STORE_SEED};
use crate::instructions::store_access::{load_customer, load_seat, StoreWriter};
use crate::rules;
use crate::state::{LogicConfig, SeatReservedEvent, CONFIG_SEED, WRITER_SEED};

/// Link a free seat to a seatless customer
///
/// Writes both halves of the assignment (seat -> customer, customer -> seat)
/// in the same instruction.
pub fn reserve_seat(ctx: Context<ReserveSeat>, seat_number: u32) -> Result<()> {
    let clock = Clock::get()?;
    let customer = ctx.accounts.customer.key();

    let record = load_customer(&ctx.accounts.customer_record, &customer)?;
    let seat = load_seat(&ctx.accounts.seat_record, seat_number)?;
    rules::reservation(&record, &seat, seat_number)?;

    let writer = ctx.accounts.store_writer();
    writer.seat_occupant(&ctx.accounts.seat_record.to_account_info(), seat_number, customer)?;
    writer.assigned_seat(
        &ctx.accounts.customer.to_account_info(),
        &ctx.accounts.customer_record.to_account_info(),
        seat_number,
    )?;

    emit!(SeatReservedEvent {
        customer,
        seat_number,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(seat_number: u32)]
pub struct ReserveSeat<'info> {
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

    /// CHECK: Owned by the storage program, created on its first write
    #[account(
        mut,
        seeds = [SEAT_SEED, &seat_number.to_le_bytes()],
        bump,
        seeds::program = storage_program.key(),
    )]
    pub seat_record: UncheckedAccount<'info>,

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

impl<'info> ReserveSeat<'info> {
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
