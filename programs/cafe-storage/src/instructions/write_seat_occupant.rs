use anchor_lang::prelude::*;
use crate::errors::StorageError;
use crate::state::{SeatRecord, Store, SEAT_SEED, STORE_SEED};

/// Set (or clear, with the default pubkey) the occupant of a seat
pub fn write_seat_occupant(
    ctx: Context<WriteSeatOccupant>,
    seat_number: u32,
    occupant: Pubkey,
) -> Result<()> {
    let seat = &mut ctx.accounts.seat_record;
    seat.claim(seat_number, ctx.bumps.seat_record);
    seat.occupant = occupant;
    Ok(())
}

#[derive(Accounts)]
#[instruction(seat_number: u32)]
pub struct WriteSeatOccupant<'info> {
    #[account(
        seeds = [STORE_SEED],
        bump = store.bump,
        constraint = store.is_writer(&writer.key()) @ StorageError::Unauthorized,
    )]
    pub store: Account<'info, Store>,

    /// Writer PDA of the active logic program
    pub writer: Signer<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        space = SeatRecord::SIZE,
        seeds = [SEAT_SEED, &seat_number.to_le_bytes()],
        bump
    )]
    pub seat_record: Account<'info, SeatRecord>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}
