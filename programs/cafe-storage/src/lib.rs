use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod layout;
pub mod state;

use instructions::*;

declare_id!("7ii3UQpox5qp4jtQjm4HM2ZLomRtd1P8HpzHPrZETESR");

#[program]
pub mod cafe_storage {
    use super::*;

    pub fn initialize_store(ctx: Context<InitializeStore>) -> Result<()> {
        instructions::initialize_store(ctx)
    }

    pub fn set_writer(ctx: Context<SetWriter>, writer: Pubkey, layout_version: u16) -> Result<()> {
        instructions::set_writer(ctx, writer, layout_version)
    }

    pub fn upgrade_layout(ctx: Context<UpgradeLayout>, next_version: u16) -> Result<()> {
        instructions::upgrade_layout(ctx, next_version)
    }

    pub fn write_subscription_balance(ctx: Context<WriteCustomerField>, amount: u64) -> Result<()> {
        instructions::write_subscription_balance(ctx, amount)
    }

    pub fn write_payback_balance(ctx: Context<WriteCustomerField>, amount: u64) -> Result<()> {
        instructions::write_payback_balance(ctx, amount)
    }

    pub fn write_attendance(
        ctx: Context<WriteCustomerField>,
        continuous_days: u32,
        last_check_in_day: i64,
    ) -> Result<()> {
        instructions::write_attendance(ctx, continuous_days, last_check_in_day)
    }

    pub fn write_assigned_seat(ctx: Context<WriteCustomerField>, seat_number: u32) -> Result<()> {
        instructions::write_assigned_seat(ctx, seat_number)
    }

    pub fn write_seat_occupant(
        ctx: Context<WriteSeatOccupant>,
        seat_number: u32,
        occupant: Pubkey,
    ) -> Result<()> {
        instructions::write_seat_occupant(ctx, seat_number, occupant)
    }

    pub fn release_funds(ctx: Context<ReleaseFunds>, amount: u64) -> Result<()> {
        instructions::release_funds(ctx, amount)
    }
}
