use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod rules;
pub mod state;

use instructions::*;

declare_id!("3kHUyJozy9dKuAFy1BziDprFa8xTF8gyafsF5VM839di");

#[program]
pub mod cafe_logic {
    use super::*;

    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        monthly_fee: u64,
        reward_rate_bps: u16,
        attendance_threshold: u32,
    ) -> Result<()> {
        instructions::initialize_config(ctx, monthly_fee, reward_rate_bps, attendance_threshold)
    }

    pub fn subscribe(ctx: Context<Subscribe>, payment: u64) -> Result<()> {
        instructions::subscribe(ctx, payment)
    }

    pub fn reserve_seat(ctx: Context<ReserveSeat>, seat_number: u32) -> Result<()> {
        instructions::reserve_seat(ctx, seat_number)
    }

    pub fn change_seat(ctx: Context<ChangeSeat>, new_seat_number: u32) -> Result<()> {
        instructions::change_seat(ctx, new_seat_number)
    }

    pub fn check_in(ctx: Context<CheckIn>, at_location: bool) -> Result<()> {
        instructions::check_in(ctx, at_location)
    }

    pub fn refund(ctx: Context<Refund>) -> Result<()> {
        instructions::refund(ctx)
    }
}
