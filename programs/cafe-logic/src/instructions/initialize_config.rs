use anchor_lang::prelude::*;
use crate::state::{LogicConfig, LogicConfiguredEvent, CONFIG_SEED, LOGIC_VERSION, WRITER_SEED};

/// Fix the business parameters of this logic program
///
/// The config is immutable afterwards. Register this program's writer PDA
/// with the store (directly or through the dispatcher) before it can act.
pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    monthly_fee: u64,
    reward_rate_bps: u16,
    attendance_threshold: u32,
) -> Result<()> {
    LogicConfig::validate(monthly_fee, reward_rate_bps)?;

    let config = &mut ctx.accounts.config;
    let clock = Clock::get()?;

    config.admin = ctx.accounts.admin.key();
    config.monthly_fee = monthly_fee;
    config.reward_rate_bps = reward_rate_bps;
    config.attendance_threshold = attendance_threshold;
    config.layout_version = cafe_storage::layout::LAYOUT_VERSION;
    config.logic_version = LOGIC_VERSION;
    config.bump = ctx.bumps.config;
    config.writer_bump = ctx.bumps.writer;

    emit!(LogicConfiguredEvent {
        admin: config.admin,
        monthly_fee,
        reward_rate_bps,
        attendance_threshold,
        logic_version: LOGIC_VERSION,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = LogicConfig::SIZE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, LogicConfig>,

    /// Writer PDA, only its bump is recorded here
    /// CHECK: PDA used only as a signing authority
    #[account(seeds = [WRITER_SEED], bump)]
    pub writer: UncheckedAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}
