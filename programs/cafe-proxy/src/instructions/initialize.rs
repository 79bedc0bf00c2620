use anchor_lang::prelude::*;
use cafe_logic::state::CONFIG_SEED;
use cafe_storage::program::CafeStorage;
use cafe_storage::state::STORE_SEED;
use crate::instructions::set_logic_module::register_writer;
use crate::state::{load_module_config, Dispatcher, DispatcherInitializedEvent, DISPATCHER_SEED};

/// Create the dispatcher and register the first logic program's writer with storage
///
/// The signing admin must also be the store's admin (storage checks that on
/// the forwarded signature) and the logic module's configured admin.
pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let clock = Clock::get()?;
    let admin = ctx.accounts.admin.key();
    let logic_program = ctx.accounts.logic_program.key();
    let storage_program = ctx.accounts.storage_program.key();

    let config = load_module_config(&ctx.accounts.logic_config, &logic_program)?;
    Dispatcher::check_module_admin(&admin, &config)?;

    register_writer(
        ctx.accounts.storage_program.to_account_info(),
        ctx.accounts.store.to_account_info(),
        ctx.accounts.admin.to_account_info(),
        &logic_program,
        config.layout_version,
    )?;

    let dispatcher = &mut ctx.accounts.dispatcher;
    dispatcher.admin = admin;
    dispatcher.logic_program = logic_program;
    dispatcher.storage_program = storage_program;
    dispatcher.version = 1;
    dispatcher.layout_version = config.layout_version;
    dispatcher.bump = ctx.bumps.dispatcher;

    emit!(DispatcherInitializedEvent {
        admin,
        logic_program,
        storage_program,
        layout_version: config.layout_version,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = Dispatcher::SIZE,
        seeds = [DISPATCHER_SEED],
        bump
    )]
    pub dispatcher: Account<'info, Dispatcher>,

    #[account(mut)]
    pub admin: Signer<'info>,

    /// CHECK: Any deployed program; it only ever receives forwarded calls
    #[account(executable)]
    pub logic_program: UncheckedAccount<'info>,

    /// CHECK: Owner and contents checked in the handler
    #[account(
        seeds = [CONFIG_SEED],
        bump,
        seeds::program = logic_program.key(),
    )]
    pub logic_config: UncheckedAccount<'info>,

    /// CHECK: Validated by the storage program against its admin
    #[account(
        mut,
        seeds = [STORE_SEED],
        bump,
        seeds::program = storage_program.key(),
    )]
    pub store: UncheckedAccount<'info>,

    pub storage_program: Program<'info, CafeStorage>,
    pub system_program: Program<'info, System>,
}
