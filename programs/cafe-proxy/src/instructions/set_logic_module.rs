use anchor_lang::prelude::*;
use cafe_logic::state::{writer_address, CONFIG_SEED};
use cafe_storage::cpi::accounts::SetWriter;
use cafe_storage::program::CafeStorage;
use cafe_storage::state::STORE_SEED;
use crate::state::{load_module_config, Dispatcher, LogicModuleSwappedEvent, DISPATCHER_SEED};

/// Swap the active logic program
///
/// The new module's config decides the layout version it is registered
/// with, and its administrator must be the dispatcher's. Storage is
/// untouched apart from its writer registration, so every record written by
/// the previous module is read as-is by the next one.
pub fn set_logic_module(ctx: Context<SetLogicModule>) -> Result<()> {
    let clock = Clock::get()?;
    let admin = ctx.accounts.admin.key();
    let logic_program = ctx.accounts.new_logic_program.key();
    let config = load_module_config(&ctx.accounts.new_logic_config, &logic_program)?;

    let dispatcher = &mut ctx.accounts.dispatcher;
    let previous_layout_version = dispatcher.layout_version;
    let previous_logic_program = dispatcher.swap(&admin, logic_program, &config)?;
    let version = dispatcher.version;

    register_writer(
        ctx.accounts.storage_program.to_account_info(),
        ctx.accounts.store.to_account_info(),
        ctx.accounts.admin.to_account_info(),
        &logic_program,
        config.layout_version,
    )?;

    emit!(LogicModuleSwappedEvent {
        previous_logic_program,
        logic_program,
        version,
        previous_layout_version,
        layout_version: config.layout_version,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Grant the logic program's writer PDA write access to the store
pub(crate) fn register_writer<'info>(
    storage_program: AccountInfo<'info>,
    store: AccountInfo<'info>,
    admin: AccountInfo<'info>,
    logic_program: &Pubkey,
    layout_version: u16,
) -> Result<()> {
    let cpi_ctx = CpiContext::new(storage_program, SetWriter { store, admin });
    cafe_storage::cpi::set_writer(cpi_ctx, writer_address(logic_program), layout_version)
}

#[derive(Accounts)]
pub struct SetLogicModule<'info> {
    #[account(
        mut,
        seeds = [DISPATCHER_SEED],
        bump = dispatcher.bump,
        constraint = dispatcher.storage_program == storage_program.key(),
    )]
    pub dispatcher: Account<'info, Dispatcher>,

    pub admin: Signer<'info>,

    /// CHECK: Any deployed program; it only ever receives forwarded calls
    #[account(executable)]
    pub new_logic_program: UncheckedAccount<'info>,

    /// CHECK: Owner and contents checked in the handler
    #[account(
        seeds = [CONFIG_SEED],
        bump,
        seeds::program = new_logic_program.key(),
    )]
    pub new_logic_config: UncheckedAccount<'info>,

    /// CHECK: Validated by the storage program against its admin
    #[account(
        mut,
        seeds = [STORE_SEED],
        bump,
        seeds::program = storage_program.key(),
    )]
    pub store: UncheckedAccount<'info>,

    pub storage_program: Program<'info, CafeStorage>,
}
