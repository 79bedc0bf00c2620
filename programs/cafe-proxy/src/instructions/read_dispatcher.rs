use anchor_lang::prelude::*;
use crate::state::{Dispatcher, DISPATCHER_SEED};

pub fn current_logic(ctx: Context<ReadDispatcher>) -> Result<Pubkey> {
    let dispatcher = Dispatcher::load(&ctx.accounts.dispatcher)?;
    Ok(dispatcher.logic_program)
}

pub fn current_storage(ctx: Context<ReadDispatcher>) -> Result<Pubkey> {
    let dispatcher = Dispatcher::load(&ctx.accounts.dispatcher)?;
    Ok(dispatcher.storage_program)
}

#[derive(Accounts)]
pub struct ReadDispatcher<'info> {
    /// CHECK: Loaded by hand so a missing dispatcher reports NotInitialized
    #[account(seeds = [DISPATCHER_SEED], bump)]
    pub dispatcher: UncheckedAccount<'info>,
}
