use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke;
use crate::state::{CallForwardedEvent, Dispatcher, LogicCall, DISPATCHER_SEED};

/// Forward a business call to the active logic program
///
/// The caller's account goes first and keeps its signature, so the logic
/// program sees the original caller rather than the dispatcher. The
/// dispatcher never signs. The remaining accounts are passed through in
/// order with their signer and writable flags intact, and any failure in
/// the logic program aborts the whole transaction with its own error.
///
/// Forwarding is the stable address, not a gate. A logic program's
/// instructions can also be invoked directly and have the same effect,
/// because the caller signs either way. What makes a module active is the
/// store's writer registration: once swapped out, a module's writes fail
/// with the store's `Unauthorized` no matter how it was reached.
pub fn forward<'info>(
    ctx: Context<'_, '_, 'info, 'info, Forward<'info>>,
    call: LogicCall,
) -> Result<()> {
    let dispatcher = Dispatcher::load(&ctx.accounts.dispatcher)?;
    dispatcher.route(ctx.accounts.logic_program.key)?;

    let caller = ctx.accounts.caller.to_account_info();

    let mut metas = Vec::with_capacity(ctx.remaining_accounts.len() + 1);
    metas.push(AccountMeta::new(*caller.key, true));
    metas.extend(ctx.remaining_accounts.iter().map(|info| AccountMeta {
        pubkey: *info.key,
        is_signer: info.is_signer,
        is_writable: info.is_writable,
    }));

    let ix = Instruction {
        program_id: dispatcher.logic_program,
        accounts: metas,
        data: call.data(),
    };

    let mut infos = Vec::with_capacity(ctx.remaining_accounts.len() + 2);
    infos.push(caller.clone());
    infos.extend(ctx.remaining_accounts.iter().cloned());
    infos.push(ctx.accounts.logic_program.to_account_info());

    invoke(&ix, &infos)?;

    emit!(CallForwardedEvent {
        caller: *caller.key,
        logic_program: dispatcher.logic_program,
        version: dispatcher.version,
        operation: call.tag(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Forward<'info> {
    /// CHECK: Loaded by hand so a missing dispatcher reports NotInitialized
    #[account(seeds = [DISPATCHER_SEED], bump)]
    pub dispatcher: UncheckedAccount<'info>,

    #[account(mut)]
    pub caller: Signer<'info>,

    /// CHECK: Must match the dispatcher's active logic program
    #[account(executable)]
    pub logic_program: UncheckedAccount<'info>,
}
