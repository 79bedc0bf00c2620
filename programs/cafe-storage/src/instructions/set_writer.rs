use anchor_lang::prelude::*;
use crate::errors::StorageError;
use crate::state::{Store, WriterRegisteredEvent, STORE_SEED};

/// Register the writer PDA of the logic program allowed to mutate records
///
/// Called directly by the admin at deployment, or through the dispatcher's
/// logic swap, which forwards the admin signature.
pub fn set_writer(ctx: Context<SetWriter>, writer: Pubkey, layout_version: u16) -> Result<()> {
    let store = &mut ctx.accounts.store;
    let clock = Clock::get()?;

    let previous_writer = store.register_writer(writer, layout_version)?;

    emit!(WriterRegisteredEvent {
        previous_writer,
        writer,
        layout_version,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetWriter<'info> {
    #[account(
        mut,
        seeds = [STORE_SEED],
        bump = store.bump,
        has_one = admin @ StorageError::Unauthorized,
    )]
    pub store: Account<'info, Store>,

    pub admin: Signer<'info>,
}
