use anchor_lang::prelude::*;
use crate::errors::StorageError;
use crate::state::{LayoutUpgradedEvent, Store, STORE_SEED};

/// Move the store to a successor record layout
///
/// Only registered layouts that append inside the reserved tail of every
/// record kind are accepted. Records are not rewritten: appended fields read
/// as zero on records created earlier.
pub fn upgrade_layout(ctx: Context<UpgradeLayout>, next_version: u16) -> Result<()> {
    let store = &mut ctx.accounts.store;
    let clock = Clock::get()?;

    let previous_layout_version = store.upgrade_layout(next_version)?;

    emit!(LayoutUpgradedEvent {
        previous_layout_version,
        layout_version: store.layout_version,
        writer_layout_version: store.writer_layout_version,
        writer_is_behind: store.writer_is_behind(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpgradeLayout<'info> {
    #[account(
        mut,
        seeds = [STORE_SEED],
        bump = store.bump,
        has_one = admin @ StorageError::Unauthorized,
    )]
    pub store: Account<'info, Store>,

    pub admin: Signer<'info>,
}
