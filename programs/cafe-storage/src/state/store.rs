use anchor_lang::prelude::*;

use crate::errors::StorageError;
use crate::layout::{self, StoreLayout};

// ============================================================================
// SEEDS
// ============================================================================

pub const STORE_SEED: &[u8] = b"store";

pub const VAULT_SEED: &[u8] = b"vault";

// ============================================================================
// STORE
// ============================================================================

/// Singleton store authority PDA
///
/// Seeds: ["store"]
///
/// Holds the single authorization field (`writer`) that gates every record
/// mutation, and is the token authority of the subscription vault.
///
/// Authority Hierarchy:
/// - `admin` registers writers
/// - `writer` (the active logic program's writer PDA) mutates records
/// - anyone reads
#[account]
#[derive(Debug)]
pub struct Store {
    /// Administrator allowed to register writers
    pub admin: Pubkey,

    /// Writer PDA of the active logic program, default pubkey until registered
    pub writer: Pubkey,

    /// Mint subscriptions are paid in
    pub mint: Pubkey,

    /// Vault token account holding paid subscriptions
    pub vault: Pubkey,

    /// Layout the stored records follow
    pub layout_version: u16,

    /// Layout the registered writer was built against
    pub writer_layout_version: u16,

    /// PDA bump seed
    pub bump: u8,

    /// Vault token account bump
    pub vault_bump: u8,
}

impl Store {
    /// 8 (discriminator) + 32 * 4 + 2 + 2 + 1 + 1 = 142 bytes
    pub const SIZE: usize = 8 + 32 * 4 + 2 + 2 + 1 + 1;

    pub fn address() -> (Pubkey, u8) {
        Pubkey::find_program_address(&[STORE_SEED], &crate::ID)
    }

    /// An unset writer never matches, so nothing can write before the
    /// admin registers a logic program.
    pub fn is_writer(&self, signer: &Pubkey) -> bool {
        self.writer != Pubkey::default() && self.writer == *signer
    }

    /// Install a new writer. A writer built against a layout the records do
    /// not follow yet would misread them, so it is rejected. Older layouts
    /// stay readable because every upgrade only appends.
    ///
    /// Returns the previous writer.
    pub fn register_writer(
        &mut self,
        writer: Pubkey,
        layout_version: u16,
    ) -> std::result::Result<Pubkey, StorageError> {
        if layout_version == 0 || layout_version > self.layout_version {
            return Err(StorageError::LayoutMismatch);
        }

        let previous = self.writer;
        self.writer = writer;
        self.writer_layout_version = layout_version;
        Ok(previous)
    }

    /// Move the store to the registered layout `next_version`.
    ///
    /// Returns the previous layout version.
    pub fn upgrade_layout(&mut self, next_version: u16) -> std::result::Result<u16, StorageError> {
        let current = layout::store_layout(self.layout_version).ok_or(StorageError::LayoutMismatch)?;
        let next = layout::store_layout(next_version).ok_or(StorageError::LayoutMismatch)?;
        self.apply_layout(current, next)
    }

    fn apply_layout(
        &mut self,
        current: &StoreLayout,
        next: &StoreLayout,
    ) -> std::result::Result<u16, StorageError> {
        if current.version != self.layout_version || !current.is_append_only_extension(next) {
            return Err(StorageError::LayoutMismatch);
        }

        let previous = self.layout_version;
        self.layout_version = next.version;
        Ok(previous)
    }

    /// Whether the registered writer predates the store's current layout
    pub fn writer_is_behind(&self) -> bool {
        self.writer != Pubkey::default() && self.writer_layout_version < self.layout_version
    }
}

// ============================================================================
// EVENTS
// ============================================================================

#[event]
pub struct StoreInitializedEvent {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub layout_version: u16,
    pub timestamp: i64,
}

#[event]
pub struct WriterRegisteredEvent {
    pub previous_writer: Pubkey,
    pub writer: Pubkey,
    pub layout_version: u16,
    pub timestamp: i64,
}

#[event]
pub struct LayoutUpgradedEvent {
    pub previous_layout_version: u16,
    pub layout_version: u16,
    pub writer_layout_version: u16,
    pub writer_is_behind: bool,
    pub timestamp: i64,
}

#[event]
pub struct FundsReleasedEvent {
    pub recipient: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
