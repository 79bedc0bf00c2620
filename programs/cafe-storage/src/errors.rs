use anchor_lang::prelude::*;

#[error_code]
pub enum StorageError {
    #[msg("Signer is not authorized to mutate the store")]
    Unauthorized,

    #[msg("Writer layout is unknown or newer than the stored layout")]
    LayoutMismatch,

    #[msg("Vault holds fewer tokens than requested")]
    InsufficientVaultBalance,
}
