use anchor_lang::prelude::*;

#[error_code]
pub enum ProxyError {
    #[msg("Dispatcher has not been initialized")]
    NotInitialized,

    #[msg("Only the administrator can swap the logic module")]
    Unauthorized,

    #[msg("Logic program is not the active module")]
    InactiveLogicModule,

    #[msg("Logic module is configured for a different administrator")]
    ModuleAdminMismatch,

    #[msg("Account is not the logic module's config")]
    InvalidModuleConfig,
}
