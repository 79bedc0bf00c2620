use anchor_lang::prelude::*;
use cafe_logic::state::LogicConfig;

use crate::errors::ProxyError;

pub const DISPATCHER_SEED: &[u8] = b"dispatcher";

// ============================================================================
// DISPATCHER
// ============================================================================

/// The single stable entry point's routing table
///
/// Seeds: ["dispatcher"]
///
/// State transitions:
/// - (no account) -> Initialized (via `initialize`)
/// - Initialized -> Initialized with another logic program (via `set_logic_module`)
///
/// There is no terminal state. The storage program never changes; only the
/// logic program pointer cycles, and every swap bumps `version`.
#[account]
#[derive(Debug)]
pub struct Dispatcher {
    /// Administrator allowed to swap the logic module
    pub admin: Pubkey,

    /// Logic program every forwarded call goes to
    pub logic_program: Pubkey,

    /// Storage program holding all business state
    pub storage_program: Pubkey,

    /// 1 at initialization, +1 per swap
    pub version: u64,

    /// Store layout the active logic program was registered with
    pub layout_version: u16,

    /// PDA bump seed
    pub bump: u8,
}

impl Dispatcher {
    /// 8 (discriminator) + 32 + 32 + 32 + 8 + 2 + 1 = 115 bytes
    pub const SIZE: usize = 8 + 32 + 32 + 32 + 8 + 2 + 1;

    pub fn address() -> (Pubkey, u8) {
        Pubkey::find_program_address(&[DISPATCHER_SEED], &crate::ID)
    }

    /// Read the dispatcher, failing with `NotInitialized` if it was never created
    pub fn load(info: &AccountInfo) -> Result<Self> {
        let data = info.try_borrow_data()?;
        let dispatcher = Self::from_account_data(info.owner, &data)?;
        Ok(dispatcher)
    }

    pub fn from_account_data(owner: &Pubkey, data: &[u8]) -> Result<Self> {
        if data.is_empty() || *owner != crate::ID {
            return err!(ProxyError::NotInitialized);
        }
        Self::try_deserialize(&mut &data[..])
    }

    /// Check that `logic_program` is the module calls must go to
    pub fn route(&self, logic_program: &Pubkey) -> std::result::Result<(), ProxyError> {
        if *logic_program != self.logic_program {
            return Err(ProxyError::InactiveLogicModule);
        }
        Ok(())
    }

    /// The module's refund administrator must be the dispatcher's
    /// administrator, otherwise installing it would hand the vault to
    /// another key.
    pub fn check_module_admin(
        admin: &Pubkey,
        config: &LogicConfig,
    ) -> std::result::Result<(), ProxyError> {
        if config.admin != *admin {
            return Err(ProxyError::ModuleAdminMismatch);
        }
        Ok(())
    }

    /// Point the dispatcher at a new logic program, adopting the layout
    /// version from its config.
    ///
    /// Returns the previous logic program.
    pub fn swap(
        &mut self,
        caller: &Pubkey,
        logic_program: Pubkey,
        config: &LogicConfig,
    ) -> std::result::Result<Pubkey, ProxyError> {
        if *caller != self.admin {
            return Err(ProxyError::Unauthorized);
        }
        Self::check_module_admin(&self.admin, config)?;

        let previous = self.logic_program;
        self.logic_program = logic_program;
        self.layout_version = config.layout_version;
        self.version = self.version.saturating_add(1);
        Ok(previous)
    }
}

/// Read a logic module's config, which must be owned by that module
pub fn load_module_config(info: &AccountInfo, logic_program: &Pubkey) -> Result<LogicConfig> {
    if info.data_is_empty() || info.owner != logic_program {
        return err!(ProxyError::InvalidModuleConfig);
    }
    let data = info.try_borrow_data()?;
    let config = LogicConfig::try_deserialize(&mut &data[..])?;
    Ok(config)
}

// ============================================================================
// EVENTS
// ============================================================================

#[event]
pub struct DispatcherInitializedEvent {
    pub admin: Pubkey,
    pub logic_program: Pubkey,
    pub storage_program: Pubkey,
    pub layout_version: u16,
    pub timestamp: i64,
}

#[event]
pub struct LogicModuleSwappedEvent {
    pub previous_logic_program: Pubkey,
    pub logic_program: Pubkey,
    pub version: u64,
    pub previous_layout_version: u16,
    pub layout_version: u16,
    pub timestamp: i64,
}

#[event]
pub struct CallForwardedEvent {
    pub caller: Pubkey,
    pub logic_program: Pubkey,
    pub version: u64,
    pub operation: u8,
    pub timestamp: i64,
}
