use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod state;

use instructions::*;
use state::LogicCall;

declare_id!("CnViCXuGNViu8AfBVpuZ3Apcsemsdr2dq7NCGGBrC75j");

#[program]
pub mod cafe_proxy {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize(ctx)
    }

    pub fn forward<'info>(
        ctx: Context<'_, '_, 'info, 'info, Forward<'info>>,
        call: LogicCall,
    ) -> Result<()> {
        instructions::forward(ctx, call)
    }

    pub fn set_logic_module(ctx: Context<SetLogicModule>) -> Result<()> {
        instructions::set_logic_module(ctx)
    }

    pub fn current_logic(ctx: Context<ReadDispatcher>) -> Result<Pubkey> {
        instructions::current_logic(ctx)
    }

    pub fn current_storage(ctx: Context<ReadDispatcher>) -> Result<Pubkey> {
        instructions::current_storage(ctx)
    }
}
