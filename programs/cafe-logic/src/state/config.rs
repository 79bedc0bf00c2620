use anchor_lang::prelude::*;

use crate::errors::LogicError;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const CONFIG_SEED: &[u8] = b"config";

/// Seed of the PDA that signs store writes. Every logic program registered
/// with the store signs with ["writer"] under its own program id.
pub const WRITER_SEED: &[u8] = b"writer";

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Revision of these business rules, recorded in the config for clients
pub const LOGIC_VERSION: u16 = 1;

pub fn writer_address(logic_program: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[WRITER_SEED], logic_program).0
}

// ============================================================================
// LOGIC CONFIG
// ============================================================================

/// Construction-time business parameters
///
/// Seeds: ["config"]
///
/// Immutable once created. A new fee or reward policy ships as a new logic
/// program with its own config; customer data stays in the store.
#[account]
#[derive(Debug)]
pub struct LogicConfig {
    /// Administrator allowed to refund
    pub admin: Pubkey,

    /// Exact payment accepted by `subscribe`, in token base units
    pub monthly_fee: u64,

    /// Reward per qualifying check-in, in basis points of the subscription balance
    pub reward_rate_bps: u16,

    /// Streak length from which check-ins earn rewards
    pub attendance_threshold: u32,

    /// Store layout these rules were built against
    pub layout_version: u16,

    pub logic_version: u16,

    /// PDA bump seed
    pub bump: u8,

    /// Writer PDA bump (signs store CPIs)
    pub writer_bump: u8,
}

impl LogicConfig {
    /// 8 (discriminator) + 32 + 8 + 2 + 4 + 2 + 2 + 1 + 1 = 60 bytes
    pub const SIZE: usize = 8 + 32 + 8 + 2 + 4 + 2 + 2 + 1 + 1;

    pub fn validate(monthly_fee: u64, reward_rate_bps: u16) -> std::result::Result<(), LogicError> {
        if monthly_fee == 0 {
            return Err(LogicError::InvalidAmount);
        }
        if u64::from(reward_rate_bps) > BPS_DENOMINATOR {
            return Err(LogicError::InvalidRewardRate);
        }
        Ok(())
    }

    pub fn qualifies(&self, streak: u32) -> bool {
        streak >= self.attendance_threshold
    }

    /// Reward earned on `subscription_balance` (floor), `None` on overflow
    pub fn reward_for(&self, subscription_balance: u64) -> Option<u64> {
        let reward = u128::from(subscription_balance)
            .checked_mul(u128::from(self.reward_rate_bps))?
            .checked_div(u128::from(BPS_DENOMINATOR))?;
        u64::try_from(reward).ok()
    }
}

// ============================================================================
// EVENTS
// ============================================================================

#[event]
pub struct LogicConfiguredEvent {
    pub admin: Pubkey,
    pub monthly_fee: u64,
    pub reward_rate_bps: u16,
    pub attendance_threshold: u32,
    pub logic_version: u16,
    pub timestamp: i64,
}

#[event]
pub struct SubscribedEvent {
    pub customer: Pubkey,
    pub payment: u64,
    pub subscription_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct SeatReservedEvent {
    pub customer: Pubkey,
    pub seat_number: u32,
    pub timestamp: i64,
}

#[event]
pub struct SeatChangedEvent {
    pub customer: Pubkey,
    pub from_seat: u32,
    pub to_seat: u32,
    pub timestamp: i64,
}

#[event]
pub struct CheckedInEvent {
    pub customer: Pubkey,
    pub day: i64,
    pub continuous_attendance_days: u32,
    pub reward: u64,
    pub payback_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct RefundedEvent {
    pub customer: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
