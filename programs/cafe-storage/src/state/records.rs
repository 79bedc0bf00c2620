use anchor_lang::prelude::*;

use crate::layout::LAYOUT_VERSION;

/// Seed prefix for customer records: ["customer", customer]
pub const CUSTOMER_SEED: &[u8] = b"customer";

/// Seed prefix for seat records: ["seat", seat_number.to_le_bytes()]
pub const SEAT_SEED: &[u8] = b"seat";

/// Seat number stored in `assigned_seat` when the customer holds no seat.
/// Real seats are numbered from 1.
pub const NO_SEAT: u32 = 0;

/// Zeroed tail kept on every record so later layouts can append fields
/// without reallocating. Zero bytes decode as the default of every field.
pub const RESERVED_BYTES: usize = 32;

/// Per-customer business state
///
/// Seeds: ["customer", customer]
///
/// Created lazily by the first write that touches the customer and never
/// closed. Field offsets are pinned by `layout::CUSTOMER_LAYOUT_V1`.
#[account]
#[derive(Debug, Default)]
pub struct CustomerRecord {
    /// Layout the record was created under
    pub layout_version: u16,

    /// Customer wallet this record belongs to
    pub customer: Pubkey,

    /// Token base units paid in and not yet refunded
    pub subscription_balance: u64,

    /// Accrued attendance reward, in token base units
    pub payback_balance: u64,

    /// Consecutive-day check-in streak
    pub continuous_attendance_days: u32,

    /// Day index (unix_timestamp / 86_400) of the last check-in
    pub last_check_in_day: i64,

    /// Seat currently held, NO_SEAT if none
    pub assigned_seat: u32,

    /// PDA bump seed
    pub bump: u8,

    pub reserved: [u8; RESERVED_BYTES],
}

impl CustomerRecord {
    /// 8 (discriminator) + 2 + 32 + 8 + 8 + 4 + 8 + 4 + 1 + 32 = 107 bytes
    pub const SIZE: usize = 8 + 2 + 32 + 8 + 8 + 4 + 8 + 4 + 1 + RESERVED_BYTES;

    pub fn address(customer: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[CUSTOMER_SEED, customer.as_ref()], &crate::ID)
    }

    /// The state a customer has before any write created their record.
    pub fn vacant(customer: Pubkey) -> Self {
        Self {
            layout_version: LAYOUT_VERSION,
            customer,
            ..Self::default()
        }
    }

    /// Stamp identity fields on a freshly allocated (all-zero) record.
    /// Existing records keep their original layout version.
    pub fn claim(&mut self, customer: Pubkey, bump: u8) {
        if self.customer == Pubkey::default() {
            self.layout_version = LAYOUT_VERSION;
            self.customer = customer;
            self.bump = bump;
        }
    }

    pub fn has_seat(&self) -> bool {
        self.assigned_seat != NO_SEAT
    }
}

/// Occupancy of one numbered seat
///
/// Seeds: ["seat", seat_number.to_le_bytes()]
///
/// `occupant` is the default pubkey while the seat is free. Together with
/// `CustomerRecord::assigned_seat` this forms the two halves of a seat
/// assignment, which the logic program keeps mutually inverse.
#[account]
#[derive(Debug, Default)]
pub struct SeatRecord {
    pub layout_version: u16,
    pub seat_number: u32,
    pub occupant: Pubkey,
    pub bump: u8,
    pub reserved: [u8; RESERVED_BYTES],
}

impl SeatRecord {
    /// 8 (discriminator) + 2 + 4 + 32 + 1 + 32 = 79 bytes
    pub const SIZE: usize = 8 + 2 + 4 + 32 + 1 + RESERVED_BYTES;

    pub fn address(seat_number: u32) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[SEAT_SEED, &seat_number.to_le_bytes()], &crate::ID)
    }

    pub fn vacant(seat_number: u32) -> Self {
        Self {
            layout_version: LAYOUT_VERSION,
            seat_number,
            ..Self::default()
        }
    }

    pub fn claim(&mut self, seat_number: u32, bump: u8) {
        if self.layout_version == 0 {
            self.layout_version = LAYOUT_VERSION;
            self.seat_number = seat_number;
            self.bump = bump;
        }
    }

    pub fn is_free(&self) -> bool {
        self.occupant == Pubkey::default()
    }

    pub fn is_held_by(&self, customer: &Pubkey) -> bool {
        !self.is_free() && self.occupant == *customer
    }
}
