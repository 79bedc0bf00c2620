//! Stable field addressing for store-owned records.
//!
//! Records are read by whichever logic program is active, including ones
//! built long after a record was written. Each field therefore has a fixed
//! key, byte offset and width. A successor layout may append keys inside the
//! reserved tail; it may never move, resize or drop an existing key.

use crate::state::{CustomerRecord, SeatRecord, RESERVED_BYTES};

/// Layout new records are written with.
pub const LAYOUT_VERSION: u16 = 1;

const DISCRIMINATOR_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldKey {
    LayoutVersion = 0,
    Customer = 1,
    SubscriptionBalance = 2,
    PaybackBalance = 3,
    ContinuousAttendanceDays = 4,
    LastCheckInDay = 5,
    AssignedSeat = 6,
    SeatNumber = 7,
    Occupant = 8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSlot {
    pub key: FieldKey,
    pub offset: usize,
    pub width: usize,
}

impl FieldSlot {
    pub const fn new(key: FieldKey, offset: usize, width: usize) -> Self {
        Self { key, offset, width }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.width
    }

    fn overlaps(&self, other: &FieldSlot) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RecordLayout {
    pub version: u16,
    pub slots: &'static [FieldSlot],
    /// First byte of the zeroed tail
    pub reserved_offset: usize,
    /// Allocated account size
    pub size: usize,
}

impl RecordLayout {
    pub fn slot(&self, key: FieldKey) -> Option<&FieldSlot> {
        self.slots.iter().find(|slot| slot.key == key)
    }

    /// Whether `next` can read every record written under `self`.
    ///
    /// - version strictly increases
    /// - allocation size is unchanged (records are never reallocated)
    /// - every existing key keeps its offset and width
    /// - new keys live inside this layout's reserved tail and do not overlap
    pub fn is_append_only_extension(&self, next: &RecordLayout) -> bool {
        if next.version <= self.version || next.size != self.size {
            return false;
        }

        let keeps_existing = self.slots.iter().all(|slot| next.slot(slot.key) == Some(slot));
        if !keeps_existing {
            return false;
        }

        let appended_in_tail = next
            .slots
            .iter()
            .filter(|slot| self.slot(slot.key).is_none())
            .all(|slot| {
                slot.offset >= self.reserved_offset
                    && slot.end() <= next.reserved_offset
                    && next.reserved_offset <= next.size
            });

        let disjoint = next.slots.iter().enumerate().all(|(i, a)| {
            next.slots[i + 1..].iter().all(|b| !a.overlaps(b))
        });

        appended_in_tail && disjoint
    }
}

// ============================================================================
// CUSTOMER RECORD
// ============================================================================

const CUSTOMER_SLOTS_V1: [FieldSlot; 7] = [
    FieldSlot::new(FieldKey::LayoutVersion, DISCRIMINATOR_LEN, 2),
    FieldSlot::new(FieldKey::Customer, 10, 32),
    FieldSlot::new(FieldKey::SubscriptionBalance, 42, 8),
    FieldSlot::new(FieldKey::PaybackBalance, 50, 8),
    FieldSlot::new(FieldKey::ContinuousAttendanceDays, 58, 4),
    FieldSlot::new(FieldKey::LastCheckInDay, 62, 8),
    FieldSlot::new(FieldKey::AssignedSeat, 70, 4),
];

/// Offset 74 holds the PDA bump, which is not a business field.
pub const CUSTOMER_LAYOUT_V1: RecordLayout = RecordLayout {
    version: 1,
    slots: &CUSTOMER_SLOTS_V1,
    reserved_offset: CustomerRecord::SIZE - RESERVED_BYTES,
    size: CustomerRecord::SIZE,
};

// ============================================================================
// SEAT RECORD
// ============================================================================

const SEAT_SLOTS_V1: [FieldSlot; 3] = [
    FieldSlot::new(FieldKey::LayoutVersion, DISCRIMINATOR_LEN, 2),
    FieldSlot::new(FieldKey::SeatNumber, 10, 4),
    FieldSlot::new(FieldKey::Occupant, 14, 32),
];

/// Offset 46 holds the PDA bump.
pub const SEAT_LAYOUT_V1: RecordLayout = RecordLayout {
    version: 1,
    slots: &SEAT_SLOTS_V1,
    reserved_offset: SeatRecord::SIZE - RESERVED_BYTES,
    size: SeatRecord::SIZE,
};

// ============================================================================
// STORE LAYOUTS
// ============================================================================

/// Layouts of every record kind at one store version
#[derive(Clone, Copy, Debug)]
pub struct StoreLayout {
    pub version: u16,
    pub customer: RecordLayout,
    pub seat: RecordLayout,
}

impl StoreLayout {
    /// Every record kind must extend append-only for the store to move on.
    pub fn is_append_only_extension(&self, next: &StoreLayout) -> bool {
        next.version > self.version
            && next.customer.version == next.version
            && next.seat.version == next.version
            && self.customer.is_append_only_extension(&next.customer)
            && self.seat.is_append_only_extension(&next.seat)
    }
}

pub const STORE_LAYOUT_V1: StoreLayout = StoreLayout {
    version: 1,
    customer: CUSTOMER_LAYOUT_V1,
    seat: SEAT_LAYOUT_V1,
};

static STORE_LAYOUTS: [StoreLayout; 1] = [STORE_LAYOUT_V1];

pub fn store_layout(version: u16) -> Option<&'static StoreLayout> {
    STORE_LAYOUTS.iter().find(|layout| layout.version == version)
}

pub fn customer_layout(version: u16) -> Option<&'static RecordLayout> {
    store_layout(version).map(|layout| &layout.customer)
}

pub fn seat_layout(version: u16) -> Option<&'static RecordLayout> {
    store_layout(version).map(|layout| &layout.seat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::prelude::*;
    use anchor_lang::AccountSerialize;

    fn read(data: &[u8], slot: &FieldSlot) -> Vec<u8> {
        data[slot.offset..slot.end()].to_vec()
    }

    #[test]
    fn test_customer_record_serializes_at_pinned_offsets() {
        let customer = Pubkey::new_unique();
        let record = CustomerRecord {
            layout_version: 1,
            customer,
            subscription_balance: 1_000_000_000,
            payback_balance: 1_000_000,
            continuous_attendance_days: 3,
            last_check_in_day: 20_000,
            assigned_seat: 7,
            bump: 253,
            reserved: [0; RESERVED_BYTES],
        };

        let mut data = Vec::new();
        record.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), CustomerRecord::SIZE);

        let layout = customer_layout(1).unwrap();
        let slot = |key| layout.slot(key).unwrap();
        assert_eq!(read(&data, slot(FieldKey::LayoutVersion)), 1u16.to_le_bytes());
        assert_eq!(read(&data, slot(FieldKey::Customer)), customer.to_bytes());
        assert_eq!(
            read(&data, slot(FieldKey::SubscriptionBalance)),
            1_000_000_000u64.to_le_bytes()
        );
        assert_eq!(read(&data, slot(FieldKey::PaybackBalance)), 1_000_000u64.to_le_bytes());
        assert_eq!(read(&data, slot(FieldKey::ContinuousAttendanceDays)), 3u32.to_le_bytes());
        assert_eq!(read(&data, slot(FieldKey::LastCheckInDay)), 20_000i64.to_le_bytes());
        assert_eq!(read(&data, slot(FieldKey::AssignedSeat)), 7u32.to_le_bytes());
        assert!(data[layout.reserved_offset..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_seat_record_serializes_at_pinned_offsets() {
        let occupant = Pubkey::new_unique();
        let record = SeatRecord {
            layout_version: 1,
            seat_number: 12,
            occupant,
            bump: 250,
            reserved: [0; RESERVED_BYTES],
        };

        let mut data = Vec::new();
        record.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), SeatRecord::SIZE);

        let layout = seat_layout(1).unwrap();
        assert_eq!(read(&data, layout.slot(FieldKey::SeatNumber).unwrap()), 12u32.to_le_bytes());
        assert_eq!(read(&data, layout.slot(FieldKey::Occupant).unwrap()), occupant.to_bytes());
    }

    const APPENDED: [FieldSlot; 8] = [
        CUSTOMER_SLOTS_V1[0],
        CUSTOMER_SLOTS_V1[1],
        CUSTOMER_SLOTS_V1[2],
        CUSTOMER_SLOTS_V1[3],
        CUSTOMER_SLOTS_V1[4],
        CUSTOMER_SLOTS_V1[5],
        CUSTOMER_SLOTS_V1[6],
        FieldSlot::new(FieldKey::SeatNumber, 75, 4),
    ];

    #[test]
    fn test_appending_into_reserved_tail_is_compatible() {
        let next = RecordLayout {
            version: 2,
            slots: &APPENDED,
            reserved_offset: 79,
            size: CustomerRecord::SIZE,
        };
        assert!(CUSTOMER_LAYOUT_V1.is_append_only_extension(&next));
    }

    const MOVED: [FieldSlot; 7] = [
        CUSTOMER_SLOTS_V1[0],
        CUSTOMER_SLOTS_V1[1],
        FieldSlot::new(FieldKey::SubscriptionBalance, 50, 8),
        FieldSlot::new(FieldKey::PaybackBalance, 42, 8),
        CUSTOMER_SLOTS_V1[4],
        CUSTOMER_SLOTS_V1[5],
        CUSTOMER_SLOTS_V1[6],
    ];

    const OVER_BUMP: [FieldSlot; 8] = [
        CUSTOMER_SLOTS_V1[0],
        CUSTOMER_SLOTS_V1[1],
        CUSTOMER_SLOTS_V1[2],
        CUSTOMER_SLOTS_V1[3],
        CUSTOMER_SLOTS_V1[4],
        CUSTOMER_SLOTS_V1[5],
        CUSTOMER_SLOTS_V1[6],
        FieldSlot::new(FieldKey::SeatNumber, 74, 4),
    ];

    #[test]
    fn test_reordering_or_reusing_bytes_is_rejected() {
        let reordered = RecordLayout {
            version: 2,
            slots: &MOVED,
            reserved_offset: CUSTOMER_LAYOUT_V1.reserved_offset,
            size: CustomerRecord::SIZE,
        };
        assert!(!CUSTOMER_LAYOUT_V1.is_append_only_extension(&reordered));

        let over_bump = RecordLayout {
            version: 2,
            slots: &OVER_BUMP,
            reserved_offset: 79,
            size: CustomerRecord::SIZE,
        };
        assert!(!CUSTOMER_LAYOUT_V1.is_append_only_extension(&over_bump));

        let same_version = RecordLayout {
            version: 1,
            ..CUSTOMER_LAYOUT_V1
        };
        assert!(!CUSTOMER_LAYOUT_V1.is_append_only_extension(&same_version));

        let resized = RecordLayout {
            version: 2,
            size: CustomerRecord::SIZE + 8,
            ..CUSTOMER_LAYOUT_V1
        };
        assert!(!CUSTOMER_LAYOUT_V1.is_append_only_extension(&resized));
    }

    #[test]
    fn test_only_current_layout_is_registered() {
        assert!(store_layout(LAYOUT_VERSION).is_some());
        assert!(store_layout(0).is_none());
        assert!(store_layout(LAYOUT_VERSION + 1).is_none());
    }

    const SEAT_APPENDED: [FieldSlot; 4] = [
        SEAT_SLOTS_V1[0],
        SEAT_SLOTS_V1[1],
        SEAT_SLOTS_V1[2],
        FieldSlot::new(FieldKey::AssignedSeat, 47, 4),
    ];

    #[test]
    fn test_store_layout_requires_every_record_to_extend() {
        let customer_v2 = RecordLayout {
            version: 2,
            slots: &APPENDED,
            reserved_offset: 79,
            size: CustomerRecord::SIZE,
        };
        let seat_v2 = RecordLayout {
            version: 2,
            slots: &SEAT_APPENDED,
            reserved_offset: 51,
            size: SeatRecord::SIZE,
        };

        let v2 = StoreLayout { version: 2, customer: customer_v2, seat: seat_v2 };
        assert!(STORE_LAYOUT_V1.is_append_only_extension(&v2));

        // Seat layout left at v1 is not a successor
        let half = StoreLayout { version: 2, customer: customer_v2, seat: SEAT_LAYOUT_V1 };
        assert!(!STORE_LAYOUT_V1.is_append_only_extension(&half));

        let moved_customer = RecordLayout {
            version: 2,
            slots: &MOVED,
            reserved_offset: CUSTOMER_LAYOUT_V1.reserved_offset,
            size: CustomerRecord::SIZE,
        };
        let broken = StoreLayout { version: 2, customer: moved_customer, seat: seat_v2 };
        assert!(!STORE_LAYOUT_V1.is_append_only_extension(&broken));
    }
}
