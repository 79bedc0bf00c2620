//! Business rules of the study cafe.
//!
//! Each rule takes the records as currently stored and returns the values
//! to write back, or the error that aborts the operation. Instruction
//! handlers load records, apply a rule, then issue the store writes, so a
//! failing rule leaves the store untouched.

use anchor_lang::prelude::Pubkey;
use cafe_storage::state::{CustomerRecord, SeatRecord, NO_SEAT};

use crate::errors::LogicError;
use crate::state::{next_streak, LogicConfig};

pub type RuleResult<T> = std::result::Result<T, LogicError>;

/// New subscription balance after paying `payment`.
pub fn subscription(config: &LogicConfig, record: &CustomerRecord, payment: u64) -> RuleResult<u64> {
    if payment != config.monthly_fee {
        return Err(LogicError::InvalidAmount);
    }
    record
        .subscription_balance
        .checked_add(payment)
        .ok_or(LogicError::CalculationOverflow)
}

/// Check that `seat` can be linked to the customer owning `record`.
pub fn reservation(record: &CustomerRecord, seat: &SeatRecord, seat_number: u32) -> RuleResult<()> {
    if seat_number == NO_SEAT {
        return Err(LogicError::InvalidSeatNumber);
    }
    if !seat.is_free() {
        return Err(LogicError::SeatOccupied);
    }
    if record.has_seat() {
        return Err(LogicError::AlreadyHasSeat);
    }
    Ok(())
}

/// Check a move from the customer's current seat to `new_seat`.
///
/// Returns the seat number being released.
pub fn seat_change(
    record: &CustomerRecord,
    current_seat: &SeatRecord,
    new_seat: &SeatRecord,
    new_seat_number: u32,
) -> RuleResult<u32> {
    if new_seat_number == NO_SEAT {
        return Err(LogicError::InvalidSeatNumber);
    }
    if !record.has_seat() {
        return Err(LogicError::NoCurrentSeat);
    }
    if current_seat.seat_number != record.assigned_seat
        || !current_seat.is_held_by(&record.customer)
    {
        return Err(LogicError::SeatRecordMismatch);
    }
    if !new_seat.is_free() {
        return Err(LogicError::SeatOccupied);
    }
    Ok(record.assigned_seat)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInOutcome {
    pub day: i64,
    pub streak: u32,
    /// Credited this check-in, 0 below the threshold
    pub reward: u64,
    pub payback_balance: u64,
}

/// Attendance and reward after checking in on day `today`.
///
/// The reward is a share of the subscription balance; it accrues to the
/// payback balance and never touches the subscription balance.
pub fn check_in(
    config: &LogicConfig,
    record: &CustomerRecord,
    at_location: bool,
    today: i64,
) -> RuleResult<CheckInOutcome> {
    if !at_location {
        return Err(LogicError::NotAtLocation);
    }

    let streak = next_streak(record.continuous_attendance_days, record.last_check_in_day, today)
        .ok_or(LogicError::AlreadyCheckedIn)?;

    let reward = if config.qualifies(streak) {
        config
            .reward_for(record.subscription_balance)
            .ok_or(LogicError::CalculationOverflow)?
    } else {
        0
    };

    let payback_balance = record
        .payback_balance
        .checked_add(reward)
        .ok_or(LogicError::CalculationOverflow)?;

    Ok(CheckInOutcome {
        day: today,
        streak,
        reward,
        payback_balance,
    })
}

/// Amount to hand back to the administrator when refunding `record`.
pub fn refund(config: &LogicConfig, caller: &Pubkey, record: &CustomerRecord) -> RuleResult<u64> {
    if *caller != config.admin {
        return Err(LogicError::Unauthorized);
    }
    if record.subscription_balance == 0 {
        return Err(LogicError::NothingToRefund);
    }
    Ok(record.subscription_balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LOGIC_VERSION;
    use std::collections::HashMap;

    const ONE_TOKEN: u64 = 1_000_000_000;
    const DAY: i64 = 20_000;

    fn config(admin: Pubkey, monthly_fee: u64, reward_rate_bps: u16, threshold: u32) -> LogicConfig {
        LogicConfig {
            admin,
            monthly_fee,
            reward_rate_bps,
            attendance_threshold: threshold,
            layout_version: 1,
            logic_version: LOGIC_VERSION,
            bump: 255,
            writer_bump: 255,
        }
    }

    /// In-memory stand-in for the store: applies rule outputs the same way
    /// the instruction handlers issue writes.
    struct Cafe {
        config: LogicConfig,
        customers: HashMap<Pubkey, CustomerRecord>,
        seats: HashMap<u32, SeatRecord>,
        vault: u64,
    }

    impl Cafe {
        fn new(config: LogicConfig) -> Self {
            Self {
                config,
                customers: HashMap::new(),
                seats: HashMap::new(),
                vault: 0,
            }
        }

        fn customer(&self, who: Pubkey) -> CustomerRecord {
            self.customers
                .get(&who)
                .cloned()
                .unwrap_or_else(|| CustomerRecord::vacant(who))
        }

        fn seat(&self, seat_number: u32) -> SeatRecord {
            self.seats
                .get(&seat_number)
                .cloned()
                .unwrap_or_else(|| SeatRecord::vacant(seat_number))
        }

        fn customer_mut(&mut self, who: Pubkey) -> &mut CustomerRecord {
            self.customers
                .entry(who)
                .or_insert_with(|| CustomerRecord::vacant(who))
        }

        fn set_occupant(&mut self, seat_number: u32, occupant: Pubkey) {
            self.seats
                .entry(seat_number)
                .or_insert_with(|| SeatRecord::vacant(seat_number))
                .occupant = occupant;
        }

        fn subscribe(&mut self, who: Pubkey, payment: u64) -> RuleResult<()> {
            let balance = subscription(&self.config, &self.customer(who), payment)?;
            self.vault += payment;
            self.customer_mut(who).subscription_balance = balance;
            Ok(())
        }

        fn reserve_seat(&mut self, who: Pubkey, seat_number: u32) -> RuleResult<()> {
            reservation(&self.customer(who), &self.seat(seat_number), seat_number)?;
            self.set_occupant(seat_number, who);
            self.customer_mut(who).assigned_seat = seat_number;
            Ok(())
        }

        fn change_seat(&mut self, who: Pubkey, new_seat_number: u32) -> RuleResult<()> {
            let record = self.customer(who);
            let current = self.seat(record.assigned_seat);
            let old = seat_change(&record, &current, &self.seat(new_seat_number), new_seat_number)?;
            self.set_occupant(old, Pubkey::default());
            self.set_occupant(new_seat_number, who);
            self.customer_mut(who).assigned_seat = new_seat_number;
            Ok(())
        }

        fn check_in(&mut self, who: Pubkey, day: i64) -> RuleResult<CheckInOutcome> {
            let outcome = check_in(&self.config, &self.customer(who), true, day)?;
            let record = self.customer_mut(who);
            record.continuous_attendance_days = outcome.streak;
            record.last_check_in_day = outcome.day;
            record.payback_balance = outcome.payback_balance;
            Ok(outcome)
        }

        fn refund(&mut self, caller: Pubkey, target: Pubkey) -> RuleResult<u64> {
            let amount = refund(&self.config, &caller, &self.customer(target))?;
            self.vault -= amount;
            self.customer_mut(target).subscription_balance = 0;
            Ok(amount)
        }

        /// Every occupied seat points at a customer pointing back at it.
        fn assert_seats_consistent(&self) {
            for (number, seat) in &self.seats {
                if !seat.is_free() {
                    assert_eq!(self.customer(seat.occupant).assigned_seat, *number);
                }
            }
            for (who, record) in &self.customers {
                if record.has_seat() {
                    assert!(self.seat(record.assigned_seat).is_held_by(who));
                }
            }
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let admin = Pubkey::new_unique();
        let customer = Pubkey::new_unique();
        let mut cafe = Cafe::new(config(admin, ONE_TOKEN, 10, 1));

        cafe.subscribe(customer, ONE_TOKEN).unwrap();
        assert_eq!(cafe.customer(customer).subscription_balance, ONE_TOKEN);

        cafe.reserve_seat(customer, 1).unwrap();
        assert_eq!(cafe.customer(customer).assigned_seat, 1);
        assert!(cafe.seat(1).is_held_by(&customer));

        cafe.change_seat(customer, 2).unwrap();
        assert!(cafe.seat(1).is_free());
        assert!(cafe.seat(2).is_held_by(&customer));
        assert_eq!(cafe.customer(customer).assigned_seat, 2);

        let outcome = cafe.check_in(customer, DAY).unwrap();
        assert_eq!(outcome.streak, 1);
        assert_eq!(cafe.customer(customer).continuous_attendance_days, 1);
        assert_eq!(cafe.customer(customer).payback_balance, 1_000_000);

        let refunded = cafe.refund(admin, customer).unwrap();
        assert_eq!(refunded, ONE_TOKEN);
        let record = cafe.customer(customer);
        assert_eq!(record.subscription_balance, 0);
        assert_eq!(record.payback_balance, 1_000_000);
        assert_eq!(record.assigned_seat, 2);
        assert_eq!(cafe.vault, 0);
        cafe.assert_seats_consistent();
    }

    #[test]
    fn test_subscribe_requires_exact_fee() {
        let customer = Pubkey::new_unique();
        let mut cafe = Cafe::new(config(Pubkey::new_unique(), ONE_TOKEN, 10, 1));

        assert!(matches!(cafe.subscribe(customer, ONE_TOKEN - 1), Err(LogicError::InvalidAmount)));
        assert!(matches!(cafe.subscribe(customer, ONE_TOKEN + 1), Err(LogicError::InvalidAmount)));
        assert_eq!(cafe.customer(customer).subscription_balance, 0);

        cafe.subscribe(customer, ONE_TOKEN).unwrap();
        cafe.subscribe(customer, ONE_TOKEN).unwrap();
        assert_eq!(cafe.customer(customer).subscription_balance, 2 * ONE_TOKEN);
    }

    #[test]
    fn test_subscription_overflow_is_reported() {
        let cfg = config(Pubkey::new_unique(), ONE_TOKEN, 10, 1);
        let mut record = CustomerRecord::vacant(Pubkey::new_unique());
        record.subscription_balance = u64::MAX;
        assert!(matches!(
            subscription(&cfg, &record, ONE_TOKEN),
            Err(LogicError::CalculationOverflow)
        ));
    }

    #[test]
    fn test_seat_exclusivity() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut cafe = Cafe::new(config(Pubkey::new_unique(), ONE_TOKEN, 10, 1));

        cafe.reserve_seat(alice, 3).unwrap();
        assert!(matches!(cafe.reserve_seat(bob, 3), Err(LogicError::SeatOccupied)));
        assert!(matches!(cafe.reserve_seat(alice, 4), Err(LogicError::AlreadyHasSeat)));
        assert!(matches!(cafe.reserve_seat(bob, NO_SEAT), Err(LogicError::InvalidSeatNumber)));

        cafe.reserve_seat(bob, 4).unwrap();
        assert!(matches!(cafe.change_seat(alice, 4), Err(LogicError::SeatOccupied)));
        assert!(matches!(cafe.change_seat(alice, 3), Err(LogicError::SeatOccupied)));
        assert!(cafe.seat(3).is_held_by(&alice));
        assert!(cafe.seat(4).is_held_by(&bob));
        cafe.assert_seats_consistent();
    }

    #[test]
    fn test_change_seat_requires_a_seat() {
        let customer = Pubkey::new_unique();
        let mut cafe = Cafe::new(config(Pubkey::new_unique(), ONE_TOKEN, 10, 1));

        assert!(matches!(cafe.change_seat(customer, 5), Err(LogicError::NoCurrentSeat)));
        assert!(cafe.seat(5).is_free());
    }

    #[test]
    fn test_change_seat_rejects_mismatched_current_seat() {
        let customer = Pubkey::new_unique();
        let mut record = CustomerRecord::vacant(customer);
        record.assigned_seat = 1;
        let wrong = SeatRecord::vacant(9);
        let target = SeatRecord::vacant(2);

        assert!(matches!(
            seat_change(&record, &wrong, &target, 2),
            Err(LogicError::SeatRecordMismatch)
        ));
    }

    #[test]
    fn test_reward_waits_for_threshold() {
        let customer = Pubkey::new_unique();
        let mut cafe = Cafe::new(config(Pubkey::new_unique(), ONE_TOKEN, 10, 3));
        cafe.subscribe(customer, ONE_TOKEN).unwrap();

        assert_eq!(cafe.check_in(customer, DAY).unwrap().reward, 0);
        assert_eq!(cafe.check_in(customer, DAY + 1).unwrap().reward, 0);
        let third = cafe.check_in(customer, DAY + 2).unwrap();
        assert_eq!(third.streak, 3);
        assert_eq!(third.reward, 1_000_000);

        // Rewards accrue without compounding into the subscription balance
        let fourth = cafe.check_in(customer, DAY + 3).unwrap();
        assert_eq!(fourth.reward, 1_000_000);
        assert_eq!(cafe.customer(customer).payback_balance, 2_000_000);
        assert_eq!(cafe.customer(customer).subscription_balance, ONE_TOKEN);

        // A missed day restarts the streak below the threshold
        let after_gap = cafe.check_in(customer, DAY + 5).unwrap();
        assert_eq!(after_gap.streak, 1);
        assert_eq!(after_gap.reward, 0);
    }

    #[test]
    fn test_second_check_in_same_day_changes_nothing() {
        let customer = Pubkey::new_unique();
        let mut cafe = Cafe::new(config(Pubkey::new_unique(), ONE_TOKEN, 10, 1));
        cafe.subscribe(customer, ONE_TOKEN).unwrap();
        cafe.check_in(customer, DAY).unwrap();
        let before = cafe.customer(customer);

        assert!(matches!(cafe.check_in(customer, DAY), Err(LogicError::AlreadyCheckedIn)));
        let after = cafe.customer(customer);
        assert_eq!(after.payback_balance, before.payback_balance);
        assert_eq!(after.continuous_attendance_days, before.continuous_attendance_days);
    }

    #[test]
    fn test_check_in_requires_presence() {
        let cfg = config(Pubkey::new_unique(), ONE_TOKEN, 10, 1);
        let record = CustomerRecord::vacant(Pubkey::new_unique());
        assert!(matches!(
            check_in(&cfg, &record, false, DAY),
            Err(LogicError::NotAtLocation)
        ));
    }

    #[test]
    fn test_refund_is_admin_only() {
        let admin = Pubkey::new_unique();
        let customer = Pubkey::new_unique();
        let mut cafe = Cafe::new(config(admin, ONE_TOKEN, 10, 1));
        cafe.subscribe(customer, ONE_TOKEN).unwrap();

        assert!(matches!(cafe.refund(customer, customer), Err(LogicError::Unauthorized)));
        assert_eq!(cafe.customer(customer).subscription_balance, ONE_TOKEN);
        assert_eq!(cafe.vault, ONE_TOKEN);

        cafe.refund(admin, customer).unwrap();
        assert!(matches!(cafe.refund(admin, customer), Err(LogicError::NothingToRefund)));
    }

    #[test]
    fn test_swapped_rules_read_existing_records_unchanged() {
        let admin = Pubkey::new_unique();
        let customer = Pubkey::new_unique();
        let mut cafe = Cafe::new(config(admin, ONE_TOKEN, 10, 1));
        cafe.subscribe(customer, ONE_TOKEN).unwrap();
        cafe.reserve_seat(customer, 7).unwrap();
        cafe.check_in(customer, DAY).unwrap();
        let before = cafe.customer(customer);

        // Replace the rules: doubled fee and reward rate
        let mut next = config(admin, 2 * ONE_TOKEN, 20, 1);
        next.logic_version = LOGIC_VERSION + 1;
        cafe.config = next;

        let after = cafe.customer(customer);
        assert_eq!(after.subscription_balance, before.subscription_balance);
        assert_eq!(after.payback_balance, before.payback_balance);
        assert_eq!(after.continuous_attendance_days, before.continuous_attendance_days);
        assert_eq!(after.assigned_seat, before.assigned_seat);

        assert!(matches!(cafe.subscribe(customer, ONE_TOKEN), Err(LogicError::InvalidAmount)));
        cafe.subscribe(customer, 2 * ONE_TOKEN).unwrap();

        // The streak carried over from the old rules keeps counting
        let outcome = cafe.check_in(customer, DAY + 1).unwrap();
        assert_eq!(outcome.streak, 2);
        assert_eq!(outcome.reward, 6_000_000);
        cafe.assert_seats_consistent();
    }
}
