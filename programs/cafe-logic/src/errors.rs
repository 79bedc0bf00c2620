use anchor_lang::prelude::*;

#[error_code]
pub enum LogicError {
    #[msg("Payment does not match the monthly fee")]
    InvalidAmount,

    #[msg("Reward rate exceeds 10000 basis points")]
    InvalidRewardRate,

    #[msg("Seat numbers start at 1")]
    InvalidSeatNumber,

    #[msg("Seat is already occupied")]
    SeatOccupied,

    #[msg("Customer already holds a seat")]
    AlreadyHasSeat,

    #[msg("Customer holds no seat to change")]
    NoCurrentSeat,

    #[msg("Seat record does not match the customer's assigned seat")]
    SeatRecordMismatch,

    #[msg("Only the administrator can perform this operation")]
    Unauthorized,

    #[msg("Customer has no subscription balance to refund")]
    NothingToRefund,

    #[msg("Check-in requires presence at the cafe")]
    NotAtLocation,

    #[msg("Customer already checked in today")]
    AlreadyCheckedIn,

    #[msg("Record is not owned by the storage program")]
    ForeignRecord,

    #[msg("Arithmetic overflow in calculation")]
    CalculationOverflow,
}
