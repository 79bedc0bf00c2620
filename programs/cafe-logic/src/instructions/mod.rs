pub mod change_seat;
pub mod check_in;
pub mod initialize_config;
pub mod refund;
pub mod reserve_seat;
pub mod store_access;
pub mod subscribe;

pub use change_seat::*;
pub use check_in::*;
pub use initialize_config::*;
pub use refund::*;
pub use reserve_seat::*;
pub use subscribe::*;
