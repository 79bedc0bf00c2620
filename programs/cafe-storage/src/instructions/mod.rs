pub mod initialize_store;
pub mod release_funds;
pub mod set_writer;
pub mod upgrade_layout;
pub mod write_customer_field;
pub mod write_seat_occupant;

pub use initialize_store::*;
pub use release_funds::*;
pub use set_writer::*;
pub use upgrade_layout::*;
pub use write_customer_field::*;
pub use write_seat_occupant::*;
