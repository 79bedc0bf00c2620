pub mod records;
pub mod store;

pub use records::*;
pub use store::*;
