pub mod attendance;
pub mod config;

pub use attendance::*;
pub use config::*;
