pub mod forward;
pub mod initialize;
pub mod read_dispatcher;
pub mod set_logic_module;

pub use forward::*;
pub use initialize::*;
pub use read_dispatcher::*;
pub use set_logic_module::*;
