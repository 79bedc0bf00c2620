pub mod dispatcher;
pub mod logic_call;

pub use dispatcher::*;
pub use logic_call::*;
