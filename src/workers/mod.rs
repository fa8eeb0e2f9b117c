pub mod pool;
pub mod task;
pub mod worker;

pub use pool::*;
pub use task::*;
pub use worker::*;
