pub mod checkpoint;
pub mod config;
pub mod instances;
pub mod progress;
pub mod trainer;

pub use checkpoint::*;
pub use config::*;
pub use instances::*;
pub use progress::*;
pub use trainer::*;
