pub mod abstraction;
pub mod config;
pub mod features;
pub mod kmeans;

pub use abstraction::*;
pub use config::*;
pub use features::*;
pub use kmeans::*;
