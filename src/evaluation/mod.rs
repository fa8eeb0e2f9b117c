pub mod leaf;
pub mod regression;
pub mod rollout;

pub use leaf::*;
pub use regression::*;
pub use rollout::*;
