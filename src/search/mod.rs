pub mod config;
pub mod phase;
pub mod resolution;
pub mod resolver;
pub mod subgame;

pub use config::*;
pub use phase::*;
pub use resolution::*;
pub use resolver::*;
pub use subgame::*;
