pub mod action;
pub mod config;
pub mod deal;
pub mod game;
pub mod odds;
pub mod seat;
pub mod settlement;
pub mod showdown;
pub mod table;
pub mod turn;

pub use action::*;
pub use config::*;
pub use deal::*;
pub use game::*;
pub use odds::*;
pub use seat::*;
pub use settlement::*;
pub use showdown::*;
pub use table::*;
pub use turn::*;
