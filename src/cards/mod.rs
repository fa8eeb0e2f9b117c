pub mod board;
pub mod card;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod hole;
pub mod kicks;
pub mod observation;
pub mod rank;
pub mod ranking;
pub mod street;
pub mod strength;
pub mod suit;

pub use board::*;
pub use card::*;
pub use deck::*;
pub use evaluator::*;
pub use hand::*;
pub use hole::*;
pub use kicks::*;
pub use observation::*;
pub use rank::*;
pub use ranking::*;
pub use street::*;
pub use strength::*;
pub use suit::*;
