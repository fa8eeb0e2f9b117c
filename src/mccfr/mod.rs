pub mod delta;
pub mod discount;
pub mod encoder;
pub mod history;
pub mod info;
pub mod memory;
pub mod policy;
pub mod regrets;
pub mod row;
pub mod spot;
pub mod traversal;

pub use delta::*;
pub use discount::*;
pub use encoder::*;
pub use history::*;
pub use info::*;
pub use memory::*;
pub use policy::*;
pub use regrets::*;
pub use row::*;
pub use spot::*;
pub use traversal::*;
