pub mod atomic;
pub mod disk;
pub mod fnv;

pub use atomic::*;
pub use disk::*;
pub use fnv::*;
