// Register file and address decoder

pub mod map;
pub mod regfile;

pub use map::{Access, Region};
pub use regfile::{ReadReq, RegFile, WriteReq};
