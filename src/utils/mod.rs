pub mod cellref;
pub mod colors;
pub mod table;

pub use cellref::{parse_a1, to_a1};
