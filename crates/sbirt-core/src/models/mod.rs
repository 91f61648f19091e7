pub mod item;
pub mod risk;
pub mod substance;
