pub mod meta;
pub mod players;
pub mod predict;
