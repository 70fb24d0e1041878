pub mod messenger;
pub mod start;
