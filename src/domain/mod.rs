pub mod branch;
pub mod change;
pub mod message;
