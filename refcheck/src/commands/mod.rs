// refcheck/src/commands/mod.rs

pub mod constraints;
pub mod index;
pub mod verify;
