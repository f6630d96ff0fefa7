//! Data models for Curalink

mod account;
mod conversation;
mod message;
mod party;

pub use account::*;
pub use conversation::*;
pub use message::*;
pub use party::*;
